//! Scanner behavior switches.

/// Options controlling how the scanner shapes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Wrap headers in sections derived from their levels.
    pub emit_sections: bool,
    /// Hold macros and verbatim runs seen outside any block until the next
    /// event decides between inline and block form. When off, they are
    /// emitted as blocks right away.
    pub defer_ambiguous_blocks: bool,
    /// Header levels above this are clamped to it.
    pub max_header_level: usize,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            emit_sections: true,
            defer_ambiguous_blocks: true,
            max_header_level: 6,
        }
    }
}
