//! Layered settings for the wem scanning pipeline.
//!
//! A pipeline is a [`wem_babel::WikiScanner`] feeding an optional
//! [`wem_babel::Lookahead`] stage, with [`wem_babel::EventTrace`] for
//! debugging output. Each of the three reads its settings from one table:
//!
//! ```toml
//! [scanner]    # ScannerOptions
//! [lookahead]  # depth of the Lookahead stage
//! [trace]      # TraceOptions
//! ```
//!
//! The built-in values live in `defaults/wem.default.toml` and are compiled in.
//! [`Loader`] stacks files and single-key overrides over them; the last layer
//! to set a key wins.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use wem_babel::{Listener, Lookahead, ScannerOptions, TraceOptions};

const DEFAULT_TOML: &str = include_str!("../defaults/wem.default.toml");

/// Top-level configuration consumed by wem applications.
#[derive(Debug, Clone, Deserialize)]
pub struct WemConfig {
    pub scanner: ScannerConfig,
    pub lookahead: LookaheadConfig,
    pub trace: TraceConfig,
}

/// Mirrors the knobs exposed by the scanner.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    pub emit_sections: bool,
    pub defer_ambiguous_blocks: bool,
    pub max_header_level: usize,
}

impl From<ScannerConfig> for ScannerOptions {
    fn from(config: ScannerConfig) -> Self {
        ScannerOptions {
            emit_sections: config.emit_sections,
            defer_ambiguous_blocks: config.defer_ambiguous_blocks,
            max_header_level: config.max_header_level,
        }
    }
}

impl From<&ScannerConfig> for ScannerOptions {
    fn from(config: &ScannerConfig) -> Self {
        ScannerOptions {
            emit_sections: config.emit_sections,
            defer_ambiguous_blocks: config.defer_ambiguous_blocks,
            max_header_level: config.max_header_level,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookaheadConfig {
    pub depth: usize,
}

impl LookaheadConfig {
    /// Puts a [`Lookahead`] of the configured depth in front of `inner`.
    pub fn stage<L: Listener>(&self, inner: L) -> Lookahead<L> {
        Lookahead::new(inner, self.depth)
    }
}

/// Controls event trace rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceConfig {
    pub indent_string: String,
    pub show_parameters: bool,
}

impl From<TraceConfig> for TraceOptions {
    fn from(config: TraceConfig) -> Self {
        TraceOptions {
            indent_string: config.indent_string,
            show_parameters: config.show_parameters,
        }
    }
}

impl From<&TraceConfig> for TraceOptions {
    fn from(config: &TraceConfig) -> Self {
        TraceOptions {
            indent_string: config.indent_string.clone(),
            show_parameters: config.show_parameters,
        }
    }
}

/// Stacks configuration sources over the compiled-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Adds a TOML file; [`Loader::build`] fails if it does not exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Adds a TOML file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Sets one dotted key, e.g. `lookahead.depth`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges the layers into a [`WemConfig`].
    pub fn build(self) -> Result<WemConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults alone.
pub fn load_defaults() -> Result<WemConfig, ConfigError> {
    Loader::new().build()
}
