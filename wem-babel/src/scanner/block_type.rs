//! The block type tracked by the scanner.

use std::fmt;

/// Bitmask identifying the currently open block.
///
/// Nested block types carry the bits of every enclosing type, so
/// `TABLE_ROW_CELL.is_in(TABLE)` holds while `TABLE.is_in(TABLE_ROW)` does not.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockType(u16);

impl BlockType {
    pub const NONE: BlockType = BlockType(0);
    pub const HEADER: BlockType = BlockType(1 << 1);
    pub const INFO: BlockType = BlockType(1 << 2);
    pub const PARAGRAPH: BlockType = BlockType(1 << 3);
    pub const LIST: BlockType = BlockType(1 << 4);
    pub const LIST_DL: BlockType = BlockType((1 << 5) | Self::LIST.0);
    pub const LIST_DL_DT: BlockType = BlockType((1 << 6) | Self::LIST_DL.0);
    pub const LIST_DL_DD: BlockType = BlockType((1 << 7) | Self::LIST_DL.0);
    pub const LIST_LI: BlockType = BlockType((1 << 8) | Self::LIST.0);
    pub const QUOT: BlockType = BlockType(1 << 9);
    pub const QUOT_LI: BlockType = BlockType((1 << 10) | Self::QUOT.0);
    pub const TABLE: BlockType = BlockType(1 << 11);
    pub const TABLE_ROW: BlockType = BlockType((1 << 12) | Self::TABLE.0);
    pub const TABLE_ROW_CELL: BlockType = BlockType((1 << 13) | Self::TABLE_ROW.0);

    /// True when every bit of `container` is set in `self`.
    ///
    /// `NONE` is contained in nothing but itself.
    pub fn is_in(self, container: BlockType) -> bool {
        if container == Self::NONE {
            return self == Self::NONE;
        }
        self.0 & container.0 == container.0
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NONE => "none",
            Self::HEADER => "header",
            Self::INFO => "info",
            Self::PARAGRAPH => "paragraph",
            Self::LIST => "list",
            Self::LIST_DL => "list/dl",
            Self::LIST_DL_DT => "list/dl/dt",
            Self::LIST_DL_DD => "list/dl/dd",
            Self::LIST_LI => "list/li",
            Self::QUOT => "quot",
            Self::QUOT_LI => "quot/li",
            Self::TABLE => "table",
            Self::TABLE_ROW => "table/row",
            Self::TABLE_ROW_CELL => "table/row/cell",
            _ => "mixed",
        }
    }
}

impl fmt::Debug for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockType({})", self.name())
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
