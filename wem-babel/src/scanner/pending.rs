//! Macros and verbatim runs whose inline/block form is not decided yet.

use crate::ir::events::Event;
use crate::ir::parameters::Parameters;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pending {
    Macro {
        name: String,
        params: Parameters,
        content: Option<String>,
    },
    Verbatim {
        content: String,
        params: Parameters,
    },
}

impl Pending {
    pub fn into_inline(self) -> Event {
        match self {
            Pending::Macro {
                name,
                params,
                content,
            } => Event::OnMacroInline {
                name,
                params,
                content,
            },
            Pending::Verbatim { content, params } => Event::OnVerbatimInline { content, params },
        }
    }

    pub fn into_block(self) -> Event {
        match self {
            Pending::Macro {
                name,
                params,
                content,
            } => Event::OnMacroBlock {
                name,
                params,
                content,
            },
            Pending::Verbatim { content, params } => Event::OnVerbatimBlock { content, params },
        }
    }
}
