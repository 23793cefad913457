//! List and quotation nesting built from flat line paths.
//!
//! A list item line such as `#*;` describes a path from the outermost list to
//! the item: one level per marker. The stack of open levels is aligned with
//! each new path by closing every level that differs and opening every level
//! that is missing, so the emitted containers always nest correctly.
//!
//! ```text
//! *      begin_list begin_item
//! **       begin_list begin_item
//! *        end_item end_list end_item begin_item
//! ```

use crate::ir::events::Event;
use crate::ir::parameters::Parameters;
use crate::listener::Listener;
use crate::scanner::block_type::BlockType;

/// One level of a nesting stack: a container and its currently open item.
pub(crate) trait NestingLevel {
    /// Whether `other` belongs to the container opened by `self`.
    fn continues(&self, other: &Self) -> bool;
    fn open(&self, out: &mut dyn Listener);
    fn open_item(&self, out: &mut dyn Listener);
    fn close_item(&self, out: &mut dyn Listener);
    fn close(&self, out: &mut dyn Listener);
    /// Takes over the item of `other`, keeping this level's container.
    fn adopt_item(&mut self, other: Self);
}

#[derive(Debug)]
pub(crate) struct NestingStack<T> {
    levels: Vec<T>,
}

impl<T> Default for NestingStack<T> {
    fn default() -> Self {
        Self { levels: Vec::new() }
    }
}

impl<T: NestingLevel> NestingStack<T> {
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn top(&self) -> Option<&T> {
        self.levels.last()
    }

    /// Aligns the open levels with `path` and leaves a fresh item open at
    /// its last level.
    pub fn align(&mut self, path: Vec<T>, out: &mut dyn Listener) {
        let Some(last) = path.len().checked_sub(1) else {
            self.close_all(out);
            return;
        };

        // Shared prefix, never including the last level: its item is always new.
        let mut common = 0;
        while common < last
            && common < self.levels.len()
            && self.levels[common].continues(&path[common])
        {
            common += 1;
        }
        tracing::trace!(
            open = self.depth(),
            shared = common,
            target = path.len(),
            "aligning nesting path"
        );

        while self.levels.len() > common + 1 {
            if let Some(level) = self.levels.pop() {
                level.close_item(out);
                level.close(out);
            }
        }

        let mut reuse = false;
        if let Some(current) = self.levels.get(common) {
            current.close_item(out);
            if common == last && current.continues(&path[common]) {
                reuse = true;
            } else {
                current.close(out);
                self.levels.pop();
            }
        }

        for (depth, level) in path.into_iter().enumerate().skip(common) {
            if reuse && depth == common {
                if let Some(current) = self.levels.last_mut() {
                    current.adopt_item(level);
                    current.open_item(out);
                }
            } else {
                level.open(out);
                level.open_item(out);
                self.levels.push(level);
            }
        }
    }

    pub fn close_all(&mut self, out: &mut dyn Listener) {
        while let Some(level) = self.levels.pop() {
            level.close_item(out);
            level.close(out);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Bulleted,
    Numbered,
    Definition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemKind {
    Item,
    Term,
    Description,
}

/// A list level: its list container and the item open in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListLevel {
    list: ListKind,
    item: ItemKind,
    list_params: Parameters,
    item_params: Parameters,
}

impl ListLevel {
    /// Reads a marker path. Unknown markers count as bullets and an empty
    /// path as a single bullet. The parameters go to the innermost level.
    pub fn parse_path(path: &str, item_params: Parameters, list_params: Parameters) -> Vec<Self> {
        let markers: Vec<char> = if path.is_empty() {
            vec!['*']
        } else {
            path.chars().collect()
        };
        let last = markers.len() - 1;
        markers
            .into_iter()
            .enumerate()
            .map(|(depth, marker)| {
                let (list, item) = match marker {
                    '#' => (ListKind::Numbered, ItemKind::Item),
                    ';' => (ListKind::Definition, ItemKind::Term),
                    ':' => (ListKind::Definition, ItemKind::Description),
                    _ => (ListKind::Bulleted, ItemKind::Item),
                };
                let innermost = depth == last;
                ListLevel {
                    list,
                    item,
                    list_params: if innermost {
                        list_params.clone()
                    } else {
                        Parameters::new()
                    },
                    item_params: if innermost {
                        item_params.clone()
                    } else {
                        Parameters::new()
                    },
                }
            })
            .collect()
    }

    pub fn block_type(&self) -> BlockType {
        match self.item {
            ItemKind::Item => BlockType::LIST_LI,
            ItemKind::Term => BlockType::LIST_DL_DT,
            ItemKind::Description => BlockType::LIST_DL_DD,
        }
    }

    fn container_event(&self) -> Event {
        match self.list {
            ListKind::Bulleted | ListKind::Numbered => Event::BeginList {
                ordered: self.list == ListKind::Numbered,
                params: self.list_params.clone(),
            },
            ListKind::Definition => Event::BeginDefinitionList(self.list_params.clone()),
        }
    }

    fn item_event(&self) -> Event {
        match self.item {
            ItemKind::Item => Event::BeginListItem(self.item_params.clone()),
            ItemKind::Term => Event::BeginDefinitionTerm,
            ItemKind::Description => Event::BeginDefinitionDescription,
        }
    }
}

impl NestingLevel for ListLevel {
    fn continues(&self, other: &Self) -> bool {
        self.list == other.list
    }

    fn open(&self, out: &mut dyn Listener) {
        out.on_event(&self.container_event());
    }

    fn open_item(&self, out: &mut dyn Listener) {
        out.on_event(&self.item_event());
    }

    fn close_item(&self, out: &mut dyn Listener) {
        if let Some(end) = self.item_event().matching_end() {
            out.on_event(&end);
        }
    }

    fn close(&self, out: &mut dyn Listener) {
        if let Some(end) = self.container_event().matching_end() {
            out.on_event(&end);
        }
    }

    fn adopt_item(&mut self, other: Self) {
        self.item = other.item;
        self.item_params = other.item_params;
    }
}

/// A quotation level. All levels are alike; only the depth matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QuoteLevel {
    params: Parameters,
}

impl QuoteLevel {
    /// `depth` levels, the innermost one carrying `params`.
    pub fn path(depth: usize, params: Parameters) -> Vec<Self> {
        let depth = depth.max(1);
        let mut levels = vec![QuoteLevel::default(); depth - 1];
        levels.push(QuoteLevel { params });
        levels
    }
}

impl NestingLevel for QuoteLevel {
    fn continues(&self, _other: &Self) -> bool {
        true
    }

    fn open(&self, out: &mut dyn Listener) {
        out.on_event(&Event::BeginQuotation(self.params.clone()));
    }

    fn open_item(&self, out: &mut dyn Listener) {
        out.on_event(&Event::BeginQuotationLine);
    }

    fn close_item(&self, out: &mut dyn Listener) {
        out.on_event(&Event::EndQuotationLine);
    }

    fn close(&self, out: &mut dyn Listener) {
        out.on_event(&Event::EndQuotation(self.params.clone()));
    }

    fn adopt_item(&mut self, _other: Self) {}
}
