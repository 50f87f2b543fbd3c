//! The untyped attribute tree produced by the block parser.

use std::collections::HashMap;

use super::registry::{BlockKind, is_enumerable};

/// A value stored under one key of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Block(RawNode),
    /// Accumulated values of an enumerable key, in input order
    List(Vec<RawValue>),
}

/// One block's attributes and nested blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNode {
    /// `None` for the root
    kind: Option<BlockKind>,
    entries: HashMap<String, RawValue>,
}

impl RawNode {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind: Some(kind),
            entries: HashMap::new(),
        }
    }

    pub fn kind(&self) -> Option<BlockKind> {
        self.kind
    }

    /// Name used when reporting problems in this block.
    pub fn label(&self) -> &'static str {
        self.kind.map_or("(root)", BlockKind::name)
    }

    /// Store a value: appended when `key` is enumerable, overwriting otherwise.
    pub fn store(&mut self, key: &str, value: RawValue) {
        if !is_enumerable(key) {
            self.entries.insert(key.to_string(), value);
            return;
        }
        match self.entries.get_mut(key) {
            Some(RawValue::List(items)) => items.push(value),
            _ => {
                self.entries
                    .insert(key.to_string(), RawValue::List(vec![value]));
            }
        }
    }

    /// Store a value under `key`, always overwriting.
    pub fn replace(&mut self, key: &str, value: RawValue) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    /// The text value of a singleton key. For a list, the last text item.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            RawValue::Text(text) => Some(text.as_str()),
            RawValue::List(items) => items.iter().rev().find_map(|item| match item {
                RawValue::Text(text) => Some(text.as_str()),
                _ => None,
            }),
            RawValue::Block(_) => None,
        }
    }

    /// All text values of a key, in input order.
    pub fn texts(&self, key: &str) -> Vec<&str> {
        match self.entries.get(key) {
            Some(RawValue::Text(text)) => vec![text.as_str()],
            Some(RawValue::List(items)) => items
                .iter()
                .filter_map(|item| match item {
                    RawValue::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The nested block under a singleton key. For a list, the first block.
    pub fn block(&self, key: &str) -> Option<&RawNode> {
        self.blocks(key).into_iter().next()
    }

    /// All nested blocks under a key, in input order.
    pub fn blocks(&self, key: &str) -> Vec<&RawNode> {
        match self.entries.get(key) {
            Some(RawValue::Block(node)) => vec![node],
            Some(RawValue::List(items)) => items
                .iter()
                .filter_map(|item| match item {
                    RawValue::Block(node) => Some(node),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
