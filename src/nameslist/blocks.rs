// src/nameslist/blocks.rs
use serde::{Deserialize, Serialize};

use crate::error::{NamesListError, Result};

/// A named codepoint range from an `@@` line. `start < end` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub start: u32,
    pub end: u32,
    pub name: String,
}

impl Block {
    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        self.start <= cp && cp <= self.end
    }
}

/// Blocks in the order the file declares them. No sorting and no overlap
/// checks: the file is trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockRegistry {
    blocks: Vec<Block>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, start: u32, end: u32, name: &str) -> Result<()> {
        self.blocks
            .try_reserve(1)
            .map_err(|_| NamesListError::OutOfMemory { what: "the block list" })?;
        self.blocks.push(Block {
            start,
            end,
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Index of the block holding `cp`. Walks in file order and gives up at
    /// the first block that starts past `cp`, so it relies on the file listing
    /// blocks in ascending order.
    pub fn position_of(&self, cp: u32) -> Option<usize> {
        for (i, b) in self.blocks.iter().enumerate() {
            if cp < b.start {
                break;
            }
            if cp <= b.end {
                return Some(i);
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a BlockRegistry {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
