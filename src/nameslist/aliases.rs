// src/nameslist/aliases.rs
// Normalized aliases ("names2"): a corrected name given as the first
// annotation line, written "\t% CORRECTED NAME".

use hashbrown::HashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::table::CodepointTable;

pub const ALIAS_MARKER: &str = "\t% ";
/// Characters between the start of the annotation and the alias text.
pub const ALIAS_OFFSET: u32 = 3;
/// Aliases must be shorter than this many characters.
pub const ALIAS_MAX_LEN: usize = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub codepoint: u32,
    pub offset: u32,
    /// In characters, first annotation line only.
    pub length: u32,
}

/// Alias entries in increasing codepoint order.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    entries: Vec<AliasEntry>,
    by_codepoint: HashMap<u32, usize>,
}

/// Length of the alias declared at the start of `annotation`, if there is one
/// within bounds.
pub fn alias_len(annotation: &str) -> Option<usize> {
    let rest = annotation.strip_prefix(ALIAS_MARKER)?;
    let line = rest.split('\n').next().unwrap_or("");
    let len = line.chars().count();
    (len > 0 && len < ALIAS_MAX_LEN).then_some(len)
}

impl AliasIndex {
    /// Scans every annotation of a finished table. The table is not touched.
    pub fn scan(table: &CodepointTable) -> Self {
        let entries: Vec<AliasEntry> = table
            .slots()
            .par_iter()
            .enumerate()
            .filter_map(|(cp, slot)| {
                let annot = slot.as_deref()?.annotation.as_deref()?;
                let len = alias_len(annot)?;
                Some(AliasEntry {
                    codepoint: cp as u32,
                    offset: ALIAS_OFFSET,
                    length: len as u32,
                })
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Rebuilds the lookup side table. Entries must already be sorted.
    pub fn from_entries(entries: Vec<AliasEntry>) -> Self {
        let by_codepoint = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.codepoint, i))
            .collect();
        Self {
            entries,
            by_codepoint,
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&AliasEntry> {
        self.entries.get(index)
    }

    #[inline]
    pub fn index_of(&self, cp: u32) -> Option<usize> {
        self.by_codepoint.get(&cp).copied()
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }
}

impl PartialEq for AliasIndex {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for AliasIndex {}
