// src/nameslist/table.rs
use serde::{Deserialize, Serialize};

use crate::error::{NamesListError, Result};

/// One past the largest Unicode scalar value.
pub const CODEPOINT_LIMIT: u32 = 0x11_0000;

/// Name and annotation for one codepoint. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl CharRecord {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.annotation.is_none()
    }
}

/// Flat codepoint -> record table covering the whole codepoint space.
/// Lives only for one language's parse; the compactor consumes it.
pub struct CodepointTable {
    slots: Vec<Option<Box<CharRecord>>>,
}

impl Default for CodepointTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CodepointTable {
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(CODEPOINT_LIMIT as usize);
        slots.resize_with(CODEPOINT_LIMIT as usize, || None);
        Self { slots }
    }

    #[inline]
    fn slot_mut(&mut self, cp: u32) -> Option<&mut CharRecord> {
        let slot = self.slots.get_mut(cp as usize)?;
        let rec: &mut CharRecord = slot.get_or_insert_with(Default::default);
        Some(rec)
    }

    /// Later declarations of the same codepoint replace the name.
    /// Out-of-range codepoints are dropped.
    pub fn set_name(&mut self, cp: u32, name: &str) -> Result<()> {
        let Some(rec) = self.slot_mut(cp) else {
            return Ok(());
        };
        let mut owned = String::new();
        owned
            .try_reserve_exact(name.len())
            .map_err(|_| NamesListError::OutOfMemory { what: "a name" })?;
        owned.push_str(name);
        rec.name = Some(owned);
        Ok(())
    }

    /// Creates the annotation or appends to it.
    pub fn append_annotation(&mut self, cp: u32, fragment: &str) -> Result<()> {
        let Some(rec) = self.slot_mut(cp) else {
            return Ok(());
        };
        let annot = rec.annotation.get_or_insert_with(String::new);
        annot
            .try_reserve(fragment.len())
            .map_err(|_| NamesListError::OutOfMemory { what: "an annotation" })?;
        annot.push_str(fragment);
        Ok(())
    }

    #[inline]
    pub fn get(&self, cp: u32) -> Option<&CharRecord> {
        self.slots
            .get(cp as usize)
            .and_then(|s| s.as_deref())
            .filter(|r| !r.is_empty())
    }

    /// Non-empty records in codepoint order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &CharRecord)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(cp, s)| s.as_deref().map(|r| (cp as u32, r)))
    }

    pub fn slots(&self) -> &[Option<Box<CharRecord>>] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Option<Box<CharRecord>>> {
        self.slots
    }

    /// Longest name and longest annotation, in bytes.
    pub fn max_lengths(&self) -> (usize, usize) {
        self.iter().fold((0, 0), |(n, a), (_, r)| {
            (
                n.max(r.name.as_ref().map_or(0, String::len)),
                a.max(r.annotation.as_ref().map_or(0, String::len)),
            )
        })
    }
}
