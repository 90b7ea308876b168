// src/nameslist/lookup.rs
// Read side of the built tables: per-language queries plus a two-language
// view that falls back to the primary list.

use super::{
    aliases::AliasEntry,
    blocks::Block,
    lang::Lang,
    pipeline::LanguageTables,
    table::CODEPOINT_LIMIT,
};
use crate::error::{NamesListError, Result};

impl LanguageTables {
    #[inline]
    pub fn name(&self, cp: u32) -> Option<&str> {
        self.compact.name(cp)
    }

    #[inline]
    pub fn annotation(&self, cp: u32) -> Option<&str> {
        self.compact.annotation(cp)
    }

    pub fn version(&self) -> String {
        format!("Nameslist-Version: {}", self.lang.config().version)
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_number(&self, cp: u32) -> Option<usize> {
        if cp >= CODEPOINT_LIMIT {
            return None;
        }
        self.blocks.position_of(cp)
    }

    #[inline]
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    #[inline]
    pub fn alias_count(&self) -> usize {
        self.aliases.count()
    }

    pub fn alias_codepoint(&self, index: usize) -> Option<u32> {
        self.aliases.get(index).map(|e| e.codepoint)
    }

    pub fn alias_index_of(&self, cp: u32) -> Option<usize> {
        self.aliases.index_of(cp)
    }

    pub fn alias_len_at(&self, index: usize) -> Option<usize> {
        self.aliases.get(index).map(|e| e.length as usize)
    }

    pub fn alias_len_of(&self, cp: u32) -> Option<usize> {
        self.alias_len_at(self.alias_index_of(cp)?)
    }

    /// Alias text sliced out of the owning annotation.
    pub fn alias_text_at(&self, index: usize) -> Option<&str> {
        let entry = self.aliases.get(index)?;
        let annot = self.annotation(entry.codepoint)?;
        slice_alias(annot, entry)
    }

    pub fn alias_text_of(&self, cp: u32) -> Option<&str> {
        self.alias_text_at(self.alias_index_of(cp)?)
    }

    /// Corrected name if there is one, otherwise the plain name.
    pub fn name2(&self, cp: u32) -> Option<&str> {
        self.alias_text_of(cp).or_else(|| self.name(cp))
    }
}

fn slice_alias<'a>(annot: &'a str, entry: &AliasEntry) -> Option<&'a str> {
    let mut idx = annot.char_indices().map(|(i, _)| i).chain([annot.len()]);
    let start = idx.nth(entry.offset as usize)?;
    let end = idx.nth(entry.length.checked_sub(1)? as usize)?;
    annot.get(start..end)
}

/// The primary list plus an optional secondary one. Anything the secondary
/// does not have is answered from the primary.
#[derive(Debug, Clone)]
pub struct NamesList {
    pub primary: LanguageTables,
    pub secondary: Option<LanguageTables>,
}

impl NamesList {
    pub fn new(primary: LanguageTables, secondary: Option<LanguageTables>) -> Self {
        Self { primary, secondary }
    }

    fn have(&self, lang: Lang) -> Option<&LanguageTables> {
        self.secondary.as_ref().filter(|s| s.lang == lang && lang != Lang::En)
    }

    /// Language codes by index: 0 is always "EN".
    pub fn languages(&self, index: u32) -> Option<&'static str> {
        let lang = Lang::from_index(index)?;
        if lang == Lang::En || self.have(lang).is_some() {
            Some(lang.config().code)
        } else {
            None
        }
    }

    pub fn version_alt(&self, lang: Lang) -> Option<String> {
        if let Some(s) = self.have(lang) {
            return Some(s.version());
        }
        (lang == Lang::En).then(|| self.primary.version())
    }

    pub fn name_alt(&self, cp: u32, lang: Lang) -> Option<&str> {
        self.have(lang)
            .and_then(|s| s.name(cp))
            .or_else(|| self.primary.name(cp))
    }

    pub fn annotation_alt(&self, cp: u32, lang: Lang) -> Option<&str> {
        self.have(lang)
            .and_then(|s| s.annotation(cp))
            .or_else(|| self.primary.annotation(cp))
    }

    /// (primary, requested language). The second is the primary value again
    /// when `lang` is the primary, `None` when that language is not loaded.
    pub fn name_both(&self, cp: u32, lang: Lang) -> (Option<&str>, Option<&str>) {
        let en = self.primary.name(cp);
        match self.have(lang) {
            Some(s) => (en, s.name(cp)),
            None if lang == Lang::En => (en, en),
            None => (en, None),
        }
    }

    pub fn annotation_both(&self, cp: u32, lang: Lang) -> (Option<&str>, Option<&str>) {
        let en = self.primary.annotation(cp);
        match self.have(lang) {
            Some(s) => (en, s.annotation(cp)),
            None if lang == Lang::En => (en, en),
            None => (en, None),
        }
    }

    // Block lists of different NamesList versions need not line up.
    pub fn block_count_alt(&self, lang: Lang) -> usize {
        self.have(lang)
            .map_or(self.primary.block_count(), |s| s.block_count())
    }

    pub fn block_alt(&self, index: usize, lang: Lang) -> Option<&Block> {
        self.have(lang)
            .and_then(|s| s.block(index))
            .or_else(|| self.primary.block(index))
    }

    pub fn block_number_both(&self, cp: u32, lang: Lang) -> (Option<usize>, Option<usize>) {
        let en = self.primary.block_number(cp);
        match self.have(lang) {
            Some(s) => (en, s.block_number(cp)),
            None if lang == Lang::En => (en, en),
            None => (en, None),
        }
    }
}

/// "U+0041" for the BMP, "U+01F600" beyond it.
pub fn uplus(cp: u32) -> Result<String> {
    match cp {
        0..=0xFFFF => Ok(format!("U+{cp:04X}")),
        0x1_0000..=0x10_FFFF => Ok(format!("U+{cp:06X}")),
        _ => Err(NamesListError::InvalidCodepoint(cp)),
    }
}

/// Swaps the one-character markers at the start of annotation lines for the
/// symbols they stand for. `=` lines are left alone.
pub fn display_annotation(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for line in text.split_inclusive('\n') {
        let Some(rest) = line.strip_prefix('\t') else {
            out.push_str(line);
            continue;
        };
        let mut chars = rest.chars();
        let symbol = match chars.next() {
            Some('*') => Some('\u{2022}'),
            Some('%') => Some('\u{203B}'),
            Some('x') => Some('\u{2192}'),
            Some('~') => Some('\u{2053}'),
            Some(':') => Some('\u{2261}'),
            Some('#') => Some('\u{2248}'),
            _ => None,
        };
        out.push('\t');
        match symbol {
            Some(sym) => {
                out.push(sym);
                out.push_str(chars.as_str());
            }
            None => out.push_str(rest),
        }
    }
    out
}
