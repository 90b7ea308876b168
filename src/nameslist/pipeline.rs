// src/nameslist/pipeline.rs
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    time::Instant,
};

use rayon::prelude::*;

use super::{
    aliases::AliasIndex,
    blocks::BlockRegistry,
    compact::CompactTable,
    lang::Lang,
    parser::{NamesListParser, Parsed},
    reader::LineReader,
};
use crate::error::{NamesListError, Result};

/// Per-language size figures. These are the only numbers that are ever
/// combined across languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub lines_read: usize,
    pub max_name_len: usize,
    pub max_annot_len: usize,
    pub unique_planes: usize,
    pub unique_pages: usize,
}

impl Stats {
    /// Largest name/annotation lengths over several languages.
    pub fn combined_max<'a>(all: impl IntoIterator<Item = &'a Stats>) -> (usize, usize) {
        all.into_iter().fold((0, 0), |(n, a), s| {
            (n.max(s.max_name_len), a.max(s.max_annot_len))
        })
    }
}

/// Everything built for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTables {
    pub lang: Lang,
    pub title: Option<String>,
    pub blocks: BlockRegistry,
    pub aliases: AliasIndex,
    pub compact: CompactTable,
    pub stats: Stats,
}

/// Reads, parses, indexes and compacts one language's NamesList.
pub fn build_language<R: BufRead>(lang: Lang, input: R) -> Result<LanguageTables> {
    let t0 = Instant::now();
    let mut reader = LineReader::new(input);
    let Parsed {
        table,
        blocks,
        title,
        lines_read,
    } = NamesListParser::new().run(&mut reader)?;
    log::debug!(
        "[{lang:?}] parsed {lines_read} lines, {} blocks in {} ms",
        blocks.len(),
        t0.elapsed().as_millis()
    );

    let aliases = AliasIndex::scan(&table);
    let (max_name_len, max_annot_len) = table.max_lengths();

    let compact = CompactTable::build(lang, table);
    let cs = compact.stats();
    let stats = Stats {
        lines_read,
        max_name_len,
        max_annot_len,
        unique_planes: cs.unique_planes,
        unique_pages: cs.unique_pages,
    };
    log::info!(
        "[{lang:?}] {} blocks, {} aliases, {} planes / {} pages materialized, max name {} / annot {} ({} ms)",
        blocks.len(),
        aliases.count(),
        stats.unique_planes,
        stats.unique_pages,
        stats.max_name_len,
        stats.max_annot_len,
        t0.elapsed().as_millis()
    );

    Ok(LanguageTables {
        lang,
        title,
        blocks,
        aliases,
        compact,
        stats,
    })
}

/// Opens `<dir>/<language file>` and builds it.
pub fn build_language_from_dir(lang: Lang, dir: &Path) -> Result<LanguageTables> {
    let cfg = lang.config();
    let path = dir.join(cfg.file_name);
    let file = File::open(&path).map_err(|source| NamesListError::MissingInput {
        file: path.clone(),
        hint: cfg.hint,
        source,
    })?;
    log::debug!("[{lang:?}] reading {}", path.display());
    build_language(lang, BufReader::new(file))
}

/// Builds the primary and secondary language side by side. They share
/// nothing, so either failing fails the pair.
pub fn build_both(dir: &Path) -> Result<(LanguageTables, LanguageTables)> {
    let (en, fr) = rayon::join(
        || build_language_from_dir(Lang::En, dir),
        || build_language_from_dir(Lang::Fr, dir),
    );
    Ok((en?, fr?))
}

/// Builds any subset of languages, in the order given.
pub fn build_selected(dir: &Path, langs: &[Lang]) -> Result<Vec<LanguageTables>> {
    langs
        .par_iter()
        .map(|&l| build_language_from_dir(l, dir))
        .collect()
}
