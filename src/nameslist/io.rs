// src/nameslist/io.rs
use std::{
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{
    aliases::{AliasEntry, AliasIndex},
    blocks::BlockRegistry,
    compact::{CompactTable, PAGE_LEN, PAGES_PER_PLANE, PLANE_SLOTS, Page, PageRecords, Plane},
    lang::Lang,
    pipeline::{LanguageTables, Stats},
    table::CharRecord,
};
use crate::error::{NamesListError, Result};

// -------------------- JSON (de)serialization --------------------
//
// Unique pages are written once, in plane/page order. Each non-empty plane
// is a 256-entry array of page references into that list; empty planes are
// `null`. Shared empty pages are written as tags, never as data.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum PageRef {
    Empty,
    EmptyTail,
    Unique(u32),
}

#[serde_as]
#[derive(Serialize, Deserialize)]
struct PlaneDisk {
    #[serde_as(as = "[_; 256]")]
    pages: [PageRef; PAGES_PER_PLANE],
}

#[derive(Serialize, Deserialize)]
struct StatsDisk {
    lines_read: usize,
    max_name_len: usize,
    max_annot_len: usize,
}

#[derive(Serialize, Deserialize)]
struct TablesDisk {
    lang: Lang,
    #[serde(default)]
    title: Option<String>,
    blocks: BlockRegistry,
    aliases: Vec<AliasEntry>,
    planes: Vec<Option<PlaneDisk>>,
    pages: Vec<Vec<CharRecord>>,
    stats: StatsDisk,
}

impl From<&LanguageTables> for TablesDisk {
    fn from(t: &LanguageTables) -> Self {
        let mut pages = Vec::new();
        let planes = t
            .compact
            .planes()
            .iter()
            .map(|plane| match plane {
                Plane::Empty => None,
                Plane::Unique(ps) => Some(PlaneDisk {
                    pages: std::array::from_fn(|j| match &ps[j] {
                        Page::Empty => PageRef::Empty,
                        Page::EmptyTail => PageRef::EmptyTail,
                        Page::Unique(records) => {
                            pages.push(records.to_vec());
                            PageRef::Unique(pages.len() as u32 - 1)
                        }
                    }),
                }),
            })
            .collect();

        Self {
            lang: t.lang,
            title: t.title.clone(),
            blocks: t.blocks.clone(),
            aliases: t.aliases.entries().to_vec(),
            planes,
            pages,
            stats: StatsDisk {
                lines_read: t.stats.lines_read,
                max_name_len: t.stats.max_name_len,
                max_annot_len: t.stats.max_annot_len,
            },
        }
    }
}

impl TablesDisk {
    fn into_tables(self) -> Result<LanguageTables> {
        if self.planes.len() > PLANE_SLOTS {
            return Err(NamesListError::BadTables(format!(
                "{} plane slots, at most {PLANE_SLOTS} allowed",
                self.planes.len()
            )));
        }

        let mut unique: Vec<Option<Box<PageRecords>>> = Vec::with_capacity(self.pages.len());
        for (i, records) in self.pages.into_iter().enumerate() {
            let page: Box<PageRecords> = records
                .into_boxed_slice()
                .try_into()
                .map_err(|r: Box<[CharRecord]>| {
                    NamesListError::BadTables(format!(
                        "page {i} has {} records, expected {PAGE_LEN}",
                        r.len()
                    ))
                })?;
            unique.push(Some(page));
        }

        let mut planes = Vec::with_capacity(PLANE_SLOTS);
        for (p, plane) in self.planes.into_iter().enumerate() {
            let Some(plane) = plane else {
                planes.push(Plane::Empty);
                continue;
            };
            let mut pages: Box<[Page; PAGES_PER_PLANE]> =
                Box::new(std::array::from_fn(|_| Page::Empty));
            for (j, r) in plane.pages.into_iter().enumerate() {
                pages[j] = match r {
                    PageRef::Empty => Page::Empty,
                    PageRef::EmptyTail => Page::EmptyTail,
                    PageRef::Unique(id) => {
                        let page = unique
                            .get_mut(id as usize)
                            .and_then(Option::take)
                            .ok_or_else(|| {
                                NamesListError::BadTables(format!(
                                    "plane {p:02X} page {j:02X}: page reference {id} is missing or reused"
                                ))
                            })?;
                        Page::Unique(page)
                    }
                };
            }
            planes.push(Plane::Unique(pages));
        }
        if unique.iter().any(Option::is_some) {
            return Err(NamesListError::BadTables("unreferenced pages".into()));
        }

        let compact = CompactTable::from_planes(self.lang, planes);
        let cs = compact.stats();
        Ok(LanguageTables {
            lang: self.lang,
            title: self.title,
            blocks: self.blocks,
            aliases: AliasIndex::from_entries(self.aliases),
            compact,
            stats: Stats {
                lines_read: self.stats.lines_read,
                max_name_len: self.stats.max_name_len,
                max_annot_len: self.stats.max_annot_len,
                unique_planes: cs.unique_planes,
                unique_pages: cs.unique_pages,
            },
        })
    }
}

pub fn save_tables_json(path: &Path, t: &LanguageTables) -> Result<()> {
    let instant = Instant::now();
    // Stream to disk to avoid giant intermediate strings.
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, &TablesDisk::from(t))?;
    w.flush()?;
    log::debug!(
        "[{:?}] saved tables to {} in {} ms",
        t.lang,
        path.display(),
        instant.elapsed().as_millis()
    );
    Ok(())
}

pub fn tables_to_json(t: &LanguageTables) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&TablesDisk::from(t))?)
}

pub fn load_tables_json_bytes(data: &[u8]) -> Result<LanguageTables> {
    serde_json::from_slice::<TablesDisk>(data)?.into_tables()
}
