// src/nameslist/compact.rs
// Three-level paged form of a codepoint table:
//
//   plane index (32 slots) -> page index (256 per plane) -> page (256 records)
//
// Pages with nothing in them are not stored; they resolve to one of two
// shared empty pages. Planes with nothing in them resolve to a shared empty
// plane. Storage is proportional to the number of pages that hold data.

use rayon::prelude::*;

use super::{
    lang::Lang,
    table::{CharRecord, CodepointTable},
};

pub const PLANES: usize = 17;
/// The plane index is addressed with `(cp >> 16) & 0x1f`; slots past plane
/// 16 are always empty.
pub const PLANE_SLOTS: usize = 32;
pub const PAGES_PER_PLANE: usize = 256;
pub const PAGE_LEN: usize = 256;
pub const PLANE_LEN: usize = PAGES_PER_PLANE * PAGE_LEN;

/// Offsets of U+FFFE and U+FFFF inside the tail page.
pub const RESERVED_OFFSETS: [usize; 2] = [0xFE, 0xFF];

pub type PageRecords = [CharRecord; PAGE_LEN];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Empty,
    /// Empty apart from the built-in non-character notes at U+FFFE/U+FFFF.
    EmptyTail,
    Unique(Box<PageRecords>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plane {
    Empty,
    Unique(Box<[Page; PAGES_PER_PLANE]>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactStats {
    pub unique_planes: usize,
    pub unique_pages: usize,
    pub empty_pages: usize,
    pub tail_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactTable {
    lang: Lang,
    planes: Vec<Plane>,
    tail: Box<PageRecords>,
}

#[inline]
pub fn split_codepoint(cp: u32) -> (usize, usize, usize) {
    (
        ((cp >> 16) & 0x1f) as usize,
        ((cp >> 8) & 0xff) as usize,
        (cp & 0xff) as usize,
    )
}

/// The last page of the BMP carries the reserved non-character notes.
#[inline]
pub fn is_tail_page(plane: usize, page: usize) -> bool {
    plane == 0 && page == PAGES_PER_PLANE - 1
}

#[inline]
fn is_reserved(plane: usize, offset_in_plane: usize) -> bool {
    plane == 0 && offset_in_plane >= PLANE_LEN - 2
}

fn tail_records(lang: Lang) -> Box<PageRecords> {
    let notes = lang.config().reserved_annotations;
    let mut page: Box<PageRecords> = Box::new(std::array::from_fn(|_| CharRecord::default()));
    for (slot, note) in RESERVED_OFFSETS.into_iter().zip(notes) {
        page[slot].annotation = Some(note.to_string());
    }
    page
}

fn compact_plane(
    lang: Lang,
    plane: usize,
    slots: &mut [Option<Box<CharRecord>>],
    tail: &PageRecords,
) -> Plane {
    debug_assert_eq!(slots.len(), PLANE_LEN);

    let plane_empty = slots
        .iter()
        .enumerate()
        .all(|(i, s)| s.is_none() || is_reserved(plane, i));
    if plane_empty {
        return Plane::Empty;
    }

    let mut pages: Box<[Page; PAGES_PER_PLANE]> =
        Box::new(std::array::from_fn(|_| Page::Empty));
    for (j, chunk) in slots.chunks_mut(PAGE_LEN).enumerate() {
        let tail_page = is_tail_page(plane, j);
        let scan_len = if tail_page { RESERVED_OFFSETS[0] } else { PAGE_LEN };
        if chunk[..scan_len].iter().all(Option::is_none) {
            pages[j] = if tail_page { Page::EmptyTail } else { Page::Empty };
            continue;
        }

        let mut records: Box<PageRecords> =
            Box::new(std::array::from_fn(|k| chunk[k].take().map(|b| *b).unwrap_or_default()));
        if tail_page {
            for k in RESERVED_OFFSETS {
                if records[k].annotation.is_none() {
                    records[k].annotation = tail[k].annotation.clone();
                }
            }
        }
        pages[j] = Page::Unique(records);
    }
    log::trace!("[{lang:?}] plane {plane:02X} materialized");
    Plane::Unique(pages)
}

impl CompactTable {
    /// Consumes the flat table. Planes are independent, so they are
    /// compacted in parallel.
    pub fn build(lang: Lang, table: CodepointTable) -> Self {
        let tail = tail_records(lang);
        let mut slots = table.into_slots();

        let mut planes: Vec<Plane> = slots
            .par_chunks_mut(PLANE_LEN)
            .enumerate()
            .map(|(p, chunk)| compact_plane(lang, p, chunk, &tail))
            .collect();
        debug_assert_eq!(planes.len(), PLANES);
        planes.resize(PLANE_SLOTS, Plane::Empty);

        Self { lang, planes, tail }
    }

    /// Assembles a table from already-compacted planes (used when loading).
    pub fn from_planes(lang: Lang, mut planes: Vec<Plane>) -> Self {
        planes.resize(PLANE_SLOTS, Plane::Empty);
        Self {
            lang,
            planes,
            tail: tail_records(lang),
        }
    }

    #[inline]
    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// The shared tail page every `Page::EmptyTail` resolves to.
    pub fn tail_page(&self) -> &PageRecords {
        &self.tail
    }

    /// Record for `cp`, `None` if it has neither name nor annotation.
    pub fn get(&self, cp: u32) -> Option<&CharRecord> {
        if cp >= super::table::CODEPOINT_LIMIT {
            return None;
        }
        let (p, j, k) = split_codepoint(cp);
        let rec = match &self.planes[p] {
            Plane::Empty if is_tail_page(p, j) => &self.tail[k],
            Plane::Empty => return None,
            Plane::Unique(pages) => match &pages[j] {
                Page::Empty => return None,
                Page::EmptyTail => &self.tail[k],
                Page::Unique(records) => &records[k],
            },
        };
        (!rec.is_empty()).then_some(rec)
    }

    #[inline]
    pub fn name(&self, cp: u32) -> Option<&str> {
        self.get(cp)?.name.as_deref()
    }

    #[inline]
    pub fn annotation(&self, cp: u32) -> Option<&str> {
        self.get(cp)?.annotation.as_deref()
    }

    pub fn stats(&self) -> CompactStats {
        let mut s = CompactStats::default();
        for plane in &self.planes {
            let Plane::Unique(pages) = plane else {
                continue;
            };
            s.unique_planes += 1;
            for page in pages.iter() {
                match page {
                    Page::Empty => s.empty_pages += 1,
                    Page::EmptyTail => s.tail_pages += 1,
                    Page::Unique(_) => s.unique_pages += 1,
                }
            }
        }
        s
    }
}
