//! Paged table: empty-page and empty-plane sharing, the reserved tail page,
//! and lookups matching the flat table.

use std::io::Cursor;

use uninameslist::nameslist::{
    CODEPOINT_LIMIT, CompactTable, Lang, Page, Plane,
    compact::{PLANE_SLOTS, split_codepoint},
    parser::NamesListParser,
    reader::LineReader,
    table::CodepointTable,
};

fn flat(src: &str) -> CodepointTable {
    let mut r = LineReader::new(Cursor::new(src.as_bytes()));
    NamesListParser::new().run(&mut r).expect("parse").table
}

const SAMPLE: &str = "\
0041\tLATIN CAPITAL LETTER A
\t= first letter
00BD\tVULGAR FRACTION ONE HALF
\t% 1/2
1F600\tGRINNING FACE
E0001\tLANGUAGE TAG
";

#[test]
fn empty_planes_share_the_empty_plane() {
    let c = CompactTable::build(Lang::En, flat(SAMPLE));
    assert_eq!(c.planes().len(), PLANE_SLOTS);
    for p in [2, 3, 4, 13, 15, 16, 17, 31] {
        assert_eq!(c.planes()[p], Plane::Empty, "plane {p}");
    }
    assert!(matches!(c.planes()[0], Plane::Unique(_)));
    assert!(matches!(c.planes()[1], Plane::Unique(_)));
    assert!(matches!(c.planes()[14], Plane::Unique(_)));
}

#[test]
fn only_pages_with_data_are_materialized() {
    let c = CompactTable::build(Lang::En, flat(SAMPLE));
    let s = c.stats();
    assert_eq!(s.unique_planes, 3);
    // U+0041 and U+00BD share page 00; U+1F600 and U+E0001 get one each.
    assert_eq!(s.unique_pages, 3);
    assert_eq!(s.tail_pages, 1);
    assert_eq!(s.empty_pages, 3 * 256 - 3 - 1);

    let Plane::Unique(pages) = &c.planes()[1] else {
        panic!("plane 1 should be materialized");
    };
    assert!(matches!(pages[0xF6], Page::Unique(_)));
    assert_eq!(pages[0xF5], Page::Empty);
    assert_eq!(pages[0xFF], Page::Empty);
}

#[test]
fn lookups_match_the_flat_table() {
    let table = flat(SAMPLE);
    let expected: Vec<(u32, Option<String>, Option<String>)> = table
        .iter()
        .map(|(cp, r)| (cp, r.name.clone(), r.annotation.clone()))
        .collect();
    let c = CompactTable::build(Lang::En, table);

    for (cp, name, annot) in &expected {
        assert_eq!(c.name(*cp), name.as_deref(), "U+{cp:04X}");
        assert_eq!(c.annotation(*cp), annot.as_deref(), "U+{cp:04X}");
    }
    let present: usize = (0..CODEPOINT_LIMIT)
        .filter(|&cp| cp < 0xFFFE || cp > 0xFFFF)
        .filter(|&cp| c.get(cp).is_some())
        .count();
    assert_eq!(present, expected.len());
    assert_eq!(c.get(CODEPOINT_LIMIT), None);
    assert_eq!(c.get(u32::MAX), None);
}

#[test]
fn tail_of_the_bmp_carries_the_reserved_notes() {
    let c = CompactTable::build(Lang::En, flat(SAMPLE));
    let Plane::Unique(pages) = &c.planes()[0] else {
        panic!("plane 0 should be materialized");
    };
    assert_eq!(pages[0xFF], Page::EmptyTail);
    assert_eq!(
        c.annotation(0xFFFE),
        Some("\t* the value ?FFFE is guaranteed not to be a Unicode character at all")
    );
    assert!(c.annotation(0xFFFF).is_some_and(|a| a.contains("?FFFF")));
    assert_eq!(c.name(0xFFFE), None);
    assert_eq!(c.get(0xFFFD), None);
    // Only the BMP has them.
    assert_eq!(c.get(0x1FFFE), None);
}

#[test]
fn reserved_notes_follow_the_language() {
    let c = CompactTable::build(Lang::Fr, flat("0041\tLETTRE MAJUSCULE LATINE A\n"));
    assert!(c.annotation(0xFFFE).is_some_and(|a| a.contains("on est assuré")));
}

#[test]
fn reserved_notes_survive_an_empty_bmp() {
    let c = CompactTable::build(Lang::En, flat("1F600\tGRINNING FACE\n"));
    assert_eq!(c.planes()[0], Plane::Empty);
    assert!(c.annotation(0xFFFF).is_some());
    assert_eq!(c.get(0xFEFF), None);
}

#[test]
fn reserved_slots_alone_do_not_materialize_the_tail_page() {
    let c = CompactTable::build(
        Lang::En,
        flat("0041\tA\nFFFE\t<not a character>\n\t* from the file\n"),
    );
    let Plane::Unique(pages) = &c.planes()[0] else {
        panic!("plane 0 should be materialized");
    };
    assert_eq!(pages[0xFF], Page::EmptyTail);
    assert!(c.annotation(0xFFFE).is_some_and(|a| a.contains("guaranteed")));
}

#[test]
fn data_in_the_tail_page_keeps_its_own_records() {
    let c = CompactTable::build(
        Lang::En,
        flat(
            "FFFD\tREPLACEMENT CHARACTER\n\
             FFFF\t<not a character>\n\t* from the file\n",
        ),
    );
    let Plane::Unique(pages) = &c.planes()[0] else {
        panic!("plane 0 should be materialized");
    };
    assert!(matches!(pages[0xFF], Page::Unique(_)));
    assert_eq!(c.name(0xFFFD), Some("REPLACEMENT CHARACTER"));
    assert_eq!(c.annotation(0xFFFF), Some("\t* from the file\n"));
    // U+FFFE had nothing in the file, so it gets the built-in note.
    assert!(c.annotation(0xFFFE).is_some_and(|a| a.contains("?FFFE")));
}

#[test]
fn nothing_at_all_compacts_to_empty_planes() {
    let c = CompactTable::build(Lang::En, CodepointTable::new());
    assert!(c.planes().iter().all(|p| *p == Plane::Empty));
    assert_eq!(c.stats().unique_pages, 0);
}

#[test]
fn split_codepoint_addresses() {
    assert_eq!(split_codepoint(0x1F600), (1, 0xF6, 0x00));
    assert_eq!(split_codepoint(0x10FFFF), (16, 0xFF, 0xFF));
    assert_eq!(split_codepoint(0x41), (0, 0, 0x41));
}
