//! Query side: blocks, two-language fallback, persisted tables, helpers.

use std::io::Cursor;

use uninameslist::{
    NamesListError,
    nameslist::{
        Lang, LanguageTables, NamesList, build_both, build_language, build_language_from_dir,
        display_annotation,
        io::{load_tables_json_bytes, tables_to_json},
        save_tables_json, uplus,
    },
};

const EN: &str = "\
@@@\tThe Unicode Standard 14.0.0
@@\t0000\tC0 Controls and Basic Latin (Basic Latin)\t007F
0000\t<control>
\t= NULL
0041\tLATIN CAPITAL LETTER A
\tx (latin small letter a - 0061)
@@\t0080\tC1 Controls and Latin-1 Supplement (Latin-1 Supplement)\t00FF
00BD\tVULGAR FRACTION ONE HALF
\t% 1/2
@@\t0370\tGreek and Coptic\t03FF
03A9\tGREEK CAPITAL LETTER OMEGA
";

const FR: &str = "\
@@\t0000\tCommandes C0 et latin de base (Latin de base)\t007F
0041\tLETTRE MAJUSCULE LATINE A
";

fn build(lang: Lang, src: &str) -> LanguageTables {
    build_language(lang, Cursor::new(src.as_bytes())).expect("build")
}

fn both() -> NamesList {
    NamesList::new(build(Lang::En, EN), Some(build(Lang::Fr, FR)))
}

#[test]
fn block_number_walks_blocks_in_order() {
    let t = build(Lang::En, EN);
    assert_eq!(t.block_count(), 3);
    assert_eq!(t.block_number(0x41), Some(0));
    assert_eq!(t.block_number(0xBD), Some(1));
    assert_eq!(t.block_number(0x3A9), Some(2));
    assert_eq!(t.block_number(0x200), None);
    assert_eq!(t.block_number(0x110000), None);
    let b = t.block(2).expect("block 2");
    assert_eq!((b.start, b.end, b.name.as_str()), (0x370, 0x3FF, "Greek and Coptic"));
    assert!(t.block(3).is_none());
}

#[test]
fn secondary_language_falls_back_to_primary() {
    let nl = both();
    assert_eq!(nl.name_alt(0x41, Lang::Fr), Some("LETTRE MAJUSCULE LATINE A"));
    assert_eq!(nl.name_alt(0x3A9, Lang::Fr), Some("GREEK CAPITAL LETTER OMEGA"));
    assert_eq!(nl.name_alt(0x41, Lang::En), Some("LATIN CAPITAL LETTER A"));
    assert_eq!(nl.annotation_alt(0xBD, Lang::Fr), Some("\t% 1/2\n"));
    assert_eq!(nl.name_alt(0x42, Lang::Fr), None);
}

#[test]
fn both_returns_primary_and_requested() {
    let nl = both();
    assert_eq!(
        nl.name_both(0x41, Lang::Fr),
        (Some("LATIN CAPITAL LETTER A"), Some("LETTRE MAJUSCULE LATINE A"))
    );
    assert_eq!(
        nl.name_both(0x3A9, Lang::Fr),
        (Some("GREEK CAPITAL LETTER OMEGA"), None)
    );
    assert_eq!(
        nl.name_both(0x41, Lang::En),
        (Some("LATIN CAPITAL LETTER A"), Some("LATIN CAPITAL LETTER A"))
    );
    assert_eq!(nl.annotation_both(0, Lang::En), (Some("\t= NULL\n"), Some("\t= NULL\n")));
    assert_eq!(nl.block_number_both(0xBD, Lang::Fr), (Some(1), None));
    assert_eq!(nl.block_number_both(0x41, Lang::Fr), (Some(0), Some(0)));
}

#[test]
fn block_alt_prefers_the_secondary_list() {
    let nl = both();
    assert_eq!(nl.block_count_alt(Lang::Fr), 1);
    assert_eq!(nl.block_count_alt(Lang::En), 3);
    assert_eq!(
        nl.block_alt(0, Lang::Fr).map(|b| b.name.as_str()),
        Some("Commandes C0 et latin de base (Latin de base)")
    );
    assert_eq!(
        nl.block_alt(2, Lang::Fr).map(|b| b.name.as_str()),
        Some("Greek and Coptic")
    );
}

#[test]
fn languages_and_versions() {
    let nl = both();
    assert_eq!(nl.languages(0), Some("EN"));
    assert_eq!(nl.languages(1), Some("FR"));
    assert_eq!(nl.languages(2), None);
    assert!(nl.version_alt(Lang::Fr).is_some());

    let en_only = NamesList::new(build(Lang::En, EN), None);
    assert_eq!(en_only.languages(1), None);
    assert_eq!(en_only.version_alt(Lang::Fr), None);
    assert_eq!(en_only.name_both(0x41, Lang::Fr).1, None);
    assert_eq!(en_only.name_alt(0x41, Lang::Fr), Some("LATIN CAPITAL LETTER A"));
}

#[test]
fn json_round_trip_keeps_everything() {
    let t = build(Lang::En, EN);
    let bytes = tables_to_json(&t).expect("save");
    let back = load_tables_json_bytes(&bytes).expect("load");
    assert_eq!(back, t);
    assert_eq!(back.alias_text_of(0xBD), Some("1/2"));
    assert_eq!(back.title.as_deref(), Some("The Unicode Standard 14.0.0"));
    assert!(back.annotation(0xFFFF).is_some());
}

#[test]
fn corrupt_json_is_rejected() {
    let t = build(Lang::En, EN);
    let mut v: serde_json::Value =
        serde_json::from_slice(&tables_to_json(&t).expect("save")).expect("json");
    v["pages"][0] = serde_json::json!([]);
    let bytes = serde_json::to_vec(&v).expect("json");
    assert!(matches!(
        load_tables_json_bytes(&bytes),
        Err(NamesListError::BadTables(_))
    ));
    assert!(matches!(
        load_tables_json_bytes(b"{"),
        Err(NamesListError::Json(_))
    ));
}

#[test]
fn missing_input_names_the_file_and_where_to_get_it() {
    let dir = std::env::temp_dir().join("uninameslist-no-such-dir");
    let err = build_language_from_dir(Lang::Fr, &dir).expect_err("missing file");
    assert!(matches!(err, NamesListError::MissingInput { .. }));
    let msg = err.to_string();
    assert!(msg.contains("ListeDesNoms.txt"), "{msg}");
    assert!(msg.contains("hapax.qc.ca"), "{msg}");
}

#[test]
fn both_languages_from_a_directory() {
    let dir = std::env::temp_dir().join(format!("uninameslist-both-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("NamesList.txt"), EN).unwrap();
    std::fs::write(dir.join("ListeDesNoms.txt"), FR).unwrap();

    let (en, fr) = build_both(&dir).expect("build both");
    assert_eq!(en.lang, Lang::En);
    assert_eq!(fr.lang, Lang::Fr);
    assert_eq!(fr.name(0x41), Some("LETTRE MAJUSCULE LATINE A"));
    assert_eq!(en.stats.lines_read, EN.lines().count());

    let out = dir.join("fr.json");
    save_tables_json(&out, &fr).expect("save");
    let back = load_tables_json_bytes(&std::fs::read(&out).unwrap()).expect("load");
    assert_eq!(back, fr);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn uplus_formats() {
    assert_eq!(uplus(0x41).unwrap(), "U+0041");
    assert_eq!(uplus(0xFFFF).unwrap(), "U+FFFF");
    assert_eq!(uplus(0x1F600).unwrap(), "U+01F600");
    assert_eq!(uplus(0x10FFFF).unwrap(), "U+10FFFF");
    assert!(uplus(0x110000).is_err());
}

#[test]
fn display_annotation_swaps_markers() {
    let a = "\t* note\n\t% alias\n\tx (see - 0061)\n\t= same\n\t~ 0041 FE00 variant\n\t: 0041 0300\n\t# 0020 0301";
    assert_eq!(
        display_annotation(a),
        "\t\u{2022} note\n\t\u{203B} alias\n\t\u{2192} (see - 0061)\n\t= same\n\t\u{2053} 0041 FE00 variant\n\t\u{2261} 0041 0300\n\t\u{2248} 0020 0301"
    );
}
