// src/dev/generator.rs
// Seeded generator of NamesList-shaped input, shared by fuzz_nameslist and
// the integration tests. Alongside the text it records what a correct parse
// must produce, so callers can check the parser against it directly.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use crate::nameslist::aliases::ALIAS_MAX_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Cr,
    CrLf,
}

pub const ALL_LINE_ENDINGS: &[LineEnding] = &[LineEnding::Lf, LineEnding::Cr, LineEnding::CrLf];

#[derive(Debug, Default, Clone)]
pub struct Expected {
    pub title: Option<String>,
    pub names: BTreeMap<u32, String>,
    pub annotations: BTreeMap<u32, String>,
    pub blocks: Vec<(u32, u32, String)>,
    /// codepoint -> alias length in characters
    pub aliases: BTreeMap<u32, usize>,
}

pub struct Generated {
    /// LF-terminated source.
    pub source: String,
    pub expected: Expected,
}

// Planes that get data; everything else must compact to the empty plane.
const PLANES_USED: &[u32] = &[0, 1, 2, 14];

const WORDS: &[&str] = &[
    "LATIN", "CAPITAL", "SMALL", "LETTER", "WITH", "ACUTE", "GRAVE", "SIGN", "DIGIT", "MARK",
    "COMBINING", "ARROW", "BOX", "DRAWINGS", "LIGHT", "HEAVY", "SYLLABLE", "VOWEL", "TONE",
];

fn gen_words<R: Rng>(rng: &mut R, max_words: usize) -> String {
    let n = rng.random_range(1..=max_words);
    (0..n)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn gen_alias<R: Rng>(rng: &mut R) -> String {
    if rng.random_bool(0.1) {
        // too long to be recorded
        return "X".repeat(ALIAS_MAX_LEN + rng.random_range(0..5));
    }
    gen_words(rng, 4)
}

struct Emitter {
    out: String,
    exp: Expected,
}

impl Emitter {
    fn line(&mut self, s: &str) {
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn annotate(&mut self, cp: u32, s: &str) {
        let a = self.exp.annotations.entry(cp).or_default();
        a.push_str(s);
        a.push('\n');
    }
}

/// Builds a random list with `n_blocks` blocks (some of them malformed on
/// purpose) and up to `max_chars` characters per block.
pub fn gen_nameslist_source<R: Rng>(rng: &mut R, n_blocks: usize, max_chars: usize) -> Generated {
    let mut e = Emitter {
        out: String::new(),
        exp: Expected::default(),
    };

    e.line("; charset=UTF-8");
    e.line("@@@\tThe Unicode Standard 99.0");
    e.exp.title = Some("The Unicode Standard 99.0".to_string());
    e.line("@@@+\tThis file is generated.");
    e.line("@+\tNo character is active yet, so this is dropped.");

    // Blocks go out in codepoint order, one page each. Plane 0 page FF is
    // left alone: its last two slots are reserved.
    let pages: BTreeSet<(u32, u32)> = (0..n_blocks)
        .map(|_| {
            let plane = PLANES_USED[rng.random_range(0..PLANES_USED.len())];
            (plane, rng.random_range(0..0xFFu32))
        })
        .collect();
    for (b, (plane, page)) in pages.into_iter().enumerate() {
        match rng.random_range(0..10) {
            0 => e.line("@@\tXYZ\tNot Hex\t0010"),
            1 => e.line("@@\t0200\tBackwards\t0100"),
            2 => e.line("@@\t0300\tNo End"),
            _ => {}
        }

        let start = (plane << 16) | (page << 8);
        let end = start + rng.random_range(0x10..=0xFFu32);
        let name = format!("Block {b} {}", gen_words(rng, 2));
        e.line(&format!("@@\t{start:04X}\t{name}\t{end:04X}"));
        e.exp.blocks.push((start, end, name));
        e.line(&format!("@\t\t{}", gen_words(rng, 3)));

        let n_chars = rng.random_range(0..=max_chars);
        let mut cps: Vec<u32> = (0..n_chars).map(|_| rng.random_range(start..=end)).collect();
        cps.sort_unstable();
        cps.dedup();

        for cp in cps {
            if rng.random_bool(0.05) {
                e.line(&format!("{cp:04X} no tab here"));
                continue;
            }
            if rng.random_bool(0.2) {
                e.line(&format!("{cp:04X}\t<control>"));
            } else {
                let name = gen_words(rng, 5);
                if rng.random_bool(0.2) {
                    e.line(&format!("{cp:04X}\t{name};\tsee below"));
                } else {
                    e.line(&format!("{cp:04X}\t{name}"));
                }
                e.exp.names.insert(cp, name);
            }

            if rng.random_bool(0.2) {
                let alias = gen_alias(rng);
                let line = format!("\t% {alias}");
                e.line(&line);
                e.annotate(cp, &line);
                let len = alias.chars().count();
                if len > 0 && len < ALIAS_MAX_LEN {
                    e.exp.aliases.insert(cp, len);
                }
            }

            for _ in 0..rng.random_range(0..4) {
                match rng.random_range(0..6) {
                    0 => {
                        let line = format!("\t= {}", gen_words(rng, 3).to_lowercase());
                        e.line(&line);
                        e.annotate(cp, &line);
                    }
                    1 => {
                        let line = format!("\t* {}", gen_words(rng, 6).to_lowercase());
                        e.line(&line);
                        e.annotate(cp, &line);
                    }
                    2 => {
                        let line = format!("\tx (see also - {:04X})", rng.random_range(0..0x3000u32));
                        e.line(&line);
                        e.annotate(cp, &line);
                    }
                    3 => e.line("\t; a comment between annotations"),
                    4 => {
                        let notice = format!("\t* notice: {}", gen_words(rng, 3));
                        e.line(&format!("@+{notice}"));
                        e.annotate(cp, &notice);
                    }
                    _ => {
                        e.line("; top-level comment keeps the current char");
                    }
                }
            }
        }

        if rng.random_bool(0.2) {
            e.line("110000\tOUT OF RANGE");
            e.line("\t* dropped with it");
        }
    }

    e.line("; end of list");
    Generated {
        source: e.out,
        expected: e.exp,
    }
}

pub fn with_line_ending(src: &str, le: LineEnding) -> String {
    match le {
        LineEnding::Lf => src.to_string(),
        LineEnding::Cr => src.replace('\n', "\r"),
        LineEnding::CrLf => src.replace('\n', "\r\n"),
    }
}
