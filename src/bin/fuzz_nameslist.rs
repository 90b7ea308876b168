// src/bin/fuzz_nameslist.rs
// Generate random NamesList-shaped inputs, build them, and check the result
// against what the generator says a parse must produce.
//   - FUZZ_SEED=<u64>   first seed (default 42)
//   - FUZZ_ITERS=<n>    number of cases (default 20)
//   - FUZZ_BLOCKS=<n>   blocks per case (default 40)
//   - FUZZ_SAVE=1 and FUZZ_DIR=...   save failing cases
//   - FUZZ_INPUT=path   replay a saved case (only the line-ending checks run)

use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
    time::Instant,
};

use rand::{SeedableRng, rngs::StdRng};
use uninameslist::{
    config::{env_u64, env_usize},
    dev::generator::{ALL_LINE_ENDINGS, Expected, gen_nameslist_source, with_line_ending},
    nameslist::{
        CODEPOINT_LIMIT, Lang, LanguageTables, build_language,
        io::{load_tables_json_bytes, tables_to_json},
        parser::NamesListParser,
        reader::LineReader,
    },
};

fn check_expected(label: &str, t: &LanguageTables, exp: &Expected) -> bool {
    let mut ok = true;

    if t.title != exp.title {
        eprintln!("[{label}] title: got {:?} want {:?}", t.title, exp.title);
        ok = false;
    }

    let blocks: Vec<(u32, u32, String)> = t
        .blocks
        .iter()
        .map(|b| (b.start, b.end, b.name.clone()))
        .collect();
    if blocks != exp.blocks {
        eprintln!(
            "[{label}] blocks differ: got {} want {}",
            blocks.len(),
            exp.blocks.len()
        );
        for (i, (g, w)) in blocks.iter().zip(exp.blocks.iter()).enumerate() {
            if g != w {
                eprintln!("  #{i}: got={g:?} want={w:?}");
                break;
            }
        }
        ok = false;
    }

    for (&cp, name) in &exp.names {
        if t.name(cp) != Some(name.as_str()) {
            eprintln!("[{label}] U+{cp:04X} name: got {:?} want {name:?}", t.name(cp));
            ok = false;
        }
    }
    for (&cp, annot) in &exp.annotations {
        if t.annotation(cp) != Some(annot.as_str()) {
            eprintln!(
                "[{label}] U+{cp:04X} annotation: got {:?} want {annot:?}",
                t.annotation(cp)
            );
            ok = false;
        }
    }

    if t.alias_count() != exp.aliases.len() {
        eprintln!(
            "[{label}] alias count: got {} want {}",
            t.alias_count(),
            exp.aliases.len()
        );
        ok = false;
    }
    for (&cp, &len) in &exp.aliases {
        if t.alias_len_of(cp) != Some(len) {
            eprintln!("[{label}] U+{cp:04X} alias len: got {:?} want {len}", t.alias_len_of(cp));
            ok = false;
        }
    }
    ok
}

/// Every codepoint must read the same through the paged table as through
/// the flat one, except the two reserved slots at the end of the BMP.
fn check_compaction(label: &str, src: &str, t: &LanguageTables) -> bool {
    let mut reader = LineReader::new(Cursor::new(src.as_bytes()));
    let flat = match NamesListParser::new().run(&mut reader) {
        Ok(p) => p.table,
        Err(e) => {
            eprintln!("[{label}] flat parse failed: {e}");
            return false;
        }
    };
    for cp in 0..CODEPOINT_LIMIT {
        if cp == 0xFFFE || cp == 0xFFFF {
            continue;
        }
        if flat.get(cp) != t.compact.get(cp) {
            eprintln!(
                "[{label}] U+{cp:04X}: flat={:?} compact={:?}",
                flat.get(cp),
                t.compact.get(cp)
            );
            return false;
        }
    }
    true
}

fn check_json(label: &str, t: &LanguageTables) -> bool {
    let back = tables_to_json(t).and_then(|bytes| load_tables_json_bytes(&bytes));
    match back {
        Ok(back) if &back == t => true,
        Ok(_) => {
            eprintln!("[{label}] JSON round trip changed the tables");
            false
        }
        Err(e) => {
            eprintln!("[{label}] JSON round trip failed: {e}");
            false
        }
    }
}

fn check_line_endings(label: &str, src: &str) -> Option<LanguageTables> {
    let mut first: Option<LanguageTables> = None;
    for &le in ALL_LINE_ENDINGS {
        let text = with_line_ending(src, le);
        let t = match build_language(Lang::En, Cursor::new(text.into_bytes())) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("[{label}] {le:?}: build failed: {e}");
                return None;
            }
        };
        match &first {
            None => first = Some(t),
            Some(f) => {
                // lines_read is the same too: one logical line per terminator.
                if f != &t {
                    eprintln!("[{label}] {le:?} build differs from LF build");
                    return None;
                }
            }
        }
    }
    first
}

fn save_case(dir: &str, seed: u64, src: &str) -> PathBuf {
    let _ = fs::create_dir_all(dir);
    let path = Path::new(dir).join(format!("nameslist-seed{seed}.txt"));
    if let Err(e) = fs::write(&path, src) {
        eprintln!("[save] failed to write {}: {e}", path.display());
    }
    path
}

fn main() {
    if let Ok(path) = std::env::var("FUZZ_INPUT") {
        eprintln!("[replay] reading {path}");
        let src = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: failed to read {path}: {e}");
                std::process::exit(1);
            }
        };
        let ok = check_line_endings("replay", &src)
            .map(|t| check_compaction("replay", &src, &t) && check_json("replay", &t))
            .unwrap_or(false);
        std::process::exit(if ok { 0 } else { 1 });
    }

    let seed0 = env_u64("FUZZ_SEED", 42);
    let iters = env_usize("FUZZ_ITERS", 20);
    let n_blocks = env_usize("FUZZ_BLOCKS", 40);
    let save_cases = std::env::var("FUZZ_SAVE").ok().as_deref() == Some("1");
    let out_dir = std::env::var("FUZZ_DIR").unwrap_or_else(|_| "fuzz-cases".to_string());

    eprintln!("[fuzz] seed={seed0} iters={iters} blocks={n_blocks}");
    for i in 0..iters as u64 {
        let seed = seed0.wrapping_add(i);
        let mut rng = StdRng::seed_from_u64(seed);
        let g = gen_nameslist_source(&mut rng, n_blocks, 48);
        let label = format!("seed {seed}");
        let t0 = Instant::now();

        let ok = match check_line_endings(&label, &g.source) {
            Some(t) => {
                check_expected(&label, &t, &g.expected)
                    && check_compaction(&label, &g.source, &t)
                    && check_json(&label, &t)
            }
            None => false,
        };
        if !ok {
            if save_cases {
                let p = save_case(&out_dir, seed, &g.source);
                eprintln!("[save] wrote {}", p.display());
            }
            std::process::exit(1);
        }
        eprintln!(
            "[fuzz] {label}: {} bytes, {} names, {} blocks ok in {} ms",
            g.source.len(),
            g.expected.names.len(),
            g.expected.blocks.len(),
            t0.elapsed().as_millis()
        );
    }
    eprintln!("[fuzz] all cases matched ✅");
}
