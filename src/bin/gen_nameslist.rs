// src/bin/gen_nameslist.rs
// Build the compact name/annotation tables for every configured language and
// write them to JSON.
// Usage:
//   cargo run --bin gen_nameslist                          # ./NamesList.txt etc. -> tables/nameslist.json
//   cargo run --bin gen_nameslist -- <dir> <out.json>
// NAMESLIST_DIR / NAMESLIST_OUT / NAMESLIST_LANGS work too (see config.rs).

use std::fs;

use anyhow::{Context, Result};
use uninameslist::{
    config::Config,
    nameslist::{Stats, pipeline::build_selected, save_tables_json},
};

fn main() -> Result<()> {
    let cfg = Config::from_env_and_args(std::env::args().skip(1))?;
    println!(
        "[gen_nameslist] reading {:?} from {}",
        cfg.langs,
        cfg.dir.display()
    );

    let built = build_selected(&cfg.dir, &cfg.langs).context("building name tables")?;

    for t in &built {
        let out = cfg.out_for(t.lang);
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        save_tables_json(&out, t).with_context(|| format!("failed to write {}", out.display()))?;

        let s = &t.stats;
        println!(
            "[gen_nameslist] {:?}: {} lines, {} blocks, {} aliases, {} planes / {} pages materialized",
            t.lang,
            s.lines_read,
            t.block_count(),
            t.alias_count(),
            s.unique_planes,
            s.unique_pages,
        );
        println!(
            "[gen_nameslist] {:?}: max name {} bytes, max annotation {} bytes -> {}",
            t.lang,
            s.max_name_len,
            s.max_annot_len,
            out.display()
        );
    }

    let (max_n, max_a) = Stats::combined_max(built.iter().map(|t| &t.stats));
    println!("[gen_nameslist] overall max name {max_n}, max annotation {max_a}");
    Ok(())
}
