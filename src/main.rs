// src/main.rs
// Look codepoints up in freshly built tables.
//   uninameslist U+00BD 41 1F600
// Reads the NamesList files from NAMESLIST_DIR (default "."). French is used
// when NAMESLIST_LANGS includes fr and ListeDesNoms.txt is present.

use anyhow::{Context, Result, bail};
use uninameslist::{
    config::Config,
    nameslist::{
        Lang, NamesList, build_language_from_dir, display_annotation, parser::parse_hex, uplus,
    },
};

fn parse_codepoint(arg: &str) -> Result<u32> {
    let hex = arg
        .strip_prefix("U+")
        .or_else(|| arg.strip_prefix("u+"))
        .or_else(|| arg.strip_prefix("0x"))
        .unwrap_or(arg);
    match parse_hex(hex) {
        (Some(v), "") if v <= u32::MAX as u64 => Ok(v as u32),
        _ => bail!("not a hex codepoint: {arg:?}"),
    }
}

fn main() -> Result<()> {
    let cfg = Config::from_env_and_args(std::iter::empty())?;
    let cps: Vec<u32> = std::env::args()
        .skip(1)
        .map(|a| parse_codepoint(&a))
        .collect::<Result<_>>()?;
    if cps.is_empty() {
        bail!("usage: uninameslist <codepoint>...");
    }

    let primary = build_language_from_dir(Lang::En, &cfg.dir).context("building English tables")?;
    let secondary = if cfg.langs.contains(&Lang::Fr) {
        match build_language_from_dir(Lang::Fr, &cfg.dir) {
            Ok(t) => Some(t),
            Err(e) => {
                eprintln!("[uninameslist] French tables unavailable: {e}");
                None
            }
        }
    } else {
        None
    };
    let lang = if secondary.is_some() { Lang::Fr } else { Lang::En };
    let list = NamesList::new(primary, secondary);

    for cp in cps {
        println!("{}", uplus(cp)?);
        let (en, alt) = list.name_both(cp, lang);
        println!("  name:  {}", en.unwrap_or("-"));
        if lang != Lang::En {
            println!("  nom:   {}", alt.unwrap_or("-"));
        }
        if let Some(alias) = list.primary.alias_text_of(cp) {
            println!("  alias: {alias}");
        }
        match list.primary.block_number(cp).and_then(|i| list.primary.block(i)) {
            Some(b) => println!("  block: {} ({}..{})", b.name, uplus(b.start)?, uplus(b.end)?),
            None => println!("  block: -"),
        }
        if let Some(a) = list.annotation_alt(cp, lang) {
            for line in display_annotation(a).lines() {
                println!("  {line}");
            }
        }
    }
    Ok(())
}
