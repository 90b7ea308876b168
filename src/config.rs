// src/config.rs
// Settings for the binaries. Environment first, positional args override:
//   NAMESLIST_DIR    directory holding NamesList.txt / ListeDesNoms.txt (default ".")
//   NAMESLIST_OUT    output path for gen_nameslist (default "tables/nameslist.json")
//   NAMESLIST_LANGS  comma-separated language codes (default "en,fr")

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::nameslist::lang::{ALL_LANGS, Lang};

#[derive(Debug, Clone)]
pub struct Config {
    pub dir: PathBuf,
    pub out: PathBuf,
    pub langs: Vec<Lang>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            out: PathBuf::from("tables/nameslist.json"),
            langs: ALL_LANGS.to_vec(),
        }
    }
}

pub fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

pub fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

pub fn parse_langs(list: &str) -> Result<Vec<Lang>> {
    let mut langs = Vec::new();
    for code in list.split(',').filter(|s| !s.trim().is_empty()) {
        let Some(l) = Lang::from_code(code) else {
            bail!("unknown language code {code:?} (expected en or fr)");
        };
        if !langs.contains(&l) {
            langs.push(l);
        }
    }
    if langs.is_empty() {
        bail!("no languages selected");
    }
    Ok(langs)
}

impl Config {
    /// `args` are the positional arguments after the program name:
    /// `[dir] [out]`.
    pub fn from_env_and_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut cfg = Config::default();
        if let Ok(dir) = std::env::var("NAMESLIST_DIR") {
            cfg.dir = dir.into();
        }
        if let Ok(out) = std::env::var("NAMESLIST_OUT") {
            cfg.out = out.into();
        }
        if let Ok(list) = std::env::var("NAMESLIST_LANGS") {
            cfg.langs = parse_langs(&list)?;
        }

        let mut args = args.into_iter();
        if let Some(dir) = args.next() {
            cfg.dir = dir.into();
        }
        if let Some(out) = args.next() {
            cfg.out = out.into();
        }
        if let Some(extra) = args.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(cfg)
    }

    /// Output path for one language: the primary keeps `out` as given, other
    /// languages get their code spliced in before the extension.
    pub fn out_for(&self, lang: Lang) -> PathBuf {
        let suffix = lang.config().suffix;
        if suffix.is_empty() {
            return self.out.clone();
        }
        let stem = self
            .out
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "nameslist".to_string());
        let name = match self.out.extension() {
            Some(ext) => format!("{stem}-{}.{}", suffix.to_lowercase(), ext.to_string_lossy()),
            None => format!("{stem}-{}", suffix.to_lowercase()),
        };
        self.out.with_file_name(name)
    }
}
