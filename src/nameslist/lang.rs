// src/nameslist/lang.rs
use serde::{Deserialize, Serialize};

/// Languages a NamesList can be built for. `En` is the primary list,
/// everything else falls back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Lang {
    En = 0,
    Fr = 1,
}

pub const ALL_LANGS: &[Lang] = &[Lang::En, Lang::Fr];

/// Static per-language knobs. The pipeline code is the same for every
/// language; only these values differ.
#[derive(Debug, Clone, Copy)]
pub struct LanguageConfig {
    pub lang: Lang,
    /// "EN" / "FR"
    pub code: &'static str,
    /// Suffix used for generated symbol names ("" for the primary list).
    pub suffix: &'static str,
    pub file_name: &'static str,
    pub hint: &'static str,
    pub version: &'static str,
    /// Built-in annotations for the two reserved non-characters at the end
    /// of the BMP (U+FFFE, U+FFFF).
    pub reserved_annotations: [&'static str; 2],
}

const EN: LanguageConfig = LanguageConfig {
    lang: Lang::En,
    code: "EN",
    suffix: "",
    file_name: "NamesList.txt",
    hint: "http://www.unicode.org/Public/UNIDATA/NamesList.txt",
    version: "14.0",
    reserved_annotations: [
        "\t* the value ?FFFE is guaranteed not to be a Unicode character at all",
        "\t* the value ?FFFF is guaranteed not to be a Unicode character at all",
    ],
};

const FR: LanguageConfig = LanguageConfig {
    lang: Lang::Fr,
    code: "FR",
    suffix: "FR",
    file_name: "ListeDesNoms.txt",
    hint: "http://hapax.qc.ca/ListeNoms-14.0.0.txt (latin base char set)",
    version: "14.0",
    reserved_annotations: [
        "\t* on est assuré que la valeur ?FFFE n'est en aucune façon un caractère Unicode",
        "\t* on est assuré que la valeur ?FFFF n'est en aucune façon un caractère Unicode",
    ],
};

impl Lang {
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn config(self) -> &'static LanguageConfig {
        match self {
            Lang::En => &EN,
            Lang::Fr => &FR,
        }
    }

    pub fn from_index(i: u32) -> Option<Lang> {
        match i {
            0 => Some(Lang::En),
            1 => Some(Lang::Fr),
            _ => None,
        }
    }

    /// Accepts "en"/"fr" in any case.
    pub fn from_code(s: &str) -> Option<Lang> {
        ALL_LANGS
            .iter()
            .copied()
            .find(|l| l.config().code.eq_ignore_ascii_case(s.trim()))
    }
}
