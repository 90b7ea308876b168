// src/nameslist/mod.rs
pub mod aliases;
pub mod blocks;
pub mod compact;
pub mod io;
pub mod lang;
pub mod lookup;
pub mod parser;
pub mod pipeline;
pub mod reader;
pub mod table;

pub use aliases::{AliasEntry, AliasIndex};
pub use blocks::{Block, BlockRegistry};
pub use compact::{CompactTable, Page, Plane};
pub use io::{load_tables_json_bytes, save_tables_json};
pub use lang::{Lang, LanguageConfig};
pub use lookup::{NamesList, display_annotation, uplus};
pub use pipeline::{LanguageTables, Stats, build_both, build_language, build_language_from_dir};
pub use table::{CODEPOINT_LIMIT, CharRecord, CodepointTable};
