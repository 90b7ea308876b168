// src/nameslist/parser.rs
// Line classifier for the NamesList format.
//
//   @@\t<start>\t<block name>\t<end>   block header
//   @@@\t<title>                       title (clears the current char)
//   @+\t<text>                         notice, appended to the current char
//   @...                               any other header clears the current char
//   ;...                               comment
//   <hex>\t<name>                      char declaration ("<...>" names are skipped)
//   \t;...                             comment
//   \t<text>                           annotation for the current char

use std::io::BufRead;

use super::{
    blocks::BlockRegistry,
    reader::LineReader,
    table::{CODEPOINT_LIMIT, CodepointTable},
};
use crate::error::Result;

/// What one line means, given the parser state before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    Block { start: u32, end: u32, name: &'a str },
    Title(&'a str),
    Name { cp: u32, name: &'a str },
    /// Text to append to `cp`'s annotation (annotation lines and notices).
    Annotation { cp: u32, text: &'a str },
}

/// Holds the "current codepoint" register. `None` means annotation lines
/// have nowhere to go and are dropped.
#[derive(Debug, Default)]
pub struct NamesListParser {
    active: Option<u32>,
}

/// Output of one full pass over a language's input.
pub struct Parsed {
    pub table: CodepointTable,
    pub blocks: BlockRegistry,
    pub title: Option<String>,
    pub lines_read: usize,
}

impl NamesListParser {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn active(&self) -> Option<u32> {
        self.active
    }

    pub fn classify<'a>(&mut self, line: &'a str) -> Option<Event<'a>> {
        let bytes = line.as_bytes();
        match bytes.first() {
            Some(b'@') => self.classify_header(line),
            Some(b';') => None,
            Some(b'0'..=b'9' | b'A'..=b'F') => self.classify_declaration(line),
            _ => {
                let cp = self.active?;
                if bytes.starts_with(b"\t;") {
                    return None;
                }
                Some(Event::Annotation { cp, text: line })
            }
        }
    }

    fn classify_header<'a>(&mut self, line: &'a str) -> Option<Event<'a>> {
        if line.starts_with("@+\t") {
            // The notice keeps its leading tab so it reads like an annotation line.
            let cp = self.active?;
            return Some(Event::Annotation {
                cp,
                text: &line[2..],
            });
        }

        self.active = None;

        if let Some(rest) = line.strip_prefix("@@\t") {
            return parse_block_header(rest);
        }
        if let Some(rest) = line.strip_prefix("@@@\t") {
            return Some(Event::Title(rest.trim_end_matches('\n')));
        }
        None
    }

    fn classify_declaration<'a>(&mut self, line: &'a str) -> Option<Event<'a>> {
        let (value, rest) = parse_hex(line);
        let Some(after_tab) = rest.strip_prefix('\t') else {
            log::trace!("skipping malformed declaration {:?}", line.trim_end());
            return None;
        };

        let cp = value.filter(|&v| v < CODEPOINT_LIMIT as u64).map(|v| v as u32);
        self.active = cp;
        let cp = cp?;

        // "<control>", "<not a character>": the annotations that follow still
        // belong to this codepoint, but there is no primary name.
        if after_tab.starts_with('<') {
            return None;
        }

        let end = after_tab
            .find(['\t', '\r', '\n', ';'])
            .unwrap_or(after_tab.len());
        Some(Event::Name {
            cp,
            name: &after_tab[..end],
        })
    }

    /// Runs the whole stream through the classifier and applies every event
    /// to a fresh table and block registry.
    pub fn run<R: BufRead>(mut self, reader: &mut LineReader<R>) -> Result<Parsed> {
        let mut table = CodepointTable::new();
        let mut blocks = BlockRegistry::new();
        let mut title = None;

        while let Some(line) = reader.next_line()? {
            match self.classify(&line) {
                Some(Event::Block { start, end, name }) => blocks.append(start, end, name)?,
                Some(Event::Title(t)) => title = Some(t.to_string()),
                Some(Event::Name { cp, name }) => table.set_name(cp, name)?,
                Some(Event::Annotation { cp, text }) => table.append_annotation(cp, text)?,
                None => {}
            }
        }

        Ok(Parsed {
            table,
            blocks,
            title,
            lines_read: reader.lines_read(),
        })
    }
}

fn parse_block_header(rest: &str) -> Option<Event<'_>> {
    let (start, rest) = parse_hex(rest);
    let start = start?;
    let rest = rest.strip_prefix('\t')?;
    let (name, rest) = rest.split_once('\t')?;
    let (end, _) = parse_hex(rest);
    let end = end?;
    if end <= start || end > u32::MAX as u64 {
        log::trace!("skipping block {name:?}: end {end:X} <= start {start:X}");
        return None;
    }
    Some(Event::Block {
        start: start as u32,
        end: end as u32,
        name,
    })
}

/// Leading hex digits (either case) as a number, plus the rest of the input.
/// `None` when there are no digits. Overlong values saturate.
pub fn parse_hex(s: &str) -> (Option<u64>, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_hexdigit).count();
    if digits == 0 {
        return (None, s);
    }
    let value = s[..digits].bytes().fold(0u64, |acc, b| {
        let d = (b as char).to_digit(16).unwrap_or(0) as u64;
        acc.saturating_mul(16).saturating_add(d)
    });
    (Some(value), &s[digits..])
}
