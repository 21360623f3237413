//! Block extractor.
//!
//! Scans raw source text for block declarations of the form
//!
//! ```text
//! <!uniscript name, type, content = < ... >>;
//! ```
//!
//! and collects them into a [`BlockTable`]. Text between declarations is
//! ignored, and a declaration whose header does not parse is skipped
//! without a diagnostic.

use crate::block::{Block, BlockKind, BlockTable};

const MARKER: &str = "<!uniscript";
const TERMINATOR: &str = ">>;";

/// Extract every block declared in `source` into a fresh table.
pub fn extract(source: &str) -> BlockTable {
    let mut table = BlockTable::new();
    extract_into(source, &mut table);
    table
}

/// Extract every block declared in `source` into `table`.
///
/// Declarations are visited in source order, so when two share a name the
/// later one is what remains in the table.
pub fn extract_into(source: &str, table: &mut BlockTable) {
    let mut search_from = 0;
    while let Some(offset) = source[search_from..].find(MARKER) {
        let marker_start = search_from + offset;
        let mut scanner = Scanner::new(source, marker_start + MARKER.len());
        match scanner.declaration() {
            Some(block) => {
                table.insert(block);
                search_from = scanner.index;
            }
            None => search_from = marker_start + MARKER.len(),
        }
    }
}

struct Scanner<'src> {
    source: &'src str,
    index: usize,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str, index: usize) -> Self {
        Scanner { source, index }
    }

    /// Parse the rest of a declaration after the marker token.
    fn declaration(&mut self) -> Option<Block> {
        self.require_whitespace()?;
        let name = self.word()?;
        self.expect(",")?;
        self.require_whitespace()?;
        let kind = self.word()?;
        self.expect(",")?;
        self.require_whitespace()?;
        self.expect("content")?;
        self.skip_whitespace();
        self.expect("=")?;
        self.skip_whitespace();
        self.expect("<")?;
        let content = self.body()?;

        Some(Block {
            name: name.to_string(),
            kind: BlockKind::from_tag(kind),
            content: content.to_string(),
        })
    }

    /// Everything up to the first terminator, with surrounding whitespace
    /// removed.
    fn body(&mut self) -> Option<&'src str> {
        let rest = &self.source[self.index..];
        let end = rest.find(TERMINATOR)?;
        self.index += end + TERMINATOR.len();
        Some(rest[..end].trim())
    }

    fn word(&mut self) -> Option<&'src str> {
        let rest = &self.source[self.index..];
        let len = rest
            .bytes()
            .take_while(|&b| is_word_byte(b))
            .count();
        if len == 0 {
            return None;
        }
        self.index += len;
        Some(&rest[..len])
    }

    fn expect(&mut self, literal: &str) -> Option<()> {
        if self.source[self.index..].starts_with(literal) {
            self.index += literal.len();
            Some(())
        } else {
            None
        }
    }

    fn require_whitespace(&mut self) -> Option<()> {
        if self.skip_whitespace() > 0 { Some(()) } else { None }
    }

    fn skip_whitespace(&mut self) -> usize {
        let rest = &self.source[self.index..];
        let len: usize = rest
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        self.index += len;
        len
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
