use std::collections::HashMap;
use std::fmt;

/// Type tag of a block, as written in its declaration header.
///
/// The set understood by the code generator is closed; anything else is
/// kept verbatim as `Unknown` and generates no output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Html,
    Css,
    Js,
    Ts,
    Py,
    Unknown(String),
}

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "html" => BlockKind::Html,
            "css" => BlockKind::Css,
            "js" => BlockKind::Js,
            "ts" => BlockKind::Ts,
            "py" => BlockKind::Py,
            other => BlockKind::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Html => "html",
            BlockKind::Css => "css",
            BlockKind::Js => "js",
            BlockKind::Ts => "ts",
            BlockKind::Py => "py",
            BlockKind::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named, typed unit of raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub kind: BlockKind,
    pub content: String,
}

/// Blocks of one compile, keyed by name.
///
/// Inserting a name that already exists replaces the earlier block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockTable {
    blocks: HashMap<String, Block>,
}

impl BlockTable {
    pub const ENTRY_POINT: &'static str = "main";

    pub fn new() -> Self {
        BlockTable::default()
    }

    pub fn insert(&mut self, block: Block) -> Option<Block> {
        self.blocks.insert(block.name.clone(), block)
    }

    pub fn get(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    pub fn entry_point(&self) -> Option<&Block> {
        self.get(Self::ENTRY_POINT)
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, kind: &str, content: &str) -> Block {
        Block {
            name: name.to_string(),
            kind: BlockKind::from_tag(kind),
            content: content.to_string(),
        }
    }

    #[test]
    fn later_insert_replaces_earlier_block() {
        let mut table = BlockTable::new();
        assert!(table.insert(block("nav", "html", "<nav></nav>")).is_none());
        let previous = table.insert(block("nav", "css", "nav {}"));
        assert_eq!(previous.map(|b| b.kind), Some(BlockKind::Html));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("nav").map(|b| b.content.as_str()), Some("nav {}"));
    }

    #[test]
    fn unknown_tags_survive_round_trip() {
        let kind = BlockKind::from_tag("rb");
        assert_eq!(kind, BlockKind::Unknown("rb".to_string()));
        assert_eq!(kind.to_string(), "rb");
        assert_eq!(BlockKind::from_tag("py").tag(), "py");
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut table = BlockTable::new();
        table.insert(block("Main", "html", ""));
        assert!(table.entry_point().is_none());
    }
}
