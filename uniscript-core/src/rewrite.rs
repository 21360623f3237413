//! Text rewrites applied to block content.
//!
//! Every element id defined by an HTML block is prefixed with the block's
//! name. Other blocks reach those elements through
//! `import "<id>" from "<block>";` directives, which are rewritten here
//! into the matching selector or DOM lookup.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static ID_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"id\s*=\s*(?:"([^'"]+)"|'([^'"]+)')"#).expect("valid id attribute pattern")
});

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+"([^"]+)"\s+from\s+"([^"]+)";?"#).expect("valid import pattern")
});

/// An `import "<id>" from "<block>";` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import<'a> {
    pub id: &'a str,
    pub from: &'a str,
}

impl Import<'_> {
    /// The id the element carries after its block was namespaced.
    pub fn qualified_id(&self) -> String {
        namespaced(self.from, self.id)
    }
}

pub fn namespaced(block: &str, id: &str) -> String {
    format!("{block}_{id}")
}

/// Prefix every `id="x"` / `id='x'` attribute with `block`.
///
/// The rewritten attribute always uses double quotes.
pub fn namespace_ids<'a>(block: &str, html: &'a str) -> Cow<'a, str> {
    ID_ATTRIBUTE.replace_all(html, |caps: &Captures| {
        let id = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        format!(r#"id="{}""#, namespaced(block, id))
    })
}

/// All import directives in `source`, in order.
pub fn imports(source: &str) -> Vec<Import<'_>> {
    IMPORT
        .captures_iter(source)
        .filter_map(|caps| {
            Some(Import {
                id: caps.get(1)?.as_str(),
                from: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Replace every import directive with `render(import)`.
pub fn replace_imports<'a>(source: &'a str, render: impl Fn(&Import<'_>) -> String) -> Cow<'a, str> {
    IMPORT.replace_all(source, |caps: &Captures| {
        let import = Import {
            id: caps.get(1).map_or("", |m| m.as_str()),
            from: caps.get(2).map_or("", |m| m.as_str()),
        };
        render(&import)
    })
}

/// Remove every import directive.
pub fn strip_imports(source: &str) -> Cow<'_, str> {
    IMPORT.replace_all(source, "")
}

/// Point `#<id>` selectors at the namespaced element of the imported block.
///
/// Only whole ids are rewritten: `#btn` matches in `#btn:hover` and
/// `#btn-icon` but not in `#button`.
pub fn qualify_selectors(css: &str, import: &Import<'_>) -> String {
    // ASCII word boundary: `#btn` still matches in `#btné`.
    let pattern = format!(r"#{}(?-u:\b)", regex::escape(import.id));
    match Regex::new(&pattern) {
        Ok(selector) => {
            let replacement = format!("#{}", import.qualified_id());
            selector
                .replace_all(css, regex::NoExpand(&replacement))
                .into_owned()
        }
        Err(_) => css.to_string(),
    }
}

/// Trim the content and drop the legacy leading `>` continuation markers.
pub fn strip_continuation(content: &str) -> &str {
    let code = content.trim();
    if code.starts_with('>') {
        code.trim_start_matches('>').trim()
    } else {
        code
    }
}
