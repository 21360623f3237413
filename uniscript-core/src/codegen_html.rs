//! HTML backend: turns one block into the markup that represents it in
//! the final document.

use crate::block::{Block, BlockKind};
use crate::error::CompileError;
use crate::parser::Placement;
use crate::rewrite::{self, Import};
use crate::transform::{Dialect, Transform};

/// Prepended to TypeScript blocks before they are transformed.
const TS_PRELUDE: &str = "const info = { lang: \"TS\" };\n";

/// Host objects every Python block can use without importing them.
const PYTHON_PRELUDE: &str = "from browser import document, window, alert\n";

/// Generated markup of one block, tagged with the section it goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub block: String,
    pub placement: Placement,
    pub html: String,
}

/// Generate the markup for `block`.
///
/// Blocks of an unknown type produce an empty string.
pub fn generate<T>(block: &Block, transform: &T) -> Result<String, CompileError>
where
    T: Transform + ?Sized,
{
    let html = match &block.kind {
        BlockKind::Html => rewrite::namespace_ids(&block.name, &block.content).into_owned(),
        BlockKind::Css => style(&block.content),
        BlockKind::Js => script(&javascript(&block.content)),
        BlockKind::Ts => {
            let code = format!("{TS_PRELUDE}{}", javascript(&block.content));
            script(&transform.transform(Dialect::TypeScript, &code)?)
        }
        BlockKind::Py => python(&block.content),
        BlockKind::Unknown(_) => String::new(),
    };
    Ok(html)
}

fn style(content: &str) -> String {
    let mut css = rewrite::strip_imports(content).into_owned();
    for import in rewrite::imports(content) {
        css = rewrite::qualify_selectors(&css, &import);
    }
    format!("<style>\n{css}\n</style>\n")
}

fn javascript(content: &str) -> String {
    let code = rewrite::strip_continuation(content);
    rewrite::replace_imports(code, |import: &Import<'_>| {
        format!(
            "var {} = document.getElementById(\"{}\")",
            import.id,
            import.qualified_id()
        )
    })
    .into_owned()
}

fn script(code: &str) -> String {
    format!("<script>\n{code}\n</script>\n")
}

fn python(content: &str) -> String {
    let code = rewrite::strip_continuation(content);
    let code = rewrite::replace_imports(code, |import: &Import<'_>| {
        format!("{} = document[\"{}\"]", import.id, import.qualified_id())
    });
    format!("<script type=\"text/python\">\n{PYTHON_PRELUDE}{code}\n</script>\n")
}
