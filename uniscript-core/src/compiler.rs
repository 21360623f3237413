use crate::assemble::Document;
use crate::block::{BlockKind, BlockTable};
use crate::codegen_html::{self, Fragment};
use crate::error::CompileError;
use crate::extract;
use crate::options::CompileOptions;
use crate::parser::parse_directives;
use crate::transform::{Passthrough, Transform};

/// Compiles Uniscript sources into standalone HTML documents.
///
/// The block table of the last compile is kept for inspection and is
/// cleared at the start of every call, so one instance can compile any
/// number of sources in turn.
#[derive(Debug)]
pub struct UniscriptCompiler<T = Passthrough> {
    blocks: BlockTable,
    options: CompileOptions,
    transform: T,
}

impl UniscriptCompiler {
    pub fn new() -> Self {
        UniscriptCompiler::with_transform(Passthrough)
    }
}

impl Default for UniscriptCompiler {
    fn default() -> Self {
        UniscriptCompiler::new()
    }
}

impl<T: Transform> UniscriptCompiler<T> {
    pub fn with_transform(transform: T) -> Self {
        UniscriptCompiler {
            blocks: BlockTable::new(),
            options: CompileOptions::default(),
            transform,
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Blocks found by the most recent `compile`.
    pub fn blocks(&self) -> &BlockTable {
        &self.blocks
    }

    pub fn compile(&mut self, source: &str) -> Result<String, CompileError> {
        self.blocks.clear();
        extract::extract_into(source, &mut self.blocks);

        let main = self
            .blocks
            .entry_point()
            .ok_or(CompileError::MissingEntryPoint)?;

        if main.kind == BlockKind::Html {
            return Ok(main.content.clone());
        }

        let directives = parse_directives(&main.content);
        let uses_python = directives
            .sequence
            .iter()
            .any(|name| self.blocks.get(name).is_some_and(|b| b.kind == BlockKind::Py));

        let title = directives.title().unwrap_or(&self.options.default_title);
        let mut document = Document::new(&self.options, title)
            .mobile(directives.target() == "mobile")
            .declarations(&directives.declarations)
            .python_runtime(uses_python);

        for name in &directives.sequence {
            let Some(block) = self.blocks.get(name) else {
                continue;
            };
            document.push(Fragment {
                block: name.clone(),
                placement: directives.placement(name),
                html: codegen_html::generate(block, &self.transform)?,
            });
        }

        Ok(document.render())
    }
}

/// Compile `source` with default options and no script transform.
pub fn compile(source: &str) -> Result<String, CompileError> {
    UniscriptCompiler::new().compile(source)
}
