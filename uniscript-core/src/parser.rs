//! Recursive-descent parser for the directive language of `main`.
//!
//! Recognized statements:
//!
//! ```text
//! config <key> = "<value>"
//! config execution = { start: "a" then: "b" then: "c" end: "d" }
//! declare <name> = <expression to end of line>
//! use "<block>" on "<location>"
//! ```
//!
//! Statements may appear anywhere in the block. Parsing is best-effort:
//! a statement that does not parse is dropped and scanning resumes at the
//! token after its keyword. There are no diagnostics.

use std::collections::HashMap;

use crate::lexer::{Lexer, Token, TokenKind};

/// Output section a generated fragment is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    Head,
    #[default]
    Body,
}

impl Placement {
    /// Only `head` selects the head; every other location is the body.
    pub fn from_location(location: &str) -> Self {
        if location == "head" {
            Placement::Head
        } else {
            Placement::Body
        }
    }
}

/// A `declare <name> = <expr>` statement. The expression is raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub expr: String,
}

/// Everything the directive language says about a compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    config: HashMap<String, String>,
    pub declarations: Vec<Declaration>,
    placements: HashMap<String, Placement>,
    pub sequence: Vec<String>,
}

impl Directives {
    /// Value of `config <key> = "..."`, or the empty string.
    pub fn meta(&self, key: &str) -> &str {
        self.config.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn target(&self) -> &str {
        self.meta("target")
    }

    /// The declared title, if any.
    pub fn title(&self) -> Option<&str> {
        Some(self.meta("title")).filter(|title| !title.is_empty())
    }

    pub fn placement(&self, block: &str) -> Placement {
        self.placements.get(block).copied().unwrap_or_default()
    }
}

/// Parse the content of the `main` block.
pub fn parse_directives(source: &str) -> Directives {
    let mut parser = Parser {
        lexer: Lexer::new(source),
        directives: Directives::default(),
        has_execution: false,
    };
    parser.run();
    parser.directives
}

/// The ordered block names of an `execution` body.
///
/// The order is fixed: the first `start`, every `then` in source order,
/// then the first `end`.
#[derive(Debug, Default)]
struct Execution {
    start: Option<String>,
    then: Vec<String>,
    end: Option<String>,
}

impl Execution {
    fn into_sequence(self) -> Vec<String> {
        self.start
            .into_iter()
            .chain(self.then)
            .chain(self.end)
            .collect()
    }
}

struct Parser<'src> {
    lexer: Lexer<'src>,
    directives: Directives,
    has_execution: bool,
}

impl<'src> Parser<'src> {
    fn run(&mut self) {
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Config => self.attempt(Self::config),
                TokenKind::Declare => self.attempt(Self::declare),
                TokenKind::Use => self.attempt(Self::use_directive),
                _ => {}
            }
        }
    }

    /// Run a statement parser, rewinding to just after its keyword when
    /// it does not match.
    fn attempt(&mut self, statement: fn(&mut Self) -> Option<()>) {
        let checkpoint = self.lexer.position();
        if statement(self).is_none() {
            self.lexer.seek(checkpoint);
        }
    }

    fn config(&mut self) -> Option<()> {
        let key = self.word()?;
        self.expect(TokenKind::Equal)?;

        let value = self.lexer.next_token();
        match value.kind {
            TokenKind::LBrace if key == "execution" => {
                let execution = self.execution_body()?;
                if !self.has_execution {
                    self.has_execution = true;
                    self.directives.sequence = execution.into_sequence();
                }
                Some(())
            }
            TokenKind::StringLiteral => {
                let value = self.non_empty(value)?;
                self.directives
                    .config
                    .entry(key.to_string())
                    .or_insert_with(|| value.to_string());
                Some(())
            }
            _ => None,
        }
    }

    /// Entries up to the first closing brace. Tokens that do not form an
    /// entry are skipped.
    fn execution_body(&mut self) -> Option<Execution> {
        let mut execution = Execution::default();
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::RBrace => return Some(execution),
                TokenKind::Eof => return None,
                TokenKind::Ident => {
                    let checkpoint = self.lexer.position();
                    let Some(target) = self.entry_target() else {
                        self.lexer.seek(checkpoint);
                        continue;
                    };
                    match self.text(token) {
                        "start" if execution.start.is_none() => execution.start = Some(target),
                        "then" => execution.then.push(target),
                        "end" if execution.end.is_none() => execution.end = Some(target),
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }

    /// `: "<name>"` following an entry keyword.
    fn entry_target(&mut self) -> Option<String> {
        self.expect(TokenKind::Colon)?;
        let name = self.expect(TokenKind::StringLiteral)?;
        self.non_empty(name).map(str::to_string)
    }

    fn declare(&mut self) -> Option<()> {
        let name = self.word()?;
        let equal = self.expect(TokenKind::Equal)?;

        let source = self.lexer.source();
        let rest = &source[equal.span.end..];
        let expr_start = equal.span.end + (rest.len() - rest.trim_start().len());
        let line_end = source[expr_start..]
            .find('\n')
            .map_or(source.len(), |offset| expr_start + offset);

        self.directives.declarations.push(Declaration {
            name: name.to_string(),
            expr: source[expr_start..line_end].trim().to_string(),
        });
        self.lexer.seek(line_end);
        Some(())
    }

    fn use_directive(&mut self) -> Option<()> {
        let block = self.expect(TokenKind::StringLiteral)?;
        let block = self.non_empty(block)?;
        self.expect(TokenKind::On)?;
        let location = self.expect(TokenKind::StringLiteral)?;
        let location = self.non_empty(location)?;
        self.directives
            .placements
            .insert(block.to_string(), Placement::from_location(location));
        Some(())
    }

    fn word(&mut self) -> Option<&'src str> {
        let token = self.lexer.next_token();
        token.kind.is_word().then(|| self.text(token))
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        let token = self.lexer.next_token();
        (token.kind == kind).then_some(token)
    }

    fn non_empty(&self, token: Token) -> Option<&'src str> {
        Some(self.text(token)).filter(|text| !text.is_empty())
    }

    fn text(&self, token: Token) -> &'src str {
        token.text(self.lexer.source())
    }
}
