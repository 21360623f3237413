//! Lexer for the directive language of the `main` block.
//!
//! The lexer never fails. Characters that do not start a known token are
//! returned as `Other` tokens so the parser can step over them, and a
//! string literal left open at the end of its line degrades to an `Other`
//! token for its opening quote.

use crate::span::Span;

/// Kind of a token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Special
    Eof,
    Other,

    // Words and literals
    Ident,
    StringLiteral,

    // Punctuation
    Equal,  // =
    LBrace, // {
    RBrace, // }
    Colon,  // :
    Semi,   // ;

    // Keywords
    Config,
    Declare,
    Use,
    On,
}

impl TokenKind {
    /// Keywords are still words, and may appear wherever a name is expected.
    pub fn is_word(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Config
                | TokenKind::Declare
                | TokenKind::Use
                | TokenKind::On
        )
    }
}

/// A single token.
///
/// `span` covers the whole token in the source. `text` covers the part
/// the parser cares about: for string literals that excludes the quotes,
/// for everything else it equals `span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.text.slice(source)
    }
}

/// On-demand lexer.
///
/// The parser pulls tokens one at a time and may move the lexer to an
/// arbitrary byte offset, which is how raw-text constructs such as the
/// right-hand side of `declare` are skipped without being tokenized.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    index: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            index: 0,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn position(&self) -> usize {
        self.index
    }

    /// Resume lexing at `position`. Offsets past the end are clamped.
    pub fn seek(&mut self, position: usize) {
        self.index = position.min(self.bytes.len());
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.index;
        let Some(ch) = self.peek_byte() else {
            let span = Span::new(start, start);
            return Token {
                kind: TokenKind::Eof,
                span,
                text: span,
            };
        };

        match ch {
            b'=' => self.punct(TokenKind::Equal, start),
            b'{' => self.punct(TokenKind::LBrace, start),
            b'}' => self.punct(TokenKind::RBrace, start),
            b':' => self.punct(TokenKind::Colon, start),
            b';' => self.punct(TokenKind::Semi, start),
            b'"' => self.lex_string(start),
            _ if is_word_byte(ch) => self.lex_word(start),
            _ => {
                self.consume_char();
                let span = Span::new(start, self.index);
                Token {
                    kind: TokenKind::Other,
                    span,
                    text: span,
                }
            }
        }
    }

    fn punct(&mut self, kind: TokenKind, start: usize) -> Token {
        self.index += 1;
        let span = Span::new(start, self.index);
        Token {
            kind,
            span,
            text: span,
        }
    }

    fn lex_string(&mut self, start: usize) -> Token {
        let content_start = start + 1;
        // A string ends on its line. A stray quote in free text must not
        // pair with the opening quote of a later directive.
        let close = self.source[content_start..]
            .find(['"', '\n'])
            .filter(|&len| self.bytes[content_start + len] == b'"');
        match close {
            Some(len) => {
                let content_end = content_start + len;
                self.index = content_end + 1;
                Token {
                    kind: TokenKind::StringLiteral,
                    span: Span::new(start, self.index),
                    text: Span::new(content_start, content_end),
                }
            }
            None => {
                self.index = content_start;
                let span = Span::new(start, self.index);
                Token {
                    kind: TokenKind::Other,
                    span,
                    text: span,
                }
            }
        }
    }

    fn lex_word(&mut self, start: usize) -> Token {
        while self.peek_byte().is_some_and(is_word_byte) {
            self.index += 1;
        }
        let span = Span::new(start, self.index);
        let kind = match span.slice(self.source) {
            "config" => TokenKind::Config,
            "declare" => TokenKind::Declare,
            "use" => TokenKind::Use,
            "on" => TokenKind::On,
            _ => TokenKind::Ident,
        };
        Token {
            kind,
            span,
            text: span,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.source[self.index..].chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            self.index += ch.len_utf8();
        }
    }

    fn consume_char(&mut self) {
        if let Some(ch) = self.source[self.index..].chars().next() {
            self.index += ch.len_utf8();
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }
}

fn is_word_byte(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}
