//! Builds the structured-markup parse tree buffer.
//!
//! `open`/`close` bracket a grammar non-terminal; `terminal` renders a single
//! consumed token. Indentation is two spaces per nesting level.

use crate::token::{Token, TokenKind, symbol_alias};

#[derive(Debug, Default)]
pub struct XmlEmitter {
    buffer: String,
    level: usize,
}

impl XmlEmitter {
    pub fn new() -> Self {
        XmlEmitter::default()
    }

    fn indent(&mut self) {
        for _ in 0..self.level {
            self.buffer.push_str("  ");
        }
    }

    pub fn open(&mut self, tag: &str) {
        self.indent();
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self.buffer.push_str(">\n");
        self.level += 1;
    }

    pub fn close(&mut self, tag: &str) {
        self.level -= 1;
        self.indent();
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push_str(">\n");
    }

    pub fn terminal(&mut self, token: &Token) {
        self.indent();
        let tag = token.kind.tag();
        let rendered = render_value(token);
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self.buffer.push_str("> ");
        self.buffer.push_str(&rendered);
        self.buffer.push_str(" </");
        self.buffer.push_str(tag);
        self.buffer.push_str(">\n");
    }

    pub fn into_buffer(self) -> String {
        self.buffer
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// Renders a token's value for the tree/tokens output, substituting symbol
/// aliases. `StringConstant` values are already quote-free by construction.
fn render_value(token: &Token) -> String {
    if token.kind == TokenKind::Symbol {
        if let Some(c) = token.value.chars().next() {
            if let Some(alias) = symbol_alias(c) {
                return alias.to_string();
            }
        }
    }
    token.value.clone()
}

/// Wraps a sequence of terminal lines inside a single `<tokens>` section,
/// for the standalone tokens file output.
pub fn render_tokens_file(tokens: &[Token]) -> String {
    let mut emitter = XmlEmitter::new();
    emitter.open("tokens");
    for token in tokens {
        emitter.terminal(token);
    }
    emitter.close("tokens");
    emitter.into_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_open_close_indent_by_two_spaces_per_level() {
        let mut emitter = XmlEmitter::new();
        emitter.open("class");
        emitter.open("classVarDec");
        emitter.close("classVarDec");
        emitter.close("class");
        assert_eq!(
            emitter.into_buffer(),
            "<class>\n  <classVarDec>\n  </classVarDec>\n</class>\n"
        );
    }

    #[test]
    fn test_terminal_escapes_symbol_aliases() {
        let mut emitter = XmlEmitter::new();
        emitter.terminal(&Token::new(TokenKind::Symbol, "<"));
        assert_eq!(emitter.into_buffer(), "<symbol> &lt; </symbol>\n");
    }

    #[test]
    fn test_terminal_leaves_string_constant_unquoted() {
        let mut emitter = XmlEmitter::new();
        emitter.terminal(&Token::new(TokenKind::StringConstant, "hi"));
        assert_eq!(
            emitter.into_buffer(),
            "<stringConstant> hi </stringConstant>\n"
        );
    }

    #[test]
    fn test_tokens_file_is_wrapped_in_a_single_section() {
        let tokens = vec![
            Token::new(TokenKind::Keyword, "class"),
            Token::new(TokenKind::Identifier, "Main"),
        ];
        let rendered = render_tokens_file(&tokens);
        assert_eq!(
            rendered,
            "<tokens>\n  <keyword> class </keyword>\n  <identifier> Main </identifier>\n</tokens>\n"
        );
    }
}
