//! Turns preprocessed Jack source into a finite, indexable token sequence.

use crate::token::{KEYWORDS, SYMBOLS, Token, TokenKind};

/// Tokenize already-preprocessed (comment-free) source.
pub fn tokenize(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if current.is_empty() {
            return;
        }
        tokens.push(classify(std::mem::take(current)));
    };

    while i < chars.len() {
        let c = chars[i];

        if c == '"' {
            flush(&mut current, &mut tokens);
            let mut literal = String::new();
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                literal.push(chars[i]);
                i += 1;
            }
            i += 1; // consume closing quote (or run off the end if malformed)
            tokens.push(Token::new(TokenKind::StringConstant, literal));
            continue;
        }

        if SYMBOLS.contains(&c) {
            flush(&mut current, &mut tokens);
            tokens.push(Token::new(TokenKind::Symbol, c.to_string()));
            i += 1;
            continue;
        }

        if c.is_whitespace() {
            flush(&mut current, &mut tokens);
            i += 1;
            continue;
        }

        current.push(c);
        i += 1;
    }
    flush(&mut current, &mut tokens);

    tokens
}

fn classify(raw: String) -> Token {
    if KEYWORDS.contains(&raw.as_str()) {
        Token::new(TokenKind::Keyword, raw)
    } else if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        Token::new(TokenKind::IntegerConstant, raw)
    } else {
        Token::new(TokenKind::Identifier, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind::*;

    fn kinds_and_values(tokens: &[Token]) -> Vec<(crate::token::TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.value.as_str())).collect()
    }

    #[test]
    fn test_tokenizes_minimal_class() {
        let tokens = tokenize("class Main { function void main() { return; } }");
        assert_eq!(
            kinds_and_values(&tokens),
            vec![
                (Keyword, "class"),
                (Identifier, "Main"),
                (Symbol, "{"),
                (Keyword, "function"),
                (Keyword, "void"),
                (Identifier, "main"),
                (Symbol, "("),
                (Symbol, ")"),
                (Symbol, "{"),
                (Keyword, "return"),
                (Symbol, ";"),
                (Symbol, "}"),
                (Symbol, "}"),
            ]
        );
    }

    #[test]
    fn test_tokenizes_integer_constant() {
        let tokens = tokenize("42");
        assert_eq!(tokens, vec![Token::new(IntegerConstant, "42")]);
    }

    #[test]
    fn test_string_constant_strips_quotes_and_keeps_symbols_verbatim() {
        let tokens = tokenize("\"a; b ( c\"");
        assert_eq!(tokens, vec![Token::new(StringConstant, "a; b ( c")]);
    }

    #[test]
    fn test_adjacent_symbols_are_separate_tokens() {
        let tokens = tokenize("a[i]=5;");
        assert_eq!(
            kinds_and_values(&tokens),
            vec![
                (Identifier, "a"),
                (Symbol, "["),
                (Identifier, "i"),
                (Symbol, "]"),
                (Symbol, "="),
                (IntegerConstant, "5"),
                (Symbol, ";"),
            ]
        );
    }

    #[test]
    fn test_whitespace_separates_identifiers() {
        let tokens = tokenize("let  x\t=\n1;");
        assert_eq!(
            kinds_and_values(&tokens),
            vec![
                (Keyword, "let"),
                (Identifier, "x"),
                (Symbol, "="),
                (IntegerConstant, "1"),
                (Symbol, ";"),
            ]
        );
    }
}
