//! Strips comments from raw Jack source before tokenizing.
//!
//! Three comment forms are recognized: `//` line comments, `/** ... */` doc
//! comments and `/* ... */` block comments. A comment marker that appears
//! inside a string literal is left untouched.

/// Remove every comment region from `source`, preserving content inside
/// string literals and keeping line-based structure intact.
pub fn strip_comments(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            out.push(c);
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
            i += 1;
            continue;
        }

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            if i < chars.len() {
                out.push('\n');
                i += 1;
            }
            continue;
        }

        if c == '/' && chars.get(i + 1) == Some(&'*') {
            i += 2;
            let mut closed = false;
            while i + 1 < chars.len() {
                if chars[i] == '*' && chars[i + 1] == '/' {
                    i += 2;
                    closed = true;
                    break;
                }
                i += 1;
            }
            if !closed {
                i = chars.len();
            }
            if i < chars.len() && chars[i] == '\n' {
                out.push('\n');
                i += 1;
            }
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_line_comment() {
        assert_eq!(strip_comments("let x = 1; // comment\nlet y = 2;"), "let x = 1; \nlet y = 2;");
    }

    #[test]
    fn test_strips_block_comment() {
        assert_eq!(strip_comments("let x /* inline */ = 1;"), "let x  = 1;");
    }

    #[test]
    fn test_strips_doc_comment() {
        assert_eq!(strip_comments("/** doc\n * more\n */\nclass A {}"), "\nclass A {}");
    }

    #[test]
    fn test_preserves_comment_markers_in_strings() {
        assert_eq!(
            strip_comments("let s = \"// not a comment\";"),
            "let s = \"// not a comment\";"
        );
        assert_eq!(
            strip_comments("let s = \"/* not either */\";"),
            "let s = \"/* not either */\";"
        );
    }

    #[test]
    fn test_idempotent_on_already_preprocessed_source() {
        let once = strip_comments("class A { // hi\n field int x; /* y */ }");
        let twice = strip_comments(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unterminated_block_comment_consumes_to_end() {
        assert_eq!(strip_comments("let x = 1; /* unterminated"), "let x = 1; ");
    }
}
