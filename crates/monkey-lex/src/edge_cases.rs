//! Edge case tests for monkey-lex

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token};

    fn lex_all(source: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn test_edge_whitespace_only_source() {
        assert!(lex_all(" \t\r\n  \n").is_empty());
    }

    #[test]
    fn test_edge_single_char_ident() {
        assert_eq!(lex_all("x"), vec![Token::Ident("x")]);
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10000);
        let source = format!("let {} = 1;", name);
        let tokens = lex_all(&source);
        assert!(tokens.contains(&Token::Ident(&name)));
    }

    #[test]
    fn test_edge_long_integer_is_single_token() {
        // Longer than any i64; the lexer does not care, the parser does.
        let digits = "9".repeat(100);
        assert_eq!(lex_all(&digits), vec![Token::Int(digits.as_str())]);
    }

    #[test]
    fn test_edge_keyword_prefix_is_ident() {
        assert_eq!(
            lex_all("letter iffy fnord"),
            vec![
                Token::Ident("letter"),
                Token::Ident("iffy"),
                Token::Ident("fnord"),
            ]
        );
    }

    #[test]
    fn test_edge_bang_at_eof() {
        assert_eq!(lex_all("!"), vec![Token::Bang]);
    }

    #[test]
    fn test_edge_assign_at_eof() {
        assert_eq!(lex_all("="), vec![Token::Assign]);
    }

    #[test]
    fn test_edge_non_ascii_is_illegal() {
        assert_eq!(lex_all("λ"), vec![Token::Illegal('λ')]);
    }

    #[test]
    fn test_edge_illegal_does_not_stall_stream() {
        assert_eq!(
            lex_all("1 @ 2"),
            vec![Token::Int("1"), Token::Illegal('@'), Token::Int("2")]
        );
    }

    #[test]
    fn test_edge_adjacent_ident_and_digits() {
        // Digits are excluded from the identifier grammar.
        assert_eq!(
            lex_all("abc123def"),
            vec![Token::Ident("abc"), Token::Int("123"), Token::Ident("def")]
        );
    }
}
