//! pyxml Lexer - Python tokenization using logos
//!
//! Produces the same token stream as CPython's `tokenize` module, minus
//! the leading ENCODING token:
//! - line breaks are NEWLINE at the end of a logical line and NL
//!   everywhere else (blank lines, comment-only lines, inside brackets)
//! - indentation changes become INDENT/DEDENT
//! - every token carries its byte span in the shared source text

mod error;
mod layout;
mod token;

pub use error::*;
pub use token::*;

/// Tokenize a source string into a vector of tokens ending in ENDMARKER
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    layout::Layout::new(source).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyxml_ast::Position;

    fn exact(source: &str) -> Vec<ExactKind> {
        tokenize(source).unwrap().iter().map(|t| t.exact).collect()
    }

    #[test]
    fn test_basic_tokens() {
        use ExactKind::*;
        assert_eq!(
            exact("x = 1 + 2\n"),
            vec![Name, Equal, Number, Plus, Number, Newline, EndMarker]
        );
    }

    #[test]
    fn test_operators_take_longest_match() {
        use ExactKind::*;
        assert_eq!(
            exact("a **= b // c\n"),
            vec![Name, DoubleStarEqual, Name, DoubleSlash, Name, Newline, EndMarker]
        );
        assert_eq!(
            exact("f(x) -> ...\n"),
            vec![Name, Lpar, Name, Rpar, Rarrow, Ellipsis, Newline, EndMarker]
        );
    }

    #[test]
    fn test_positions_and_spans() {
        let tokens = tokenize("x = 1\ny  =  2\n").unwrap();
        let y = &tokens[4];
        assert_eq!(y.text, "y");
        assert_eq!(y.start, Position::new(2, 0));
        assert_eq!(y.end, Position::new(2, 1));
        assert_eq!(y.span, 6..7);
        assert_eq!(&*y.source, "x = 1\ny  =  2\n");

        let newline = &tokens[3];
        assert_eq!(newline.exact, ExactKind::Newline);
        assert_eq!(newline.start, Position::new(1, 5));
        assert_eq!(newline.end, Position::new(1, 6));
    }

    #[test]
    fn test_blank_and_comment_lines_are_nl() {
        use ExactKind::*;
        assert_eq!(
            exact("x\n\n# c\ny\n"),
            vec![Name, Newline, Nl, Comment, Nl, Name, Newline, EndMarker]
        );
    }

    #[test]
    fn test_line_breaks_inside_brackets_are_nl() {
        use ExactKind::*;
        assert_eq!(
            exact("f(a,\n  b)\n"),
            vec![Name, Lpar, Name, Comma, Nl, Name, Rpar, Newline, EndMarker]
        );
    }

    #[test]
    fn test_indent_and_dedent() {
        use ExactKind::*;
        let source = "def f():\n    pass\nx\n";
        assert_eq!(
            exact(source),
            vec![
                Name, Name, Lpar, Rpar, Colon, Newline, Indent, Name, Newline, Dedent, Name,
                Newline, EndMarker
            ]
        );
        let tokens = tokenize(source).unwrap();
        let indent = &tokens[6];
        assert_eq!(indent.text, "    ");
        assert_eq!(indent.start, Position::new(2, 0));
        assert_eq!(indent.end, Position::new(2, 4));
    }

    #[test]
    fn test_dedents_at_end_of_file() {
        use ExactKind::*;
        assert_eq!(
            exact("if a:\n    if b:\n        pass\n"),
            vec![
                Name, Name, Colon, Newline, Indent, Name, Name, Colon, Newline, Indent, Name,
                Newline, Dedent, Dedent, EndMarker
            ]
        );
    }

    #[test]
    fn test_inconsistent_dedent() {
        let result = tokenize("if a:\n    x\n  y\n");
        assert!(matches!(result, Err(LexError::InconsistentDedent { .. })));
    }

    #[test]
    fn test_missing_final_newline() {
        let tokens = tokenize("x = 1").unwrap();
        let newline = &tokens[tokens.len() - 2];
        assert_eq!(newline.exact, ExactKind::Newline);
        assert_eq!(newline.text, "");
        assert_eq!(newline.start, Position::new(1, 5));
        let end = tokens.last().unwrap();
        assert_eq!(end.exact, ExactKind::EndMarker);
        assert_eq!(end.start, Position::new(1, 5));
    }

    #[test]
    fn test_endmarker_after_final_newline() {
        let tokens = tokenize("x\n").unwrap();
        let end = tokens.last().unwrap();
        assert_eq!(end.start, Position::new(2, 0));
        assert_eq!(end.span, 2..2);
    }

    #[test]
    fn test_strings() {
        let tokens = tokenize("s = rb'a\\'b' + \"\"\"x\n\"y\"\n\"\"\"\n").unwrap();
        assert_eq!(tokens[2].exact, ExactKind::String);
        assert_eq!(tokens[2].text, "rb'a\\'b'");
        let triple = &tokens[4];
        assert_eq!(triple.exact, ExactKind::String);
        assert_eq!(triple.text, "\"\"\"x\n\"y\"\n\"\"\"");
        assert_eq!(triple.start, Position::new(1, 15));
        assert_eq!(triple.end, Position::new(3, 3));
        assert_eq!(triple.span, 15..27);
        assert_eq!(&triple.source[triple.span.clone()], triple.text);
        assert_eq!(triple.text_since(Some(&tokens[3])), " ");
    }

    #[test]
    fn test_unterminated_string() {
        let result = tokenize("s = '''abc\n");
        assert!(matches!(result, Err(LexError::UnterminatedString { .. })));
        let result = tokenize("s = 'abc\n");
        assert!(matches!(result, Err(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn test_numbers() {
        for number in ["0", "42", "1_000", "0x_FF", "0o17", "0b1010", "3.14", "1.", ".5", "1e-3", "2j", "1.5E+10j"] {
            let tokens = tokenize(&format!("{}\n", number)).unwrap();
            assert_eq!(tokens[0].exact, ExactKind::Number, "{}", number);
            assert_eq!(tokens[0].text, number);
        }
    }

    #[test]
    fn test_backslash_continuation_is_not_a_token() {
        use ExactKind::*;
        assert_eq!(
            exact("x = 1 + \\\n    2\n"),
            vec![Name, Equal, Number, Plus, Number, Newline, EndMarker]
        );
    }

    #[test]
    fn test_unknown_character_is_error_token() {
        let tokens = tokenize("a $ b\n").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::ErrorToken);
        assert_eq!(tokens[1].text, "$");
    }

    #[test]
    fn test_display_matches_tokenize_layout() {
        let tokens = tokenize("x\n").unwrap();
        assert_eq!(
            tokens[0].to_string(),
            format!("{:<20}{:<15}{:?}", "1,0-1,1:", "NAME", "x")
        );
    }
}
