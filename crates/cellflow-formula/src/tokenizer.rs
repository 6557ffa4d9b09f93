//! Formula tokenizer
//!
//! Splits formula text into parentheses, quoted strings and bare value
//! tokens. Runs of whitespace separate tokens and are never emitted.

use crate::error::{FormulaError, FormulaResult};
use lazy_regex::regex_replace_all;

/// Lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Content between a pair of `"`, delimiters stripped
    Quoted(String),
    /// Maximal run of characters without whitespace, parentheses or quotes
    Value(String),
}

/// Split formula text into tokens
///
/// # Example
/// ```rust
/// use cellflow_formula::{tokenize, Token};
///
/// let tokens = tokenize("(ADD A1 \"x\")").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::OpenParen,
///         Token::Value("ADD".into()),
///         Token::Value("A1".into()),
///         Token::Quoted("x".into()),
///         Token::CloseParen,
///     ]
/// );
/// ```
pub fn tokenize(raw: &str) -> FormulaResult<Vec<Token>> {
    let input = regex_replace_all!(r"[ \t\n\r]+", raw, " ");

    let mut tokens = Vec::new();
    let mut rest: &str = &input;

    while let Some(c) = rest.chars().next() {
        match c {
            ' ' => rest = &rest[1..],
            '(' => {
                tokens.push(Token::OpenParen);
                rest = &rest[1..];
            }
            ')' => {
                tokens.push(Token::CloseParen);
                rest = &rest[1..];
            }
            '"' => {
                let body = &rest[1..];
                let end = body.find('"').ok_or(FormulaError::UnterminatedString)?;
                tokens.push(Token::Quoted(body[..end].to_string()));
                rest = &body[end + 1..];
            }
            _ => {
                let end = rest
                    .find(|c: char| matches!(c, ' ' | '(' | ')' | '"'))
                    .unwrap_or(rest.len());
                tokens.push(Token::Value(rest[..end].to_string()));
                rest = &rest[end..];
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn value(s: &str) -> Token {
        Token::Value(s.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize(" \t\r\n ").unwrap(), vec![]);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(tokenize("123").unwrap(), vec![value("123")]);
        assert_eq!(tokenize("  A1  ").unwrap(), vec![value("A1")]);
    }

    #[test]
    fn test_whitespace_runs_separate_values() {
        assert_eq!(
            tokenize("1\t\t2\n3\r\n 4").unwrap(),
            vec![value("1"), value("2"), value("3"), value("4")]
        );
    }

    #[test]
    fn test_parens_split_values() {
        assert_eq!(
            tokenize("(FUN(FUN))").unwrap(),
            vec![
                Token::OpenParen,
                value("FUN"),
                Token::OpenParen,
                value("FUN"),
                Token::CloseParen,
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_quoted_string_kept_verbatim() {
        assert_eq!(
            tokenize("\"hello  (world)\"").unwrap(),
            vec![Token::Quoted("hello (world)".into())]
        );
        assert_eq!(tokenize("\"\"").unwrap(), vec![Token::Quoted(String::new())]);
    }

    #[test]
    fn test_quote_ends_value() {
        assert_eq!(
            tokenize("ab\"cd\"ef").unwrap(),
            vec![value("ab"), Token::Quoted("cd".into()), value("ef")]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(tokenize("\"abc"), Err(FormulaError::UnterminatedString));
    }

    #[test]
    fn test_non_ascii_values() {
        assert_eq!(
            tokenize("(ÄDD é)").unwrap(),
            vec![
                Token::OpenParen,
                value("ÄDD"),
                value("é"),
                Token::CloseParen
            ]
        );
    }
}
