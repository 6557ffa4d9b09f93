//! Formula parser
//!
//! Formulas are either a single value (`12`, `"text"`, `A1`, `A1:B3`) or a
//! parenthesised prefix call `(NAME arg1 arg2 ...)` whose arguments are
//! themselves formulas. Arguments are found by tracking parenthesis depth
//! over the flat token sequence.

use crate::ast::Equation;
use crate::error::{FormulaError, FormulaResult};
use crate::tokenizer::{tokenize, Token};
use cellflow_core::{CellAddress, CellRange};
use lazy_regex::{regex_captures, regex_is_match};

/// Deepest function-call nesting accepted
pub const MAX_NESTING: usize = 256;

/// Parse formula text into an AST
///
/// Returns `None` for text without any tokens (an empty cell). Failures never
/// escape: they come back as [`Equation::Error`] carrying the message.
///
/// # Example
/// ```rust
/// use cellflow_formula::{parse, Equation};
///
/// assert_eq!(parse(""), None);
/// assert_eq!(parse("42"), Some(Equation::number(42.0)));
///
/// let call = parse("(add 1 (times 2 A1))").unwrap();
/// assert_eq!(call.to_string(), "(ADD 1 (TIMES 2 A1))");
///
/// assert_eq!(parse("hello"), Some(Equation::error("Unknown value: hello")));
/// ```
pub fn parse(raw: &str) -> Option<Equation> {
    match try_parse(raw) {
        Ok(equation) => equation,
        Err(e) => Some(Equation::error(e.to_string())),
    }
}

/// Parse formula text, returning failures as `Err`
pub fn try_parse(raw: &str) -> FormulaResult<Option<Equation>> {
    let tokens = tokenize(raw)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    generate_ast(&tokens, 0).map(Some)
}

fn generate_ast(tokens: &[Token], depth: usize) -> FormulaResult<Equation> {
    if depth > MAX_NESTING {
        return Err(FormulaError::TooDeep(MAX_NESTING));
    }

    match tokens.first() {
        None => Err(FormulaError::EmptyExpression),
        Some(Token::CloseParen) => Err(FormulaError::UnexpectedCloseParen),
        Some(Token::Value(text)) => {
            if tokens.len() > 1 {
                return Err(FormulaError::TrailingTokens);
            }
            parse_atom(text)
        }
        Some(Token::Quoted(text)) => {
            if tokens.len() > 1 {
                return Err(FormulaError::TrailingTokens);
            }
            Ok(Equation::string(text.as_str()))
        }
        Some(Token::OpenParen) => parse_function_call(tokens, depth),
    }
}

fn parse_function_call(tokens: &[Token], depth: usize) -> FormulaResult<Equation> {
    let name = match tokens.get(1) {
        Some(Token::Value(name)) => name,
        _ => return Err(FormulaError::MissingFunctionName),
    };

    let mut arguments = Vec::new();
    let mut open_parens = 1usize;
    let mut start = 2;

    for (index, token) in tokens.iter().enumerate().skip(2) {
        match token {
            Token::OpenParen => open_parens += 1,
            Token::CloseParen => open_parens -= 1,
            _ => {}
        }

        if open_parens == 1 {
            arguments.push(generate_ast(&tokens[start..=index], depth + 1)?);
            start = index + 1;
        } else if open_parens == 0 {
            if index + 1 != tokens.len() {
                return Err(FormulaError::TrailingAfterCall);
            }
            return Ok(Equation::function(name, arguments));
        }
    }

    Err(FormulaError::UnmatchedParen)
}

/// Resolve a bare value token: number, range, then cell reference
fn parse_atom(text: &str) -> FormulaResult<Equation> {
    if regex_is_match!(r"^[0-9]+$", text) {
        let value = text
            .parse::<f64>()
            .map_err(|_| FormulaError::UnknownValue(text.to_string()))?;
        return Ok(Equation::number(value));
    }

    if let Some((_, start, end)) = regex_captures!(r"^([A-Z]+[0-9]+):([A-Z]+[0-9]+)$", text) {
        let range = CellRange::new(CellAddress::parse(start)?, CellAddress::parse(end)?)?;
        return Ok(Equation::range(range));
    }

    if regex_is_match!(r"^[A-Z]+[0-9]+$", text) {
        return Ok(Equation::reference(CellAddress::parse(text)?));
    }

    Err(FormulaError::UnknownValue(text.to_string()))
}
