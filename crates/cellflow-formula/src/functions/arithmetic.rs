//! Default arithmetic functions
//!
//! Array arguments (expanded ranges) are flattened. Only numbers take part in
//! the arithmetic; strings and empty cells are dropped. The first error
//! argument is returned unchanged.

use crate::error::FormulaError;
use crate::evaluator::Value;

/// Numeric arguments in order, or the first error encountered
fn numbers(args: &[Value]) -> Result<Vec<f64>, Value> {
    let mut out = Vec::with_capacity(args.len());
    collect_numbers(args, &mut out)?;
    Ok(out)
}

fn collect_numbers(args: &[Value], out: &mut Vec<f64>) -> Result<(), Value> {
    for arg in args {
        match arg {
            Value::Number(n) => out.push(*n),
            Value::Error { .. } => return Err(arg.clone()),
            Value::Array(rows) => {
                for row in rows {
                    collect_numbers(row, out)?;
                }
            }
            Value::String(_) | Value::Empty => {}
        }
    }
    Ok(())
}

/// ADD: sum of all numbers, 0 when there are none
pub fn fn_add(args: &[Value]) -> Value {
    match numbers(args) {
        Ok(nums) => Value::Number(nums.iter().sum()),
        Err(e) => e,
    }
}

/// MINUS: first number minus each following number
pub fn fn_minus(args: &[Value]) -> Value {
    let nums = match numbers(args) {
        Ok(nums) => nums,
        Err(e) => return e,
    };

    match nums.split_first() {
        Some((first, rest)) => Value::Number(rest.iter().fold(*first, |acc, n| acc - n)),
        None => FormulaError::MissingArguments { function: "MINUS" }.into(),
    }
}

/// TIMES: product of all numbers, 1 when there are none
pub fn fn_times(args: &[Value]) -> Value {
    match numbers(args) {
        Ok(nums) => Value::Number(nums.iter().product()),
        Err(e) => e,
    }
}

/// DIVIDE: first number divided by each following number
pub fn fn_divide(args: &[Value]) -> Value {
    let nums = match numbers(args) {
        Ok(nums) => nums,
        Err(e) => return e,
    };

    let (first, rest) = match nums.split_first() {
        Some(split) => split,
        None => return FormulaError::MissingArguments { function: "DIVIDE" }.into(),
    };

    let mut result = *first;
    for divisor in rest {
        if *divisor == 0.0 {
            return FormulaError::DivisionByZero.into();
        }
        result /= divisor;
    }
    Value::Number(result)
}
