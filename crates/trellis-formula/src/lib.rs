//! Column aggregate formulas for spreadsheet-style editing.
//!
//! This crate implements the small formula language the editor exposes over
//! single columns: `=SUM(Score)`, `=AVG(Price)` and friends. It operates on
//! plain cell strings and knows nothing about tables or schemas, so it stays
//! independent of the data core.
//!
//! Aggregation is forgiving the same way spreadsheets are: values are
//! trimmed, and empty or non-numeric cells are skipped rather than rejected.
//! Only a column with no numeric values at all is an error (except for
//! `COUNT`, which counts the non-empty cells and always succeeds).
//!
//! # Example
//!
//! ```
//! use trellis_formula::parse_formula;
//!
//! let formula = parse_formula("=AVG(Score)").unwrap();
//! assert_eq!(formula.column, "Score");
//! let result = formula.evaluate_on(&["10", "", "30", "oops"]).unwrap();
//! assert_eq!(result, 20.0);
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Formula errors.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Formula text does not have the `=FUNCTION(Column)` shape.
    #[error("invalid formula: {0}")]
    Parse(String),

    /// A well-formed formula naming an unsupported function.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// Evaluation input held no numeric values.
    #[error("no numeric values found in column")]
    NoNumericValues,
}

pub type Result<T> = std::result::Result<T, FormulaError>;

/// An aggregate function over one column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sum,
    Average,
    Min,
    Max,
    Count,
}

impl Function {
    /// Every supported function.
    pub const ALL: [Function; 5] = [
        Function::Sum,
        Function::Average,
        Function::Min,
        Function::Max,
        Function::Count,
    ];

    /// The name the function carries in formula text.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sum => "SUM",
            Function::Average => "AVG",
            Function::Min => "MIN",
            Function::Max => "MAX",
            Function::Count => "COUNT",
        }
    }

    fn from_name(name: &str) -> Option<Function> {
        Function::ALL
            .into_iter()
            .find(|function| function.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed formula: a function applied to one named column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub function: Function,
    pub column: String,
}

impl Formula {
    /// Evaluate this formula over the named column's cell values.
    pub fn evaluate_on<S: AsRef<str>>(&self, values: &[S]) -> Result<f64> {
        evaluate(self.function, values)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "={}({})", self.function, self.column)
    }
}

/// Evaluate one aggregate over raw cell values.
///
/// Values are trimmed; empty and non-numeric cells are skipped. `Count`
/// counts every non-empty cell, numeric or not, and cannot fail; the other
/// functions need at least one numeric value.
pub fn evaluate<S: AsRef<str>>(function: Function, values: &[S]) -> Result<f64> {
    match function {
        Function::Count => Ok(values
            .iter()
            .filter(|value| !value.as_ref().trim().is_empty())
            .count() as f64),
        Function::Sum => numeric_values(values).map(|numbers| numbers.iter().sum()),
        Function::Average => numeric_values(values)
            .map(|numbers| numbers.iter().sum::<f64>() / numbers.len() as f64),
        Function::Min => {
            numeric_values(values).map(|numbers| numbers.into_iter().fold(f64::INFINITY, f64::min))
        }
        Function::Max => numeric_values(values)
            .map(|numbers| numbers.into_iter().fold(f64::NEG_INFINITY, f64::max)),
    }
}

fn numeric_values<S: AsRef<str>>(values: &[S]) -> Result<Vec<f64>> {
    let numbers: Vec<f64> = values
        .iter()
        .filter_map(|value| value.as_ref().trim().parse::<f64>().ok())
        .collect();

    if numbers.is_empty() {
        Err(FormulaError::NoNumericValues)
    } else {
        Ok(numbers)
    }
}

/// Formula syntax: `=NAME(argument)` with optional interior whitespace.
static FORMULA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^=\s*([A-Za-z]+)\s*\(\s*([^()]*?)\s*\)$").unwrap());

/// Parse formula text of the form `=SUM(Score)`.
///
/// The function name is case-insensitive; the single argument is the column
/// name, taken verbatim after trimming (interior spaces allowed).
pub fn parse_formula(input: &str) -> Result<Formula> {
    let trimmed = input.trim();
    if !trimmed.starts_with('=') {
        return Err(FormulaError::Parse(
            "formula must start with '='".to_string(),
        ));
    }

    let Some(captures) = FORMULA_RE.captures(trimmed) else {
        if !trimmed.ends_with(')') {
            return Err(FormulaError::Parse(
                "formula is missing a closing parenthesis".to_string(),
            ));
        }
        return Err(FormulaError::Parse(
            "expected the form =FUNCTION(Column)".to_string(),
        ));
    };

    let name = &captures[1];
    let function = Function::from_name(name)
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_uppercase()))?;

    let column = captures[2].to_string();
    if column.is_empty() {
        return Err(FormulaError::Parse(
            "formula needs a column argument".to_string(),
        ));
    }

    Ok(Formula { function, column })
}
