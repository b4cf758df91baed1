use pest::Parser;
use pest_derive::Parser;
use serde_json::json;
use std::collections::BTreeSet;
use thiserror::Error;

pub mod functions;
pub mod mapper;
pub mod syntax;

pub use functions::polynomial_ast::*;
pub use syntax::{Expr, Number};

#[derive(Parser)]
#[grammar = "normalizer.pest"]
pub struct ExprParser;

#[derive(Error, Debug)]
pub enum ExpandError {
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Empty input")]
  EmptyInput,
  /// A term handed to the collector is not a product of atoms, usually
  /// because it was not expanded first.
  #[error("Malformed term: {0}")]
  MalformedTerm(String),
  #[error("Unsupported operation: {0}")]
  UnsupportedOperation(String),
  #[error("Unexpected node: {0}")]
  UnexpectedNode(String),
  #[error("Exponent {exponent} exceeds the limit of {limit}")]
  ExponentTooLarge { exponent: i128, limit: u32 },
}

/// Largest integer exponent a sum is expanded to unless configured otherwise.
pub const DEFAULT_MAX_EXPONENT: u32 = 64;

/// Settings for a single expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
  /// Symbols folded into coefficients instead of term signatures.
  pub parameters: BTreeSet<String>,
  /// When false, products are distributed but like terms are not merged.
  pub commutative: bool,
  /// Integer powers of sums above this fail with
  /// [`ExpandError::ExponentTooLarge`].
  pub max_exponent: u32,
}

impl Default for ExpandOptions {
  fn default() -> Self {
    ExpandOptions {
      parameters: BTreeSet::new(),
      commutative: true,
      max_exponent: DEFAULT_MAX_EXPONENT,
    }
  }
}

impl ExpandOptions {
  pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.parameters.extend(parameters.into_iter().map(Into::into));
    self
  }

  pub fn with_parameter(mut self, name: &str) -> Self {
    self.parameters.insert(name.to_string());
    self
  }

  pub fn commutative(mut self, commutative: bool) -> Self {
    self.commutative = commutative;
    self
  }

  pub fn with_max_exponent(mut self, max_exponent: u32) -> Self {
    self.max_exponent = max_exponent;
    self
  }
}

impl ExprParser {
  pub fn parse_program(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::Program, input).map_err(Box::new)
  }
}

pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  ExprParser::parse_program(input)
}

/// Parse an expression such as `(a + b)^2 - k*x`.
pub fn parse_expr(input: &str) -> Result<Expr, ExpandError> {
  if input.trim().is_empty() {
    return Err(ExpandError::EmptyInput);
  }
  let mut pairs = parse(input)?;
  let program = pairs.next().ok_or(ExpandError::EmptyInput)?;
  syntax::pair_to_expr(program)
}

/// Parse and expand in one step.
pub fn expand_str(
  input: &str,
  options: &ExpandOptions,
) -> Result<Expr, ExpandError> {
  let expr = parse_expr(input)?;
  expand(&expr, options)
}

/// JSON summary of an expansion: the input text, the rendered result and
/// its additive terms.
pub fn expansion_report(input: &str, result: &Expr) -> serde_json::Value {
  let terms: Vec<String> = result
    .additive_terms()
    .into_iter()
    .map(|term| term.to_string())
    .collect();
  json!({
    "input": input,
    "result": result.to_string(),
    "terms": terms,
  })
}
