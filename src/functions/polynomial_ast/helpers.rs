#[allow(unused_imports)]
use super::*;
use crate::syntax::{flattened_sum, Expr, Number};
use crate::ExpandError;

// ─── helpers ────────────────────────────────────────────────────────

/// The factors of a multiplicative term.
///
/// A product yields its children (nested products are flattened in); a
/// power, identifier, function call or constant is its own sole factor.
/// Sums and quotients are not multiplicative terms.
pub fn multiplicative_factors(term: &Expr) -> Result<Vec<&Expr>, ExpandError> {
  fn push<'a>(
    factors: &mut Vec<&'a Expr>,
    factor: &'a Expr,
  ) -> Result<(), ExpandError> {
    match factor {
      Expr::Product(children) => {
        for child in children {
          push(factors, child)?;
        }
        Ok(())
      }
      Expr::Sum(_) | Expr::Quotient(..) => Err(ExpandError::MalformedTerm(
        format!("`{}` is not a product of powers", factor),
      )),
      _ => {
        factors.push(factor);
        Ok(())
      }
    }
  }

  let mut factors = Vec::new();
  push(&mut factors, term)?;
  Ok(factors)
}

/// Extract base and exponent from a factor: `b^e` gives `(b, e)`,
/// anything else `(factor, 1)`.
pub fn extract_base_and_exp(factor: &Expr) -> (Expr, Expr) {
  match factor {
    Expr::Power(base, exponent) => (*base.clone(), *exponent.clone()),
    _ => (factor.clone(), Expr::one()),
  }
}

/// Numeric value of a constant, or of a constant raised to a non-negative
/// integer power.
pub fn numeric_value(factor: &Expr) -> Option<Number> {
  match factor {
    Expr::Constant(n) => Some(*n),
    Expr::Power(base, exponent) => {
      let base = base.as_number()?;
      let exponent = u32::try_from(exponent.as_integer()?).ok()?;
      Some(base.pow(exponent))
    }
    _ => None,
  }
}

/// Sum two exponents of the same base. Numeric exponents add directly;
/// symbolic ones are collected so that `x^a * x^a` gives `x^(2*a)`.
pub fn add_exponents(left: &Expr, right: &Expr) -> Result<Expr, ExpandError> {
  if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
    return Ok(Expr::Constant(a + b));
  }
  CommutativeTermCollector::default()
    .collect(flattened_sum([left.clone(), right.clone()]))
}

/// True for a factor that still needs distributing: a sum, or a sum raised
/// to a non-negative integer power.
pub fn is_unexpanded_factor(factor: &Expr) -> bool {
  match factor {
    Expr::Sum(_) => true,
    Expr::Power(base, exponent) => {
      matches!(base.as_ref(), Expr::Sum(_))
        && exponent.as_integer().is_some_and(|n| n >= 0)
    }
    _ => false,
  }
}

/// True when some additive term of `expr` has an unexpanded factor.
pub fn has_unexpanded_terms(expr: &Expr) -> bool {
  expr.additive_terms().into_iter().any(|term| match term {
    Expr::Product(factors) => factors.iter().any(is_unexpanded_factor),
    Expr::Power(..) => is_unexpanded_factor(term),
    _ => false,
  })
}
