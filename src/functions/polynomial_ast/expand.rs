#[allow(unused_imports)]
use super::*;
use crate::mapper::{default_map_product, IdentityMapper};
use crate::syntax::{flattened_product, flattened_sum, power, Expr};
use crate::{ExpandError, ExpandOptions, DEFAULT_MAX_EXPONENT};
use log::{debug, trace};

// ─── Expand ─────────────────────────────────────────────────────────

/// Expand an expression into a sum of monomials.
///
/// Commutative expansion merges like terms, folding the symbols listed in
/// `options.parameters` into coefficients. Non-commutative expansion only
/// distributes.
pub fn expand(expr: &Expr, options: &ExpandOptions) -> Result<Expr, ExpandError> {
  if options.commutative {
    let collector = CommutativeTermCollector::new(options.parameters.clone());
    Expander::new(collector)
      .with_max_exponent(options.max_exponent)
      .expand(expr)
  } else {
    Expander::new(IdentityCollector)
      .with_max_exponent(options.max_exponent)
      .expand(expr)
  }
}

/// Distributes products over sums and powers of sums, handing every sum it
/// produces to a [`TermCollector`].
#[derive(Debug, Clone)]
pub struct Expander<C> {
  collector: C,
  max_exponent: u32,
}

impl<C: TermCollector> Expander<C> {
  pub fn new(collector: C) -> Self {
    Expander {
      collector,
      max_exponent: DEFAULT_MAX_EXPONENT,
    }
  }

  pub fn with_max_exponent(mut self, max_exponent: u32) -> Self {
    self.max_exponent = max_exponent;
    self
  }

  pub fn collector(&self) -> &C {
    &self.collector
  }

  /// Expand `expr` and collect the result once more at the top, so that
  /// top-level sums and sum-free products are in normal form too.
  pub fn expand(&self, expr: &Expr) -> Result<Expr, ExpandError> {
    let expanded = self.rec(expr)?;
    self.collect_terms(expanded)
  }

  /// Collect `sum` and expand again whatever collection left unexpanded.
  ///
  /// Adding the exponents of a repeated sum base can produce an integer
  /// power of that sum, as in `(a + b)^n * (a + b)^(2 - n)`.
  fn collect_terms(&self, sum: Expr) -> Result<Expr, ExpandError> {
    let collected = self.collector.collect(sum)?;
    if !has_unexpanded_terms(&collected) {
      return Ok(collected);
    }
    debug!("re-expanding collected terms of `{}`", collected);
    let expanded = self.rec(&collected)?;
    self.collect_terms(expanded)
  }

  /// Distribute a product whose children are already expanded.
  ///
  /// The children before the first sum form the leading factor, the
  /// children after it are distributed recursively into `rest`, and every
  /// summand `c` of the sum contributes `leading * c * rest`.
  fn distribute(&self, product: Expr) -> Result<Expr, ExpandError> {
    let mut children = match product {
      Expr::Product(children) => children,
      other => return Ok(other),
    };
    let Some(position) = children.iter().position(|c| matches!(c, Expr::Sum(_)))
    else {
      // no more sums found
      return Ok(flattened_product(children));
    };

    let rest_children = children.split_off(position + 1);
    let summands = match children.pop() {
      Some(Expr::Sum(summands)) => summands,
      Some(other) => vec![other],
      None => Vec::new(),
    };
    let leading = children;
    let rest = if rest_children.is_empty() {
      Expr::one()
    } else {
      self.distribute(flattened_product(rest_children))?
    };
    trace!(
      "distributing {} summands between `{}` and `{}`",
      summands.len(),
      flattened_product(leading.clone()),
      rest
    );

    let mut terms = Vec::with_capacity(summands.len());
    for summand in summands {
      let product = flattened_product(
        leading
          .iter()
          .cloned()
          .chain([summand, rest.clone()]),
      );
      terms.push(self.distribute(product)?);
    }
    self.collect_terms(flattened_sum(terms))
  }

  /// `base^n` for an expanded sum `base`, as the product of `n` copies.
  fn expand_integer_power(
    &self,
    base: Expr,
    exponent: i128,
  ) -> Result<Expr, ExpandError> {
    if exponent > i128::from(self.max_exponent) {
      return Err(ExpandError::ExponentTooLarge {
        exponent,
        limit: self.max_exponent,
      });
    }
    debug!("expanding `{}` to the power {}", base, exponent);
    // bounded by max_exponent above
    let copies = exponent as usize;
    self.distribute(flattened_product(vec![base; copies]))
  }

  /// `(a*b)^e` as `a^e * b^e`, expanded.
  fn power_of_product(
    &self,
    factors: &[Expr],
    exponent: &Expr,
  ) -> Result<Expr, ExpandError> {
    self.rec(&flattened_product(
      factors
        .iter()
        .map(|factor| power(factor.clone(), exponent.clone())),
    ))
  }
}

impl<C: TermCollector> IdentityMapper for Expander<C> {
  fn map_product(&self, children: &[Expr]) -> Result<Expr, ExpandError> {
    let product = default_map_product(self, children)?;
    self.distribute(product)
  }

  fn map_power(
    &self,
    base: &Expr,
    exponent: &Expr,
  ) -> Result<Expr, ExpandError> {
    if let Expr::Product(factors) = base {
      return self.power_of_product(factors, exponent);
    }

    let base = self.rec(base)?;
    let exponent = self.expand(exponent)?;
    match base {
      Expr::Product(factors) => self.power_of_product(&factors, &exponent),
      Expr::Sum(_) => match exponent.as_integer() {
        Some(n) if n >= 0 => self.expand_integer_power(base, n),
        _ => Ok(power(base, exponent)),
      },
      _ => Ok(power(base, exponent)),
    }
  }

  /// Arguments are independent expressions and are expanded in full.
  fn map_function_call(
    &self,
    name: &str,
    args: &[Expr],
  ) -> Result<Expr, ExpandError> {
    let args = args
      .iter()
      .map(|arg| self.expand(arg))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::FunctionCall {
      name: name.to_string(),
      args,
    })
  }

  fn map_quotient(
    &self,
    numerator: &Expr,
    denominator: &Expr,
  ) -> Result<Expr, ExpandError> {
    Err(ExpandError::UnsupportedOperation(format!(
      "cannot expand quotient `{}`",
      crate::syntax::quotient(numerator.clone(), denominator.clone())
    )))
  }
}
