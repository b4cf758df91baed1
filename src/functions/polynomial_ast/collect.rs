#[allow(unused_imports)]
use super::*;
use crate::syntax::{flattened_product, flattened_sum, power, Expr, Number};
use crate::ExpandError;
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

// ─── Collect ────────────────────────────────────────────────────────

/// Canonical description of a monomial: `(base, exponent)` pairs, one per
/// distinct base, sorted by base. `x*y` and `y*x` produce equal signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermSignature(Vec<(Expr, Expr)>);

impl TermSignature {
  fn from_map(base_to_exp: BTreeMap<Expr, Expr>) -> Self {
    TermSignature(base_to_exp.into_iter().collect())
  }

  pub fn pairs(&self) -> &[(Expr, Expr)] {
    &self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// `base^exponent` for every pair, in canonical order.
  ///
  /// A sum base keeps an exponent of 1 so that the factor stays a power and
  /// never merges into the surrounding sum.
  pub fn factors(&self) -> impl Iterator<Item = Expr> + '_ {
    self.0.iter().map(|(base, exponent)| match base {
      Expr::Sum(_) if exponent.is_one() => {
        Expr::Power(Box::new(base.clone()), Box::new(exponent.clone()))
      }
      _ => power(base.clone(), exponent.clone()),
    })
  }

  pub fn to_expr(&self) -> Expr {
    flattened_product(self.factors())
  }
}

/// Scalar part of a term: a number times a monomial in the parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coefficient {
  pub numeric: Number,
  pub parameters: TermSignature,
}

impl Coefficient {
  pub fn to_expr(&self) -> Expr {
    flattened_product(
      std::iter::once(Expr::Constant(self.numeric))
        .chain(self.parameters.factors()),
    )
  }
}

/// Merges like terms of an expanded sum.
pub trait TermCollector {
  fn collect(&self, expr: Expr) -> Result<Expr, ExpandError>;
}

/// Leaves sums untouched. Used when multiplication does not commute, where
/// `x*y` and `y*x` must stay distinct.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCollector;

impl TermCollector for IdentityCollector {
  fn collect(&self, expr: Expr) -> Result<Expr, ExpandError> {
    Ok(expr)
  }
}

/// A term collector that assumes multiplication is commutative.
#[derive(Debug, Clone, Default)]
pub struct CommutativeTermCollector {
  parameters: BTreeSet<String>,
}

impl CommutativeTermCollector {
  pub fn new(parameters: BTreeSet<String>) -> Self {
    CommutativeTermCollector { parameters }
  }

  pub fn parameters(&self) -> &BTreeSet<String> {
    &self.parameters
  }

  /// Split a fully expanded multiplicative term into its structural
  /// signature and its coefficient.
  ///
  /// Constants fold into the numeric coefficient, repeated bases add their
  /// exponents, and every `base^exponent` that depends only on parameters
  /// moves into the coefficient.
  pub fn split_term(
    &self,
    term: &Expr,
  ) -> Result<(TermSignature, Coefficient), ExpandError> {
    let mut numeric = Number::Integer(1);
    let mut base_to_exp: BTreeMap<Expr, Expr> = BTreeMap::new();

    for factor in multiplicative_factors(term)? {
      if let Some(n) = numeric_value(factor) {
        numeric = numeric * n;
        continue;
      }
      let (base, exp) = extract_base_and_exp(factor);
      match base_to_exp.entry(base) {
        Entry::Vacant(entry) => {
          entry.insert(exp);
        }
        Entry::Occupied(mut entry) => {
          let total = add_exponents(entry.get(), &exp)?;
          entry.insert(total);
        }
      }
    }

    let mut structural = BTreeMap::new();
    let mut parameters = BTreeMap::new();
    for (base, exp) in base_to_exp {
      if exp.is_zero() {
        continue;
      }
      if base.depends_only_on(&self.parameters)
        && exp.depends_only_on(&self.parameters)
      {
        parameters.insert(base, exp);
      } else {
        structural.insert(base, exp);
      }
    }

    let signature = TermSignature::from_map(structural);
    let coefficient = Coefficient {
      numeric,
      parameters: TermSignature::from_map(parameters),
    };
    trace!(
      "split `{}` into {} * {}",
      term,
      coefficient.to_expr(),
      signature.to_expr()
    );
    Ok((signature, coefficient))
  }

  /// The `(signature, coefficient)` pair of every additive term of `expr`,
  /// in order. Intended for already collected expressions.
  pub fn monomials(
    &self,
    expr: &Expr,
  ) -> Result<Vec<(TermSignature, Coefficient)>, ExpandError> {
    expr
      .additive_terms()
      .into_iter()
      .filter(|term| !term.is_zero())
      .map(|term| self.split_term(term))
      .collect()
  }
}

impl TermCollector for CommutativeTermCollector {
  /// Merge the terms of a sum that share a signature. A non-sum is treated
  /// as a sum with one term.
  ///
  /// Signatures keep the order in which they were first seen. A coefficient
  /// made of several parameter monomials yields one output term per
  /// monomial, so the result never nests a sum inside a product.
  fn collect(&self, expr: Expr) -> Result<Expr, ExpandError> {
    let terms = match expr {
      Expr::Sum(children) => children,
      other => vec![other],
    };

    let mut term_to_coeff: IndexMap<TermSignature, IndexMap<TermSignature, Number>> =
      IndexMap::new();
    for term in &terms {
      let (signature, coefficient) = self.split_term(term)?;
      let numeric = term_to_coeff
        .entry(signature)
        .or_default()
        .entry(coefficient.parameters)
        .or_insert(Number::Integer(0));
      *numeric = *numeric + coefficient.numeric;
    }

    let signature_count = term_to_coeff.len();
    let result = flattened_sum(term_to_coeff.into_iter().flat_map(
      |(signature, coefficients)| {
        coefficients
          .into_iter()
          .filter(|(_, numeric)| !numeric.is_zero())
          .map(move |(parameters, numeric)| {
            flattened_product(
              std::iter::once(Expr::Constant(numeric))
                .chain(parameters.factors())
                .chain(signature.factors()),
            )
          })
          .collect::<Vec<_>>()
      },
    ));
    debug!(
      "collected {} terms into {} signatures",
      terms.len(),
      signature_count
    );
    Ok(result)
  }
}

/// Collect like terms of an expanded expression.
pub fn collect(
  expr: Expr,
  parameters: &BTreeSet<String>,
) -> Result<Expr, ExpandError> {
  CommutativeTermCollector::new(parameters.clone()).collect(expr)
}
