//! Recursive rewriting of expression trees.
//!
//! [`IdentityMapper::rec`] dispatches on the node kind with an exhaustive
//! `match`, so a new variant of [`Expr`] cannot go unhandled. Every
//! `map_*` method defaults to rewriting the children and rebuilding the
//! node through the flattening constructors; implementors override only the
//! kinds they care about. The `default_map_*` functions expose those
//! defaults so an override can run them before applying its own rule.

use crate::syntax::{
  flattened_product, flattened_sum, power, quotient, Expr, Number,
};
use crate::ExpandError;

pub trait IdentityMapper {
  fn rec(&self, expr: &Expr) -> Result<Expr, ExpandError> {
    match expr {
      Expr::Constant(n) => self.map_constant(*n),
      Expr::Identifier(name) => self.map_identifier(name),
      Expr::FunctionCall { name, args } => self.map_function_call(name, args),
      Expr::Sum(children) => self.map_sum(children),
      Expr::Product(children) => self.map_product(children),
      Expr::Power(base, exponent) => self.map_power(base, exponent),
      Expr::Quotient(numerator, denominator) => {
        self.map_quotient(numerator, denominator)
      }
    }
  }

  fn map_constant(&self, n: Number) -> Result<Expr, ExpandError> {
    Ok(Expr::Constant(n))
  }

  fn map_identifier(&self, name: &str) -> Result<Expr, ExpandError> {
    Ok(Expr::Identifier(name.to_string()))
  }

  fn map_function_call(
    &self,
    name: &str,
    args: &[Expr],
  ) -> Result<Expr, ExpandError> {
    default_map_function_call(self, name, args)
  }

  fn map_sum(&self, children: &[Expr]) -> Result<Expr, ExpandError> {
    default_map_sum(self, children)
  }

  fn map_product(&self, children: &[Expr]) -> Result<Expr, ExpandError> {
    default_map_product(self, children)
  }

  fn map_power(
    &self,
    base: &Expr,
    exponent: &Expr,
  ) -> Result<Expr, ExpandError> {
    default_map_power(self, base, exponent)
  }

  fn map_quotient(
    &self,
    numerator: &Expr,
    denominator: &Expr,
  ) -> Result<Expr, ExpandError> {
    default_map_quotient(self, numerator, denominator)
  }
}

pub fn default_map_function_call<M: IdentityMapper + ?Sized>(
  mapper: &M,
  name: &str,
  args: &[Expr],
) -> Result<Expr, ExpandError> {
  let args = args
    .iter()
    .map(|arg| mapper.rec(arg))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(Expr::FunctionCall {
    name: name.to_string(),
    args,
  })
}

pub fn default_map_sum<M: IdentityMapper + ?Sized>(
  mapper: &M,
  children: &[Expr],
) -> Result<Expr, ExpandError> {
  let children = children
    .iter()
    .map(|child| mapper.rec(child))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(flattened_sum(children))
}

pub fn default_map_product<M: IdentityMapper + ?Sized>(
  mapper: &M,
  children: &[Expr],
) -> Result<Expr, ExpandError> {
  let children = children
    .iter()
    .map(|child| mapper.rec(child))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(flattened_product(children))
}

pub fn default_map_power<M: IdentityMapper + ?Sized>(
  mapper: &M,
  base: &Expr,
  exponent: &Expr,
) -> Result<Expr, ExpandError> {
  Ok(power(mapper.rec(base)?, mapper.rec(exponent)?))
}

pub fn default_map_quotient<M: IdentityMapper + ?Sized>(
  mapper: &M,
  numerator: &Expr,
  denominator: &Expr,
) -> Result<Expr, ExpandError> {
  Ok(quotient(mapper.rec(numerator)?, mapper.rec(denominator)?))
}
