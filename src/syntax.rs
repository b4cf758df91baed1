use pest::iterators::Pair;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{ExpandError, Rule};

/// Numeric literal: exact integer or floating point.
///
/// Equality, hashing and ordering are structural: `Integer(2)` and
/// `Real(2.0)` are different constants, and reals compare by bit pattern so
/// that they can serve as map keys.
#[derive(Debug, Clone, Copy)]
pub enum Number {
  Integer(i128),
  Real(f64),
}

impl Number {
  pub fn as_f64(self) -> f64 {
    match self {
      Number::Integer(i) => i as f64,
      Number::Real(r) => r,
    }
  }

  pub fn is_zero(self) -> bool {
    match self {
      Number::Integer(i) => i == 0,
      Number::Real(r) => r == 0.0,
    }
  }

  pub fn is_one(self) -> bool {
    match self {
      Number::Integer(i) => i == 1,
      Number::Real(r) => r == 1.0,
    }
  }

  pub fn is_negative(self) -> bool {
    match self {
      Number::Integer(i) => i < 0,
      Number::Real(r) => r < 0.0,
    }
  }

  /// Raise to a non-negative integer power. Integers that overflow fall
  /// back to floating point.
  pub fn pow(self, exponent: u32) -> Self {
    match self {
      Number::Integer(base) => base
        .checked_pow(exponent)
        .map(Number::Integer)
        .unwrap_or_else(|| Number::Real((base as f64).powf(exponent as f64))),
      Number::Real(base) => Number::Real(base.powf(exponent as f64)),
    }
  }
}

impl std::ops::Add for Number {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    match (self, rhs) {
      (Self::Integer(a), Self::Integer(b)) => a
        .checked_add(b)
        .map(Self::Integer)
        .unwrap_or(Self::Real(a as f64 + b as f64)),
      (a, b) => Self::Real(a.as_f64() + b.as_f64()),
    }
  }
}

impl std::ops::Mul for Number {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    match (self, rhs) {
      (Self::Integer(a), Self::Integer(b)) => a
        .checked_mul(b)
        .map(Self::Integer)
        .unwrap_or(Self::Real(a as f64 * b as f64)),
      (a, b) => Self::Real(a.as_f64() * b.as_f64()),
    }
  }
}

impl std::ops::Neg for Number {
  type Output = Self;

  fn neg(self) -> Self {
    match self {
      Self::Integer(i) => i
        .checked_neg()
        .map(Self::Integer)
        .unwrap_or(Self::Real(-(i as f64))),
      Self::Real(r) => Self::Real(-r),
    }
  }
}

impl PartialEq for Number {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for Number {}

impl PartialOrd for Number {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Number {
  fn cmp(&self, other: &Self) -> Ordering {
    match (self, other) {
      (Number::Integer(a), Number::Integer(b)) => a.cmp(b),
      (Number::Real(a), Number::Real(b)) => a.total_cmp(b),
      (Number::Integer(_), Number::Real(_)) => Ordering::Less,
      (Number::Real(_), Number::Integer(_)) => Ordering::Greater,
    }
  }
}

impl Hash for Number {
  fn hash<H: Hasher>(&self, state: &mut H) {
    match self {
      Number::Integer(i) => {
        0u8.hash(state);
        i.hash(state);
      }
      Number::Real(r) => {
        1u8.hash(state);
        r.to_bits().hash(state);
      }
    }
  }
}

impl fmt::Display for Number {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Number::Integer(i) => write!(f, "{}", i),
      Number::Real(r) => write!(f, "{:?}", r),
    }
  }
}

/// Expression tree.
///
/// Sums and products are n-ary. Trees built through [`flattened_sum`] and
/// [`flattened_product`] never nest a sum directly inside a sum or a
/// product directly inside a product. The variant order defines the total
/// order used to canonicalize term signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
  Constant(Number),
  Identifier(String),
  /// Opaque function application such as `sin(x)`. Treated as an
  /// algebraic leaf by the term collector.
  FunctionCall {
    name: String,
    args: Vec<Expr>,
  },
  Power(Box<Expr>, Box<Expr>),
  Product(Vec<Expr>),
  Sum(Vec<Expr>),
  Quotient(Box<Expr>, Box<Expr>),
}

impl Expr {
  pub fn integer(value: i128) -> Self {
    Expr::Constant(Number::Integer(value))
  }

  pub fn real(value: f64) -> Self {
    Expr::Constant(Number::Real(value))
  }

  pub fn zero() -> Self {
    Expr::integer(0)
  }

  pub fn one() -> Self {
    Expr::integer(1)
  }

  pub fn symbol(name: &str) -> Self {
    Expr::Identifier(name.to_string())
  }

  pub fn call(name: &str, args: Vec<Expr>) -> Self {
    Expr::FunctionCall {
      name: name.to_string(),
      args,
    }
  }

  /// `self ^ exponent`, eliding `x^0` and `x^1`.
  pub fn pow(self, exponent: Expr) -> Self {
    power(self, exponent)
  }

  pub fn as_number(&self) -> Option<Number> {
    match self {
      Expr::Constant(n) => Some(*n),
      _ => None,
    }
  }

  pub fn as_integer(&self) -> Option<i128> {
    match self {
      Expr::Constant(Number::Integer(i)) => Some(*i),
      _ => None,
    }
  }

  pub fn is_zero(&self) -> bool {
    self.as_number().is_some_and(Number::is_zero)
  }

  pub fn is_one(&self) -> bool {
    self.as_number().is_some_and(Number::is_one)
  }

  /// The summands of a sum, or the expression itself.
  pub fn additive_terms(&self) -> Vec<&Expr> {
    match self {
      Expr::Sum(children) => children.iter().collect(),
      _ => vec![self],
    }
  }

  /// Names the expression depends on: identifiers, and the names of the
  /// functions it calls.
  pub fn free_variables(&self) -> BTreeSet<&str> {
    let mut vars = BTreeSet::new();
    self.collect_free_variables(&mut vars);
    vars
  }

  fn collect_free_variables<'a>(&'a self, vars: &mut BTreeSet<&'a str>) {
    match self {
      Expr::Constant(_) => {}
      Expr::Identifier(name) => {
        vars.insert(name.as_str());
      }
      Expr::FunctionCall { name, args } => {
        vars.insert(name.as_str());
        for arg in args {
          arg.collect_free_variables(vars);
        }
      }
      Expr::Sum(children) | Expr::Product(children) => {
        for child in children {
          child.collect_free_variables(vars);
        }
      }
      Expr::Power(left, right) | Expr::Quotient(left, right) => {
        left.collect_free_variables(vars);
        right.collect_free_variables(vars);
      }
    }
  }

  /// True when every free variable is one of `parameters`. Constants
  /// depend on nothing and always qualify.
  pub fn depends_only_on(&self, parameters: &BTreeSet<String>) -> bool {
    self
      .free_variables()
      .into_iter()
      .all(|var| parameters.contains(var))
  }
}

impl std::ops::Add for Expr {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    flattened_sum([self, rhs])
  }
}

impl std::ops::Sub for Expr {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    flattened_sum([self, negate(rhs)])
  }
}

impl std::ops::Mul for Expr {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    flattened_product([self, rhs])
  }
}

impl std::ops::Neg for Expr {
  type Output = Self;

  fn neg(self) -> Self {
    negate(self)
  }
}

// ─── Flattening constructors ────────────────────────────────────────

/// Build a sum, merging nested sums and dropping zeros.
/// An empty sum is `0`; a single summand is returned as is.
pub fn flattened_sum<I: IntoIterator<Item = Expr>>(components: I) -> Expr {
  fn push(children: &mut Vec<Expr>, expr: Expr) {
    match expr {
      Expr::Sum(inner) => {
        for child in inner {
          push(children, child);
        }
      }
      e if e.is_zero() => {}
      e => children.push(e),
    }
  }

  let mut children = Vec::new();
  for component in components {
    push(&mut children, component);
  }
  match children.len() {
    0 => Expr::zero(),
    1 => children.remove(0),
    _ => Expr::Sum(children),
  }
}

/// Build a product, merging nested products and dropping ones.
/// A literal zero factor makes the whole product `0`.
pub fn flattened_product<I: IntoIterator<Item = Expr>>(components: I) -> Expr {
  fn push(children: &mut Vec<Expr>, expr: Expr) -> bool {
    match expr {
      Expr::Product(inner) => inner.into_iter().all(|child| push(children, child)),
      e if e.is_zero() => false,
      e if e.is_one() => true,
      e => {
        children.push(e);
        true
      }
    }
  }

  let mut children = Vec::new();
  for component in components {
    if !push(&mut children, component) {
      return Expr::zero();
    }
  }
  match children.len() {
    0 => Expr::one(),
    1 => children.remove(0),
    _ => Expr::Product(children),
  }
}

/// `base ^ exponent` with `x^0 = 1` and `x^1 = x`.
pub fn power(base: Expr, exponent: Expr) -> Expr {
  if exponent.is_zero() {
    Expr::one()
  } else if exponent.is_one() {
    base
  } else {
    Expr::Power(Box::new(base), Box::new(exponent))
  }
}

pub fn quotient(numerator: Expr, denominator: Expr) -> Expr {
  Expr::Quotient(Box::new(numerator), Box::new(denominator))
}

/// Multiply by -1, folding into a leading numeric factor when present.
pub fn negate(expr: Expr) -> Expr {
  match expr {
    Expr::Constant(n) => Expr::Constant(-n),
    Expr::Product(mut factors) => match factors.first() {
      Some(Expr::Constant(n)) => {
        factors[0] = Expr::Constant(-*n);
        flattened_product(factors)
      }
      _ => flattened_product(std::iter::once(Expr::integer(-1)).chain(factors)),
    },
    other => flattened_product([Expr::integer(-1), other]),
  }
}

// ─── Display ────────────────────────────────────────────────────────

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Constant(n) => write!(f, "{}", n),
      Expr::Identifier(name) => write!(f, "{}", name),
      Expr::FunctionCall { name, args } => {
        write!(f, "{}(", name)?;
        for (i, arg) in args.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{}", arg)?;
        }
        write!(f, ")")
      }
      Expr::Sum(children) => {
        if children.is_empty() {
          return write!(f, "0");
        }
        for (i, child) in children.iter().enumerate() {
          let rendered = if matches!(child, Expr::Sum(_)) {
            format!("({})", child)
          } else {
            child.to_string()
          };
          if i == 0 {
            f.write_str(&rendered)?;
          } else if let Some(stripped) = rendered.strip_prefix('-') {
            write!(f, " - {}", stripped)?;
          } else {
            write!(f, " + {}", rendered)?;
          }
        }
        Ok(())
      }
      Expr::Product(children) => {
        if children.is_empty() {
          return write!(f, "1");
        }
        let leading_minus =
          children.len() > 1 && children[0] == Expr::integer(-1);
        let factors = if leading_minus {
          f.write_str("-")?;
          &children[1..]
        } else {
          &children[..]
        };
        for (i, factor) in factors.iter().enumerate() {
          if i > 0 {
            f.write_str("*")?;
          }
          let parens = match factor {
            Expr::Sum(_) | Expr::Product(_) | Expr::Quotient(..) => true,
            Expr::Constant(n) => n.is_negative() && (i > 0 || leading_minus),
            _ => false,
          };
          write_grouped(f, factor, parens)?;
        }
        Ok(())
      }
      Expr::Power(base, exponent) => {
        let base_parens = match base.as_ref() {
          Expr::Constant(n) => n.is_negative(),
          Expr::Identifier(_) | Expr::FunctionCall { .. } => false,
          _ => true,
        };
        let exponent_parens = match exponent.as_ref() {
          Expr::Constant(n) => n.is_negative(),
          Expr::Identifier(_) | Expr::FunctionCall { .. } => false,
          _ => true,
        };
        write_grouped(f, base, base_parens)?;
        f.write_str("^")?;
        write_grouped(f, exponent, exponent_parens)
      }
      Expr::Quotient(numerator, denominator) => {
        let numerator_parens = matches!(numerator.as_ref(), Expr::Sum(_));
        let denominator_parens = match denominator.as_ref() {
          Expr::Constant(n) => n.is_negative(),
          Expr::Sum(_) | Expr::Product(_) | Expr::Quotient(..) => true,
          _ => false,
        };
        write_grouped(f, numerator, numerator_parens)?;
        f.write_str("/")?;
        write_grouped(f, denominator, denominator_parens)
      }
    }
  }
}

fn write_grouped(
  f: &mut fmt::Formatter<'_>,
  expr: &Expr,
  parens: bool,
) -> fmt::Result {
  if parens {
    write!(f, "({})", expr)
  } else {
    write!(f, "{}", expr)
  }
}

// ─── Parse tree to AST ──────────────────────────────────────────────

/// Convert a pest pair produced by [`crate::ExprParser`] into an [`Expr`].
pub fn pair_to_expr(pair: Pair<Rule>) -> Result<Expr, ExpandError> {
  match pair.as_rule() {
    Rule::Program => {
      let inner = pair
        .into_inner()
        .next()
        .ok_or(ExpandError::EmptyInput)?;
      pair_to_expr(inner)
    }
    Rule::Expression => {
      let mut inner = pair.into_inner();
      let mut terms = Vec::new();
      if let Some(first) = inner.next() {
        terms.push(pair_to_expr(first)?);
      }
      while let Some(op) = inner.next() {
        let term = match inner.next() {
          Some(term) => pair_to_expr(term)?,
          None => return Err(unexpected(&op)),
        };
        if op.as_str() == "-" {
          terms.push(negate(term));
        } else {
          terms.push(term);
        }
      }
      Ok(flattened_sum(terms))
    }
    Rule::Term => {
      let mut inner = pair.into_inner();
      let mut factors = Vec::new();
      if let Some(first) = inner.next() {
        factors.push(pair_to_expr(first)?);
      }
      while let Some(op) = inner.next() {
        let operand = match inner.next() {
          Some(operand) => pair_to_expr(operand)?,
          None => return Err(unexpected(&op)),
        };
        if op.as_str() == "/" {
          let numerator = flattened_product(std::mem::take(&mut factors));
          factors.push(quotient(numerator, operand));
        } else {
          factors.push(operand);
        }
      }
      Ok(flattened_product(factors))
    }
    Rule::Unary => {
      let mut negations = 0usize;
      let mut operand = None;
      for child in pair.into_inner() {
        match child.as_rule() {
          Rule::Negation => negations += 1,
          _ => operand = Some(pair_to_expr(child)?),
        }
      }
      let operand = operand.ok_or(ExpandError::EmptyInput)?;
      Ok(if negations % 2 == 1 {
        negate(operand)
      } else {
        operand
      })
    }
    Rule::PowerExpr => {
      let mut inner = pair.into_inner();
      let base = match inner.next() {
        Some(base) => pair_to_expr(base)?,
        None => return Err(ExpandError::EmptyInput),
      };
      match inner.next() {
        Some(exponent) => Ok(Expr::Power(
          Box::new(base),
          Box::new(pair_to_expr(exponent)?),
        )),
        None => Ok(base),
      }
    }
    Rule::FunctionCall => {
      let mut inner = pair.into_inner();
      let name = match inner.next() {
        Some(name) => name.as_str().to_string(),
        None => return Err(ExpandError::EmptyInput),
      };
      let args = inner.map(pair_to_expr).collect::<Result<Vec<_>, _>>()?;
      Ok(Expr::FunctionCall { name, args })
    }
    Rule::Identifier => Ok(Expr::Identifier(pair.as_str().to_string())),
    Rule::Number => Ok(Expr::Constant(str_to_number(pair.as_str())?)),
    _ => Err(unexpected(&pair)),
  }
}

fn unexpected(pair: &Pair<Rule>) -> ExpandError {
  ExpandError::UnexpectedNode(format!(
    "{:?} `{}`",
    pair.as_rule(),
    pair.as_str()
  ))
}

/// Parse a numeric literal, preferring an exact integer.
pub fn str_to_number(num_str: &str) -> Result<Number, ExpandError> {
  num_str
    .parse::<i128>()
    .map(Number::Integer)
    .or_else(|_| num_str.parse::<f64>().map(Number::Real))
    .map_err(|_| {
      ExpandError::UnexpectedNode(format!("invalid number `{}`", num_str))
    })
}
