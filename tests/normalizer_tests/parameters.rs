use super::*;

fn with_k() -> ExpandOptions {
  ExpandOptions::default().with_parameter("k")
}

#[test]
fn parameter_joins_the_coefficient() {
  assert_eq!(expand_with("k*x + k*x", &with_k()), "2*k*x");

  let result = expand_str("k*x + k*x", &with_k()).unwrap();
  let collector = CommutativeTermCollector::new(with_k().parameters);
  let monomials = collector.monomials(&result).unwrap();
  assert_eq!(monomials.len(), 1);

  let (signature, coefficient) = &monomials[0];
  assert_eq!(signature.pairs(), &[(Expr::symbol("x"), Expr::one())]);
  assert_eq!(coefficient.to_expr().to_string(), "2*k");
}

#[test]
fn distinct_parameters_share_a_signature() {
  let options = ExpandOptions::default().with_parameters(["k", "m"]);
  assert_eq!(expand_with("k*x + m*x", &options), "k*x + m*x");

  let result = expand_str("k*x + m*x", &options).unwrap();
  let monomials = CommutativeTermCollector::new(options.parameters.clone())
    .monomials(&result)
    .unwrap();
  assert_eq!(monomials[0].0, monomials[1].0);
  assert_eq!(monomials[0].1.to_expr().to_string(), "k");
  assert_eq!(monomials[1].1.to_expr().to_string(), "m");
}

#[test]
fn without_parameters_signatures_differ() {
  let result = expand_str("k*x + m*x", &ExpandOptions::default()).unwrap();
  let monomials = CommutativeTermCollector::default()
    .monomials(&result)
    .unwrap();
  assert_ne!(monomials[0].0, monomials[1].0);
}

#[test]
fn pure_parameter_term_has_empty_signature() {
  let result = expand_str("(k + x)^2", &with_k()).unwrap();
  assert_eq!(result.to_string(), "k^2 + 2*k*x + x^2");

  let monomials = CommutativeTermCollector::new(with_k().parameters)
    .monomials(&result)
    .unwrap();
  let (signature, coefficient) = &monomials[0];
  assert!(signature.is_empty());
  assert_eq!(coefficient.to_expr().to_string(), "k^2");
}

#[test]
fn parameter_exponents_add() {
  assert_eq!(expand_with("k^2*x*k", &with_k()), "k^3*x");
}

#[test]
fn calls_depend_on_the_function_name() {
  let result = expand_str("sin(k)*x + k*x", &with_k()).unwrap();
  assert_eq!(result.to_string(), "x*sin(k) + k*x");

  let monomials = CommutativeTermCollector::new(with_k().parameters)
    .monomials(&result)
    .unwrap();
  assert_eq!(monomials.len(), 2);
  assert_ne!(monomials[0].0, monomials[1].0);
  assert_eq!(monomials[0].1.to_expr(), Expr::one());
  assert_eq!(monomials[1].1.to_expr().to_string(), "k");
}

#[test]
fn calls_of_parameters_are_coefficients() {
  let options = ExpandOptions::default().with_parameters(["k", "sin"]);
  let result = expand_str("sin(k)*x + k*x", &options).unwrap();
  assert_eq!(result.to_string(), "sin(k)*x + k*x");

  let monomials = CommutativeTermCollector::new(options.parameters.clone())
    .monomials(&result)
    .unwrap();
  assert_eq!(monomials[0].0, monomials[1].0);
  assert_eq!(monomials[0].0.to_expr(), Expr::symbol("x"));
  assert_eq!(monomials[0].1.to_expr().to_string(), "sin(k)");
}

#[test]
fn parameter_in_exponent_stays_structural() {
  assert_eq!(expand_with("x^k*x", &with_k()), "x^(k + 1)");
}
