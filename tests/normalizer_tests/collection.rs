use super::*;

fn x() -> Expr {
  Expr::symbol("x")
}

fn y() -> Expr {
  Expr::symbol("y")
}

#[test]
fn commuted_products_merge() {
  assert_eq!(expand_text("x*y + y*x"), "2*x*y");
  assert_eq!(expand_text("x*y - y*x"), "0");
}

#[test]
fn collector_on_parsed_sum() {
  let sum = parse_expr("x*y + y*x + 3").unwrap();
  let collected = CommutativeTermCollector::default().collect(sum).unwrap();
  assert_eq!(collected.to_string(), "2*x*y + 3");
}

#[test]
fn single_term_is_normalized() {
  let term = parse_expr("x*x*2").unwrap();
  let collected = CommutativeTermCollector::default().collect(term).unwrap();
  assert_eq!(collected.to_string(), "2*x^2");
}

#[test]
fn first_seen_order_is_kept() {
  assert_eq!(expand_text("y + x + y"), "2*y + x");
}

#[test]
fn real_coefficients() {
  assert_eq!(expand_text("0.5*x + 0.25*x"), "0.75*x");
  assert_eq!(expand_text("x + 0.5*x"), "1.5*x");
}

#[test]
fn collect_with_parameters() {
  let sum = parse_expr("k*x + x*k").unwrap();
  let parameters = BTreeSet::from(["k".to_string()]);
  assert_eq!(collect(sum, &parameters).unwrap().to_string(), "2*k*x");
}

#[test]
fn monomials_of_expanded_expression() {
  let result = expand_text("3*x^2*y + x");
  let expr = parse_expr(&result).unwrap();
  let monomials = CommutativeTermCollector::default()
    .monomials(&expr)
    .unwrap();
  assert_eq!(monomials.len(), 2);

  let (signature, coefficient) = &monomials[0];
  assert_eq!(
    signature.pairs(),
    &[(x(), Expr::integer(2)), (y(), Expr::one())]
  );
  assert_eq!(coefficient.numeric, Number::Integer(3));

  let (signature, coefficient) = &monomials[1];
  assert_eq!(signature.to_expr(), x());
  assert_eq!(coefficient.numeric, Number::Integer(1));
}

#[test]
fn unexpanded_sum_is_rejected() {
  let sum = Expr::Sum(vec![
    Expr::Product(vec![x(), Expr::Sum(vec![x(), y()])]),
    y(),
  ]);
  assert!(matches!(
    collect(sum, &BTreeSet::new()),
    Err(ExpandError::MalformedTerm(_))
  ));
}

#[test]
fn quotient_term_is_rejected() {
  let sum = Expr::Sum(vec![
    x(),
    Expr::Quotient(Box::new(x()), Box::new(y())),
  ]);
  assert!(matches!(
    collect(sum, &BTreeSet::new()),
    Err(ExpandError::MalformedTerm(_))
  ));
}
