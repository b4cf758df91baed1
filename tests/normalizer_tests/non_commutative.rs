use super::*;

fn non_commutative() -> ExpandOptions {
  ExpandOptions::default().commutative(false)
}

#[test]
fn factor_order_is_significant() {
  assert_eq!(expand_with("x*y + y*x", &non_commutative()), "x*y + y*x");
  assert_eq!(expand_with("x*x*x", &non_commutative()), "x*x*x");
}

#[test]
fn square_keeps_cross_terms_apart() {
  assert_eq!(
    expand_with("(a + b)^2", &non_commutative()),
    "a*a + a*b + b*a + b*b"
  );
}

#[test]
fn distribution_preserves_position() {
  assert_eq!(
    expand_with("(a + b)*(c + d)", &non_commutative()),
    "a*c + a*d + b*c + b*d"
  );
  assert_eq!(
    expand_with("x*(y + z)*w", &non_commutative()),
    "x*y*w + x*z*w"
  );
}

#[test]
fn expansion_is_idempotent() {
  let once = expand_str("(a + b)*(c + d)*a", &non_commutative()).unwrap();
  let twice = expand(&once, &non_commutative()).unwrap();
  assert_eq!(once, twice);
}
