use super::*;

mod products_over_sums {
  use super::*;

  #[test]
  fn binomial_product() {
    assert_eq!(expand_text("(a + b)*(c + d)"), "a*c + a*d + b*c + b*d");
  }

  #[test]
  fn monomial_times_sum() {
    assert_eq!(expand_text("x*(y + z)"), "x*y + x*z");
    assert_eq!(expand_text("(y + z)*x"), "x*y + x*z");
  }

  #[test]
  fn constant_factor() {
    assert_eq!(expand_text("2*(x + 3)"), "2*x + 6");
  }

  #[test]
  fn difference_of_squares() {
    assert_eq!(expand_text("(x + 1)*(x - 1)"), "x^2 - 1");
  }

  #[test]
  fn three_factors() {
    assert_eq!(
      expand_text("a*(b + c)*(d + e)"),
      "a*b*d + a*b*e + a*c*d + a*c*e"
    );
  }

  #[test]
  fn sum_free_product_is_untouched() {
    assert_eq!(expand_text("x*y*z"), "x*y*z");
  }
}

mod sums {
  use super::*;

  #[test]
  fn negated_group() {
    assert_eq!(expand_text("a - (b - c)"), "a - b + c");
  }

  #[test]
  fn like_terms_across_groups() {
    assert_eq!(expand_text("x*(y + 1) - x*y"), "x");
  }

  #[test]
  fn everything_cancels() {
    assert_eq!(expand_text("(a + b)*c - c*b - a*c"), "0");
  }
}

mod function_calls {
  use super::*;

  #[test]
  fn arguments_are_expanded() {
    assert_eq!(expand_text("sin((x + 1)^2)"), "sin(x^2 + 2*x + 1)");
  }

  #[test]
  fn calls_are_opaque_factors() {
    assert_eq!(expand_text("sin(x)*(sin(x) + 1)"), "sin(x)^2 + sin(x)");
  }

  #[test]
  fn equal_calls_collect() {
    assert_eq!(expand_text("f(a, b) + 2*f(a, b)"), "3*f(a, b)");
  }
}

#[test]
fn expansion_is_idempotent() {
  for input in [
    "(a + b)*(c + d)",
    "(x + 1)^3 - x",
    "sin((x + 1)^2)*(y + 2)",
    "(a - b)^2*(a + b)",
    "(a + b)^n*(a + b)^(2 - n)",
  ] {
    let once = expand_str(input, &ExpandOptions::default()).unwrap();
    let twice = expand(&once, &ExpandOptions::default()).unwrap();
    assert_eq!(once, twice, "expanding `{input}` twice");
  }
}
