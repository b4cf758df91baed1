use super::*;

#[test]
fn quotient_is_unsupported() {
  let err = expand_str("x/y", &ExpandOptions::default()).unwrap_err();
  assert!(matches!(err, ExpandError::UnsupportedOperation(_)));
  assert_eq!(
    err.to_string(),
    "Unsupported operation: cannot expand quotient `x/y`"
  );
}

#[test]
fn nested_quotient_is_unsupported() {
  for input in ["(a + b)/2", "sin(x/y)", "x^(1/2)"] {
    assert!(
      matches!(
        expand_str(input, &ExpandOptions::default()),
        Err(ExpandError::UnsupportedOperation(_))
      ),
      "{input}"
    );
  }
}

#[test]
fn empty_input() {
  assert!(matches!(parse_expr(""), Err(ExpandError::EmptyInput)));
  assert!(matches!(parse_expr("  \n"), Err(ExpandError::EmptyInput)));
}

#[test]
fn syntax_errors() {
  for input in ["a +", "(a + b", "f(,)", "2x", "x ^"] {
    assert!(
      matches!(parse_expr(input), Err(ExpandError::ParseError(_))),
      "{input}"
    );
  }
}

#[test]
fn exponent_limit() {
  let err = expand_str("(a + b)^65", &ExpandOptions::default()).unwrap_err();
  assert!(matches!(
    err,
    ExpandError::ExponentTooLarge {
      exponent: 65,
      limit: 64
    }
  ));
  assert_eq!(err.to_string(), "Exponent 65 exceeds the limit of 64");

  let options = ExpandOptions::default()
    .commutative(false)
    .with_max_exponent(2);
  assert!(matches!(
    expand_str("(a + b)^3", &options),
    Err(ExpandError::ExponentTooLarge { .. })
  ));
}

#[test]
fn exponent_limit_only_applies_to_sums() {
  assert_eq!(expand_text("x^65"), "x^65");
}
