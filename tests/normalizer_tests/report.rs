use super::*;

#[test]
fn json_report() {
  let input = "(a + b)^2";
  let result = expand_str(input, &ExpandOptions::default()).unwrap();
  insta::assert_snapshot!(
    expansion_report(input, &result).to_string(),
    @r#"{"input":"(a + b)^2","result":"a^2 + 2*a*b + b^2","terms":["a^2","2*a*b","b^2"]}"#
  );
}

#[test]
fn json_report_of_single_term() {
  let result = expand_str("x*x", &ExpandOptions::default()).unwrap();
  let report = expansion_report("x*x", &result);
  assert_eq!(report["result"], "x^2");
  assert_eq!(report["terms"].as_array().map(Vec::len), Some(1));
}
