//! Human-readable description of the expression language.

const USAGE: &str = r#"Syntax: (var1 = "25" or var2 = '35') AND x ~ 'pattern'

Comparisons:
  =          equal (for a list variable: the list contains the value)
  <>, !=     not equal
  >, >=      greater than, greater or equal
  <, <=      less than, less or equal
  ~          matches a regular expression anywhere in the value
  ^          contains the text
  !^         does not contain the text

Values must be quoted with single or double quotes. Inside a value, a
backslash escapes the surrounding quote and itself: "say \"hi\"".

Variables can also be compared with each other: var1 ^ var2 (var1 contains
the value of var2). A missing variable on the right reads as "undefined".

Comparisons against a missing variable on the left are always false.
Numbers compare numerically when both sides look numeric.

AND and OR are case-insensitive, have equal precedence and group to the
right; use parentheses to group explicitly.

Nesting is limited to 256 levels by default. Each parenthesis level and
each AND/OR link counts as one level, so a flat chain can join at most
256 comparisons.

Examples:
  test !^ 'python'                        test does not contain "python"
  test ^ 'python'                         test contains "python"
  test ~ '^abc' and test != 'abcd'        starts with "abc" but is not "abcd"
  (test > '25' or test < '10') or (test >= '15' and test <= '16')
"#;

/// Returns the help text describing the expression language.
pub fn usage() -> &'static str {
    USAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_every_operator() {
        for (symbol, _) in crate::expr::Operator::SYMBOLS {
            assert!(usage().contains(symbol), "missing {symbol}");
        }
    }

    #[test]
    fn test_usage_states_nesting_limit() {
        let limit = crate::expr::DEFAULT_MAX_DEPTH.to_string();
        assert!(usage().contains(&format!("limited to {limit} levels")));
        assert!(usage().contains(&format!("at most\n{limit} comparisons")));
    }

    #[test]
    fn test_usage_examples_parse() {
        for line in usage().lines().skip_while(|l| !l.starts_with("Examples:")).skip(1) {
            let example = line.trim().split("  ").next().unwrap_or_default();
            if example.is_empty() {
                continue;
            }
            assert!(
                crate::expr::parse(example).is_ok(),
                "example does not parse: {example}"
            );
        }
    }
}
