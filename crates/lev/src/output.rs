//! Plain-text formatting helpers.

use owo_colors::OwoColorize;

/// Formats an evaluation result as `true` / `false`.
pub fn format_verdict(result: bool, use_colors: bool) -> String {
    let label = if result { "true" } else { "false" };

    if use_colors {
        if result {
            label.green().bold().to_string()
        } else {
            label.red().to_string()
        }
    } else {
        label.to_string()
    }
}

/// Formats a list of variable names for `check` output.
pub fn format_variables(names: &[&str], use_colors: bool) -> String {
    let label = "Variables:";
    let list = if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    };

    if use_colors {
        format!("{} {}", label.dimmed(), list.cyan())
    } else {
        format!("{label} {list}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_verdict_plain() {
        assert_eq!(format_verdict(true, false), "true");
        assert_eq!(format_verdict(false, false), "false");
    }

    #[test]
    fn test_format_verdict_colored_keeps_label() {
        let colored = format_verdict(true, true);
        assert!(colored.contains("true"));
        assert_ne!(colored, "true");
    }

    #[test]
    fn test_format_variables() {
        assert_eq!(format_variables(&["a", "b.c"], false), "Variables: a, b.c");
        assert_eq!(format_variables(&[], false), "Variables: (none)");
    }
}
