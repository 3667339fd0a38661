//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    parse_or_default(var, std::env::var(var).ok(), default)
}

/// Read an environment variable, treating blank values as unset.
#[must_use]
pub fn env_non_empty(var: &str) -> Option<String> {
    non_empty(std::env::var(var).ok())
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_or_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_value() {
        let result: u32 = parse_or_default("X", Some("42".to_owned()), 10);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let result: f32 = parse_or_default("X", Some(" 0.7 ".to_owned()), 0.2);
        assert!((result - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_invalid_value() {
        let result: u32 = parse_or_default("X", Some("banana".to_owned()), 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_parse_missing_var() {
        let result: u64 = parse_or_default("X", None, 120);
        assert_eq!(result, 120);
    }

    #[test]
    fn test_parse_empty_value() {
        let result: u32 = parse_or_default("X", Some(String::new()), 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_non_empty_filters_blank() {
        assert_eq!(non_empty(Some("   ".to_owned())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" key ".to_owned())), Some("key".to_owned()));
    }

    #[test]
    fn test_env_non_empty_missing_var() {
        assert_eq!(env_non_empty("CURRICULA_TEST_SURELY_UNSET_VAR_48213"), None);
    }
}
