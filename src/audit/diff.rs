//! Field-level diffs for audit update entries

use serde_json::Value;

/// Summarize the top-level fields that differ between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if before_val != after_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let truncated: String = s.chars().take(47).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Casa Norte", "is_closed": false});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_changed_field() {
        let before = json!({"name": "Casa Norte", "is_closed": false});
        let after = json!({"name": "Casa Norte", "is_closed": true});

        assert_eq!(
            generate_diff(&before, &after),
            Some("is_closed: false -> true".to_string())
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"sale_date": "2025-03-01"});
        let after = json!({"sale_amount": 130000});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("sale_date: \"2025-03-01\" -> (removed)"));
        assert!(diff.contains("sale_amount: (added) -> 130000"));
    }

    #[test]
    fn test_long_strings_truncated_on_char_boundary() {
        let long = "á".repeat(60);
        let diff = generate_diff(&json!({"d": ""}), &json!({"d": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(
            generate_diff(&json!(1), &json!(2)),
            Some("1 -> 2".to_string())
        );
    }
}
