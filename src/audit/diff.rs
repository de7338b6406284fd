//! Field-level diffs for audit entries

use serde_json::Value;

/// Describe the top-level fields that changed between two JSON values
///
/// Returns `None` when nothing changed. Bookkeeping fields such as
/// `updatedAt` are skipped.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();

    for (key, before_val) in before_obj {
        if IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match after_obj.get(key) {
            Some(after_val) if after_val != before_val => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
        }
    }

    for (key, after_val) in after_obj {
        if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
            changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
        }
    }

    (!changes.is_empty()).then(|| changes.join(", "))
}

const IGNORED_FIELDS: &[&str] = &["updatedAt"];

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields() {
        let before = json!({"name": "Food", "balance": 100, "updatedAt": "a"});
        let after = json!({"name": "Groceries", "balance": 100, "updatedAt": "b"});

        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("name: \"Food\" -> \"Groceries\"")
        );
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Food"});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_arrays_are_summarized() {
        let before = json!({"expenses": []});
        let after = json!({"expenses": [{"amount": 1}, {"amount": 2}]});
        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("expenses: [0 items] -> [2 items]")
        );
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"old": true});
        let after = json!({"new": 1});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("old: true -> (removed)"));
        assert!(diff.contains("new: (added) -> 1"));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(
            generate_diff(&json!(1), &json!(2)).as_deref(),
            Some("1 -> 2")
        );
    }
}
