//! YAML export functionality

use std::io::Write;

use serde::Serialize;

use crate::error::{MyBudgetError, MyBudgetResult};

/// Serialize `value` to YAML
pub fn write_yaml<T: Serialize, W: Write>(value: &T, writer: W) -> MyBudgetResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| MyBudgetError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Money, UserId};

    #[test]
    fn test_budget_yaml_uses_api_field_names() {
        let budget = Budget::new(UserId::new(), "Rent", Money::from_cents(5000), Money::zero());

        let mut out = Vec::new();
        write_yaml(&budget, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("name: Rent"));
        assert!(text.contains("balance: 5000"));
        assert!(text.contains("isDeleted: false"));
    }
}
