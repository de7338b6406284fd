//! Authorization policies
//!
//! A policy is a pure predicate over a principal and the resource it wants to
//! act on. Evaluation never fails: every input produces a [`Decision`].

use std::fmt;
use std::str::FromStr;

use crate::error::{MyBudgetError, MyBudgetResult};
use crate::models::Budget;

use super::principal::Principal;

/// Named authorization rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// The owner of a budget, or any admin, may view and change it
    CanViewBudget,
}

impl Policy {
    pub fn name(&self) -> &'static str {
        match self {
            Policy::CanViewBudget => "CanViewBudget",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = MyBudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CanViewBudget" => Ok(Policy::CanViewBudget),
            other => Err(MyBudgetError::Config(format!("Unknown policy: {}", other))),
        }
    }
}

/// Outcome of evaluating a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    fn from_bool(allowed: bool) -> Self {
        if allowed {
            Decision::Allowed
        } else {
            Decision::Denied
        }
    }
}

/// Decide whether `principal` may act on `resource` under `policy`
///
/// A missing resource is always denied.
pub fn evaluate(principal: &Principal, resource: Option<&Budget>, policy: Policy) -> Decision {
    let Some(budget) = resource else {
        return Decision::Denied;
    };

    match policy {
        Policy::CanViewBudget => {
            Decision::from_bool(budget.is_owned_by(principal.id) || principal.is_admin)
        }
    }
}

/// Evaluate a policy and turn a denial into [`MyBudgetError::Forbidden`]
pub fn authorize(
    principal: &Principal,
    resource: Option<&Budget>,
    policy: Policy,
) -> MyBudgetResult<()> {
    if evaluate(principal, resource, policy).is_allowed() {
        return Ok(());
    }

    let target = resource
        .map(|b| format!("budget {}", b.id))
        .unwrap_or_else(|| "a missing budget".to_string());
    tracing::warn!(principal = %principal.id, policy = %policy, "denied access to {}", target);

    Err(MyBudgetError::Forbidden(format!(
        "{} denied for {}",
        policy, target
    )))
}
