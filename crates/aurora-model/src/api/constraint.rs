use serde::{Deserialize, Serialize};

/// Scheduling constraint attached to a task, keyed by a host attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub name: String,
    pub constraint: TaskConstraint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskConstraint {
    /// Host attribute must (or, when negated, must not) match one of `values`.
    Value { negated: bool, values: Vec<String> },
    /// At most `limit` instances may share a host attribute value.
    Limit { limit: i32 },
}
