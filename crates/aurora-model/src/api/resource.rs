use serde::{Deserialize, Serialize};

/// A single resource requested by a task.
///
/// A task carries at most one scalar resource of each kind; named ports may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    NumCpus(f64),
    RamMb(i64),
    DiskMb(i64),
    NumGpus(i64),
    NamedPort(String),
}

impl Resource {
    /// Returns `true` if both values are the same resource kind, ignoring the amount.
    pub fn same_kind(&self, other: &Resource) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Returns the port name for [`Resource::NamedPort`].
    pub fn port_name(&self) -> Option<&str> {
        match self {
            Resource::NamedPort(name) => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kind_ignores_amount() {
        assert!(Resource::NumCpus(1.0).same_kind(&Resource::NumCpus(4.0)));
        assert!(!Resource::RamMb(64).same_kind(&Resource::DiskMb(64)));
    }

    #[test]
    fn serde_externally_tagged() {
        let json = serde_json::to_string(&Resource::RamMb(512)).unwrap();
        assert_eq!(json, r#"{"ramMb":512}"#);
    }
}
