use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a job within the scheduler: `role/environment/name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobKey {
    pub role: String,
    pub environment: String,
    pub name: String,
}

impl JobKey {
    pub fn new<R, E, N>(role: R, environment: E, name: N) -> Self
    where
        R: Into<String>,
        E: Into<String>,
        N: Into<String>,
    {
        Self {
            role: role.into(),
            environment: environment.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.role, self.environment, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_parts() {
        let key = JobKey::new("www-data", "prod", "hello");
        assert_eq!(key.to_string(), "www-data/prod/hello");
    }
}
