use serde::{Deserialize, Serialize};

/// Container the task runs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Container {
    /// Mesos containerizer, optionally with a filesystem image.
    Mesos {
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<Image>,
    },
    /// Docker containerizer.
    Docker {
        image: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        parameters: Vec<DockerParameter>,
    },
}

impl Default for Container {
    fn default() -> Self {
        Container::Mesos { image: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Image {
    Docker { name: String, tag: String },
    Appc { name: String, image_id: String },
}

/// Arbitrary `docker run` parameter, e.g. `("label", "team=infra")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerParameter {
    pub name: String,
    pub value: String,
}

impl DockerParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
