use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a placed geometry instance (polyhedron, grid, arrow set).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InstanceId(pub String);

impl InstanceId {
    /// Identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Scene state saved alongside a view.
///
/// Ordered collections keep serialization and export output byte-stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneSnapshot {
    /// Instances visible in the saved view.
    pub visible_instance_ids: BTreeSet<InstanceId>,
    /// Section-plane position, if the cutplane was enabled.
    pub cutplane_position: Option<f32>,
    /// Integer slider parameters (e.g. geodesic frequency). Stepped during
    /// transitions.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sliders: BTreeMap<String, i64>,
    /// Any other discrete settings, applied verbatim on arrival.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl SceneSnapshot {
    /// Snapshot with the given visible instances and nothing else.
    pub fn with_visible<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<InstanceId>,
    {
        Self {
            visible_instance_ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the cutplane position.
    #[must_use]
    pub fn with_cutplane(mut self, position: f32) -> Self {
        self.cutplane_position = Some(position);
        self
    }

    /// Set an integer slider value.
    #[must_use]
    pub fn with_slider(mut self, key: impl Into<String>, value: i64) -> Self {
        let _ = self.sliders.insert(key.into(), value);
        self
    }

    /// Set a discrete setting.
    #[must_use]
    pub fn with_setting(
        mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        let _ = self.settings.insert(key.into(), value);
        self
    }
}
