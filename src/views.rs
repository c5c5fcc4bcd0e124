//! Saved views: the keyframes transitions and exports are built from.
//!
//! Views are captured and managed by the host application; this module only
//! defines their shape, the per-view transition duration rules, and JSON
//! import/export of an ordered list.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;
use crate::error::VistaError;
use crate::scene::SceneSnapshot;

/// Default per-view transition duration.
pub const DEFAULT_TRANSITION_MS: u32 = 2000;
/// Shortest allowed per-view transition duration.
pub const MIN_TRANSITION_MS: u32 = 1000;
/// Longest allowed per-view transition duration.
pub const MAX_TRANSITION_MS: u32 = 24000;

/// Identifier of a saved view.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ViewId(pub String);

impl ViewId {
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

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A named, saved camera pose plus optional scene-state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// Unique identifier.
    pub id: ViewId,
    /// Display name.
    pub name: String,
    /// Saved camera pose. Views without one are never animated to.
    #[serde(default)]
    pub camera: Option<CameraPose>,
    /// Transition duration into this view, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_duration_ms: Option<u32>,
    /// Saved scene state, if the view captured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneSnapshot>,
}

impl View {
    /// View with a camera pose and default duration.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        camera: CameraPose,
    ) -> Self {
        Self {
            id: ViewId::new(id),
            name: name.into(),
            camera: Some(camera),
            transition_duration_ms: None,
            scene: None,
        }
    }

    /// Set the transition duration (stored as given, clamped on read).
    #[must_use]
    pub fn with_duration_ms(mut self, ms: u32) -> Self {
        self.transition_duration_ms = Some(ms);
        self
    }

    /// Attach a scene snapshot.
    #[must_use]
    pub fn with_scene(mut self, scene: SceneSnapshot) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Whether this view can be used as a transition endpoint.
    #[must_use]
    pub fn is_animatable(&self) -> bool {
        self.camera.is_some()
    }

    /// Transition duration in milliseconds, defaulted and clamped to the
    /// valid range.
    #[must_use]
    pub fn transition_duration_ms(&self) -> u32 {
        clamp_duration_ms(
            self.transition_duration_ms.unwrap_or(DEFAULT_TRANSITION_MS),
        )
    }

    /// Transition duration into this view.
    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.transition_duration_ms()))
    }
}

/// Clamp a duration to `MIN_TRANSITION_MS..=MAX_TRANSITION_MS`.
#[must_use]
pub fn clamp_duration_ms(ms: u32) -> u32 {
    ms.clamp(MIN_TRANSITION_MS, MAX_TRANSITION_MS)
}

/// Ordered list of saved views, as exported/imported by the view registry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewList {
    views: Vec<View>,
}

impl ViewList {
    /// List from views in order.
    #[must_use]
    pub fn new(views: Vec<View>) -> Self {
        Self { views }
    }

    /// Views in order.
    #[must_use]
    pub fn as_slice(&self) -> &[View] {
        &self.views
    }

    /// Number of views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Look up a view by id.
    #[must_use]
    pub fn get(&self, id: &ViewId) -> Option<&View> {
        self.views.iter().find(|v| &v.id == id)
    }

    /// Append a view.
    pub fn push(&mut self, view: View) {
        self.views.push(view);
    }

    /// Store a user-adjusted transition duration on a view. The value is
    /// clamped before it is written. Returns the stored value, or `None` if
    /// no view has that id.
    pub fn set_transition_duration(
        &mut self,
        id: &ViewId,
        ms: u32,
    ) -> Option<u32> {
        let view = self.views.iter_mut().find(|v| &v.id == id)?;
        let clamped = clamp_duration_ms(ms);
        if clamped != ms {
            log::warn!(
                "transition duration {ms}ms for view {id} clamped to \
                 {clamped}ms"
            );
        }
        view.transition_duration_ms = Some(clamped);
        Some(clamped)
    }

    /// Move the view at `from` to position `to` (manual reordering).
    /// Out-of-range indices leave the list unchanged and return `false`.
    pub fn move_view(&mut self, from: usize, to: usize) -> bool {
        if from >= self.views.len() || to >= self.views.len() {
            return false;
        }
        let view = self.views.remove(from);
        self.views.insert(to, view);
        true
    }

    /// Parse a JSON array of views.
    pub fn from_json(json: &str) -> Result<Self, VistaError> {
        serde_json::from_str(json)
            .map_err(|e| VistaError::ViewsParse(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, VistaError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VistaError::ViewsParse(e.to_string()))
    }

    /// Load a view list from a JSON file.
    pub fn load(path: &Path) -> Result<Self, VistaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save the view list to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), VistaError> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl From<Vec<View>> for ViewList {
    fn from(views: Vec<View>) -> Self {
        Self::new(views)
    }
}
