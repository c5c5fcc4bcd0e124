use std::collections::{BTreeMap, BTreeSet};

use super::snapshot::{InstanceId, SceneSnapshot};

/// Live auxiliary scene state driven alongside the camera.
///
/// An instance's effective opacity is `0.0` when it is not in `visible`,
/// otherwise its `opacity` override, otherwise `1.0`. Overrides only exist
/// while a fade is in flight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneState {
    /// Instances currently drawn (including ones mid-fade).
    pub visible: BTreeSet<InstanceId>,
    /// Opacity overrides for instances that are fading.
    pub opacity: BTreeMap<InstanceId, f32>,
    /// Section-plane position, `None` when the cutplane is off.
    pub cutplane: Option<f32>,
    /// Integer slider parameters.
    pub sliders: BTreeMap<String, i64>,
    /// Discrete settings.
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl SceneState {
    /// State that exactly matches a saved snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &SceneSnapshot) -> Self {
        let mut state = Self::default();
        state.apply_snapshot(snapshot);
        state
    }

    /// Overwrite everything with the snapshot's values, dropping any
    /// in-flight opacity overrides.
    pub fn apply_snapshot(&mut self, snapshot: &SceneSnapshot) {
        self.visible.clone_from(&snapshot.visible_instance_ids);
        self.opacity.clear();
        self.cutplane = snapshot.cutplane_position;
        self.sliders.clone_from(&snapshot.sliders);
        self.settings.clone_from(&snapshot.settings);
    }

    /// Effective opacity of an instance.
    #[must_use]
    pub fn opacity_of(&self, id: &InstanceId) -> f32 {
        if !self.visible.contains(id) {
            return 0.0;
        }
        self.opacity.get(id).copied().unwrap_or(1.0)
    }

    /// Set an instance's effective opacity. `1.0` clears the override, any
    /// other value keeps the instance in the visible set so it keeps
    /// drawing while it fades.
    pub fn set_opacity(&mut self, id: &InstanceId, value: f32) {
        if !self.visible.contains(id) {
            let _ = self.visible.insert(id.clone());
        }
        if value >= 1.0 {
            let _ = self.opacity.remove(id);
        } else {
            let _ = self.opacity.insert(id.clone(), value.max(0.0));
        }
    }

    /// Stop drawing an instance, dropping any opacity override.
    pub fn hide(&mut self, id: &InstanceId) {
        let _ = self.visible.remove(id);
        let _ = self.opacity.remove(id);
    }

    /// Capture the state as a snapshot. Instances mid-fade count as visible
    /// when their opacity is at least one half.
    #[must_use]
    pub fn to_snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            visible_instance_ids: self
                .visible
                .iter()
                .filter(|id| self.opacity_of(id) >= 0.5)
                .cloned()
                .collect(),
            cutplane_position: self.cutplane,
            sliders: self.sliders.clone(),
            settings: self.settings.clone(),
        }
    }
}
