//! Scene-state interpolation for full view transitions.
//!
//! Alongside the camera, a full transition fades instances in and out,
//! slides the section plane, and steps integer sliders. On arrival the
//! target snapshot is applied verbatim so the end state matches the saved
//! view exactly, whatever the interpolation did along the way.

use super::interpolation::InterpolationContext;
use crate::scene::{InstanceId, SceneSnapshot, SceneState};

/// Opacity ramp for one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityFade {
    /// Instance being faded.
    pub id: InstanceId,
    /// Effective opacity when the transition started.
    pub from: f32,
    /// `1.0` when fading in, `0.0` when fading out.
    pub to: f32,
}

/// How the cutplane moves during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CutplaneMotion {
    /// Neither end has a cutplane, or both share the same value.
    Unchanged,
    /// Both ends carry a position: lerp by eased progress.
    Slide {
        /// Start position.
        from: f32,
        /// End position.
        to: f32,
    },
    /// Only one end carries a position: hold until arrival, then snap.
    SnapOnArrival(Option<f32>),
}

/// Integer slider stepping from one value to another.
#[derive(Debug, Clone, PartialEq)]
pub struct SteppedValue {
    /// Slider key.
    pub key: String,
    /// Value at the start.
    pub from: i64,
    /// Value in the target snapshot.
    pub to: i64,
}

/// Plan for interpolating auxiliary scene state toward a target snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTransition {
    fades: Vec<OpacityFade>,
    cutplane: CutplaneMotion,
    steps: Vec<SteppedValue>,
    target: SceneSnapshot,
}

impl SceneTransition {
    /// Plan the transition from the live `current` state to `target`.
    ///
    /// Instances already at their target opacity are left untouched. An
    /// instance caught mid-fade by a retarget ramps from wherever it is.
    #[must_use]
    pub fn new(current: &SceneState, target: &SceneSnapshot) -> Self {
        let fades = current
            .visible
            .union(&target.visible_instance_ids)
            .filter_map(|id| {
                let from = current.opacity_of(id);
                let to = if target.visible_instance_ids.contains(id) {
                    1.0
                } else {
                    0.0
                };
                (from != to).then(|| OpacityFade {
                    id: id.clone(),
                    from,
                    to,
                })
            })
            .collect();

        let cutplane = match (current.cutplane, target.cutplane_position) {
            (Some(from), Some(to)) if from != to => {
                CutplaneMotion::Slide { from, to }
            }
            (Some(_), Some(_)) | (None, None) => CutplaneMotion::Unchanged,
            (_, end) => CutplaneMotion::SnapOnArrival(end),
        };

        let steps = target
            .sliders
            .iter()
            .filter_map(|(key, &to)| {
                let from = current.sliders.get(key).copied()?;
                (from != to).then(|| SteppedValue {
                    key: key.clone(),
                    from,
                    to,
                })
            })
            .collect();

        Self {
            fades,
            cutplane,
            steps,
            target: target.clone(),
        }
    }

    /// Instances whose opacity ramps during this transition.
    #[must_use]
    pub fn fades(&self) -> &[OpacityFade] {
        &self.fades
    }

    /// Cutplane behavior.
    #[must_use]
    pub fn cutplane(&self) -> CutplaneMotion {
        self.cutplane
    }

    /// Sliders that step during this transition.
    #[must_use]
    pub fn steps(&self) -> &[SteppedValue] {
        &self.steps
    }

    /// Target snapshot applied on arrival.
    #[must_use]
    pub fn target(&self) -> &SceneSnapshot {
        &self.target
    }

    /// Write the interpolated state for this tick into `scene`.
    pub fn apply(&self, ctx: &InterpolationContext, scene: &mut SceneState) {
        for fade in &self.fades {
            scene.set_opacity(&fade.id, ctx.lerp_f32(fade.from, fade.to));
        }
        if let CutplaneMotion::Slide { from, to } = self.cutplane {
            scene.cutplane = Some(ctx.lerp_f32(from, to));
        }
        for step in &self.steps {
            let _ = scene
                .sliders
                .insert(step.key.clone(), ctx.step_i64(step.from, step.to));
        }
    }

    /// Settle a plan abandoned before arrival: each fading instance snaps to
    /// whichever endpoint its current opacity is nearer to, so nothing is
    /// left half-transparent. Cutplane and sliders keep their last values.
    pub fn settle(&self, scene: &mut SceneState) {
        for fade in &self.fades {
            let now = scene.opacity_of(&fade.id);
            let end = if (now - fade.to).abs() <= (now - fade.from).abs() {
                fade.to
            } else {
                fade.from
            };
            if end >= 1.0 {
                scene.set_opacity(&fade.id, 1.0);
            } else {
                scene.hide(&fade.id);
            }
        }
    }

    /// Snapshot-apply the target on arrival.
    pub fn finish(&self, scene: &mut SceneState) {
        scene.apply_snapshot(&self.target);
    }
}
