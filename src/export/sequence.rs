//! Frame sequence construction for animated export.
//!
//! Each keyframe owns one block of hold frames. Between consecutive
//! keyframes come `N` interpolated frames at `t = k / N`, `k = 1..=N`; the
//! last of those lands exactly on the destination keyframe. Frames are laid
//! out back to back, so `begin_ms` is the running sum of durations.

use crate::animation::{InterpolationContext, SceneTransition};
use crate::camera::{interpolate_pose, CameraPose};
use crate::error::VistaError;
use crate::options::Options;
use crate::scene::SceneState;
use crate::views::View;

use super::frame::{ExportFrame, FrameKind};

/// A posed view together with the exact scene state shown at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe<'a> {
    /// Source view.
    pub view: &'a View,
    /// Saved camera pose.
    pub pose: CameraPose,
    /// Saved scene state, or the previous keyframe's when the view has no
    /// snapshot.
    pub scene: SceneState,
}

/// Resolve the posed views in `views`, in order. Views without a snapshot
/// inherit the scene state of the keyframe before them, starting from
/// `base`.
#[must_use]
pub fn keyframes<'a>(
    views: &'a [View],
    base: &SceneState,
) -> Vec<Keyframe<'a>> {
    let mut scene = base.clone();
    views
        .iter()
        .filter_map(|view| {
            let pose = view.camera?;
            if let Some(snapshot) = &view.scene {
                scene = SceneState::from_snapshot(snapshot);
            }
            Some(Keyframe {
                view,
                pose,
                scene: scene.clone(),
            })
        })
        .collect()
}

/// Accumulates frames while tracking the running time offset.
struct SequenceBuilder {
    frames: Vec<ExportFrame>,
    clock_ms: u64,
}

impl SequenceBuilder {
    fn push(
        &mut self,
        kind: FrameKind,
        keyframe: usize,
        key: &Keyframe<'_>,
        pose: CameraPose,
        scene: SceneState,
        duration_ms: u64,
    ) {
        self.frames.push(ExportFrame {
            index: self.frames.len(),
            kind,
            keyframe,
            view: key.view.id.clone(),
            pose,
            scene,
            begin_ms: self.clock_ms,
            duration_ms,
        });
        self.clock_ms += duration_ms;
    }

    fn hold(
        &mut self,
        index: usize,
        key: &Keyframe<'_>,
        count: u32,
        frame_ms: u64,
    ) {
        for _ in 0..count {
            self.push(
                FrameKind::Hold,
                index,
                key,
                key.pose,
                key.scene.clone(),
                frame_ms,
            );
        }
    }
}

/// Build the full timed frame sequence for `views`.
///
/// No posed views yields no frames; a single posed view yields one still
/// frame covering the whole hold block.
#[allow(clippy::cast_precision_loss)]
pub fn build_sequence(
    views: &[View],
    base: &SceneState,
    options: &Options,
) -> Result<Vec<ExportFrame>, VistaError> {
    let export = &options.export;
    let keys = keyframes(views, base);
    let hold_ms = u64::from(export.hold_frame_ms);

    let mut builder = SequenceBuilder {
        frames: Vec::new(),
        clock_ms: 0,
    };

    match keys.as_slice() {
        [] => return Ok(Vec::new()),
        [only] => {
            let still_ms = hold_ms * u64::from(export.hold_frames.max(1));
            builder.push(
                FrameKind::Hold,
                0,
                only,
                only.pose,
                only.scene.clone(),
                still_ms,
            );
            return Ok(builder.frames);
        }
        _ => {}
    }

    let steps = export.frames_per_transition.max(1);
    for (i, key) in keys.iter().enumerate() {
        builder.hold(i, key, export.hold_frames, hold_ms);
        let Some(next) = keys.get(i + 1) else {
            break;
        };

        let frame_ms =
            u64::from(options.transition.duration_ms_for(next.view) / steps);
        let target = next
            .view
            .scene
            .clone()
            .unwrap_or_else(|| next.scene.to_snapshot());
        let plan = SceneTransition::new(&key.scene, &target);

        for k in 1..=steps {
            if k == steps {
                builder.push(
                    FrameKind::Interpolated,
                    i + 1,
                    next,
                    next.pose,
                    next.scene.clone(),
                    frame_ms,
                );
                continue;
            }
            let raw_t = k as f32 / steps as f32;
            let ctx =
                InterpolationContext::new(raw_t, export.easing.evaluate(raw_t));
            let pose = interpolate_pose(&key.pose, &next.pose, ctx.eased_t)?;
            let mut scene = key.scene.clone();
            plan.apply(&ctx, &mut scene);
            builder.push(
                FrameKind::Interpolated,
                i + 1,
                next,
                pose,
                scene,
                frame_ms,
            );
        }
    }

    log::debug!(
        "built {} export frames over {} keyframes ({} ms)",
        builder.frames.len(),
        keys.len(),
        builder.clock_ms
    );
    Ok(builder.frames)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::SceneSnapshot;

    fn view(id: &str, position: Vec3, zoom: f32) -> View {
        View::new(id, id, CameraPose::new(position, zoom))
            .with_duration_ms(2000)
    }

    fn ab() -> Vec<View> {
        vec![
            view("a", Vec3::new(0.0, 0.0, 10.0), 1.0),
            view("b", Vec3::new(10.0, 0.0, 0.0), 2.0),
        ]
    }

    #[test]
    fn two_views_make_sixteen_frames() {
        let frames =
            build_sequence(&ab(), &SceneState::default(), &Options::default())
                .unwrap();
        assert_eq!(frames.len(), 16);

        let kinds: Vec<bool> =
            frames.iter().map(ExportFrame::is_hold).collect();
        assert!(kinds[..3].iter().all(|&h| h));
        assert!(kinds[3..13].iter().all(|&h| !h));
        assert!(kinds[13..].iter().all(|&h| h));

        assert_eq!(frames[3].begin_ms, 600);
        assert_eq!(frames[3].duration_ms, 200);
        assert_eq!(frames[12].pose, ab()[1].camera.unwrap());
        assert_eq!(frames[15].end_ms(), 600 + 2000 + 600);

        // Timeline has no gaps
        for pair in frames.windows(2) {
            assert_eq!(pair[0].end_ms(), pair[1].begin_ms);
        }
    }

    #[test]
    fn shared_keyframe_holds_once() {
        let mut views = ab();
        views.push(view("c", Vec3::new(0.0, 10.0, 1.0), 1.0));
        let options = Options::default();
        let frames =
            build_sequence(&views, &SceneState::default(), &options).unwrap();
        // hold * K + N * (K - 1)
        assert_eq!(frames.len(), 3 * 3 + 10 * 2);
        let b_holds = frames
            .iter()
            .filter(|f| f.is_hold() && f.view.as_str() == "b")
            .count();
        assert_eq!(b_holds, 3);
    }

    #[test]
    fn interpolated_frames_follow_the_arc() {
        let frames =
            build_sequence(&ab(), &SceneState::default(), &Options::default())
                .unwrap();
        let mid = &frames[3 + 4]; // k = 5, t = 0.5
        assert!((mid.pose.zoom - 1.5).abs() < 1e-6);
        assert!((mid.pose.radius() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn empty_and_single_inputs() {
        let options = Options::default();
        let base = SceneState::default();
        assert!(build_sequence(&[], &base, &options).unwrap().is_empty());

        let one = vec![view("a", Vec3::Z, 1.0)];
        let frames = build_sequence(&one, &base, &options).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].duration_ms, 600);
        assert!(frames[0].is_hold());

        let mut pose_less = ab();
        pose_less[1].camera = None;
        let frames = build_sequence(&pose_less, &base, &options).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn scene_state_carries_and_fades() {
        let mut views = ab();
        views[0] = views[0]
            .clone()
            .with_scene(SceneSnapshot::with_visible(["tet"]));
        views[1] = views[1]
            .clone()
            .with_scene(SceneSnapshot::with_visible(["cube"]));
        let frames =
            build_sequence(&views, &SceneState::default(), &Options::default())
                .unwrap();

        let mid = &frames[7];
        assert_eq!(mid.scene.opacity_of(&"tet".into()), 0.5);
        assert_eq!(mid.scene.opacity_of(&"cube".into()), 0.5);
        assert_eq!(
            frames[15].scene,
            SceneState::from_snapshot(&SceneSnapshot::with_visible(["cube"]))
        );
    }

    #[test]
    fn views_without_snapshot_inherit_scene() {
        let base =
            SceneState::from_snapshot(&SceneSnapshot::with_visible(["x"]));
        let views = ab();
        let keys = keyframes(&views, &base);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].scene, base);
    }

    #[test]
    fn sequence_is_deterministic() {
        let options = Options::default();
        let base = SceneState::default();
        let first = build_sequence(&ab(), &base, &options).unwrap();
        let second = build_sequence(&ab(), &base, &options).unwrap();
        assert_eq!(first, second);
    }
}
