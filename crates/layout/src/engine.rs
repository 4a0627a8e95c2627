//! The layout entity and its recompute cycle.
//!
//! A [`Layout`] owns one configuration and the snapshot of the children it
//! last arranged. The host calls [`Layout::update`] once per frame (or per
//! edit); the layout only does work when its children changed structurally,
//! its configuration was edited, or the host asks for a live preview.

use crate::applier::{self, ApplyReport};
use crate::generator;
use crate::host::SceneHost;
use crate::persist::{self, PersistError};
use crate::tracker::{self, ChildSnapshot};
use formation_core::{codec, CodecError, LayoutConfig, LayoutError};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where a layout is in its recompute cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeState {
    /// Children match the snapshot and the last cycle succeeded.
    Idle,
    /// A recompute is owed: children changed, the configuration was edited,
    /// or the last attempt failed.
    Dirty,
    /// Snapshot, generation and application in progress.
    Recomputing,
}

/// Result of one [`Layout::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Nothing changed; children were left alone.
    Skipped,
    /// Positions were regenerated and applied.
    Applied(ApplyReport),
}

/// A parent anchor whose children are arranged into a formation.
#[derive(Debug, Clone)]
pub struct Layout<N> {
    anchor: N,
    config: LayoutConfig,
    cull_excess: bool,
    snapshot: ChildSnapshot<N>,
    state: RecomputeState,
}

impl<N: Copy + Eq + Debug> Layout<N> {
    /// Create a layout for `anchor`. The first update always recomputes.
    pub fn new(anchor: N, config: LayoutConfig) -> Self {
        Self {
            anchor,
            config,
            cull_excess: false,
            snapshot: ChildSnapshot::default(),
            state: RecomputeState::Dirty,
        }
    }

    /// Builder: set the cull-excess policy.
    pub fn with_cull_excess(mut self, cull_excess: bool) -> Self {
        self.cull_excess = cull_excess;
        self
    }

    /// The node whose children are arranged.
    pub fn anchor(&self) -> N {
        self.anchor
    }

    /// Current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Whether children without a generated position are hidden.
    pub fn cull_excess(&self) -> bool {
        self.cull_excess
    }

    /// Current recompute state.
    pub fn state(&self) -> RecomputeState {
        self.state
    }

    /// Children captured by the last recompute.
    pub fn snapshot(&self) -> &ChildSnapshot<N> {
        &self.snapshot
    }

    /// Change the cull-excess policy; takes effect on the next update.
    pub fn set_cull_excess(&mut self, cull_excess: bool) {
        if self.cull_excess != cull_excess {
            self.cull_excess = cull_excess;
            self.mark_dirty();
        }
    }

    /// Edit the configuration in place; takes effect on the next update.
    pub fn configure(&mut self, edit: impl FnOnce(&mut LayoutConfig)) {
        edit(&mut self.config);
        self.mark_dirty();
    }

    /// Replace the configuration wholesale.
    pub fn replace_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.mark_dirty();
    }

    /// Force a recompute on the next update.
    pub fn mark_dirty(&mut self) {
        self.state = RecomputeState::Dirty;
    }

    /// Replace the configuration with one decoded from interchange text.
    ///
    /// On failure the current configuration is kept.
    pub fn load_config(&mut self, text: &str) -> Result<(), CodecError> {
        match codec::decode(text) {
            Ok(config) => {
                debug!(anchor = ?self.anchor, shape = %config.shape(), "loaded layout config");
                self.replace_config(config);
                Ok(())
            }
            Err(err) => {
                warn!(anchor = ?self.anchor, "rejected layout config: {err}");
                Err(err)
            }
        }
    }

    /// Save the configuration as a new timestamped file in `dir`.
    pub fn save_config(&self, dir: &Path) -> Result<PathBuf, PersistError> {
        persist::save_config(&self.config, dir)
    }

    /// Capture the children and lay them out immediately.
    pub fn init<H>(&mut self, host: &mut H) -> Result<ApplyReport, LayoutError>
    where
        H: SceneHost<Node = N>,
    {
        self.recompute(host)
    }

    /// Run one recompute cycle.
    ///
    /// Recomputes when the child set changed, when the layout is dirty, or
    /// unconditionally when `live_preview` is set. A generation error leaves
    /// every child untouched and the layout dirty, so the next call retries.
    pub fn update<H>(&mut self, host: &mut H, live_preview: bool) -> Result<Recompute, LayoutError>
    where
        H: SceneHost<Node = N>,
    {
        if tracker::has_changed(host, self.anchor, &self.snapshot) {
            self.mark_dirty();
        }

        if self.state == RecomputeState::Idle && !live_preview {
            return Ok(Recompute::Skipped);
        }

        self.recompute(host).map(Recompute::Applied)
    }

    fn recompute<H>(&mut self, host: &mut H) -> Result<ApplyReport, LayoutError>
    where
        H: SceneHost<Node = N>,
    {
        self.state = RecomputeState::Recomputing;
        self.snapshot = tracker::recapture(host, self.anchor);

        let positions = match generator::generate(&self.config, self.snapshot.len()) {
            Ok(positions) => positions,
            Err(err) => {
                warn!(anchor = ?self.anchor, "layout recompute skipped: {err}");
                self.state = RecomputeState::Dirty;
                return Err(err);
            }
        };

        let report = applier::apply(
            host,
            positions,
            &self.snapshot,
            self.config.reverse(),
            self.cull_excess,
        );
        debug!(
            anchor = ?self.anchor,
            shape = %self.config.shape(),
            children = self.snapshot.len(),
            placed = report.placed,
            culled = report.culled,
            "layout recomputed"
        );
        self.state = RecomputeState::Idle;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MemoryScene, NodeId};
    use formation_core::ShapeType;
    use glam::Vec3;

    fn setup(children: usize, config: LayoutConfig) -> (MemoryScene, Layout<NodeId>) {
        let mut scene = MemoryScene::new();
        let anchor = scene.spawn_root();
        scene.spawn_children(anchor, children);
        (scene, Layout::new(anchor, config))
    }

    #[test]
    fn first_update_recomputes_then_idles() {
        let (mut scene, mut layout) = setup(3, LayoutConfig::new(ShapeType::Line));
        assert!(matches!(
            layout.update(&mut scene, false),
            Ok(Recompute::Applied(_))
        ));
        assert_eq!(layout.state(), RecomputeState::Idle);
        assert_eq!(layout.update(&mut scene, false), Ok(Recompute::Skipped));
    }

    #[test]
    fn live_preview_always_recomputes() {
        let (mut scene, mut layout) = setup(2, LayoutConfig::new(ShapeType::Line));
        layout.init(&mut scene).expect("line never fails");
        assert!(matches!(
            layout.update(&mut scene, true),
            Ok(Recompute::Applied(_))
        ));
    }

    #[test]
    fn added_child_triggers_recompute() {
        let (mut scene, mut layout) = setup(2, LayoutConfig::new(ShapeType::Line));
        layout.init(&mut scene).expect("line never fails");
        let kid = scene.spawn_child(layout.anchor()).expect("anchor exists");
        let outcome = layout.update(&mut scene, false).expect("line never fails");
        assert!(matches!(outcome, Recompute::Applied(report) if report.placed == 3));
        assert_eq!(scene.local_position(kid), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn config_edit_triggers_recompute() {
        let (mut scene, mut layout) = setup(2, LayoutConfig::new(ShapeType::Line));
        layout.init(&mut scene).expect("line never fails");
        layout.configure(|config| config.set_margin_column(5.0));
        assert_eq!(layout.state(), RecomputeState::Dirty);
        layout.update(&mut scene, false).expect("line never fails");
        let second = layout.snapshot().as_slice()[1];
        assert_eq!(scene.local_position(second), Some(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn invalid_config_keeps_previous_positions() {
        let config = LayoutConfig::new(ShapeType::Box).with_columns(2);
        let (mut scene, mut layout) = setup(2, config);
        layout.init(&mut scene).expect("valid box");
        let second = layout.snapshot().as_slice()[1];
        let before = scene.local_position(second);

        layout.configure(|config| config.set_columns(0));
        let err = layout.update(&mut scene, false).unwrap_err();

        assert!(matches!(err, LayoutError::InvalidConfiguration { .. }));
        assert_eq!(scene.local_position(second), before);
        assert_eq!(layout.state(), RecomputeState::Dirty);

        layout.configure(|config| config.set_columns(1));
        assert!(matches!(
            layout.update(&mut scene, false),
            Ok(Recompute::Applied(_))
        ));
    }

    #[test]
    fn failed_load_keeps_config() {
        let config = LayoutConfig::new(ShapeType::Circle).with_radius(3.0);
        let (mut scene, mut layout) = setup(0, config.clone());
        layout.init(&mut scene).expect("circle never fails");

        let record = formation_core::encode(&LayoutConfig::new(ShapeType::Line))
            .expect("config encodes");
        let unknown_shape = record.replace("\"Line\"", "\"Hexagon\"");
        let missing_type = record.replace(",\"type\":\"Line\"", "");

        assert!(matches!(
            layout.load_config(&unknown_shape),
            Err(CodecError::UnknownShape(_))
        ));
        assert!(matches!(
            layout.load_config(&missing_type),
            Err(CodecError::Malformed(_))
        ));
        assert_eq!(layout.config(), &config);
        assert_eq!(layout.state(), RecomputeState::Idle);
    }

    #[test]
    fn successful_load_marks_dirty() {
        let (mut scene, mut layout) = setup(1, LayoutConfig::new(ShapeType::Line));
        layout.init(&mut scene).expect("line never fails");
        let text = formation_core::encode(&LayoutConfig::new(ShapeType::Cube))
            .expect("config encodes");
        layout.load_config(&text).expect("valid record");
        assert_eq!(layout.config().shape(), ShapeType::Cube);
        assert_eq!(layout.state(), RecomputeState::Dirty);
    }

    #[test]
    fn cull_policy_change_marks_dirty() {
        let (mut scene, mut layout) = setup(1, LayoutConfig::new(ShapeType::Line));
        layout.init(&mut scene).expect("line never fails");
        layout.set_cull_excess(false);
        assert_eq!(layout.state(), RecomputeState::Idle);
        layout.set_cull_excess(true);
        assert_eq!(layout.state(), RecomputeState::Dirty);
    }
}
