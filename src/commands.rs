use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use formation_core::{LayoutConfig, ShapeType};
use formation_layout::{read_config, save_config, Layout, MemoryScene, Recompute, SceneHost};
use serde::Serialize;
use tracing::debug;

/// Command-line edits applied on top of a loaded or default configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOverrides {
    pub shape: Option<ShapeType>,
    pub radius: Option<f32>,
    pub columns: Option<u16>,
    pub reverse: bool,
}

/// What `preview` reports for one child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildPreview {
    pub index: usize,
    pub position: [f32; 3],
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewReport {
    pub shape: String,
    pub placed: usize,
    pub culled: usize,
    /// Frames, including the initial layout, that regenerated positions.
    pub recomputes: usize,
    pub children: Vec<ChildPreview>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    pub children: usize,
    /// Host frames to run after the initial layout.
    pub frames: u32,
    pub cull_excess: bool,
    pub live_preview: bool,
}

/// Load the configuration at `path` (or the default one) and apply `overrides`.
pub fn resolve_config(path: Option<&Path>, overrides: &LayoutOverrides) -> Result<LayoutConfig> {
    let mut config = match path {
        Some(path) => read_config(path)
            .with_context(|| format!("failed to load layout config from {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    if let Some(shape) = overrides.shape {
        config.set_shape(shape);
    }
    if let Some(radius) = overrides.radius {
        config.set_radius(radius);
    }
    if let Some(columns) = overrides.columns {
        config.set_columns(columns);
    }
    if overrides.reverse {
        config.set_reverse(true);
    }
    Ok(config)
}

/// Lay out fresh children with `config`, step the host for `options.frames`
/// frames, and report where each child ends up.
pub fn preview(config: &LayoutConfig, options: PreviewOptions) -> Result<PreviewReport> {
    let mut scene = MemoryScene::new();
    let anchor = scene.spawn_root();
    let nodes = scene.spawn_children(anchor, options.children);

    let mut layout = Layout::new(anchor, config.clone()).with_cull_excess(options.cull_excess);
    let mut report = layout.init(&mut scene).with_context(|| {
        format!(
            "cannot lay out {} children as {}",
            options.children,
            config.shape()
        )
    })?;
    let mut recomputes = 1;

    for frame in 1..=options.frames {
        match layout.update(&mut scene, options.live_preview)? {
            Recompute::Applied(applied) => {
                report = applied;
                recomputes += 1;
            }
            Recompute::Skipped => debug!(frame, "layout unchanged"),
        }
    }

    let children = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| ChildPreview {
            index,
            position: scene.local_position(*node).unwrap_or_default().to_array(),
            visible: scene.is_visible(*node),
        })
        .collect();

    Ok(PreviewReport {
        shape: config.shape().to_string(),
        placed: report.placed,
        culled: report.culled,
        recomputes,
        children,
    })
}

/// Save `config` as a new timestamped file under `dir`.
pub fn save(config: &LayoutConfig, dir: &Path) -> Result<PathBuf> {
    save_config(config, dir)
        .with_context(|| format!("failed to save layout into {}", dir.display()))
}

/// Decode the file at `path`, failing with the decode error if it is invalid.
pub fn check(path: &Path) -> Result<LayoutConfig> {
    read_config(path).with_context(|| format!("{} is not a valid layout file", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_over_defaults() {
        let overrides = LayoutOverrides {
            shape: Some(ShapeType::Circle),
            radius: Some(4.0),
            columns: None,
            reverse: true,
        };
        let config = resolve_config(None, &overrides).expect("defaults resolve");
        assert_eq!(config.shape(), ShapeType::Circle);
        assert_eq!(config.radius(), 4.0);
        assert_eq!(config.columns(), 1);
        assert!(config.reverse());
    }

    fn options(children: usize, frames: u32, live_preview: bool) -> PreviewOptions {
        PreviewOptions {
            children,
            frames,
            cull_excess: true,
            live_preview,
        }
    }

    #[test]
    fn preview_reports_culled_children() {
        let config = LayoutConfig::new(ShapeType::Pyramid);
        let report = preview(&config, options(6, 0, false)).expect("pyramid lays out");
        assert_eq!(report.shape, "Pyramid");
        assert_eq!(report.placed, 4);
        assert_eq!(report.culled, 2);
        assert_eq!(report.children.iter().filter(|c| c.visible).count(), 4);
    }

    #[test]
    fn preview_of_invalid_box_fails() {
        let config = LayoutConfig::new(ShapeType::Box).with_columns(0);
        assert!(preview(&config, options(3, 0, false)).is_err());
    }

    #[test]
    fn live_preview_recomputes_every_frame() {
        let config = LayoutConfig::new(ShapeType::Circle).with_radius(2.0);
        let idle = preview(&config, options(4, 3, false)).expect("circle lays out");
        let live = preview(&config, options(4, 3, true)).expect("circle lays out");

        assert_eq!(idle.recomputes, 1);
        assert_eq!(live.recomputes, 4);
        assert_eq!(idle.children, live.children);
    }

    #[test]
    fn save_then_check() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = LayoutConfig::new(ShapeType::Dodecahedron).with_radius(2.5);
        let path = save(&config, dir.path()).expect("save succeeds");
        assert_eq!(check(&path).expect("saved file decodes"), config);
    }

    #[test]
    fn check_rejects_garbage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "not json").expect("write");
        assert!(check(&path).is_err());
    }
}
