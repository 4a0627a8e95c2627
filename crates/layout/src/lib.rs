#![warn(missing_docs)]
//! Formation layout engine.
//!
//! Arranges the children of an anchor node into a line, grid, circle or one
//! of the fixed polyhedral formations, and keeps them arranged as the child
//! set changes.
//!
//! # Example
//!
//! ```rust
//! use formation_core::{LayoutConfig, ShapeType};
//! use formation_layout::{Layout, MemoryScene, SceneHost};
//!
//! let mut scene = MemoryScene::new();
//! let anchor = scene.spawn_root();
//! let children = scene.spawn_children(anchor, 8);
//!
//! let mut layout = Layout::new(anchor, LayoutConfig::new(ShapeType::Cube).with_radius(2.0))
//!     .with_cull_excess(true);
//! layout.update(&mut scene, false).expect("cube never fails");
//!
//! assert!(scene.is_visible(children[5]));
//! assert!(!scene.is_visible(children[6]));
//! ```

pub mod applier;
pub mod engine;
pub mod generator;
mod host;
pub mod persist;
mod scene;
pub mod tracker;

pub use applier::ApplyReport;
pub use engine::{Layout, Recompute, RecomputeState};
pub use generator::generate;
pub use host::SceneHost;
pub use persist::{read_config, save_config, PersistError};
pub use scene::{MemoryScene, NodeId};
pub use tracker::ChildSnapshot;
