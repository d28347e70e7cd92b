//! Course prerequisite graph visualization component.
//!
//! Renders a precomputed course layout on an HTML canvas with:
//! - Pan and wheel zoom, with edges redrawn in small batches once a gesture
//!   ends and only for what the viewport shows
//! - Ring-by-ring highlighting of a selected course's prerequisite chain
//! - An info panel with the course description, sections and related courses
//! - Search-as-you-type over course titles
//!
//! Everything except [`component`], [`overlay`] and [`render`] is plain Rust
//! and runs under `cargo test` without a browser.
//!
//! # Example
//!
//! ```ignore
//! use prereq_graph::{CourseGraph, CourseGraphView, GraphData};
//!
//! let data: GraphData = serde_json::from_str(json)?;
//! let graph = CourseGraph::new(&data)?;
//!
//! view! { <CourseGraphView graph=graph /> }
//! ```

pub mod animation;
pub mod component;
pub mod config;
pub mod geometry;
pub mod graph;
pub mod highlight;
pub mod overlay;
pub mod panel;
pub mod render;
pub mod scale;
pub mod scene;
pub mod scheduler;
pub mod search;
pub mod state;
pub mod tables;
pub mod theme;
pub mod types;

pub use component::CourseGraphView;
pub use config::ViewConfig;
pub use graph::{CourseGraph, GraphError};
pub use tables::{CourseTables, TableError};
pub use theme::Theme;
pub use types::{EdgeKind, GraphData, GraphEdge, GraphNode};
