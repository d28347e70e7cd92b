//! UI components.

pub mod course_graph;
