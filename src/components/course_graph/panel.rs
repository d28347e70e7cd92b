//! Content of the course information panel.

use super::graph::{CourseGraph, NodeIdx};
use super::tables::CourseTables;

/// A course reachable in one hop from the selected course.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedCourse {
	/// The related course.
	pub node: NodeIdx,
	/// Its title.
	pub title: String,
}

/// Everything the info panel shows for a selected course. Rebuilt from
/// scratch on every selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoPanel {
	/// The selected course.
	pub node: NodeIdx,
	/// Its title.
	pub title: String,
	/// Description, if the table has one.
	pub description: Option<String>,
	/// Sections the course is taught to.
	pub sections: Vec<String>,
	/// Targets of the course's outgoing edges, in edge order.
	pub related: Vec<RelatedCourse>,
}

impl InfoPanel {
	/// Collects the panel content for `node`.
	pub fn build(graph: &CourseGraph, tables: &CourseTables, node: NodeIdx) -> Self {
		let course = graph.node(node);
		let related = graph
			.outgoing(node)
			.iter()
			.map(|&edge| {
				let target = graph.edge(edge).target;
				RelatedCourse {
					node: target,
					title: graph.node(target).title.clone(),
				}
			})
			.collect();

		Self {
			node,
			title: course.title.clone(),
			description: tables.description(&course.id).map(String::from),
			sections: tables
				.sections(&course.id)
				.map(<[String]>::to_vec)
				.unwrap_or_default(),
			related,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::components::course_graph::graph::tests::{edge, node};
	use crate::components::course_graph::types::GraphData;

	fn graph() -> CourseGraph {
		CourseGraph::new(&GraphData {
			nodes: vec![
				node("cs1", 0.0, 0.0, "Programming I"),
				node("cs2", 0.0, 0.0, "Programming II"),
				node("cs3", 0.0, 0.0, "Compilers"),
			],
			edges: vec![edge("a", "cs1", "cs2"), edge("b", "cs1", "cs3")],
		})
		.unwrap()
	}

	#[test]
	fn fills_every_field() {
		let graph = graph();
		let tables = CourseTables::default()
			.with_descriptions(HashMap::from([("cs1".into(), "Basics".into())]))
			.with_sections(HashMap::from([(
				"cs1".into(),
				vec!["Computer Science".into(), "Data Science".into()],
			)]));

		let panel = InfoPanel::build(&graph, &tables, NodeIdx(0));
		assert_eq!(panel.title, "Programming I");
		assert_eq!(panel.description.as_deref(), Some("Basics"));
		assert_eq!(panel.sections.len(), 2);
		let related: Vec<&str> = panel.related.iter().map(|r| r.title.as_str()).collect();
		assert_eq!(related, vec!["Programming II", "Compilers"]);
	}

	#[test]
	fn missing_table_entries_are_absent() {
		let panel = InfoPanel::build(&graph(), &CourseTables::default(), NodeIdx(2));
		assert_eq!(panel.description, None);
		assert!(panel.sections.is_empty());
		assert!(panel.related.is_empty());
	}
}
