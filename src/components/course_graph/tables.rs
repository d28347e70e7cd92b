//! Course description and section tables.
//!
//! Both tables arrive as tab-separated text with a header row and are keyed by
//! the course's node id. Lookups for unmapped courses return nothing; the info
//! panel renders those fields as absent.

use std::collections::HashMap;

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

const ID_COLUMN: &str = "SubjectID";
const DESCRIPTION_COLUMN: &str = "Summary_EN";
const SECTIONS_COLUMN: &str = "sections";

/// Errors raised while reading a tab-separated table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
	/// The text has no header row.
	#[error("table is empty")]
	Empty,

	/// A required column is missing from the header row.
	#[error("missing column: {column}")]
	MissingColumn {
		/// Name of the missing column.
		column: &'static str,
	},

	/// The reader rejected a record.
	#[error("malformed table: {0}")]
	Malformed(String),
}

impl From<csv::Error> for TableError {
	fn from(err: csv::Error) -> Self {
		TableError::Malformed(err.to_string())
	}
}

/// Rows of a TSV table projected onto two named columns. Fields may be
/// quoted; rows too short to reach either column or with an empty id are
/// skipped.
fn key_value_rows(
	text: &str,
	key: &'static str,
	value: &'static str,
) -> Result<Vec<(String, String)>, TableError> {
	if text.trim().is_empty() {
		return Err(TableError::Empty);
	}

	let mut reader = ReaderBuilder::new()
		.delimiter(b'\t')
		.has_headers(true)
		.flexible(true)
		.trim(Trim::Headers)
		.from_reader(text.as_bytes());

	let headers = reader.headers()?.clone();
	let column = |name: &'static str| {
		headers
			.iter()
			.position(|h| h == name)
			.ok_or(TableError::MissingColumn { column: name })
	};
	let (key_col, value_col) = (column(key)?, column(value)?);

	let mut rows = Vec::new();
	for record in reader.records() {
		let record = record?;
		let (Some(id), Some(value)) = (record.get(key_col), record.get(value_col)) else {
			continue;
		};
		let id = id.trim();
		if !id.is_empty() {
			rows.push((id.to_string(), value.to_string()));
		}
	}
	Ok(rows)
}

/// Per-course descriptions and section assignments.
#[derive(Clone, Debug, Default)]
pub struct CourseTables {
	descriptions: HashMap<String, String>,
	sections: HashMap<String, Vec<String>>,
}

impl CourseTables {
	/// Reads the description table (`SubjectID`, `Summary_EN`).
	pub fn parse_descriptions(text: &str) -> Result<HashMap<String, String>, TableError> {
		Ok(key_value_rows(text, ID_COLUMN, DESCRIPTION_COLUMN)?
			.into_iter()
			.collect())
	}

	/// Reads the sections table (`SubjectID`, `sections`); section names are
	/// separated by `|`.
	pub fn parse_sections(text: &str) -> Result<HashMap<String, Vec<String>>, TableError> {
		Ok(key_value_rows(text, ID_COLUMN, SECTIONS_COLUMN)?
			.into_iter()
			.map(|(id, sections)| {
				let names = sections
					.split('|')
					.map(str::trim)
					.filter(|s| !s.is_empty())
					.map(String::from)
					.collect();
				(id, names)
			})
			.collect())
	}

	/// Replaces the description table.
	pub fn with_descriptions(mut self, descriptions: HashMap<String, String>) -> Self {
		self.descriptions = descriptions;
		self
	}

	/// Replaces the sections table.
	pub fn with_sections(mut self, sections: HashMap<String, Vec<String>>) -> Self {
		self.sections = sections;
		self
	}

	/// Description of course `id`.
	pub fn description(&self, id: &str) -> Option<&str> {
		self.descriptions.get(id).map(String::as_str)
	}

	/// Sections of course `id`.
	pub fn sections(&self, id: &str) -> Option<&[String]> {
		self.sections.get(id).map(Vec::as_slice)
	}
}
