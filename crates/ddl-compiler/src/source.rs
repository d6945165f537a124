//! Specification source boundary
//!
//! Fetching a stored specification happens outside the compiler. This module
//! defines the [`SpecificationSource`] seam and the extraction rules for a
//! describe-style result row, where the specification may sit under one of
//! several column names.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::compiler::{CompileRequest, CompiledStatement, ObjectName, SpecCompiler};
use crate::error::{FetchError, SourceError};

/// Columns that may carry the specification, in priority order
pub const SPECIFICATION_COLUMNS: [&str; 8] = [
    "agent_spec",
    "AGENT_SPEC",
    "specification",
    "SPECIFICATION",
    "spec",
    "SPEC",
    "definition",
    "DEFINITION",
];

/// Columns that may carry the comment, in priority order
pub const COMMENT_COLUMNS: [&str; 2] = ["comment", "COMMENT"];

/// Used when a row has no specification column
pub const EMPTY_SPECIFICATION: &str = "{}";

/// Stored agent as returned by a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDetails {
    pub name: String,
    /// Specification JSON text
    pub specification: String,
    pub comment: String,
}

impl AgentDetails {
    /// Extract details from a describe result row
    #[must_use]
    pub fn from_describe_row(name: impl Into<String>, row: &Map<String, Value>) -> Self {
        let name = name.into();
        let specification = SPECIFICATION_COLUMNS
            .iter()
            .find_map(|column| specification_text(row.get(*column)?))
            .unwrap_or_else(|| {
                tracing::debug!(agent = %name, "describe row has no specification column");
                EMPTY_SPECIFICATION.to_string()
            });
        let comment = COMMENT_COLUMNS
            .iter()
            .find_map(|column| row.get(*column)?.as_str().filter(|s| !s.is_empty()))
            .unwrap_or_default()
            .to_string();

        Self {
            name,
            specification,
            comment,
        }
    }

    /// Extract details from a describe row held as a JSON value
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidRow`] if the value is not an object
    pub fn from_describe_value(name: impl Into<String>, row: &Value) -> Result<Self, SourceError> {
        let row = row.as_object().ok_or_else(|| {
            SourceError::InvalidRow(format!("expected an object, found {}", ddl_spec::value::json_kind(row)))
        })?;
        Ok(Self::from_describe_row(name, row))
    }

    /// Turn into a compile request for the given scopes
    #[must_use]
    pub fn into_request(self, database: impl Into<String>, schema: impl Into<String>) -> CompileRequest {
        CompileRequest::from_text(ObjectName::new(database, schema, self.name), self.specification)
            .with_comment(self.comment)
    }
}

fn specification_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Object(map) if !map.is_empty() => Some(value.to_string()),
        _ => None,
    }
}

/// Something that can look up a stored agent specification
pub trait SpecificationSource {
    /// Fetch the stored details for an agent
    ///
    /// # Errors
    /// Returns [`SourceError::NotFound`] if the agent does not exist
    fn fetch(&self, object: &ObjectName) -> Result<AgentDetails, SourceError>;
}

/// Source backed by describe rows held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: HashMap<ObjectName, Map<String, Value>>,
}

impl InMemorySource {
    /// Create empty source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a describe row for an agent
    pub fn insert_row(&mut self, object: ObjectName, row: Map<String, Value>) {
        self.rows.insert(object, row);
    }

    /// Store a specification and comment for an agent
    pub fn insert(&mut self, object: ObjectName, specification: impl Into<String>, comment: impl Into<String>) {
        let mut row = Map::new();
        row.insert("agent_spec".to_string(), Value::String(specification.into()));
        row.insert("comment".to_string(), Value::String(comment.into()));
        self.insert_row(object, row);
    }

    /// Number of stored agents
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl SpecificationSource for InMemorySource {
    fn fetch(&self, object: &ObjectName) -> Result<AgentDetails, SourceError> {
        self.rows
            .get(object)
            .map(|row| AgentDetails::from_describe_row(object.name.clone(), row))
            .ok_or_else(|| SourceError::not_found(object.to_string()))
    }
}

impl SpecCompiler {
    /// Fetch an agent from a source and compile it
    ///
    /// The compiler is not invoked when the source has no such agent.
    ///
    /// # Errors
    /// Returns error if the fetch fails or the specification cannot be compiled
    pub fn compile_from_source<S>(&self, source: &S, object: &ObjectName) -> Result<CompiledStatement, FetchError>
    where
        S: SpecificationSource + ?Sized,
    {
        let details = source.fetch(object)?;
        let request = details.into_request(object.database.clone(), object.schema.clone());
        Ok(self.compile(&request)?)
    }
}
