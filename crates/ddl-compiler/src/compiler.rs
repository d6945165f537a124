//! Statement assembly
//!
//! [`SpecCompiler`] turns a [`CompileRequest`] into the full
//! `CREATE OR REPLACE AGENT` statement. Callers that expect text rather than
//! a `Result` use [`SpecCompiler::compile_to_text`] or the free [`compile`]
//! function, which return the single-line diagnostic on failure.

use std::fmt;

use ddl_spec::AgentSpecification;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CompilerConfig;
use crate::error::CompileResult;
use crate::render::render_body;
use crate::text::escape_sql_literal;

/// Opens and closes the embedded configuration block
pub const BLOCK_DELIMITER: &str = "$$";

/// Fully qualified agent name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectName {
    /// Outer scope
    pub database: String,
    /// Inner scope
    pub schema: String,
    /// Agent name
    pub name: String,
}

impl ObjectName {
    /// Create object name
    pub fn new(database: impl Into<String>, schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.database, self.schema, self.name)
    }
}

/// Specification as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum SpecificationInput {
    /// Raw JSON text, parsed during compilation
    Text(String),
    /// Already-parsed document
    Document(Value),
}

/// One compilation job
#[derive(Debug, Clone, PartialEq)]
pub struct CompileRequest {
    pub object: ObjectName,
    /// Written as `COMMENT = '...'` when non-empty
    pub comment: String,
    pub specification: SpecificationInput,
}

impl CompileRequest {
    /// Request for raw specification text
    pub fn from_text(object: ObjectName, text: impl Into<String>) -> Self {
        Self {
            object,
            comment: String::new(),
            specification: SpecificationInput::Text(text.into()),
        }
    }

    /// Request for an already-parsed document
    pub fn from_document(object: ObjectName, document: Value) -> Self {
        Self {
            object,
            comment: String::new(),
            specification: SpecificationInput::Document(document),
        }
    }

    /// With comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    fn parse(&self) -> CompileResult<AgentSpecification> {
        let spec = match &self.specification {
            SpecificationInput::Text(text) => AgentSpecification::parse(text)?,
            SpecificationInput::Document(document) => AgentSpecification::from_value(document)?,
        };
        Ok(spec)
    }
}

/// Generated statement text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledStatement {
    text: String,
}

impl CompiledStatement {
    /// Get statement text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take statement text
    #[inline]
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for CompiledStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Specification compiler
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecCompiler {
    config: CompilerConfig,
}

impl SpecCompiler {
    /// Create compiler with configuration
    #[inline]
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile one request
    ///
    /// # Errors
    /// Returns error if the specification is malformed or a value cannot be
    /// embedded in a quoted scalar; no partial statement is produced
    pub fn compile(&self, request: &CompileRequest) -> CompileResult<CompiledStatement> {
        let spec = request.parse()?;
        self.compile_specification(&request.object, &request.comment, &spec)
    }

    /// Compile an already-lowered specification
    ///
    /// # Errors
    /// Returns error if a value cannot be embedded in a quoted scalar
    pub fn compile_specification(
        &self,
        object: &ObjectName,
        comment: &str,
        spec: &AgentSpecification,
    ) -> CompileResult<CompiledStatement> {
        let body = render_body(spec, &self.config)?;
        tracing::debug!(%object, body_lines = body.len(), "compiled agent specification");

        let mut parts = Vec::with_capacity(6);
        parts.push(format!("CREATE OR REPLACE AGENT {object}"));
        if !comment.is_empty() {
            parts.push(format!("COMMENT = '{}'", escape_sql_literal(comment)));
        }
        parts.push("FROM SPECIFICATION".to_string());
        parts.push(BLOCK_DELIMITER.to_string());
        parts.push(body.join("\n"));
        parts.push(format!("{BLOCK_DELIMITER};"));

        Ok(CompiledStatement {
            text: parts.join("\n"),
        })
    }

    /// Compile one request, returning the diagnostic line on failure
    #[must_use]
    pub fn compile_to_text(&self, request: &CompileRequest) -> String {
        match self.compile(request) {
            Ok(statement) => statement.into_text(),
            Err(err) => {
                tracing::warn!(object = %request.object, error = %err, "specification compile failed");
                err.diagnostic()
            }
        }
    }

    /// Compile requests in parallel; results keep input order
    #[must_use]
    pub fn compile_batch(&self, requests: &[CompileRequest]) -> Vec<CompileResult<CompiledStatement>> {
        requests.par_iter().map(|request| self.compile(request)).collect()
    }
}

/// Compile specification text with default configuration
///
/// Returns the statement, or a single `-- Error: ...` line if the
/// specification cannot be compiled.
#[must_use]
pub fn compile(object_name: &str, outer_scope: &str, inner_scope: &str, spec_text: &str, comment: &str) -> String {
    let request = CompileRequest::from_text(ObjectName::new(outer_scope, inner_scope, object_name), spec_text)
        .with_comment(comment);
    SpecCompiler::default().compile_to_text(&request)
}

/// Compile requests in parallel with default configuration
#[must_use]
pub fn compile_batch(requests: &[CompileRequest]) -> Vec<CompileResult<CompiledStatement>> {
    SpecCompiler::default().compile_batch(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object() -> ObjectName {
        ObjectName::new("DB", "SCH", "AGENT1")
    }

    #[test]
    fn object_name_is_dotted() {
        assert_eq!(object().to_string(), "DB.SCH.AGENT1");
    }

    #[test]
    fn empty_document_has_empty_block() {
        let text = compile("AGENT1", "DB", "SCH", "{}", "");
        assert_eq!(
            text,
            "CREATE OR REPLACE AGENT DB.SCH.AGENT1\nFROM SPECIFICATION\n$$\n\n$$;"
        );
    }

    #[test]
    fn comment_written_after_header() {
        let text = compile("AGENT1", "DB", "SCH", "{}", "Sales helper");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "COMMENT = 'Sales helper'");
        assert_eq!(lines[2], "FROM SPECIFICATION");
    }

    #[test]
    fn document_and_text_inputs_agree() {
        let document = json!({"models": {"orchestration": "claude-4-sonnet"}});
        let compiler = SpecCompiler::default();
        let from_document = compiler
            .compile(&CompileRequest::from_document(object(), document.clone()))
            .unwrap();
        let from_text = compiler
            .compile(&CompileRequest::from_text(object(), document.to_string()))
            .unwrap();
        assert_eq!(from_document, from_text);
    }

    #[test]
    fn malformed_text_returns_diagnostic_only() {
        let text = compile("AGENT1", "DB", "SCH", "{not json", "");
        assert!(text.starts_with("-- Error: Invalid JSON specification - "));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn non_object_root_is_malformed() {
        let err = SpecCompiler::default()
            .compile(&CompileRequest::from_text(object(), "[1, 2]"))
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn unsafe_scalar_rejected_unless_allowed() {
        let request = CompileRequest::from_text(object(), r#"{"profile": {"display_name": "The \"Best\" Agent"}}"#);

        let strict = SpecCompiler::default().compile(&request);
        assert!(matches!(strict, Err(CompileError::UnsupportedScalar { .. })));

        let relaxed = SpecCompiler::new(CompilerConfig::default().with_unsafe_scalars(true))
            .compile(&request)
            .unwrap();
        assert!(relaxed.text().contains("  display_name: \"The \"Best\" Agent\""));
    }

    #[test]
    fn batch_keeps_input_order() {
        let requests: Vec<CompileRequest> = (0..16)
            .map(|i| {
                CompileRequest::from_text(
                    ObjectName::new("DB", "SCH", format!("AGENT{i}")),
                    if i % 5 == 0 { "oops".to_string() } else { "{}".to_string() },
                )
            })
            .collect();

        let results = compile_batch(&requests);
        assert_eq!(results.len(), 16);
        for (i, result) in results.iter().enumerate() {
            if i % 5 == 0 {
                assert!(result.is_err());
            } else {
                let text = result.as_ref().unwrap().text().to_string();
                assert!(text.starts_with(&format!("CREATE OR REPLACE AGENT DB.SCH.AGENT{i}\n")));
            }
        }
    }
}
