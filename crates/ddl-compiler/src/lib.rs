//! Agent Specification Compiler
//!
//! Renders a stored agent specification as a `CREATE OR REPLACE AGENT`
//! statement whose `$$`-delimited body is the specification in the
//! platform's YAML-like configuration form.
//!
//! # Core Concepts
//!
//! - [`SpecCompiler`]: Parses, renders and assembles one statement per request
//! - [`CompilerConfig`]: Description limits and scalar safety policy
//! - [`render::Section`]: Fixed output order of the configuration block
//! - [`SpecificationSource`]: Boundary for fetching stored specifications
//!
//! # Example
//!
//! ```rust
//! let text = ddl_compiler::compile(
//!     "AGENT1",
//!     "DB",
//!     "SCH",
//!     r#"{"models": {"orchestration": "claude-4-sonnet"}}"#,
//!     "",
//! );
//! assert!(text.starts_with("CREATE OR REPLACE AGENT DB.SCH.AGENT1\nFROM SPECIFICATION\n$$\nmodels:\n"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod compiler;
pub mod config;
pub mod error;
pub mod render;
pub mod source;
pub mod text;
pub mod writer;

// Re-exports for convenience
pub use compiler::{
    compile, compile_batch, CompileRequest, CompiledStatement, ObjectName, SpecCompiler,
    SpecificationInput, BLOCK_DELIMITER,
};
pub use config::CompilerConfig;
pub use error::{CompileError, CompileResult, ConfigError, FetchError, SourceError, DIAGNOSTIC_PREFIX};
pub use source::{AgentDetails, InMemorySource, SpecificationSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
