//! Agent Specification Model
//!
//! Typed view over the nested, weakly-typed agent specification documents a
//! data platform stores for its configurable assistants.
//!
//! # Core Concepts
//!
//! - [`AgentSpecification`]: Lowered document with fixed sections
//! - [`SpecValue`]: Closed value type for free-form fields
//! - [`ToolResource`]: Tool backing configuration, classified once into a [`ResourceKind`]
//! - [`AgentBlueprint`]: Form-style agent design that builds a specification document
//!
//! # Example
//!
//! ```rust
//! use ddl_spec::AgentSpecification;
//!
//! let spec = AgentSpecification::parse(r#"{"models": {"orchestration": "claude-4-sonnet"}}"#).unwrap();
//! assert_eq!(spec.models["orchestration"], "claude-4-sonnet");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod builder;
pub mod error;
pub mod model;
pub mod resource;
pub mod value;

// Re-exports for convenience
pub use builder::{AgentBlueprint, AnalystSource, ToolBlueprint, ToolBlueprintKind, AUTO_MODEL};
pub use error::{BuildError, SpecError};
pub use model::{
    AgentSpecification, InputSchema, Instructions, OrchestrationBudget, PropertySchema, ToolSpec,
};
pub use resource::{
    ExecutionEnvironment, GenericResource, ResourceKind, RoutineKind, RoutineResource,
    SearchIndexResource, SemanticModelResource, ToolResource,
};
pub use value::SpecValue;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
