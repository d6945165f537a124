//! Section renderers for the configuration block
//!
//! Sections are written in a fixed order regardless of the order keys had in
//! the source document. Empty sections are omitted entirely.

mod instructions;
mod models;
mod orchestration;
mod profile;
mod resources;
mod tools;

use ddl_spec::AgentSpecification;

use crate::config::CompilerConfig;
use crate::error::CompileResult;
use crate::writer::BlockWriter;

/// Top-level section of the configuration block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Models,
    Instructions,
    Tools,
    ToolResources,
    Orchestration,
    Profile,
}

impl Section {
    /// Output order
    pub const ORDER: [Section; 6] = [
        Self::Models,
        Self::Instructions,
        Self::Tools,
        Self::ToolResources,
        Self::Orchestration,
        Self::Profile,
    ];

    /// Key written for the section
    #[inline]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Instructions => "instructions",
            Self::Tools => "tools",
            Self::ToolResources => "tool_resources",
            Self::Orchestration => "orchestration",
            Self::Profile => "profile",
        }
    }

    /// Whether a blank line follows the section
    #[inline]
    #[must_use]
    pub const fn trailing_separator(self) -> bool {
        !matches!(self, Self::Profile)
    }

    /// Check if the specification has content for this section
    #[must_use]
    pub fn is_present(self, spec: &AgentSpecification) -> bool {
        match self {
            Self::Models => !spec.models.is_empty(),
            Self::Instructions => spec.instructions.as_ref().is_some_and(|i| !i.is_empty()),
            Self::Tools => !spec.tools.is_empty(),
            Self::ToolResources => !spec.tool_resources.is_empty(),
            Self::Orchestration => spec
                .orchestration
                .is_some_and(|b| b.seconds.is_some() || b.tokens.is_some()),
            Self::Profile => !spec.profile.is_empty(),
        }
    }

    fn render(self, spec: &AgentSpecification, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
        writer.header(0, self.key());
        match self {
            Self::Models => models::render(&spec.models, writer),
            Self::Instructions => match &spec.instructions {
                Some(instructions) => instructions::render(instructions, writer),
                None => Ok(()),
            },
            Self::Tools => tools::render(&spec.tools, writer),
            Self::ToolResources => resources::render(&spec.tool_resources, writer),
            Self::Orchestration => match spec.orchestration {
                Some(budget) => {
                    orchestration::render(budget, writer);
                    Ok(())
                }
                None => Ok(()),
            },
            Self::Profile => profile::render(&spec.profile, writer),
        }
    }
}

/// Render the configuration block lines for a specification
///
/// # Errors
/// Returns error if a value cannot be embedded in a quoted scalar
pub fn render_body(spec: &AgentSpecification, config: &CompilerConfig) -> CompileResult<Vec<String>> {
    let mut writer = BlockWriter::new(config);
    for section in Section::ORDER {
        if !section.is_present(spec) {
            continue;
        }
        let start = writer.len();
        section.render(spec, &mut writer)?;
        if section.trailing_separator() {
            writer.blank();
        }
        tracing::debug!(section = section.key(), lines = writer.len() - start, "rendered section");
    }
    Ok(writer.into_lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body(json: &str) -> Vec<String> {
        let spec = AgentSpecification::parse(json).unwrap();
        render_body(&spec, &CompilerConfig::default()).unwrap()
    }

    #[test]
    fn empty_specification_has_empty_body() {
        assert!(body("{}").is_empty());
    }

    #[test]
    fn sections_follow_fixed_order() {
        let lines = body(
            r#"{"profile": {"display_name": "Sales"},
                "orchestration": {"budget": {"seconds": 30}},
                "models": {"orchestration": "auto"}}"#,
        );
        assert_eq!(
            lines,
            vec![
                "models:",
                "  orchestration: \"auto\"",
                "",
                "orchestration:",
                "  budget:",
                "    seconds: 30",
                "",
                "profile:",
                "  display_name: \"Sales\"",
            ]
        );
    }

    #[test]
    fn profile_has_no_trailing_separator() {
        assert!(Section::Models.trailing_separator());
        assert!(!Section::Profile.trailing_separator());
        let lines = body(r#"{"profile": {"color": "blue"}}"#);
        assert_eq!(lines.last().map(String::as_str), Some("  color: \"blue\""));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let lines = body(r#"{"models": {}, "tools": [], "instructions": {"response": ""}}"#);
        assert!(lines.is_empty());
    }

    #[test]
    fn unsafe_scalar_fails_whole_body() {
        let spec = AgentSpecification::parse(r#"{"models": {"orchestration": "a\"b"}}"#).unwrap();
        let result = render_body(&spec, &CompilerConfig::default());
        assert!(result.is_err());
    }
}
