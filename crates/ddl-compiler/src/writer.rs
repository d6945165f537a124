//! Ordered line buffer for the configuration block
//!
//! Indentation is two spaces per depth level. Every write that produces a
//! double-quoted scalar goes through [`BlockWriter::quoted`] so the scalar
//! safety check cannot be bypassed.

use std::fmt::Display;

use crate::config::CompilerConfig;
use crate::error::CompileResult;
use crate::text::{check_quoted_scalar, needs_literal_block, truncate, unsafe_scalar_char};

const INDENT: &str = "  ";

/// Length limits applied to one description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionLimits {
    /// Truncation limit
    pub max_length: usize,
    /// Longer descriptions become literal blocks
    pub block_threshold: usize,
}

/// Accumulates configuration block lines
#[derive(Debug, Clone)]
pub struct BlockWriter<'a> {
    lines: Vec<String>,
    config: &'a CompilerConfig,
}

impl<'a> BlockWriter<'a> {
    /// Create empty writer
    #[inline]
    #[must_use]
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self {
            lines: Vec::new(),
            config,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &'a CompilerConfig {
        self.config
    }

    /// Number of lines written so far
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if nothing was written
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write an indented line
    pub fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(depth), text.as_ref()));
    }

    /// Write an empty line
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// `key:` opening a nested block
    pub fn header(&mut self, depth: usize, key: &str) {
        self.line(depth, format!("{key}:"));
    }

    /// `key: value` with the value unquoted
    pub fn plain(&mut self, depth: usize, key: &str, value: impl Display) {
        self.line(depth, format!("{key}: {value}"));
    }

    /// `key: "value"`
    ///
    /// # Errors
    /// Returns error if the value cannot be double-quoted as-is
    pub fn quoted(&mut self, depth: usize, key: &str, value: &str, context: &str) -> CompileResult<()> {
        self.check(key, value, context)?;
        self.line(depth, format!("{key}: \"{value}\""));
        Ok(())
    }

    /// `- key: "value"` list item
    ///
    /// # Errors
    /// Returns error if the value cannot be double-quoted as-is
    pub fn quoted_item(&mut self, depth: usize, key: &str, value: &str, context: &str) -> CompileResult<()> {
        self.check(key, value, context)?;
        self.line(depth, format!("- {key}: \"{value}\""));
        Ok(())
    }

    /// `- value` list item
    pub fn item(&mut self, depth: usize, value: impl Display) {
        self.line(depth, format!("- {value}"));
    }

    /// Truncated description, quoted or as a literal block
    ///
    /// # Errors
    /// Returns error if a short description cannot be double-quoted as-is
    pub fn description(
        &mut self,
        depth: usize,
        text: &str,
        limits: DescriptionLimits,
        context: &str,
    ) -> CompileResult<()> {
        let text = truncate(text, limits.max_length);
        if needs_literal_block(&text, limits.block_threshold) {
            self.line(depth, "description: |");
            for line in text.split('\n') {
                self.line(depth + 1, line);
            }
            Ok(())
        } else {
            self.quoted(depth, "description", &text, context)
        }
    }

    /// Finish and return the lines
    #[inline]
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn check(&self, key: &str, value: &str, context: &str) -> CompileResult<()> {
        if unsafe_scalar_char(value).is_none() {
            return Ok(());
        }
        let field = if context.is_empty() {
            key.to_string()
        } else {
            format!("{context}.{key}")
        };
        check_quoted_scalar(&field, value, self.config.allow_unsafe_scalars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;

    const LIMITS: DescriptionLimits = DescriptionLimits {
        max_length: 300,
        block_threshold: 200,
    };

    #[test]
    fn indents_two_spaces_per_level() {
        let config = CompilerConfig::default();
        let mut writer = BlockWriter::new(&config);
        writer.header(0, "models");
        writer.quoted(1, "orchestration", "claude-4-sonnet", "models").unwrap();
        writer.plain(2, "seconds", 30);
        writer.item(5, "query");
        writer.blank();

        assert_eq!(
            writer.into_lines(),
            vec![
                "models:",
                "  orchestration: \"claude-4-sonnet\"",
                "    seconds: 30",
                "          - query",
                "",
            ]
        );
    }

    #[test]
    fn short_description_is_quoted() {
        let config = CompilerConfig::default();
        let mut writer = BlockWriter::new(&config);
        writer.description(3, "Answers sales questions", LIMITS, "tools[0]").unwrap();
        assert_eq!(writer.into_lines(), vec!["      description: \"Answers sales questions\""]);
    }

    #[test]
    fn multiline_description_is_literal_block() {
        let config = CompilerConfig::default();
        let mut writer = BlockWriter::new(&config);
        writer.description(3, "First line\nSecond \"quoted\" line", LIMITS, "tools[0]").unwrap();
        assert_eq!(
            writer.into_lines(),
            vec![
                "      description: |",
                "        First line",
                "        Second \"quoted\" line",
            ]
        );
    }

    #[test]
    fn quoted_rejects_unsafe_value_with_field_path() {
        let config = CompilerConfig::default();
        let mut writer = BlockWriter::new(&config);
        let err = writer
            .quoted(1, "response", "say \"hi\"", "instructions")
            .unwrap_err();
        assert_eq!(err, CompileError::unsupported_scalar("instructions.response", '"'));
        assert!(writer.is_empty());
    }

    #[test]
    fn quoted_allows_unsafe_value_when_configured() {
        let config = CompilerConfig::default().with_unsafe_scalars(true);
        let mut writer = BlockWriter::new(&config);
        writer.quoted(1, "response", "say \"hi\"", "instructions").unwrap();
        assert_eq!(writer.len(), 1);
    }
}
