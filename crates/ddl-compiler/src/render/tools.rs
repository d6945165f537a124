use ddl_spec::{InputSchema, ToolSpec};

use crate::error::CompileResult;
use crate::writer::{BlockWriter, DescriptionLimits};

pub(super) fn render(tools: &[ToolSpec], writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    for (index, tool) in tools.iter().enumerate() {
        if index > 0 {
            writer.blank();
        }
        render_tool(tool, &format!("tools[{index}].tool_spec"), writer)?;
    }
    Ok(())
}

fn render_tool(tool: &ToolSpec, context: &str, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    let config = writer.config();
    writer.line(1, "- tool_spec:");
    writer.quoted(3, "type", &tool.tool_type, context)?;
    writer.quoted(3, "name", &tool.name, context)?;

    if let Some(description) = &tool.description {
        let limits = DescriptionLimits {
            max_length: config.tool_description_limit,
            block_threshold: config.tool_description_block_threshold,
        };
        writer.description(3, description, limits, context)?;
    }

    if let Some(schema) = &tool.input_schema {
        render_input_schema(schema, &format!("{context}.input_schema"), writer)?;
    }
    Ok(())
}

fn render_input_schema(schema: &InputSchema, context: &str, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    let config = writer.config();
    let limits = DescriptionLimits {
        max_length: config.property_description_limit,
        block_threshold: config.property_description_block_threshold,
    };

    writer.header(3, "input_schema");
    writer.plain(4, "type", "object");

    if let Some(properties) = &schema.properties {
        writer.header(4, "properties");
        for (name, property) in properties {
            writer.header(5, name);
            if let Some(description) = &property.description {
                writer.description(6, description, limits, &format!("{context}.properties.{name}"))?;
            }
            writer.plain(6, "type", &property.property_type);
        }
    }

    if !schema.required.is_empty() {
        writer.header(4, "required");
        for field in &schema.required {
            writer.item(5, field);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use ddl_spec::AgentSpecification;
    use pretty_assertions::assert_eq;

    fn lines(json: &str) -> Vec<String> {
        let spec = AgentSpecification::parse(json).unwrap();
        let config = CompilerConfig::default();
        let mut writer = BlockWriter::new(&config);
        render(&spec.tools, &mut writer).unwrap();
        writer.into_lines()
    }

    #[test]
    fn renders_input_schema_layout() {
        let lines = lines(
            r#"{"tools": [{"tool_spec": {
                "type": "generic", "name": "Lookup",
                "input_schema": {
                    "type": "object",
                    "properties": {"order_id": {"description": "Order key", "type": "integer"}, "region": {}},
                    "required": ["order_id"]
                }
            }}]}"#,
        );
        assert_eq!(
            lines,
            vec![
                "  - tool_spec:",
                "      type: \"generic\"",
                "      name: \"Lookup\"",
                "      input_schema:",
                "        type: object",
                "        properties:",
                "          order_id:",
                "            description: \"Order key\"",
                "            type: integer",
                "          region:",
                "            type: string",
                "        required:",
                "          - order_id",
            ]
        );
    }

    #[test]
    fn tools_are_separated_by_blank_line() {
        let lines = lines(
            r#"{"tools": [
                {"tool_spec": {"type": "a", "name": "One"}},
                {"tool_spec": {"type": "b", "name": "Two"}}
            ]}"#,
        );
        assert_eq!(lines[3], "");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn long_property_description_becomes_block() {
        let description = "word ".repeat(20);
        let json = format!(
            r#"{{"tools": [{{"tool_spec": {{"type": "t", "name": "n",
                "input_schema": {{"properties": {{"q": {{"description": "{description}"}}}}}}}}}}]}}"#
        );
        let lines = lines(&json);
        assert!(lines.contains(&"            description: |".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("              word word")));
    }

    #[test]
    fn unsafe_property_description_reports_path() {
        let spec = AgentSpecification::parse(
            r#"{"tools": [{"tool_spec": {"type": "t", "name": "n",
                "input_schema": {"properties": {"q": {"description": "say \"hi\""}}}}}]}"#,
        )
        .unwrap();
        let config = CompilerConfig::default();
        let mut writer = BlockWriter::new(&config);
        let err = render(&spec.tools, &mut writer).unwrap_err();
        assert!(err
            .to_string()
            .contains("tools[0].tool_spec.input_schema.properties.q.description"));
    }
}
