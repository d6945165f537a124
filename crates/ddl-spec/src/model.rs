//! Agent specification model
//!
//! The raw document is weakly typed and full of optional fields. It is lowered
//! once into [`AgentSpecification`]; anything the compiler cannot render is
//! dropped here rather than rediscovered at render time.

use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::SpecError;
use crate::resource::ToolResource;
use crate::value::{is_truthy, json_kind, SpecValue};

/// Parsed agent specification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentSpecification {
    /// Role name → model identifier
    pub models: IndexMap<String, String>,
    /// Instruction texts and sample questions
    pub instructions: Option<Instructions>,
    /// Callable tools, in document order
    pub tools: Vec<ToolSpec>,
    /// Resources backing tools, in document order
    pub tool_resources: Vec<ToolResource>,
    /// Orchestration budget
    pub orchestration: Option<OrchestrationBudget>,
    /// Display profile
    pub profile: IndexMap<String, String>,
}

/// Instruction block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instructions {
    pub response: Option<String>,
    pub orchestration: Option<String>,
    pub system: Option<String>,
    pub sample_questions: Vec<String>,
}

impl Instructions {
    /// Check if nothing would be rendered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.response.is_none()
            && self.orchestration.is_none()
            && self.system.is_none()
            && self.sample_questions.is_empty()
    }
}

/// One `tool_spec` entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSpec {
    /// Tool type (empty when absent)
    pub tool_type: String,
    /// Tool name (empty when absent)
    pub name: String,
    /// Long-form description
    pub description: Option<String>,
    /// Input schema
    pub input_schema: Option<InputSchema>,
}

/// JSON-Schema-like tool input description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSchema {
    /// Declared properties; `Some` when the document carries a `properties` object
    pub properties: Option<IndexMap<String, PropertySchema>>,
    /// Required property names
    pub required: Vec<String>,
}

/// One input schema property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchema {
    pub description: Option<String>,
    /// Property type, `string` when absent
    pub property_type: String,
}

impl Default for PropertySchema {
    fn default() -> Self {
        Self {
            description: None,
            property_type: "string".to_string(),
        }
    }
}

/// Orchestration run limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestrationBudget {
    /// Time budget in seconds
    pub seconds: Option<i64>,
    /// Token budget
    pub tokens: Option<i64>,
}

impl AgentSpecification {
    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not JSON or its root is not an object
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Lower an already-parsed document
    ///
    /// # Errors
    /// Returns error if the root is not an object
    pub fn from_value(value: &Value) -> Result<Self, SpecError> {
        let root = value.as_object().ok_or(SpecError::InvalidRoot {
            found: json_kind(value),
        })?;

        Ok(Self {
            models: lower_models(root.get("models")),
            instructions: lower_instructions(root.get("instructions")),
            tools: lower_tools(root.get("tools")),
            tool_resources: lower_tool_resources(root.get("tool_resources")),
            orchestration: lower_orchestration(root.get("orchestration")),
            profile: lower_profile(root.get("profile")),
        })
    }

    /// Check if no section has renderable content
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
            && self.instructions.is_none()
            && self.tools.is_empty()
            && self.tool_resources.is_empty()
            && self.orchestration.is_none()
            && self.profile.is_empty()
    }
}

impl FromStr for AgentSpecification {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn object<'a>(value: Option<&'a Value>, section: &str) -> Option<&'a Map<String, Value>> {
    let value = value?;
    let map = value.as_object();
    if map.is_none() && !value.is_null() {
        tracing::warn!(section, found = json_kind(value), "ignoring section that is not an object");
    }
    map
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn lower_models(value: Option<&Value>) -> IndexMap<String, String> {
    let Some(map) = object(value, "models") else {
        return IndexMap::new();
    };
    map.iter()
        .filter_map(|(role, model)| {
            let text = SpecValue::from_json(model).and_then(|v| v.scalar_text());
            if text.is_none() && !model.is_null() {
                tracing::warn!(role = %role, "skipping model entry that is not a scalar");
            }
            text.map(|t| (role.clone(), t))
        })
        .collect()
}

fn lower_instructions(value: Option<&Value>) -> Option<Instructions> {
    let map = object(value, "instructions")?;

    let sample_questions = map
        .get("sample_questions")
        .and_then(Value::as_array)
        .map(|questions| {
            questions
                .iter()
                .filter_map(|q| match q {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(o) => o.get("question").and_then(Value::as_str).map(str::to_string),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let instructions = Instructions {
        response: non_empty_str(map.get("response")),
        orchestration: non_empty_str(map.get("orchestration")),
        system: non_empty_str(map.get("system")),
        sample_questions,
    };
    (!instructions.is_empty()).then_some(instructions)
}

fn lower_tools(value: Option<&Value>) -> Vec<ToolSpec> {
    let Some(tools) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    tools
        .iter()
        .enumerate()
        .filter_map(|(index, tool)| {
            let spec = tool.get("tool_spec").and_then(Value::as_object);
            if spec.is_none() {
                tracing::warn!(index, "skipping tool without a tool_spec object");
            }
            spec.map(lower_tool_spec)
        })
        .collect()
}

fn lower_tool_spec(spec: &Map<String, Value>) -> ToolSpec {
    let text = |key: &str| {
        spec.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    ToolSpec {
        tool_type: text("type"),
        name: text("name"),
        description: non_empty_str(spec.get("description")),
        input_schema: spec
            .get("input_schema")
            .and_then(Value::as_object)
            .map(lower_input_schema),
    }
}

fn lower_input_schema(schema: &Map<String, Value>) -> InputSchema {
    let properties = schema.get("properties").and_then(Value::as_object).map(|props| {
        props
            .iter()
            .filter_map(|(name, def)| {
                let def = def.as_object()?;
                Some((
                    name.clone(),
                    PropertySchema {
                        description: def
                            .get("description")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        property_type: def
                            .get("type")
                            .and_then(Value::as_str)
                            .unwrap_or("string")
                            .to_string(),
                    },
                ))
            })
            .collect()
    });

    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    InputSchema {
        properties,
        required,
    }
}

fn lower_tool_resources(value: Option<&Value>) -> Vec<ToolResource> {
    let Some(map) = object(value, "tool_resources") else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(tool_name, entry)| match entry.as_object() {
            Some(entry) => Some(ToolResource::classify(tool_name.as_str(), entry)),
            None => {
                tracing::warn!(tool = %tool_name, found = json_kind(entry), "skipping tool resource that is not an object");
                None
            }
        })
        .collect()
}

fn lower_orchestration(value: Option<&Value>) -> Option<OrchestrationBudget> {
    let budget = object(value, "orchestration")?
        .get("budget")
        .and_then(Value::as_object)?;
    let budget = OrchestrationBudget {
        seconds: budget.get("seconds").and_then(Value::as_i64),
        tokens: budget.get("tokens").and_then(Value::as_i64),
    };
    (budget.seconds.is_some() || budget.tokens.is_some()).then_some(budget)
}

fn lower_profile(value: Option<&Value>) -> IndexMap<String, String> {
    let Some(map) = object(value, "profile") else {
        return IndexMap::new();
    };
    map.iter()
        .filter(|(_, v)| is_truthy(v))
        .filter_map(|(key, v)| {
            SpecValue::from_json(v)
                .and_then(|v| v.scalar_text())
                .map(|text| (key.clone(), text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_minimal() {
        let spec = AgentSpecification::parse(
            r#"{"models":{"orchestration":"claude-4-sonnet"},"tools":[{"tool_spec":{"type":"cortex_analyst_text_to_sql","name":"SalesAnalyst"}}]}"#,
        )
        .unwrap();

        assert_eq!(spec.models.get("orchestration").map(String::as_str), Some("claude-4-sonnet"));
        assert_eq!(spec.tools.len(), 1);
        assert_eq!(spec.tools[0].tool_type, "cortex_analyst_text_to_sql");
        assert_eq!(spec.tools[0].name, "SalesAnalyst");
        assert!(spec.instructions.is_none());
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = AgentSpecification::parse("{not json").unwrap_err();
        assert!(matches!(err, SpecError::MalformedSpecification { .. }));
    }

    #[test]
    fn parse_rejects_non_object_root() {
        let err = AgentSpecification::parse("[1, 2]").unwrap_err();
        assert_eq!(err, SpecError::InvalidRoot { found: "array" });
    }

    #[test]
    fn empty_document_is_empty() {
        let spec: AgentSpecification = "{}".parse().unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn models_skip_nulls_and_keep_order() {
        let spec = AgentSpecification::from_value(&json!({
            "models": {"z": "m1", "a": null, "b": 3}
        }))
        .unwrap();
        let entries: Vec<_> = spec.models.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(entries, vec![("z", "m1"), ("b", "3")]);
    }

    #[test]
    fn sample_questions_accept_strings_and_records() {
        let spec = AgentSpecification::from_value(&json!({
            "instructions": {
                "sample_questions": ["plain", {"question": "record"}, {"other": "x"}, 5]
            }
        }))
        .unwrap();
        assert_eq!(
            spec.instructions.unwrap().sample_questions,
            vec!["plain".to_string(), "record".to_string()]
        );
    }

    #[test]
    fn instructions_without_content_are_dropped() {
        let spec = AgentSpecification::from_value(&json!({
            "instructions": {"response": "", "unknown": "x"}
        }))
        .unwrap();
        assert!(spec.instructions.is_none());
    }

    #[test]
    fn tools_without_tool_spec_are_skipped() {
        let spec = AgentSpecification::from_value(&json!({
            "tools": [{"other": 1}, {"tool_spec": {"name": "T"}}]
        }))
        .unwrap();
        assert_eq!(spec.tools.len(), 1);
        assert_eq!(spec.tools[0].tool_type, "");
        assert_eq!(spec.tools[0].name, "T");
    }

    #[test]
    fn input_schema_defaults_property_type() {
        let spec = AgentSpecification::from_value(&json!({
            "tools": [{"tool_spec": {
                "type": "generic",
                "name": "T",
                "input_schema": {
                    "type": "object",
                    "properties": {"q": {"description": "Query"}, "n": {"type": "integer"}},
                    "required": ["q"]
                }
            }}]
        }))
        .unwrap();
        let schema = spec.tools[0].input_schema.as_ref().unwrap();
        let props = schema.properties.as_ref().unwrap();
        assert_eq!(props["q"].property_type, "string");
        assert_eq!(props["q"].description.as_deref(), Some("Query"));
        assert_eq!(props["n"].property_type, "integer");
        assert_eq!(schema.required, vec!["q".to_string()]);
    }

    #[test]
    fn tool_resources_keep_document_order() {
        let spec = AgentSpecification::from_value(&json!({
            "tool_resources": {
                "Zeta": {"semantic_model_file": "@S/z.yaml"},
                "Alpha": {"id_column": "ID"},
                "Broken": "not an object"
            }
        }))
        .unwrap();
        let names: Vec<_> = spec.tool_resources.iter().map(|r| r.tool_name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert!(matches!(spec.tool_resources[1].kind, ResourceKind::SearchIndex(_)));
    }

    #[test]
    fn orchestration_requires_budget_values() {
        let empty = AgentSpecification::from_value(&json!({"orchestration": {"budget": {}}})).unwrap();
        assert!(empty.orchestration.is_none());

        let spec = AgentSpecification::from_value(&json!({
            "orchestration": {"budget": {"seconds": 30, "tokens": 16000}}
        }))
        .unwrap();
        assert_eq!(
            spec.orchestration,
            Some(OrchestrationBudget {
                seconds: Some(30),
                tokens: Some(16000)
            })
        );
    }

    #[test]
    fn profile_skips_blank_values() {
        let spec = AgentSpecification::from_value(&json!({
            "profile": {"display_name": "Sales", "avatar": "", "color": null, "order": 0}
        }))
        .unwrap();
        assert_eq!(spec.profile.len(), 1);
        assert_eq!(spec.profile["display_name"], "Sales");
    }
}
