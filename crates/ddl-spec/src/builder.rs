//! Build specification documents from form-style blueprints
//!
//! Produces the same JSON document shape the platform stores, so a freshly
//! designed agent goes through exactly the compile path a fetched one does.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::BuildError;
use crate::resource::RoutineKind;

/// Model name meaning "let the platform choose"
pub const AUTO_MODEL: &str = "auto";

/// Agent design captured from a builder form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentBlueprint {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub orchestration_instructions: String,
    #[serde(default)]
    pub response_instructions: String,
    /// Orchestration model, or [`AUTO_MODEL`]
    pub orchestration_model: String,
    pub budget_seconds: i64,
    pub budget_tokens: i64,
    #[serde(default)]
    pub tools: Vec<ToolBlueprint>,
}

/// One tool on the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolBlueprint {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ToolBlueprintKind,
}

/// Tool-type specific inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool_type", rename_all = "snake_case")]
pub enum ToolBlueprintKind {
    /// Cortex Search service
    CortexSearch {
        database: String,
        schema: String,
        service: String,
        id_column: Option<String>,
        max_results: Option<i64>,
        title_column: Option<String>,
    },
    /// Cortex Analyst over a semantic model or view
    CortexAnalystTextToSql {
        warehouse: Option<String>,
        source: AnalystSource,
    },
    /// Custom procedure or UDF
    Generic {
        database: String,
        schema: String,
        routine: RoutineKind,
        /// Full signature, e.g. `GET_SALES(REGION VARCHAR)`
        signature: String,
        warehouse: Option<String>,
        query_timeout: Option<i64>,
    },
}

/// Where an analyst tool reads its semantic layer from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "analyst_type", rename_all = "snake_case")]
pub enum AnalystSource {
    /// YAML model on a stage
    Yaml {
        database: String,
        schema: String,
        stage: String,
        file: String,
    },
    /// Semantic view
    View {
        database: String,
        schema: String,
        view: String,
    },
}

impl ToolBlueprintKind {
    /// Platform tool type
    #[must_use]
    pub const fn tool_type(&self) -> &'static str {
        match self {
            Self::CortexSearch { .. } => "cortex_search",
            Self::CortexAnalystTextToSql { .. } => "cortex_analyst_text_to_sql",
            Self::Generic { .. } => "generic",
        }
    }
}

impl AgentBlueprint {
    /// Create blueprint with platform defaults
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orchestration_model: AUTO_MODEL.to_string(),
            budget_seconds: 30,
            budget_tokens: 16000,
            ..Self::default()
        }
    }

    /// With a tool
    #[must_use]
    pub fn with_tool(mut self, tool: ToolBlueprint) -> Self {
        self.tools.push(tool);
        self
    }

    /// With orchestration model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.orchestration_model = model.into();
        self
    }

    /// Build the specification document
    ///
    /// # Errors
    /// Returns error if the name is empty or a tool lacks required parts
    pub fn to_document(&self) -> Result<Value, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::EmptyAgentName);
        }

        let mut tools = Vec::with_capacity(self.tools.len());
        let mut tool_resources = Map::new();
        for tool in &self.tools {
            tools.push(json!({ "tool_spec": tool_spec(tool) }));
            tool_resources.insert(tool.name.clone(), Value::Object(tool_resource(tool)?));
        }

        let models = if self.orchestration_model == AUTO_MODEL {
            json!({})
        } else {
            json!({ "orchestration": self.orchestration_model })
        };

        tracing::debug!(agent = %self.name, tools = tools.len(), "built specification document");

        Ok(json!({
            "name": self.name,
            "comment": self.comment,
            "instructions": {
                "orchestration": self.orchestration_instructions,
                "response": self.response_instructions,
            },
            "models": models,
            "orchestration": {
                "budget": {
                    "seconds": self.budget_seconds,
                    "tokens": self.budget_tokens,
                }
            },
            "tools": tools,
            "tool_resources": tool_resources,
        }))
    }
}

fn tool_spec(tool: &ToolBlueprint) -> Value {
    let mut spec = Map::new();
    spec.insert("type".into(), json!(tool.kind.tool_type()));
    spec.insert("name".into(), json!(tool.name));
    spec.insert("description".into(), json!(tool.description));

    let input = match tool.kind {
        ToolBlueprintKind::CortexSearch { .. } => Some(("query", "Search query string")),
        ToolBlueprintKind::CortexAnalystTextToSql { .. } => {
            Some(("question", "Natural language question to convert to SQL"))
        }
        ToolBlueprintKind::Generic { .. } => None,
    };
    if let Some((field, description)) = input {
        spec.insert(
            "input_schema".into(),
            json!({
                "type": "object",
                "properties": {
                    field: { "type": "string", "description": description }
                },
                "required": [field],
            }),
        );
    }
    Value::Object(spec)
}

fn tool_resource(tool: &ToolBlueprint) -> Result<Map<String, Value>, BuildError> {
    let mut resource = Map::new();
    match &tool.kind {
        ToolBlueprintKind::CortexSearch {
            database,
            schema,
            service,
            id_column,
            max_results,
            title_column,
        } => {
            require(&tool.name, &[("database", database), ("schema", schema), ("cortex_search_service", service)])?;
            resource.insert("name".into(), json!(format!("{database}.{schema}.{service}")));
            if let Some(id) = id_column.as_deref().filter(|s| !s.is_empty()) {
                resource.insert("id_column".into(), json!(id));
            }
            if let Some(max) = max_results.filter(|m| *m != 0) {
                resource.insert("max_results".into(), json!(max));
            }
            if let Some(title) = title_column.as_deref().filter(|s| !s.is_empty()) {
                resource.insert("title_column".into(), json!(title));
            }
        }
        ToolBlueprintKind::CortexAnalystTextToSql { warehouse, source } => {
            if let Some(warehouse) = warehouse.as_deref().filter(|s| !s.is_empty()) {
                resource.insert(
                    "execution_environment".into(),
                    json!({ "type": "warehouse", "warehouse": warehouse }),
                );
            }
            match source {
                AnalystSource::Yaml {
                    database,
                    schema,
                    stage,
                    file,
                } => {
                    require(
                        &tool.name,
                        &[("stage", stage), ("yaml_file", file), ("database", database), ("schema", schema)],
                    )?;
                    resource.insert(
                        "semantic_model_file".into(),
                        json!(format!("@{database}.{schema}.{stage}/{file}")),
                    );
                }
                AnalystSource::View {
                    database,
                    schema,
                    view,
                } => {
                    require(&tool.name, &[("semantic_view", view), ("database", database), ("schema", schema)])?;
                    resource.insert(
                        "semantic_view".into(),
                        json!(format!("{database}.{schema}.{view}")),
                    );
                }
            }
        }
        ToolBlueprintKind::Generic {
            database,
            schema,
            routine,
            signature,
            warehouse,
            query_timeout,
        } => {
            let field = match routine {
                RoutineKind::Procedure => "procedure",
                RoutineKind::Function => "udf",
            };
            require(&tool.name, &[(field, signature), ("database", database), ("schema", schema)])?;
            let routine_name = signature.split('(').next().unwrap_or(signature);
            resource.insert(
                "identifier".into(),
                json!(format!("{database}.{schema}.{routine_name}")),
            );
            resource.insert("name".into(), json!(signature));
            resource.insert("type".into(), json!(routine.as_str()));

            if let Some(warehouse) = warehouse.as_deref().filter(|s| !s.is_empty()) {
                let mut env = Map::new();
                env.insert("type".into(), json!("warehouse"));
                env.insert("warehouse".into(), json!(warehouse));
                if let Some(timeout) = query_timeout.filter(|t| *t != 0) {
                    env.insert("query_timeout".into(), json!(timeout));
                }
                resource.insert("execution_environment".into(), Value::Object(env));
            }
        }
    }
    Ok(resource)
}

fn require(tool: &str, parts: &[(&'static str, &String)]) -> Result<(), BuildError> {
    let missing: Vec<&'static str> = parts
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BuildError::missing_fields(tool, missing))
    }
}
