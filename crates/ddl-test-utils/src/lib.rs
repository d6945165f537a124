//! Testing utilities for the agent DDL workspace
//!
//! Shared specification fixtures and describe rows.

#![allow(missing_docs)]

use ddl_spec::{AgentBlueprint, AnalystSource, RoutineKind, ToolBlueprint, ToolBlueprintKind};
use serde_json::{json, Map, Value};

/// Minimal document with one model and one tool
pub const ANALYST_SPEC: &str = r#"{"models":{"orchestration":"claude-4-sonnet"},"tools":[{"tool_spec":{"type":"cortex_analyst_text_to_sql","name":"SalesAnalyst"}}]}"#;

/// Document touching every section and every resource kind
pub fn full_specification() -> Value {
    json!({
        "models": {"orchestration": "claude-4-sonnet"},
        "instructions": {
            "response": "Answer concisely",
            "orchestration": "Prefer the analyst for numeric questions",
            "sample_questions": [
                "What were sales last quarter?",
                {"question": "Which region grew fastest?"}
            ]
        },
        "tools": [
            {"tool_spec": {
                "type": "cortex_analyst_text_to_sql",
                "name": "SalesAnalyst",
                "description": "Converts sales questions to SQL",
                "input_schema": {
                    "type": "object",
                    "properties": {
                        "question": {"type": "string", "description": "Natural language question to convert to SQL"}
                    },
                    "required": ["question"]
                }
            }},
            {"tool_spec": {
                "type": "cortex_search",
                "name": "DocSearch",
                "input_schema": {
                    "type": "object",
                    "properties": {"query": {"description": "Search query string"}},
                    "required": ["query"]
                }
            }},
            {"tool_spec": {"type": "generic", "name": "GetSales"}}
        ],
        "tool_resources": {
            "SalesAnalyst": {
                "semantic_model_file": "@SALES.DATA.MODELS/sales.yaml",
                "execution_environment": {"type": "warehouse", "warehouse": "COMPUTE_WH"}
            },
            "DocSearch": {
                "name": "SALES.DATA.DOC_SEARCH",
                "id_column": "DOC_ID",
                "title_column": "TITLE",
                "max_results": 5
            },
            "GetSales": {
                "identifier": "SALES.DATA.GET_SALES",
                "name": "GET_SALES(REGION VARCHAR)",
                "type": "procedure",
                "execution_environment": {"type": "warehouse", "warehouse": "COMPUTE_WH", "query_timeout": 60}
            }
        },
        "orchestration": {"budget": {"seconds": 30, "tokens": 16000}},
        "profile": {"display_name": "Sales Assistant", "avatar": ""}
    })
}

/// [`full_specification`] as JSON text
pub fn full_specification_text() -> String {
    full_specification().to_string()
}

/// Describe row carrying `spec` under the lower-case column
pub fn describe_row(spec: &str, comment: &str) -> Map<String, Value> {
    let mut row = Map::new();
    row.insert("name".to_string(), json!("AGENT1"));
    row.insert("agent_spec".to_string(), json!(spec));
    row.insert("comment".to_string(), json!(comment));
    row
}

/// Blueprint with one tool of each kind
pub fn sales_blueprint() -> AgentBlueprint {
    AgentBlueprint::new("SALES_AGENT")
        .with_model("claude-4-sonnet")
        .with_tool(ToolBlueprint {
            name: "SalesAnalyst".to_string(),
            description: "Converts sales questions to SQL".to_string(),
            kind: ToolBlueprintKind::CortexAnalystTextToSql {
                warehouse: Some("COMPUTE_WH".to_string()),
                source: AnalystSource::Yaml {
                    database: "SALES".to_string(),
                    schema: "DATA".to_string(),
                    stage: "MODELS".to_string(),
                    file: "sales.yaml".to_string(),
                },
            },
        })
        .with_tool(ToolBlueprint {
            name: "DocSearch".to_string(),
            description: "Searches product documents".to_string(),
            kind: ToolBlueprintKind::CortexSearch {
                database: "SALES".to_string(),
                schema: "DATA".to_string(),
                service: "DOC_SEARCH".to_string(),
                id_column: Some("DOC_ID".to_string()),
                max_results: Some(5),
                title_column: None,
            },
        })
        .with_tool(ToolBlueprint {
            name: "GetSales".to_string(),
            description: "Returns sales for a region".to_string(),
            kind: ToolBlueprintKind::Generic {
                database: "SALES".to_string(),
                schema: "DATA".to_string(),
                routine: RoutineKind::Procedure,
                signature: "GET_SALES(REGION VARCHAR)".to_string(),
                warehouse: Some("COMPUTE_WH".to_string()),
                query_timeout: Some(60),
            },
        })
}
