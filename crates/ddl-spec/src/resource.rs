//! Tool resource variants
//!
//! A `tool_resources` entry is a disguised tagged union: which fields it
//! carries decides the order they must be written in. Entries are classified
//! exactly once, in priority order:
//!
//! 1. `type` is `"function"` or `"procedure"` → [`ResourceKind::Routine`]
//! 2. `semantic_model_file` present → [`ResourceKind::SemanticModel`]
//! 3. `id_column` present → [`ResourceKind::SearchIndex`]
//! 4. anything else → [`ResourceKind::Generic`]

use crate::value::SpecValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Warehouse execution settings shared by every resource kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionEnvironment {
    /// Query timeout in seconds
    pub query_timeout: Option<i64>,
    /// Environment type (usually `warehouse`)
    pub environment_type: Option<String>,
    /// Warehouse name
    pub warehouse: Option<String>,
}

impl ExecutionEnvironment {
    fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            map.get(key)
                .and_then(SpecValue::from_json)
                .and_then(|v| v.scalar_text())
        };
        Self {
            query_timeout: map.get("query_timeout").and_then(query_timeout),
            environment_type: text("type"),
            warehouse: text("warehouse"),
        }
    }
}

/// Seconds as an integer, or a string holding one
fn query_timeout(value: &Value) -> Option<i64> {
    let seconds = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if seconds.is_none() && !value.is_null() {
        tracing::warn!(found = %value, "dropping query_timeout that is not an integer");
    }
    seconds
}

/// Top-level resource field; numbers must be integers to be written bare
fn resource_field(entry: &Map<String, Value>, key: &str) -> Option<SpecValue> {
    let value = entry.get(key)?;
    if let Value::Number(n) = value {
        if n.as_i64().is_none() {
            tracing::warn!(field = key, number = %n, "dropping non-integer number in tool resource");
            return None;
        }
    }
    SpecValue::from_json(value)
}

/// Kind of routine backing a custom tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineKind {
    /// User-defined function
    Function,
    /// Stored procedure
    Procedure,
}

impl RoutineKind {
    /// Resource `type` value for this routine
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Procedure => "procedure",
        }
    }

    /// Match a resource `type` value
    #[must_use]
    pub fn from_type(value: &str) -> Option<Self> {
        match value {
            "function" => Some(Self::Function),
            "procedure" => Some(Self::Procedure),
            _ => None,
        }
    }
}

/// Function or procedure backed tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineResource {
    /// Routine kind, written as the `type` field
    pub kind: RoutineKind,
    /// Fully qualified routine identifier
    pub identifier: Option<SpecValue>,
    /// Routine signature
    pub name: Option<SpecValue>,
}

/// Analyst tool backed by a semantic model file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticModelResource {
    /// Stage path of the semantic model
    pub semantic_model_file: Option<SpecValue>,
}

/// Search tool backed by a search service index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndexResource {
    pub id_column: Option<SpecValue>,
    pub max_results: Option<SpecValue>,
    pub name: Option<SpecValue>,
    pub title_column: Option<SpecValue>,
}

/// Any other resource shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericResource {
    pub identifier: Option<SpecValue>,
    pub name: Option<SpecValue>,
    pub resource_type: Option<SpecValue>,
    pub max_results: Option<SpecValue>,
    pub title_column: Option<SpecValue>,
    pub search_service: Option<SpecValue>,
    pub filter: Option<SpecValue>,
}

/// Classified resource shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Routine(RoutineResource),
    SemanticModel(SemanticModelResource),
    SearchIndex(SearchIndexResource),
    Generic(GenericResource),
}

impl ResourceKind {
    /// Short name of the variant
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Routine(_) => "routine",
            Self::SemanticModel(_) => "semantic_model",
            Self::SearchIndex(_) => "search_index",
            Self::Generic(_) => "generic",
        }
    }
}

/// Backing configuration for one named tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResource {
    /// Tool name this resource belongs to
    pub tool_name: String,
    /// Execution settings, written before the kind-specific fields
    pub execution_environment: Option<ExecutionEnvironment>,
    /// Classified fields
    pub kind: ResourceKind,
}

impl ToolResource {
    /// Classify a raw `tool_resources` entry
    #[must_use]
    pub fn classify(tool_name: impl Into<String>, entry: &Map<String, Value>) -> Self {
        let tool_name = tool_name.into();
        let field = |key: &str| resource_field(entry, key);

        let routine = entry
            .get("type")
            .and_then(Value::as_str)
            .and_then(RoutineKind::from_type);

        let kind = if let Some(kind) = routine {
            ResourceKind::Routine(RoutineResource {
                kind,
                identifier: field("identifier"),
                name: field("name"),
            })
        } else if entry.contains_key("semantic_model_file") {
            ResourceKind::SemanticModel(SemanticModelResource {
                semantic_model_file: field("semantic_model_file"),
            })
        } else if entry.contains_key("id_column") {
            ResourceKind::SearchIndex(SearchIndexResource {
                id_column: field("id_column"),
                max_results: field("max_results"),
                name: field("name"),
                title_column: field("title_column"),
            })
        } else {
            tracing::debug!(tool = %tool_name, "no resource discriminator matched, using generic order");
            ResourceKind::Generic(GenericResource {
                identifier: field("identifier"),
                name: field("name"),
                resource_type: field("type"),
                max_results: field("max_results"),
                title_column: field("title_column"),
                search_service: field("search_service"),
                filter: field("filter"),
            })
        };

        let execution_environment = entry
            .get("execution_environment")
            .and_then(Value::as_object)
            .map(ExecutionEnvironment::from_map);

        tracing::debug!(tool = %tool_name, kind = kind.label(), "classified tool resource");

        Self {
            tool_name,
            execution_environment,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: Value) -> ToolResource {
        ToolResource::classify("tool", value.as_object().unwrap())
    }

    #[test]
    fn function_type_wins_over_semantic_model() {
        let resource = classify(json!({
            "type": "function",
            "semantic_model_file": "@DB.SCH.STAGE/model.yaml",
            "identifier": "DB.SCH.FN",
        }));
        let ResourceKind::Routine(routine) = resource.kind else {
            panic!("expected routine");
        };
        assert_eq!(routine.kind, RoutineKind::Function);
        assert_eq!(routine.identifier, Some(SpecValue::from("DB.SCH.FN")));
    }

    #[test]
    fn procedure_is_routine() {
        let resource = classify(json!({"type": "procedure", "name": "P(X INT)"}));
        assert!(matches!(
            resource.kind,
            ResourceKind::Routine(RoutineResource { kind: RoutineKind::Procedure, .. })
        ));
    }

    #[test]
    fn semantic_model_wins_over_id_column() {
        let resource = classify(json!({"semantic_model_file": "@S/m.yaml", "id_column": "ID"}));
        assert_eq!(resource.kind.label(), "semantic_model");
    }

    #[test]
    fn semantic_model_key_with_null_value_still_classifies() {
        let resource = classify(json!({"semantic_model_file": null}));
        assert_eq!(
            resource.kind,
            ResourceKind::SemanticModel(SemanticModelResource {
                semantic_model_file: None
            })
        );
    }

    #[test]
    fn id_column_is_search_index() {
        let resource = classify(json!({"id_column": "DOC_ID", "max_results": 5, "name": "DB.SCH.SVC"}));
        let ResourceKind::SearchIndex(search) = resource.kind else {
            panic!("expected search index");
        };
        assert_eq!(search.max_results, Some(SpecValue::Integer(5)));
        assert_eq!(search.title_column, None);
    }

    #[test]
    fn unknown_shape_falls_back_to_generic() {
        let resource = classify(json!({"type": "warehouse", "search_service": "SVC", "filter": {"@eq": {"a": "b"}}}));
        let ResourceKind::Generic(generic) = resource.kind else {
            panic!("expected generic");
        };
        assert_eq!(generic.resource_type, Some(SpecValue::from("warehouse")));
        assert!(generic.filter.is_some_and(|f| f.is_mapping()));
    }

    #[test]
    fn execution_environment_is_extracted() {
        let resource = classify(json!({
            "execution_environment": {"query_timeout": 60, "type": "warehouse", "warehouse": "WH"},
            "semantic_model_file": "@S/m.yaml",
        }));
        assert_eq!(
            resource.execution_environment,
            Some(ExecutionEnvironment {
                query_timeout: Some(60),
                environment_type: Some("warehouse".to_string()),
                warehouse: Some("WH".to_string()),
            })
        );
    }

    #[test]
    fn float_fields_are_dropped() {
        let resource = classify(json!({"id_column": "ID", "max_results": 5.0, "name": 1.5}));
        let ResourceKind::SearchIndex(search) = resource.kind else {
            panic!("expected search index");
        };
        assert_eq!(search.id_column, Some(SpecValue::from("ID")));
        assert_eq!(search.max_results, None);
        assert_eq!(search.name, None);
    }

    #[test]
    fn query_timeout_accepts_integer_strings() {
        let resource = classify(json!({"execution_environment": {"query_timeout": " 60 ", "warehouse": "WH"}}));
        let environment = resource.execution_environment.unwrap();
        assert_eq!(environment.query_timeout, Some(60));
        assert_eq!(environment.warehouse, Some("WH".to_string()));

        let resource = classify(json!({"execution_environment": {"query_timeout": "soon"}}));
        assert_eq!(resource.execution_environment.unwrap().query_timeout, None);
    }

    #[test]
    fn empty_execution_environment_is_kept() {
        let resource = classify(json!({"execution_environment": {}}));
        assert_eq!(resource.execution_environment, Some(ExecutionEnvironment::default()));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const KEYS: [&str; 6] = ["type", "semantic_model_file", "id_column", "identifier", "name", "max_results"];

        proptest! {
            #[test]
            fn classification_ignores_key_order(
                entries in proptest::sample::subsequence(KEYS.to_vec(), 0..=KEYS.len()).prop_shuffle(),
                routine in any::<bool>(),
            ) {
                let entry: Map<String, Value> = entries
                    .iter()
                    .map(|key| {
                        let value = if *key == "type" && routine { json!("function") } else { json!(key.to_uppercase()) };
                        ((*key).to_string(), value)
                    })
                    .collect();
                let mut reversed: Map<String, Value> = Map::new();
                for (key, value) in entry.iter().rev() {
                    reversed.insert(key.clone(), value.clone());
                }

                let forward = ToolResource::classify("tool", &entry);
                let backward = ToolResource::classify("tool", &reversed);
                prop_assert_eq!(forward, backward);
            }
        }
    }
}
