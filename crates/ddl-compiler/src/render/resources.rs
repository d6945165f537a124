//! Tool resource entries
//!
//! Each classified resource kind has its own field order. Scalar text is
//! quoted, integers and booleans are written bare, and mappings nest at most
//! two levels with every nested scalar quoted.

use ddl_spec::{
    ExecutionEnvironment, GenericResource, ResourceKind, RoutineResource, SearchIndexResource,
    SemanticModelResource, SpecValue, ToolResource,
};
use indexmap::IndexMap;

use crate::error::CompileResult;
use crate::writer::BlockWriter;

const FIELD_DEPTH: usize = 2;

pub(super) fn render(resources: &[ToolResource], writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    for (index, resource) in resources.iter().enumerate() {
        if index > 0 {
            writer.blank();
        }
        render_resource(resource, writer)?;
    }
    Ok(())
}

fn render_resource(resource: &ToolResource, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    let context = format!("tool_resources.{}", resource.tool_name);
    writer.header(1, &resource.tool_name);

    if let Some(environment) = &resource.execution_environment {
        render_environment(environment, &format!("{context}.execution_environment"), writer)?;
    }

    match &resource.kind {
        ResourceKind::Routine(routine) => render_routine(routine, &context, writer),
        ResourceKind::SemanticModel(model) => render_semantic_model(model, &context, writer),
        ResourceKind::SearchIndex(index) => render_search_index(index, &context, writer),
        ResourceKind::Generic(generic) => render_generic(generic, &context, writer),
    }
}

fn render_environment(
    environment: &ExecutionEnvironment,
    context: &str,
    writer: &mut BlockWriter<'_>,
) -> CompileResult<()> {
    writer.header(FIELD_DEPTH, "execution_environment");
    if let Some(timeout) = environment.query_timeout {
        writer.plain(FIELD_DEPTH + 1, "query_timeout", timeout);
    }
    if let Some(environment_type) = &environment.environment_type {
        writer.quoted(FIELD_DEPTH + 1, "type", environment_type, context)?;
    }
    if let Some(warehouse) = &environment.warehouse {
        writer.quoted(FIELD_DEPTH + 1, "warehouse", warehouse, context)?;
    }
    Ok(())
}

fn render_routine(routine: &RoutineResource, context: &str, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    field(writer, "identifier", routine.identifier.as_ref(), context)?;
    field(writer, "name", routine.name.as_ref(), context)?;
    writer.quoted(FIELD_DEPTH, "type", routine.kind.as_str(), context)
}

fn render_semantic_model(
    model: &SemanticModelResource,
    context: &str,
    writer: &mut BlockWriter<'_>,
) -> CompileResult<()> {
    field(writer, "semantic_model_file", model.semantic_model_file.as_ref(), context)
}

fn render_search_index(
    index: &SearchIndexResource,
    context: &str,
    writer: &mut BlockWriter<'_>,
) -> CompileResult<()> {
    field(writer, "id_column", index.id_column.as_ref(), context)?;
    field(writer, "max_results", index.max_results.as_ref(), context)?;
    field(writer, "name", index.name.as_ref(), context)?;
    field(writer, "title_column", index.title_column.as_ref(), context)
}

fn render_generic(generic: &GenericResource, context: &str, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    let fields = [
        ("identifier", &generic.identifier),
        ("name", &generic.name),
        ("type", &generic.resource_type),
        ("max_results", &generic.max_results),
        ("title_column", &generic.title_column),
        ("search_service", &generic.search_service),
        ("filter", &generic.filter),
    ];
    for (key, value) in fields {
        field(writer, key, value.as_ref(), context)?;
    }
    Ok(())
}

fn field(writer: &mut BlockWriter<'_>, key: &str, value: Option<&SpecValue>, context: &str) -> CompileResult<()> {
    match value {
        None => Ok(()),
        Some(SpecValue::Text(text)) => writer.quoted(FIELD_DEPTH, key, text, context),
        Some(SpecValue::Integer(number)) => {
            writer.plain(FIELD_DEPTH, key, number);
            Ok(())
        }
        Some(SpecValue::Boolean(flag)) => {
            writer.plain(FIELD_DEPTH, key, flag);
            Ok(())
        }
        Some(SpecValue::Mapping(entries)) => {
            writer.header(FIELD_DEPTH, key);
            nested(entries, &format!("{context}.{key}"), writer)
        }
    }
}

fn nested(entries: &IndexMap<String, SpecValue>, context: &str, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    for (key, value) in entries {
        let SpecValue::Mapping(inner) = value else {
            if let Some(text) = value.scalar_text() {
                writer.quoted(FIELD_DEPTH + 1, key, &text, context)?;
            }
            continue;
        };

        writer.header(FIELD_DEPTH + 1, key);
        let inner_context = format!("{context}.{key}");
        for (sub_key, sub_value) in inner {
            match sub_value.scalar_text() {
                Some(text) => writer.quoted(FIELD_DEPTH + 2, sub_key, &text, &inner_context)?,
                None => tracing::warn!(
                    field = %format!("{inner_context}.{sub_key}"),
                    "dropping mapping nested deeper than two levels"
                ),
            }
        }
    }
    Ok(())
}
