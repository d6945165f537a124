use indexmap::IndexMap;

use crate::error::CompileResult;
use crate::writer::BlockWriter;

pub(super) fn render(models: &IndexMap<String, String>, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    for (role, model) in models {
        writer.quoted(1, role, model, "models")?;
    }
    Ok(())
}
