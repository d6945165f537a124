use indexmap::IndexMap;

use crate::error::CompileResult;
use crate::writer::BlockWriter;

pub(super) fn render(profile: &IndexMap<String, String>, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    for (key, value) in profile {
        writer.quoted(1, key, value, "profile")?;
    }
    Ok(())
}
