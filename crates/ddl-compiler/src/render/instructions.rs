use ddl_spec::Instructions;

use crate::error::CompileResult;
use crate::writer::BlockWriter;

pub(super) fn render(instructions: &Instructions, writer: &mut BlockWriter<'_>) -> CompileResult<()> {
    let fields = [
        ("response", &instructions.response),
        ("orchestration", &instructions.orchestration),
        ("system", &instructions.system),
    ];
    for (key, value) in fields {
        if let Some(text) = value {
            writer.quoted(1, key, text, "instructions")?;
        }
    }

    if !instructions.sample_questions.is_empty() {
        writer.header(1, "sample_questions");
        for question in &instructions.sample_questions {
            writer.quoted_item(2, "question", question, "instructions.sample_questions")?;
        }
    }
    Ok(())
}
