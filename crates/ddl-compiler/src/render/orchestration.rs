use ddl_spec::OrchestrationBudget;

use crate::writer::BlockWriter;

pub(super) fn render(budget: OrchestrationBudget, writer: &mut BlockWriter<'_>) {
    writer.header(1, "budget");
    if let Some(seconds) = budget.seconds {
        writer.plain(2, "seconds", seconds);
    }
    if let Some(tokens) = budget.tokens {
        writer.plain(2, "tokens", tokens);
    }
}
