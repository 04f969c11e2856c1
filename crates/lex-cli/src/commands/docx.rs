use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocxCommands;
use crate::output::output;

pub fn handle(action: &DocxCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DocxCommands::Inspect(args) => {
            let bytes = std::fs::read(&args.file)
                .with_context(|| format!("failed to read {}", args.file.display()))?;
            let summary = lex_docx::inspect(&bytes)
                .with_context(|| format!("{} is not a readable .docx", args.file.display()))?;
            output(&summary, flags.format)
        }
    }
}
