//! `lex generate`: submit a form, then poll the job on a fixed timer.

use anyhow::Context;
use lex_config::LexConfig;
use lex_core::enums::JobStatus;
use lex_core::input::PetitionInput;
use lex_core::responses::{GenerationAccepted, GenerationStatusResponse};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::client::ApiClient;
use crate::output::output;
use crate::poll::{PollOutcome, poll_until};
use crate::progress::Progress;

pub async fn handle(
    args: &GenerateArgs,
    flags: &GlobalFlags,
    config: &LexConfig,
    client: &ApiClient,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let input: PetitionInput = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid petition form", args.file.display()))?;
    input.validate()?;

    let accepted: GenerationAccepted = client.post("/api/petitions/generate", &input).await?;
    if args.no_wait {
        return output(&accepted, flags.format);
    }
    let spinner = Progress::spinner(
        &format!("Geração {} enviada, aguardando...", accepted.job_id),
        !flags.quiet,
    );

    let path = format!("/api/petitions/generate/{}", accepted.job_id);
    let outcome = poll_until(
        config.client.poll_interval(),
        config.client.max_polls,
        || client.get::<GenerationStatusResponse>(&path),
        |status| status.status.is_terminal(),
        |poll, status| {
            tracing::debug!(poll, status = %status.status, "job not finished");
            spinner.set_message(&format!("Geração {}: {}", status.job_id, status.status));
        },
    )
    .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(error) => {
            spinner.finish_err("falha ao consultar a geração");
            return Err(error.into());
        }
    };

    match outcome {
        PollOutcome::Finished(status) => {
            spinner.finish_clear();
            output(&status, flags.format)?;
            if status.status == JobStatus::Failed {
                let error = status.error.as_deref().unwrap_or("unknown error");
                anyhow::bail!("generation failed: {error}");
            }
            Ok(())
        }
        PollOutcome::GaveUp { polls, last } => {
            spinner.finish_clear();
            output(&last, flags.format)?;
            anyhow::bail!(
                "job {} still {} after {polls} checks; it keeps running on the server",
                last.job_id,
                last.status
            )
        }
    }
}
