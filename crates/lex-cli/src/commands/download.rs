use std::path::PathBuf;

use anyhow::Context;
use lex_core::responses::DocumentDownload;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DownloadArgs;
use crate::client::ApiClient;
use crate::output::output;

#[derive(Serialize)]
struct DownloadResponse {
    path: String,
    bytes: usize,
}

pub async fn handle(args: &DownloadArgs, flags: &GlobalFlags, client: &ApiClient) -> anyhow::Result<()> {
    let envelope: DocumentDownload = client
        .get(&format!("/api/petitions/{}/download", args.id))
        .await?;
    let bytes = lex_docx::decode_base64(&envelope.content).context("server sent invalid base64")?;

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&envelope.filename));
    std::fs::write(&path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;

    output(
        &DownloadResponse {
            path: path.display().to_string(),
            bytes: bytes.len(),
        },
        flags.format,
    )
}
