//! Wires the cookie jar, HTTP client, orchestrator and renderer together.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use buzzer_client::{ClientConfig, ClientError};
use buzzer_protocol::FolderId;
use buzzer_upload::{HttpApi, UploadError, UploadOrchestrator, UploadOutcome, directory_name};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::Cli;
use crate::config::Config;
use crate::cookies;
use crate::render;

const FOLDER_EXISTS: &str = "Folder Name already exist! Please input Folder ID manually.";
const FOLDER_NOT_FOUND: &str = "Folder ID not Found! Please input Folder ID manually.";

/// Uploads `cli.path` and prints the result panel.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let cookie_path = cli.cookies.unwrap_or_else(|| config.cookies.clone());
    let credential = cookies::load_credential(&cookie_path)?;

    let client_config = ClientConfig::new(credential)
        .with_base_url(cli.base_url.as_deref().unwrap_or(&config.base_url))
        .with_request_timeout(config.request_timeout())
        .with_connect_timeout(config.connect_timeout());
    tracing::debug!(base_url = %client_config.base_url, "client configured");

    let api = Arc::new(HttpApi::new(&client_config)?);
    let mut orchestrator = UploadOrchestrator::new(api);
    let events = orchestrator
        .take_events()
        .context("event receiver already taken")?;
    let renderer = tokio::spawn(render::run(events));

    let metadata = tokio::fs::metadata(&cli.path)
        .await
        .with_context(|| format!("{} not found", cli.path.display()))?;

    let result = if metadata.is_dir() {
        upload_directory(&orchestrator, &cli.path, cli.folder.as_deref()).await
    } else {
        upload_file(&orchestrator, &cli.path, cli.folder.as_deref()).await
    };

    // Closing the event channel lets the renderer drain and exit.
    drop(orchestrator);
    let _ = renderer.await;

    let outcome = result?;
    render::print_outcome(&outcome);
    Ok(())
}

async fn upload_directory(
    orchestrator: &UploadOrchestrator,
    dir: &Path,
    folder_flag: Option<&str>,
) -> anyhow::Result<UploadOutcome> {
    let name = directory_name(dir)?;
    let folder = match orchestrator.prepare_folder(&name).await {
        Ok(folder) => folder,
        Err(UploadError::FolderNeedsOperator(source)) => match folder_flag {
            Some(raw) => FolderId::parse(raw)?,
            None => prompt_folder(operator_prompt(&source)).await?,
        },
        Err(e) => return Err(e.into()),
    };

    let outcome = orchestrator.upload_directory(dir, &folder).await?;
    tracing::info!(
        folder = %folder,
        files = outcome.files.len(),
        skipped = outcome.skipped.len(),
        "directory uploaded"
    );
    Ok(outcome.summary)
}

async fn upload_file(
    orchestrator: &UploadOrchestrator,
    path: &Path,
    folder_flag: Option<&str>,
) -> anyhow::Result<UploadOutcome> {
    let folder = match folder_flag {
        Some(raw) => FolderId::parse(raw)?,
        None => prompt_folder(FOLDER_NOT_FOUND).await?,
    };
    Ok(orchestrator.upload_file(path, &folder).await?)
}

/// Prompt shown when folder creation needs an operator-supplied id.
fn operator_prompt(source: &ClientError) -> &'static str {
    match source {
        ClientError::NameConflict { .. } => FOLDER_EXISTS,
        _ => FOLDER_NOT_FOUND,
    }
}

/// Asks the operator for a folder id on stdin.
async fn prompt_folder(message: &str) -> anyhow::Result<FolderId> {
    eprintln!("{}", message.red().bold());

    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Folder ID : ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    if read == 0 {
        bail!("no folder id given");
    }
    Ok(FolderId::parse(&line)?)
}
