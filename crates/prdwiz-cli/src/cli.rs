//! Command definitions and their handlers.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types, so the catalog never sees a framework type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Catalog
//! ```

use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{ArgGroup, Args, Subcommand};
use log::{debug, info};
use prdwiz_core::{
    notify::NotificationCenter,
    wizard::{Sequencer, StepOutcome, SubmitOutcome, WizardConfig},
    Catalog, CreateResult, DocumentId, NewDocument, PrdDraft, ProofKind, SubmitProof,
    ToggleSubTask, UpdateDocument, ValidationResult,
};

use crate::renderer::TerminalRenderer;

/// Show one document
#[derive(Args)]
pub struct ShowDocumentArgs {
    /// Id of the document, as printed by `prd doc list`
    pub id: String,
}

impl From<ShowDocumentArgs> for DocumentId {
    fn from(val: ShowDocumentArgs) -> Self {
        DocumentId { id: val.id }
    }
}

/// Create a document from a draft file
///
/// The draft is a JSON object with any subset of the document fields. It is
/// walked through the five wizard steps and saved once every step passes.
#[derive(Args)]
pub struct NewDocumentArgs {
    /// Path to the draft JSON file
    pub draft: PathBuf,
    /// Milliseconds to wait after saving before the wizard resets
    #[arg(long, default_value_t = 1500)]
    pub grace_ms: u64,
}

/// Replace a document's contents from a draft file
#[derive(Args)]
pub struct UpdateDocumentArgs {
    pub id: String,
    /// Path to a JSON file holding the complete document
    pub draft: PathBuf,
}

/// Delete a document and its tracker
#[derive(Args)]
pub struct DeleteDocumentArgs {
    pub id: String,
    /// Required to actually delete
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum DocCommands {
    /// List all documents
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a document
    #[command(alias = "s")]
    Show(ShowDocumentArgs),
    /// Create a document from a draft file
    #[command(alias = "n")]
    New(NewDocumentArgs),
    /// Replace a document, keeping its id
    #[command(alias = "u")]
    Update(UpdateDocumentArgs),
    /// Print a document as JSON with its export time
    Export(ShowDocumentArgs),
    /// Delete a document permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteDocumentArgs),
}

/// Flip the completion flag of one subtask
#[derive(Args)]
pub struct ToggleArgs {
    /// Document id
    pub id: String,
    /// Stage id, e.g. `database-setup`
    pub stage: String,
    /// Subtask id, e.g. `setup-postgres`
    pub task: String,
}

impl From<ToggleArgs> for ToggleSubTask {
    fn from(val: ToggleArgs) -> Self {
        ToggleSubTask {
            prd_id: val.id,
            stage_id: val.stage,
            task_id: val.task,
        }
    }
}

/// Attach proof of completion to a stage
#[derive(Args)]
#[command(group(ArgGroup::new("evidence").required(true).args(["link", "screenshot"])))]
pub struct ProofArgs {
    /// Document id
    pub id: String,
    /// Stage id
    pub stage: String,
    /// URL showing the finished work
    #[arg(long)]
    pub link: Option<String>,
    /// Image file, stored inline as a data URL
    #[arg(long)]
    pub screenshot: Option<PathBuf>,
}

impl ProofArgs {
    fn into_params(self) -> Result<SubmitProof> {
        let (kind, content) = match (self.link, self.screenshot) {
            (Some(link), _) => (ProofKind::Link, link),
            (None, Some(path)) => (ProofKind::Screenshot, screenshot_data_url(&path)?),
            (None, None) => bail!("Either --link or --screenshot is required"),
        };
        Ok(SubmitProof {
            prd_id: self.id,
            stage_id: self.stage,
            kind,
            content,
        })
    }
}

#[derive(Subcommand)]
pub enum TrackCommands {
    /// Show the implementation checklist, creating it on first use
    #[command(alias = "s")]
    Show(ShowDocumentArgs),
    /// Toggle a subtask
    #[command(alias = "t")]
    Toggle(ToggleArgs),
    /// Attach proof to a stage
    #[command(alias = "p")]
    Proof(ProofArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub addr: SocketAddr,
}

fn read_draft(path: &Path) -> Result<PrdDraft> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft {}", path.display()))?;
    let draft = serde_json::from_str(&contents)
        .with_context(|| format!("Draft {} is not valid JSON", path.display()))?;
    debug!("Loaded draft from {}", path.display());
    Ok(draft)
}

/// Encode an image file as a `data:` URL.
fn screenshot_data_url(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read screenshot {}", path.display()))?;
    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Command handlers bound to one catalog and renderer.
pub struct Cli {
    catalog: Catalog,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(catalog: Catalog, renderer: TerminalRenderer) -> Self {
        Self { catalog, renderer }
    }

    pub async fn handle_doc_command(self, command: DocCommands) -> Result<()> {
        match command {
            DocCommands::List => self.list_documents().await,
            DocCommands::Show(args) => self.show_document(args.into()).await,
            DocCommands::New(args) => self.new_document(args).await,
            DocCommands::Update(args) => self.update_document(args).await,
            DocCommands::Export(args) => self.export_document(args.into()).await,
            DocCommands::Delete(args) => self.delete_document(args).await,
        }
    }

    pub async fn handle_track_command(self, command: TrackCommands) -> Result<()> {
        match command {
            TrackCommands::Show(args) => self.show_tracker(args.into()).await,
            TrackCommands::Toggle(args) => self.toggle_subtask(args.into()).await,
            TrackCommands::Proof(args) => self.submit_proof(args.into_params()?).await,
        }
    }

    pub async fn list_documents(&self) -> Result<()> {
        let summaries = self
            .catalog
            .list_document_summaries()
            .await
            .context("Failed to list documents")?;
        self.renderer.render(&summaries.to_string())
    }

    async fn show_document(&self, params: DocumentId) -> Result<()> {
        match self.catalog.get_document(&params).await? {
            Some(document) => self.renderer.render(&document.to_string()),
            None => bail!("PRD with ID {} not found", params.id),
        }
    }

    async fn update_document(&self, args: UpdateDocumentArgs) -> Result<()> {
        let draft = read_draft(&args.draft)?;
        let document = NewDocument::try_from(draft)
            .with_context(|| format!("Draft {} is incomplete", args.draft.display()))?;

        let params = UpdateDocument {
            id: args.id,
            document,
        };
        let id = params.id.clone();
        let Some(updated) = self.catalog.update_document(params).await? else {
            bail!("PRD with ID {id} not found");
        };
        info!("Updated PRD {id}");
        self.renderer
            .render(&format!("Updated PRD with ID: {id}\n\n{updated}"))
    }

    async fn export_document(&self, params: DocumentId) -> Result<()> {
        let Some(export) = self.catalog.export_document(&params).await? else {
            bail!("PRD with ID {} not found", params.id);
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
        Ok(())
    }

    async fn delete_document(&self, args: DeleteDocumentArgs) -> Result<()> {
        if !args.confirm {
            bail!("Refusing to delete {} without --confirm", args.id);
        }
        let status = self
            .catalog
            .delete_document_with_confirmation(&DocumentId { id: args.id })
            .await?;
        self.renderer.render(&status.to_string())?;
        if !status.success {
            bail!("{}", status.message);
        }
        Ok(())
    }

    /// Walk a draft through the wizard and submit it.
    async fn new_document(&self, args: NewDocumentArgs) -> Result<()> {
        let draft = read_draft(&args.draft)?;

        let mut center = NotificationCenter::default();
        let mut wizard = Sequencer::new(self.catalog.clone(), center.notifier()).with_config(
            WizardConfig {
                grace_period: Duration::from_millis(args.grace_ms),
            },
        );
        wizard.update(draft);

        loop {
            let step = wizard.step();
            let outcome = wizard.go_next();
            self.flush_notifications(&mut center)?;
            match outcome {
                StepOutcome::Advanced(next) => debug!("{step} passed, now on {next}"),
                StepOutcome::Ready => break,
                StepOutcome::Rejected(result) => {
                    self.renderer
                        .render(&format!("## {}\n\n{}\n\n", step.title(), step.description()))?;
                    self.render_errors(&result)?;
                    bail!("{step} is incomplete");
                }
            }
        }

        let outcome = wizard.submit().await;
        self.flush_notifications(&mut center)?;
        match outcome.context("Failed to save PRD")? {
            SubmitOutcome::Saved { document, .. } => {
                info!("Created PRD {}", document.id);
                self.renderer
                    .render(&CreateResult::new(document).to_string())
            }
            SubmitOutcome::Rejected(result) => {
                self.render_errors(&result)?;
                bail!("Draft is incomplete");
            }
        }
    }

    async fn show_tracker(&self, params: DocumentId) -> Result<()> {
        let session = self.catalog.open_tracker(&params).await?;
        self.renderer.render(&session.tracker().to_string())
    }

    async fn toggle_subtask(&self, params: ToggleSubTask) -> Result<()> {
        let tracker = self.catalog.toggle_subtask(&params).await?;
        if let Some(stage) = tracker.stage(&params.stage_id) {
            self.renderer.render(&stage.to_string())?;
        }
        Ok(())
    }

    async fn submit_proof(&self, params: SubmitProof) -> Result<()> {
        let tracker = self.catalog.submit_proof(&params).await?;
        if let Some(stage) = tracker.stage(&params.stage_id) {
            self.renderer.render(&stage.to_string())?;
        }
        Ok(())
    }

    fn flush_notifications(&self, center: &mut NotificationCenter) -> Result<()> {
        for notification in center.pump(Instant::now()) {
            self.renderer.render_notification(&notification)?;
        }
        Ok(())
    }

    fn render_errors(&self, result: &ValidationResult) -> Result<()> {
        let list: String = result
            .errors
            .iter()
            .map(|error| format!("- {error}\n"))
            .collect();
        self.renderer.render(&list)
    }
}

/// Print the JSON Schema of a submitted document.
pub fn print_schema() -> Result<()> {
    let schema = schemars::schema_for!(NewDocument);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
