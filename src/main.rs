//! DDocs - document registry with version history
//!
//! Documents carry an ordered list of versions, each stamped with a
//! keccak256 digest. The registry is kept as a JSON document list in the
//! data directory.

mod app;
mod core;
mod error;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{DocsApp, UploadRequest};
use crate::core::config::AppConfig;
use crate::core::hash::{keccak256, Digest};
use crate::ui::{DocumentListPanel, ReportPanel, VersionListPanel, ViewerPanel};

#[derive(Parser)]
#[command(name = "ddocs")]
#[command(about = "Document registry with hash-stamped version history")]
struct Cli {
    /// Override the document store directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Increase log verbosity
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file as a new document or a new version
    Upload {
        file: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        doc_type: String,
        #[arg(long, default_value = "")]
        author: String,
        /// Append a version to this document id
        #[arg(long)]
        version_of: Option<String>,
    },
    /// List all documents
    List,
    /// Show version history
    Versions {
        /// Document id; all documents when omitted
        id: Option<String>,
    },
    /// Show one version of a document
    View {
        id: String,
        version: String,
        /// Open the saved copy with the system viewer
        #[arg(long)]
        open: bool,
    },
    /// Summarize documents per type
    Report,
    /// Print the keccak256 digest of a file or text
    Hash {
        #[arg(required_unless_present = "text")]
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
    },
    /// Upload every file in a directory as a new document
    Import {
        dir: PathBuf,
        #[arg(long, default_value = "")]
        author: String,
    },
    /// Show the active configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Using default config: {:#}", e);
        AppConfig::default()
    });
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    match cli.command {
        Commands::Hash { file, text } => {
            let digest = match (file, text) {
                (_, Some(text)) => keccak256(text),
                (Some(file), None) => keccak256(
                    std::fs::read(&file)
                        .with_context(|| format!("Failed to read file: {}", file.display()))?,
                ),
                (None, None) => bail!("Nothing to hash"),
            };
            println!("{}", digest);
        }
        Commands::Config => {
            if let Some(path) = AppConfig::config_path() {
                println!("Config file:  {}", path.display());
            }
            println!("Data dir:     {}", config.get_data_dir().display());
            println!("Uploads dir:  {}", config.get_uploads_dir().display());
            println!("Hash input:   {:?}", config.registry.hash_input);
            println!("Save uploads: {}", config.registry.save_uploads);
        }
        Commands::List => {
            let app = DocsApp::open(config);
            print!("{}", DocumentListPanel::render(app.registry().documents()));
        }
        Commands::Versions { id } => {
            let app = DocsApp::open(config);
            match id {
                Some(id) => print!("{}", VersionListPanel::render(app.document(&normalize_id(id))?)),
                None => print!("{}", VersionListPanel::render_all(app.registry().documents())),
            }
        }
        Commands::View { id, version, open } => {
            let id = normalize_id(id);
            let app = DocsApp::open(config);
            let (doc, record, content) = app.open_version(&id, &version)?;
            print!("{}", ViewerPanel::render(doc, record, content.as_deref()));

            if open {
                match app.upload_location(&id, &version)? {
                    Some(path) if path.exists() => open::that(&path)
                        .with_context(|| format!("Failed to open {}", path.display()))?,
                    _ => bail!("No saved copy of {} {}", id, version),
                }
            }
        }
        Commands::Report => {
            let app = DocsApp::open(config);
            print!("{}", ReportPanel::render(app.registry().documents()));
        }
        Commands::Upload {
            file,
            name,
            doc_type,
            author,
            version_of,
        } => {
            let mut app = DocsApp::open(config);
            let request = UploadRequest {
                file: Some(file),
                name,
                doc_type,
                author,
                existing_document: version_of.map(normalize_id),
            };
            let outcome = app.upload(&request)?;
            println!("{}", outcome.message);
            println!("Document: {}", outcome.document_id);
            println!("Version:  {}", outcome.version);
            println!("Hash:     {}", outcome.hash);
            println!("Content:  {}", outcome.content_hash);
            save_recent(&app.config.recent_documents);
        }
        Commands::Import { dir, author } => {
            let mut app = DocsApp::open(config);
            let mut failed = 0;
            for result in app.import(&dir, &author) {
                match result {
                    Ok(outcome) => println!("{}  {}", outcome.document_id, outcome.message),
                    Err(e) => {
                        failed += 1;
                        eprintln!("{}", e);
                    }
                }
            }
            save_recent(&app.config.recent_documents);

            if failed > 0 {
                bail!("{} files failed to import", failed);
            }
        }
    }

    Ok(())
}

/// Canonical lowercase form of a pasted document id
fn normalize_id(id: String) -> String {
    Digest::parse(&id).map(String::from).unwrap_or(id)
}

/// Persist the recent-documents list without failing the command
///
/// Only the list is written back, so command-line overrides stay transient.
fn save_recent(recent: &[String]) {
    if let Err(e) = AppConfig::save_recent(recent) {
        tracing::warn!("Failed to save recent documents: {:#}", e);
    }
}
