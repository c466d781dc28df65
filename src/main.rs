//! CheckSupport CLI — suggest and fill reporting checklists for research
//! manuscripts using a local Ollama model.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checksupport::checklist::{classify, parse, AnswerRecord};
use checksupport::config;
use checksupport::extraction::extract_text;
use checksupport::oracle::OllamaClient;
use checksupport::report;
use checksupport::resolve::{resolve_guidance, resolve_section_answers};
use checksupport::suggest::suggest_checklist;

#[derive(Parser)]
#[command(
    name = "checksupport",
    version,
    about = "Suggest and fill reporting checklists for research manuscripts using local LLMs via Ollama"
)]
struct Cli {
    /// Ollama model name
    #[arg(long, global = true, default_value = config::DEFAULT_MODEL)]
    model: String,

    /// Ollama endpoint
    #[arg(long, global = true, default_value = config::OLLAMA_BASE_URL)]
    ollama_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest the appropriate reporting checklist for a manuscript
    Suggest {
        /// Path to the manuscript file (.pdf, .docx, .txt)
        manuscript: PathBuf,
    },
    /// Fill a checklist from a manuscript and write a PDF report
    Fill {
        /// Path to the checklist file (.pdf, .docx, .txt)
        #[arg(long)]
        checklist: PathBuf,

        /// Path to the manuscript file (.pdf, .docx, .txt)
        #[arg(long)]
        manuscript: PathBuf,

        /// Path for the generated PDF report
        #[arg(long, default_value = "filled_checklist.pdf")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let cli = Cli::parse();
    let oracle = OllamaClient::new(&cli.ollama_url, &cli.model, config::DEFAULT_TIMEOUT_SECS);

    match cli.command {
        Command::Suggest { manuscript } => run_suggest(&manuscript, &oracle),
        Command::Fill {
            checklist,
            manuscript,
            output,
        } => run_fill(&checklist, &manuscript, &output, &oracle),
    }
}

/// Extract text and reject files that yield nothing usable.
fn read_document(path: &Path) -> Result<String> {
    let text = extract_text(path)
        .with_context(|| format!("could not extract text from {}", path.display()))?;
    if text.trim().is_empty() {
        bail!("no text could be extracted from {}", path.display());
    }
    Ok(text)
}

fn run_suggest(manuscript: &Path, oracle: &OllamaClient) -> Result<()> {
    tracing::info!(path = %manuscript.display(), model = oracle.model(), "processing manuscript");
    let manuscript_text = read_document(manuscript)?;

    let available = oracle
        .list_models()
        .context("could not check available Ollama models")?;
    if !available.iter().any(|name| name == oracle.model()) {
        bail!(
            "model '{}' not found; available models: {}. Install it with: ollama pull {}",
            oracle.model(),
            available.join(", "),
            oracle.model()
        );
    }

    match suggest_checklist(&manuscript_text, oracle)? {
        Some(name) => {
            println!("Suggested checklist: {name}");
            Ok(())
        }
        None => bail!("could not determine an appropriate checklist"),
    }
}

fn run_fill(
    checklist: &Path,
    manuscript: &Path,
    output: &Path,
    oracle: &OllamaClient,
) -> Result<()> {
    tracing::info!(path = %manuscript.display(), "processing manuscript");
    let manuscript_text = read_document(manuscript)?;

    tracing::info!(path = %checklist.display(), "reading checklist file");
    let checklist_text = read_document(checklist)?;

    let variant = classify(&checklist_text);
    tracing::info!(variant = variant.as_str(), "detected checklist type");

    let mut document = parse(&checklist_text, variant);
    if document.is_empty() {
        bail!(
            "no sections could be parsed from checklist {}",
            checklist.display()
        );
    }
    tracing::info!(sections = document.sections.len(), "parsed checklist");

    let general_guidance = resolve_guidance(&mut document, oracle);

    tracing::info!(model = oracle.model(), "filling checklist");
    let answers: Vec<Vec<AnswerRecord>> = document
        .sections
        .iter()
        .map(|section| resolve_section_answers(section, &manuscript_text, oracle))
        .collect();

    let display_name = checklist
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| checklist.display().to_string());
    report::render(
        output,
        &display_name,
        &document.sections,
        &answers,
        Some(&general_guidance),
    )
    .context("failed to generate PDF report")?;

    println!("Checklist successfully generated: {}", output.display());
    Ok(())
}
