//! Compare command
//!
//! Usage: trackdiff compare <OLD> <NEW> [--format text|json] [--input plain|json]
//!        [--settings-from-new|--settings-from-old] [--author N] [--config FILE]
//!        [--output FILE] [--stats]

use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use trackdiff_core::diff::{render_stats, render_tracked, ChangeStats};
use trackdiff_core::errors::{DocumentRole, ExError, ExErrorKind};
use trackdiff_core::{AuthorId, Compare, CompareOptions, Document};

const OP_LOAD_OPTIONS: &str = "load_options";
const OP_LOAD_DOCUMENT: &str = "load_document";
const OP_WRITE_OUTPUT: &str = "write_output";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Inline `{+inserted+}` / `[-deleted-]` markers
    Text,
    /// The tracked document as JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One paragraph per line
    Plain,
    /// Documents in the JSON model format
    Json,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Old document
    pub old: PathBuf,

    /// New document
    pub new: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Input format of both documents
    #[arg(short, long, value_enum, default_value_t = InputFormat::Plain)]
    pub input: InputFormat,

    /// Take document settings from the new document (default)
    #[arg(long, conflicts_with = "settings_from_old")]
    pub settings_from_new: bool,

    /// Take document settings from the old document
    #[arg(long)]
    pub settings_from_old: bool,

    /// Author id recorded on tracked changes
    #[arg(long)]
    pub author: Option<u32>,

    /// TOML file with compare options; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print change counts to stderr (as JSON with `--format json`)
    #[arg(long)]
    pub stats: bool,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = resolve_options(&args)?;
    let old = load_document(&args.old, args.input, DocumentRole::Old)?;
    let new = load_document(&args.new, args.input, DocumentRole::New)?;

    let mut compare = Compare::documents(Arc::new(old), Arc::new(new), options);
    if !compare.run() {
        return Err(ExError::new(ExErrorKind::Aborted)
            .with_op("compare")
            .with_message("comparison did not complete")
            .into());
    }
    let dest = compare.into_dest().ok_or_else(|| {
        ExError::new(ExErrorKind::MissingDocument)
            .with_op("compare")
            .with_role(DocumentRole::Dest)
    })?;

    let rendered = match args.format {
        OutputFormat::Text => format!("{}\n", render_tracked(&dest)),
        OutputFormat::Json => {
            let json = dest
                .to_json_pretty()
                .map_err(|e| ExError::from(e).with_op(OP_WRITE_OUTPUT))?;
            format!("{}\n", json)
        }
    };

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, rendered).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op(OP_WRITE_OUTPUT)
                .with_message(format!("{}: {}", output_path.display(), e))
        })?;
        println!("✓ Wrote {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    if args.stats {
        let stats = ChangeStats::collect(&dest);
        match args.format {
            OutputFormat::Text => eprintln!("{}", render_stats(&stats)),
            OutputFormat::Json => eprintln!("{}", serde_json::to_string(&stats)?),
        }
    }

    Ok(())
}

/// Options from the config file (if any) with command-line flags applied on top.
fn resolve_options(args: &CompareArgs) -> Result<CompareOptions, ExError> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => CompareOptions::default(),
    };
    if let Some(author) = args.author {
        options = options.with_author(AuthorId(author));
    }
    if args.settings_from_old {
        options = options.with_settings_from_new(false);
    } else if args.settings_from_new {
        options = options.with_settings_from_new(true);
    }
    Ok(options)
}

fn load_options(path: &Path) -> Result<CompareOptions, ExError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Config)
            .with_op(OP_LOAD_OPTIONS)
            .with_message(format!("cannot read {}", path.display()))
            .with_source(ExError::new(ExErrorKind::Io).with_message(e.to_string()))
    })?;
    toml::from_str(&content).map_err(|e| {
        ExError::new(ExErrorKind::Config)
            .with_op(OP_LOAD_OPTIONS)
            .with_message(format!("{}: {}", path.display(), e))
    })
}

fn load_document(path: &Path, input: InputFormat, role: DocumentRole) -> Result<Document, ExError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op(OP_LOAD_DOCUMENT)
            .with_role(role)
            .with_message(format!("{}: {}", path.display(), e))
    })?;
    tracing::debug!(path = %path.display(), %role, bytes = content.len(), "loaded document");

    match input {
        InputFormat::Plain => {
            let content = content.strip_suffix('\n').unwrap_or(&content);
            Ok(Document::from_plain(content))
        }
        InputFormat::Json => Document::from_json(&content)
            .map_err(|e| ExError::from(e).with_op(OP_LOAD_DOCUMENT).with_role(role)),
    }
}
