//! Lexicon Command Line Interface
//!
//! Builds a lexicon from a schema file and links text against it.
//!
//! # Usage
//!
//! ```bash
//! # Index statistics
//! lexicon_cli --schema config/schemas/friends.yaml stats
//!
//! # Link a sentence (reads stdin lines when no text is given)
//! lexicon_cli --schema config/schemas/friends.yaml link "I went to UPenn"
//! echo "dylan works at fb" | lexicon_cli -s config/schemas/friends.yaml -o json link
//!
//! # Which entities a surface string can denote
//! lexicon_cli -s config/schemas/friends.yaml lookup upenn
//!
//! # Surface forms generated for one entity
//! lexicon_cli -s config/schemas/friends.yaml synonyms "university of pennsylvania"
//! ```

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use entity_lexicon::config::LexiconConfig;
use entity_lexicon::entity_linking::normalize::tokenize_utterance;
use entity_lexicon::entity_linking::{
    entity_synonyms, EntityLinker, Lexicon, LinkMode, LinkedToken, Schema,
};

#[derive(Parser)]
#[command(name = "lexicon_cli")]
#[command(version = "0.1.0")]
#[command(about = "Build an entity lexicon from a schema and link text against it")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schema file (YAML or JSON)
    #[arg(long, short, global = true, env = "LEXICON_SCHEMA")]
    schema: Option<PathBuf>,

    /// Lexicon configuration file (YAML); falls back to LEXICON_CONFIG, then defaults
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format: json, text, or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Print catalog and index statistics
    Stats,

    /// Link text against the lexicon
    Link {
        /// Text to link (reads stdin lines if not provided)
        text: Vec<String>,
    },

    /// Show the entities a surface string can denote
    Lookup {
        /// Surface string, e.g. "upenn"
        surface: String,
    },

    /// Show the surface forms generated for one catalog entity
    Synonyms {
        /// Canonical entity string
        entity: String,

        /// Print every form, not just the first 40
        #[arg(long)]
        all: bool,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => LexiconConfig::load(path)?,
        None => LexiconConfig::from_env()?,
    };

    let schema_path = cli
        .schema
        .as_ref()
        .ok_or_else(|| anyhow!("no schema given (use --schema or LEXICON_SCHEMA)"))?;
    let schema = Schema::load(schema_path)
        .with_context(|| format!("Failed to load schema {}", schema_path.display()))?;

    let started = Instant::now();
    let lexicon = Arc::new(Lexicon::build(&schema, &config.index));
    if !cli.quiet && cli.format == OutputFormat::Pretty {
        eprintln!(
            "{} Built lexicon in {:.2?}",
            "OK".green(),
            started.elapsed()
        );
    }

    match &cli.command {
        Commands::Stats => cmd_stats(&lexicon, cli.format),
        Commands::Link { text } => {
            let linker = EntityLinker::new(Arc::clone(&lexicon), config.linker.clone());
            cmd_link(&linker, text, cli.format)
        }
        Commands::Lookup { surface } => cmd_lookup(&lexicon, surface, cli.format),
        Commands::Synonyms { entity, all } => {
            cmd_synonyms(&lexicon, &config, entity, *all, cli.format)
        }
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_stats(lexicon: &Lexicon, format: OutputFormat) -> Result<()> {
    let stats = lexicon.stats();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text | OutputFormat::Pretty => print!("{}", stats),
    }
    Ok(())
}

fn cmd_link(linker: &EntityLinker, text: &[String], format: OutputFormat) -> Result<()> {
    let lines: Vec<String> = if text.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .context("Failed to read stdin")?
    } else {
        vec![text.join(" ")]
    };

    for line in lines {
        let tokens = tokenize_utterance(&line);
        let output = linker.link_tokens(&tokens, LinkMode::WithEntities);

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&output)?),
            OutputFormat::Text => {
                let rendered: Vec<String> = output.tokens.iter().map(|t| t.to_string()).collect();
                println!("{}", rendered.join(" "));
            }
            OutputFormat::Pretty => {
                let rendered: Vec<String> = output.tokens.iter().map(render_pretty).collect();
                println!("{}", rendered.join(" "));
                for found in &output.entities {
                    println!("  {} {} -> {}", "•".cyan(), found.phrase, found.entity.bold());
                }
            }
        }
    }

    Ok(())
}

fn render_pretty(token: &LinkedToken) -> String {
    match token {
        LinkedToken::Unresolved(t) => t.dimmed().to_string(),
        LinkedToken::Resolved(span) => format!(
            "{}{}",
            span.phrase.green().bold(),
            format!("[{}]", span.entity_type).yellow()
        ),
    }
}

fn cmd_lookup(lexicon: &Lexicon, surface: &str, format: OutputFormat) -> Result<()> {
    let surface = surface.trim().to_lowercase();
    let hits = lexicon.lookup(&surface);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "surface": surface,
                "candidates": hits,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Pretty => {
            if hits.is_empty() {
                println!("{} '{}' is not in the index", "MISS".yellow(), surface);
            }
            for entry in hits {
                println!("{} ({})", entry.entity, entry.entity_type);
            }
        }
    }
    Ok(())
}

fn cmd_synonyms(
    lexicon: &Lexicon,
    config: &LexiconConfig,
    entity: &str,
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    let entity = entity.trim().to_lowercase();
    let entry = lexicon
        .catalog()
        .lookup(&entity)
        .ok_or_else(|| anyhow!("'{}' is not a catalog entity", entity))?;
    let generated = entity_synonyms(entry, &config.index);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "entity": entry.entity,
                "entity_type": entry.entity_type,
                "synonym_count": generated.synonyms.len(),
                "aliases": generated.aliases,
                "synonyms": generated.synonyms,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Pretty => {
            println!(
                "{} ({}): {} forms, {} aliases",
                entry.entity.bold(),
                entry.entity_type,
                generated.synonyms.len(),
                generated.aliases.len()
            );
            println!("  aliases: {}", generated.aliases.join(", "));
            let shown = if all { generated.synonyms.len() } else { 40 };
            let sample: Vec<&str> = generated
                .synonyms
                .iter()
                .take(shown)
                .map(String::as_str)
                .collect();
            println!("  forms: {}", sample.join(", "));
        }
    }
    Ok(())
}
