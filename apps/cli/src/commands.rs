//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use placard_core::{LabelParser, ParsedLabel, RecognizedFragment, joined_text, run_samples};
use placard_shared::{AppConfig, OutputFormat, init_config, load_config};
use tokio::io::AsyncReadExt;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::output::{ParsedDocument, render_json, render_samples, render_text};

/// Name shown for standard input.
const STDIN: &str = "-";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Placard: read museum and gallery labels.
#[derive(Parser)]
#[command(
    name = "placard",
    version,
    about = "Extract title, author, background and interpretation from exhibit label text.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Parse label text from files or stdin.
    Parse {
        /// Input files; stdin when omitted or `-`.
        files: Vec<PathBuf>,

        /// Inputs are JSON arrays of recognized text fragments.
        #[arg(long)]
        fragments: bool,

        /// Skip the model backend and use heuristics only.
        #[arg(long)]
        no_model: bool,

        /// Output format: text or json (defaults to `[defaults] format`).
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Existing record (JSON with any of the label fields). Parsed
        /// values only fill the fields it leaves empty.
        #[arg(long, value_name = "RECORD")]
        merge: Option<PathBuf>,
    },

    /// Run the built-in sample labels and report misses.
    Samples {
        /// Also try the model backend.
        #[arg(long)]
        with_model: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so that
/// stdout carries only parse output.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "placard=info",
        1 => "placard=debug",
        _ => "placard=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse {
            files,
            fragments,
            no_model,
            format,
            merge,
        } => cmd_parse(files, fragments, no_model, format, merge).await,
        Command::Samples { with_model } => cmd_samples(with_model).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

fn build_parser(config: &AppConfig, use_model: bool) -> Result<LabelParser> {
    if !use_model {
        info!("model backend disabled for this run");
        return Ok(LabelParser::heuristic_only());
    }
    Ok(LabelParser::from_config(config)?)
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

/// One input to parse: a file, or stdin when `None`.
type Input = Option<PathBuf>;

fn resolve_inputs(files: Vec<PathBuf>) -> Result<Vec<Input>> {
    if files.is_empty() {
        return Ok(vec![None]);
    }
    let inputs: Vec<Input> = files
        .into_iter()
        .map(|file| (file != Path::new(STDIN)).then_some(file))
        .collect();
    if inputs.iter().filter(|input| input.is_none()).count() > 1 {
        return Err(eyre!("stdin (`-`) can only be given once"));
    }
    Ok(inputs)
}

fn input_name(input: &Input) -> String {
    match input {
        Some(path) => path.display().to_string(),
        None => STDIN.to_string(),
    }
}

async fn read_input(input: &Input) -> Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("cannot read '{}'", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .wrap_err("cannot read stdin")?;
            Ok(text)
        }
    }
}

async fn parse_input(parser: &LabelParser, input: Input, fragments: bool) -> Result<ParsedDocument> {
    let name = input_name(&input);
    let raw = read_input(&input).await?;

    if fragments {
        let fragments: Vec<RecognizedFragment> = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("'{name}' is not a JSON array of fragments"))?;
        let outcome = parser.parse_detailed(&fragments).await;
        return Ok(ParsedDocument::new(name, outcome, Some(joined_text(&fragments))));
    }

    let outcome = parser.parse_text_detailed(&raw).await;
    Ok(ParsedDocument::new(name, outcome, None))
}

async fn cmd_parse(
    files: Vec<PathBuf>,
    fragments: bool,
    no_model: bool,
    format: Option<OutputFormat>,
    merge: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;
    let format = format.unwrap_or(config.defaults.format);
    let parser = build_parser(&config, !no_model)?;
    let inputs = resolve_inputs(files)?;

    let mut documents = if inputs.len() == 1 {
        let input = inputs.into_iter().next().unwrap_or_default();
        vec![parse_input(&parser, input, fragments).await?]
    } else {
        parse_many(&parser, inputs, fragments).await?
    };

    if let Some(path) = merge {
        let record = read_record(&path).await?;
        for document in &mut documents {
            merge_into_record(&record, document);
        }
    }

    let rendered = match format {
        OutputFormat::Text => render_text(&documents),
        OutputFormat::Json => render_json(&documents)? + "\n",
    };
    print!("{rendered}");
    Ok(())
}

async fn read_record(path: &Path) -> Result<ParsedLabel> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("cannot read record '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .wrap_err_with(|| format!("'{}' is not a label record", path.display()))
}

/// Replace the parsed label with `record`, filling only its empty fields
/// from the parse.
fn merge_into_record(record: &ParsedLabel, document: &mut ParsedDocument) {
    let mut merged = record.clone();
    merged.fill_missing(&document.label);
    document.label = merged;
}

/// Parse several inputs concurrently. Results keep the input order; a
/// failing input is reported and the others are still printed.
async fn parse_many(
    parser: &LabelParser,
    inputs: Vec<Input>,
    fragments: bool,
) -> Result<Vec<ParsedDocument>> {
    let total = inputs.len();
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(80));

    info!(inputs = total, "parsing labels");

    let mut tasks = JoinSet::new();
    for (index, input) in inputs.into_iter().enumerate() {
        let parser = parser.clone();
        tasks.spawn(async move {
            let name = input_name(&input);
            (index, name, parse_input(&parser, input, fragments).await)
        });
    }

    let mut slots: Vec<Option<ParsedDocument>> = (0..total).map(|_| None).collect();
    let mut failures = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (index, name, result) = joined.wrap_err("parse task failed")?;
        progress.set_message(name.clone());
        progress.inc(1);
        match result {
            Ok(document) => slots[index] = Some(document),
            Err(e) => {
                failures += 1;
                warn!(input = %name, error = %e, "skipping input");
            }
        }
    }
    progress.finish_and_clear();

    let documents: Vec<ParsedDocument> = slots.into_iter().flatten().collect();
    if documents.is_empty() && failures > 0 {
        return Err(eyre!("none of the {total} inputs could be parsed"));
    }
    if failures > 0 {
        warn!(failures, "some inputs were skipped");
    }
    Ok(documents)
}

// ---------------------------------------------------------------------------
// samples / config
// ---------------------------------------------------------------------------

async fn cmd_samples(with_model: bool) -> Result<()> {
    let parser = if with_model {
        build_parser(&load_config()?, true)?
    } else {
        LabelParser::heuristic_only()
    };
    let reports = run_samples(&parser).await;
    print!("{}", render_samples(&reports));
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_parse_flags() {
        let cli = Cli::try_parse_from([
            "placard", "parse", "a.txt", "-", "--no-model", "--format", "json",
        ])
        .unwrap();
        let Command::Parse {
            files,
            no_model,
            format,
            fragments,
            merge,
        } = cli.command
        else {
            panic!("expected parse command");
        };
        assert_eq!(files, [PathBuf::from("a.txt"), PathBuf::from("-")]);
        assert!(no_model);
        assert!(!fragments);
        assert_eq!(format, Some(OutputFormat::Json));
        assert!(merge.is_none());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["placard", "parse", "--format", "yaml"]).is_err());
    }

    #[test]
    fn dash_means_stdin() {
        let inputs = resolve_inputs(vec!["a.txt".into(), "-".into()]).unwrap();
        assert_eq!(inputs, [Some(PathBuf::from("a.txt")), None]);
        assert_eq!(resolve_inputs(Vec::new()).unwrap(), [None::<PathBuf>]);
        assert!(resolve_inputs(vec!["-".into(), "-".into()]).is_err());
    }

    #[tokio::test]
    async fn parses_fixture_files_in_order() {
        let parser = LabelParser::heuristic_only();
        let inputs = vec![
            Some(PathBuf::from("../../fixtures/labels/vermeer.txt")),
            Some(PathBuf::from("../../fixtures/labels/potter.txt")),
        ];
        let documents = parse_many(&parser, inputs, false).await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].label.author, "Johannes Vermeer");
        assert_eq!(documents[1].label.author, "Paulus Potter");
    }

    #[tokio::test]
    async fn unreadable_input_is_skipped() {
        let parser = LabelParser::heuristic_only();
        let inputs = vec![
            Some(PathBuf::from("../../fixtures/labels/does-not-exist.txt")),
            Some(PathBuf::from("../../fixtures/labels/potter.txt")),
        ];
        let documents = parse_many(&parser, inputs, false).await.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].label.title, "Cattle in a Meadow");
    }

    #[tokio::test]
    async fn fragments_input_carries_joined_text() {
        let parser = LabelParser::heuristic_only();
        let input = Some(PathBuf::from("../../fixtures/labels/starry-night.fragments.json"));
        let document = parse_input(&parser, input, true).await.unwrap();
        assert_eq!(document.label.title, "The Starry Night");
        let text = document.text.unwrap();
        assert!(text.starts_with("Vincent van Gogh (1853-1890)\n"));
    }

    #[tokio::test]
    async fn plain_text_is_not_fragments() {
        let parser = LabelParser::heuristic_only();
        let input = Some(PathBuf::from("../../fixtures/labels/potter.txt"));
        assert!(parse_input(&parser, input, true).await.is_err());
    }

    #[tokio::test]
    async fn merge_fills_only_empty_record_fields() {
        let parser = LabelParser::heuristic_only();
        let input = Some(PathBuf::from("../../fixtures/labels/potter.txt"));
        let mut document = parse_input(&parser, input, false).await.unwrap();

        let record = read_record(Path::new("../../fixtures/labels/potter.record.json"))
            .await
            .unwrap();
        merge_into_record(&record, &mut document);

        assert_eq!(document.label.title, "Cows in a Field");
        assert_eq!(document.label.author, "Paulus Potter");
        assert_eq!(document.label.interpretation, "Catalogued from the museum guide.");
        assert!(document.label.background.starts_with("Acquired by Prince William V"));
    }

    #[tokio::test]
    async fn merge_record_must_be_json() {
        let err = read_record(Path::new("../../fixtures/labels/potter.txt")).await;
        assert!(err.is_err());
    }
}
