use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use plsqloracle_check::{
    CheckConfig, GrammarHandle, GrammarInfo, OutputFormat, SourceChecker, check, load,
};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "plsqloracle-check")]
#[command(about = "Load and inspect the PL/SQL Oracle tree-sitter grammar")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the grammar loads (default)
    Load {
        /// Load the grammar this many times
        #[arg(short, long)]
        repeat: Option<usize>,
    },
    /// Print node kinds and fields of the grammar
    Info,
    /// Parse files and report syntax issues
    Parse {
        /// Files to parse (defaults to the configured samples)
        files: Vec<PathBuf>,

        /// Maximum issues reported per file
        #[arg(long)]
        max_issues: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut config = match &cli.config {
        Some(path) => CheckConfig::from_file(path)?,
        None => CheckConfig::new(),
    };
    if let Some(format) = cli.format {
        config = config.with_format(format.into());
    }

    let handle = GrammarHandle::plsqloracle();

    match cli.command.unwrap_or(Command::Load { repeat: None }) {
        Command::Load { repeat } => {
            if let Some(repeat) = repeat {
                config = config.with_repeat(repeat);
            }
            config.validate()?;
            run_load(&handle, &config)
        }
        Command::Info => run_info(&handle, &config),
        Command::Parse { files, max_issues } => {
            if let Some(max_issues) = max_issues {
                config = config.with_max_issues(max_issues);
            }
            config.validate()?;
            let files = if files.is_empty() {
                config.samples.clone()
            } else {
                files
            };
            run_parse(&handle, &config, &files)
        }
    }
}

fn run_load(handle: &GrammarHandle, config: &CheckConfig) -> anyhow::Result<ExitCode> {
    let report = match check(handle, config.repeat) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}: {}", e, e.reason());
            return Ok(ExitCode::FAILURE);
        }
    };

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!(
            "{} grammar loaded {} time(s): ABI {}, {} node kinds, {} fields ({:?})",
            report.grammar,
            report.attempts,
            report.abi_version,
            report.node_kind_count,
            report.field_count,
            report.elapsed
        ),
    }
    Ok(ExitCode::SUCCESS)
}

fn run_info(handle: &GrammarHandle, config: &CheckConfig) -> anyhow::Result<ExitCode> {
    let language = match load(handle) {
        Ok(language) => language,
        Err(e) => {
            eprintln!("{}: {}", e, e.reason());
            return Ok(ExitCode::FAILURE);
        }
    };
    let info = GrammarInfo::from_language(handle.name(), &language);

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Text => {
            println!("{} (ABI {})", info.name, info.abi_version);
            println!("rules:");
            for (constant, rule) in info.rule_constants() {
                println!("  {} = {}", constant, rule);
            }
            println!("fields:");
            for (constant, field) in info.field_constants() {
                println!("  {} = {}", constant, field);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_parse(
    handle: &GrammarHandle,
    config: &CheckConfig,
    files: &[PathBuf],
) -> anyhow::Result<ExitCode> {
    if files.is_empty() {
        anyhow::bail!("No files to parse: pass paths or configure samples");
    }

    let language = match load(handle) {
        Ok(language) => language,
        Err(e) => {
            eprintln!("{}: {}", e, e.reason());
            return Ok(ExitCode::FAILURE);
        }
    };
    let mut checker = SourceChecker::new(&language)?.with_max_issues(config.max_issues);

    let mut all_clean = true;
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let report = checker.check_source(&source);
        all_clean &= report.clean;

        if config.format == OutputFormat::Text {
            if report.clean {
                println!("{}: ok", path.display());
            }
            for issue in &report.issues {
                println!("{}:{}", path.display(), issue);
            }
            if report.truncated {
                println!("{}: more issues omitted", path.display());
            }
        }
        reports.push(serde_json::json!({
            "path": path,
            "report": report,
        }));
    }

    if config.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(if all_clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
