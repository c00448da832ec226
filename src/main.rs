use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chatsift::{
    analyze_transcript, parse_transcript_file, preview_transcript, rank_contacts, read_transcript,
    validate_transcript, write_json, AnalysisSummary, InferenceConfig, ParserConfig, ScorerConfig,
    SearchOptions, Vocabulary,
};

#[derive(Parser)]
#[command(name = "chatsift")]
#[command(author, version, about = "Chat export parsing and contact expertise search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a file looks like a chat export
    Validate {
        /// Chat export (plain text)
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize a chat export without parsing all of it
    Preview {
        /// Chat export (plain text)
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse a chat export into structured JSON
    Parse {
        /// Chat export (plain text)
        input: PathBuf,

        /// Output file for the parsed transcript (JSON); stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Infer expertise, topics and style for every contact
    Analyze {
        /// Chat export (plain text)
        input: PathBuf,

        /// Output file for contact reports (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Vocabulary table (TOML) replacing the built-in one
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Keywords seen fewer times are ignored
        #[arg(long, default_value = "2")]
        min_keyword_frequency: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Rank contacts in a chat export against a query
    Search {
        /// Chat export (plain text)
        input: PathBuf,

        /// Free-text query, e.g. "who knows kubernetes"
        query: String,

        /// Hits must score strictly above this (0-100)
        #[arg(long, default_value = "20")]
        min_score: u8,

        /// Maximum number of hits
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Vocabulary table (TOML) replacing the built-in one
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input, verbose } => {
            setup_logging(verbose);
            validate(&input)
        }
        Commands::Preview { input, verbose } => {
            setup_logging(verbose);
            preview(&input).map(|_| ExitCode::SUCCESS)
        }
        Commands::Parse {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            parse(&input, output.as_deref()).map(|_| ExitCode::SUCCESS)
        }
        Commands::Analyze {
            input,
            output,
            vocabulary,
            min_keyword_frequency,
            verbose,
        } => {
            setup_logging(verbose);
            let config = InferenceConfig {
                min_keyword_frequency,
                ..Default::default()
            };
            analyze(&input, output.as_deref(), vocabulary.as_deref(), &config)
                .map(|_| ExitCode::SUCCESS)
        }
        Commands::Search {
            input,
            query,
            min_score,
            limit,
            vocabulary,
            verbose,
        } => {
            setup_logging(verbose);
            let options = SearchOptions {
                min_score,
                limit,
                ..Default::default()
            };
            search(&input, &query, &options, vocabulary.as_deref()).map(|_| ExitCode::SUCCESS)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
    match path {
        Some(path) => {
            info!("Loading vocabulary from {:?}", path);
            Vocabulary::from_file(path).context("Failed to load vocabulary")
        }
        None => Ok(Vocabulary::default()),
    }
}

fn validate(input: &Path) -> Result<ExitCode> {
    let file = read_transcript(input).context("Failed to read chat export")?;
    let report = validate_transcript(&file.text, &ParserConfig::default());

    if report.is_valid {
        println!("{}: looks like a valid chat export", file.file_name);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}: not a usable chat export", file.file_name);
    for reason in report.reasons() {
        println!("  - {}", reason);
    }
    Ok(ExitCode::FAILURE)
}

fn preview(input: &Path) -> Result<()> {
    let file = read_transcript(input).context("Failed to read chat export")?;
    let preview = preview_transcript(&file.text, &ParserConfig::default());

    println!("Chat Preview");
    println!("============");
    println!("File: {} ({} bytes)", file.file_name, file.file_size);
    println!("Estimated messages: {}", preview.estimated_message_count);
    println!("Messages in sample: {}", preview.sampled_messages);
    println!("Participants in sample: {}", preview.participant_count);
    println!("Group chat: {}", if preview.is_group_chat { "yes" } else { "no" });
    if let Some(range) = preview.date_range {
        println!("Dates: {} to {}", range.start, range.end);
    }

    Ok(())
}

fn parse(input: &Path, output: Option<&Path>) -> Result<()> {
    info!("Parsing chat export from {:?}", input);
    let transcript = parse_transcript_file(input, &ParserConfig::default())
        .context("Failed to read chat export")?;

    match output {
        Some(path) => {
            write_json(&transcript, path).context("Failed to write transcript")?;
            info!("Transcript written to {:?}", path);
        }
        None => {
            let json = serde_json::to_string_pretty(&transcript)
                .context("Failed to encode transcript")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn analyze(
    input: &Path,
    output: Option<&Path>,
    vocabulary: Option<&Path>,
    config: &InferenceConfig,
) -> Result<()> {
    let vocabulary = load_vocabulary(vocabulary)?;

    info!("Analyzing chat export from {:?}", input);
    let transcript = parse_transcript_file(input, &ParserConfig::default())
        .context("Failed to read chat export")?;
    let reports = analyze_transcript(&transcript, config, &vocabulary);

    if let Some(path) = output {
        write_json(&reports, path).context("Failed to write contact reports")?;
        info!("Contact reports written to {:?}", path);
    }

    print!("{}", AnalysisSummary::new(&transcript, &reports).format());
    Ok(())
}

fn search(
    input: &Path,
    query: &str,
    options: &SearchOptions,
    vocabulary: Option<&Path>,
) -> Result<()> {
    let vocabulary = load_vocabulary(vocabulary)?;

    let transcript = parse_transcript_file(input, &ParserConfig::default())
        .context("Failed to read chat export")?;
    let reports = analyze_transcript(&transcript, &InferenceConfig::default(), &vocabulary);
    let hits = rank_contacts(query, &reports, options, &ScorerConfig::default(), &vocabulary);

    print!("{}", chatsift::io::format_hits(query, &hits));
    Ok(())
}
