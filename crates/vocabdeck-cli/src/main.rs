mod pipeline;
mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use vocabdeck_acquire::{wordlist, Cambridge};
use vocabdeck_apkg::Deck;

#[derive(Parser)]
#[command(name = "vocabdeck")]
#[command(about = "Create an Anki deck from a word list, with definitions and audio pronunciations")]
#[command(version)]
struct Cli {
    /// Text file containing words
    input_file: PathBuf,

    /// Output .apkg filename
    #[arg(short, long, default_value = "vocabulary_deck.apkg")]
    output: PathBuf,

    /// Name of the Anki deck
    #[arg(short = 'n', long, default_value = "Vocabulary Deck")]
    deck_name: String,

    /// Include audio pronunciations
    #[arg(short = 'a', long, default_value_t = true, action = clap::ArgAction::Set)]
    include_audio: bool,

    /// Delay between requests in seconds
    #[arg(long, default_value = "2.0", value_parser = parse_delay)]
    delay: Duration,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_delay(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|_| format!("'{s}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("delay must be a non-negative number, got {s}"))
}

fn init_tracing(level: &LogLevel, utc: bool) {
    // Suppress noisy HTML-parsing crates at debug/trace
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    if utc {
        builder
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        builder
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.utc);

    // A missing or unreadable input aborts before any network traffic.
    let words = wordlist::read_words(&cli.input_file)
        .with_context(|| format!("Could not load words from {}", cli.input_file.display()))?;
    if words.is_empty() {
        println!("No words found in the input file.");
        return Ok(());
    }
    println!("Found {} unique words.", words.len());

    let cambridge = Cambridge::new().context("Failed to build HTTP client")?;
    let mut deck = Deck::new(&cli.deck_name);
    let options = pipeline::RunOptions {
        include_audio: cli.include_audio,
        delay: cli.delay,
    };
    tracing::info!(
        words = words.len(),
        deck = %cli.deck_name,
        audio = options.include_audio,
        delay_secs = options.delay.as_secs_f64(),
        "Starting run"
    );

    let summary = pipeline::run(&words, &cambridge, &cambridge, &mut deck, &options).await;

    let stats = vocabdeck_apkg::finalize(&deck, &cli.output)
        .with_context(|| format!("Failed to write deck to {}", cli.output.display()))?;
    println!("Deck saved as {}", cli.output.display());
    println!("Media files included: {}", stats.media_files);

    println!("\n{summary}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["vocabdeck", "words.txt"]).unwrap();
        assert_eq!(cli.input_file, PathBuf::from("words.txt"));
        assert_eq!(cli.output, PathBuf::from("vocabulary_deck.apkg"));
        assert_eq!(cli.deck_name, "Vocabulary Deck");
        assert!(cli.include_audio);
        assert_eq!(cli.delay, Duration::from_secs(2));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "vocabdeck", "words.txt", "-o", "out.apkg", "-n", "GRE", "-a", "false", "--delay", "0.5",
        ])
        .unwrap();
        assert_eq!(cli.output, PathBuf::from("out.apkg"));
        assert_eq!(cli.deck_name, "GRE");
        assert!(!cli.include_audio);
        assert_eq!(cli.delay, Duration::from_millis(500));
    }

    #[test]
    fn test_negative_delay_rejected() {
        assert!(parse_delay("-1").is_err());
        assert!(parse_delay("soon").is_err());
        assert_eq!(parse_delay("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["vocabdeck"]).is_err());
    }
}
