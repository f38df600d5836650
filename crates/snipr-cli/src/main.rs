mod logging;
mod settings;
mod stats;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use logging::{LoggingError, init_logging};
use settings::{SettingsError, SniprConfig, load_config, render_config};
use snipr_core::{Error as CoreError, load_attributes};
use snipr_generate::output::{WriteMode, write_json, write_report, write_text};
use snipr_generate::{GenerateOptions, GenerationEngine, GenerationError, MAX_SEED, Strategy};
use thiserror::Error;

const DEFAULT_COMBINE_CAP: usize = 10_000;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Input(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("config error: {0}")]
    Settings(#[from] SettingsError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Simple,
    Exhaustive,
    Randomized,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Simple => Strategy::Simple,
            StrategyArg::Exhaustive => Strategy::Exhaustive,
            StrategyArg::Randomized => Strategy::Randomized,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "snipr",
    version,
    about = "Smart password wordlist generator.",
    disable_version_flag = true
)]
struct Cli {
    /// Print version.
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,
    /// Attribute file with one `key: value` per line.
    #[arg(short, long)]
    input: PathBuf,
    /// Text output path.
    #[arg(short, long, default_value = "wordlist.txt")]
    output: PathBuf,
    /// Keep only the first N passwords; also bounds the exhaustive and
    /// randomized strategies when no --max-candidates is given.
    #[arg(short, long)]
    num: Option<usize>,
    #[arg(long)]
    no_leet: bool,
    /// Skip first/last name combinations.
    #[arg(long)]
    no_combine: bool,
    /// Append to this file instead of overwriting the output.
    #[arg(short, long)]
    append_to: Option<PathBuf>,
    /// Shorthand for --verbose-level 2.
    #[arg(short, long)]
    verbose: bool,
    #[arg(long)]
    min_length: Option<usize>,
    #[arg(long)]
    max_length: Option<usize>,
    /// Special characters used as suffixes and affixes [default: !]
    #[arg(long, allow_hyphen_values = true)]
    include_specials: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    prepend: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    append_str: Option<String>,
    /// Join separator; repeat for several [default: _]
    #[arg(long, allow_hyphen_values = true)]
    separator: Vec<String>,
    /// Comma-separated attribute keys to use.
    #[arg(short, long, value_delimiter = ',')]
    filter_keys: Option<Vec<String>>,
    #[arg(short, long)]
    shuffle: bool,
    #[arg(short = 'S', long)]
    stats: bool,
    /// Write the list as a JSON array to this path instead of text.
    #[arg(long)]
    export_json: Option<PathBuf>,
    #[arg(short, long)]
    dry_run: bool,
    /// File of common passwords to remove.
    #[arg(long)]
    remove_common: Option<PathBuf>,
    /// Seed for random paths, 0 to 9223372036854775807.
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_SEED))]
    seed: Option<u64>,
    #[arg(short = 'V', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=2))]
    verbose_level: u8,
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Most word tokens joined into one candidate.
    #[arg(long)]
    max_words: Option<usize>,
    #[arg(long)]
    max_candidates: Option<usize>,
    /// Draw limit for the randomized strategy.
    #[arg(long)]
    max_attempts: Option<usize>,
    /// Add pairwise concatenations of the finished list.
    #[arg(long)]
    combine_passwords: bool,
    /// Cap on pairwise concatenations; implies --combine-passwords.
    #[arg(long)]
    combine_cap: Option<usize>,
    /// Skip the pairwise concatenations the simple strategy adds by default.
    #[arg(long, conflicts_with_all = ["combine_passwords", "combine_cap"])]
    no_combine_passwords: bool,
    /// Skip case variants of leet forms and number+special affixes.
    #[arg(long)]
    no_rich: bool,
    #[arg(long)]
    no_reverse: bool,
    /// Random mixed-case spellings per word.
    #[arg(long, value_name = "N")]
    mixed_case: Option<usize>,
    /// TOML file with a [generation] table.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
    /// Write the run report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Append JSON log events to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn verbosity(&self) -> u8 {
        if self.verbose { 2 } else { self.verbose_level }
    }

    /// Config file values (or defaults) overridden by explicit flags.
    fn generate_options(&self) -> Result<GenerateOptions, CliError> {
        let mut options = match &self.config {
            Some(path) => load_config(path)?.generation,
            None => GenerateOptions::default(),
        };

        if let Some(strategy) = self.strategy {
            options.strategy = strategy.into();
        }
        if self.no_leet {
            options.use_leet = false;
        }
        if self.no_rich {
            options.rich = false;
        }
        if self.no_reverse {
            options.include_reversed = false;
        }
        if self.no_combine {
            options.combine_names = false;
        }
        if let Some(samples) = self.mixed_case {
            options.mixed_case_samples = samples;
        }
        if !self.separator.is_empty() {
            options.separators = self.separator.clone();
        }
        if let Some(specials) = &self.include_specials {
            options.specials = specials.clone();
        }
        if let Some(prepend) = &self.prepend {
            options.prepend = prepend.clone();
        }
        if let Some(append) = &self.append_str {
            options.append = append.clone();
        }
        if let Some(max_words) = self.max_words {
            options.max_words_per_combo = max_words;
        }
        if self.min_length.is_some() {
            options.min_length = self.min_length;
        }
        if self.max_length.is_some() {
            options.max_length = self.max_length;
        }
        if self.max_candidates.is_some() {
            options.max_candidates = self.max_candidates;
        }
        if self.max_attempts.is_some() {
            options.max_attempts = self.max_attempts;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if let Some(keys) = &self.filter_keys {
            options.filter_keys = Some(keys.clone());
        }
        if self.combine_passwords || self.combine_cap.is_some() {
            options.combine_pairs = Some(
                self.combine_cap
                    .or(options.combine_pairs)
                    .unwrap_or(DEFAULT_COMBINE_CAP),
            );
        } else if self.no_combine_passwords {
            options.combine_pairs = None;
        } else if options.strategy == Strategy::Simple && options.combine_pairs.is_none() {
            options.combine_pairs = Some(DEFAULT_COMBINE_CAP);
        }
        if self.shuffle {
            options.shuffle = true;
        }
        if self.num.is_some() {
            options.limit = self.num;
        }
        if self.remove_common.is_some() {
            options.exclusion_list = self.remove_common.clone();
        }
        if options.strategy != Strategy::Simple && options.max_candidates.is_none() {
            options.max_candidates = options.limit;
        }

        Ok(options)
    }
}

fn main() -> Result<(), CliError> {
    let timer = Instant::now();
    let cli = Cli::parse();
    let options = cli.generate_options()?;

    if cli.print_config {
        let config = SniprConfig {
            generation: options,
        };
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    run(&cli, options)?;

    println!(
        "Execution time: {:.6} seconds",
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run(cli: &Cli, options: GenerateOptions) -> Result<(), CliError> {
    let verbosity = cli.verbosity();
    init_logging(verbosity, cli.log_file.as_deref())?;

    if verbosity >= 1 {
        println!("[+] Reading input from {}...", cli.input.display());
    }
    let attributes = load_attributes(&cli.input)?;
    tracing::info!(event = "attributes_loaded", count = attributes.len());

    if verbosity >= 1 {
        println!("[+] Generating wordlist...");
    }
    let filtered_by_length = options.min_length.is_some() || options.max_length.is_some();
    let shuffled = options.shuffle;
    let exclusion_list = options.exclusion_list.clone();

    let result = GenerationEngine::new(options).run(&attributes)?;
    let report = &result.report;
    let candidates = &result.candidates;

    if filtered_by_length && verbosity >= 2 {
        println!(
            "[DEBUG] Filtered by length: {} words remain",
            report.assembled - report.removed_by_length
        );
    }
    if let Some(path) = &exclusion_list
        && verbosity >= 1
        && !report.warnings_by_code.contains_key("exclusion_list_unreadable")
    {
        println!("[+] Removed common passwords from {}", path.display());
    }
    if shuffled && verbosity >= 2 {
        println!("[DEBUG] Shuffled the wordlist");
    }

    if cli.dry_run {
        if verbosity >= 1 {
            println!(
                "[+] Dry run enabled. Would generate {} passwords. Not writing to file.",
                candidates.len()
            );
        }
    } else {
        let (target, mode) = match &cli.append_to {
            Some(path) => (path, WriteMode::Append),
            None => (&cli.output, WriteMode::Overwrite),
        };

        if let Some(json_path) = &cli.export_json {
            write_json(json_path, candidates, mode)?;
            tracing::info!(event = "json_written", path = %json_path.display());
            if verbosity >= 1 {
                println!("[+] Exported wordlist to JSON file {}", json_path.display());
            }
        } else {
            let bytes = write_text(target, candidates, mode)?;
            tracing::info!(event = "text_written", path = %target.display(), bytes);
            if verbosity >= 2 {
                for word in candidates {
                    println!("[DEBUG] {word}");
                }
            }
            if verbosity >= 1 {
                println!(
                    "[+] Wordlist saved to {} ({} passwords)",
                    target.display(),
                    candidates.len()
                );
            }
        }
    }

    if let Some(path) = &cli.report {
        write_report(path, report)?;
        tracing::info!(event = "report_written", path = %path.display());
    }

    if cli.stats {
        print!("{}", stats::render_stats(&report.stats));
    }

    Ok(())
}
