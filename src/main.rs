//! Wordle InfoGain - CLI
//!
//! Plays Wordle with a letter-frequency heuristic or by maximizing the
//! expected information of every guess, and analyzes opening guesses.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;
use wordle_infogain::{
    commands::{
        AnalysisConfig, CancelToken, PromptOracle, SessionConfig, StrategyChoice,
        analyze_first_guesses, choose_target, export_traces, play_interactive, write_rankings,
        write_reports,
    },
    core::{ResponseModel, Word},
    output::{print_export_summary, print_rankings, print_reports},
    solver::{Session, SessionCache, Solver, TargetOracle},
};

#[derive(Parser)]
#[command(
    name = "wordle_infogain",
    about = "Wordle solver comparing letter-frequency and information-gain guess selection",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Target word list, also the small guess list
    #[arg(long, global = true, default_value = "data/small.txt")]
    small: PathBuf,

    /// Extra guess words merged in by the large-entropy strategy
    #[arg(long, global = true, default_value = "data/large.txt")]
    large: PathBuf,

    /// Word length
    #[arg(long, global = true, default_value_t = 5)]
    length: usize,

    /// Symbols for wrong, misplaced and correct letters
    #[arg(long, global = true, default_value = "012")]
    symbols: String,

    /// Directory for precomputed tables and result files
    #[arg(long, global = true, default_value = "output")]
    cache_dir: PathBuf,

    /// Always rebuild precomputed tables in memory
    #[arg(long, global = true)]
    no_cache: bool,

    /// Strategy: heuristic (default), small-entropy, large-entropy
    #[arg(short, long, global = true, default_value = "heuristic")]
    strategy: StrategyChoice,

    /// Force the opening guess
    #[arg(short, long, global = true)]
    first_guess: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game interactively (default)
    Play {
        /// Solve this target word
        #[arg(long, conflicts_with_all = ["random_target", "unknown_target"])]
        target: Option<String>,

        /// Solve a random target word (default)
        #[arg(long, conflicts_with = "unknown_target")]
        random_target: bool,

        /// Type the responses yourself
        #[arg(long)]
        unknown_target: bool,
    },

    /// Evaluate the best-ranked opening guesses against every target
    Analyze {
        /// Number of opening guesses to evaluate
        #[arg(short = 'k', long, default_value_t = 10)]
        top_k: usize,

        /// Only play the first N targets
        #[arg(short, long)]
        limit: Option<usize>,

        /// Stop after this many seconds
        #[arg(long)]
        max_seconds: Option<u64>,
    },

    /// Write the guess trace of every target game
    Export {
        /// Output file (default: <cache-dir>/traces_<strategy>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only play the first N targets
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Rank every guess by its opening score
    Rank {
        /// Number of guesses to print
        #[arg(short, long, default_value_t = 20)]
        top: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = SessionConfig {
        small: cli.small,
        large: cli.large,
        length: cli.length,
        symbols: ResponseModel::parse_symbols(&cli.symbols)?,
        cache_dir: cli.cache_dir,
        use_cache: !cli.no_cache,
        strategy: cli.strategy,
        first_guess: cli.first_guess,
    };
    let session = config.open_session()?;
    let cache = config.load_cache(&session)?;

    let command = cli.command.unwrap_or(Commands::Play {
        target: None,
        random_target: false,
        unknown_target: false,
    });

    match command {
        Commands::Play {
            target,
            random_target,
            unknown_target,
        } => run_play_command(
            &config,
            &session,
            cache.as_ref(),
            target.as_deref(),
            random_target || !unknown_target,
        ),
        Commands::Analyze {
            top_k,
            limit,
            max_seconds,
        } => run_analyze_command(
            &config,
            &session,
            cache.as_ref(),
            &AnalysisConfig { top_k, limit },
            max_seconds,
        ),
        Commands::Export { output, limit } => {
            run_export_command(&config, &session, cache.as_ref(), output, limit)
        }
        Commands::Rank { top } => run_rank_command(&config, &session, cache.as_ref(), top),
    }
}

fn run_play_command(
    config: &SessionConfig,
    session: &Session,
    cache: Option<&SessionCache>,
    target: Option<&str>,
    random: bool,
) -> Result<()> {
    let solver = Solver::new(session, cache, config.strategy.kind())?;
    let first_guess = config.first_guess()?;

    let known = choose_target(&solver, target, random)?
        .map(|index| TargetOracle::new(session, cache, index))
        .transpose()?;
    let mut prompt = PromptOracle::new(io::stdin().lock(), io::stdout());

    play_interactive(&solver, known, &mut prompt, first_guess.as_ref())?;
    Ok(())
}

fn run_analyze_command(
    config: &SessionConfig,
    session: &Session,
    cache: Option<&SessionCache>,
    analysis: &AnalysisConfig,
    max_seconds: Option<u64>,
) -> Result<()> {
    let solver = Solver::new(session, cache, config.strategy.kind())?;
    let ranked = solver.initial_scores()?;
    write_rankings(&config.output_path("top_scores")?, &ranked)?;

    let cancel = max_seconds.map_or_else(CancelToken::new, |secs| {
        CancelToken::with_timeout(Duration::from_secs(secs))
    });
    let reports = analyze_first_guesses(&solver, &ranked, analysis, &cancel)?;
    print_reports(&reports);

    let path = config.output_path("top_guesses_performance")?;
    write_reports(&path, &reports).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn run_export_command(
    config: &SessionConfig,
    session: &Session,
    cache: Option<&SessionCache>,
    output: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<()> {
    let solver = Solver::new(session, cache, config.strategy.kind())?;
    let first_guess: Option<Word> = config.first_guess()?;

    let path = match output {
        Some(path) => path,
        None => config.output_path("traces")?,
    };
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let summary = export_traces(
        &solver,
        first_guess.as_ref(),
        limit,
        &mut out,
        &CancelToken::new(),
    )?;
    print_export_summary(&summary, &path);
    Ok(())
}

fn run_rank_command(
    config: &SessionConfig,
    session: &Session,
    cache: Option<&SessionCache>,
    top: usize,
) -> Result<()> {
    let solver = Solver::new(session, cache, config.strategy.kind())?;
    let ranked = solver.initial_scores()?;
    print_rankings(&ranked, top);
    write_rankings(&config.output_path("top_scores")?, &ranked)?;
    Ok(())
}
