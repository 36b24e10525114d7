use clap::Parser;
use quizterm::{
    app::App,
    config::{QuestionBank, QuizConfig},
    error::{is_defect, user_friendly_message},
    QuizError, Result, APP_NAME, LOG_ENV, LOG_FILE,
};
use std::{fs, path::PathBuf, sync::Mutex, time::Duration};
use tracing_subscriber::EnvFilter;

/// Timed multiple-choice quiz in the terminal
#[derive(Parser, Debug)]
#[command(name = "quizterm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Question bank file (.toml or .json)
    #[arg(long)]
    bank: Option<PathBuf>,

    /// Seconds allowed per question
    #[arg(long, value_name = "SECS")]
    duration: Option<u64>,

    /// Fraction of a point lost per wrong answer
    #[arg(long, value_name = "F")]
    negative_mark: Option<f64>,

    /// Keep options in the order the bank lists them
    #[arg(long)]
    no_shuffle: bool,

    /// Read settings from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the question bank as TOML and exit
    #[arg(long)]
    print_bank: bool,

    /// Write the resolved settings to the config file and exit
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging();

    if let Err(e) = run(args).await {
        if is_defect(&e) {
            tracing::error!(error = ?e, "internal quiz state error");
        } else {
            tracing::warn!(error = %e, "quizterm exited with an error");
        }
        eprintln!("{}", user_friendly_message(&e));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;

    if args.save_config {
        let path = save_config(&args, &config)?;
        println!("Saved settings to {}", path.display());
        return Ok(());
    }

    let bank = config.load_bank()?;

    if args.print_bank {
        print!("{}", bank.to_toml()?);
        return Ok(());
    }

    start_quiz(bank, &config).await
}

/// Settings file first, then command-line overrides
fn resolve_config(args: &Args) -> Result<QuizConfig> {
    let mut config = match &args.config {
        Some(path) if !path.exists() && !args.save_config => {
            return Err(QuizError::ConfigError(format!(
                "config file {} does not exist",
                path.display()
            )))
        }
        Some(path) => QuizConfig::load_from(path)?,
        None => QuizConfig::load()?,
    };

    if let Some(path) = &args.bank {
        config = config.with_bank(path.clone());
    }
    if let Some(secs) = args.duration {
        config = config.with_question_duration(Duration::from_secs(secs));
    }
    if let Some(mark) = args.negative_mark {
        config = config.with_negative_mark(mark);
    }
    if args.no_shuffle {
        config = config.with_shuffle_options(false);
    }

    config.validate()?;
    Ok(config)
}

/// Write `config` to `--config` or the default location
fn save_config(args: &Args, config: &QuizConfig) -> Result<PathBuf> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => QuizConfig::config_file_path()?,
    };
    config.save_to(&path)?;
    Ok(path)
}

async fn start_quiz(bank: QuestionBank, config: &QuizConfig) -> Result<()> {
    tracing::info!(questions = bank.len(), ?config, "starting quiz");

    let mut app = App::new(bank, config)?;
    app.init()?;
    app.run().await
}

/// Log to a file; the terminal belongs to the TUI. Failure only means
/// no log.
fn init_logging() {
    let Some(dir) = dirs::data_local_dir().map(|d| d.join(APP_NAME)) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
