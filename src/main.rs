use clap::Parser;
use scicalc::calculator::AngleUnit;
use scicalc::{
    Calculator, Config, HistoryLog, HistoryStore, JsonFileStore, MemoryStore, Theme, repl,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Scientific calculator with memory and history.
///
/// Without `--eval`, reads keypad labels or whole expressions from standard
/// input, one line at a time. Type `help` for the list of keys.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/scicalc/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Interpret trigonometric functions in degrees.
    #[arg(long)]
    degrees: bool,

    /// Colour theme.
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// History file (default: <data dir>/scicalc/history.json).
    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Keep history for this session only.
    #[arg(long)]
    no_history: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Evaluate an expression, print the result and exit. May be repeated.
    #[arg(short, long = "eval", value_name = "EXPR")]
    eval: Vec<String>,
}

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `warn` (or `debug` with `--verbose`) so the display stays clean.
/// * Writes to stderr; stdout belongs to the calculator display.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Config {
    let path = cli.config.clone().or_else(Config::default_path);
    let mut config = Config::load_or_default(path.as_deref());

    if cli.degrees {
        config.angle_unit = AngleUnit::Degrees;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(path) = &cli.history_file {
        config.history_file = Some(path.clone());
    }
    if cli.no_history {
        config.persist_history = false;
    }
    config
}

fn history_store(config: &Config) -> Box<dyn HistoryStore> {
    if config.persist_history {
        let path = config.history_path();
        debug!(path = %path.display(), "using history file");
        Box::new(JsonFileStore::new(path))
    } else {
        Box::new(MemoryStore::default())
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli);
    debug!(?config, "configuration loaded");

    let history = HistoryLog::load(history_store(&config));
    info!(entries = history.len(), "history ready");

    let mut calculator = Calculator::new(history)
        .with_angle_unit(config.angle_unit)
        .with_theme(config.theme);

    if !cli.eval.is_empty() {
        let mut status = ExitCode::SUCCESS;
        for expression in &cli.eval {
            calculator.clear_all();
            calculator.append(expression);
            if let Err(error) = calculator.evaluate() {
                debug!(%expression, %error, "evaluation failed");
                status = ExitCode::FAILURE;
            }
            println!("{}", calculator.display());
        }
        return Ok(status);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&mut calculator, stdin.lock(), &mut stdout)?;
    Ok(ExitCode::SUCCESS)
}
