use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use services::{AppServices, SessionError};
use tracing_subscriber::EnvFilter;

mod terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    CheckWithoutSet,
    InvalidQuizNumber { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::CheckWithoutSet => write!(f, "--check only applies to `endpoint set`"),
            ArgsError::InvalidQuizNumber { raw } => write!(f, "invalid quiz number: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [list]                 [options]");
    eprintln!("  cargo run -p app -- refresh                [options]");
    eprintln!("  cargo run -p app -- play <n>               [options]");
    eprintln!("  cargo run -p app -- endpoint [show]        [options]");
    eprintln!("  cargo run -p app -- endpoint set <url>     [--check] [options]");
    eprintln!("  cargo run -p app -- endpoint reset         [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>      default sqlite://quiz.sqlite3");
    eprintln!("  --snapshot <path>      default quizzes.json");
    eprintln!("  --offline              treat the network as unreachable (no launch refresh)");
    eprintln!("  --check                after `endpoint set`, refresh from the new URL");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_SNAPSHOT_PATH, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EndpointAction {
    Show,
    Set(String),
    /// Save the endpoint, then refresh from it.
    SetAndCheck(String),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Refresh,
    /// 1-based position in the catalog listing.
    Play(usize),
    Endpoint(EndpointAction),
}

impl Command {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let Some(first) = args.next() else {
            return Ok(None);
        };
        let cmd = match first.as_str() {
            "list" => Self::List,
            "refresh" => Self::Refresh,
            "play" => {
                let raw = require_value(args, "play")?;
                let number = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or(ArgsError::InvalidQuizNumber { raw })?;
                Self::Play(number)
            }
            "endpoint" => match args.next().as_deref() {
                None | Some("show") => Self::Endpoint(EndpointAction::Show),
                Some("set") => Self::Endpoint(EndpointAction::Set(require_value(
                    args,
                    "endpoint set",
                )?)),
                Some("reset") => Self::Endpoint(EndpointAction::Reset),
                Some(other) => return Err(ArgsError::UnknownArg(other.to_string())),
            },
            _ => return Err(ArgsError::UnknownArg(first)),
        };
        Ok(Some(cmd))
    }
}

struct Args {
    command: Command,
    db_url: String,
    snapshot_path: PathBuf,
    offline: bool,
}

impl Args {
    fn parse(argv: Vec<String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url);
        let mut snapshot_path = std::env::var("QUIZ_SNAPSHOT_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("quizzes.json"), PathBuf::from);
        let mut offline = false;
        let mut check = false;

        let (flags, positional): (Vec<String>, Vec<String>) = split_flags(argv);
        let mut positional = positional.into_iter();
        let command = Command::parse(&mut positional)?.unwrap_or(Command::List);
        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        let mut flags = flags.into_iter();
        while let Some(arg) = flags.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut flags, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--snapshot" => {
                    snapshot_path = PathBuf::from(require_value(&mut flags, "--snapshot")?);
                }
                "--offline" => offline = true,
                "--check" => check = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let command = match (command, check) {
            (Command::Endpoint(EndpointAction::Set(url)), true) => {
                Command::Endpoint(EndpointAction::SetAndCheck(url))
            }
            (_, true) => return Err(ArgsError::CheckWithoutSet),
            (command, false) => command,
        };

        Ok(Self {
            command,
            db_url,
            snapshot_path,
            offline,
        })
    }
}

/// Separate `--flag [value]` pairs from positional words, keeping each group in order.
fn split_flags(argv: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut flags = Vec::new();
    let mut positional = Vec::new();
    let mut iter = argv.into_iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            let takes_value = matches!(arg.as_str(), "--db" | "--snapshot");
            flags.push(arg);
            if takes_value && let Some(value) = iter.next() {
                flags.push(value);
            }
        } else {
            positional.push(arg);
        }
    }
    (flags, positional)
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("services=info,app=info"));
    // stdout is reserved for quiz output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    if matches!(argv.first().map(String::as_str), Some("--help" | "-h")) {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = Args::parse(argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    // Open + migrate SQLite at startup; services only see the assembled storage.
    prepare_sqlite_file(&parsed.db_url)?;
    tracing::debug!(
        "opening storage at {} with snapshot {}",
        parsed.db_url,
        parsed.snapshot_path.display()
    );
    let offline = parsed.offline;
    let services =
        AppServices::new_sqlite(&parsed.db_url, parsed.snapshot_path, Arc::new(move || !offline))
            .await?;

    if matches!(parsed.command, Command::List | Command::Play(_)) {
        services.refresh().refresh_on_launch().await;
    }

    let stdout = std::io::stdout();
    match parsed.command {
        Command::List => {
            terminal::print_catalog(&mut stdout.lock(), &services.catalog().list())?;
        }
        Command::Refresh => {
            let result = services.refresh().refresh().await;
            if !terminal::print_refresh_result(&mut stdout.lock(), &result)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Play(number) => {
            let mut session = match services.launcher().start(number - 1) {
                Ok(session) => session,
                Err(SessionError::EmptyQuiz) => {
                    println!("That quiz has no questions yet.");
                    return Ok(ExitCode::SUCCESS);
                }
                Err(err) => return Err(err.into()),
            };
            let stdin = std::io::stdin();
            terminal::play(&mut session, &mut stdin.lock(), &mut stdout.lock())?;
        }
        Command::Endpoint(EndpointAction::SetAndCheck(url)) => {
            let result = services.refresh().check_now(&url).await;
            let current = services.settings().load().await?;
            println!("{}", current.endpoint());
            if !terminal::print_refresh_result(&mut stdout.lock(), &result)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Endpoint(action) => {
            let settings = services.settings();
            let current = match action {
                EndpointAction::Set(url) => settings.set_endpoint(&url).await?,
                EndpointAction::Reset => settings.reset_to_default().await?,
                EndpointAction::Show | EndpointAction::SetAndCheck(_) => settings.load().await?,
            };
            let suffix = if current.is_default() { " (default)" } else { "" };
            println!("{}{suffix}", current.endpoint());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}
