use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use pathway_core::model::LearningPath;
use services::{AppServices, Clock, Notifier, PathService, StatusSyncController, parse_path_json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, DesktopLinkOpener, LinkOpenerRef, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    MissingImportFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingImportFile => write!(f, "import requires a JSON file"),
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

struct DesktopApp {
    services: AppServices,
    user: Option<String>,
    preview: Option<LearningPath>,
    link_opener: LinkOpenerRef,
}

impl UiApp for DesktopApp {
    fn path_service(&self) -> Arc<PathService> {
        self.services.path_service()
    }

    fn status_sync(&self, notifier: Arc<dyn Notifier>) -> StatusSyncController {
        self.services.status_sync(notifier)
    }

    fn current_user(&self) -> Option<String> {
        self.user.clone()
    }

    fn preview_path(&self) -> Option<LearningPath> {
        self.preview.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--db <sqlite_url>] [--user <name>]");
    eprintln!("                             [--preview <file.json>]");
    eprintln!("  cargo run -p app -- import <file.json> [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://pathway.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PATHWAY_DB_URL, PATHWAY_USER, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Import,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "import" => Some(Self::Import),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    user: Option<String>,
    preview: Option<PathBuf>,
    import: Option<PathBuf>,
}

impl Args {
    fn defaults() -> Self {
        Self {
            db_url: std::env::var("PATHWAY_DB_URL")
                .ok()
                .map_or_else(|| "sqlite://pathway.sqlite3".into(), normalize_sqlite_url),
            user: std::env::var("PATHWAY_USER")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            preview: None,
            import: None,
        }
    }

    fn parse_db(args: &mut impl Iterator<Item = String>) -> Result<String, ArgsError> {
        let value = require_value(args, "--db")?;
        if value.trim().is_empty() {
            return Err(ArgsError::InvalidDbUrl { raw: value });
        }
        Ok(normalize_sqlite_url(value))
    }

    fn parse_ui(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::defaults();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => parsed.db_url = Self::parse_db(args)?,
                "--user" => parsed.user = Some(require_value(args, "--user")?),
                "--preview" => parsed.preview = Some(require_value(args, "--preview")?.into()),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn parse_import(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::defaults();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => parsed.db_url = Self::parse_db(args)?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ if parsed.import.is_none() => parsed.import = Some(arg.into()),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if parsed.import.is_none() {
            return Err(ArgsError::MissingImportFile);
        }
        Ok(parsed)
    }
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
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn read_path_file(path: &Path) -> Result<LearningPath, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(parse_path_json(&json)?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means launching the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = match cmd {
        Command::Ui => Args::parse_ui(&mut iter),
        Command::Import => Args::parse_import(&mut iter),
    }
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup; the binary owns this glue.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system()).await?;
    tracing::info!(db_url = %parsed.db_url, "storage ready");

    match cmd {
        Command::Ui => {
            let preview = match parsed.preview.as_deref() {
                Some(file) => {
                    let path = read_path_file(file)?;
                    tracing::info!(
                        file = %file.display(),
                        title = path.title(),
                        "loaded preview path"
                    );
                    Some(path)
                }
                None => None,
            };

            let app = DesktopApp {
                services,
                user: parsed.user,
                preview,
                link_opener: Arc::new(DesktopLinkOpener),
            };

            let context = build_app_context(Arc::new(app));

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Learning Path Creator")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Import => {
            let Some(file) = parsed.import else {
                return Err(ArgsError::MissingImportFile.into());
            };
            let json = std::fs::read_to_string(&file)?;
            let path_id = services.path_service().import_json(&json).await?;
            tracing::info!(file = %file.display(), %path_id, "imported learning path");
            println!("{path_id}");
            Ok(())
        }
    }
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

    let path = Path::new(path);
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

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "pathway exited with an error");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
