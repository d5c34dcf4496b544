use anyhow::Context;
use clap::Parser;
use package_intake::app::presenter::{render_listing, ListFormat};
use package_intake::config::{AppConfig, Command, LogFormat, RecordCommand};
use package_intake::utils::logger;
use package_intake::{CliConfig, IntakeError, PackageService, SqliteStore};
use std::io::Read;
use std::path::Path;

type Service = PackageService<SqliteStore>;

fn read_payload(path: Option<&str>) -> package_intake::Result<serde_json::Value> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(serde_json::from_str(&content)?)
}

async fn print_listing(service: &Service) -> package_intake::Result<()> {
    let packages = service.list_all().await?;
    println!("{}", render_listing(&packages, ListFormat::Table)?);
    Ok(())
}

// Every successful write is followed by a fresh listing.
async fn execute(command: RecordCommand, service: &Service) -> package_intake::Result<()> {
    match command {
        RecordCommand::List { format } => {
            let packages = service.list_all().await?;
            println!("{}", render_listing(&packages, format)?);
        }
        RecordCommand::Create { payload } => {
            let payload = read_payload(payload.as_deref())?;
            let ack = service.create_from_json(&payload).await?;
            if let Some(id) = ack.inserted_id {
                println!("✅ Submit successful! Package id: {}", id);
            }
            print_listing(service).await?;
        }
        RecordCommand::Update { id, payload } => {
            let payload = read_payload(payload.as_deref())?;
            let ack = service.update_from_json(id, &payload).await?;
            println!("✅ Update successful! Rows affected: {}", ack.rows_affected);
            print_listing(service).await?;
        }
        RecordCommand::Delete { id } => {
            let ack = service.delete_by_id(id).await?;
            println!("✅ Delete successful! Rows affected: {}", ack.rows_affected);
            print_listing(service).await?;
        }
    }
    Ok(())
}

fn init_config(output: &str, force: bool) -> anyhow::Result<()> {
    if Path::new(output).exists() && !force {
        anyhow::bail!("{} already exists; pass --force to overwrite it", output);
    }
    std::fs::write(output, AppConfig::template())
        .with_context(|| format!("failed to write config file '{}'", output))?;
    println!("📁 Configuration written to: {}", output);
    Ok(())
}

async fn run(cli: CliConfig) -> anyhow::Result<()> {
    let command = match &cli.command {
        Command::InitConfig { output, force } => {
            logger::init_cli_logger(cli.verbose, None, LogFormat::Compact);
            return init_config(output, *force);
        }
        Command::Records(command) => command.clone(),
    };

    let config = match cli.resolve_app_config() {
        Ok(config) => config,
        Err(e) => {
            // No usable config yet; log the failure with CLI defaults.
            logger::init_cli_logger(cli.verbose, None, LogFormat::Compact);
            return Err(e.into());
        }
    };

    logger::init_cli_logger(
        cli.verbose,
        config.logging.level.as_deref(),
        config.logging.format,
    );
    tracing::info!("🚀 Starting package-intake");
    if cli.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    let store = SqliteStore::open(&config.database.path, config.busy_timeout())?;
    let service = PackageService::new(store, &config);
    execute(command, &service).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let err = match run(cli).await {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };

    let Some(e) = err.downcast_ref::<IntakeError>() else {
        return Err(err);
    };

    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
