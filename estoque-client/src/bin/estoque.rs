//! estoque: command line front end for the inventory backend

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use estoque_client::logging::init_logging;
use estoque_client::{App, ApiResponse, ClassList, ClientConfig, LoginGate, LoginOutcome, Theme};

#[derive(Debug, Parser)]
#[command(name = "estoque", version, about = "Inventory backend client")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "ESTOQUE_API_URL")]
    url: Option<String>,

    /// Directory for the local cookie and preference files
    #[arg(long, env = "ESTOQUE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check credentials
    Login {
        #[arg(long)]
        user: String,
        #[arg(long, env = "ESTOQUE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List sections
    Sections,
    /// Print the full report tree
    Report,
    /// Batches expiring within the given number of days
    Expiring { days: u32 },
    /// Write the CSV export to a file
    Export { file: PathBuf },
    /// Send a CSV file to the backend
    Import { file: PathBuf },
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Debug, Subcommand)]
enum ThemeAction {
    /// Local and per-device theme
    Show,
    /// Apply locally and save for this device (escuro, claro, matrix)
    Set { theme: Theme },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.json_logs)?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let app = App::start(&config, ClassList::new()).context("failed to start client")?;

    match cli.command {
        Command::Login { user, password } => {
            let gate = LoginGate::new(&app.api)
                .ready(app.api.list_sections())
                .await
                .context("backend not ready")?;
            match gate.submit(&user, &password).await? {
                LoginOutcome::Accepted => println!("ok"),
                LoginOutcome::Rejected { message } => anyhow::bail!(message),
            }
        }
        Command::Sections => {
            for section in app.api.sections().await? {
                println!("{:>4}  {}", section.id, section.name);
            }
        }
        Command::Report => {
            for root in app.api.report().await? {
                for (depth, node) in root.flatten() {
                    println!(
                        "{:indent$}{} (total {}, prateleira {}, estoque {})",
                        "",
                        node.name,
                        node.total,
                        node.shelf,
                        node.stock,
                        indent = depth * 2
                    );
                }
            }
        }
        Command::Expiring { days } => {
            for batch in app.api.expiring_batches(days).await? {
                println!(
                    "lote {:>4}  produto {:>4}  validade {}  prateleira {}/{}",
                    batch.id,
                    batch.product_id,
                    batch.expiry_date,
                    batch.shelf_quantity,
                    batch.total_quantity
                );
            }
        }
        Command::Export { file } => {
            let csv = app.api.export_csv().await?;
            std::fs::write(&file, csv)
                .with_context(|| format!("failed to write {}", file.display()))?;
        }
        Command::Import { file } => {
            let csv = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            print_response(&app.api.import_csv(&csv).await?);
        }
        Command::Theme { action } => match action {
            ThemeAction::Show => {
                let local = app.themes.current();
                let palette = local.palette();
                println!(
                    "local:  {local} (fundo {}, texto {}, destaque {})",
                    palette.background, palette.text, palette.accent
                );
                println!("device: {}", app.api.load_device_theme().await);
            }
            ThemeAction::Set { theme } => {
                app.themes.apply(theme);
                print_response(&app.api.save_device_theme(theme).await?);
            }
        },
    }

    Ok(())
}

fn print_response(response: &ApiResponse) {
    println!("{response}");
}
