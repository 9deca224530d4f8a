//! FedClient: browse completed federated-learning training sessions.
//!
//! Without a subcommand the interactive dashboard starts on the home page.
//! `list` and `show` print the same views as plain text.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use fedclient_api::{ApiClient, TrainingBackend};
use fedclient_dashboard::logging::{self, LogTarget};
use fedclient_dashboard::{console, dashboard, App, DashboardConfig, Route};

#[derive(Parser, Debug)]
#[command(name = "fedclient", version, about = "Federated learning client dashboard")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file.
    #[arg(short, long, global = true)]
    backend: Option<String>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive dashboard.
    Tui {
        /// Route to open first, e.g. /Results or /TrainingResults/details/<id>.
        #[arg(long, default_value = "/")]
        route: String,
    },
    /// Print the completed training sessions.
    List,
    /// Print one session's results.
    Show {
        session_id: String,
        /// Metric whose per-round values are printed.
        #[arg(long)]
        metric: Option<String>,
        /// Include the model and dataset configuration.
        #[arg(long)]
        details: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.backend {
        config.backend.url = url;
    }

    let command = cli.command.unwrap_or(Command::Tui {
        route: "/".to_string(),
    });

    let target = match (&command, config.log_file()) {
        (Command::Tui { .. }, Some(path)) => LogTarget::File(path),
        _ => LogTarget::Stderr,
    };
    logging::init(cli.verbose, &config.log.filter, target)?;

    let client = ApiClient::new(&config.api_config()).context("Invalid backend configuration")?;
    tracing::info!(backend = %client.base_url(), "FedClient starting");
    let backend_label = client.base_url().to_string();
    let backend: Arc<dyn TrainingBackend> = Arc::new(client);

    match command {
        Command::Tui { route } => {
            let app = App::new(config.client.clone(), config.detail_options(), backend_label);
            dashboard::run_dashboard(app, backend, config.tick_rate(), Route::parse(&route)).await
        }
        Command::List => {
            let view = tokio::task::spawn_blocking(move || console::list_command(backend.as_ref()))
                .await?;
            let mut stdout = std::io::stdout().lock();
            console::write_list(&mut stdout, &view)?;
            stdout.flush()?;
            Ok(())
        }
        Command::Show {
            session_id,
            metric,
            details,
        } => {
            let options = config.detail_options();
            let mut screen = tokio::task::spawn_blocking(move || {
                console::show_command(backend.as_ref(), &session_id, &options)
            })
            .await?;
            let mut stdout = std::io::stdout().lock();
            console::write_detail(&mut stdout, &mut screen, metric.as_deref(), details)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
