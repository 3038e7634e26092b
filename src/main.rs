//! Command-line front end for the clients dashboard.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;

use clients_dashboard::domain::types::ClientId;
use clients_dashboard::forms::client::ClientForm;
use clients_dashboard::forms::masks::{apply_cuit_mask, apply_phone_mask};
use clients_dashboard::models::config::{DashboardConfig, DataSourceMode};
use clients_dashboard::notifications::LogNotifier;
use clients_dashboard::repository::errors::RepositoryError;
use clients_dashboard::services::{ServiceError, ServiceResult};
use clients_dashboard::shell::DashboardShell;

#[derive(Parser, Debug)]
#[command(name = "clients-dashboard")]
#[command(about = "Browse and edit client records", long_about = None)]
struct Cli {
    /// Use the built-in sample data instead of the record service
    #[arg(long, global = true)]
    fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of clients
    #[command(alias = "ls")]
    List {
        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Free-text filter
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show a single client
    Get { id: i64 },

    /// Create a client
    Create(FormArgs),

    /// Replace every field of a client
    Update {
        id: i64,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Delete a client
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Print search box suggestions for a query
    Suggest { query: String },
}

#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// Digits are masked as XX-XXXXXXXX
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: String,
    /// Digits are masked as XX-XXXXXXXX-X
    #[arg(long)]
    cuit: String,
    #[arg(long)]
    business_name: String,
    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: String,
}

impl From<FormArgs> for ClientForm {
    fn from(args: FormArgs) -> Self {
        ClientForm {
            first_name: args.first_name,
            last_name: args.last_name,
            mobile_phone: apply_phone_mask(&args.phone),
            email: args.email,
            cuit: apply_cuit_mask(&args.cuit),
            business_name: args.business_name,
            birth_date: args.birth_date,
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => log::error!("Failed to serialize output: {err}"),
    }
}

fn client_id(raw: i64) -> ServiceResult<ClientId> {
    ClientId::new(raw).map_err(|err| ServiceError::from(RepositoryError::from(err)))
}

async fn run(cli: Cli, mut config: DashboardConfig) -> ServiceResult<()> {
    if cli.fallback {
        config.data_source = DataSourceMode::Fallback;
    }
    let mut shell = DashboardShell::mount(&config, Arc::new(LogNotifier))?;

    match cli.command {
        Command::List { page, query } => {
            let controller = shell.page().controller();
            controller.fetch_page(page, query.as_deref()).await;
            let state = controller.state();
            if let Some(error) = state.error {
                return Err(RepositoryError::Unexpected(error).into());
            }
            if let Some(links) = shell.page().page_links() {
                log::info!("{}", links.summary());
            }
            print_json(&state.response);
        }
        Command::Get { id } => {
            let id = client_id(id)?;
            match shell.page().controller().get_client(id).await {
                Some(client) => print_json(&client),
                None => return Err(RepositoryError::NotFound.into()),
            }
        }
        Command::Create(args) => {
            let client = shell.page_mut().submit_form(&args.into(), None).await?;
            print_json(&client);
        }
        Command::Update { id, form } => {
            let id = client_id(id)?;
            let client = shell.page_mut().submit_form(&form.into(), Some(id)).await?;
            print_json(&client);
        }
        Command::Delete { id } => {
            let id = client_id(id)?;
            let client = shell
                .page()
                .controller()
                .get_client(id)
                .await
                .ok_or(RepositoryError::NotFound)?;
            shell.page_mut().confirm_delete(&client).await?;
        }
        Command::Suggest { query } => {
            let suggestions = shell.page().controller().search_suggestions(&query).await?;
            print_json(&suggestions);
        }
    }

    shell.unmount();
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading dashboard config: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli, config).await {
        match err.field_errors() {
            Some(errors) => {
                for (field, message) in errors {
                    eprintln!("{field}: {message}");
                }
            }
            None => log::error!("{err}"),
        }
        std::process::exit(1);
    }
}
