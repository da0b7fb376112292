use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AccountController, Confirmer, DeleteForm, FixedConfirmer, HttpAccountApi, LoginForm,
    RegisterForm, Session, Tab, UpdateForm,
};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod settings;
mod terminal;

use settings::{load_settings, normalize_database_url};
use terminal::{StdinConfirmer, TerminalView};

#[derive(Parser, Debug)]
#[command(name = "account-console", about = "Terminal client for the user-account API")]
struct Args {
    /// Base URL of the account API.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Where the session token is kept between runs.
    #[arg(long, global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange credentials for a bearer token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// List every user.
    Users,
    /// Show the logged-in user.
    Me,
    /// Create a user.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        full_name: String,
        #[arg(long)]
        password: String,
    },
    /// Update a user; omitted fields are left unchanged.
    Update {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        full_name: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Delete a user after confirmation.
    Delete {
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Print the panel selector with the named tab active. Display only; the
    /// choice is not remembered between runs.
    Tab { name: String },
    /// Show session status, the user list and the current user.
    Status,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(database_url) = args.database_url {
        settings.database_url = normalize_database_url(&database_url);
    }
    info!(api = %settings.api_base_url, db = %settings.database_url, "starting");

    let storage = Storage::new(&settings.database_url)
        .await
        .context("failed to open local token storage")?;
    storage
        .health_check()
        .await
        .context("local token storage is unusable")?;
    let session = Session::restore(Arc::new(storage))
        .await
        .context("failed to restore session")?;
    let api = HttpAccountApi::new(&settings.api_base_url)?;

    let confirmer: Arc<dyn Confirmer> = match &args.command {
        Command::Delete { yes: true, .. } => Arc::new(FixedConfirmer(true)),
        _ => Arc::new(StdinConfirmer),
    };
    let controller = AccountController::new(
        Arc::new(api),
        session,
        Arc::new(TerminalView::stdout()),
        confirmer,
    );

    let ok = match args.command {
        Command::Login { username, password } => controller
            .authenticate(&LoginForm { username, password })
            .await
            .is_ok(),
        Command::Logout => controller.logout().await.is_ok(),
        Command::Users => controller.list_users().await.is_ok(),
        Command::Me => controller.fetch_current_user().await.is_ok(),
        Command::Register {
            username,
            email,
            full_name,
            password,
        } => controller
            .create_user(&RegisterForm {
                username,
                email,
                full_name,
                password,
            })
            .await
            .is_ok(),
        Command::Update {
            id,
            username,
            email,
            full_name,
            password,
        } => controller
            .update_user(&UpdateForm {
                user_id: id,
                username,
                email,
                full_name,
                password,
            })
            .await
            .is_ok(),
        Command::Delete { id, .. } => controller
            .delete_user(&DeleteForm { user_id: id })
            .await
            .is_ok(),
        Command::Tab { name } => {
            let tab: Tab = name.parse()?;
            controller.select_tab(tab).await;
            true
        }
        Command::Status => controller.initialize().await.is_ok(),
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
