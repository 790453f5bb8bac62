mod app;
mod bootstrap;
mod captcha;
mod config;
mod handlers;
mod images;
mod mailer;
mod state;
mod storage;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use folio_auth::{ensure_owner, AuthConfig, AuthState};
use folio_core::auth::CaptchaVerifier;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    bootstrap::seed_favourites,
    captcha::{DisabledCaptcha, RecaptchaVerifier},
    config::Config,
    images::Thumbnailer,
    mailer::{DisabledMailer, Mailer, SmtpMailer},
    state::AppState,
    storage::SqliteRepository,
};

/// Folio - Portfolio and blog backend
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "5000", env = "PORT")]
    port: u16,

    /// Drop and recreate every table before serving
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,folio_auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let auth_config = AuthConfig::from_env().context("SECRET_KEY must be set")?;

    let repository = Arc::new(
        SqliteRepository::new(&config.database_path)
            .await
            .with_context(|| format!("failed to open database {}", config.database_path))?,
    );
    if cli.reset {
        repository.reset().await.context("failed to reset database")?;
        tracing::warn!(path = %config.database_path, "database reset");
    }

    let captcha: Arc<dyn CaptchaVerifier> = match config.recaptcha.clone() {
        Some(recaptcha) => Arc::new(RecaptchaVerifier::new(recaptcha)),
        None => {
            tracing::warn!("RECAPTCHA_SECRET not set, captcha checks are disabled");
            Arc::new(DisabledCaptcha)
        }
    };

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(smtp).context("invalid SMTP configuration")?),
        None => {
            tracing::warn!("BACKEND_EMAIL not set, the contact form cannot send mail");
            Arc::new(DisabledMailer)
        }
    };

    let auth = AuthState::new(repository.clone(), repository.clone(), captcha, auth_config);
    let state = AppState::new(
        repository,
        Arc::new(Thumbnailer::new(config.compressed_max_dimension)),
        auth,
        mailer,
        config.email_daily_limit,
    );

    ensure_owner(&state.auth)
        .await
        .context("failed to create owner account")?;

    if let Some(path) = &config.favourites_path {
        if let Err(e) = seed_favourites(state.favourites.as_ref(), path).await {
            tracing::warn!(error = %e, "favourites were not seeded");
        }
    }

    let app = create_app(state, &config);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
