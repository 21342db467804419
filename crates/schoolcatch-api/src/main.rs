//! SchoolCatch CLI and web server entry point.
//!
//! Binary name: `schoolcatch`
//!
//! Parses CLI arguments, loads configuration, wires the RAG chain, then
//! dispatches to a command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

#[cfg(test)]
mod testing;

use clap::Parser;
use clap_complete::generate;

use schoolcatch_infra::config::load_config;
use schoolcatch_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // Interactive commands stay quiet unless asked; the server logs requests.
    let default_filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if matches!(cli.command, Commands::Serve { .. }) => "info",
        0 => "warn",
        1 => "info,schoolcatch=debug",
        _ => "trace",
    };
    init_tracing(&TracingOptions {
        otel: cli.otel,
        json: cli.json_logs,
        default_filter: default_filter.to_string(),
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "schoolcatch", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config).await;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::init(config)?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} SchoolCatch listening on {}",
                    console::style("🎓").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Ask { question, session } => {
            let state = AppState::init(config)?;
            cli::ask::ask(&state, question, session, cli.json).await?;
        }

        Commands::Chat { locale, session } => {
            let state = AppState::init(config)?;
            cli::chat::loop_runner::run_chat_loop(&state, locale, session).await?;
        }

        Commands::Notices { department } => {
            cli::notices::notices(&config, &department, cli.json).await?;
        }

        Commands::Faq { topic, locale } => {
            cli::faq::faq(topic.as_deref(), locale, cli.json)?;
        }

        Commands::Completions { .. } => {}
    }

    shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
