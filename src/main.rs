use marketio::application::ledger::Ledger;
use marketio::config::{Cli, Command, init_tracing};
use marketio::interfaces::{cli, http};
use miette::{IntoDiagnostic, Result};
use std::io;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::load();
    init_tracing(match args.command {
        Command::Serve { .. } => "info",
        _ => "warn",
    });

    let generator = args.generator();
    let services = args.services(generator.clone()).into_diagnostic()?;

    if let Command::Serve { host, port } = &args.command {
        if args.remote.is_some() {
            tracing::info!("Proxying to the remote backend");
        }
        let listener = TcpListener::bind((host.as_str(), *port))
            .await
            .into_diagnostic()?;
        tracing::info!(address = %listener.local_addr().into_diagnostic()?, "Listening");
        axum::serve(listener, http::server::router(services))
            .await
            .into_diagnostic()?;
        return Ok(());
    }

    let ledger = Ledger::new(args.store().into_diagnostic()?, generator);
    let timeout = args.timeout();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match args.command {
        Command::Serve { .. } => Ok(()),
        Command::Buy { purchase } => cli::buy(&services, &ledger, timeout, purchase, &mut out).await,
        Command::History { csv } => cli::history(&ledger, csv, &mut out).await,
        Command::Vehicles { action } => cli::vehicles(&ledger, action, &mut out).await,
        Command::Cards { action } => cli::cards(&ledger, action, &mut out).await,
        Command::Theme { id } => cli::theme(&ledger, id, &mut out).await,
    };
    outcome.into_diagnostic()
}
