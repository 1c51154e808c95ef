use waitlist::configuration::get_configuration;
use waitlist::startup::Application;
use waitlist::telemetry::get_subscriber;
use waitlist::telemetry::init_subscriber;

/// Initialise telemetry, load config, and start the server
#[tokio::main] // requires tokio features: macros, rt-multi-thread
async fn main() -> Result<(), anyhow::Error> {
    // only logs at this level and higher are emitted, unless `RUST_LOG` says
    // otherwise
    let subscriber = get_subscriber("waitlist", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let cfg = get_configuration()?;
    let app = Application::build(cfg).await?;
    tracing::info!(port = app.get_port(), "listening");

    if let Err(e) = app.run_until_stopped().await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "server exited with an error"
        );
        return Err(e.into());
    }
    tracing::info!("server exited gracefully");
    Ok(())
}
