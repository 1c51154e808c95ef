use std::net::TcpListener;

use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use secrecy::ExposeSecret;
use secrecy::Secret;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::routes::health_check;
use crate::routes::home;
use crate::routes::join_waitlist;
use crate::waitlist_client::WaitlistClient;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the listener, build the waitlist client, and assemble the server
    /// (which is not yet running; see `run_until_stopped`).
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(addr)?;

        // with port 0 (tests), the OS picks the port
        let port = listener.local_addr()?.port();

        let waitlist_client = cfg.waitlist.client()?;
        tracing::info!(
            endpoint = waitlist_client.endpoint(),
            "forwarding waitlist submissions"
        );

        let server = run(listener, waitlist_client, cfg.application.hmac_secret)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all endpoints.
pub fn run(
    listener: TcpListener,
    waitlist_client: WaitlistClient,
    hmac_secret: Secret<String>,
) -> Result<Server, anyhow::Error> {
    // `Key::from` panics below 64 bytes
    let secret_key = Key::try_from(hmac_secret.expose_secret().as_bytes())
        .map_err(|e| anyhow::anyhow!("hmac_secret is not a usable cookie key: {e:?}"))?;

    // flash messages live in a signed cookie; no server-side session needed
    let cookie_store = CookieMessageStore::builder(secret_key).build();
    let msg_framework = FlashMessagesFramework::builder(cookie_store).build();

    // `Data` is an `Arc`; every worker shares the one connection pool
    let waitlist_client = web::Data::new(waitlist_client);

    // the closure runs once per worker, so everything it captures must be
    // cloneable
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(msg_framework.clone())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/waitlist", web::post().to(join_waitlist))
            .app_data(waitlist_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
