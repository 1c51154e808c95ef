use once_cell::sync::Lazy;
use waitlist::configuration::get_configuration;
use waitlist::startup::Application;
use waitlist::telemetry::get_subscriber;
use waitlist::telemetry::init_subscriber;
use wiremock::MockServer;

/// Init the tracing subscriber once only, no matter how many tests spawn an
/// app.
///
/// To opt in to verbose logging, use the env var `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the two sinks are different types, hence the two arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber).expect("init tracing");
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber).expect("init tracing");
        }
    };
});

pub struct TestApp {
    pub addr: String,
    /// Stands in for the collection endpoint
    pub collection_server: MockServer,
    /// Keeps cookies (flash messages), does not follow redirects
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// `POST /waitlist` with an urlencoded body
    pub async fn post_waitlist(
        &self,
        body: String,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/waitlist", self.addr))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("execute request")
    }

    pub async fn get_home(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/", self.addr))
            .send()
            .await
            .expect("execute request")
    }

    pub async fn get_home_html(&self) -> String { self.get_home().await.text().await.unwrap() }
}

/// Urlencoded `POST /waitlist` body for `email`
pub fn waitlist_body(email: &str) -> String {
    serde_urlencoded::to_string([("email", email)]).unwrap()
}

/// Spawn the app on a random port, forwarding to a fresh `MockServer`.
pub async fn spawn_app() -> TestApp { spawn_app_with_endpoint(None).await }

/// As `spawn_app`, but forward waitlist submissions to `endpoint` instead of
/// the mock server (e.g. to something that isn't listening).
pub async fn spawn_app_with_endpoint(endpoint: Option<String>) -> TestApp {
    Lazy::force(&TRACING);

    let collection_server = MockServer::start().await;

    let cfg = {
        let mut cfg = get_configuration().expect("read configuration");
        // port 0 is reserved by the OS; the server gets a random available port
        cfg.application.port = 0;
        cfg.waitlist.base_url = endpoint.unwrap_or_else(|| collection_server.uri());
        cfg
    };

    let app = Application::build(cfg).await.expect("build app");
    // localhost rather than 127.0.0.1, so the cookie store keeps the flash cookie
    let addr = format!("http://localhost:{}", app.get_port());
    tokio::spawn(app.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        addr,
        collection_server,
        api_client,
    }
}

/// A port nothing listens on
pub fn dead_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port())
}

pub fn assert_is_redirect_to(
    resp: &reqwest::Response,
    location: &str,
) {
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), location);
}
