use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();
static UPLOAD_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let upload_dir = UPLOAD_DIR
            .get_or_init(|| tempfile::tempdir().expect("failed to create upload tempdir"));

        // Spawn the already-built binary to keep start fast during tests.
        // Assumes debug profile; adjust if you run tests with --release.
        let mut cmd = Command::new("target/debug/mingle-api");
        cmd.env("PORT", port.to_string())
            .env("JWT_SECRET", "integration-test-secret")
            .env("BCRYPT_COST", "4")
            .env("UPLOAD_DIR", upload_dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Spawn (once) and return the test server, or `None` when no store is
/// configured. Startup aborts without a reachable database, so the suite
/// skips rather than fails on machines without one.
pub async fn server_if_configured() -> Result<Option<&'static TestServer>> {
    // The server loads .env itself; only skip when neither source can
    // possibly provide a store URL.
    if std::env::var("DATABASE_URL").is_err() && !std::path::Path::new(".env").exists() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(None);
    }

    let server =
        SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}

/// Register a throwaway user and return (email, password, user id as JSON).
pub async fn register_user(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<(String, String, serde_json::Value)> {
    let email = format!("user-{}@example.com", uuid_like());
    let password = "pw123456".to_string();

    let form = reqwest::multipart::Form::new()
        .text("firstName", "Test")
        .text("lastName", "User")
        .text("email", email.clone())
        .text("password", password.clone());

    let res = client
        .post(format!("{}/auth/register", base_url))
        .multipart(form)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    Ok((email, password, body["data"].clone()))
}

/// Log in and return the bearer token.
pub async fn login_user(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    body["data"]["token"]
        .as_str()
        .map(str::to_string)
        .context("login response missing token")
}

fn uuid_like() -> String {
    // Enough uniqueness for test emails without pulling uuid into dev-deps
    format!("{:x}", std::time::UNIX_EPOCH.elapsed().unwrap().as_nanos())
}
