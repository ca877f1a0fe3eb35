use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use portunus::model::RemoteConfig;
use portunus::remote::RemoteClient;

pub const DEV_TOKEN: &str = "dev";
pub const DEV_USER: &str = "dev@localhost";

pub struct ServerGuard {
    pub base_url: String,
    pub token: String,
    _data_dir: Option<tempfile::TempDir>,
    child: Child,
}

impl ServerGuard {
    pub fn client(&self) -> Result<RemoteClient> {
        self.client_with_token(&self.token)
    }

    pub fn client_with_token(&self, token: &str) -> Result<RemoteClient> {
        RemoteClient::new(RemoteConfig::new(self.base_url.clone()), token.to_string())
    }

    /// Stops the server and waits for the process to exit.
    pub fn stop(mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let mut guard = spawn_server_in(data_dir.path())?;
    guard._data_dir = Some(data_dir);
    Ok(guard)
}

/// Starts a server on an existing data dir, which outlives the guard.
pub fn spawn_server_in(data_dir: &Path) -> Result<ServerGuard> {
    let token = DEV_TOKEN.to_string();
    let addr_file = data_dir.join(format!("addr-{}.txt", unique_suffix()));

    let child = Command::new(env!("CARGO_BIN_EXE_portunus-server"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().context("addr file path")?,
            "--data-dir",
            data_dir.to_str().context("data dir path")?,
            "--dev-user",
            DEV_USER,
            "--dev-token",
            &token,
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn portunus-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        token,
        _data_dir: None,
        child,
    })
}

fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
