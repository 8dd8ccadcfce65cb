use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::Notify;
use wellness_chat::chat::{ChatController, ResponseClient};
use wellness_chat::config::GenerationConfig;
use wellness_chat::error::{Result, WellnessError};
use wellness_chat::localization::LanguageCatalog;
use wellness_chat::providers::{GenerationRequest, Provider};

/// Provider double that records requests and replies from a script
///
/// When gated, every call blocks until [`ScriptedProvider::release`] is
/// called once for it.
#[allow(dead_code)]
pub struct ScriptedProvider {
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
    fail: bool,
    gate: Option<Notify>,
    started: Notify,
}

#[allow(dead_code)]
impl ScriptedProvider {
    /// Replies with `reply #<n>: <message>`
    pub fn replying() -> Arc<Self> {
        Arc::new(Self::build(false, false))
    }

    /// Fails every call
    pub fn failing() -> Arc<Self> {
        Arc::new(Self::build(true, false))
    }

    /// Replies like [`ScriptedProvider::replying`] but waits for a release
    pub fn gated() -> Arc<Self> {
        Arc::new(Self::build(false, true))
    }

    fn build(fail: bool, gated: bool) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            fail,
            gate: gated.then(Notify::new),
            started: Notify::new(),
        }
    }

    /// Number of times `generate` was entered
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Let one gated call finish
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Wait until a call has entered `generate`
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.clone());
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.fail {
            return Err(WellnessError::Provider("scripted failure".to_string()).into());
        }
        Ok(format!("reply #{}: {}", n, request.message))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Controller backed by `provider` with the built-in catalog
#[allow(dead_code)]
pub fn controller_with(provider: Arc<ScriptedProvider>, language: &str) -> ChatController {
    let client = ResponseClient::new(
        provider,
        Arc::new(LanguageCatalog::builtin()),
        GenerationConfig::default(),
    );
    ChatController::new(client, language, 2000)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
