#![allow(dead_code)]

use architect_application::Studio;
use architect_core::attachment::{self, Attachment, AttachmentLoader};
use architect_core::credential::CredentialService;
use architect_core::error::{ArchitectError, Result};
use architect_core::history::{HistoryEntry, HistoryRepository, HistoryStore};
use architect_core::prompt::{PromptGenerator, SuperPromptRequest};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Pauses a call until the test releases it.
pub struct Gate {
    started: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Test-side handle of a [`Gate`].
pub struct GateHandle {
    pub started: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

pub fn gate() -> (Gate, GateHandle) {
    let (started_tx, started_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    (
        Gate {
            started: started_tx,
            release: release_rx,
        },
        GateHandle {
            started: started_rx,
            release: release_tx,
        },
    )
}

impl Gate {
    async fn pass(self) {
        let _ = self.started.send(());
        let _ = self.release.await;
    }
}

#[derive(Default)]
pub struct ScriptedGenerator {
    super_prompts: Mutex<VecDeque<Result<String>>>,
    executions: Mutex<VecDeque<Result<String>>>,
    gate: Mutex<Option<Gate>>,
    pub generate_calls: Mutex<Vec<(String, SuperPromptRequest)>>,
    pub execute_calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    pub fn push_super_prompt(&self, result: Result<String>) {
        self.super_prompts.lock().unwrap().push_back(result);
    }

    pub fn push_execution(&self, result: Result<String>) {
        self.executions.lock().unwrap().push_back(result);
    }

    /// Holds the next call until the returned handle releases it.
    pub fn hold_next(&self) -> GateHandle {
        let (gate, handle) = gate();
        *self.gate.lock().unwrap() = Some(gate);
        handle
    }

    pub fn call_count(&self) -> usize {
        self.generate_calls.lock().unwrap().len() + self.execute_calls.lock().unwrap().len()
    }

    async fn wait_gate(&self) {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.pass().await;
        }
    }
}

#[async_trait]
impl PromptGenerator for ScriptedGenerator {
    async fn generate_super_prompt(
        &self,
        api_key: &str,
        request: &SuperPromptRequest,
    ) -> Result<String> {
        self.generate_calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));
        self.wait_gate().await;
        self.super_prompts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("[PERSONA]\nDefault".to_string()))
    }

    async fn execute_prompt(&self, api_key: &str, super_prompt: &str) -> Result<String> {
        self.execute_calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), super_prompt.to_string()));
        self.wait_gate().await;
        self.executions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Default answer".to_string()))
    }
}

#[derive(Default)]
pub struct MockCredentials {
    key: Mutex<Option<String>>,
}

impl MockCredentials {
    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(Some(key.to_string())),
        }
    }
}

#[async_trait]
impl CredentialService for MockCredentials {
    async fn load_api_key(&self) -> Result<Option<String>> {
        Ok(self.key.lock().unwrap().clone())
    }

    async fn save_api_key(&self, key: &str) -> Result<()> {
        *self.key.lock().unwrap() = (!key.is_empty()).then(|| key.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockHistoryRepository {
    pub saved: Mutex<Vec<HistoryEntry>>,
}

#[async_trait]
impl HistoryRepository for MockHistoryRepository {
    async fn load_all(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    async fn save_all(&self, entries: &[HistoryEntry]) -> Result<()> {
        *self.saved.lock().unwrap() = entries.to_vec();
        Ok(())
    }
}

/// Serves attachments from memory, guessing the type from the extension.
#[derive(Default)]
pub struct MockLoader {
    gates: Mutex<HashMap<PathBuf, Gate>>,
}

impl MockLoader {
    pub fn hold(&self, path: &str) -> GateHandle {
        let (gate, handle) = gate();
        self.gates.lock().unwrap().insert(PathBuf::from(path), gate);
        handle
    }
}

#[async_trait]
impl AttachmentLoader for MockLoader {
    async fn load(&self, path: &Path) -> Result<Attachment> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        };
        attachment::ensure_supported(&name, mime_type)?;

        let gate = self.gates.lock().unwrap().remove(path);
        if let Some(gate) = gate {
            gate.pass().await;
        }

        if name.starts_with("missing") {
            return Err(ArchitectError::io(format!("{name}: not found")));
        }
        attachment::encode(name.clone(), mime_type, name.as_bytes())
    }
}

pub struct Fixture {
    pub studio: Arc<Studio>,
    pub generator: Arc<ScriptedGenerator>,
    pub loader: Arc<MockLoader>,
    pub repository: Arc<MockHistoryRepository>,
}

pub async fn fixture_with_key(key: Option<&str>) -> Fixture {
    let generator = Arc::new(ScriptedGenerator::default());
    let loader = Arc::new(MockLoader::default());
    let repository = Arc::new(MockHistoryRepository::default());
    let credentials = Arc::new(match key {
        Some(key) => MockCredentials::with_key(key),
        None => MockCredentials::default(),
    });

    let history = Arc::new(HistoryStore::open(repository.clone()).await);
    let studio = Arc::new(Studio::new(
        history,
        generator.clone(),
        credentials,
        loader.clone(),
    ));

    Fixture {
        studio,
        generator,
        loader,
        repository,
    }
}

pub async fn fixture() -> Fixture {
    fixture_with_key(Some("test-key")).await
}
