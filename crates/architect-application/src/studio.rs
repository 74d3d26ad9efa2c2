//! Studio use case.
//!
//! `Studio` owns the single active [`SessionDraft`] and drives it through the
//! two-stage workflow, persisting results into the [`HistoryStore`].
//!
//! # Locking
//!
//! The draft lock is never held across a network or file await. Each
//! operation locks, reads or transitions, unlocks, performs its I/O, then
//! re-locks to apply the completion. Completions carry the epoch captured
//! when their request was issued and are dropped when the draft has moved on.

use anyhow::{Context, Result};
use architect_core::attachment::{Attachment, AttachmentLoader};
use architect_core::credential::CredentialService;
use architect_core::error::ArchitectError;
use architect_core::estimate::{self, Estimate};
use architect_core::history::{HistoryEntry, HistoryStore};
use architect_core::prompt::{CreativityLevel, PromptGenerator, PromptStyle};
use architect_core::session::{
    EXECUTION_FAILED_MESSAGE, Epoch, GENERATION_FAILED_MESSAGE, Notice, OutputTab, SessionDraft,
    SessionPhase,
};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Read-only view of the studio for rendering.
#[derive(Debug, Clone)]
pub struct StudioSnapshot {
    pub draft: SessionDraft,
    pub phase: SessionPhase,
    /// Estimate for the idea plus attachments
    pub input_estimate: Estimate,
    /// Estimate for the text on the displayed tab
    pub output_estimate: Estimate,
    pub history: Vec<HistoryEntry>,
    pub notice: Option<Notice>,
}

impl StudioSnapshot {
    pub fn displayed_text(&self) -> &str {
        self.draft.displayed_text()
    }
}

/// Outcome of an attachment batch.
#[derive(Debug, Default)]
pub struct AttachReport {
    /// Names of files appended to the draft
    pub added: Vec<String>,
    /// Files that failed to load, with the reason
    pub rejected: Vec<(PathBuf, ArchitectError)>,
    /// Files that loaded after the draft was reset
    pub dropped: usize,
}

pub struct Studio {
    draft: Mutex<SessionDraft>,
    history: Arc<HistoryStore>,
    generator: Arc<dyn PromptGenerator>,
    credentials: Arc<dyn CredentialService>,
    loader: Arc<dyn AttachmentLoader>,
}

impl Studio {
    pub fn new(
        history: Arc<HistoryStore>,
        generator: Arc<dyn PromptGenerator>,
        credentials: Arc<dyn CredentialService>,
        loader: Arc<dyn AttachmentLoader>,
    ) -> Self {
        Self {
            draft: Mutex::new(SessionDraft::new()),
            history,
            generator,
            credentials,
            loader,
        }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub async fn snapshot(&self) -> StudioSnapshot {
        let draft = self.draft.lock().await.clone();
        let history = self.history.entries().await;

        StudioSnapshot {
            phase: draft.phase(),
            input_estimate: estimate::estimate_input(&draft.idea, draft.attachments.len()),
            output_estimate: estimate::estimate_output(draft.displayed_text()),
            notice: draft.active_notice().cloned(),
            history,
            draft,
        }
    }

    // ============================================================================
    // Credential
    // ============================================================================

    /// Persists the API key. An empty key removes the stored credential.
    pub async fn set_api_key(&self, key: &str) -> Result<()> {
        let key = key.trim();
        self.credentials
            .save_api_key(key)
            .await
            .context("Failed to save API key")?;

        if !key.is_empty() {
            let mut draft = self.draft.lock().await;
            draft.error = None;
            draft.raise(Notice::info("API key saved"));
        }
        tracing::info!("[Studio] API key {}", if key.is_empty() { "cleared" } else { "updated" });
        Ok(())
    }

    pub async fn has_api_key(&self) -> bool {
        self.api_key().await.is_some()
    }

    async fn api_key(&self) -> Option<String> {
        match self.credentials.load_api_key().await {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("[Studio] Failed to read API key: {}", e);
                None
            }
        }
    }

    // ============================================================================
    // Inputs
    // ============================================================================

    pub async fn set_idea(&self, idea: impl Into<String>) {
        self.draft.lock().await.idea = idea.into();
    }

    pub async fn set_style(&self, style: PromptStyle) {
        self.draft.lock().await.style = style;
    }

    pub async fn set_creativity(&self, creativity: CreativityLevel) {
        self.draft.lock().await.creativity = creativity;
    }

    pub async fn show_tab(&self, tab: OutputTab) {
        self.draft.lock().await.displayed_tab = tab;
    }

    /// Loads `paths` concurrently and appends each file as it finishes.
    ///
    /// Unsupported or unreadable files are reported and raise a warning
    /// notice. Files that finish after a reset are discarded.
    pub async fn attach_files(&self, paths: &[PathBuf]) -> AttachReport {
        let epoch = self.draft.lock().await.epoch();
        let mut report = AttachReport::default();

        let mut pending: FuturesUnordered<_> = paths
            .iter()
            .map(|path| {
                let loader = self.loader.clone();
                async move { (path, loader.load(path).await) }
            })
            .collect();

        while let Some((path, loaded)) = pending.next().await {
            match loaded {
                Ok(attachment) => self.push_attachment(epoch, attachment, &mut report).await,
                Err(e) => {
                    tracing::warn!("[Studio] Rejected attachment {}: {}", path.display(), e);
                    let mut draft = self.draft.lock().await;
                    if draft.is_current(epoch) {
                        draft.raise(Notice::warning(format!(
                            "Unsupported or unreadable file: {}",
                            display_name(path)
                        )));
                    }
                    report.rejected.push((path.clone(), e));
                }
            }
        }

        report
    }

    async fn push_attachment(&self, epoch: Epoch, attachment: Attachment, report: &mut AttachReport) {
        let name = attachment.name.clone();
        if self.draft.lock().await.push_attachment(epoch, attachment) {
            tracing::debug!("[Studio] Attached {}", name);
            report.added.push(name);
        } else {
            tracing::debug!("[Studio] Dropped attachment {} loaded for a reset draft", name);
            report.dropped += 1;
        }
    }

    pub async fn remove_attachment(&self, index: usize) -> Option<Attachment> {
        self.draft.lock().await.remove_attachment(index)
    }

    // ============================================================================
    // Workflow
    // ============================================================================

    /// Discards the draft and starts over.
    pub async fn new_project(&self) {
        self.draft.lock().await.reset();
        tracing::info!("[Studio] New project started");
    }

    /// Generates a super prompt from the current inputs.
    ///
    /// Returns the new history entry, or `None` when the completion arrived
    /// for a draft that has since been replaced.
    pub async fn generate(&self) -> Result<Option<HistoryEntry>> {
        let api_key = self.api_key().await;
        let (epoch, request) = self
            .draft
            .lock()
            .await
            .begin_generate(api_key.is_some())?;
        let api_key = api_key.unwrap_or_default();

        tracing::info!(
            "[Studio] Generating super prompt: style={}, creativity={}, attachments={}",
            request.style,
            request.creativity,
            request.attachments.len()
        );

        match self.generator.generate_super_prompt(&api_key, &request).await {
            Ok(super_prompt) => {
                let entry = HistoryEntry::new(
                    &request.idea,
                    request.attachments.len(),
                    request.style,
                    request.creativity,
                    super_prompt.clone(),
                );

                // The entry must exist before the draft is bound to it, so an
                // execute issued right after binding finds it in history.
                self.history.prepend(entry.clone()).await;

                let applied = self
                    .draft
                    .lock()
                    .await
                    .apply_generated(epoch, super_prompt, entry.id.clone());
                if !applied {
                    tracing::info!("[Studio] Ignoring stale super prompt (epoch {})", epoch);
                    self.history.delete(&entry.id).await;
                    return Ok(None);
                }
                Ok(Some(entry))
            }
            Err(e) => {
                tracing::error!("[Studio] Super prompt generation failed: {}", e);
                if !self.draft.lock().await.apply_generate_failure(epoch) {
                    tracing::info!("[Studio] Ignoring stale generation failure (epoch {})", epoch);
                    return Ok(None);
                }
                Err(anyhow::Error::new(e).context(GENERATION_FAILED_MESSAGE))
            }
        }
    }

    /// Runs the current super prompt and records the answer.
    ///
    /// The bound history entry is updated in place by the id captured when
    /// the request was issued. Returns `None` when the draft moved on before
    /// the answer arrived.
    pub async fn execute(&self) -> Result<Option<String>> {
        let api_key = self.api_key().await;
        let ticket = self.draft.lock().await.begin_execute(api_key.is_some())?;
        let api_key = api_key.unwrap_or_default();

        tracing::info!("[Studio] Executing super prompt ({} chars)", ticket.super_prompt.len());

        match self.generator.execute_prompt(&api_key, &ticket.super_prompt).await {
            Ok(result) => {
                let applied = self
                    .draft
                    .lock()
                    .await
                    .apply_executed(ticket.epoch, result.clone());

                if let Some(id) = &ticket.history_id {
                    if !self.history.update_final_result(id, &result).await {
                        tracing::warn!(
                            "[Studio] History entry {} was deleted before its result arrived",
                            id
                        );
                    }
                }

                if !applied {
                    tracing::info!("[Studio] Ignoring stale execution result (epoch {})", ticket.epoch);
                    return Ok(None);
                }
                Ok(Some(result))
            }
            Err(e) => {
                tracing::error!("[Studio] Prompt execution failed: {}", e);
                if !self.draft.lock().await.apply_execute_failure(ticket.epoch) {
                    tracing::info!("[Studio] Ignoring stale execution failure (epoch {})", ticket.epoch);
                    return Ok(None);
                }
                Err(anyhow::Error::new(e).context(EXECUTION_FAILED_MESSAGE))
            }
        }
    }

    // ============================================================================
    // History
    // ============================================================================

    /// Replaces the draft with the stored entry `id`.
    pub async fn load_from_history(&self, id: &str) -> Result<HistoryEntry> {
        let entry = self
            .history
            .get(id)
            .await
            .ok_or_else(|| ArchitectError::not_found("HistoryEntry", id))?;

        self.draft.lock().await.load_entry(&entry);
        tracing::info!("[Studio] Loaded history entry {}", id);
        Ok(entry)
    }

    /// Permanently removes entry `id`, unbinding it from the draft.
    pub async fn delete_history(&self, id: &str) -> Result<()> {
        if !self.history.delete(id).await {
            return Err(ArchitectError::not_found("HistoryEntry", id).into());
        }

        if self.draft.lock().await.forget_entry(id) {
            tracing::debug!("[Studio] Deleted entry {} was bound to the draft", id);
        }
        tracing::info!("[Studio] Deleted history entry {}", id);
        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
