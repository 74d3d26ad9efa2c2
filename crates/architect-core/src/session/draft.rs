//! The single active editing context and its transitions.
//!
//! Transitions are plain methods on [`SessionDraft`]; the application layer
//! performs the I/O in between and feeds completions back in. Every request
//! is tagged with the draft's epoch at issue time, and a completion is
//! applied only if the epoch is unchanged.

use super::notice::Notice;
use super::phase::{OutputTab, SessionPhase};
use crate::attachment::Attachment;
use crate::error::{Result, ValidationError};
use crate::history::HistoryEntry;
use crate::prompt::{CreativityLevel, PromptStyle, SuperPromptRequest};

pub const GENERATION_FAILED_MESSAGE: &str =
    "An error occurred while generating the prompt. Check your API key and connection.";
pub const EXECUTION_FAILED_MESSAGE: &str =
    "An error occurred while executing the final prompt. Check your API key.";

/// Tag carried by an in-flight request.
pub type Epoch = u64;

/// Inputs captured when an execution request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionTicket {
    pub epoch: Epoch,
    pub super_prompt: String,
    /// History entry to update once the result arrives
    pub history_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    pub idea: String,
    pub style: PromptStyle,
    pub creativity: CreativityLevel,
    pub attachments: Vec<Attachment>,
    pub super_prompt: String,
    pub final_result: String,
    /// User-visible error banner
    pub error: Option<String>,
    pub is_generating: bool,
    pub is_executing: bool,
    /// History entry bound to this draft
    pub current_history_id: Option<String>,
    pub displayed_tab: OutputTab,
    pub notice: Option<Notice>,
    epoch: Epoch,
}

impl SessionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.epoch == epoch
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_generating {
            SessionPhase::Generating
        } else if self.is_executing {
            SessionPhase::Executing
        } else if !self.final_result.is_empty() {
            SessionPhase::Complete
        } else if !self.super_prompt.is_empty() {
            SessionPhase::PromptReady
        } else {
            SessionPhase::Idle
        }
    }

    pub fn has_input(&self) -> bool {
        !self.idea.trim().is_empty() || !self.attachments.is_empty()
    }

    /// Text of the tab currently on display.
    pub fn displayed_text(&self) -> &str {
        match self.displayed_tab {
            OutputTab::Prompt => &self.super_prompt,
            OutputTab::Result => &self.final_result,
        }
    }

    pub fn active_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_active())
    }

    pub fn raise(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    // ============================================================================
    // NewProject
    // ============================================================================

    /// Returns to `Idle`, discarding all draft state.
    ///
    /// In-flight requests become stale.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self {
            epoch,
            ..Self::default()
        };
        self.raise(Notice::info("New project started"));
    }

    // ============================================================================
    // Attachments
    // ============================================================================

    /// Appends an attachment whose read started at `epoch`.
    ///
    /// Returns `false` when the draft was reset in the meantime.
    pub fn push_attachment(&mut self, epoch: Epoch, attachment: Attachment) -> bool {
        if !self.is_current(epoch) {
            return false;
        }
        self.attachments.push(attachment);
        true
    }

    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        (index < self.attachments.len()).then(|| self.attachments.remove(index))
    }

    // ============================================================================
    // Generation
    // ============================================================================

    /// Validates and enters `Generating`.
    ///
    /// Any previous final result is cleared. The previous super prompt stays
    /// until a successful completion replaces it.
    pub fn begin_generate(&mut self, has_credential: bool) -> Result<(Epoch, SuperPromptRequest)> {
        if !has_credential {
            return Err(self.reject(ValidationError::MissingCredential));
        }
        if !self.has_input() {
            return Err(self.reject(ValidationError::EmptyInput));
        }

        self.is_generating = true;
        self.final_result.clear();
        self.error = None;
        self.displayed_tab = OutputTab::Prompt;

        let request = SuperPromptRequest {
            idea: self.idea.clone(),
            style: self.style,
            creativity: self.creativity,
            attachments: self.attachments.clone(),
        };
        Ok((self.epoch, request))
    }

    /// Applies a generated super prompt bound to history entry `history_id`.
    pub fn apply_generated(&mut self, epoch: Epoch, super_prompt: String, history_id: String) -> bool {
        if !self.is_current(epoch) {
            return false;
        }
        self.super_prompt = super_prompt;
        self.current_history_id = Some(history_id);
        self.displayed_tab = OutputTab::Prompt;
        self.is_generating = false;
        true
    }

    pub fn apply_generate_failure(&mut self, epoch: Epoch) -> bool {
        if !self.is_current(epoch) {
            return false;
        }
        self.is_generating = false;
        self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
        true
    }

    // ============================================================================
    // Execution
    // ============================================================================

    /// Validates and enters `Executing`.
    pub fn begin_execute(&mut self, has_credential: bool) -> Result<ExecutionTicket> {
        if !has_credential {
            return Err(self.reject(ValidationError::MissingCredential));
        }
        if self.super_prompt.trim().is_empty() {
            return Err(self.reject(ValidationError::MissingSuperPrompt));
        }

        self.is_executing = true;
        self.error = None;

        Ok(ExecutionTicket {
            epoch: self.epoch,
            super_prompt: self.super_prompt.clone(),
            history_id: self.current_history_id.clone(),
        })
    }

    pub fn apply_executed(&mut self, epoch: Epoch, final_result: String) -> bool {
        if !self.is_current(epoch) {
            return false;
        }
        self.final_result = final_result;
        self.displayed_tab = OutputTab::Result;
        self.is_executing = false;
        true
    }

    pub fn apply_execute_failure(&mut self, epoch: Epoch) -> bool {
        if !self.is_current(epoch) {
            return false;
        }
        self.is_executing = false;
        self.error = Some(EXECUTION_FAILED_MESSAGE.to_string());
        true
    }

    // ============================================================================
    // History binding
    // ============================================================================

    /// Replaces the draft with a stored entry.
    ///
    /// Attachments are never persisted, so the attachment set always starts
    /// empty. Requests issued for the previous draft become stale.
    pub fn load_entry(&mut self, entry: &HistoryEntry) {
        self.epoch += 1;
        self.idea = entry.idea().to_string();
        self.style = entry.style;
        self.creativity = entry.creativity;
        self.super_prompt = entry.generated_prompt.clone();
        self.final_result = entry.final_result.clone();
        self.attachments.clear();
        self.current_history_id = Some(entry.id.clone());
        self.is_generating = false;
        self.is_executing = false;
        self.error = None;
        self.displayed_tab = if entry.has_result() {
            OutputTab::Result
        } else {
            OutputTab::Prompt
        };
        self.raise(Notice::info("Project loaded from history"));
    }

    /// Unbinds a deleted entry. Returns whether it was the bound one.
    pub fn forget_entry(&mut self, id: &str) -> bool {
        if self.current_history_id.as_deref() != Some(id) {
            return false;
        }
        self.current_history_id = None;
        self.super_prompt.clear();
        self.final_result.clear();
        self.idea.clear();
        true
    }

    fn reject(&mut self, kind: ValidationError) -> crate::error::ArchitectError {
        self.error = Some(kind.to_string());
        kind.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment;

    fn draft_with_idea(idea: &str) -> SessionDraft {
        SessionDraft {
            idea: idea.to_string(),
            ..SessionDraft::default()
        }
    }

    fn png(name: &str) -> Attachment {
        attachment::encode(name, "image/png", b"png").unwrap()
    }

    #[test]
    fn phase_follows_outputs_and_flags() {
        let mut draft = SessionDraft::new();
        assert_eq!(draft.phase(), SessionPhase::Idle);

        draft.super_prompt = "[PERSONA]".into();
        assert_eq!(draft.phase(), SessionPhase::PromptReady);

        draft.is_executing = true;
        assert_eq!(draft.phase(), SessionPhase::Executing);

        draft.is_executing = false;
        draft.final_result = "done".into();
        assert_eq!(draft.phase(), SessionPhase::Complete);

        draft.is_generating = true;
        assert_eq!(draft.phase(), SessionPhase::Generating);
    }

    #[test]
    fn generate_requires_credential() {
        let mut draft = draft_with_idea("idea");
        let err = draft.begin_generate(false).unwrap_err();
        assert_eq!(err.as_validation(), Some(ValidationError::MissingCredential));
        assert!(!draft.is_generating);
        assert!(draft.error.is_some());
    }

    #[test]
    fn generate_rejects_blank_idea_without_attachments() {
        let mut draft = draft_with_idea("   \n");
        let err = draft.begin_generate(true).unwrap_err();
        assert_eq!(err.as_validation(), Some(ValidationError::EmptyInput));
        assert!(!draft.is_generating);
    }

    #[test]
    fn attachment_alone_is_enough_input() {
        let mut draft = SessionDraft::new();
        assert!(draft.push_attachment(draft.epoch(), png("a.png")));
        let (_, request) = draft.begin_generate(true).unwrap();
        assert_eq!(request.attachments.len(), 1);
        assert!(draft.is_generating);
    }

    #[test]
    fn generate_clears_previous_result_when_it_starts() {
        let mut draft = draft_with_idea("idea");
        draft.super_prompt = "old prompt".into();
        draft.final_result = "old result".into();
        draft.error = Some("boom".into());
        draft.displayed_tab = OutputTab::Result;

        draft.begin_generate(true).unwrap();

        assert_eq!(draft.phase(), SessionPhase::Generating);
        assert!(draft.final_result.is_empty());
        assert!(draft.error.is_none());
        assert_eq!(draft.displayed_tab, OutputTab::Prompt);
        assert_eq!(draft.super_prompt, "old prompt");
    }

    #[test]
    fn generate_failure_keeps_prompt_without_stale_result() {
        let mut draft = draft_with_idea("idea");
        draft.super_prompt = "old prompt".into();
        draft.final_result = "old result".into();

        let (epoch, _) = draft.begin_generate(true).unwrap();
        assert!(draft.apply_generate_failure(epoch));

        assert_eq!(draft.phase(), SessionPhase::PromptReady);
        assert_eq!(draft.super_prompt, "old prompt");
        assert!(draft.final_result.is_empty());
        assert_eq!(draft.error.as_deref(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn generate_success_binds_new_entry() {
        let mut draft = draft_with_idea("idea");
        draft.final_result = "old result".into();
        let (epoch, _) = draft.begin_generate(true).unwrap();

        assert!(draft.apply_generated(epoch, "new prompt".into(), "h1".into()));
        assert_eq!(draft.phase(), SessionPhase::PromptReady);
        assert!(draft.final_result.is_empty());
        assert_eq!(draft.current_history_id.as_deref(), Some("h1"));
    }

    #[test]
    fn stale_completion_is_ignored_after_reset() {
        let mut draft = draft_with_idea("idea");
        let (epoch, _) = draft.begin_generate(true).unwrap();
        draft.reset();

        assert!(!draft.apply_generated(epoch, "late".into(), "h1".into()));
        assert!(!draft.apply_generate_failure(epoch));
        assert_eq!(draft.phase(), SessionPhase::Idle);
        assert!(draft.super_prompt.is_empty());
        assert!(draft.error.is_none());
        assert!(draft.current_history_id.is_none());
    }

    #[test]
    fn execute_without_prompt_is_rejected() {
        let mut draft = SessionDraft::new();
        let err = draft.begin_execute(true).unwrap_err();
        assert_eq!(err.as_validation(), Some(ValidationError::MissingSuperPrompt));
        assert!(!draft.is_executing);
    }

    #[test]
    fn execute_ticket_carries_binding() {
        let mut draft = SessionDraft::new();
        draft.super_prompt = "[PERSONA]".into();
        draft.current_history_id = Some("h1".into());

        let ticket = draft.begin_execute(true).unwrap();
        assert_eq!(ticket.history_id.as_deref(), Some("h1"));
        assert_eq!(ticket.super_prompt, "[PERSONA]");

        assert!(draft.apply_executed(ticket.epoch, "answer".into()));
        assert_eq!(draft.phase(), SessionPhase::Complete);
        assert_eq!(draft.displayed_tab, OutputTab::Result);
    }

    #[test]
    fn reset_clears_everything_and_bumps_epoch() {
        let mut draft = draft_with_idea("idea");
        draft.push_attachment(0, png("a.png"));
        draft.super_prompt = "p".into();
        draft.final_result = "r".into();
        draft.error = Some("boom".into());
        draft.is_executing = true;
        draft.current_history_id = Some("h".into());
        draft.style = PromptStyle::Academic;

        draft.reset();

        assert_eq!(draft.epoch(), 1);
        assert!(draft.idea.is_empty());
        assert!(draft.attachments.is_empty());
        assert!(draft.error.is_none());
        assert!(!draft.is_executing);
        assert!(draft.current_history_id.is_none());
        assert_eq!(draft.style, PromptStyle::General);
        assert_eq!(draft.creativity, CreativityLevel::Medium);
        assert!(draft.active_notice().is_some());
    }

    #[test]
    fn attachment_read_after_reset_is_dropped() {
        let mut draft = SessionDraft::new();
        let epoch = draft.epoch();
        draft.reset();
        assert!(!draft.push_attachment(epoch, png("late.png")));
        assert!(draft.attachments.is_empty());
    }

    #[test]
    fn load_entry_strips_suffix_and_empties_attachments() {
        let mut draft = SessionDraft::new();
        draft.push_attachment(0, png("a.png"));
        let mut entry = HistoryEntry::new(
            "Analyse this",
            3,
            PromptStyle::DataAnalysis,
            CreativityLevel::High,
            "prompt",
        );
        entry.final_result = "result".into();

        draft.load_entry(&entry);

        assert_eq!(draft.idea, "Analyse this");
        assert!(draft.attachments.is_empty());
        assert_eq!(draft.style, PromptStyle::DataAnalysis);
        assert_eq!(draft.creativity, CreativityLevel::High);
        assert_eq!(draft.current_history_id.as_deref(), Some(entry.id.as_str()));
        assert_eq!(draft.displayed_tab, OutputTab::Result);
        assert_eq!(draft.displayed_text(), "result");
    }

    #[test]
    fn forget_only_clears_bound_entry() {
        let mut draft = draft_with_idea("idea");
        draft.super_prompt = "p".into();
        draft.current_history_id = Some("h1".into());

        assert!(!draft.forget_entry("other"));
        assert_eq!(draft.super_prompt, "p");

        assert!(draft.forget_entry("h1"));
        assert!(draft.current_history_id.is_none());
        assert!(draft.super_prompt.is_empty());
        assert!(draft.idea.is_empty());
    }

    #[test]
    fn remove_attachment_by_index() {
        let mut draft = SessionDraft::new();
        draft.push_attachment(0, png("a.png"));
        draft.push_attachment(0, png("b.png"));
        assert_eq!(draft.remove_attachment(0).unwrap().name, "a.png");
        assert!(draft.remove_attachment(5).is_none());
        assert_eq!(draft.attachments.len(), 1);
    }
}
