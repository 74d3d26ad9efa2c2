//! Session domain module.
//!
//! # Module Structure
//!
//! - `phase`: workflow phase and displayed output tab
//! - `draft`: the active editing context and its transitions (`SessionDraft`)
//! - `notice`: transient toast notifications

mod draft;
mod notice;
mod phase;

pub use draft::{
    EXECUTION_FAILED_MESSAGE, Epoch, ExecutionTicket, GENERATION_FAILED_MESSAGE, SessionDraft,
};
pub use notice::{NOTICE_TTL, Notice, NoticeLevel};
pub use phase::{OutputTab, SessionPhase};
