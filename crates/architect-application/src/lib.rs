//! Application layer for Vertex Architect.
//!
//! Coordinates the session draft, the history store and the external ports
//! (generation client, credential storage, attachment loading).

pub mod studio;

pub use studio::{AttachReport, Studio, StudioSnapshot};
