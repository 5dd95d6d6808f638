// src/models/mod.rs

//! Data model for events, projects and team members.

mod event;
mod project;

pub use event::Event;
pub use project::{Person, Project};
