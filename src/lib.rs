//! Client-side engine for a course-registration panel.
//!
//! Talks to an external REST/JSON backend through typed resource clients,
//! keeps per-panel snapshots of the remote collections, validates forms
//! locally, and reloads wholesale after every mutation so local state never
//! diverges from the backend.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod panels;
pub mod session;
pub mod state;
pub mod validate;
