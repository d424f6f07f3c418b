//! A small desktop todo list: plain-text persistence, per-project checklists
//! with color themes and background images, a fireworks celebration when a
//! task gets done, and a procedurally drawn application icon.

pub mod app;
pub mod fireworks;
pub mod icon;
pub mod models;
pub mod store;
pub mod utils;
