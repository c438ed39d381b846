//! # mini-editor — editing core for the mini editor
//!
//! - **[`row`]** / **[`document`]** — the Row Store: raw content, render
//!   form, per-character highlights, file load and save
//! - **[`highlight`]** — the per-row highlighting pass
//! - **[`cursor`]** / **[`viewport`]** — cursor bounds and scrolling
//! - **[`mode`]** / **[`keymap`]** — modes and the key-map dispatcher
//! - **[`prompt`]** / **[`search`]** — message-bar prompts and search
//! - **[`render`]** — frame assembly
//! - **[`host`]** — the key-source and frame-sink boundary
//! - **[`editor`]** — the `Editor` aggregate and main loop
//!
//! The core reads keys and writes frames only through [`host`]; everything
//! else is plain data manipulated on a single thread.

pub mod config;
pub mod cursor;
pub mod document;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod host;
pub mod keymap;
pub mod mode;
pub mod prompt;
pub mod render;
pub mod row;
pub mod search;
pub mod viewport;

pub use config::Config;
pub use editor::Editor;
pub use error::{EditorError, Result};
