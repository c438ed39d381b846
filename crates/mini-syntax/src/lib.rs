//! # mini-syntax — filetype profiles and highlight categories
//!
//! Static, immutable data the highlighter runs against:
//!
//! ```text
//! filename
//!     │
//!     ▼
//! filetypes.rs: match against the built-in registry
//!     │
//!     ▼
//! profile.rs:   SyntaxProfile (keywords, comment markers, flags)
//!     │
//!     ▼  (the editor's per-row pass produces one category per char)
//! highlight.rs: Highlight category → terminal color
//! ```
//!
//! Nothing here holds editor state. Profiles are `'static` and shared by
//! reference; the color mapping is a pure function.

pub mod filetypes;
pub mod highlight;
pub mod profile;

pub use filetypes::detect;
pub use highlight::Highlight;
pub use profile::{ProfileFlags, SyntaxProfile};
