//! Per-filetype highlighting rules.

use std::path::Path;

use bitflags::bitflags;

bitflags! {
    /// Optional highlighting passes a profile enables.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProfileFlags: u8 {
        const NUMBERS = 0b0000_0001;
        const STRINGS = 0b0000_0010;
    }
}

/// Immutable description of how to highlight one filetype.
///
/// An empty marker string disables that kind of comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxProfile {
    /// Name shown in the status bar.
    pub name: &'static str,
    /// Filename patterns. A leading `.` means "extension equals",
    /// anything else is a substring match.
    pub filematch: &'static [&'static str],
    /// Highlighted as [`Keyword1`](crate::Highlight::Keyword1).
    pub keywords: &'static [&'static str],
    /// Highlighted as [`Keyword2`](crate::Highlight::Keyword2).
    pub keywords2: &'static [&'static str],
    pub single_line_comment: &'static str,
    pub ml_comment_start: &'static str,
    pub ml_comment_end: &'static str,
    pub flags: ProfileFlags,
}

impl SyntaxProfile {
    #[inline]
    #[must_use]
    pub const fn highlights_numbers(&self) -> bool {
        self.flags.contains(ProfileFlags::NUMBERS)
    }

    #[inline]
    #[must_use]
    pub const fn highlights_strings(&self) -> bool {
        self.flags.contains(ProfileFlags::STRINGS)
    }

    /// Multi-line comments need both markers.
    #[inline]
    #[must_use]
    pub const fn has_ml_comments(&self) -> bool {
        !self.ml_comment_start.is_empty() && !self.ml_comment_end.is_empty()
    }

    /// Does `filename` match any of this profile's patterns?
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        let ext = Path::new(filename).extension().and_then(|e| e.to_str());
        self.filematch.iter().any(|pattern| {
            if let Some(want) = pattern.strip_prefix('.') {
                ext == Some(want)
            } else {
                filename.contains(pattern)
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
