//! Per-row syntax highlighting.
//!
//! [`highlight_line`] is a pure function: a row's render form, the active
//! profile and the comment state inherited from the previous row go in; a
//! highlight array and the row's own trailing comment state come out. The
//! [`Document`](crate::document::Document) decides which rows to re-run and
//! carries the comment state from one row to the next.
//!
//! Per character, first match wins:
//!
//! 1. single-line comment marker (outside strings and block comments)
//!    colors the rest of the row;
//! 2. block comment start/end markers, consumed whole;
//! 3. quoted strings, with `\` escaping the next character;
//! 4. numbers: a digit after a separator or another number, or `.` right
//!    after a number;
//! 5. keywords, only at a word boundary and only as a whole token.

use mini_syntax::{Highlight, SyntaxProfile};

/// Output of one highlighting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    pub highlights: Vec<Highlight>,
    /// A block comment is still open at the end of the row.
    pub open_comment: bool,
}

/// Characters that end a token.
#[must_use]
pub fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ",.()+-/*=~%<>[]{}:;".contains(ch)
}

/// Highlight one row.
///
/// With no profile every character is [`Highlight::Normal`] and no comment
/// state is carried.
#[must_use]
pub fn highlight_line(
    text: &[char],
    profile: Option<&SyntaxProfile>,
    starts_in_comment: bool,
) -> LineHighlight {
    let mut hl = vec![Highlight::Normal; text.len()];
    let Some(p) = profile else {
        return LineHighlight {
            highlights: hl,
            open_comment: false,
        };
    };

    let scs: Vec<char> = p.single_line_comment.chars().collect();
    let mcs: Vec<char> = p.ml_comment_start.chars().collect();
    let mce: Vec<char> = p.ml_comment_end.chars().collect();
    let ml = p.has_ml_comments();

    let mut prev_sep = true;
    let mut quote: Option<char> = None;
    let mut in_comment = ml && starts_in_comment;

    let mut i = 0;
    while i < text.len() {
        let ch = text[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };
        let rest = &text[i..];

        if !scs.is_empty() && quote.is_none() && !in_comment && rest.starts_with(&scs) {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if ml && quote.is_none() {
            if in_comment {
                if rest.starts_with(&mce) {
                    hl[i..i + mce.len()].fill(Highlight::MlComment);
                    i += mce.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    hl[i] = Highlight::MlComment;
                    i += 1;
                }
                continue;
            }
            if rest.starts_with(&mcs) {
                hl[i..i + mcs.len()].fill(Highlight::MlComment);
                i += mcs.len();
                in_comment = true;
                continue;
            }
        }

        if p.highlights_strings() {
            if let Some(q) = quote {
                hl[i] = Highlight::String;
                if ch == '\\' && i + 1 < text.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if ch == q {
                    quote = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            }
            if ch == '"' || ch == '\'' {
                quote = Some(ch);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if p.highlights_numbers()
            && ((ch.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (ch == '.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some((len, kind)) = match_keyword(rest, p) {
                hl[i..i + len].fill(kind);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(ch);
        i += 1;
    }

    LineHighlight {
        highlights: hl,
        open_comment: in_comment,
    }
}

/// Length and category of the keyword `text` starts with, if it is a whole
/// token. The first keyword group wins over the second.
fn match_keyword(text: &[char], p: &SyntaxProfile) -> Option<(usize, Highlight)> {
    whole_token(text, p.keywords)
        .map(|len| (len, Highlight::Keyword1))
        .or_else(|| whole_token(text, p.keywords2).map(|len| (len, Highlight::Keyword2)))
}

fn whole_token(text: &[char], keywords: &[&str]) -> Option<usize> {
    keywords.iter().find_map(|kw| {
        let mut len = 0;
        let mut chars = kw.chars();
        for &t in text {
            match chars.next() {
                Some(k) if k == t => len += 1,
                Some(_) => return None,
                None => break,
            }
        }
        if chars.next().is_some() {
            return None; // text ran out first
        }
        let bounded = text.get(len).is_none_or(|&next| is_separator(next));
        (len > 0 && bounded).then_some(len)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
