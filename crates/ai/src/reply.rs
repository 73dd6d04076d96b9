//! Tolerant parsing of generated outreach text.
//!
//! Two reply shapes are understood: a JSON object with `subject`/`body`
//! (optionally wrapped in a markdown code fence) and the labelled text form
//!
//! ```text
//! SUBJECT: ...
//! BODY:
//! ...
//! ```
//!
//! Anything missing is replaced with a placeholder, never an error. A reply
//! that opens as JSON but does not decode as `{subject, body}` is treated as
//! missing both fields; its raw text is never used as the body.

use serde::Deserialize;

pub const SUBJECT_PLACEHOLDER: &str = "[Subject missing]";
pub const BODY_PLACEHOLDER: &str = "[Body missing]";

/// Subject and body as found in a reply (either may be absent).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReply {
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Final message text; `missing` names the fields that got placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText {
    pub subject: String,
    pub body: String,
    pub missing: Vec<&'static str>,
}

impl MessageText {
    /// Both fields replaced by placeholders.
    pub fn placeholder() -> Self {
        Self {
            subject: SUBJECT_PLACEHOLDER.to_string(),
            body: BODY_PLACEHOLDER.to_string(),
            missing: vec!["subject", "body"],
        }
    }
}

impl ParsedReply {
    pub fn into_message(self) -> MessageText {
        let mut missing = Vec::new();
        let subject = self.subject.unwrap_or_else(|| {
            missing.push("subject");
            SUBJECT_PLACEHOLDER.to_string()
        });
        let body = self.body.unwrap_or_else(|| {
            missing.push("body");
            BODY_PLACEHOLDER.to_string()
        });
        MessageText { subject, body, missing }
    }
}

#[derive(Deserialize)]
struct JsonReply {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a generated reply. Never fails.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let text = strip_code_fence(raw);
    if text.starts_with('{') {
        return match serde_json::from_str::<JsonReply>(text) {
            Ok(reply) => ParsedReply {
                subject: non_blank(reply.subject),
                body: non_blank(reply.body),
            },
            Err(_) => ParsedReply::default(),
        };
    }
    parse_labelled(text)
}

fn parse_labelled(text: &str) -> ParsedReply {
    let lines: Vec<&str> = text.lines().collect();

    let mut subject = None;
    let mut body_start = 0;
    for (idx, line) in lines.iter().enumerate() {
        if let Some(value) = strip_label(line, "SUBJECT:") {
            subject = Some(value.to_string());
            body_start = idx + 1;
            break;
        }
    }

    let mut body_lines = Vec::new();
    let mut started = false;
    for line in &lines[body_start..] {
        if !started {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(value) = strip_label(line, "BODY:") {
                started = true;
                if !value.is_empty() {
                    body_lines.push(value);
                }
                continue;
            }
            started = true;
        }
        body_lines.push(line.trim_end());
    }

    ParsedReply {
        subject: non_blank(subject),
        body: non_blank(Some(body_lines.join("\n"))),
    }
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let line = line.trim_start();
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label).then(|| line[label.len()..].trim())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
