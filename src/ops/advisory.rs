//! Prompts for the model server and parsing of its replies.
//!
//! Replies are free text. Everything here assumes the model ignored the
//! requested format and salvages what it can.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::io::advisor::{Advisor, AdvisoryUnavailable};
use crate::model::record::{Record, pending_names};

/// Shown instead of asking the model when there is nothing left to do
pub const ALL_CAUGHT_UP: &str = "You have no pending projects! You're all caught up.";

const MAX_ESTIMATE_CHARS: usize = 40;

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]+|\d+[.)])\s*").unwrap());

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_-]*$").unwrap());

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

pub fn advice_prompt(pending: &[&str]) -> String {
    format!(
        "I am managing my tasks. Here are my current pending projects: {}. \
         Give me a very brief, encouraging 2-sentence tip on how to prioritize or tackle them today.",
        pending.join(", ")
    )
}

pub fn estimate_prompt(name: &str) -> String {
    format!(
        "Estimate how long this task will take: \"{}\". \
         Reply with only a short duration such as \"2 hours\" or \"3 days\", nothing else.",
        name
    )
}

pub fn breakdown_prompt(name: &str) -> String {
    format!(
        "Break the task \"{}\" into 3 to 5 smaller, concrete subtasks. \
         Reply with only the subtask names as a single comma-separated list, nothing else.",
        name
    )
}

pub fn report_prompt(records: &[Record], today: NaiveDate) -> String {
    let done: Vec<&str> = records
        .iter()
        .filter(|r| r.completed)
        .map(Record::label)
        .collect();
    let pending = pending_names(records);
    format!(
        "Today is {}. Write a short progress report (at most one paragraph and a bulleted list of next steps) \
         for these projects.\nCompleted: {}\nPending: {}",
        today.format("%Y-%m-%d"),
        list_or_none(&done),
        list_or_none(&pending),
    )
}

pub fn command_prompt(request: &str, shell: &str) -> String {
    format!(
        "Translate the following request into a single {} command. \
         Reply with only the command, no explanation and no code fences.\nRequest: {}",
        shell, request
    )
}

fn list_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

/// Reduce a duration reply to one short phrase, or `None` if nothing usable.
pub fn parse_estimate(reply: &str) -> Option<String> {
    let line = reply.lines().map(str::trim).find(|l| !l.is_empty())?;
    let cleaned = line
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*' | '.' | '!'))
        .trim();
    if cleaned.is_empty() {
        return None;
    }
    Some(cleaned.chars().take(MAX_ESTIMATE_CHARS).collect::<String>().trim_end().to_string())
}

/// `"name (est. 2 hours)"`
pub fn annotate_with_estimate(name: &str, estimate: &str) -> String {
    format!("{} (est. {})", name.trim(), estimate)
}

/// Split a breakdown reply into subtask names.
///
/// Commas and newlines both separate items; list markers and blank items
/// are dropped.
pub fn parse_breakdown(reply: &str) -> Vec<String> {
    reply
        .split([',', '\n'])
        .map(|part| {
            let part = part.trim();
            let part = LIST_MARKER_RE.replace(part, "");
            part.trim()
                .trim_matches(|c: char| c == '"' || c == '*' || c == '`')
                .trim_end_matches('.')
                .trim()
                .to_string()
        })
        .filter(|part| !part.is_empty())
        .collect()
}

/// Pull a single shell command out of a reply that may be fenced or quoted.
pub fn parse_command(reply: &str) -> Option<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !FENCE_RE.is_match(l))
        .map(|l| l.trim_matches('`').trim())
        .map(|l| l.strip_prefix("$ ").unwrap_or(l).to_string())
        .find(|l| !l.is_empty())
}

/// The shell the translated command is meant for
pub fn default_shell() -> &'static str {
    if cfg!(windows) { "Windows cmd" } else { "POSIX sh" }
}

// ---------------------------------------------------------------------------
// Advisory features
// ---------------------------------------------------------------------------

/// A brief prioritisation tip for the pending projects.
pub fn advise(advisor: &dyn Advisor, records: &[Record]) -> Result<String, AdvisoryUnavailable> {
    let pending = pending_names(records);
    if pending.is_empty() {
        return Ok(ALL_CAUGHT_UP.to_string());
    }
    advisor.complete(&advice_prompt(&pending))
}

/// The name to add for a new project, annotated with an estimate when the
/// model produced one.
pub fn estimated_name(advisor: &dyn Advisor, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }
    match advisor.complete(&estimate_prompt(name)) {
        Ok(reply) => match parse_estimate(&reply) {
            Some(estimate) => annotate_with_estimate(name, &estimate),
            None => name.to_string(),
        },
        Err(e) => {
            tracing::warn!("no estimate for {:?}: {}", name, e);
            name.to_string()
        }
    }
}

pub fn breakdown(advisor: &dyn Advisor, name: &str) -> Result<Vec<String>, AdvisoryUnavailable> {
    let reply = advisor.complete(&breakdown_prompt(name))?;
    Ok(parse_breakdown(&reply))
}

pub fn report(
    advisor: &dyn Advisor,
    records: &[Record],
    today: NaiveDate,
) -> Result<String, AdvisoryUnavailable> {
    let body = advisor.complete(&report_prompt(records, today))?;
    Ok(format!("Progress report, {}\n\n{}", today.format("%Y-%m-%d"), body))
}

pub fn translate_command(advisor: &dyn Advisor, request: &str) -> Result<String, AdvisoryUnavailable> {
    let reply = advisor.complete(&command_prompt(request, default_shell()))?;
    parse_command(&reply).ok_or(AdvisoryUnavailable::Empty)
}
