use serde::Serialize;

use crate::io::local_store::StoreError;
use crate::model::record::Record;
use crate::ops::sync::{StatusSink, SyncStatus};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectJson<'a> {
    /// 1-based, as accepted by toggle/rm/breakdown
    pub index: usize,
    pub name: &'a str,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub status: &'static str,
    pub projects: Vec<ProjectJson<'a>>,
}

#[derive(Serialize)]
pub struct SyncJson {
    pub status: &'static str,
    pub online: bool,
    pub count: usize,
}

#[derive(Serialize)]
pub struct AdviceJson<'a> {
    pub kind: &'static str,
    pub text: &'a str,
}

pub fn list_to_json(records: &[Record], status: SyncStatus) -> ListJson<'_> {
    ListJson {
        status: status.key(),
        projects: records
            .iter()
            .enumerate()
            .map(|(i, r)| ProjectJson {
                index: i + 1,
                name: r.label(),
                completed: r.completed,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `  1. ⏳ | Write docs`
pub fn format_project_line(index: usize, record: &Record) -> String {
    format!("{:>3}. {} | {}", index + 1, record.marker(), record.label())
}

pub fn format_list(records: &[Record]) -> String {
    if records.is_empty() {
        return "No projects yet.\n".to_string();
    }
    let mut out = String::new();
    for (i, r) in records.iter().enumerate() {
        out.push_str(&format_project_line(i, r));
        out.push('\n');
    }
    out
}

pub fn format_status(status: SyncStatus) -> String {
    format!("Status: {}", status)
}

// ---------------------------------------------------------------------------
// Status sink
// ---------------------------------------------------------------------------

/// Writes local-write failures to stderr as they happen.
#[derive(Debug, Default)]
pub struct StderrSink {
    pub write_failed: bool,
}

impl StatusSink for StderrSink {
    fn status_changed(&mut self, _status: SyncStatus) {}

    fn local_write_failed(&mut self, error: &StoreError) {
        self.write_failed = true;
        eprintln!("error: {}", error);
    }
}
