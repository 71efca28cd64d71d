use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::advisor::Advisor;
use crate::io::local_store::JsonFileStore;
use crate::io::remote::RemoteClient;
use crate::model::record::Record;
use crate::ops::advisory::tests::CannedAdvisor;
use crate::ops::sync::Session;
use crate::ops::sync::tests::FakeRemote;
use crate::tui::app::{App, StatusLine};
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer, keeping styles.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

fn build_app(remote: FakeRemote, advisor: CannedAdvisor) -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("projects_offline.json"));
    let remote: Box<dyn RemoteClient> = Box::new(remote);
    let session = Session::new(remote, store, StatusLine::default());
    let advisor: Box<dyn Advisor> = Box::new(advisor);
    (App::new(session, advisor, Theme::default()), dir)
}

fn records(names: &[&str]) -> Vec<Record> {
    names.iter().map(|n| Record::new(*n)).collect()
}

/// An App backed by a reachable remote holding `names`, not yet loaded.
pub fn app_with_remote(names: &[&str]) -> (App, TempDir) {
    build_app(
        FakeRemote::online(records(names)),
        CannedAdvisor::replying("Start with the smallest one."),
    )
}

/// An App whose remote is unreachable and whose cache file is absent.
pub fn app_offline(names: &[&str]) -> (App, TempDir) {
    let (mut app, dir) = build_app(FakeRemote::offline(), CannedAdvisor::offline());
    for name in names {
        app.session.add(name).unwrap();
    }
    (app, dir)
}

/// An App after its initial load from a remote holding `names`.
pub fn loaded_app(names: &[&str]) -> (App, TempDir) {
    let (mut app, dir) = app_with_remote(names);
    app.session.load();
    (app, dir)
}

/// Like `loaded_app`, with an advisor that replies `reply` (or fails on None).
pub fn loaded_app_with_advisor(names: &[&str], reply: Option<&str>) -> (App, TempDir) {
    let advisor = match reply {
        Some(text) => CannedAdvisor::replying(text),
        None => CannedAdvisor::offline(),
    };
    let (mut app, dir) = build_app(FakeRemote::online(records(names)), advisor);
    app.session.load();
    (app, dir)
}
