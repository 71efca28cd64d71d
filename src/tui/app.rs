use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::advisor::Advisor;
use crate::io::context::Context;
use crate::io::local_store::{JsonFileStore, StoreError};
use crate::io::remote::RemoteClient;
use crate::model::record::Record;
use crate::ops::advisory;
use crate::ops::sync::{Session, StatusSink, SyncStatus};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new project name
    Input { estimate: bool },
    /// Waiting for y/n on deleting the project at `index`
    ConfirmDelete { index: usize },
}

/// A blocking action queued by a key press. The event loop redraws once
/// (so the busy message is visible) before running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Load,
    Add { name: String, estimate: bool },
    Toggle(usize),
    Delete(usize),
    BreakDown(usize),
    Advice,
    Report,
}

impl Pending {
    /// What the status row shows while the action runs
    pub fn busy_message(&self) -> &'static str {
        match self {
            Pending::Load | Pending::Toggle(_) | Pending::Delete(_) => "Syncing...",
            Pending::Add { estimate: false, .. } => "Saving...",
            Pending::Add { estimate: true, .. } => "AI is estimating the task...",
            Pending::BreakDown(_) => "AI is breaking the task down...",
            Pending::Advice => "AI is analyzing your projects. Please wait...",
            Pending::Report => "AI is writing a report...",
        }
    }
}

/// Status indicator plus the modal error for failed offline writes
#[derive(Debug)]
pub struct StatusLine {
    pub status: SyncStatus,
    pub error: Option<String>,
}

impl Default for StatusLine {
    fn default() -> Self {
        StatusLine {
            status: SyncStatus::Checking,
            error: None,
        }
    }
}

impl StatusSink for StatusLine {
    fn status_changed(&mut self, status: SyncStatus) {
        self.status = status;
    }

    fn local_write_failed(&mut self, error: &StoreError) {
        self.error = Some(error.to_string());
    }
}

pub type TuiSession = Session<Box<dyn RemoteClient>, JsonFileStore, StatusLine>;

/// Main application state
pub struct App {
    pub session: TuiSession,
    pub advisor: Box<dyn Advisor>,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the project list
    pub cursor: usize,
    /// First visible row of the project list
    pub scroll_offset: usize,
    /// Text being typed in Input mode
    pub input_buffer: String,
    /// Byte offset of the caret in `input_buffer`
    pub input_cursor: usize,
    /// Contents of the AI panel
    pub ai_output: Option<String>,
    pub pending: Option<Pending>,
    pub show_help: bool,
}

impl App {
    pub fn new(session: TuiSession, advisor: Box<dyn Advisor>, theme: Theme) -> Self {
        App {
            session,
            advisor,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            input_buffer: String::new(),
            input_cursor: 0,
            ai_output: None,
            pending: None,
            show_help: false,
        }
    }

    pub fn records(&self) -> &[Record] {
        self.session.records()
    }

    pub fn status(&self) -> SyncStatus {
        self.session.sink().status
    }

    pub fn write_error(&self) -> Option<&str> {
        self.session.sink().error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.session.sink_mut().error = None;
    }

    pub fn selected(&self) -> Option<usize> {
        (self.cursor < self.records().len()).then_some(self.cursor)
    }

    /// Keep the cursor on a real row after the list changed
    pub fn clamp_cursor(&mut self) {
        let len = self.records().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    /// Run the queued blocking action, if any.
    pub fn run_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending {
            Pending::Load => {
                self.session.load();
            }
            Pending::Add { name, estimate } => {
                let name = if estimate {
                    advisory::estimated_name(self.advisor.as_ref(), &name)
                } else {
                    name
                };
                if let Ok(idx) = self.session.add(&name) {
                    self.cursor = idx;
                }
            }
            Pending::Toggle(idx) => {
                let _ = self.session.toggle(idx);
            }
            Pending::Delete(idx) => {
                let _ = self.session.delete(idx);
            }
            Pending::BreakDown(idx) => self.break_down(idx),
            Pending::Advice => {
                self.ai_output = Some(
                    advisory::advise(self.advisor.as_ref(), self.session.records())
                        .unwrap_or_else(|e| advisor_error(&e)),
                );
            }
            Pending::Report => {
                let today = chrono::Local::now().date_naive();
                self.ai_output = Some(
                    advisory::report(self.advisor.as_ref(), self.session.records(), today)
                        .unwrap_or_else(|e| advisor_error(&e)),
                );
            }
        }
        self.clamp_cursor();
    }

    fn break_down(&mut self, idx: usize) {
        let Some(name) = self.records().get(idx).map(|r| r.label().to_string()) else {
            return;
        };
        match advisory::breakdown(self.advisor.as_ref(), &name) {
            Ok(parts) => match self.session.break_down(idx, &parts) {
                Ok(_) => {
                    self.ai_output = Some(format!(
                        "Split \"{}\" into: {}",
                        name,
                        parts.join(", ")
                    ));
                }
                Err(e) => self.ai_output = Some(format!("Could not break down \"{}\": {}", name, e)),
            },
            Err(e) => self.ai_output = Some(advisor_error(&e)),
        }
    }
}

fn advisor_error(e: &dyn std::error::Error) -> String {
    format!("Error contacting Ollama. Is it running locally?\nDetails: {}", e)
}

/// Run the TUI application
pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let remote = ctx.remote()?;
    let advisor = ctx.advisor()?;
    tracing::info!(remote = remote.url(), model = advisor.model(), "starting TUI");

    let remote: Box<dyn RemoteClient> = Box::new(remote);
    let session = Session::new(remote, ctx.store(), StatusLine::default())
        .with_policy(ctx.merge_policy());
    let advisor: Box<dyn Advisor> = Box::new(advisor);
    let theme = Theme::from_config(&ctx.config.ui);

    let mut app = App::new(session, advisor, theme);
    // Initial fetch/merge happens on the first loop iteration, after the
    // "Syncing..." frame is on screen.
    app.pending = Some(Pending::Load);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if app.pending.is_some() {
            app.run_pending();
            continue;
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
