mod config;
pub use config::cmd_config;

use std::process::Command;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::context::{Context, HttpSession, Overrides};
use crate::ops::advisory;
use crate::ops::project_ops::ActionError;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let overrides = overrides_from(&cli);

    let Some(cmd) = cli.command else {
        return Err("no subcommand given (try `deacon --help`)".into());
    };

    // Config commands must work even when the config file is broken,
    // so the context is only loaded by the commands that need it.
    let ctx = || Context::load(&overrides);
    match cmd {
        Commands::Config(args) => cmd_config(args, &overrides),
        Commands::List => cmd_list(&ctx()?, json),
        Commands::Sync => cmd_sync(&ctx()?, json),
        Commands::Add(args) => cmd_add(&ctx()?, args),
        Commands::Toggle(args) => cmd_toggle(&ctx()?, args),
        Commands::Rm(args) => cmd_rm(&ctx()?, args),
        Commands::Breakdown(args) => cmd_breakdown(&ctx()?, args),
        Commands::Advise => cmd_advise(&ctx()?, json),
        Commands::Report => cmd_report(&ctx()?, json),
        Commands::Cmd(args) => cmd_cmd(&ctx()?, args, json),
    }
}

pub fn overrides_from(cli: &Cli) -> Overrides {
    Overrides {
        config: cli.config.clone(),
        remote: cli.remote.clone(),
        cache: cli.cache.clone(),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open a session and run the startup load (remote, else offline cache).
fn open_loaded(ctx: &Context) -> Result<HttpSession<StderrSink>, Box<dyn std::error::Error>> {
    let mut session = ctx.session(StderrSink::default())?;
    session.load();
    Ok(session)
}

/// Convert a displayed 1-based position into an index.
fn to_index(position: usize) -> Result<usize, Box<dyn std::error::Error>> {
    position
        .checked_sub(1)
        .ok_or_else(|| "positions start at 1".into())
}

/// Report how the last save went; a failed offline write is an error.
fn finish(session: &HttpSession<StderrSink>) -> CmdResult {
    println!("{}", format_status(session.status()));
    if session.sink().write_failed {
        return Err("changes were not persisted".into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, json: bool) -> CmdResult {
    let session = open_loaded(ctx)?;
    if json {
        let out = list_to_json(session.records(), session.status());
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    print!("{}", format_list(session.records()));
    println!("{}", format_status(session.status()));
    Ok(())
}

fn cmd_sync(ctx: &Context, json: bool) -> CmdResult {
    let session = open_loaded(ctx)?;
    if json {
        let out = SyncJson {
            status: session.status().key(),
            online: session.status().is_online(),
            count: session.records().len(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    println!(
        "{} ({} project{})",
        format_status(session.status()),
        session.records().len(),
        if session.records().len() == 1 { "" } else { "s" }
    );
    if session.sink().write_failed {
        return Err("changes were not persisted".into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs) -> CmdResult {
    let name = args.name.join(" ").trim().to_string();
    if name.is_empty() {
        return Err(ActionError::EmptyName.into());
    }
    let name = if args.estimate {
        match ctx.advisor() {
            Ok(advisor) => advisory::estimated_name(&advisor, &name),
            Err(e) => {
                tracing::warn!("no estimate: {}", e);
                name
            }
        }
    } else {
        name
    };
    let mut session = open_loaded(ctx)?;
    let idx = session.add(&name)?;
    println!("{}", format_project_line(idx, &session.records()[idx]));
    finish(&session)
}

fn cmd_toggle(ctx: &Context, args: IndexArgs) -> CmdResult {
    let idx = to_index(args.index)?;
    let mut session = open_loaded(ctx)?;
    session.toggle(idx)?;
    println!("{}", format_project_line(idx, &session.records()[idx]));
    finish(&session)
}

fn cmd_rm(ctx: &Context, args: IndexArgs) -> CmdResult {
    let idx = to_index(args.index)?;
    let mut session = open_loaded(ctx)?;
    let removed = session.delete(idx)?;
    println!("Deleted: {}", removed.label());
    finish(&session)
}

fn cmd_breakdown(ctx: &Context, args: IndexArgs) -> CmdResult {
    let idx = to_index(args.index)?;
    let mut session = open_loaded(ctx)?;
    let name = session
        .records()
        .get(idx)
        .map(|r| r.label().to_string())
        .ok_or_else(|| format!("no project at position {}", args.index))?;

    let advisor = ctx.advisor()?;
    let parts = advisory::breakdown(&advisor, &name)?;
    let count = parts.iter().filter(|p| !p.trim().is_empty()).count();
    session.break_down(idx, &parts)?;

    println!("Split \"{}\" into {} project{}:", name, count, if count == 1 { "" } else { "s" });
    for i in idx..idx + count {
        println!("{}", format_project_line(i, &session.records()[i]));
    }
    finish(&session)
}

// ---------------------------------------------------------------------------
// Advisory handlers
// ---------------------------------------------------------------------------

fn print_advice(kind: &'static str, text: &str, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&AdviceJson { kind, text })?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_advise(ctx: &Context, json: bool) -> CmdResult {
    let session = open_loaded(ctx)?;
    let advisor = ctx.advisor()?;
    let text = advisory::advise(&advisor, session.records())?;
    print_advice("advice", &text, json)
}

fn cmd_report(ctx: &Context, json: bool) -> CmdResult {
    let session = open_loaded(ctx)?;
    let advisor = ctx.advisor()?;
    let today = chrono::Local::now().date_naive();
    let text = advisory::report(&advisor, session.records(), today)?;
    print_advice("report", &text, json)
}

fn cmd_cmd(ctx: &Context, args: CmdArgs, json: bool) -> CmdResult {
    let request = args.request.join(" ");
    let advisor = ctx.advisor()?;
    let command = advisory::translate_command(&advisor, &request)?;
    if !args.run {
        return print_advice("command", &command, json);
    }

    eprintln!("$ {}", command);
    let status = shell(&command).status()?;
    if !status.success() {
        return Err(format!("command exited with {}", status).into());
    }
    Ok(())
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}
