//! Integration tests for the `deacon` CLI.
//!
//! Each test gets a temp directory holding the config and the offline cache,
//! runs `deacon` as a subprocess, and verifies stdout, stderr, and the cache.

use std::fs;
use std::io::Read;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread;

use tempfile::TempDir;
use tiny_http::{Method, Response, Server};

/// Get the path to the built `deacon` binary.
fn deacon_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("deacon");
    path
}

/// A URL nothing is listening on.
fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/data", port)
}

fn cache_path(dir: &Path) -> PathBuf {
    dir.join("projects_offline.json")
}

/// Run deacon against `remote` with config and cache inside `dir`.
fn run_with_remote(dir: &Path, remote: &str, args: &[&str]) -> Output {
    Command::new(deacon_bin())
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--cache")
        .arg(cache_path(dir))
        .arg("--remote")
        .arg(remote)
        .args(args)
        .env_remove("DEACON_LOG")
        .output()
        .expect("failed to run deacon")
}

/// Run deacon with the remote unreachable.
fn run_offline(dir: &Path, args: &[&str]) -> Output {
    run_with_remote(dir, &closed_url(), args)
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

/// Serve `requests` requests from an in-memory project list.
/// GET returns the list, POST replaces it. Returns the URL and the shared list.
fn fake_server(initial: &str, requests: usize) -> (String, Arc<Mutex<String>>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let state = Arc::new(Mutex::new(initial.to_string()));
    let shared = Arc::clone(&state);
    let handle = thread::spawn(move || {
        for _ in 0..requests {
            let mut request = server.recv().unwrap();
            if *request.method() == Method::Post {
                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).unwrap();
                *shared.lock().unwrap() = body;
                request.respond(Response::from_string("{}")).unwrap();
            } else {
                let body = shared.lock().unwrap().clone();
                request.respond(Response::from_string(body)).unwrap();
            }
        }
    });
    (format!("http://127.0.0.1:{}/api/data", port), state, handle)
}

// ---------------------------------------------------------------------------
// Offline path
// ---------------------------------------------------------------------------

#[test]
fn list_empty_offline() {
    let tmp = TempDir::new().unwrap();
    let out = run_offline(tmp.path(), &["list"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "No projects yet.\nStatus: Offline (Local Mode)\n"
    );
}

#[test]
fn add_offline_writes_cache() {
    let tmp = TempDir::new().unwrap();
    let out = run_offline(tmp.path(), &["add", "Write", "docs"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "  1. ⏳ | Write docs\nStatus: Offline (Saved Locally)\n"
    );

    let cache = fs::read_to_string(cache_path(tmp.path())).unwrap();
    assert_eq!(
        cache,
        "[\n    {\n        \"name\": \"Write docs\",\n        \"completed\": false\n    }\n]\n"
    );

    let out = run_offline(tmp.path(), &["list"]);
    assert_eq!(
        stdout(&out),
        "  1. ⏳ | Write docs\nStatus: Offline (Local Mode)\n"
    );
}

#[test]
fn toggle_and_rm_offline() {
    let tmp = TempDir::new().unwrap();
    run_offline(tmp.path(), &["add", "A"]);
    run_offline(tmp.path(), &["add", "B"]);

    let out = run_offline(tmp.path(), &["toggle", "2"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).starts_with("  2. ✅ | B\n"));

    let out = run_offline(tmp.path(), &["rm", "1"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).starts_with("Deleted: A\n"));

    let out = run_offline(tmp.path(), &["list"]);
    assert!(stdout(&out).starts_with("  1. ✅ | B\n"));
}

#[test]
fn list_json_offline() {
    let tmp = TempDir::new().unwrap();
    run_offline(tmp.path(), &["add", "A"]);
    let out = run_offline(tmp.path(), &["list", "--json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["status"], "local_mode");
    assert_eq!(json["projects"][0]["index"], 1);
    assert_eq!(json["projects"][0]["name"], "A");
    assert_eq!(json["projects"][0]["completed"], false);
}

#[test]
fn sync_json_reports_offline() {
    let tmp = TempDir::new().unwrap();
    let out = run_offline(tmp.path(), &["sync", "--json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["status"], "local_mode");
    assert_eq!(json["online"], false);
    assert_eq!(json["count"], 0);
}

#[test]
fn corrupt_cache_reads_as_empty() {
    let tmp = TempDir::new().unwrap();
    fs::write(cache_path(tmp.path()), "{ not json").unwrap();
    let out = run_offline(tmp.path(), &["list"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("No projects yet.\n"));
}

#[test]
fn position_zero_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let out = run_offline(tmp.path(), &["toggle", "0"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("error: positions start at 1"));
}

#[test]
fn out_of_range_position_is_rejected() {
    let tmp = TempDir::new().unwrap();
    run_offline(tmp.path(), &["add", "A"]);
    let out = run_offline(tmp.path(), &["rm", "4"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("error: no project at position 4"));
}

#[test]
fn blank_name_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let out = run_offline(tmp.path(), &["add", "  "]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("project name cannot be empty"));
    assert!(!cache_path(tmp.path()).exists());
}

#[test]
fn blank_name_with_estimate_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let out = run_offline(tmp.path(), &["add", "  ", "--estimate"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("project name cannot be empty"));
    assert!(!stdout(&out).contains("est."));
    assert!(!cache_path(tmp.path()).exists());
}

#[test]
fn unwritable_cache_fails_loudly() {
    let tmp = TempDir::new().unwrap();
    let out = Command::new(deacon_bin())
        .arg("--config")
        .arg(tmp.path().join("config.toml"))
        .arg("--cache")
        .arg(tmp.path().join("missing-dir").join("cache.json"))
        .arg("--remote")
        .arg(closed_url())
        .args(["add", "A"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let err = stderr(&out);
    assert!(err.contains("could not save offline data"), "stderr: {}", err);
    assert!(err.contains("error: changes were not persisted"));
}

#[test]
fn no_subcommand_args_error() {
    let out = Command::new(deacon_bin()).arg("bogus").output().unwrap();
    assert!(!out.status.success());
}

// ---------------------------------------------------------------------------
// Online path
// ---------------------------------------------------------------------------

#[test]
fn online_list_merges_cache_and_cleans_up() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        cache_path(tmp.path()),
        r#"[{"name": "Offline task", "completed": false}, {"name": "Shared", "completed": true}]"#,
    )
    .unwrap();
    // GET, then POST of the merged list
    let (url, state, handle) = fake_server(
        r#"[{"name": "Shared", "completed": false}, {"name": "Server task", "completed": true}]"#,
        2,
    );

    let out = run_with_remote(tmp.path(), &url, &["list"]);
    handle.join().unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "  1. ⏳ | Shared\n  2. ✅ | Server task\n  3. ⏳ | Offline task\nStatus: Online (Synced)\n"
    );

    assert!(!cache_path(tmp.path()).exists());
    let pushed: serde_json::Value = serde_json::from_str(&state.lock().unwrap()).unwrap();
    assert_eq!(pushed.as_array().unwrap().len(), 3);
    assert_eq!(pushed[2]["name"], "Offline task");
}

#[test]
fn online_add_pushes_full_list() {
    let tmp = TempDir::new().unwrap();
    let (url, state, handle) = fake_server(r#"[{"name": "A", "completed": false}]"#, 2);

    let out = run_with_remote(tmp.path(), &url, &["add", "B"]);
    handle.join().unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "  2. ⏳ | B\nStatus: Online (Synced)\n");

    let pushed: serde_json::Value = serde_json::from_str(&state.lock().unwrap()).unwrap();
    assert_eq!(
        pushed,
        serde_json::json!([
            {"name": "A", "completed": false},
            {"name": "B", "completed": false}
        ])
    );
    assert!(!cache_path(tmp.path()).exists());
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_path_honours_flag() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    let out = Command::new(deacon_bin())
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), path.display().to_string());
}

#[test]
fn config_init_set_show() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("config.toml");
    let run = |args: &[&str]| {
        Command::new(deacon_bin())
            .arg("--config")
            .arg(&path)
            .args(args)
            .output()
            .unwrap()
    };

    let out = run(&["config", "init"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(path.exists());

    let out = run(&["config", "init"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("already exists"));

    let out = run(&["config", "set", "advisor.model", "llama3"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "advisor.model = llama3\n");

    let out = run(&["config", "set", "remote.timeout_secs", "soon"]);
    assert!(!out.status.success());

    let out = run(&["config", "show"]);
    assert!(out.status.success());
    let shown: toml::Value = toml::from_str(&stdout(&out)).unwrap();
    assert_eq!(shown["advisor"]["model"].as_str(), Some("llama3"));
    assert_eq!(shown["remote"]["timeout_secs"].as_integer(), Some(3));
}

#[test]
fn broken_config_still_allows_config_commands() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "[remote\nurl = ").unwrap();

    let out = Command::new(deacon_bin())
        .arg("--config")
        .arg(&path)
        .args(["list"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(stderr(&out).contains("could not parse"));

    let out = Command::new(deacon_bin())
        .arg("--config")
        .arg(&path)
        .args(["config", "init", "--force"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr(&out));
}
