use mindbloom_core::{Database, UserId};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const USER: &str = "cli-user";

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    /// Isolated XDG dirs with no config file, so no user is signed in.
    fn signed_out() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_data).expect("failed to create XDG_DATA_HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
        }
    }

    fn signed_in() -> Self {
        let env = Self::signed_out();
        let config_dir = env.xdg_config.join("mindbloom");
        fs::create_dir_all(&config_dir).expect("failed to create config dir");
        fs::write(
            config_dir.join("config.toml"),
            format!("[user]\nid = \"{USER}\"\nname = \"Robin\"\n"),
        )
        .expect("failed to write config");
        env
    }

    fn db_path(&self) -> PathBuf {
        self.xdg_data.join("mindbloom/entries.db")
    }

    fn open_db(&self) -> Database {
        let db = Database::open(&self.db_path()).expect("failed to open db");
        db.migrate().expect("failed to migrate db");
        db
    }
}

fn run_bin(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("mindbloom"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute mindbloom: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "mindbloom {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn run_ok(env: &CliTestEnv, args: &[&str]) -> String {
    let output = run_bin(env, args);
    assert_success(args, &output);
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn mood_check_in_is_stored_and_shows_in_insights() {
    let env = CliTestEnv::signed_in();

    let stdout = run_ok(&env, &["mood", "happy", "--note", "sunny walk"]);
    assert!(stdout.contains("Mood saved: Happy"), "got:\n{stdout}");

    let moods = env
        .open_db()
        .list_mood_entries(&UserId::from(USER))
        .expect("failed to list moods");
    assert_eq!(moods.len(), 1);
    assert_eq!(moods[0].note.as_deref(), Some("sunny walk"));

    let json = run_ok(&env, &["insights", "--export", "json"]);
    let value: serde_json::Value = serde_json::from_str(&json).expect("insights json");
    assert_eq!(value["totals"]["mood_entries"], 1);
    assert_eq!(value["streaks"]["current"], 1);
    assert_eq!(value["most_common_mood"], "happy");
    assert_eq!(value["weekly"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["weekly"][6]["mood"], "happy");
}

#[test]
fn writes_without_configured_user_are_rejected() {
    let env = CliTestEnv::signed_out();

    let output = run_bin(&env, &["mood", "sad"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("User not authenticated"),
        "expected auth error, got:\n{stderr}"
    );

    // Reads still work and show the empty state
    let stdout = run_ok(&env, &["insights"]);
    assert!(stdout.contains("emotional patterns bloom"), "got:\n{stdout}");
}

#[test]
fn deleted_mood_disappears_from_list() {
    let env = CliTestEnv::signed_in();
    run_ok(&env, &["mood", "anxious"]);
    run_ok(&env, &["mood", "good"]);

    let user = UserId::from(USER);
    let moods = env.open_db().list_mood_entries(&user).expect("list moods");
    let anxious = moods
        .iter()
        .find(|m| m.mood.as_str() == "anxious")
        .expect("anxious entry")
        .id
        .to_string();

    run_ok(&env, &["delete", "mood", &anxious]);

    let list = run_ok(&env, &["list"]);
    assert!(list.contains("Good"), "got:\n{list}");
    assert!(!list.contains(&anxious), "deleted id still listed:\n{list}");
    assert!(list.contains("Today"));

    let missing = run_bin(&env, &["delete", "mood", &anxious]);
    assert!(!missing.status.success());
}

#[test]
fn journal_entry_defaults_title_and_rejects_empty_content() {
    let env = CliTestEnv::signed_in();

    let stdout = run_ok(
        &env,
        &["journal", "--content", "Slept well.", "--tag", "peaceful"],
    );
    assert!(stdout.contains("Untitled Entry"), "got:\n{stdout}");

    let list = run_ok(&env, &["list", "--journal"]);
    assert!(list.contains("Untitled Entry"));
    assert!(list.contains("Peaceful"));

    let empty = run_bin(&env, &["journal", "--content", "   "]);
    assert!(!empty.status.success());

    let journals = env
        .open_db()
        .list_journal_entries(&UserId::from(USER))
        .expect("list journals");
    assert_eq!(journals.len(), 1);
}

#[test]
fn markdown_export_and_unknown_format() {
    let env = CliTestEnv::signed_in();
    run_ok(&env, &["mood", "blooming"]);

    let markdown = run_ok(&env, &["insights", "--export", "md"]);
    assert!(markdown.starts_with("# MindBloom Insights"));
    assert!(markdown.contains("| Mood check-ins | 1 |"));
    assert!(markdown.contains("*Generated by mindbloom*"));

    let output = run_bin(&env, &["insights", "--export", "csv"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown export format"));
}
