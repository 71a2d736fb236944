#![allow(deprecated)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("home/.local/share/applications")).unwrap();
        fs::create_dir_all(root.path().join("data/applications")).unwrap();
        let config_dir = root.path().join("config/desktopmenuitem");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), "[general]\nrefresh_database = false\n").unwrap();
        Self { root }
    }

    fn primary(&self) -> PathBuf {
        self.root.path().join("home/.local/share/applications")
    }

    fn system(&self) -> PathBuf {
        self.root.path().join("data/applications")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("desktopmenuitem"));
        cmd.env("HOME", self.root.path().join("home"))
            .env("XDG_DATA_DIRS", self.root.path().join("data"))
            .env("XDG_CONFIG_HOME", self.root.path().join("config"))
            .env("NO_COLOR", "1")
            .env_remove("XDG_DATA_HOME")
            .env_remove("VISUAL")
            .env_remove("EDITOR")
            .current_dir(self.root.path());
        cmd
    }

    fn executable(&self, name: &str) -> PathBuf {
        let dir = self.root.path().join("opt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        path
    }
}

#[test]
fn no_arguments_prints_help() {
    let sandbox = Sandbox::new();
    sandbox.cmd().assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn creates_entry_from_executable() {
    let sandbox = Sandbox::new();
    let exe = sandbox.executable("myapp-v2.1");

    sandbox
        .cmd()
        .arg(&exe)
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating:"))
        .stdout(predicate::str::contains("Saved:"));

    let written = fs::read_to_string(sandbox.primary().join("myapp.desktop")).unwrap();
    assert!(written.contains("Name=Myapp\n"));
    assert!(written.contains(&format!("Exec={}\n", exe.display())));
    assert!(written.contains("Type=Application\n"));
    assert!(written.contains("Terminal=false\n"));
}

#[test]
fn relative_executable_is_made_absolute() {
    let sandbox = Sandbox::new();
    let exe = sandbox.executable("tool_3");

    sandbox.cmd().args(["./opt/../opt/tool_3", "-t"]).assert().success();

    let written = fs::read_to_string(sandbox.primary().join("tool.desktop")).unwrap();
    assert!(written.contains(&format!("Exec={}\n", exe.display())));
    assert!(written.contains("Terminal=true\n"));
}

#[test]
fn json_override_updates_existing_entry_once() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.primary().join("dmi-json.desktop"),
        "[Desktop Entry]\nType=Application\nName=Json\nExec=/bin/sh\nTerminal=false\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["-d", "dmi-json", "--json", r#"{"Categories":"Utility;"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loading:"));
    let written = fs::read_to_string(sandbox.primary().join("dmi-json.desktop")).unwrap();
    assert!(written.contains("Categories=Utility;\n"));
    assert!(written.contains("Name=Json\n"));

    sandbox
        .cmd()
        .args(["-d", "dmi-json", "--json", r#"{"Categories":"Utility;"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("No Changes"));
}

#[test]
fn invalid_json_fails_without_writing() {
    let sandbox = Sandbox::new();
    let exe = sandbox.executable("broken");

    sandbox
        .cmd()
        .arg(&exe)
        .args(["--json", "{nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("JSON is invalid"));
    assert!(!sandbox.primary().join("broken.desktop").exists());
}

#[test]
fn missing_exec_fails_without_writing() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["-d", "dmi-missing", "--exec", "/nonexistent/path"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
    assert!(!sandbox.primary().join("dmi-missing.desktop").exists());
}

#[test]
fn entry_outside_primary_directory_is_copied() {
    let sandbox = Sandbox::new();
    let original = "[Desktop Entry]\nType=Application\nName=Cow\nExec=/bin/sh\nTerminal=false\n";
    fs::write(sandbox.system().join("dmi-cow.desktop"), original).unwrap();

    sandbox
        .cmd()
        .args(["dmi-cow.desktop", "--icon", "cow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loading:"))
        .stdout(predicate::str::contains(format!("Saved as copy: {}", sandbox.primary().display())));

    assert_eq!(fs::read_to_string(sandbox.system().join("dmi-cow.desktop")).unwrap(), original);
    let copy = fs::read_to_string(sandbox.primary().join("dmi-cow.desktop")).unwrap();
    assert!(copy.contains("Name=Cow\n"));
    assert!(copy.contains("Icon=cow\n"));
}

#[test]
fn desktop_option_with_a_path_still_copies() {
    let sandbox = Sandbox::new();
    let original = "[Desktop Entry]\nType=Application\nName=Abs\nExec=/bin/sh\nTerminal=false\n";
    let system_file = sandbox.system().join("dmi-abs.desktop");
    fs::write(&system_file, original).unwrap();

    sandbox.cmd().arg("-d").arg(&system_file).args(["--icon", "cow"]).assert().success();
    sandbox
        .cmd()
        .args(["-d", "../../data/applications/dmi-abs", "--name", "Dotted"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&system_file).unwrap(), original);
    let copy = fs::read_to_string(sandbox.primary().join("dmi-abs.desktop")).unwrap();
    assert!(copy.contains("Icon=cow\n"));
    assert!(copy.contains("Name=Dotted\n"));
}

#[test]
fn refresh_runs_on_the_written_directory_and_failures_are_ignored() {
    let sandbox = Sandbox::new();
    let record = sandbox.root.path().join("refreshed");
    let script = sandbox.root.path().join("refresh.sh");
    fs::write(&script, format!("#!/bin/sh\necho \"$1\" > {}\nexit 1\n", record.display())).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(
        sandbox.root.path().join("config/desktopmenuitem/config.toml"),
        format!("[general]\nrefresh_command = \"{}\"\n", script.display()),
    )
    .unwrap();
    let exe = sandbox.executable("refreshme");

    sandbox.cmd().arg(&exe).assert().success().stdout(predicate::str::contains("Saved:"));

    let recorded = fs::read_to_string(&record).unwrap();
    assert_eq!(recorded.trim_end().trim_end_matches('/'), sandbox.primary().display().to_string());
}

#[test]
fn overwrite_without_root_warns_and_copies() {
    if nix::unistd::geteuid().is_root() {
        return;
    }
    let sandbox = Sandbox::new();
    let original = "[Desktop Entry]\nType=Application\nName=Over\nExec=/bin/sh\nTerminal=false\n";
    fs::write(sandbox.system().join("dmi-over.desktop"), original).unwrap();

    sandbox
        .cmd()
        .args(["-d", "dmi-over", "--overwrite", "--icon", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved as a copy"))
        .stdout(predicate::str::contains("Saved as copy:"));

    assert_eq!(fs::read_to_string(sandbox.system().join("dmi-over.desktop")).unwrap(), original);
    assert!(sandbox.primary().join("dmi-over.desktop").exists());
}

#[test]
fn view_prints_entry_without_writing() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.system().join("dmi-view.desktop"),
        "[Desktop Entry]\nName=Viewed\nExec=/bin/sh\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["-d", "dmi-view", "--view", "--icon", "ignored"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name=Viewed"))
        .stdout(predicate::str::contains("copy").not());
    assert!(!sandbox.primary().join("dmi-view.desktop").exists());
}

#[test]
fn edit_without_editor_fails() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.root.path().join("config/desktopmenuitem/config.toml"), "[general]\neditor = \"/nonexistent/editor\"\nrefresh_database = false\n").unwrap();
    fs::write(sandbox.primary().join("dmi-edit.desktop"), "[Desktop Entry]\nName=Edit\n").unwrap();

    sandbox
        .cmd()
        .args(["-d", "dmi-edit", "--edit"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid editor"));
}

#[test]
fn edit_runs_editor_on_existing_file() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.primary().join("dmi-edit.desktop"), "[Desktop Entry]\nName=Edit\n").unwrap();

    // `true` stands in for an interactive editor.
    sandbox
        .cmd()
        .env("VISUAL", "true")
        .args(["-d", "dmi-edit", "--edit"])
        .assert()
        .success();
}

#[test]
fn list_shows_entries_under_their_directory() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.system().join("dmi-listed.desktop"), "").unwrap();

    sandbox
        .cmd()
        .args(["--list", "dmi-listed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(sandbox.system().display().to_string()))
        .stdout(predicate::str::contains("dmi-listed"));
}

#[test]
fn list_with_no_matches_prints_nothing() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["--list", "zzqqxxdmiunmatchable"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
