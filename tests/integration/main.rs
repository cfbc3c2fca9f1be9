//! Integration tests for bookshelf

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn bookshelf() -> Command {
        let mut cmd = cargo_bin_cmd!("bookshelf");
        cmd.env_remove("BOOKSHELF_CONFIG")
            .env_remove("BOOKSHELF_STATE_DIR")
            .env_remove("BOOKSHELF_USERNAME")
            .env_remove("BOOKSHELF_PASSWORD");
        cmd
    }

    /// A command isolated to a temp config file and state directory
    fn isolated(dir: &Path) -> Command {
        let mut cmd = bookshelf();
        cmd.arg("-c")
            .arg(dir.join("config.toml"))
            .arg("--state-dir")
            .arg(dir.join("state"));
        cmd
    }

    #[test]
    fn help_displays() {
        bookshelf()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("book library"));
    }

    #[test]
    fn version_displays() {
        bookshelf()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("bookshelf"));
    }

    #[test]
    fn whoami_ephemeral_is_signed_out() {
        let temp = TempDir::new().unwrap();
        isolated(temp.path())
            .args(["whoami", "--ephemeral", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("signed out"));
    }

    #[test]
    fn search_requires_login() {
        let temp = TempDir::new().unwrap();
        isolated(temp.path())
            .args(["search", "dune"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not signed in"))
            .stderr(predicate::str::contains("bookshelf login"));
    }

    #[test]
    fn library_requires_login() {
        let temp = TempDir::new().unwrap();
        isolated(temp.path())
            .args(["library", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not signed in"));
    }

    #[test]
    fn login_with_wrong_password_fails() {
        let temp = TempDir::new().unwrap();
        isolated(temp.path())
            .args(["login", "-u", "admin", "-p", "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid username or password"));
    }

    #[test]
    fn login_persists_until_logout() {
        let temp = TempDir::new().unwrap();

        isolated(temp.path())
            .args(["login", "-u", "admin", "-p", "1234"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Signed in successfully."));

        isolated(temp.path())
            .args(["whoami", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("signed in"));

        isolated(temp.path())
            .args(["login", "-u", "admin", "-p", "1234"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Already signed in"));

        isolated(temp.path())
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("Signed out"));

        isolated(temp.path())
            .args(["whoami", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("signed out"));
    }

    #[test]
    fn ephemeral_login_is_not_persisted() {
        let temp = TempDir::new().unwrap();

        isolated(temp.path())
            .args(["login", "--ephemeral", "-u", "admin", "-p", "1234"])
            .assert()
            .success();

        isolated(temp.path())
            .args(["whoami", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("signed out"));
    }

    #[test]
    fn search_against_unreachable_api_reports_error() {
        let temp = TempDir::new().unwrap();

        isolated(temp.path())
            .args(["config", "set", "api.base_url", "http://127.0.0.1:9/api/books"])
            .assert()
            .success();

        isolated(temp.path())
            .args(["login", "-u", "admin", "-p", "1234"])
            .assert()
            .success();

        isolated(temp.path())
            .args(["search", "dune"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error searching books"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        isolated(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        isolated(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]"))
            .stdout(predicate::str::contains("/api/books"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        isolated(temp.path())
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }
}
