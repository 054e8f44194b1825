//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a lockbox command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME inside the temporary home directory
    /// - Current directory set to the test project directory
    /// - The fixture store enabled, colors off
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("lockbox").expect("failed to find lockbox binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("LOCKBOX_TEST_STORE", self.store_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("LOCKBOX_PROJECT");
        cmd.env_remove("LOCKBOX_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `lockbox --project demo init`.
    pub fn init_cmd(&self) -> Output {
        self.cmd()
            .args(["--project", "demo", "init"])
            .output()
            .expect("failed to run lockbox init")
    }

    /// Write `csv` to `import.csv` and import it with extra flags.
    pub fn import(&self, csv: &str, flags: &[&str]) -> Output {
        self.write("import.csv", csv);
        self.cmd()
            .arg("import")
            .arg("import.csv")
            .args(flags)
            .output()
            .expect("failed to run lockbox import")
    }

    /// Shortcut for `lockbox export` with extra flags.
    pub fn export(&self, flags: &[&str]) -> Output {
        self.cmd()
            .arg("export")
            .args(flags)
            .output()
            .expect("failed to run lockbox export")
    }

    /// Shortcut for `lockbox get`.
    pub fn get(&self, name: &str) -> Output {
        self.cmd()
            .args(["get", name])
            .output()
            .expect("failed to run lockbox get")
    }

    /// Shortcut for `lockbox set` with extra flags.
    pub fn set(&self, name: &str, value: &str, flags: &[&str]) -> Output {
        self.cmd()
            .args(["set", name, value])
            .args(flags)
            .output()
            .expect("failed to run lockbox set")
    }

    /// Shortcut for `lockbox rm --yes`.
    pub fn rm(&self, name: &str) -> Output {
        self.cmd()
            .args(["rm", name, "--yes"])
            .output()
            .expect("failed to run lockbox rm")
    }

    /// Shortcut for `lockbox list --json`.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run lockbox list")
    }
}
