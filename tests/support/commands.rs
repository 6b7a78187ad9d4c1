//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a sapper command isolated from the caller's environment.
    ///
    /// Returns a Command configured with:
    /// - Current directory set to the test directory
    /// - Key and config overrides removed
    /// - Colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sapper").expect("failed to find sapper binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("SAPPER_TOKEN_KEY");
        cmd.env_remove("SAPPER_SERVICE_KEY");
        cmd.env_remove("SAPPER_CONFIG");
        cmd.env_remove("SAPPER_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Shortcut for `sapper init`.
    pub fn init_cmd(&self) -> Output {
        self.cmd()
            .arg("init")
            .output()
            .expect("failed to run sapper init")
    }

    /// Shortcut for `sapper token issue`.
    pub fn issue(&self, identity: i64) -> Output {
        self.cmd()
            .args(["token", "issue", &identity.to_string()])
            .output()
            .expect("failed to run sapper token issue")
    }

    /// Shortcut for `sapper token verify`.
    pub fn verify(&self, token: &str) -> Output {
        self.cmd()
            .args(["token", "verify", token])
            .output()
            .expect("failed to run sapper token verify")
    }

    /// Shortcut for `sapper service-key encode`.
    pub fn encode(&self, identity: i64) -> Output {
        self.cmd()
            .args(["service-key", "encode", &identity.to_string()])
            .output()
            .expect("failed to run sapper service-key encode")
    }

    /// Shortcut for `sapper service-key decode`.
    pub fn decode(&self, key: &str) -> Output {
        self.cmd()
            .args(["service-key", "decode", key])
            .output()
            .expect("failed to run sapper service-key decode")
    }

    /// Shortcut for `sapper --decode-service-key --service-key <KEY>`.
    pub fn decode_flag(&self, key: &str) -> Output {
        self.cmd()
            .args(["--decode-service-key", "--service-key", key])
            .output()
            .expect("failed to run sapper --decode-service-key")
    }
}
