//! Test helpers: a context pointed at a mock backend and a temp data dir.

use oshikatsu::cli::Command;
use oshikatsu::{AppContext, Outcome, execute};

use client_core::config::ClientConfig;
use client_core::token_store::CredentialProvider;

use serde_json::{Value, json};
use tempfile::TempDir;

pub const TEST_TOKEN: &str = "cli-test-token";

pub struct Harness {
    pub data_dir: TempDir,
    base_url: String,
}

impl Harness {
    pub fn new(base_url: &str) -> Self {
        Self {
            data_dir: TempDir::new().expect("Failed to create temp dir"),
            base_url: base_url.to_string(),
        }
    }

    /// A fresh context per command, as with separate process invocations.
    pub fn context(&self) -> AppContext {
        let mut config = ClientConfig::default();
        config.api.base_url = self.base_url.clone();
        config.api.timeout_secs = 5;
        config.storage.data_dir = Some(self.data_dir.path().to_path_buf());
        AppContext::from_config(config).expect("Failed to build context")
    }

    pub fn signed_in(self) -> Self {
        self.context().store().set(TEST_TOKEN);
        self
    }

    pub async fn run(&self, command: &Command) -> (Outcome, String) {
        self.run_with(command, false).await
    }

    pub async fn run_with(&self, command: &Command, json: bool) -> (Outcome, String) {
        let ctx = self.context();
        let mut out = Vec::new();
        let outcome = execute(&ctx, command, json, &mut out)
            .await
            .expect("command should not fail outright");
        (outcome, String::from_utf8(out).expect("output is UTF-8"))
    }
}

pub fn group_json(id: i64, name: &str, company: Option<&str>) -> Value {
    json!({
        "id": id,
        "userId": 7,
        "groupName": name,
        "company": company,
        "description": null,
        "createdAt": "2024-01-15T10:30:00",
        "updatedAt": "2024-02-01T09:05:00"
    })
}
