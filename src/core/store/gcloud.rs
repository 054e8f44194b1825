//! Google Cloud Secret Manager store.
//!
//! Drives Secret Manager through the gcloud CLI.
//!
//! ## Requirements
//!
//! - `gcloud` CLI must be installed and authenticated
//! - User must have the secretmanager roles needed for the commands used
//!
//! Secret values are always passed on stdin (`--data-file=-`) so they never
//! appear in the process table.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::SecretStore;
use crate::core::domain::RemoteSecret;
use crate::core::types::Labels;
use crate::error::StoreError;

/// Secret Manager access via the gcloud CLI
#[derive(Debug, Clone)]
pub struct Gcloud {
    binary: PathBuf,
    project: String,
    prefix: String,
}

/// One element of `gcloud secrets list --format=json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Listed {
    /// Full resource name: projects/*/secrets/*
    name: String,
    #[serde(default)]
    labels: BTreeMap<String, String>,
    #[serde(default)]
    create_time: Option<String>,
}

impl Gcloud {
    /// Create a store for `project`, applying `prefix` to every secret ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CliMissing` if gcloud is not on `PATH`.
    pub fn new(project: impl Into<String>, prefix: impl Into<String>) -> Result<Self, StoreError> {
        let binary = which::which("gcloud").map_err(|_| StoreError::CliMissing)?;
        Ok(Self {
            binary,
            project: project.into(),
            prefix: prefix.into(),
        })
    }

    /// Remote secret ID for a logical name.
    pub fn secret_id(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Logical name for a remote resource name, if it falls under the prefix.
    fn logical_name(&self, resource: &str) -> Option<String> {
        let id = resource.rsplit('/').next().unwrap_or(resource);
        id.strip_prefix(self.prefix.as_str()).map(str::to_string)
    }

    /// Run gcloud, returning stdout on success.
    fn run(
        &self,
        op: &'static str,
        name: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> Result<Vec<u8>, StoreError> {
        trace!(op, name, ?args, "running gcloud");

        let mut child = Command::new(&self.binary)
            .args(args)
            .args(["--project", &self.project, "--quiet"])
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StoreError::CommandFailed {
                op,
                name: name.to_string(),
                detail: format!("failed to spawn gcloud: {}", e),
            })?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes())
                .map_err(|e| StoreError::CommandFailed {
                    op,
                    name: name.to_string(),
                    detail: format!("failed to write value: {}", e),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| StoreError::CommandFailed {
                op,
                name: name.to_string(),
                detail: format!("gcloud command failed: {}", e),
            })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(op, name, stderr = %stderr, "gcloud failed");
        Err(classify(op, name, stderr))
    }
}

/// Map gcloud's stderr onto a store error.
fn classify(op: &'static str, name: &str, stderr: String) -> StoreError {
    if stderr.contains("NOT_FOUND") {
        StoreError::NotFound(name.to_string())
    } else if stderr.contains("ALREADY_EXISTS") {
        StoreError::AlreadyExists(name.to_string())
    } else if stderr.contains("PERMISSION_DENIED") {
        StoreError::PermissionDenied {
            name: name.to_string(),
            detail: stderr,
        }
    } else {
        StoreError::CommandFailed {
            op,
            name: name.to_string(),
            detail: stderr,
        }
    }
}

/// Render labels as gcloud's `k=v,k2=v2` argument.
fn labels_arg(labels: &Labels) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

impl SecretStore for Gcloud {
    fn name(&self) -> &'static str {
        "gcloud"
    }

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        let id = self.secret_id(name);
        match self.run(
            "describe",
            name,
            &["secrets", "describe", &id, "--format=value(name)"],
            None,
        ) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create(&self, name: &str, value: &str, labels: &Labels) -> Result<(), StoreError> {
        let id = self.secret_id(name);
        let mut args = vec![
            "secrets".to_string(),
            "create".to_string(),
            id,
            "--replication-policy=automatic".to_string(),
            "--data-file=-".to_string(),
        ];
        if !labels.is_empty() {
            args.push(format!("--labels={}", labels_arg(labels)));
        }
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        self.run("create", name, &args, Some(value))?;
        Ok(())
    }

    fn add_version(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let id = self.secret_id(name);
        self.run(
            "add version",
            name,
            &["secrets", "versions", "add", &id, "--data-file=-"],
            Some(value),
        )?;
        Ok(())
    }

    fn set_labels(&self, name: &str, labels: &Labels) -> Result<(), StoreError> {
        let id = self.secret_id(name);
        let arg = format!("--update-labels={}", labels_arg(labels));
        let args = ["secrets", "update", id.as_str(), arg.as_str()];
        self.run("update labels", name, &args, None)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<RemoteSecret>, StoreError> {
        let args = ["secrets", "list", "--format=json"];
        let stdout = self.run("list", &self.project, &args, None)?;
        let listed: Vec<Listed> = serde_json::from_slice(&stdout)
            .map_err(|e| StoreError::Malformed(format!("secrets list: {}", e)))?;

        let secrets = listed
            .into_iter()
            .filter_map(|item| {
                let name = self.logical_name(&item.name)?;
                let created = item
                    .create_time
                    .as_deref()
                    .and_then(|t| chrono::DateTime::parse_from_rfc3339(t).ok())
                    .map(|t| t.with_timezone(&chrono::Utc));
                Some(RemoteSecret {
                    name,
                    labels: item.labels,
                    created,
                })
            })
            .collect();

        Ok(secrets)
    }

    fn access(&self, name: &str) -> Result<Zeroizing<String>, StoreError> {
        let id = self.secret_id(name);
        let stdout = self.run(
            "access",
            name,
            &["secrets", "versions", "access", "latest", "--secret", &id],
            None,
        )?;
        let value = String::from_utf8(stdout)
            .map_err(|e| StoreError::Malformed(format!("value of {} is not UTF-8: {}", name, e)))?;
        Ok(Zeroizing::new(value))
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        let id = self.secret_id(name);
        self.run("delete", name, &["secrets", "delete", &id], None)?;
        Ok(())
    }
}
