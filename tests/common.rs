#![allow(dead_code)]
use codebuild_pr_notifier::client::{AwsCredentials, CodeBuildClient};
use serde_json::{Value, json};
use std::{
    sync::Mutex,
    thread::{self, ThreadId},
};

/// Every logged message, tagged with the thread that logged it.
///
/// Each test runs on its own thread (with a current-thread tokio runtime),
/// so filtering by thread keeps concurrent tests' logs apart.
static RECORDS: Mutex<Vec<(ThreadId, String)>> = Mutex::new(Vec::new());

struct Logger;
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        log::max_level() > metadata.level()
    }

    fn log(&self, record: &log::Record) {
        if let Ok(mut records) = RECORDS.lock() {
            records.push((thread::current().id(), record.args().to_string()));
        }
        println!(
            "[{:>5}]{}: {}",
            record.level().as_str(),
            record.module_path().unwrap_or_default(),
            record.args()
        );
    }

    fn flush(&self) {}
}

pub fn logger_init() {
    let _ = log::set_logger(&Logger);
    log::set_max_level(log::LevelFilter::Debug);
}

/// The messages logged so far by the calling test.
pub fn captured_logs() -> Vec<String> {
    let current = thread::current().id();
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(id, _)| *id == current)
        .map(|(_, msg)| msg.clone())
        .collect()
}

pub const PROJECT: &str = "my-build";
pub const TOKEN: &str = "123456";
pub const TARGET: &str = "CodeBuild_20161006.BatchGetProjects";

pub fn credentials() -> AwsCredentials {
    AwsCredentials {
        access_key_id: "AKIDEXAMPLE".to_string(),
        secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
        session_token: Some("session-token".to_string()),
    }
}

pub fn codebuild_client(endpoint: &str) -> CodeBuildClient {
    CodeBuildClient::new("us-east-1", credentials(), Some(endpoint)).unwrap()
}

/// A `BatchGetProjects` response describing a single project.
pub fn project_response(source_type: &str, auth_type: Option<&str>, location: &str) -> String {
    let mut source = json!({
        "type": source_type,
        "location": location,
        "buildspec": "buildspec.yml",
    });
    if let Some(auth_type) = auth_type {
        source["auth"] = json!({"type": auth_type, "resource": TOKEN});
    }
    json!({
        "projects": [{
            "name": PROJECT,
            "arn": format!("arn:aws:codebuild:us-east-1:123456789012:project/{PROJECT}"),
            "source": source,
        }],
        "projectsNotFound": Value::Array(vec![]),
    })
    .to_string()
}

pub fn pull_request(number: u64) -> String {
    json!({
        "number": number,
        "state": "open",
        "locked": false,
        "draft": false,
        "title": "Add widgets",
    })
    .to_string()
}

pub fn created_comment(id: u64) -> String {
    json!({
        "id": id,
        "html_url": format!("https://github.com/acme/widgets/pull/42#issuecomment-{id}"),
        "body": "ignored",
        "user": {"login": "codebuild-bot", "id": 7},
    })
    .to_string()
}
