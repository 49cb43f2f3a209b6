use codebuild_pr_notifier::{
    BuildSystemClient, NotifierError, ProjectConfigError,
    client::{AwsCredentials, CodeBuildClient},
};
use mockito::{Matcher, Server};
use serde_json::json;

mod common;
use common::{PROJECT, TARGET, TOKEN, codebuild_client, logger_init, project_response};

#[tokio::test]
async fn project_source_config() {
    logger_init();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("x-amz-target", TARGET)
        .match_header(
            "authorization",
            Matcher::Regex(
                r"SignedHeaders=content-type;host;x-amz-date;x-amz-security-token;x-amz-target, Signature=[0-9a-f]{64}$"
                    .to_string(),
            ),
        )
        .match_header("x-amz-date", Matcher::Regex(r"^\d{8}T\d{6}Z$".to_string()))
        .with_body(project_response(
            "GITHUB",
            Some("OAUTH"),
            "https://github.com/acme/widgets.git",
        ))
        .create_async()
        .await;

    let client = codebuild_client(&server.url());
    let project = client.get_project(PROJECT).await.unwrap();
    assert_eq!(project.project_name, PROJECT);
    assert_eq!(project.source_type, "GITHUB");
    assert_eq!(project.auth_type.as_deref(), Some("OAUTH"));
    assert_eq!(project.auth_resource.as_deref(), Some(TOKEN));
    assert_eq!(
        project.location.as_deref(),
        Some("https://github.com/acme/widgets.git")
    );
    // the token never shows in debug output
    assert!(!format!("{project:?}").contains(TOKEN));
    mock.assert_async().await;
}

#[tokio::test]
async fn no_session_token() {
    logger_init();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("x-amz-security-token", Matcher::Missing)
        .match_header(
            "authorization",
            Matcher::Regex(r"SignedHeaders=content-type;host;x-amz-date;x-amz-target,".to_string()),
        )
        .with_body(project_response("GITHUB", None, "https://github.com/acme/widgets.git"))
        .create_async()
        .await;

    let credentials = AwsCredentials {
        session_token: None,
        ..common::credentials()
    };
    let client = CodeBuildClient::new("us-east-1", credentials, Some(&server.url())).unwrap();
    let project = client.get_project(PROJECT).await.unwrap();
    assert!(project.auth_type.is_none());
    assert!(project.auth_resource.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn unknown_project() {
    logger_init();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_body(json!({"projects": [], "projectsNotFound": ["other"]}).to_string())
        .create_async()
        .await;

    let client = codebuild_client(&server.url());
    let err = client.get_project("other").await.unwrap_err();
    assert!(matches!(
        err,
        NotifierError::ProjectConfig(ProjectConfigError::ProjectNotFound { ref project }) if project == "other"
    ));
    assert!(err.is_config_error());
    mock.assert_async().await;
}

#[tokio::test]
async fn access_denied() {
    logger_init();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(400)
        .with_body(
            json!({
                "__type": "AccessDeniedException",
                "message": "not authorized to perform: codebuild:BatchGetProjects",
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = codebuild_client(&server.url());
    let err = client.get_project(PROJECT).await.unwrap_err();
    assert!(matches!(
        err,
        NotifierError::HttpStatus { status, .. } if status.as_u16() == 400
    ));
    assert!(!err.is_config_error());
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_response() {
    logger_init();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_body("<html>")
        .create_async()
        .await;

    let client = codebuild_client(&server.url());
    let err = client.get_project(PROJECT).await.unwrap_err();
    assert!(matches!(err, NotifierError::Json { .. }));
    mock.assert_async().await;
}
