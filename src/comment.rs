//! Rendering of the Pull Request comment that reports a build result.

/// The Serverless Application Repository page of the github-codebuild-logs app.
pub const SAR_APP_URL: &str = "https://serverlessrepo.aws.amazon.com/applications/arn:aws:serverlessrepo:us-east-1:277187709615:applications~github-codebuild-logs";

/// The Serverless Application Repository home page.
pub const SAR_HOMEPAGE: &str = "https://aws.amazon.com/serverless/serverlessrepo/";

/// Render the comment posted on a Pull Request for a finished build.
///
/// The output is Markdown and starts and ends with a line feed:
///
/// ```
/// use codebuild_pr_notifier::comment::render_pr_comment;
///
/// let comment = render_pr_comment("SUCCEEDED", "https://logs", 30, "https://app", "https://home");
/// assert!(comment.starts_with("\n### AWS CodeBuild CI Report\n"));
/// assert!(comment.contains("* Result: SUCCEEDED\n"));
/// ```
pub fn render_pr_comment(
    status: &str,
    logs_url: &str,
    expiration_in_days: u32,
    sar_app_url: &str,
    sar_homepage: &str,
) -> String {
    format!(
        "
### AWS CodeBuild CI Report

* Result: {status}
* [Build Logs]({logs_url}) (available for {expiration_in_days} days)

*Powered by [github-codebuild-logs]({sar_app_url}), available on the [AWS Serverless Application Repository]({sar_homepage})*
"
    )
}
