use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{CommentPoster, PublishError, PullRequestRef};

/// Posts issue comments through the GitHub REST API.
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    fn comments_url(&self, pr: &PullRequestRef) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_base.trim_end_matches('/'),
            pr.repo_full_name,
            pr.number
        )
    }
}

#[async_trait]
impl CommentPoster for GitHubClient {
    async fn post_comment(
        &self,
        token: &str,
        pr: &PullRequestRef,
        body: &str,
    ) -> Result<(), PublishError> {
        debug!(pr = %pr, body_chars = body.chars().count(), "creating issue comment");
        let response = self
            .client
            .post(self.comments_url(pr))
            .header("User-Agent", "pr-reviewer")
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(token)
            .json(&CommentBody { body })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "issue comment created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::LogBuffer;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_post_comment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/org/repo/issues/42/comments")
            .match_header("authorization", "Bearer gh-token")
            .match_header("user-agent", "pr-reviewer")
            .match_body(Matcher::Json(json!({"body": "looks good"})))
            .with_status(201)
            .with_body(r#"{"id": 1}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url());
        let pr = PullRequestRef::new("org/repo", 42);
        client
            .post_comment("gh-token", &pr, "looks good")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_comment_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/repos/org/repo/issues/42/comments")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url());
        let pr = PullRequestRef::new("org/repo", 42);
        let err = client
            .post_comment("gh-token", &pr, "looks good")
            .await
            .unwrap_err();
        match err {
            PublishError::Api { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Not Found"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_body_size_logged_in_characters() {
        let logs = LogBuffer::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber());
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/repos/org/repo/issues/42/comments")
            .with_status(201)
            .create_async()
            .await;

        let client = GitHubClient::new(server.url());
        let pr = PullRequestRef::new("org/repo", 42);
        client.post_comment("gh-token", &pr, "✅✅✅").await.unwrap();

        assert!(logs.contents().contains("body_chars=3"));
    }

    #[test]
    fn test_comments_url() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3/");
        assert_eq!(
            client.comments_url(&PullRequestRef::new("org/repo", 7)),
            "https://ghe.example.com/api/v3/repos/org/repo/issues/7/comments"
        );
    }
}
