//! In-process doubles for the Gemini and GitHub clients.

use async_trait::async_trait;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{Config, FileConfig};
use crate::pr::{CommentPoster, PublishError, PullRequestRef};
use crate::review::{GenerationError, GenerationRequest, Generator};

/// Config with every required variable set, for PR org/repo#42.
pub fn full_config() -> Config {
    Config::from_lookup(FileConfig::default(), |key| {
        let value = match key {
            "GEMINI_API_KEY" => "gemini-key",
            "GITHUB_TOKEN" => "gh-token",
            "REPO_FULL_NAME" => "org/repo",
            "PR_NUMBER" => "42",
            _ => return None,
        };
        Some(value.to_string())
    })
}

pub struct RecordingGenerator {
    reply: Result<String, (u16, String)>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl RecordingGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            reply: Err((status, body.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for RecordingGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, body)) => Err(GenerationError::Api {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub token: String,
    pub pr: PullRequestRef,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingPoster {
    fail: bool,
    posts: Mutex<Vec<Post>>,
}

impl RecordingPoster {
    /// A poster whose every call fails with HTTP 500.
    pub fn failing() -> Self {
        Self {
            fail: true,
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentPoster for RecordingPoster {
    async fn post_comment(
        &self,
        token: &str,
        pr: &PullRequestRef,
        body: &str,
    ) -> Result<(), PublishError> {
        self.posts.lock().unwrap().push(Post {
            token: token.to_string(),
            pr: pr.clone(),
            body: body.to_string(),
        });
        if self.fail {
            return Err(PublishError::Api {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

/// Shared in-memory sink for a `tracing_subscriber::fmt` subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Subscriber writing plain-text events into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(self.clone())
            .with_ansi(false)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
