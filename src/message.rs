//! Request and response shapes of the remote surface, plus the route names
//! and failure body shared by [`server`](crate::server) and
//! [`client`](crate::client).

use crate::error::{Error, ErrorKind};
use crate::post::Post;
use serde::{Deserialize, Serialize};

/// Input of `GetPosts`. Carries nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPostsRequest {}

/// Input of `CreatePost`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePostRequest {
    /// Title of the new post.
    pub title: String,
    /// Body of the new post.
    pub content: String,
    /// Author of the new post.
    pub author: String,
    /// Accepted for compatibility, ignored: the service stamps the date itself.
    pub created_at: String,
}

impl CreatePostRequest {
    /// Request with the three free-text fields set.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            created_at: String::new(),
        }
    }
}

/// Output of `GetPosts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posts {
    /// Every stored post, in file order.
    pub posts: Vec<Post>,
}

// ---- routes -----------------------------------------------------------------

/// Service name; every method is served under `/<SERVICE>/<method>`.
pub const SERVICE: &str = "blog.Blog";
/// Name of the `GetPosts` method.
pub const GET_POSTS: &str = "GetPosts";
/// Name of the `CreatePost` method.
pub const CREATE_POST: &str = "CreatePost";

/// HTTP path of `method`.
pub fn method_path(method: &str) -> String {
    format!("/{SERVICE}/{method}")
}

/// Structured failure sent back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// What went wrong, broadly.
    pub kind: ErrorKind,
    /// Human-readable detail.
    pub message: String,
    /// Underlying store failure, for internal errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<Status>>,
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        Status {
            kind: err.kind(),
            message: err.message(),
            cause: err.cause().map(|c| Box::new(Status::from(c))),
        }
    }
}

impl From<Status> for Error {
    fn from(status: Status) -> Self {
        match status.kind {
            ErrorKind::Io => Error::Io(status.message),
            ErrorKind::Format => Error::Format(status.message),
            ErrorKind::Internal => match status.cause {
                Some(cause) => Error::internal(Error::from(*cause)),
                None => Error::internal(Error::Io(status.message)),
            },
            ErrorKind::Unimplemented => Error::Unimplemented(status.message),
            ErrorKind::Config => Error::Config(status.message),
            ErrorKind::InvalidRequest => Error::InvalidRequest(status.message),
        }
    }
}
