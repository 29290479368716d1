//! Blocking HTTP client for a [`Server`](crate::Server).

use crate::error::{Error, Result};
use crate::message::{
    method_path, CreatePostRequest, GetPostsRequest, Posts, Status, CREATE_POST, GET_POSTS,
};
use crate::post::Post;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Talks to one server, e.g. `http://127.0.0.1:3000`.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Client with reqwest's default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url, reqwest::blocking::Client::builder())
    }

    /// Give up on a call after `timeout`. The server keeps going regardless.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::build(base_url, reqwest::blocking::Client::builder().timeout(timeout))
    }

    fn build(
        base_url: impl Into<String>,
        builder: reqwest::blocking::ClientBuilder,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    /// Server root this client sends to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List every post. Each listed post's view count goes up by one.
    pub fn get_posts(&self) -> Result<Vec<Post>> {
        let posts: Posts = self.call(GET_POSTS, &GetPostsRequest {})?;
        Ok(posts.posts)
    }

    /// Create a post and return it as stored.
    pub fn create_post(&self, req: &CreatePostRequest) -> Result<Post> {
        self.call(CREATE_POST, req)
    }

    /// Call an arbitrary method; mostly useful to poke at unknown methods.
    pub fn call<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, method_path(method));
        let resp = self.http.post(url).json(params).send()?;
        let code = resp.status();
        let body = resp.bytes()?;

        if code.is_success() {
            return serde_json::from_slice(&body)
                .map_err(|e| Error::Io(format!("bad reply from server: {e}")));
        }
        match serde_json::from_slice::<Status>(&body) {
            Ok(status) => Err(Error::from(status)),
            Err(_) => Err(Error::Io(format!("server answered {code}"))),
        }
    }
}
