//! The blog contract and its file-backed implementation.

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::message::{CreatePostRequest, GetPostsRequest, Posts};
use crate::post::Post;
use crate::store::PostStore;

/// Operations exposed to remote callers.
///
/// Every method has a default body that fails with [`Error::Unimplemented`],
/// so an implementation only overrides what it actually supports.
pub trait Blog: Send + Sync {
    /// List every post, counting the listing as a view of each one.
    fn get_posts(&self, _req: GetPostsRequest) -> Result<Posts> {
        Err(Error::Unimplemented("method GetPosts not implemented".into()))
    }

    /// Append a new post and return it.
    fn create_post(&self, _req: CreatePostRequest) -> Result<Post> {
        Err(Error::Unimplemented("method CreatePost not implemented".into()))
    }
}

/// Implements nothing. Every call fails with [`Error::Unimplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedBlog;

impl Blog for UnimplementedBlog {}

/// [`Blog`] backed by a [`PostStore`].
///
/// Each call does exactly one load, one in-memory mutation and one save.
/// Whether concurrent calls can lose each other's updates depends on the
/// store's [`WritePolicy`](crate::WritePolicy).
#[derive(Debug)]
pub struct BlogServer<C = SystemClock> {
    store: PostStore,
    clock: C,
}

impl BlogServer<SystemClock> {
    /// Serve posts from `store`, dated by the local clock.
    pub fn new(store: PostStore) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<C: Clock> BlogServer<C> {
    /// Serve posts from `store`, dated by `clock`.
    pub fn with_clock(store: PostStore, clock: C) -> Self {
        Self { store, clock }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Load, touch every post, save, and return the touched posts.
    ///
    /// Load failures come back as they are; save failures are wrapped in
    /// [`Error::Internal`]. Not idempotent: every call bumps every counter.
    pub fn list_and_touch(&self) -> Result<Vec<Post>> {
        let _cycle = self.store.begin();
        let mut posts = self.store.load()?;
        let today = self.clock.today();
        for post in posts.iter_mut() {
            post.touch(today);
        }
        self.store.save(&posts).map_err(Error::internal)?;
        Ok(posts)
    }

    /// Load, append a fresh post, save, and return only the new post.
    ///
    /// No validation on the text fields. Any store failure is wrapped in
    /// [`Error::Internal`].
    pub fn create(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Post> {
        let _cycle = self.store.begin();
        let mut posts = self.store.load().map_err(Error::internal)?;
        let post = Post::new(title, content, author, self.clock.today());
        posts.push(post.clone());
        self.store.save(&posts).map_err(Error::internal)?;
        Ok(post)
    }
}

impl<C: Clock> Blog for BlogServer<C> {
    fn get_posts(&self, _req: GetPostsRequest) -> Result<Posts> {
        match self.list_and_touch() {
            Ok(posts) => {
                log::info!("listed {} posts", posts.len());
                Ok(Posts { posts })
            }
            Err(e) => {
                log::warn!("GetPosts failed: {e}");
                Err(e)
            }
        }
    }

    fn create_post(&self, req: CreatePostRequest) -> Result<Post> {
        match self.create(req.title, req.content, req.author) {
            Ok(post) => {
                log::info!("created post {:?} by {:?}", post.title, post.author);
                Ok(post)
            }
            Err(e) => {
                log::warn!("CreatePost failed: {e}");
                Err(e)
            }
        }
    }
}
