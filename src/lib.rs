//! A minimal post service backed by one pretty-printed JSON file.
//!
//! Every call loads the whole collection, mutates it in memory and writes it
//! back. Nothing is cached between calls.
//!
//! ```rust,no_run
//! use postbox::{Blog, BlogServer, CreatePostRequest, GetPostsRequest, PostStore};
//!
//! let store = PostStore::open("posts.json").unwrap();
//! store.init().unwrap();
//! let blog = BlogServer::new(store);
//! blog.create_post(CreatePostRequest::new("Hello", "First post", "me")).unwrap();
//! let listed = blog.get_posts(GetPostsRequest {}).unwrap();
//! assert_eq!(listed.posts.last().unwrap().view_count, 1);
//! ```
//!
//! **Lost updates.** With the default [`WritePolicy::Direct`] two calls that
//! overlap both read the same file and the later write wins. Use
//! [`WritePolicy::Serialized`] to run cycles one at a time with atomic saves.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod clock;
pub mod error;
pub mod message;
pub mod persist;
pub mod post;
pub mod serializer;
pub mod server;
pub mod service;
pub mod store;

pub use client::Client;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, ErrorKind, Result};
pub use message::{CreatePostRequest, GetPostsRequest, Posts};
pub use post::Post;
pub use server::{router, Server};
pub use service::{Blog, BlogServer, UnimplementedBlog};
pub use store::{PostStore, PostStoreBuilder, WritePolicy};

/// Default posts file, relative to the working directory.
pub const DEFAULT_FILE: &str = "posts.json";
