//! The post store: whole-collection load and save against one JSON file.

use crate::error::{Error, Result};
use crate::persist::{atomic_write, create_if_missing, read, write_in_place};
use crate::post::Post;
use crate::serializer::{JsonSerializer, Serializer};
use parking_lot::{Mutex, MutexGuard};
use std::path::{Path, PathBuf};

/// Controls how concurrent read-modify-write cycles interact with the file.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// No locking, saves truncate the file in place.
    ///
    /// Two cycles running at once both load the same state and the later
    /// save silently discards the earlier one (lost update). A crash during
    /// a save can leave a truncated file that later loads reject.
    #[default]
    Direct,
    /// One store-wide lock held for the whole load-mutate-save cycle, and
    /// saves go through a temp file plus rename.
    Serialized,
}

impl std::str::FromStr for WritePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(WritePolicy::Direct),
            "serialized" => Ok(WritePolicy::Serialized),
            other => Err(Error::Config(format!("unknown write policy: {other}"))),
        }
    }
}

/// Persistent post collection stored as a JSON array in a single file.
///
/// Nothing is cached: every [`load`](Self::load) re-reads the file, and every
/// [`save`](Self::save) replaces its whole content.
pub struct PostStore {
    path: PathBuf,
    serializer: JsonSerializer,
    policy: WritePolicy,
    cycle: Mutex<()>,
}

/// Held for the duration of one load-mutate-save cycle.
///
/// Under [`WritePolicy::Direct`] this holds nothing and other cycles run
/// freely alongside it.
pub struct CycleGuard<'a> {
    _lock: Option<MutexGuard<'a, ()>>,
}

impl PostStore {
    /// Store at `path` with pretty output and [`WritePolicy::Direct`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start configuring a new store. Call [`.build()`](PostStoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> PostStoreBuilder {
        PostStoreBuilder::new(path)
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured write policy.
    #[must_use]
    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Read and decode the whole collection, order preserved.
    ///
    /// Fails with [`Error::Io`] when the file is missing or unreadable and with
    /// [`Error::Format`] when its content is not a post array.
    pub fn load(&self) -> Result<Vec<Post>> {
        let bytes = read(&self.path)?;
        let posts = self.serializer.deserialize(&bytes)?;
        log::debug!("loaded {} posts from {}", posts.len(), self.path.display());
        Ok(posts)
    }

    /// Encode `posts` and replace the file content with it.
    pub fn save(&self, posts: &[Post]) -> Result<()> {
        let bytes = self.serializer.serialize(posts)?;
        match self.policy {
            WritePolicy::Direct => write_in_place(&self.path, &bytes)?,
            WritePolicy::Serialized => atomic_write(&self.path, &bytes)?,
        }
        log::debug!("saved {} posts to {}", posts.len(), self.path.display());
        Ok(())
    }

    /// Enter a load-mutate-save cycle. Keep the guard alive until the save
    /// returns.
    pub fn begin(&self) -> CycleGuard<'_> {
        let lock = match self.policy {
            WritePolicy::Direct => None,
            WritePolicy::Serialized => Some(self.cycle.lock()),
        };
        CycleGuard { _lock: lock }
    }

    /// Seed an empty collection if the file does not exist yet. Returns `true`
    /// when a file was created. Loads never do this on their own.
    pub fn init(&self) -> Result<bool> {
        let bytes = self.serializer.serialize(&[])?;
        let created = create_if_missing(&self.path, &bytes)?;
        if created {
            log::info!("created empty posts file at {}", self.path.display());
        }
        Ok(created)
    }
}

impl std::fmt::Debug for PostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostStore")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures a [`PostStore`].
///
/// ```rust,no_run
/// use postbox::{PostStore, WritePolicy};
///
/// let store = PostStore::builder("posts.json")
///     .policy(WritePolicy::Serialized)
///     .build()
///     .unwrap();
/// ```
pub struct PostStoreBuilder {
    path: PathBuf,
    policy: WritePolicy,
    pretty: bool,
}

impl PostStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            policy: WritePolicy::Direct,
            pretty: true,
        }
    }

    /// Set the write policy (default: [`WritePolicy::Direct`]).
    pub fn policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Write indented JSON (default: `true`).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Check the configuration and return the store. The file is not touched.
    pub fn build(self) -> Result<PostStore> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::Config("posts file path is empty".into()));
        }
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::compact()
        };
        Ok(PostStore {
            path: self.path,
            serializer,
            policy: self.policy,
            cycle: Mutex::new(()),
        })
    }
}

impl std::fmt::Debug for PostStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostStoreBuilder")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .field("pretty", &self.pretty)
            .finish()
    }
}
