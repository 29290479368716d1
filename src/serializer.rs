//! Serialization layer. JSON via serde_json.
//!
//! Implement [`Serializer`] if you need a different on-disk format.

use crate::error::{Error, Result};
use crate::post::Post;

/// Converts a post collection to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode the whole collection.
    fn serialize(&self, posts: &[Post]) -> Result<Vec<u8>>;

    /// Decode bytes back into a collection, order preserved.
    fn deserialize(&self, bytes: &[u8]) -> Result<Vec<Post>>;
}

/// JSON serializer, pretty-printed unless asked otherwise.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::pretty()
    }
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Two-space indented JSON, one field per line. Diffs nicely.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, posts: &[Post]) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(posts)
        } else {
            serde_json::to_vec(posts)
        };
        bytes.map_err(|e| Error::Format(format!("failed to encode posts: {e}")))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Vec<Post>> {
        // `null` is an empty collection, anything else must be an array.
        let posts: Option<Vec<Post>> = serde_json::from_slice(bytes)
            .map_err(|e| Error::Format(format!("failed to parse post data: {e}")))?;
        Ok(posts.unwrap_or_default())
    }
}
