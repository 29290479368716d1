//! The stored item and its date handling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar-day format used for `CreatedAt` and `LastViewed`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a day the way posts store it.
pub fn format_date(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// One stored post.
///
/// Posts carry no identifier: they are told apart only by their position in
/// the collection. Absent fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Post {
    /// Free text, no constraints.
    pub title: String,
    /// Free text, no constraints.
    pub content: String,
    /// Day the post was created. Never changes afterwards.
    pub created_at: String,
    /// Free text, no constraints.
    pub author: String,
    /// Number of times the post has been listed.
    pub view_count: i64,
    /// Day the post was last listed (or created, if never listed).
    pub last_viewed: String,
}

impl Post {
    /// A fresh post stamped with `today`, never viewed.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        let day = format_date(today);
        Self {
            title: title.into(),
            content: content.into(),
            created_at: day.clone(),
            author: author.into(),
            view_count: 0,
            last_viewed: day,
        }
    }

    /// Record one more view on `today`. The counter sticks at `i64::MAX`.
    pub fn touch(&mut self, today: NaiveDate) {
        self.view_count = self.view_count.saturating_add(1);
        self.last_viewed = format_date(today);
    }
}
