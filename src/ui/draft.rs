//! Create-post form state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of post being drafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    #[default]
    Text,
    Video,
    Audio,
    Image,
}

impl PostType {
    pub const ALL: [PostType; 4] = [PostType::Text, PostType::Video, PostType::Audio, PostType::Image];

    /// Label shown on the type selector.
    pub fn label(self) -> &'static str {
        match self {
            PostType::Text => "Text Post",
            PostType::Video => "Video",
            PostType::Audio => "Audio",
            PostType::Image => "Image",
        }
    }

    /// MIME filter for the upload picker.
    pub fn accept(self) -> &'static str {
        match self {
            PostType::Text => "*/*",
            PostType::Video => "video/*",
            PostType::Audio => "audio/*",
            PostType::Image => "image/*",
        }
    }
}

/// Ordered, duplicate-free tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagList(Vec<String>);

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Input is trimmed; blank or already present tags are ignored.
    /// Returns whether the list changed.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Remove a tag, trimmed like [`TagList::add`]; a no-op when absent.
    pub fn remove(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An attached upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: String,
    pub name: String,
    pub post_type: PostType,
    pub size_bytes: u64,
}

impl MediaFile {
    /// Size rendered in megabytes with one decimal, e.g. "2.5 MB".
    pub fn display_size(&self) -> String {
        format!("{:.1} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

/// Attached uploads in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaList(Vec<MediaFile>);

impl MediaList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a file and return its generated id.
    pub fn add(&mut self, name: impl Into<String>, post_type: PostType, size_bytes: u64) -> String {
        let id = Uuid::new_v4().simple().to_string()[..9].to_string();
        self.0.push(MediaFile {
            id: id.clone(),
            name: name.into(),
            post_type,
            size_bytes,
        });
        id
    }

    /// Detach by id; unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|f| f.id != id);
        self.0.len() != before
    }

    pub fn files(&self) -> &[MediaFile] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the create-post form holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: TagList,
    pub media: MediaList,
}

impl PostDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an upload typed after the currently selected post type.
    pub fn attach(&mut self, name: impl Into<String>, size_bytes: u64) -> String {
        self.media.add(name, self.post_type, size_bytes)
    }

    /// Files shown in the preview card: the first two.
    pub fn preview_media(&self) -> &[MediaFile] {
        let files = self.media.files();
        &files[..files.len().min(2)]
    }

    /// True when the preview has nothing to show.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.media.is_empty()
    }
}
