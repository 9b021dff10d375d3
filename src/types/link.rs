use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Pseudo collection id that selects every link.
pub const ALL_COLLECTIONS: &str = "all";

/// A named grouping of links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
}

impl Collection {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// A saved URL with its metadata and read status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkItem {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Empty when a stored record never named its collection; such a link
    /// shows up only under `"all"`.
    #[serde(default, alias = "collectionId")]
    pub collection_id: String,
    #[serde(default)]
    pub is_read: bool,
    pub date_saved: DateTime<Utc>,
    #[serde(default)]
    pub preview_image_url: Option<String>,
}

impl LinkItem {
    /// Case-insensitive substring match over title, description, url and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        let contains = |s: &str| s.to_lowercase().contains(needle);
        self.title.as_deref().is_some_and(contains)
            || self.description.as_deref().is_some_and(contains)
            || contains(self.url.as_str())
            || self.tags.iter().any(|t| contains(t.as_str()))
    }
}

/// The single persisted unit: every collection and every link.
///
/// `links` is kept newest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub links: Vec<LinkItem>,
}

impl Document {
    pub fn with_collections(collections: Vec<Collection>) -> Self {
        Self {
            collections,
            links: Vec::new(),
        }
    }

    pub fn find_link_mut(&mut self, id: &str) -> Option<&mut LinkItem> {
        self.links.iter_mut().find(|l| l.id == id)
    }
}

/// Input for creating a link.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewLink {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default, alias = "collectionId")]
    pub collection_id: String,
}

impl NewLink {
    pub fn new(url: &str, collection_id: &str) -> Self {
        Self {
            url: url.to_string(),
            collection_id: collection_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = normalize_tags(tags.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Partial update for an existing link.
///
/// `id`, `date_saved` and `preview_image_url` are not part of the patch, so
/// any such keys in an incoming body are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkPatch {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_tags")]
    pub tags: Option<Vec<String>>,
    #[serde(default, alias = "collectionId")]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

impl LinkPatch {
    /// Shallow-merges the patch over `link`.
    ///
    /// Missing or empty `tags` keep the existing tags. An empty title or
    /// description clears the field.
    pub fn apply_to(&self, link: &mut LinkItem) {
        if let Some(url) = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            link.url = url.to_string();
        }
        if let Some(title) = &self.title {
            link.title = non_blank(title);
        }
        if let Some(description) = &self.description {
            link.description = non_blank(description);
        }
        if let Some(tags) = self.tags.as_ref().filter(|t| !t.is_empty()) {
            link.tags = tags.clone();
        }
        if let Some(collection_id) = &self.collection_id {
            link.collection_id = collection_id.clone();
        }
        if let Some(is_read) = self.is_read {
            link.is_read = is_read;
        }
    }
}

/// Returns `Some(trimmed)` unless the string is blank.
pub fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims every tag and drops blanks, keeping order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .filter_map(|t| non_blank(&t))
        .collect()
}

/// Tags arrive either as a JSON array or as a comma-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::List(list) => normalize_tags(list),
            TagsInput::Csv(csv) => normalize_tags(csv.split(',').map(str::to_string).collect()),
        }
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let input: Option<TagsInput> = Option::deserialize(deserializer)?;
    Ok(input.map(TagsInput::into_tags).unwrap_or_default())
}

fn deserialize_optional_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let input: Option<TagsInput> = Option::deserialize(deserializer)?;
    Ok(input.map(TagsInput::into_tags))
}
