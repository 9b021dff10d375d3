use serde::{Deserialize, Serialize};

/// What a scraper found out about a URL.
///
/// Every field is optional: an unavailable preview is all `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub preview_image_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Preview {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_unavailable(&self) -> bool {
        self.preview_image_url.is_none() && self.title.is_none() && self.description.is_none()
    }
}
