use serde::{Deserialize, Serialize};

/// Metadata of one streamable radio channel.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stream_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub country: String,
}

impl Station {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        stream_url: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            stream_url: stream_url.into(),
            website: None,
            genre: None,
            country: country.into(),
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Checks whether an already lower-cased query occurs in the name,
    /// the genre (when present) or the description.
    pub(crate) fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self
                .genre
                .as_ref()
                .map_or(false, |genre| genre.to_lowercase().contains(query))
            || self.description.to_lowercase().contains(query)
    }
}
