pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog already holds a station with this id.
    #[error("Station with id \"{0}\" already exists")]
    DuplicateId(String),

    /// The native player rejected a playback request.
    #[error("Failed to play station: {0}")]
    Playback(String),

    /// The native player reported an error on its own.
    #[error("Audio error: {0}")]
    Audio(String),
}

impl Error {
    pub(crate) const UNKNOWN_AUDIO_ERROR: &'static str = "Unknown error";

    pub fn playback(cause: &anyhow::Error) -> Self {
        Self::Playback(format!("{cause:#}"))
    }

    pub fn audio(message: Option<String>) -> Self {
        Self::Audio(message.unwrap_or_else(|| Self::UNKNOWN_AUDIO_ERROR.to_string()))
    }
}
