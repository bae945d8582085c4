use serde::{Deserialize, Serialize};

use crate::player::Preload;

/// Controller construction options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Initial volume in [0, 1].
    pub volume: f32,
    /// Start fetching the stream as soon as a station is selected.
    pub preload: bool,
    /// Accepted for compatibility, playback never starts on its own.
    pub autoplay: bool,
}

impl Options {
    pub const DEFAULT_VOLUME: f32 = 0.7;

    pub fn preload_policy(&self) -> Preload {
        if self.preload {
            Preload::Auto
        } else {
            Preload::None
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            volume: Self::DEFAULT_VOLUME,
            preload: false,
            autoplay: false,
        }
    }
}
