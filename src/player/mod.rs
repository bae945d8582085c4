use std::sync::Arc;

use futures::future::BoxFuture;

#[cfg(test)]
pub use self::fake::Fake;
pub use self::rodio::Rodio;

#[cfg(test)]
mod fake;
mod rodio;

/// Native audio output the controller drives.
pub trait Player {
    /// Assigns a new stream source. Current playback is abandoned.
    ///
    /// Called with the controller's selection locked, must not notify.
    fn set_source(&self, url: &str);

    /// Drops the current source, if any.
    fn clear_source(&self);

    /// Starts or resumes playback of the current source.
    fn play(&self) -> BoxFuture<'static, anyhow::Result<()>>;

    /// Pauses playback. No effect if already paused.
    fn pause(&self);

    /// Gets if a player is paused. True until something starts playing.
    fn is_paused(&self) -> bool;

    /// Current volume in [0, 1].
    fn volume(&self) -> f32;

    /// Set volume in [0, 1].
    fn set_volume(&self, volume: f32);

    /// Hint for how eagerly a newly assigned source is fetched.
    fn set_preload(&self, preload: Preload);

    /// Installs the callback receiving native notifications.
    fn set_listener(&self, listener: Listener);

    /// Stops output and drops the listener.
    fn release(&self);
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Preload {
    /// Open the stream as soon as a source is assigned.
    Auto,
    #[default]
    None,
}

/// Notifications raised by a `Player`.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    Play,
    Pause,
    Ended,
    Error(Option<String>),
    VolumeChange(f32),
}

pub type Listener = Arc<dyn Fn(Notification) + Send + Sync>;
