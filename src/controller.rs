use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::events::{Event, EventKind, Handler, Listeners};
use crate::models::{Options, Station};
use crate::player::{Notification, Player};

#[derive(Debug, Default)]
struct State {
    station: Option<Station>,
}

/// Tracks the selected station on top of a `Player` and re-raises its
/// notifications to registered handlers.
pub struct Controller<P: Player> {
    player: P,

    state: Mutex<State>,
    listeners: Arc<Listeners>,
}

impl<P: Player> Controller<P> {
    pub fn new(player: P, options: Options) -> Self {
        // Applied before the listener is installed, no volume event for defaults.
        player.set_volume(clamp_volume(options.volume).unwrap_or(Options::DEFAULT_VOLUME));
        player.set_preload(options.preload_policy());

        if options.autoplay {
            log::debug!("controller: autoplay requested, waiting for an explicit play");
        }

        let listeners = Arc::new(Listeners::default());
        let registry = listeners.clone();

        player.set_listener(Arc::new(move |notification: Notification| {
            registry.emit(&Event::from(notification));
        }));

        Self {
            player,
            state: Mutex::default(),
            listeners,
        }
    }

    /// Selects `station` and requests playback.
    ///
    /// The source is reassigned and `StationChange` emitted only when the
    /// station differs from the current selection. A failed playback request
    /// keeps the selection.
    pub async fn play(&self, station: &Station) -> Result<()> {
        let changed = {
            let mut state = self.state();

            if state.station.as_ref().map(|s| s.id.as_str()) == Some(station.id.as_str()) {
                false
            } else {
                // Selection and source move together.
                self.player.set_source(&station.stream_url);
                state.station = Some(station.clone());
                true
            }
        };

        if changed {
            log::debug!("controller: station changed to {}", station.id);
            self.listeners.emit(&Event::StationChange(station.clone()));
        }

        log::info!("controller: play {}", station.id);

        self.player.play().await.map_err(|e| {
            log::error!("controller: playing {} failed: {:#}", station.id, e);
            Error::playback(&e)
        })
    }

    /// Pauses playback, keeps the selection.
    pub fn pause(&self) {
        self.player.pause();
    }

    /// Forces the controller idle. Emits `Stop` even when nothing was playing.
    pub fn stop(&self) {
        self.player.pause();
        self.player.clear_source();
        self.state().station = None;

        self.listeners.emit(&Event::Stop);
    }

    /// Sets volume clamped into [0, 1]. NaN is ignored.
    pub fn set_volume(&self, volume: f32) {
        match clamp_volume(volume) {
            Some(volume) => self.player.set_volume(volume),
            None => log::warn!("controller: ignoring volume {}", volume),
        }
    }

    pub fn volume(&self) -> f32 {
        self.player.volume()
    }

    pub fn is_playing(&self) -> bool {
        !self.player.is_paused()
    }

    pub fn current_station(&self) -> Option<Station> {
        self.state().station.clone()
    }

    pub fn on(&self, kind: EventKind, handler: Handler) {
        self.listeners.on(kind, handler);
    }

    pub fn off(&self, kind: EventKind, handler: &Handler) {
        self.listeners.off(kind, handler);
    }

    /// Stops playback, drops every handler and releases the player.
    pub fn destroy(self) {
        self.stop();
        self.listeners.clear();
        self.player.release();
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Notification> for Event {
    fn from(value: Notification) -> Self {
        match value {
            Notification::Play => Self::Play,
            Notification::Pause => Self::Pause,
            Notification::Ended => Self::Stop,
            Notification::Error(message) => {
                let error = Error::audio(message);
                log::warn!("controller: {}", error);
                Self::Error(error)
            }
            Notification::VolumeChange(volume) => Self::VolumeChange(volume),
        }
    }
}

fn clamp_volume(volume: f32) -> Option<f32> {
    (!volume.is_nan()).then(|| volume.clamp(0.0, 1.0))
}
