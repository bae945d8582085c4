use std::sync::{Arc, Mutex};

use futures::future::{self, BoxFuture};

use super::{Listener, Notification, Player, Preload};

#[derive(Debug)]
struct State {
    source: Option<String>,
    paused: bool,
    volume: f32,
    preload: Preload,
    fail_with: Option<String>,
    source_assignments: usize,
    play_requests: usize,
    released: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            source: None,
            paused: true,
            volume: 1.0,
            preload: Preload::None,
            fail_with: None,
            source_assignments: 0,
            play_requests: 0,
            released: false,
        }
    }
}

/// In-memory player. Clones share state, so a test keeps one clone to
/// inspect and script the player after handing another to a controller.
#[derive(Clone, Default)]
pub struct Fake {
    state: Arc<Mutex<State>>,
    listener: Arc<Mutex<Option<Listener>>>,
}

impl Fake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `play` fail with `reason`.
    pub fn reject_play(&self, reason: &str) {
        self.state.lock().unwrap().fail_with = Some(reason.to_string());
    }

    pub fn accept_play(&self) {
        self.state.lock().unwrap().fail_with = None;
    }

    /// Simulates a mid-stream error reported by the platform.
    pub fn raise_error(&self, message: Option<&str>) {
        self.notify(Notification::Error(message.map(str::to_string)));
    }

    /// Simulates the stream running out.
    pub fn finish(&self) {
        self.state.lock().unwrap().paused = true;
        self.notify(Notification::Ended);
    }

    pub fn source(&self) -> Option<String> {
        self.state.lock().unwrap().source.clone()
    }

    pub fn source_assignments(&self) -> usize {
        self.state.lock().unwrap().source_assignments
    }

    pub fn play_requests(&self) -> usize {
        self.state.lock().unwrap().play_requests
    }

    pub fn preload(&self) -> Preload {
        self.state.lock().unwrap().preload
    }

    pub fn is_released(&self) -> bool {
        self.state.lock().unwrap().released
    }

    pub fn has_listener(&self) -> bool {
        self.listener.lock().unwrap().is_some()
    }

    fn notify(&self, notification: Notification) {
        let listener = self.listener.lock().unwrap().clone();

        if let Some(listener) = listener {
            listener(notification);
        }
    }
}

impl Player for Fake {
    fn set_source(&self, url: &str) {
        let mut state = self.state.lock().unwrap();
        state.source = Some(url.to_string());
        state.source_assignments += 1;
        state.paused = true;
    }

    fn clear_source(&self) {
        let mut state = self.state.lock().unwrap();
        state.source = None;
        state.paused = true;
    }

    fn play(&self) -> BoxFuture<'static, anyhow::Result<()>> {
        let started = {
            let mut state = self.state.lock().unwrap();
            state.play_requests += 1;

            if let Some(reason) = state.fail_with.clone() {
                Err(anyhow::anyhow!(reason))
            } else if state.source.is_none() {
                Err(anyhow::anyhow!("no source assigned"))
            } else {
                let was_paused = state.paused;
                state.paused = false;
                Ok(was_paused)
            }
        };

        let result = match started {
            Ok(true) => {
                self.notify(Notification::Play);
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => Err(e),
        };

        Box::pin(future::ready(result))
    }

    fn pause(&self) {
        let was_playing = {
            let mut state = self.state.lock().unwrap();
            !std::mem::replace(&mut state.paused, true)
        };

        if was_playing {
            self.notify(Notification::Pause);
        }
    }

    fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    fn volume(&self) -> f32 {
        self.state.lock().unwrap().volume
    }

    fn set_volume(&self, volume: f32) {
        let changed = {
            let mut state = self.state.lock().unwrap();
            std::mem::replace(&mut state.volume, volume) != volume
        };

        if changed {
            self.notify(Notification::VolumeChange(volume));
        }
    }

    fn set_preload(&self, preload: Preload) {
        self.state.lock().unwrap().preload = preload;
    }

    fn set_listener(&self, listener: Listener) {
        *self.listener.lock().unwrap() = Some(listener);
    }

    fn release(&self) {
        self.listener.lock().unwrap().take();

        let mut state = self.state.lock().unwrap();
        state.source = None;
        state.paused = true;
        state.released = true;
    }
}
