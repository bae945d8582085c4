use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread;

use anyhow::Context;
use futures::future::BoxFuture;
use rodio::source::EmptyCallback;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use self::source::StreamDecoder;
use super::{Listener, Notification, Player, Preload};

mod source;

/// Plays radio streams on the default output device.
///
/// Every loaded stream gets its own `Sink`; dropping the sink stops it, so
/// replacing or clearing the source never waits on the audio thread.
pub struct Rodio {
    shared: Arc<Shared>,
    // Not `Send`, kept out of `Shared`. Output stops when dropped.
    _stream: OutputStream,
}

impl Rodio {
    pub fn try_default() -> anyhow::Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("open default output device")?;

        Ok(Self {
            shared: Arc::new(Shared::new(handle)),
            _stream: stream,
        })
    }

    fn spawn_preload(&self, url: String, generation: u64) {
        let shared = Arc::downgrade(&self.shared);

        let spawned = thread::Builder::new()
            .name("preload".to_string())
            .spawn(move || preload(shared, url, generation));

        if let Err(e) = spawned {
            log::warn!("rodio: can't spawn preload thread: {}", e);
        }
    }
}

impl Player for Rodio {
    fn set_source(&self, url: &str) {
        let preload = {
            let mut out = self.shared.out();
            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

            out.source = Some(url.to_string());
            out.sink = None;
            out.preloaded = None;

            (out.preload == Preload::Auto).then_some(generation)
        };

        log::debug!("rodio: source set to {}", url);

        if let Some(generation) = preload {
            self.spawn_preload(url.to_string(), generation);
        }
    }

    fn clear_source(&self) {
        let mut out = self.shared.out();
        self.shared.generation.fetch_add(1, Ordering::SeqCst);

        out.source = None;
        out.sink = None;
        out.preloaded = None;
    }

    fn play(&self) -> BoxFuture<'static, anyhow::Result<()>> {
        let shared = self.shared.clone();

        Box::pin(async move {
            let was_paused = shared.is_paused();

            let (url, request, loaded) = {
                let out = shared.out();
                let request = Request::new(&out, shared.current_generation());
                let url = out.source.clone().context("no source assigned")?;
                let loaded = out.loaded == request.generation
                    && out.sink.as_ref().map_or(false, |sink| !sink.empty());

                (url, request, loaded)
            };

            if !loaded {
                let decoder = match shared.take_preloaded(request.generation) {
                    Some(decoder) => decoder,
                    None => {
                        log::info!("rodio: opening {}", url);

                        let loader =
                            tokio::task::spawn_blocking(move || StreamDecoder::from_http(&url));

                        match loader.await.context("join stream loader")? {
                            Ok(decoder) => decoder,
                            Err(e) => {
                                shared.notify(Notification::Error(Some(format!("{e:#}"))));
                                return Err(e);
                            }
                        }
                    }
                };

                shared.start(request, decoder)?;
            }

            shared.resume(request, was_paused)
        })
    }

    fn pause(&self) {
        let paused = {
            let mut out = self.shared.out();
            out.pauses += 1;

            match &out.sink {
                Some(sink) if !sink.is_paused() && !sink.empty() => {
                    sink.pause();
                    true
                }
                _ => false,
            }
        };

        if paused {
            self.shared.notify(Notification::Pause);
        }
    }

    fn is_paused(&self) -> bool {
        self.shared.is_paused()
    }

    fn volume(&self) -> f32 {
        self.shared.out().volume
    }

    fn set_volume(&self, volume: f32) {
        let changed = {
            let mut out = self.shared.out();

            if let Some(sink) = &out.sink {
                sink.set_volume(volume);
            }

            std::mem::replace(&mut out.volume, volume) != volume
        };

        if changed {
            self.shared.notify(Notification::VolumeChange(volume));
        }
    }

    fn set_preload(&self, preload: Preload) {
        self.shared.out().preload = preload;
    }

    fn set_listener(&self, listener: Listener) {
        *self.shared.listener() = Some(listener);
    }

    fn release(&self) {
        self.shared.listener().take();
        self.clear_source();
    }
}

impl fmt::Debug for Rodio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rodio").field("shared", &self.shared).finish()
    }
}

struct Output {
    source: Option<String>,
    sink: Option<Sink>,
    /// Generation the current sink was started for.
    loaded: u64,
    preloaded: Option<(u64, StreamDecoder)>,
    preload: Preload,
    volume: f32,
    /// Pause requests so far, a pending play is aborted when it moves.
    pauses: u64,
}

impl Output {
    fn new() -> Self {
        Self {
            source: None,
            sink: None,
            loaded: 0,
            preloaded: None,
            preload: Preload::None,
            volume: 1.0,
            pauses: 0,
        }
    }

    /// A finished preload is kept only while nothing else loaded its source.
    fn wants_preloaded(&self, generation: u64, current: u64) -> bool {
        generation == current && self.loaded != generation
    }
}

/// State a play request was made against.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Request {
    generation: u64,
    pauses: u64,
}

impl Request {
    fn new(out: &Output, generation: u64) -> Self {
        Self {
            generation,
            pauses: out.pauses,
        }
    }

    /// Fails when the source changed or a pause arrived since the request.
    fn check(&self, out: &Output, generation: u64) -> anyhow::Result<()> {
        if generation != self.generation {
            anyhow::bail!("source changed while loading");
        }

        if out.pauses != self.pauses {
            anyhow::bail!("aborted by pause");
        }

        Ok(())
    }
}

struct Shared {
    handle: OutputStreamHandle,
    out: Mutex<Output>,
    /// Bumped on every source change, stale loaders and callbacks compare against it.
    generation: AtomicU64,
    listener: Mutex<Option<Listener>>,
}

impl Shared {
    fn new(handle: OutputStreamHandle) -> Self {
        Self {
            handle,
            out: Mutex::new(Output::new()),
            generation: AtomicU64::new(0),
            listener: Mutex::new(None),
        }
    }

    fn out(&self) -> MutexGuard<'_, Output> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listener(&self) -> MutexGuard<'_, Option<Listener>> {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn notify(&self, notification: Notification) {
        let listener = self.listener().clone();

        if let Some(listener) = listener {
            listener(notification);
        }
    }

    fn is_paused(&self) -> bool {
        self.out()
            .sink
            .as_ref()
            .map_or(true, |sink| sink.is_paused() || sink.empty())
    }

    fn take_preloaded(&self, generation: u64) -> Option<StreamDecoder> {
        match self.out().preloaded.take() {
            Some((preloaded, decoder)) if preloaded == generation => Some(decoder),
            _ => None,
        }
    }

    /// Replaces the sink with a fresh one playing `decoder`.
    fn start(self: &Arc<Self>, request: Request, decoder: StreamDecoder) -> anyhow::Result<()> {
        let sink = Sink::try_new(&self.handle).context("create sink")?;

        let generation = request.generation;
        let shared = Arc::downgrade(self);
        let on_end = move || {
            if let Some(shared) = shared.upgrade() {
                if shared.current_generation() == generation {
                    shared.notify(Notification::Ended);
                }
            }
        };

        let mut out = self.out();
        request.check(&out, self.current_generation())?;

        sink.set_volume(out.volume);
        sink.append(decoder);
        sink.append(EmptyCallback::<f32>::new(Box::new(on_end)));

        out.sink = Some(sink);
        out.loaded = generation;
        out.preloaded = None;

        Ok(())
    }

    fn resume(&self, request: Request, was_paused: bool) -> anyhow::Result<()> {
        let resumed = {
            let out = self.out();
            request.check(&out, self.current_generation())?;
            out.sink.as_ref().map(Sink::play).is_some()
        };

        if resumed && was_paused {
            self.notify(Notification::Play);
        }

        Ok(())
    }
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let out = self.out();

        f.debug_struct("Shared")
            .field("source", &out.source)
            .field("with_sink", &out.sink.is_some())
            .field("preloaded", &out.preloaded.is_some())
            .field("preload", &out.preload)
            .field("volume", &out.volume)
            .field("generation", &self.current_generation())
            .field("pauses", &out.pauses)
            .finish()
    }
}

fn preload(shared: Weak<Shared>, url: String, generation: u64) {
    log::debug!("rodio: preloading {}", url);

    let result = StreamDecoder::from_http(&url);

    let Some(shared) = shared.upgrade() else {
        return;
    };

    match result {
        Ok(decoder) => {
            let mut out = shared.out();

            if out.wants_preloaded(generation, shared.current_generation()) {
                out.preloaded = Some((generation, decoder));
            } else {
                log::debug!("rodio: dropping unused preload of {}", url);
            }
        }
        Err(e) if shared.current_generation() == generation => {
            log::warn!("rodio: preloading {} failed: {:#}", url, e);
            shared.notify(Notification::Error(Some(format!("{e:#}"))));
        }
        Err(e) => log::debug!("rodio: stale preload of {} failed: {:#}", url, e),
    }
}
