// Runs the plot kernel off the UI thread and hands snapshots back over a channel.
// Visual: the window keeps responding while the hat builds up row by row; pressing
// start again mid-plot does nothing until the current pass is done.

use crate::config::PlotConfig;
use crate::error::Error;
use crate::sombrero::{run_plot, PlotEvent};
use crate::types::Canvas;
use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

/// Snapshots allowed to queue up before the worker waits for the display.
const SNAPSHOT_BACKLOG: usize = 4;

/// The pass a worker thread runs.
pub(crate) type PlotJob = fn(&PlotConfig, &mut SyncSender<PlotEvent>) -> Canvas;

/// Clears the in-flight flag when the worker thread exits, panicking or not.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PlotWorker {
    config: PlotConfig,
    job: PlotJob,
    running: Arc<AtomicBool>,
    events: Option<Receiver<PlotEvent>>,
    handle: Option<JoinHandle<Canvas>>,
}

impl PlotWorker {
    pub fn new(config: PlotConfig) -> Self {
        Self::with_job(config, run_plot)
    }

    pub(crate) fn with_job(config: PlotConfig, job: PlotJob) -> Self {
        Self {
            config,
            job,
            running: Arc::new(AtomicBool::new(false)),
            events: None,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Launch a full pass on a background thread.
    /// The canvas in `slot` is released before the thread allocates its own.
    /// Ok(false) means a pass is already in flight; nothing was started or released.
    pub fn start(&mut self, slot: &mut PlotSlot) -> Result<bool, Error> {
        if self.running.swap(true, Ordering::AcqRel) {
            debug!("start ignored: a plot is already running");
            return Ok(false);
        }
        slot.clear();

        // The previous thread has cleared its flag; reap it before reusing the slot.
        if let Some(old) = self.handle.take() {
            if old.join().is_err() {
                debug!("previous plot worker had panicked");
            }
        }

        let (mut tx, rx) = sync_channel::<PlotEvent>(SNAPSHOT_BACKLOG);
        let guard = InFlight(Arc::clone(&self.running));
        let config = self.config.clone();
        let job = self.job;

        let spawned = thread::Builder::new()
            .name("sombrero-plot".to_string())
            .spawn(move || {
                let _guard = guard;
                info!("plot worker: pass started");
                let canvas = job(&config, &mut tx);
                info!("plot worker: pass finished");
                canvas
            });

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                self.events = Some(rx);
                Ok(true)
            }
            // The closure (and the guard in it) is dropped on failure, so the flag is clear again.
            Err(e) => Err(Error::WorkerSpawn(e.to_string())),
        }
    }

    /// Next published event, if one is waiting. Never blocks.
    pub fn poll(&self) -> Option<PlotEvent> {
        self.events.as_ref()?.try_recv().ok()
    }

    /// Reap the worker thread once it has exited.
    /// Ok(Some(final canvas)) exactly once per pass.
    pub fn try_join(&mut self) -> Result<Option<Canvas>, Error> {
        match &self.handle {
            Some(h) if h.is_finished() => {}
            _ => return Ok(None),
        }
        let Some(handle) = self.handle.take() else { return Ok(None) };
        handle.join().map(Some).map_err(|_| Error::WorkerPanicked)
    }
}

/// The display side's hold on the canvas it is showing.
/// Replacing releases the old snapshot before the new one is stored.
#[derive(Default)]
pub struct PlotSlot {
    current: Option<Arc<Canvas>>,
}

impl PlotSlot {
    pub fn replace(&mut self, canvas: Arc<Canvas>) {
        drop(self.current.take());
        self.current = Some(canvas);
    }

    pub fn current(&self) -> Option<&Arc<Canvas>> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
