// Background worker dispatch
//
// One render thread plus a bounded pool of worker threads for network work.
// Workers post results on an mpsc channel; the render thread drains it each
// frame and is the only place shared state (watchlist, profile) is touched.
// Results land in completion order; there is no cancellation, and in-flight
// work is abandoned when the dispatcher is dropped at process teardown.

use crate::client::{FetchError, ImageError, LookupClient};
use crate::model::CreatureRecord;
use anyhow::{Context, Result};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

/// Fixed worker pool size (reference behavior: 4 workers)
pub const WORKER_THREADS: usize = 4;

/// Results marshaled back to the render thread
#[derive(Debug)]
pub enum AppEvent {
    LookupDone {
        identifier: String,
        result: std::result::Result<CreatureRecord, FetchError>,
    },
    ImageDone {
        /// Creature the artwork belongs to; stale results for a profile the
        /// user has already navigated away from are dropped by the receiver
        id: u32,
        result: std::result::Result<Vec<u8>, ImageError>,
    },
}

pub struct Dispatcher {
    runtime: Runtime,
    client: Arc<LookupClient>,
    event_tx: Sender<AppEvent>,
}

impl Dispatcher {
    /// Build the worker runtime and the channel back to the render thread.
    pub fn new(client: LookupClient) -> Result<(Self, Receiver<AppEvent>)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(WORKER_THREADS)
            .thread_name("pokewatch-worker")
            .enable_all()
            .build()
            .context("failed to start worker runtime")?;

        let (event_tx, event_rx) = mpsc::channel();

        Ok((
            Dispatcher {
                runtime,
                client: Arc::new(client),
                event_tx,
            },
            event_rx,
        ))
    }

    /// Fire-and-forget lookup: fetch, parse, post the result.
    pub fn spawn_lookup(&self, identifier: &str) {
        let identifier = identifier.trim().to_lowercase();
        let client = Arc::clone(&self.client);
        let tx = self.event_tx.clone();

        debug!(%identifier, "dispatching lookup");
        self.runtime.spawn(async move {
            let result = client.lookup_creature(&identifier).await;
            // Send fails only when the UI is already gone
            let _ = tx.send(AppEvent::LookupDone { identifier, result });
        });
    }

    /// Fire-and-forget artwork fetch for creature `id`.
    pub fn spawn_image_fetch(&self, id: u32, url: &str) {
        let url = url.to_string();
        let client = Arc::clone(&self.client);
        let tx = self.event_tx.clone();

        debug!(id, %url, "dispatching artwork fetch");
        self.runtime.spawn(async move {
            let result = client.fetch_image(&url).await;
            let _ = tx.send(AppEvent::ImageDone { id, result });
        });
    }

    /// Run one lookup to completion on the worker runtime. Used by the
    /// non-interactive `lookup` subcommand.
    pub fn lookup_blocking(
        &self,
        identifier: &str,
    ) -> std::result::Result<CreatureRecord, FetchError> {
        self.runtime.block_on(self.client.lookup_creature(identifier))
    }
}

// ============================================================================
// TESTS
// ============================================================================
