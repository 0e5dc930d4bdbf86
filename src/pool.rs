//! Core proxy pool implementation.

use crate::config::PoolConfig;
use crate::source::ProxySource;

use log::{debug, info, warn};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tokio::time;

/// Lifecycle state of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// No refresh has produced any address yet.
    Empty,
    /// At least one refresh has installed a snapshot.
    Populated,
    /// The background task has been stopped.
    Stopped,
}

struct Snapshot {
    proxies: VecDeque<String>,
    state: PoolState,
}

struct Shared<S> {
    source: S,
    config: PoolConfig,
    snapshot: Mutex<Snapshot>,
}

impl<S: ProxySource> Shared<S> {
    /// Fetch a fresh snapshot. Failures yield an empty snapshot.
    async fn fetch_snapshot(&self) -> VecDeque<String> {
        match self.source.try_fetch(&self.config.filter).await {
            Ok(mut proxies) => {
                proxies.truncate(self.config.size);
                proxies.into()
            }
            Err(e) => {
                warn!("Proxy pool refresh failed, installing empty snapshot: {}", e);
                VecDeque::new()
            }
        }
    }

    /// Replace the snapshot wholesale.
    fn install(&self, proxies: VecDeque<String>) {
        let count = proxies.len();
        {
            let mut snapshot = self.snapshot.lock();
            if snapshot.state == PoolState::Stopped {
                return;
            }
            snapshot.proxies = proxies;
            if count > 0 {
                snapshot.state = PoolState::Populated;
            }
        }
        info!("Proxy pool status update: {}/{} proxies", count, self.config.size);
    }
}

/// A pool of proxy addresses refreshed in the background.
///
/// Every `refresh_interval` the whole snapshot is replaced with the result of
/// a new fetch; readers never see a partially replaced snapshot. A failed
/// refresh empties the pool until the next cycle. Dropping the pool stops
/// the background task.
pub struct ProxyPool<S> {
    shared: Arc<Shared<S>>,
    stop_tx: watch::Sender<bool>,
    task: AsyncMutex<Option<JoinHandle<()>>>,
}

impl<S: ProxySource + 'static> ProxyPool<S> {
    /// Create a new proxy pool with the given source and configuration.
    /// The first population happens before this returns.
    pub async fn new(source: S, config: PoolConfig) -> Self {
        let shared = Arc::new(Shared {
            source,
            config,
            snapshot: Mutex::new(Snapshot {
                proxies: VecDeque::new(),
                state: PoolState::Empty,
            }),
        });

        info!(
            "Initializing proxy pool (size {}, refresh every {:?})",
            shared.config.size, shared.config.refresh_interval
        );
        let initial = shared.fetch_snapshot().await;
        shared.install(initial);

        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(refresh_loop(Arc::clone(&shared), stop_rx));

        Self {
            shared,
            stop_tx,
            task: AsyncMutex::new(Some(task)),
        }
    }

    /// Remove and return one address. Falls back to a direct fetch with the
    /// pool's filter when the snapshot is empty.
    pub async fn take(&self) -> Option<String> {
        let pooled = self.shared.snapshot.lock().proxies.pop_front();
        if pooled.is_some() {
            return pooled;
        }

        debug!("Proxy pool is empty, fetching directly");
        self.shared.source.one(&self.shared.config.filter).await
    }

    /// Copy of the current snapshot.
    pub fn all(&self) -> Vec<String> {
        self.shared.snapshot.lock().proxies.iter().cloned().collect()
    }

    /// Number of addresses currently pooled.
    pub fn len(&self) -> usize {
        self.shared.snapshot.lock().proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn state(&self) -> PoolState {
        self.shared.snapshot.lock().state
    }

    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }

    /// Run one refresh cycle now, outside the timer. Does nothing once the
    /// pool has been stopped.
    pub async fn refresh(&self) {
        if self.state() == PoolState::Stopped {
            debug!("Proxy pool is stopped, skipping refresh");
            return;
        }
        let proxies = self.shared.fetch_snapshot().await;
        self.shared.install(proxies);
    }

    /// Stop the background task and wait for it to exit. A refresh in flight
    /// is abandoned and never installed. The current snapshot stays readable.
    /// Concurrent callers all return only after the task has exited.
    pub async fn stop(&self) {
        self.shared.snapshot.lock().state = PoolState::Stopped;
        let _ = self.stop_tx.send(true);

        let mut task = self.task.lock().await;
        if let Some(task) = task.take() {
            if let Err(e) = task.await {
                warn!("Proxy pool refresh task ended abnormally: {}", e);
            }
            info!("Proxy pool stopped");
        }
    }
}

async fn refresh_loop<S: ProxySource>(shared: Arc<Shared<S>>, mut stop_rx: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            _ = time::sleep(shared.config.refresh_interval) => {}
            _ = stop_rx.changed() => break,
        }

        let proxies = tokio::select! {
            proxies = shared.fetch_snapshot() => proxies,
            _ = stop_rx.changed() => break,
        };

        if *stop_rx.borrow() {
            break;
        }
        shared.install(proxies);
    }
    debug!("Proxy pool refresh task exiting");
}
