//! Catalog refresh
//!
//! A refresh asks the registry for installed packages (optionally) and then the
//! full catalog, ticking at a fixed interval while each request is pending.
//! Only one refresh runs at a time: starting another aborts the one in flight.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::registry::RegistryQuery;
use crate::selection::{DependencyCatalogEntry, SelectionSet};
use crate::{Error, Result};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest tick accepted; smaller intervals, including zero, are raised to it
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Await `request`, logging on every `interval` tick until it completes.
/// There is no timeout.
pub async fn poll_until_complete<F, T>(label: &str, interval: Duration, request: F) -> T
where
    F: Future<Output = T>,
{
    tokio::pin!(request);
    let mut ticker = tokio::time::interval(interval.max(MIN_POLL_INTERVAL));
    // The first tick fires immediately
    ticker.tick().await;

    let mut ticks: u64 = 0;
    loop {
        tokio::select! {
            output = &mut request => return output,
            _ = ticker.tick() => {
                ticks += 1;
                debug!("{} still pending ({} ticks)", label, ticks);
            }
        }
    }
}

async fn fetch_catalog(
    registry: Arc<dyn RegistryQuery>,
    include_installed: bool,
    interval: Duration,
) -> Result<Vec<DependencyCatalogEntry>> {
    let mut entries = Vec::new();

    if include_installed {
        let installed =
            poll_until_complete("list installed", interval, registry.list_installed()).await?;
        debug!("{} installed packages", installed.len());
        entries.extend(installed);
    }

    let remote = poll_until_complete("search registry", interval, registry.search_all()).await?;
    debug!("{} registry packages", remote.len());
    entries.extend(remote);

    Ok(entries)
}

/// Single-flight driver for catalog refreshes
pub struct CatalogRefresher {
    registry: Arc<dyn RegistryQuery>,
    poll_interval: Duration,
    in_flight: Option<JoinHandle<Result<Vec<DependencyCatalogEntry>>>>,
}

impl CatalogRefresher {
    pub fn new(registry: Arc<dyn RegistryQuery>) -> Self {
        Self {
            registry,
            poll_interval: DEFAULT_POLL_INTERVAL,
            in_flight: None,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Start a refresh in the background. Returns true if a previous refresh
    /// was still running and got cancelled.
    pub fn start(&mut self, include_installed: bool) -> bool {
        let cancelled = self.cancel();
        let registry = Arc::clone(&self.registry);
        let interval = self.poll_interval;
        self.in_flight = Some(tokio::spawn(fetch_catalog(
            registry,
            include_installed,
            interval,
        )));
        cancelled
    }

    /// Abort the refresh in flight, if any
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                warn!("Cancelled previous catalog refresh");
                true
            }
            _ => false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the current refresh and load its result into `selections`,
    /// replacing whatever was listed before. Returns the new entry count.
    pub async fn finish(&mut self, selections: &mut SelectionSet) -> Result<usize> {
        let handle = self
            .in_flight
            .take()
            .ok_or_else(|| Error::RegistryQuery("no refresh in progress".to_string()))?;

        let entries = handle.await.map_err(|e| {
            if e.is_cancelled() {
                Error::RegistryQuery("refresh was cancelled".to_string())
            } else {
                Error::RegistryQuery(format!("refresh task failed: {}", e))
            }
        })??;

        selections.replace(entries);
        info!("Catalog refreshed: {} packages", selections.len());
        Ok(selections.len())
    }

    /// Start a refresh and wait for it
    pub async fn refresh(
        &mut self,
        selections: &mut SelectionSet,
        include_installed: bool,
    ) -> Result<usize> {
        self.start(include_installed);
        self.finish(selections).await
    }
}
