//! Service context choosing the `JsonFetcher` implementation.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::adapters::live::LiveJsonFetcher;
use crate::adapters::recording::RecordingJsonFetcher;
use crate::adapters::replaying::ReplayingJsonFetcher;
use crate::cassette::{Cassette, CassetteError, CassetteRecorder, CassetteReplayer};
use crate::config::Settings;
use crate::handler::ReachabilityService;
use crate::ports::http::JsonFetcher;

/// Bundles the transport with an optional recorder.
///
/// Constructors wire up different adapters (live, recording, replaying).
/// A recording context writes its cassette when dropped.
pub struct ServiceContext {
    /// Transport to the REST API.
    pub fetcher: Arc<dyn JsonFetcher>,
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context hitting the network.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self { fetcher: Arc::new(LiveJsonFetcher::new(settings.timeout)), recorder: None }
    }

    /// Creates a live context that records every fetch to `path`.
    ///
    /// This is the developer mechanism behind `SNYK_REACH_RECORD`.
    #[must_use]
    pub fn recording(settings: &Settings, path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::for_session(path)));
        let fetcher = RecordingJsonFetcher::new(
            Box::new(LiveJsonFetcher::new(settings.timeout)),
            Arc::clone(&recorder),
        );
        Self { fetcher: Arc::new(fetcher), recorder: Some(recorder) }
    }

    /// Creates a context serving fetches from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, CassetteError> {
        let cassette = Cassette::load(path)?;
        info!(
            cassette = %path.display(),
            interactions = cassette.interactions.len(),
            "replaying recorded traffic"
        );
        let replayer = CassetteReplayer::new(&cassette);
        Ok(Self { fetcher: Arc::new(ReplayingJsonFetcher::new(replayer)), recorder: None })
    }

    /// Picks replay, recording or live in that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_settings(settings: &Settings, replay: Option<&Path>) -> Result<Self, CassetteError> {
        match (replay, settings.record_path.as_deref()) {
            (Some(path), _) => Self::replaying(path),
            (None, Some(path)) => Ok(Self::recording(settings, path)),
            (None, None) => Ok(Self::live(settings)),
        }
    }

    /// Builds the orchestrator on top of this context's transport.
    #[must_use]
    pub fn service(&self, settings: Settings) -> ReachabilityService {
        ReachabilityService::new(settings, Arc::clone(&self.fetcher))
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let guard = match recorder.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.write() {
            Ok(path) => info!(cassette = %path.display(), interactions = guard.len(), "recording saved"),
            Err(e) => warn!("failed to write cassette: {e}"),
        }
    }
}
