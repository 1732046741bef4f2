use std::path::PathBuf;
use std::sync::Arc;

use crate::broadcast::BroadcastChannel;
use crate::docs::DocumentRepository;

/// Shared state handed to every handler.
///
/// Constructed explicitly at startup and cloned into the router; there
/// is no global store instance. Tests swap in the in-memory repository
/// through the same constructor.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn DocumentRepository>,
    pub channel: BroadcastChannel,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        channel: BroadcastChannel,
        public_dir: PathBuf,
    ) -> Self {
        Self {
            repository,
            channel,
            public_dir,
        }
    }
}
