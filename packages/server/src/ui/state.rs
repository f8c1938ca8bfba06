//! State shared by every connection handler.

use std::path::PathBuf;

use super::hub::HubHandle;

/// Shared application state
pub struct AppState {
    /// Channels into the hub
    pub hub: HubHandle,
    /// Welcome banner file, read on every new connection
    pub banner_path: PathBuf,
}
