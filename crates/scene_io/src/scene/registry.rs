//! Backend registry
//!
//! Process-wide table mapping a file extension to the backend that opens it.
//! The table is created on first use and starts out holding the built-in
//! backends, so queries and registrations are valid in any order.
//! Registering an extension that is already present replaces the previous
//! backend: the last registration wins.

use std::collections::HashMap;
use std::path::Path as FilePath;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use super::error::{SceneError, SceneResult};
use super::interface::SceneInterface;
use super::open_mode::OpenMode;
use crate::backends::SceneCacheBackend;

/// Constructs the root handle of a newly opened scene
pub type BackendFactory =
    Arc<dyn Fn(&FilePath, OpenMode) -> SceneResult<SceneInterface> + Send + Sync>;

#[derive(Clone)]
struct BackendEntry {
    modes: OpenMode,
    factory: BackendFactory,
}

static REGISTRY: Lazy<RwLock<HashMap<String, BackendEntry>>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        SceneCacheBackend::EXTENSION.to_string(),
        BackendEntry {
            modes: SceneCacheBackend::MODES,
            factory: Arc::new(SceneCacheBackend::open),
        },
    );
    RwLock::new(table)
});

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// Register a backend for an extension, replacing any previous one
pub fn register_backend<F>(extension: &str, modes: OpenMode, factory: F)
where
    F: Fn(&FilePath, OpenMode) -> SceneResult<SceneInterface> + Send + Sync + 'static,
{
    let extension = normalize_extension(extension);
    let entry = BackendEntry {
        modes,
        factory: Arc::new(factory),
    };

    let mut table = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if table.insert(extension.clone(), entry).is_some() {
        log::warn!("Replacing scene backend for '.{extension}'");
    } else {
        log::info!("Registered scene backend for '.{extension}' ({modes:?})");
    }
}

/// Remove the backend for an extension; returns whether one was registered
pub fn unregister_backend(extension: &str) -> bool {
    let extension = normalize_extension(extension);
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&extension)
        .is_some()
}

/// Modes supported by the backend registered for an extension
pub fn backend_modes(extension: &str) -> Option<OpenMode> {
    let extension = normalize_extension(extension);
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&extension)
        .map(|entry| entry.modes)
}

/// Extensions whose backend supports any of `modes`, sorted
pub fn supported_extensions(modes: OpenMode) -> Vec<String> {
    let table = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let mut extensions: Vec<String> = table
        .iter()
        .filter(|(_, entry)| entry.modes.intersects(modes))
        .map(|(extension, _)| extension.clone())
        .collect();
    extensions.sort();
    extensions
}

/// Open a scene with the backend registered for the file's extension
///
/// `mode` must be exactly one of READ, WRITE or APPEND.
pub fn create(path: &FilePath, mode: OpenMode) -> SceneResult<SceneInterface> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(normalize_extension)
        .ok_or_else(|| SceneError::UnsupportedFormat(path.display().to_string()))?;

    // Factories may do file IO, so the lock is released before calling one.
    let entry = REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&extension)
        .cloned()
        .ok_or_else(|| SceneError::UnsupportedFormat(extension.clone()))?;

    if !mode.is_single() || !entry.modes.contains(mode) {
        return Err(SceneError::UnsupportedMode { extension, mode });
    }

    log::info!("Opening {} ({mode:?})", path.display());
    (entry.factory)(path, mode)
}
