use freedesktop_icons::lookup;
use parking_lot::RwLock;
use radial::option::IconHandle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const THEME_ICON_SIZE: u16 = 128;

static RESOLVED: OnceLock<RwLock<HashMap<IconHandle, Option<PathBuf>>>> = OnceLock::new();

/// Resolves an icon handle to a file: absolute paths are used as-is,
/// anything else is looked up in the icon theme. Results are cached.
pub fn find_icon_path(icon: &IconHandle) -> Option<PathBuf> {
    if icon.is_empty() {
        return None;
    }

    let cache = RESOLVED.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(hit) = cache.read().get(icon) {
        return hit.clone();
    }

    let path = Path::new(icon.as_str());
    let resolved = if path.is_absolute() {
        path.exists().then(|| path.to_path_buf())
    } else {
        lookup(icon.as_str())
            .with_size(THEME_ICON_SIZE)
            .with_scale(1)
            .find()
    };

    if resolved.is_none() {
        log::warn!("Icon '{}' not found", icon);
    }
    cache.write().insert(icon.clone(), resolved.clone());
    resolved
}

/// Forgets every resolved path, including misses, so newly installed icons are found.
pub fn clear_cache() {
    if let Some(cache) = RESOLVED.get() {
        cache.write().clear();
    }
}
