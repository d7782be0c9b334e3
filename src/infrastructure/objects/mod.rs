#[cfg(test)]
#[path = "objects_test.rs"]
mod tests;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use uuid::Uuid;

static OBJECTS: Lazy<DashMap<String, Vec<u8>>> = Lazy::new(DashMap::new);

const URL_PREFIX: &str = "blob:inkstrip/";

/// Process-wide registry of locally-held binary blobs, addressed by
/// `blob:inkstrip/<id>` URLs. The analog of browser object URLs: whoever
/// creates a blob must release it exactly once when it stops being
/// rendered.
pub struct ObjectStore {}

impl ObjectStore {
    pub fn create(bytes: Vec<u8>) -> String {
        let url = format!("{URL_PREFIX}{}", Uuid::new_v4());
        OBJECTS.insert(url.to_string(), bytes);

        return url;
    }

    pub fn resolve(url: &str) -> Option<Vec<u8>> {
        return OBJECTS.get(url).map(|entry| return entry.value().to_vec());
    }

    /// Releases a blob URL, returning whether it was still live. A false
    /// return on a managed URL means a double release upstream.
    pub fn release(url: &str) -> bool {
        return OBJECTS.remove(url).is_some();
    }

    pub fn is_managed(url: &str) -> bool {
        return url.starts_with(URL_PREFIX);
    }
}
