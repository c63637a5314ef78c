//! Audio clips and the replay cache

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use parking_lot::RwLock;
use std::sync::Arc;

/// Base64 encoded MP3 returned with a final recognition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    base64: String,
}

impl AudioClip {
    /// Wrap an encoded payload
    pub fn new(base64: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
        }
    }

    /// The payload as received
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Decode to raw MP3 bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.base64.trim())
    }
}

/// Last recognized clip, kept for manual replay
#[derive(Debug, Clone, Default)]
pub struct AudioCache {
    inner: Arc<RwLock<Option<AudioClip>>>,
}

impl AudioCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached clip
    ///
    /// A final result without audio clears the cache.
    pub fn store(&self, clip: Option<AudioClip>) {
        *self.inner.write() = clip;
    }

    /// The cached clip, if any
    pub fn current(&self) -> Option<AudioClip> {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload() {
        let clip = AudioClip::new("SUQzBA==");
        assert_eq!(clip.decode().unwrap(), b"ID3\x04");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(AudioClip::new("not base64!").decode().is_err());
    }

    #[test]
    fn test_cache_replaces_and_clears() {
        let cache = AudioCache::new();
        assert!(cache.current().is_none());

        cache.store(Some(AudioClip::new("AAAA")));
        assert_eq!(cache.current().unwrap().base64(), "AAAA");

        cache.store(None);
        assert!(cache.current().is_none());
    }
}
