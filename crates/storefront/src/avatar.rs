//! Avatar URL generation.

use url::Url;

/// Maps a seed string to an avatar image URL.
///
/// Implementations must be deterministic: the same seed always yields the
/// same URL.
pub trait AvatarGenerator: Send + Sync {
    fn avatar_url(&self, seed: &str) -> String;
}

/// DiceBear-style generator: `{base}?seed={seed}`.
#[derive(Debug, Clone)]
pub struct SeededAvatar {
    base: Url,
}

impl SeededAvatar {
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self { base }
    }
}

impl AvatarGenerator for SeededAvatar {
    fn avatar_url(&self, seed: &str) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut().clear().append_pair("seed", seed);
        url.into()
    }
}
