use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Maps a record key to a raw hash; stores reduce it modulo their table size.
pub trait KeyHasher: Send + Sync {
    fn hash(&self, key: &str) -> u64;
}

/// Shift-and-add string hash: `h = (h << 5) + byte` over 32-bit wrapping arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftAddHasher;

impl KeyHasher for ShiftAddHasher {
    fn hash(&self, key: &str) -> u64 {
        let hash = key
            .bytes()
            .fold(0u32, |h, b| (h << 5).wrapping_add(u32::from(b)));
        u64::from(hash)
    }
}

/// Digest-based hash. Slower, but spreads short numeric ids across the table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl KeyHasher for Sha256Hasher {
    fn hash(&self, key: &str) -> u64 {
        let digest = Sha256::digest(key.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HasherKind {
    #[default]
    ShiftAdd,
    Sha256,
}

impl HasherKind {
    pub fn build(self) -> Arc<dyn KeyHasher> {
        match self {
            HasherKind::ShiftAdd => Arc::new(ShiftAddHasher),
            HasherKind::Sha256 => Arc::new(Sha256Hasher),
        }
    }
}
