use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::storage::StorageMedium;
use super::utils::ensure_dir;
use crate::api::StoreError;

const NONCE_LEN: usize = 12;

/// Marks a stored value as produced by [`SealedMedium`].
pub const SEALED_PREFIX: &str = "wavy-sealed:";

/// Whether a raw stored value is a sealed blob.
pub fn is_sealed(raw: &str) -> bool {
    raw.trim_start().starts_with(SEALED_PREFIX)
}

/// Load the 32-byte at-rest key, creating it on first use.
pub fn load_or_generate_key(path: &Path) -> Result<Vec<u8>, StoreError> {
    if path.exists() {
        let buf = fs::read(path)?;
        if buf.len() != 32 {
            return Err(StoreError::Crypto("Invalid key length".to_string()));
        }
        return Ok(buf);
    }

    if let Some(parent) = path.parent() {
        ensure_dir(parent).map_err(StoreError::Init)?;
    }
    let key = Aes256Gcm::generate_key(OsRng);
    let mut f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    f.write_all(&key)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).ok();
    }
    log::info!("generated at-rest key (path={})", path.display());
    Ok(key.to_vec())
}

/// Wraps another medium and stores the collection as
/// `wavy-sealed:` + `base64(nonce || AES-256-GCM ciphertext)`.
pub struct SealedMedium<M> {
    inner: M,
    cipher: Aes256Gcm,
}

impl<M: StorageMedium> SealedMedium<M> {
    pub fn new(inner: M, key: &[u8]) -> Result<Self, StoreError> {
        if key.len() != 32 {
            return Err(StoreError::Crypto("Invalid key length".to_string()));
        }
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        Ok(Self { inner, cipher })
    }

    fn seal(&self, plaintext: &[u8]) -> Result<String, StoreError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let cipher_bytes = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| StoreError::Crypto("Encrypt error".to_string()))?;
        let mut out = Vec::with_capacity(NONCE_LEN + cipher_bytes.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&cipher_bytes);
        Ok(format!("{}{}", SEALED_PREFIX, general_purpose::STANDARD.encode(&out)))
    }

    /// A plaintext collection or a key mismatch is [`StoreError::Sealed`]:
    /// the data may be fine, it just cannot be opened with this setup.
    /// Broken framing is corruption.
    fn open(&self, stored: &str) -> Result<String, StoreError> {
        let stored = stored.trim();
        if stored.is_empty() {
            return Ok(String::new());
        }
        let encoded = stored.strip_prefix(SEALED_PREFIX).ok_or_else(|| {
            StoreError::Sealed("collection is stored in plaintext but `sealed` is enabled".to_string())
        })?;
        let decoded = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| StoreError::Corrupt("Invalid Base64 data.".to_string()))?;
        if decoded.len() < NONCE_LEN {
            return Err(StoreError::Corrupt("Data is too short to be valid.".to_string()));
        }
        let (nonce_bytes, cipher_bytes) = decoded.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), cipher_bytes)
            .map_err(|_| StoreError::Sealed("decryption failed, check the key file".to_string()))?;
        String::from_utf8(plaintext)
            .map_err(|_| StoreError::Corrupt("Decrypted data is not UTF-8".to_string()))
    }
}

impl<M: StorageMedium> StorageMedium for SealedMedium<M> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match self.inner.read()? {
            Some(encoded) => self.open(&encoded).map(Some),
            None => Ok(None),
        }
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        let sealed = self.seal(raw.as_bytes())?;
        self.inner.write(&sealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryMedium;
    use tempfile::tempdir;

    #[test]
    fn sealed_round_trip_hides_plaintext() {
        let inner = MemoryMedium::new();
        let sealed = SealedMedium::new(&inner, &[7u8; 32]).expect("sealed");
        sealed.write(r#"[{"title":"secret"}]"#).expect("write");

        let stored = inner.contents().expect("stored");
        assert!(!stored.contains("secret"));
        assert_eq!(
            sealed.read().expect("read").as_deref(),
            Some(r#"[{"title":"secret"}]"#)
        );
    }

    #[test]
    fn wrong_key_is_reported_as_sealed() {
        let inner = MemoryMedium::new();
        SealedMedium::new(&inner, &[1u8; 32])
            .expect("sealed")
            .write("[]")
            .expect("write");
        assert!(is_sealed(&inner.contents().expect("stored")));
        let other = SealedMedium::new(&inner, &[2u8; 32]).expect("sealed");
        assert!(matches!(other.read(), Err(StoreError::Sealed(_))));
    }

    #[test]
    fn plaintext_collection_is_reported_as_sealed() {
        let inner = MemoryMedium::with_contents(r#"[{"id":"a","title":"T","prompt":"p"}]"#);
        let sealed = SealedMedium::new(&inner, &[3u8; 32]).expect("sealed");
        assert!(matches!(sealed.read(), Err(StoreError::Sealed(_))));
    }

    #[test]
    fn broken_framing_is_corruption() {
        let inner = MemoryMedium::with_contents(format!("{}!!not base64!!", SEALED_PREFIX));
        let sealed = SealedMedium::new(&inner, &[3u8; 32]).expect("sealed");
        assert!(matches!(sealed.read(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn key_is_generated_once() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("keys").join("key.bin");
        let first = load_or_generate_key(&path).expect("key");
        let second = load_or_generate_key(&path).expect("key");
        assert_eq!(first.len(), 32);
        assert_eq!(first, second);
    }
}
