use super::config::Config;
use super::utils::ensure_dir;
use crate::api::StoreError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Fixed name of the single persisted collection.
pub const STORAGE_KEY: &str = "wavy_prompts_data";

/// Image generator a prompt was written for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    NanoBanana,
    Midjourney,
    Seedream,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::NanoBanana, Category::Midjourney, Category::Seedream];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NanoBanana => "NanoBanana",
            Category::Midjourney => "Midjourney",
            Category::Seedream => "Seedream",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown category '{}' (expected NanoBanana, Midjourney or Seedream)",
                    s
                )
            })
    }
}

/// A single stored prompt.
///
/// Serialized with the camelCase keys of the persisted collection
/// (`imageUrl`, `createdAt`). Deserialization goes through [`StoredPrompt`],
/// which is where legacy entries are normalized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "StoredPrompt")]
pub struct PromptData {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub image_url: String,
    pub category: Category,
    /// Epoch milliseconds, stamped once at creation.
    pub created_at: i64,
}

impl PromptData {
    /// The fields a share link carries: no id, no creation time.
    pub fn shared(&self) -> SharedData {
        SharedData {
            title: self.title.clone(),
            prompt: self.prompt.clone(),
            image_url: self.image_url.clone(),
            category: self.category,
        }
    }
}

/// On-disk shape of a prompt, as loose as older collections require.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPrompt {
    id: String,
    title: String,
    prompt: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    created_at: Option<i64>,
}

/// Legacy migration rule, applied to every record read from storage:
/// a missing category means NanoBanana, a missing image or timestamp means
/// empty / zero.
impl From<StoredPrompt> for PromptData {
    fn from(s: StoredPrompt) -> Self {
        Self {
            id: s.id,
            title: s.title,
            prompt: s.prompt,
            image_url: s.image_url.unwrap_or_default(),
            category: s.category.unwrap_or_default(),
            created_at: s.created_at.unwrap_or(0),
        }
    }
}

/// Shareable subset of a prompt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SharedData {
    pub title: String,
    pub prompt: String,
    pub image_url: String,
    pub category: Category,
}

/// Input for a prompt that does not have an identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrompt {
    pub title: String,
    pub prompt: String,
    pub image_url: String,
    pub category: Category,
}

/// Device-local persistence for the serialized collection.
///
/// The whole collection is one opaque string; the store owns its format.
pub trait StorageMedium {
    /// Returns `Ok(None)` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the stored value. Readers never observe a partial write.
    fn write(&self, raw: &str) -> Result<(), StoreError>;
}

impl<M: StorageMedium + ?Sized> StorageMedium for &M {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        (**self).write(raw)
    }
}

impl<M: StorageMedium + ?Sized> StorageMedium for Box<M> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        (**self).write(raw)
    }
}

/// A single JSON file, rewritten atomically through a sibling temp file.
#[derive(Debug, Clone)]
pub struct FileMedium {
    path: PathBuf,
}

impl FileMedium {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageMedium for FileMedium {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(StoreError::Corrupt(format!(
                "{} is not valid UTF-8",
                self.path.display()
            ))),
            Err(e) => Err(StoreError::Unavailable(format!(
                "Unable to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        let unavailable =
            |e: std::io::Error| StoreError::Unavailable(format!("Unable to write {}: {}", self.path.display(), e));

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        ensure_dir(dir).map_err(StoreError::Unavailable)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(unavailable)?;
        tmp.write_all(raw.as_bytes()).map_err(unavailable)?;
        tmp.as_file().sync_all().map_err(unavailable)?;
        tmp.persist(&self.path).map_err(|e| unavailable(e.error))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).ok();
        }
        debug!(
            "wrote collection (path={}, bytes={})",
            self.path.display(),
            raw.len()
        );
        Ok(())
    }
}

/// In-memory medium for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    value: Mutex<Option<String>>,
    unavailable: AtomicBool,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `raw` already stored, as if written by an earlier session.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent read and write fail, like a disabled medium.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Raw stored value, bypassing the availability switch.
    pub fn contents(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory medium disabled".to_string()));
        }
        Ok(())
    }
}

impl StorageMedium for MemoryMedium {
    fn read(&self) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        let value = self
            .value
            .lock()
            .map_err(|_| StoreError::Unavailable("memory medium lock poisoned".to_string()))?;
        Ok(value.clone())
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        self.check_available()?;
        let mut value = self
            .value
            .lock()
            .map_err(|_| StoreError::Unavailable("memory medium lock poisoned".to_string()))?;
        *value = Some(raw.to_string());
        Ok(())
    }
}

/// Runtime context holding resolved paths and link settings.
#[derive(Debug, Clone)]
pub struct AppCtx {
    pub data_path: PathBuf,
    pub key_path: PathBuf,
    pub share_origin: String,
    pub sealed: bool,
}

impl AppCtx {
    /// Resolves the context from `~/.wavy-prompts/config.toml` and overrides.
    pub fn init(home_override: Option<&str>, origin_override: Option<&str>) -> Result<Self, StoreError> {
        let config_dir = Config::default_dir()?;
        let config = Config::load(&config_dir.join("config.toml"))?;
        Ok(Self::from_config(config_dir, config, home_override, origin_override))
    }

    pub fn from_config(
        config_dir: PathBuf,
        config: Config,
        home_override: Option<&str>,
        origin_override: Option<&str>,
    ) -> Self {
        let base_dir = home_override
            .map(PathBuf::from)
            .or(config.data_dir)
            .unwrap_or(config_dir);
        let data_path = base_dir.join(format!("{}.json", STORAGE_KEY));
        let key_path = base_dir.join("keys").join("key.bin");
        let share_origin = origin_override
            .map(str::to_string)
            .unwrap_or(config.share_origin);

        Self {
            data_path,
            key_path,
            share_origin,
            sealed: config.sealed,
        }
    }
}
