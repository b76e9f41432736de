use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

/// Parsed files keyed by path, valid while the file's mtime is unchanged
#[derive(Debug)]
pub struct FileCache<T> {
    enabled: bool,
    entries: Mutex<HashMap<PathBuf, (SystemTime, T)>>,
}

impl<T: Clone> FileCache<T> {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `path`, or run `load` and remember its result.
    ///
    /// Failed loads are not cached. A file whose mtime cannot be read is
    /// always loaded fresh.
    pub fn get_or_load<E>(
        &self,
        path: &Path,
        load: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if !self.enabled {
            return load();
        }

        let Some(modified) = modified_time(path) else {
            return load();
        };

        if let Some((cached_at, value)) = self.lock().get(path)
            && *cached_at == modified
        {
            log::debug!("cache hit for {}", path.display());
            return Ok(value.clone());
        }

        let value = load()?;
        self.lock()
            .insert(path.to_path_buf(), (modified, value.clone()));
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, (SystemTime, T)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
