//! File-backed session store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use armory_core::error::StorageError;
use armory_core::{CredentialToken, Result, SessionStore, StoredSession, UserProfile};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// On-disk layout: the two session entries side by side.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<String>,
    saved_at: DateTime<Utc>,
}

/// Default session file location.
pub fn default_session_path() -> anyhow::Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "armory").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("session.json"))
}

/// A [`SessionStore`] keeping both entries in one JSON file.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees one entry without the other.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<SessionFile>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file = serde_json::from_str(&json).map_err(|e| StorageError::Corrupt {
            message: format!("{}: {}", self.path.display(), e),
        })?;
        Ok(Some(file))
    }

    fn write(&self, file: &SessionFile) -> Result<()> {
        let json = serde_json::to_vec_pretty(file).map_err(|e| StorageError::Corrupt {
            message: e.to_string(),
        })?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut out = options.open(&tmp)?;
        out.write_all(&json)?;
        out.sync_all()?;
        drop(out);

        // The mode above only applies to newly created files.
        #[cfg(unix)]
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;

        fs::rename(&tmp, &self.path)?;
        trace!(path = %self.path.display(), "Wrote session file");
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        match self.read()? {
            Some(file) => StoredSession::from_entries(file.token, file.user),
            None => Ok(None),
        }
    }

    fn save(&self, token: &CredentialToken, profile: &UserProfile) -> Result<()> {
        let (token, user) = StoredSession::to_entries(token, profile)?;
        self.write(&SessionFile {
            token: Some(token),
            user: Some(user),
            saved_at: Utc::now(),
        })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Removed session file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
