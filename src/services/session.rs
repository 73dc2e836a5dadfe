//! Persisted login session
//!
//! Stands in for the browser's logged-in cookie: one JSON file in the config
//! directory, read under a shared lock and replaced atomically under an
//! exclusive lock.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::config::project_dirs;
use crate::types::{DishhubError, Result, Session};

const SESSION_FILE: &str = "session.json";

pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new() -> Result<Self> {
        let dirs = project_dirs()
            .ok_or_else(|| DishhubError::Session("Cannot determine config directory".into()))?;
        Ok(Self {
            dir: dirs.config_dir().to_path_buf(),
        })
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Current session, `None` when logged out
    pub fn load(&self) -> Result<Option<Session>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()
            .map_err(|e| DishhubError::Session(format!("Failed to acquire read lock: {}", e)))?;

        let mut content = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut content);
        let _ = file.unlock();
        read?;

        let session = serde_json::from_str(&content)
            .map_err(|e| DishhubError::Session(format!("Corrupted session file: {}", e)))?;
        Ok(Some(session))
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }

    /// Save using atomic write (temp file + rename) with exclusive lock
    pub fn save(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let content = serde_json::to_string_pretty(session)
            .map_err(|e| DishhubError::Session(format!("Serialization failed: {}", e)))?;

        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        {
            let mut file = File::create(&temp_path)
                .map_err(|e| DishhubError::Session(format!("Failed to create temp file: {}", e)))?;
            file.write_all(content.as_bytes())
                .map_err(|e| DishhubError::Session(format!("Failed to write temp file: {}", e)))?;
            file.sync_all()
                .map_err(|e| DishhubError::Session(format!("Failed to sync temp file: {}", e)))?;
        }

        let target = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        target
            .lock_exclusive()
            .map_err(|e| DishhubError::Session(format!("Failed to acquire write lock: {}", e)))?;

        fs::rename(&temp_path, &path)
            .map_err(|e| DishhubError::Session(format!("Failed to rename temp file: {}", e)))?;

        let _ = target.unlock();
        Ok(())
    }

    /// Remove the session; returns whether one existed
    pub fn clear(&self) -> Result<bool> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
