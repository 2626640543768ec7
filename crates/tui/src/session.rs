use std::{collections::BTreeMap, fmt, fs, path::Path};

use crate::{config::AppConfig, error::Result};

/// Key under which the password is cached for the session.
pub const SESSION_KEY: &str = "ADMIN_PASSWORD";

/// The cached password. Never printed, never validated locally.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Trims the input; blank input is not a credential.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Session-scoped key/value storage.
///
/// Without a path it lives as long as the process. With one, it is mirrored
/// to a JSON file so a restart keeps the session.
#[derive(Debug, Default)]
pub struct SessionStore {
    path: Option<String>,
    entries: BTreeMap<String, String>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn open(path: &str) -> Result<Self> {
        let entries = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path: Some(path.to_string()),
            entries,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

/// Decides whether the dashboard is reachable.
#[derive(Debug)]
pub struct SessionGate {
    store: SessionStore,
    credential: Option<Credential>,
}

impl SessionGate {
    pub fn new(store: SessionStore) -> Self {
        let credential = store.get(SESSION_KEY).and_then(Credential::new);
        Self { store, credential }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = match config.session_file.as_deref() {
            Some(path) => SessionStore::open(path)?,
            None => SessionStore::in_memory(),
        };
        Ok(Self::new(store))
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.credential.is_some()
    }

    /// Caches the entered password. Returns `false` (and stays closed) on blank input.
    pub fn login(&mut self, input: &str) -> Result<bool> {
        let Some(credential) = Credential::new(input) else {
            return Ok(false);
        };
        self.store.set(SESSION_KEY, credential.expose())?;
        self.credential = Some(credential);
        tracing::info!("session opened");
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        self.credential = None;
        tracing::info!("session closed");
        Ok(())
    }
}
