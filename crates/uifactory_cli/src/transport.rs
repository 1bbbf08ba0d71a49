use std::fs;
use std::path::{Path, PathBuf};
use uifactory_editor::{PublishTransport, TransportError};
use uifactory_forms::PublishPayload;
use uuid::Uuid;

/// Stores each published form as `<dir>/<id>.json`.
pub struct DirectoryTransport {
    dir: PathBuf,
}

impl DirectoryTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn write(&self, path: &Path, payload: &PublishPayload) -> Result<(), TransportError> {
        let json = serde_json::to_string_pretty(payload).map_err(|e| TransportError(e.to_string()))?;
        fs::create_dir_all(&self.dir).map_err(|e| TransportError(e.to_string()))?;
        fs::write(path, json).map_err(|e| TransportError(e.to_string()))
    }
}

impl PublishTransport for DirectoryTransport {
    fn create(&mut self, payload: &PublishPayload) -> Result<String, TransportError> {
        let id = Uuid::new_v4().to_string();
        let mut payload = payload.clone();
        payload.id = Some(id.clone());
        self.write(&self.path_for(&id), &payload)?;
        Ok(id)
    }

    fn update(&mut self, id: &str, payload: &PublishPayload) -> Result<(), TransportError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(TransportError(format!("no form stored under id {}", id)));
        }
        self.write(&path, payload)
    }
}
