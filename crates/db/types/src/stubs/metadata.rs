use std::collections::HashMap;

use parking_lot::Mutex;

use crate::{traits::MetadataDatabase, DbResult};

/// In-memory metadata store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct StubMetadataDb {
    entries: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl StubMetadataDb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataDatabase for StubMetadataDb {
    fn get_metadata(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn put_metadata(&self, key: &[u8], value: Vec<u8>) -> DbResult<()> {
        self.entries.lock().insert(key.to_vec(), value);
        Ok(())
    }
}
