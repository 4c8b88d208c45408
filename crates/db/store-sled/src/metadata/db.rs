use strata_db_types::{traits::MetadataDatabase, DbResult};

use super::schemas::{MetadataKey, MetadataSchema};
use crate::define_sled_database;

define_sled_database!(
    pub struct MetadataDBSled {
        metadata_tree: MetadataSchema,
    }
);

impl MetadataDatabase for MetadataDBSled {
    fn get_metadata(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        Ok(self.metadata_tree.get(&MetadataKey::from(key))?)
    }

    fn put_metadata(&self, key: &[u8], value: Vec<u8>) -> DbResult<()> {
        let key = MetadataKey::from(key);
        self.config.with_retry("put_metadata", || {
            Ok(self.metadata_tree.insert(&key, &value)?)
        })
    }
}
