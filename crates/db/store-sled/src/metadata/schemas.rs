use crate::{define_table_without_codec, impl_bytes_key_codec, impl_bytes_value_codec};

/// Raw metadata key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MetadataKey(Vec<u8>);

impl MetadataKey {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for MetadataKey {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for MetadataKey {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

define_table_without_codec!(
    /// A table to store node-local metadata entries by well-known key.
    (MetadataSchema) MetadataKey => Vec<u8>
);

impl_bytes_key_codec!(MetadataSchema, MetadataKey);
impl_bytes_value_codec!(MetadataSchema);
