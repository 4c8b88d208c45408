//! Node identity bootstrap: the node's config directory and its persistent key.
//!
//! The key lives at `<root>/config/node_key.json` as hex-encoded secret and public keys.
//! The directory is created with mode `0700` and the key file with `0600` on unix.

use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use rand::{thread_rng, RngCore};
use secp256k1::{PublicKey, SecretKey, SECP256K1};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const CONFIG_DIR: &str = "config";
pub const NODE_KEY_FILE: &str = "node_key.json";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to create config directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("node key io at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed node key file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid node key: {0}")]
    InvalidKey(String),

    #[error("stored public key does not match the secret key")]
    KeyMismatch,
}

/// The node's long-lived secp256k1 identity key.
#[derive(Clone, PartialEq, Eq)]
pub struct NodeKey {
    secret: SecretKey,
    public: PublicKey,
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl NodeKey {
    /// Generates a fresh random key.
    pub fn generate() -> Self {
        let mut rng = thread_rng();
        let mut bytes = Zeroizing::new([0u8; 32]);
        loop {
            rng.fill_bytes(&mut *bytes);
            // out-of-range scalars are astronomically rare; just draw again
            if let Ok(secret) = SecretKey::from_slice(&*bytes) {
                return Self::from_secret(secret);
            }
        }
    }

    pub fn from_secret(secret: SecretKey) -> Self {
        let public = PublicKey::from_secret_key(SECP256K1, &secret);
        Self { secret, public }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Hex-encoded compressed public key, used as the node's id.
    pub fn id(&self) -> String {
        hex::encode(self.public.serialize())
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }
}

#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct NodeKeyFile {
    secret_key: String,
    public_key: String,
}

impl NodeKeyFile {
    fn from_key(key: &NodeKey) -> Self {
        Self {
            secret_key: hex::encode(key.secret.secret_bytes()),
            public_key: hex::encode(key.public.serialize()),
        }
    }

    fn into_key(self) -> Result<NodeKey, IdentityError> {
        let secret_bytes = Zeroizing::new(
            hex::decode(&self.secret_key)
                .map_err(|e| IdentityError::InvalidKey(format!("secret key hex: {e}")))?,
        );
        let secret = SecretKey::from_slice(&secret_bytes)
            .map_err(|e| IdentityError::InvalidKey(format!("secret key: {e}")))?;

        let public_bytes = hex::decode(&self.public_key)
            .map_err(|e| IdentityError::InvalidKey(format!("public key hex: {e}")))?;
        let public = PublicKey::from_slice(&public_bytes)
            .map_err(|e| IdentityError::InvalidKey(format!("public key: {e}")))?;

        let key = NodeKey::from_secret(secret);
        if key.public != public {
            return Err(IdentityError::KeyMismatch);
        }
        Ok(key)
    }
}

/// Creates `<root>/config` and loads or generates the node key inside it.
pub fn init_files(root: &Path) -> Result<NodeKey, IdentityError> {
    let config_dir = root.join(CONFIG_DIR);
    create_private_dir(&config_dir).map_err(|source| IdentityError::CreateDir {
        path: config_dir.clone(),
        source,
    })?;

    load_or_gen_node_key(&config_dir)
}

/// Loads the node key from `config_dir`, generating and persisting one if absent.
pub fn load_or_gen_node_key(config_dir: &Path) -> Result<NodeKey, IdentityError> {
    let path = config_dir.join(NODE_KEY_FILE);
    let io_err = |source| IdentityError::Io {
        path: path.clone(),
        source,
    };

    match fs::read_to_string(&path) {
        Ok(contents) => {
            let contents = Zeroizing::new(contents);
            let file: NodeKeyFile = serde_json::from_str(&contents)?;
            let key = file.into_key()?;
            info!(node_id = %key.id(), "loaded node key");
            Ok(key)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let key = NodeKey::generate();
            let contents = Zeroizing::new(serde_json::to_string_pretty(&NodeKeyFile::from_key(
                &key,
            ))?);
            write_private_file(&path, contents.as_bytes()).map_err(io_err)?;
            info!(node_id = %key.id(), "generated node key");
            Ok(key)
        }
        Err(e) => Err(io_err(e)),
    }
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.create(true).write(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_init_generates_then_reloads_same_key() {
        let root = tempdir().unwrap();

        let first = init_files(root.path()).unwrap();
        let second = init_files(root.path()).unwrap();

        assert_eq!(first, second);
        assert!(root.path().join(CONFIG_DIR).join(NODE_KEY_FILE).is_file());
    }

    #[test]
    fn test_init_creates_nested_root() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a").join("b");

        init_files(&nested).unwrap();

        assert!(nested.join(CONFIG_DIR).is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempdir().unwrap();
        init_files(root.path()).unwrap();

        let config_dir = root.path().join(CONFIG_DIR);
        let dir_mode = fs::metadata(&config_dir).unwrap().permissions().mode();
        let file_mode = fs::metadata(config_dir.join(NODE_KEY_FILE))
            .unwrap()
            .permissions()
            .mode();

        assert_eq!(dir_mode & 0o777, 0o700);
        assert_eq!(file_mode & 0o777, 0o600);
    }

    #[test]
    fn test_mismatched_public_key_is_rejected() {
        let root = tempdir().unwrap();
        let config_dir = root.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();

        let key = NodeKey::generate();
        let other = NodeKey::generate();
        let file = NodeKeyFile {
            secret_key: hex::encode(key.secret_key().secret_bytes()),
            public_key: other.id(),
        };
        fs::write(
            config_dir.join(NODE_KEY_FILE),
            serde_json::to_string(&file).unwrap(),
        )
        .unwrap();

        let err = init_files(root.path()).unwrap_err();
        assert!(matches!(err, IdentityError::KeyMismatch));
    }

    #[test]
    fn test_garbage_key_file_is_rejected() {
        let root = tempdir().unwrap();
        let config_dir = root.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(NODE_KEY_FILE), "not json").unwrap();

        let err = init_files(root.path()).unwrap_err();
        assert!(matches!(err, IdentityError::Malformed(_)));
    }

    #[test]
    fn test_invalid_secret_is_rejected() {
        let root = tempdir().unwrap();
        let config_dir = root.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join(NODE_KEY_FILE),
            r#"{"secret_key":"00","public_key":"00"}"#,
        )
        .unwrap();

        let err = init_files(root.path()).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidKey(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = NodeKey::generate();
        let secret_hex = hex::encode(key.secret_key().secret_bytes());

        let debug = format!("{key:?}");

        assert!(!debug.contains(&secret_hex));
        assert!(debug.contains("NodeKey"));
    }
}
