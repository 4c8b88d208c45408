//! Wires the DA includer from the node config.

use std::{future::Future, sync::Arc};

use anyhow::Context;
use strata_common::logging::{self, LoggingInitConfig};
use strata_config::Config;
use strata_da_includer::{
    init_da_included_state, DaIncluderBuilder, DaIncluderHandle, FinalitySink, InclusionOracle,
    MonotonicFinalitySink,
};
use strata_db_store_sled::{open_sled_database, MetadataDBSled, SledDbConfig, SLED_NAME};
use strata_db_types::traits::MetadataDatabase;
use tokio_util::sync::CancellationToken;

const SERVICE_NAME: &str = "strata-node";

/// Installs the global tracing subscriber described by the `[logging]` section.
pub fn init_logging(config: &Config) {
    logging::init_logging_from_config(LoggingInitConfig {
        service_base_name: SERVICE_NAME,
        service_label: config.logging.service_label.as_deref(),
        log_dir: config.logging.log_dir.as_ref(),
        log_file_prefix: config.logging.log_file_prefix.as_deref(),
        json_format: config.logging.json_format,
        default_log_prefix: SERVICE_NAME,
    });
}

/// Opens the node's sled metadata store under `client.datadir`.
pub fn open_metadata_db(config: &Config) -> anyhow::Result<Arc<MetadataDBSled>> {
    let sled_db = open_sled_database(&config.client.datadir, SLED_NAME)?;
    let db_config = SledDbConfig::new_with_constant_backoff(
        config.client.db_retry_count,
        config.client.db_retry_delay_ms,
    );
    let db = MetadataDBSled::new(sled_db, db_config).context("opening metadata db")?;
    Ok(Arc::new(db))
}

/// Loads the persisted DA-included height and builds the includer.
///
/// Finality passed to `finality` only moves forward, starting from the loaded height.
/// The returned task must be spawned as a critical task; it panics if the height state
/// is found to be corrupt while running.
pub fn start_da_includer<TDb, TOracle, TSink>(
    config: &Config,
    db: Arc<TDb>,
    oracle: Arc<TOracle>,
    finality: TSink,
    cancel: CancellationToken,
) -> anyhow::Result<(DaIncluderHandle, impl Future<Output = ()>)>
where
    TDb: MetadataDatabase,
    TOracle: InclusionOracle,
    TSink: FinalitySink,
{
    let state = init_da_included_state(db, config.da_includer.base_height())
        .context("loading DA-included height")?;
    let finality = Arc::new(MonotonicFinalitySink::with_finalized(finality, state.get()));

    Ok(DaIncluderBuilder::new(state, oracle, finality)
        .with_cancellation(cancel)
        .build())
}

#[cfg(test)]
mod tests {
    use std::{path::Path, time::Duration};

    use mockall::predicate::eq;
    use strata_config::{ClientConfig, DaIncluderConfig};
    use strata_da_includer::{
        encode_height, MockFinalitySink, MockInclusionOracle, DA_INCLUDED_HEIGHT_KEY,
    };
    use tempfile::tempdir;

    use super::*;

    fn config_in(datadir: &Path, initial_height: u64) -> Config {
        Config {
            client: ClientConfig {
                datadir: datadir.to_path_buf(),
                db_retry_count: 1,
                db_retry_delay_ms: 10,
            },
            da_includer: DaIncluderConfig {
                initial_height,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_open_metadata_db_creates_store() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), 1);

        let db = open_metadata_db(&config).unwrap();
        db.put_metadata(b"k", vec![1]).unwrap();

        assert!(dir.path().join("sled").join(SLED_NAME).is_dir());
        assert_eq!(db.get_metadata(b"k").unwrap(), Some(vec![1]));
    }

    #[tokio::test]
    async fn test_start_da_includer_persists_progress() {
        // Scenario: fresh datadir with initial height 5; blocks 5 and 6 are DA included
        // Expected: base height 4, then 6 after a trigger, persisted to sled
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), 5);
        let db = open_metadata_db(&config).unwrap();

        let mut oracle = MockInclusionOracle::new();
        oracle
            .expect_is_da_included()
            .returning(|height| Ok(height <= 6));
        let mut sink = MockFinalitySink::new();
        for h in [5, 6] {
            sink.expect_set_final()
                .with(eq(h))
                .times(1)
                .returning(|_| Ok(()));
        }
        let cancel = CancellationToken::new();

        let (handle, task) =
            start_da_includer(&config, db.clone(), Arc::new(oracle), sink, cancel.clone())
                .unwrap();
        assert_eq!(handle.reader().get(), 4);

        let task = tokio::spawn(task);
        let mut watcher = handle.height_watcher();
        handle.trigger().notify();
        tokio::time::timeout(Duration::from_secs(5), watcher.wait_for(|h| *h == 6))
            .await
            .expect("height published")
            .unwrap();

        cancel.cancel();
        task.await.unwrap();

        assert_eq!(
            db.get_metadata(DA_INCLUDED_HEIGHT_KEY).unwrap(),
            Some(encode_height(6).to_vec())
        );
    }

    #[test]
    fn test_start_da_includer_rejects_corrupt_record() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), 1);
        let db = open_metadata_db(&config).unwrap();
        db.put_metadata(DA_INCLUDED_HEIGHT_KEY, vec![1, 2]).unwrap();

        let res = start_da_includer(
            &config,
            db,
            Arc::new(MockInclusionOracle::new()),
            MockFinalitySink::new(),
            CancellationToken::new(),
        );

        assert!(res.is_err());
    }
}
