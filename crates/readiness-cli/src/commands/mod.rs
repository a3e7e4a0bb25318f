pub mod init;
pub mod results;
pub mod score;
pub mod take;
pub mod validate;

use anyhow::Result;

use readiness_core::traits::RecordStore;
use readiness_store::config::load_config_from;
use readiness_store::pack::PackStore;
use readiness_store::{create_store, ReadinessConfig};

use crate::StoreArgs;

/// Open the store named by the arguments: an explicit pack, a named store,
/// or the config's default store.
///
/// A missing `--pack` or `--config` file and an unknown store name are
/// errors. A configured store that cannot be opened is logged and returned
/// as `None`, so commands can render their no-data states.
pub fn open_store(
    args: &StoreArgs,
) -> Result<(Option<Box<dyn RecordStore>>, ReadinessConfig)> {
    let config = load_config_from(args.config.as_deref())?;
    if let Some(path) = &args.pack {
        let store: Box<dyn RecordStore> = Box::new(PackStore::from_path(path)?);
        return Ok((Some(store), config));
    }

    let store_config = config.store_config(args.store.as_deref())?;
    let store = match create_store(store_config) {
        Ok(store) => {
            tracing::debug!(store = store.name(), "opened store");
            Some(store)
        }
        Err(e) => {
            tracing::error!("error opening store {store_config:?}: {e:#}");
            None
        }
    };
    Ok((store, config))
}
