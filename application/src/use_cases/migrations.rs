//! Bundled migration steps.
//!
//! | From | To | Name | Change |
//! |------|----|------|--------|
//! | 0 | 1 | `imgur_api_change` | Drop the `Imgur` section; old client IDs stopped working |

use crate::ports::config_store::{ConfigStorePort, StoreError};
use crate::use_cases::migrate_config::{MigrationError, MigrationStep, MigrationTable};
use tracing::warn;

/// The migration table shipped with the tool.
pub fn default_migrations() -> Result<MigrationTable, MigrationError> {
    MigrationTable::new().with_step(MigrationStep::new(
        0,
        1,
        "imgur_api_change",
        imgur_api_change,
    ))
}

/// Remove the `Imgur` section if it still holds a client ID.
pub fn imgur_api_change(store: &mut dyn ConfigStorePort) -> Result<(), StoreError> {
    store.reload()?;
    if store.lookup("Imgur", "client_id").is_miss() {
        warn!("Imgur section already removed");
        return Ok(());
    }
    store.remove_section("Imgur")?;
    Ok(())
}
