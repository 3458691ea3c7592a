//! List profiles that have a sync log.

use anyhow::Result;

use crate::store::LogStore;

/// Run the list command.
pub async fn run(store: &LogStore) -> Result<()> {
    let profiles = store.profiles().await?;
    if profiles.is_empty() {
        println!("No sync logs in {}", store.dir().display());
        return Ok(());
    }
    for profile in profiles {
        println!("{}", profile);
    }
    Ok(())
}
