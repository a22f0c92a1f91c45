use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use datenight_config::PathManager;
use datenight_core::SnapshotManager;
use std::fs;

pub async fn run_clear(all: bool, snapshot: bool, credentials: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();

    if all {
        clear_snapshot(&path_manager, output)?;
        clear_credentials(&path_manager, output)?;
        output.success("Snapshot and credentials cleared");
        return Ok(());
    }

    if snapshot {
        clear_snapshot(&path_manager, output)?;
    }
    if credentials {
        clear_credentials(&path_manager, output)?;
    }

    if !snapshot && !credentials {
        output.warn("No clear option specified. Use --snapshot, --credentials, or --all");
        output.info("\nExample: datenight clear --snapshot");
    }

    Ok(())
}

fn clear_snapshot(path_manager: &PathManager, output: &Output) -> Result<()> {
    let manager = SnapshotManager::new(path_manager);
    if !manager.exists() {
        output.info("No snapshot found to clear");
        return Ok(());
    }

    manager
        .clear()
        .map_err(|e| eyre!("Failed to remove snapshot at {}: {}", manager.dir().display(), e))?;
    output.success(format!("Cleared snapshot: {}", manager.dir().display()));
    Ok(())
}

fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file)
            .map_err(|e| eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e))?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}
