use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use datenight_api::AppState;
use datenight_config::{Config, CredentialStore, PathManager};
use datenight_core::{ContentCatalog, MemoryStore, SnapshotManager};
use datenight_sources::ProviderFactoryRegistry;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn run_serve(host: Option<String>, port: Option<u16>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let credentials_file = path_manager.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let providers = ProviderFactoryRegistry::new()
        .create_all_providers(&config, &credentials)
        .map_err(|e| eyre!("Failed to set up metadata providers: {}", e))?;
    let catalog = ContentCatalog::new(providers);
    if catalog.provider_names().is_empty() {
        output.warn("No metadata provider configured, serving the sample catalog only");
        output.info("Add a key with 'datenight config api-key --provider omdb' or set OMDB_API_KEY / TMDB_API_KEY");
    } else {
        info!(providers = ?catalog.provider_names(), "Metadata providers ready");
    }

    let snapshots = config.storage.snapshot.then(|| SnapshotManager::new(&path_manager));
    let store = match &snapshots {
        Some(manager) => {
            let snapshot = manager
                .load()
                .map_err(|e| eyre!("Failed to load snapshot from {}: {}", manager.dir().display(), e))?;
            info!(
                sessions = snapshot.sessions.len(),
                wishlist = snapshot.wishlist.len(),
                photos = snapshot.photos.len(),
                "Loaded snapshot"
            );
            MemoryStore::from_snapshot(snapshot)
        }
        None => MemoryStore::new(),
    };
    let store = Arc::new(store);

    let state = AppState::in_memory(store.clone(), catalog, config.participants.default_users.clone());
    let listener = datenight_api::bind(&config.bind_address())
        .await
        .map_err(|e| eyre!("{}", e))?;
    let addr = listener.local_addr().wrap_err("Listener has no local address")?;
    output.success(format!("Serving API on http://{}", addr));

    datenight_api::serve(listener, state, shutdown_signal())
        .await
        .map_err(|e| eyre!("{}", e))?;

    if let Some(manager) = snapshots {
        let snapshot = store.snapshot().await;
        manager
            .save(&snapshot)
            .map_err(|e| eyre!("Failed to save snapshot to {}: {}", manager.dir().display(), e))?;
        output.success(format!("Snapshot saved to {}", manager.dir().display()));
    }

    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM (what `docker stop` sends)
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(sigterm) => return wait_for_signal(sigterm).await,
            Err(e) => warn!("Failed to install SIGTERM handler: {}", e),
        }
    }

    ctrl_c().await;
    info!("Received Ctrl-C, shutting down");
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_signal(mut sigterm: tokio::signal::unix::Signal) {
    tokio::select! {
        _ = ctrl_c() => info!("Received Ctrl-C, shutting down"),
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::signal::unix::{signal, SignalKind};

    #[tokio::test]
    async fn test_sigterm_resolves_shutdown() {
        let sigterm = signal(SignalKind::terminate()).unwrap();
        let waiter = tokio::spawn(wait_for_signal(sigterm));

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("shutdown future should resolve after SIGTERM")
            .unwrap();
    }
}
