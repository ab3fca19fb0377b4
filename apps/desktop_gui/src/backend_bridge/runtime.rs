//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{spawn_execute, AppwriteStore, DocumentStore, StoreSettings};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{classify_startup_failure, UiEvent},
};

/// Starts the worker thread. Each store request runs as its own task, so
/// responses reach the UI in completion order.
pub fn launch(
    settings: anyhow::Result<StoreSettings>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(classify_startup_failure(
                    &format!("failed to build backend runtime: {err}"),
                )));
                return;
            }
        };

        let store: Arc<dyn DocumentStore> = match settings.and_then(|s| AppwriteStore::new(&s)) {
            Ok(store) => {
                tracing::info!(url = %store.documents_url(), "expense store ready");
                Arc::new(store)
            }
            Err(err) => {
                tracing::error!("backend worker startup failure: {err:#}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(classify_startup_failure(
                    &format!("{err:#}"),
                )));
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Connected to expense store".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend: received command");
                match cmd {
                    BackendCommand::Store(request) => {
                        let task = spawn_execute(Arc::clone(&store), request);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match task.await {
                                Ok(outcome) => {
                                    if ui_tx.send(UiEvent::Store(outcome)).is_err() {
                                        tracing::debug!("ui closed before store response arrived");
                                    }
                                }
                                Err(err) => tracing::error!("store request task failed: {err}"),
                            }
                        });
                    }
                }
            }
        });
    });
}
