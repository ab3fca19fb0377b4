//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{QueryController, StoreOutcome, StoreRequest};
use crossbeam_channel::{Sender, TrySendError};
use shared::error::{RemoteOperation, RemoteOperationFailed};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `requests` for the backend worker and returns the ones that could
/// not be queued.
pub fn dispatch_store_requests(
    cmd_tx: &Sender<BackendCommand>,
    requests: Vec<StoreRequest>,
    status: &mut String,
) -> Vec<StoreRequest> {
    let mut undelivered = Vec::new();
    for request in requests {
        let cmd = BackendCommand::Store(request);
        let cmd_name = cmd.name();
        match cmd_tx.try_send(cmd) {
            Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
            Err(TrySendError::Full(BackendCommand::Store(request))) => {
                *status = "UI command queue is full; please retry".to_string();
                undelivered.push(request);
            }
            Err(TrySendError::Disconnected(BackendCommand::Store(request))) => {
                *status = "Backend worker is not running; check the store settings and relaunch"
                    .to_string();
                undelivered.push(request);
            }
        }
    }
    undelivered
}

/// The failure a request that never reached the worker resolves to, so the
/// busy flag still clears.
pub fn undelivered_outcome(request: StoreRequest, reason: &str) -> StoreOutcome {
    let message = format!("request was not queued: {reason}");
    match request {
        StoreRequest::CreateExpense(_) => StoreOutcome::ExpenseCreated(Err(
            RemoteOperationFailed::new(RemoteOperation::Create, message),
        )),
        StoreRequest::ListExpenses(_) => StoreOutcome::ExpensesListed(Err(
            RemoteOperationFailed::new(RemoteOperation::ListExpenses, message),
        )),
        StoreRequest::ScanCategories => StoreOutcome::CategoriesScanned(Err(
            RemoteOperationFailed::new(RemoteOperation::ScanCategories, message),
        )),
    }
}

/// Resolves a list fetch the worker will never answer, such as requests
/// still queued when the worker failed to start.
pub fn abandon_pending_fetch(controller: &mut QueryController, reason: &str) {
    if !controller.is_busy() {
        return;
    }
    let request = StoreRequest::ListExpenses(controller.query_descriptor());
    controller.apply(undelivered_outcome(request, reason));
}
