//! Executes controller requests against a [`DocumentStore`].

use std::sync::Arc;

use futures::{stream::FuturesUnordered, StreamExt};
use shared::{
    domain::Expense,
    error::{RemoteOperation, RemoteOperationFailed},
};
use tokio::task::JoinHandle;

use crate::{
    controller::{QueryController, StoreOutcome, StoreRequest},
    DocumentStore,
};

/// Issues one store call for `request`.
pub async fn execute<S>(store: &S, request: StoreRequest) -> StoreOutcome
where
    S: DocumentStore + ?Sized,
{
    tracing::debug!(request = request.name(), "dispatching store request");
    match request {
        StoreRequest::CreateExpense(draft) => {
            StoreOutcome::ExpenseCreated(store.create_expense(&draft).await)
        }
        StoreRequest::ListExpenses(query) => {
            StoreOutcome::ExpensesListed(store.list_expenses(Some(&query)).await)
        }
        StoreRequest::ScanCategories => StoreOutcome::CategoriesScanned(
            store.list_expenses(None).await.map_err(|mut err| {
                err.operation = RemoteOperation::ScanCategories;
                err
            }),
        ),
    }
}

/// Runs `request` on the current tokio runtime.
pub fn spawn_execute(
    store: Arc<dyn DocumentStore>,
    request: StoreRequest,
) -> JoinHandle<StoreOutcome> {
    tokio::spawn(async move { execute(store.as_ref(), request).await })
}

/// Dispatches `requests` concurrently and applies each outcome as it lands,
/// including any follow-up requests, until nothing is in flight.
pub async fn settle<S>(controller: &mut QueryController, store: &S, requests: Vec<StoreRequest>)
where
    S: DocumentStore + ?Sized,
{
    let mut in_flight: FuturesUnordered<_> = requests
        .into_iter()
        .map(|request| execute(store, request))
        .collect();

    while let Some(outcome) = in_flight.next().await {
        for follow_up in controller.apply(outcome) {
            in_flight.push(execute(store, follow_up));
        }
    }
}

/// Submits the pending draft, settles the refresh it triggers and returns
/// the store's answer to the create itself.
pub async fn submit_expense<S>(
    controller: &mut QueryController,
    store: &S,
) -> Result<Expense, RemoteOperationFailed>
where
    S: DocumentStore + ?Sized,
{
    let outcome = execute(store, controller.submit()).await;
    let created = match &outcome {
        StoreOutcome::ExpenseCreated(result) => result.clone(),
        _ => Err(RemoteOperationFailed::new(
            RemoteOperation::Create,
            "store answered a create with another response",
        )),
    };
    let follow_up = controller.apply(outcome);
    settle(controller, store, follow_up).await;
    created
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
