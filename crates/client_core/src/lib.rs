use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::{Expense, ExpenseDraft},
    error::RemoteOperationFailed,
    protocol::QueryDescriptor,
};

pub mod config;
pub mod controller;
pub mod driver;
pub mod store;

pub use config::{load_settings, StoreSettings};
pub use controller::{QueryController, StoreOutcome, StoreRequest};
pub use driver::{execute, settle, spawn_execute, submit_expense};
pub use store::AppwriteStore;

/// The hosted document store holding the expense collection.
///
/// Implementations report every failure as [`RemoteOperationFailed`]; callers
/// log and drop it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document from `draft`, letting the store assign its id and
    /// creation time.
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<Expense, RemoteOperationFailed>;

    /// Lists documents matching `query`, or every visible document when `None`.
    /// Results come back in store order.
    async fn list_expenses(
        &self,
        query: Option<&QueryDescriptor>,
    ) -> Result<Vec<Expense>, RemoteOperationFailed>;
}

#[async_trait]
impl<T> DocumentStore for Arc<T>
where
    T: DocumentStore + ?Sized,
{
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<Expense, RemoteOperationFailed> {
        (**self).create_expense(draft).await
    }

    async fn list_expenses(
        &self,
        query: Option<&QueryDescriptor>,
    ) -> Result<Vec<Expense>, RemoteOperationFailed> {
        (**self).list_expenses(query).await
    }
}

#[cfg(test)]
#[path = "tests/fake_store.rs"]
pub(crate) mod fake_store;
