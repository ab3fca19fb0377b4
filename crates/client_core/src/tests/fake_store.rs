//! In-memory [`DocumentStore`] that applies the same clauses the hosted
//! store would.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shared::{
    domain::{Expense, ExpenseDraft, ExpenseId},
    error::{RemoteOperation, RemoteOperationFailed},
    protocol::{QueryClause, QueryDescriptor},
};

use crate::DocumentStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Create(ExpenseDraft),
    List(Option<Vec<QueryClause>>),
}

#[derive(Default)]
pub struct FakeStore {
    documents: Mutex<Vec<Expense>>,
    calls: Mutex<Vec<RecordedCall>>,
    fail_creates: Mutex<Option<String>>,
    fail_lists: Mutex<Option<String>>,
}

impl FakeStore {
    pub fn with_drafts(drafts: &[ExpenseDraft]) -> Self {
        let store = Self::default();
        {
            let mut documents = store.documents.lock().expect("documents");
            for draft in drafts {
                let expense = store.materialize(documents.len(), draft);
                documents.push(expense);
            }
        }
        store
    }

    pub fn fail_creates_with(&self, message: &str) {
        *self.fail_creates.lock().expect("flag") = Some(message.to_string());
    }

    pub fn fail_lists_with(&self, message: &str) {
        *self.fail_lists.lock().expect("flag") = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls").clone()
    }

    fn materialize(&self, index: usize, draft: &ExpenseDraft) -> Expense {
        let base: DateTime<Utc> = "2024-01-01T09:00:00Z".parse().expect("base timestamp");
        Expense {
            id: ExpenseId(format!("doc-{index}")),
            description: draft.description.clone(),
            amount: draft.amount.clone(),
            category: draft.category.clone(),
            created_at: base + Duration::minutes(index as i64),
        }
    }
}

fn amount_key(expense: &Expense) -> f64 {
    expense.amount.parse().unwrap_or(0.0)
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<Expense, RemoteOperationFailed> {
        self.calls
            .lock()
            .expect("calls")
            .push(RecordedCall::Create(draft.clone()));
        if let Some(message) = self.fail_creates.lock().expect("flag").clone() {
            return Err(RemoteOperationFailed::new(RemoteOperation::Create, message));
        }

        let mut documents = self.documents.lock().expect("documents");
        let expense = self.materialize(documents.len(), draft);
        documents.push(expense.clone());
        Ok(expense)
    }

    async fn list_expenses(
        &self,
        query: Option<&QueryDescriptor>,
    ) -> Result<Vec<Expense>, RemoteOperationFailed> {
        let clauses = query.map(QueryDescriptor::clauses);
        self.calls
            .lock()
            .expect("calls")
            .push(RecordedCall::List(clauses.clone()));
        if let Some(message) = self.fail_lists.lock().expect("flag").clone() {
            return Err(RemoteOperationFailed::new(
                RemoteOperation::ListExpenses,
                message,
            ));
        }

        let mut documents = self.documents.lock().expect("documents").clone();
        for clause in clauses.unwrap_or_default() {
            match clause {
                QueryClause::Equal { attribute, values } if attribute == "category" => {
                    documents.retain(|expense| values.contains(&expense.category));
                }
                QueryClause::OrderAsc { attribute } if attribute == "amount" => {
                    documents.sort_by(|a, b| amount_key(a).total_cmp(&amount_key(b)));
                }
                QueryClause::OrderDesc { attribute } if attribute == "amount" => {
                    documents.sort_by(|a, b| amount_key(b).total_cmp(&amount_key(a)));
                }
                QueryClause::OrderAsc { .. } => documents.sort_by_key(|e| e.created_at),
                QueryClause::OrderDesc { .. } => {
                    documents.sort_by_key(|e| std::cmp::Reverse(e.created_at))
                }
                QueryClause::Equal { .. } => {}
            }
        }
        Ok(documents)
    }
}
