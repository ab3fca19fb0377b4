//! Expense form view model: filter/sort selection, pending form fields and
//! the last snapshot fetched from the store.
//!
//! Every state change that needs fresh data returns the [`StoreRequest`]s to
//! issue; responses are fed back through [`QueryController::apply`].

use shared::{
    domain::{distinct_categories, Expense, ExpenseDraft, SortPreset},
    error::RemoteOperationFailed,
    protocol::QueryDescriptor,
};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    CreateExpense(ExpenseDraft),
    ListExpenses(QueryDescriptor),
    /// Unfiltered listing used to derive the category selector.
    ScanCategories,
}

impl StoreRequest {
    pub fn name(&self) -> &'static str {
        match self {
            StoreRequest::CreateExpense(_) => "create_expense",
            StoreRequest::ListExpenses(_) => "list_expenses",
            StoreRequest::ScanCategories => "scan_categories",
        }
    }
}

#[derive(Debug, Clone)]
pub enum StoreOutcome {
    ExpenseCreated(Result<Expense, RemoteOperationFailed>),
    ExpensesListed(Result<Vec<Expense>, RemoteOperationFailed>),
    CategoriesScanned(Result<Vec<Expense>, RemoteOperationFailed>),
}

#[derive(Debug, Default)]
pub struct QueryController {
    sort_preset: SortPreset,
    category_filter: String,
    draft: ExpenseDraft,
    busy: bool,
    expenses: Vec<Expense>,
    categories: Vec<String>,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a selection other than the default; [`Self::mount`] then
    /// loads against it.
    pub fn with_selection(sort_preset: SortPreset, category_filter: impl Into<String>) -> Self {
        Self {
            sort_preset,
            category_filter: category_filter.into(),
            ..Self::default()
        }
    }

    /// Initial load against the default selection.
    pub fn mount(&mut self) -> Vec<StoreRequest> {
        vec![self.fetch_expenses(), self.fetch_categories()]
    }

    pub fn sort_preset(&self) -> SortPreset {
        self.sort_preset
    }

    pub fn category_filter(&self) -> &str {
        &self.category_filter
    }

    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.draft.amount = amount.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.draft.category = category.into();
    }

    pub fn query_descriptor(&self) -> QueryDescriptor {
        QueryDescriptor::new(self.sort_preset, &self.category_filter)
    }

    /// Sends the form as typed. Nothing guards against a second submit while
    /// the first is still in flight.
    pub fn submit(&mut self) -> StoreRequest {
        debug!(
            description = %self.draft.description,
            amount = %self.draft.amount,
            category = %self.draft.category,
            "submitting expense"
        );
        StoreRequest::CreateExpense(self.draft.clone())
    }

    pub fn select_sort_preset(&mut self, preset: SortPreset) -> Vec<StoreRequest> {
        if self.sort_preset == preset {
            return Vec::new();
        }
        self.sort_preset = preset;
        vec![self.fetch_expenses()]
    }

    /// An empty `category` clears the filter.
    pub fn select_category_filter(&mut self, category: impl Into<String>) -> Vec<StoreRequest> {
        let category = category.into();
        if self.category_filter == category {
            return Vec::new();
        }
        self.category_filter = category;
        vec![self.fetch_expenses(), self.fetch_categories()]
    }

    /// Marks the list as loading and builds the request for the active
    /// selection.
    pub fn fetch_expenses(&mut self) -> StoreRequest {
        self.busy = true;
        StoreRequest::ListExpenses(self.query_descriptor())
    }

    /// The category set is always derived from every record, whatever the
    /// active filter.
    pub fn fetch_categories(&self) -> StoreRequest {
        StoreRequest::ScanCategories
    }

    /// Folds a store response into state and returns any follow-up requests.
    ///
    /// Responses are applied in arrival order, so a slow stale response can
    /// replace a fresher one.
    pub fn apply(&mut self, outcome: StoreOutcome) -> Vec<StoreRequest> {
        match outcome {
            StoreOutcome::ExpenseCreated(Ok(expense)) => {
                info!(id = %expense.id, "expense created");
                self.draft.clear();
                vec![self.fetch_expenses(), self.fetch_categories()]
            }
            StoreOutcome::ExpenseCreated(Err(err)) => {
                error!("{err}");
                Vec::new()
            }
            StoreOutcome::ExpensesListed(result) => {
                self.busy = false;
                match result {
                    Ok(expenses) => {
                        debug!(count = expenses.len(), "expense list refreshed");
                        self.expenses = expenses;
                    }
                    Err(err) => error!("{err}"),
                }
                Vec::new()
            }
            StoreOutcome::CategoriesScanned(Ok(expenses)) => {
                self.categories = distinct_categories(&expenses);
                debug!(count = self.categories.len(), "category set rebuilt");
                Vec::new()
            }
            StoreOutcome::CategoriesScanned(Err(err)) => {
                error!("{err}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
