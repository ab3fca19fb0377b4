//! UI layer for desktop GUI: the expense tracker window.

pub mod app;

pub use app::ExpenseTrackerApp;
