//! Record entry: utilization derivation and the submission gate.

pub mod calculator;
pub mod validator;

pub use calculator::{compute_utilization, EntryForm, EntrySnapshot, UtilizationMode};
