//! One module per monitor, each an `impl Vahti` block: a checking method
//! returning a typed report, and a `run_*` wrapper that turns the report
//! (or any collaborator failure) into at most one delivered alert.

mod backlog;
mod current_day;
mod disk;
mod previous_day;

/// Shared tail of the actionable alert messages.
pub(crate) const FIX_ASAP: &str = "Investigate and fix the problem as soon as possible.";
