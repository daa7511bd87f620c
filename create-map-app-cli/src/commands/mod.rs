//! CLI command implementations

mod add_search;
mod check;
mod update;

pub use add_search::AddSearchCommand;
pub use check::CheckCommand;
pub use update::UpdateCommand;
