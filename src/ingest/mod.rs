/// Input parsing for the business statistics service.
///
/// Submodules:
/// - `table` — delimited text → header + rows, with typed cell accessors.
/// - `fixtures` (test only) — representative dataset exports.
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;

pub use table::{LoadError, Row, Table};
