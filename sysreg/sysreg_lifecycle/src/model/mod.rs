//! Static transition tables.

mod table;

pub use table::TransitionTable;
