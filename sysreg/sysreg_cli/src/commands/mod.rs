pub mod check;
pub mod rule;
pub mod transition;
