//! Expectation grammar parsing and operator evaluation.

mod eval;
mod op;

pub use eval::{evaluate, parse_number, Evaluation, Verdict};
pub use op::{Expectation, Operator};
