//! Performance scoring engine.
//!
//! Scores are a pure function of an employee's terminal tasks: the sum of
//! completed score values minus a weighted sum of failed ones, floored at
//! zero. The engine also ranks employees, aggregates team figures, and
//! owns the leave-score penalty path.
//!
//! - Value types and arithmetic in [`domain`]
//! - Orchestration in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
