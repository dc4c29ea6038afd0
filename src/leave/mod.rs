//! Leave requests and the transfer of open work they require.
//!
//! An employee files leave; a manager moves the employee's open tasks to a
//! colleague and then approves or rejects. Approving leave whose work was
//! never transferred costs the employee leave score.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The workflow in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
