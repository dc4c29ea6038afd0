//! Workforce: task tracking, performance scoring and leave management.
//!
//! Managers create and assign tasks; employees move them through a
//! validated lifecycle and file progress reports. Completed and failed
//! tasks drive each employee's performance score. Leave requests must
//! hand an employee's open work to a colleague before approval, or the
//! employee's leave score is penalised.
//!
//! # Architecture
//!
//! Every bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and collaborators
//! - **Adapters**: In-memory, `PostgreSQL` and HTTP implementations of ports
//! - **Services**: Orchestration enforcing roles and cross-context rules
//!
//! # Modules
//!
//! - [`identity`]: Caller context and employee/manager profiles
//! - [`task`]: Task lifecycle state machine and status reports
//! - [`scoring`]: Score recomputation, leaderboard and team aggregates
//! - [`leave`]: Leave requests, task transfer and the leave penalty
//! - [`locks`]: Per-employee advisory locks shared by scoring and transfer
//! - [`config`]: Runtime settings and policy knobs
//! - [`error`]: Error classification shared by every service

pub mod config;
pub mod error;
pub mod identity;
pub mod leave;
pub mod locks;
pub mod postgres;
pub mod scoring;
pub mod task;
