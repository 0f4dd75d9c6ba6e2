//! Application layer containing the payroll use cases.
//!
//! Quoting and execution are pure, synchronous functions of their inputs.
//! `PayrollService` wires them to the async roster and run-history ports for
//! callers that keep state between requests.

pub mod executor;
pub mod forecast;
pub mod quote;
pub mod service;
