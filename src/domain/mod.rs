//! Domain layer: payroll entities, value objects and the ports the
//! application layer depends on.

pub mod money;
pub mod payee;
pub mod ports;
pub mod quote;
pub mod run;
