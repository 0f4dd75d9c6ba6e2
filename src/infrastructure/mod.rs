//! Adapters implementing the domain ports with static data and in-memory
//! state.

pub mod ids;
pub mod in_memory;
pub mod policy;
pub mod prices;
pub mod screening;
