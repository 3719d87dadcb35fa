//! Reference implementations of the persistence collaborator.

pub mod memory;

pub use memory::InMemoryExpenseStore;
