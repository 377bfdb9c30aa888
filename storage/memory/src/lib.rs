mod engine;
mod transaction;

pub use engine::MemoryStore;
pub use transaction::MemoryTransaction;
