pub mod memory;

pub use memory::InMemoryUserStore;
