mod store;

pub use store::MemoryDocumentStore;
