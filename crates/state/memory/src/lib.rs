mod repository;

pub use repository::MemorySignatureRepository;
