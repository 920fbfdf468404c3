//! Context module - Knowledge base similarity search
//!
//! ## KnowledgeStore trait
//!
//! The `KnowledgeStore` trait abstracts the similarity-search collaborator so
//! different backends can be swapped (static bag-of-words KB, NoOp, or a
//! remote vector database).

pub mod vector_db;
pub mod knowledge_store;

pub use vector_db::{seed_documents, VectorIndex};
pub use knowledge_store::{KnowledgeStore, NoOpStore, StaticKnowledgeBase};
