//! Static portfolio knowledge: named facts plus a paragraph-segmented text block.

mod store;

pub use store::{FactValue, KnowledgeStore};
