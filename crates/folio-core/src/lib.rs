//! folio-core: reply engine for the portfolio chat widget.
//!
//! Composes an immutable [`KnowledgeStore`], a keyword [`Matcher`], a variant-picking
//! [`Responder`], and an optional [`GenerativeBridge`] behind one entry point:
//! [`ReplyEngine::reply`]. The gateway crate owns HTTP transport; everything here is
//! a pure string-in/string-out pipeline with no persistence between calls (other
//! than the bounded per-session recency window).

mod bridge;
mod config;
mod engine;
mod knowledge;
mod matcher;
mod responder;
mod topic;

pub use bridge::{BridgeError, GenerativeBridge};
pub use config::EngineConfig;
pub use engine::{ReplyEngine, APOLOGY_REPLY, DEFAULT_SESSION_ID, NO_MESSAGE_REPLY};
pub use knowledge::{FactValue, KnowledgeStore};
pub use matcher::{Matcher, RecencyWindow, RECENCY_CAPACITY};
pub use responder::Responder;
pub use topic::{Topic, TopicMatch};
