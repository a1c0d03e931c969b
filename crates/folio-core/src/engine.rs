//! Entry point: composes Matcher → Responder → (Bridge fallback).

use crate::bridge::GenerativeBridge;
use crate::knowledge::KnowledgeStore;
use crate::matcher::{Matcher, RecencyWindow};
use crate::responder::Responder;
use crate::topic::Topic;
use dashmap::DashMap;
use std::sync::Arc;

/// Session key used when the caller does not supply one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Boundary rejection text for an absent or empty message.
pub const NO_MESSAGE_REPLY: &str = "No message provided.";

/// Fixed apology for any unhandled internal failure. Users never see a raw
/// error, stack trace, or empty body.
pub const APOLOGY_REPLY: &str = "I'm experiencing some technical difficulties right now. \
     Please try again in a moment, or feel free to explore the portfolio directly!";

/// Note appended to off-domain answers, bridged or rule-based, so they stay
/// framed as a portfolio assistant.
const GENERAL_REPLY_NOTE: &str = "Note: I'm primarily designed to help with questions about \
     this portfolio. For more detailed general assistance, consider a general-purpose assistant.";

/// Cap on concurrently retained session windows. Session IDs are
/// client-supplied and unauthenticated, so the key space is unbounded; past
/// the cap the oldest-idle session is dropped. Losing a window only weakens
/// the context fallback for that session.
const MAX_SESSIONS: usize = 512;

/// Stateless-per-call reply engine. The only state surviving between calls is
/// the bounded per-session recency window; everything else is immutable and
/// safe for unsynchronized concurrent reads.
pub struct ReplyEngine {
    matcher: Matcher,
    responder: Responder,
    bridge: Option<Arc<dyn GenerativeBridge>>,
    sessions: DashMap<String, RecencyWindow>,
}

impl ReplyEngine {
    /// `bridge` is `None` when no credential is configured; the engine then
    /// never attempts network I/O.
    pub fn new(knowledge: Arc<KnowledgeStore>, bridge: Option<Arc<dyn GenerativeBridge>>) -> Self {
        Self {
            matcher: Matcher::new(),
            responder: Responder::new(knowledge),
            bridge,
            sessions: DashMap::new(),
        }
    }

    /// Whether a live bridge is wired in (for the status endpoint).
    pub fn bridge_available(&self) -> bool {
        self.bridge.is_some()
    }

    pub fn bridge_name(&self) -> Option<&str> {
        self.bridge.as_deref().map(|b| b.name())
    }

    /// Produces a reply for `raw`. Never fails: bridge errors and anything
    /// else internal degrade to fallback text. Empty input is expected to be
    /// rejected at the HTTP boundary; if it reaches here it resolves to the
    /// unknown fallback.
    pub async fn reply(&self, session_id: &str, raw: &str) -> String {
        let recent = self
            .sessions
            .get(session_id)
            .map(|w| w.snapshot())
            .unwrap_or_default();
        let matched = self.matcher.classify(raw, &recent);
        tracing::debug!(
            target: "folio::engine",
            session = session_id,
            topic = matched.topic.label(),
            contextual = matched.contextual,
            "classified message"
        );

        // The window holds previous inputs at classification time; the current
        // one is recorded for the next turn. Entry locking gives the
        // single-writer-per-session discipline.
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .push(raw);
        self.evict_idle_sessions(session_id);

        if matched.topic != Topic::Unknown {
            return self.responder.respond(matched, raw);
        }

        if let Some(bridge) = &self.bridge {
            match bridge.generate(raw).await {
                Ok(text) if !text.trim().is_empty() => {
                    return format!("{}\n\n{}", text.trim(), GENERAL_REPLY_NOTE);
                }
                Ok(_) => {
                    tracing::warn!(
                        target: "folio::bridge",
                        bridge = bridge.name(),
                        "bridge returned empty text; using fallback"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        target: "folio::bridge",
                        bridge = bridge.name(),
                        error = %e,
                        "bridge call failed; using fallback"
                    );
                }
            }
        }

        if let Some(hint) = self.responder.off_domain_hint(raw) {
            return format!("{hint}\n\n{GENERAL_REPLY_NOTE}");
        }
        self.responder.respond(matched, raw)
    }

    /// Drops oldest-idle sessions until the map is back under [`MAX_SESSIONS`].
    /// The session being served is never the eviction victim.
    fn evict_idle_sessions(&self, current: &str) {
        while self.sessions.len() > MAX_SESSIONS {
            let oldest = self
                .sessions
                .iter()
                .filter(|entry| entry.key() != current)
                .min_by_key(|entry| entry.value().last_touched())
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    self.sessions.remove(&key);
                }
                None => break,
            }
        }
    }
}
