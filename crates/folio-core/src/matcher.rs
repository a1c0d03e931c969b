//! Keyword matcher: maps a raw user message to a [`TopicMatch`].
//!
//! Pass order is fixed and load-bearing for behavioral compatibility:
//!   1. exact-match table (whole message equals a key)
//!   2. substring containment, topics consulted in a fixed priority order
//!   3. greeting tokens
//!   4. help / capability phrasing
//!   5. recency-window context fallback
//!   6. unknown
//!
//! In pass 2 the first matching topic wins even when a later topic's keyword is
//! also present and arguably more specific. That trade-off is intentional and
//! preserved; see DESIGN.md before "fixing" it.

use crate::topic::{Topic, TopicMatch};
use std::collections::VecDeque;
use std::time::Instant;

/// Maximum inputs retained per session for the context fallback.
pub const RECENCY_CAPACITY: usize = 5;

/// Whole-message keys checked before any substring rule.
const EXACT_KEYS: &[(&str, Topic)] = &[
    ("github", Topic::Github),
    ("git", Topic::Github),
    ("code", Topic::Github),
    ("linkedin", Topic::Linkedin),
    ("profile", Topic::Linkedin),
    ("projects", Topic::Projects),
    ("project", Topic::Projects),
    ("work", Topic::Projects),
    ("skills", Topic::Skills),
    ("skill", Topic::Skills),
    ("technology", Topic::Skills),
    ("tech", Topic::Skills),
    ("experience", Topic::Experience),
    ("background", Topic::Experience),
    ("work experience", Topic::Experience),
    ("contact", Topic::Contact),
    ("email", Topic::Contact),
    ("reach", Topic::Contact),
    ("about", Topic::About),
    ("who", Topic::About),
    ("resume", Topic::Resume),
    ("cv", Topic::Resume),
    ("curriculum vitae", Topic::Resume),
];

/// Substring rules in priority order. Earlier entries win over later ones.
const SUBSTRING_RULES: &[(Topic, &[&str])] = &[
    (Topic::Projects, &["project", "build", "create", "develop"]),
    (Topic::Skills, &["skill", "technology", "tech", "learn", "know"]),
    (Topic::Linkedin, &["linkedin", "profile", "connect", "network"]),
    (Topic::Github, &["github", "code", "repository", "source"]),
    (Topic::Experience, &["experience", "work", "job", "career"]),
    (Topic::Contact, &["contact", "email", "reach", "message"]),
    (Topic::About, &["about", "who", "tell me about"]),
    (Topic::Resume, &["resume", "cv", "curriculum vitae"]),
    (Topic::Security, &["security", "cybersecurity", "secure", "pentest", "vulnerability"]),
    (Topic::Education, &["education", "degree", "university", "studied", "study"]),
    (Topic::Process, &["process", "workflow", "methodology", "approach", "agile"]),
    (Topic::Future, &["future", "goal", "plan", "aspiration", "roadmap"]),
];

const GREETING_TOKENS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];

const HELP_TOKENS: &[&str] = &["help", "what can you do", "capabilities", "assist"];

/// Bounded FIFO of recent normalized inputs for one session. Oldest evicted
/// first once [`RECENCY_CAPACITY`] is reached. Used only to bias the fallback
/// reply; never correctness-critical.
#[derive(Debug)]
pub struct RecencyWindow {
    entries: VecDeque<String>,
    touched: Instant,
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyWindow {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(RECENCY_CAPACITY),
            touched: Instant::now(),
        }
    }

    /// Appends the normalized form of `input`, evicting the oldest entry when full.
    pub fn push(&mut self, input: &str) {
        if self.entries.len() == RECENCY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(input.trim().to_lowercase());
        self.touched = Instant::now();
    }

    /// When this window last recorded an input. Drives idle-session eviction.
    pub fn last_touched(&self) -> Instant {
        self.touched
    }

    /// Snapshot of the retained inputs, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stateless classifier. Normalization is lowercase + trim only; internal
/// punctuation is kept because phrase keys rely on spacing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Classifies `raw` given the session's previous inputs (`recent`, oldest
    /// first). Never fails; unclassifiable input is the `Unknown` outcome.
    pub fn classify(&self, raw: &str, recent: &[String]) -> TopicMatch {
        let input = raw.trim().to_lowercase();
        if input.is_empty() {
            return TopicMatch::plain(Topic::Unknown);
        }

        for (key, topic) in EXACT_KEYS {
            if input == *key {
                return TopicMatch::plain(*topic);
            }
        }

        for (topic, needles) in SUBSTRING_RULES {
            if needles.iter().any(|n| input.contains(n)) {
                return TopicMatch::plain(*topic);
            }
        }

        if GREETING_TOKENS.iter().any(|t| input.contains(t)) {
            return TopicMatch::plain(Topic::Greeting);
        }

        if HELP_TOKENS.iter().any(|t| input.contains(t)) {
            return TopicMatch::plain(Topic::Help);
        }
        // Capability question ("what can/do you ...") without a help token.
        if input.contains("what") && (input.contains("can") || input.contains("do")) {
            return TopicMatch::plain(Topic::Help);
        }

        let context = recent.join(" ");
        if context.contains("project") || context.contains("work") {
            return TopicMatch::contextual(Topic::Projects);
        }
        if context.contains("skill") || context.contains("technology") {
            return TopicMatch::contextual(Topic::Skills);
        }

        TopicMatch::plain(Topic::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(input: &str) -> TopicMatch {
        Matcher::new().classify(input, &[])
    }

    #[test]
    fn exact_keys_match_all_case_variants() {
        for (key, topic) in EXACT_KEYS {
            assert_eq!(classify(key).topic, *topic, "key {key:?}");
            assert_eq!(classify(&key.to_uppercase()).topic, *topic, "upper {key:?}");
            let padded = format!("  {}  ", key);
            assert_eq!(classify(&padded).topic, *topic, "padded {key:?}");
        }
    }

    #[test]
    fn exact_pass_short_circuits_substring_rules() {
        // "work" contains no projects substring but is an exact projects key;
        // as a bare message it must not fall through to the experience rule.
        assert_eq!(classify("work").topic, Topic::Projects);
        assert_eq!(classify("WORK").topic, Topic::Projects);
    }

    #[test]
    fn priority_order_earlier_topic_wins() {
        // Contains both a projects keyword and a github keyword; projects is
        // earlier in the priority order regardless of lexical position.
        assert_eq!(classify("tell me about your github project").topic, Topic::Projects);
        // Skills outranks github as well.
        assert_eq!(classify("what tech is on your github").topic, Topic::Skills);
        // Github only matches once no earlier topic keyword is present.
        assert_eq!(classify("where is your github").topic, Topic::Github);
    }

    #[test]
    fn substring_rules_match_inside_sentences() {
        assert_eq!(classify("can I see what you are building?").topic, Topic::Projects);
        assert_eq!(classify("how do I reach you?").topic, Topic::Contact);
        assert_eq!(classify("where did you study?").topic, Topic::Education);
        assert_eq!(classify("is your site secure?").topic, Topic::Security);
        assert_eq!(classify("what is your methodology?").topic, Topic::Process);
        assert_eq!(classify("any future goals?").topic, Topic::Future);
    }

    #[test]
    fn greeting_tokens_detected() {
        assert_eq!(classify("hello there").topic, Topic::Greeting);
        assert_eq!(classify("Good Morning!").topic, Topic::Greeting);
    }

    #[test]
    fn help_and_capability_phrasing() {
        assert_eq!(classify("please assist me").topic, Topic::Help);
        assert_eq!(classify("what can you do").topic, Topic::Help);
        // Capability question without an explicit help token.
        assert_eq!(classify("what do you offer").topic, Topic::Help);
    }

    #[test]
    fn empty_and_punctuation_only_are_unknown() {
        assert_eq!(classify("").topic, Topic::Unknown);
        assert_eq!(classify("   ").topic, Topic::Unknown);
        assert_eq!(classify("?!...").topic, Topic::Unknown);
    }

    #[test]
    fn context_fallback_biases_projects() {
        let matcher = Matcher::new();
        let recent = vec![
            "show me your projects".to_string(),
            "nice project indeed".to_string(),
        ];
        let m = matcher.classify("hmm, more please", &recent);
        assert_eq!(m.topic, Topic::Projects);
        assert!(m.contextual);
    }

    #[test]
    fn context_fallback_biases_skills() {
        let matcher = Matcher::new();
        let recent = vec!["your skill set is broad".to_string()];
        let m = matcher.classify("hmm, more please", &recent);
        assert_eq!(m.topic, Topic::Skills);
        assert!(m.contextual);
    }

    #[test]
    fn no_context_means_unknown() {
        let matcher = Matcher::new();
        let m = matcher.classify("hmm, more please", &[]);
        assert_eq!(m.topic, Topic::Unknown);
        assert!(!m.contextual);
    }

    #[test]
    fn recency_window_evicts_oldest_first() {
        let mut window = RecencyWindow::new();
        for i in 0..7 {
            window.push(&format!("message {i}"));
        }
        let snapshot = window.snapshot();
        assert_eq!(snapshot.len(), RECENCY_CAPACITY);
        assert_eq!(snapshot.first().unwrap(), "message 2");
        assert_eq!(snapshot.last().unwrap(), "message 6");
    }

    #[test]
    fn recency_window_normalizes_entries() {
        let mut window = RecencyWindow::new();
        window.push("  My PROJECT  ");
        assert_eq!(window.snapshot(), vec!["my project".to_string()]);
    }
}
