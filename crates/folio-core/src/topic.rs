//! Closed set of conversation topics the engine can classify into.

use serde::{Deserialize, Serialize};

/// Category a user message resolves to. Closed set: adding a topic requires
/// adding its keyword rule and its reply variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    Skills,
    Projects,
    Github,
    Linkedin,
    Experience,
    Contact,
    About,
    Resume,
    Help,
    Security,
    Process,
    Education,
    Future,
    Unknown,
}

impl Topic {
    /// Snake_case label, used for diagnostics and the status endpoint.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Greeting => "greeting",
            Topic::Skills => "skills",
            Topic::Projects => "projects",
            Topic::Github => "github",
            Topic::Linkedin => "linkedin",
            Topic::Experience => "experience",
            Topic::Contact => "contact",
            Topic::About => "about",
            Topic::Resume => "resume",
            Topic::Help => "help",
            Topic::Security => "security",
            Topic::Process => "process",
            Topic::Education => "education",
            Topic::Future => "future",
            Topic::Unknown => "unknown",
        }
    }

    /// All topics in declaration order.
    pub fn all() -> [Topic; 15] {
        [
            Topic::Greeting,
            Topic::Skills,
            Topic::Projects,
            Topic::Github,
            Topic::Linkedin,
            Topic::Experience,
            Topic::Contact,
            Topic::About,
            Topic::Resume,
            Topic::Help,
            Topic::Security,
            Topic::Process,
            Topic::Education,
            Topic::Future,
            Topic::Unknown,
        ]
    }
}

/// Result of classification. `contextual` marks the recency-window-biased
/// sub-case of `Projects`/`Skills`: same topic, different reply string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicMatch {
    pub topic: Topic,
    pub contextual: bool,
}

impl TopicMatch {
    pub fn plain(topic: Topic) -> Self {
        Self {
            topic,
            contextual: false,
        }
    }

    pub fn contextual(topic: Topic) -> Self {
        Self {
            topic,
            contextual: true,
        }
    }
}
