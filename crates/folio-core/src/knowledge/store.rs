//! In-memory knowledge store for the portfolio subject.
//!
//! Constructed once at process start and never mutated. Two views of the same
//! data: named facts (`fact("github_url")`) for templated replies, and a flat
//! text block segmented into paragraphs for literal lookup when the bridge
//! needs grounding context. There is no embedding search here; chunk retrieval
//! is substring containment plus a coarse word-overlap score.

use std::collections::HashMap;

/// Paragraph chunks returned per query, most relevant first.
const MAX_CHUNKS: usize = 3;

/// Minimum word-overlap score for a chunk to count as relevant.
const RELEVANCE_THRESHOLD: f32 = 0.3;

/// Flat knowledge text about the portfolio subject, segmented into paragraphs
/// by blank lines. Kept in sync with the facts table below.
const PORTFOLIO_KNOWLEDGE: &str = "\
# Mohamad Chalhoub - Portfolio Knowledge Base

## Personal Information
- Name: Mohamad Chalhoub
- Email: chalhoubmohd@gmail.com
- Location: Lebanon
- Role: Full Stack Developer & Cybersecurity Specialist

## Technical Skills
- Frontend: React, Next.js, TypeScript, JavaScript, HTML, CSS, Tailwind CSS
- Backend: Node.js, Express.js, Python, Django, Flask
- Database: MongoDB, PostgreSQL, MySQL, Redis
- DevOps: Docker, AWS, Vercel, Netlify, CI/CD
- Tools: Git, GitHub, VS Code, Postman, Figma
- Other: REST APIs, GraphQL, Microservices, Agile/Scrum

## Projects
- Weather App: real-time data, API integration, dynamic updates
- Blog Site: modern CMS features, content management
- Portfolio Website: Next.js and Tailwind CSS, dark/light theme, contact form

## Work Experience
- Full Stack Developer at Tech Company (2022-Present): developed and maintained web applications, collaborated with cross-functional teams
- Junior Developer at Startup (2021-2022): built responsive user interfaces, integrated third-party APIs, participated in code reviews

## Education
- Bachelor's Degree in Computer Science
- Relevant coursework: Data Structures, Algorithms, Web Development, Database Systems

## Contact Information
- GitHub: https://github.com/mohamadchalhoub
- LinkedIn: https://www.linkedin.com/in/mohamadchalhoub
- Email: chalhoubmohd@gmail.com
- Portfolio: mohamadchalhoub.com

## Current Focus
- Building scalable, secure web applications
- Learning new technologies and frameworks
- Contributing to open source projects
- Networking with other developers";

/// A fact value: a single literal or an ordered list of literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactValue {
    Text(String),
    List(Vec<String>),
}

impl FactValue {
    /// The literal for `Text`, or the list joined with ", " for `List`.
    pub fn as_text(&self) -> String {
        match self {
            FactValue::Text(s) => s.clone(),
            FactValue::List(items) => items.join(", "),
        }
    }
}

/// Immutable fact table and paragraph chunks; safe for unsynchronized
/// concurrent reads.
pub struct KnowledgeStore {
    facts: HashMap<&'static str, FactValue>,
    chunks: Vec<String>,
}

impl KnowledgeStore {
    /// Builds the store for the portfolio subject. Called once at startup.
    pub fn portfolio_default() -> Self {
        let mut facts: HashMap<&'static str, FactValue> = HashMap::new();
        facts.insert("name", FactValue::Text("Mohamad".to_string()));
        facts.insert("full_name", FactValue::Text("Mohamad Chalhoub".to_string()));
        facts.insert(
            "role",
            FactValue::Text("Full Stack Web Developer & Cybersecurity Specialist".to_string()),
        );
        facts.insert("location", FactValue::Text("Lebanon".to_string()));
        facts.insert(
            "email",
            FactValue::Text("chalhoubmohd@gmail.com".to_string()),
        );
        facts.insert(
            "github_url",
            FactValue::Text("https://github.com/mohamadchalhoub".to_string()),
        );
        facts.insert(
            "linkedin_url",
            FactValue::Text("https://www.linkedin.com/in/mohamadchalhoub".to_string()),
        );
        facts.insert(
            "portfolio_url",
            FactValue::Text("mohamadchalhoub.com".to_string()),
        );
        facts.insert(
            "skills.frontend",
            FactValue::List(
                ["React", "Next.js", "TypeScript", "JavaScript", "HTML", "CSS", "Tailwind CSS"]
                    .map(String::from)
                    .to_vec(),
            ),
        );
        facts.insert(
            "skills.backend",
            FactValue::List(
                ["Node.js", "Express.js", "Python", "Django", "Flask"]
                    .map(String::from)
                    .to_vec(),
            ),
        );
        facts.insert(
            "skills.database",
            FactValue::List(
                ["MongoDB", "PostgreSQL", "MySQL", "Redis"].map(String::from).to_vec(),
            ),
        );
        facts.insert(
            "skills.devops",
            FactValue::List(
                ["Docker", "AWS", "Vercel", "Netlify", "CI/CD"].map(String::from).to_vec(),
            ),
        );
        facts.insert(
            "skills.tools",
            FactValue::List(
                ["Git", "GitHub", "VS Code", "Postman", "Figma"].map(String::from).to_vec(),
            ),
        );
        facts.insert(
            "projects",
            FactValue::List(
                ["Weather App", "Blog Site", "Portfolio Website"].map(String::from).to_vec(),
            ),
        );
        facts.insert(
            "education",
            FactValue::Text("Bachelor's Degree in Computer Science".to_string()),
        );
        facts.insert(
            "focus",
            FactValue::List(
                [
                    "building scalable, secure web applications",
                    "learning new technologies and frameworks",
                    "contributing to open source projects",
                ]
                .map(String::from)
                .to_vec(),
            ),
        );

        let chunks = PORTFOLIO_KNOWLEDGE
            .split("\n\n")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        Self { facts, chunks }
    }

    /// Returns the fact for `name`, if present.
    pub fn fact(&self, name: &str) -> Option<&FactValue> {
        self.facts.get(name)
    }

    /// The fact rendered as text. Empty string when the fact does not exist;
    /// templated replies are built at construction time, so a miss there is a
    /// programmer error caught by tests.
    pub fn fact_text(&self, name: &str) -> String {
        self.fact(name).map(|f| f.as_text()).unwrap_or_default()
    }

    /// Paragraph chunks relevant to `query`: literal containment first, then a
    /// coarse word-overlap score. At most [`MAX_CHUNKS`], in document order.
    pub fn relevant_chunks(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.chunks
            .iter()
            .filter(|chunk| {
                let lower = chunk.to_lowercase();
                lower.contains(&query) || relevance(&query, &lower) > RELEVANCE_THRESHOLD
            })
            .take(MAX_CHUNKS)
            .map(String::as_str)
            .collect()
    }

    /// Relevant chunks joined into one context block for the bridge prompt.
    pub fn context_for(&self, query: &str) -> String {
        self.relevant_chunks(query).join("\n\n")
    }
}

/// Share of query words (length > 2) that appear in the text, by mutual
/// containment. Mirrors the original coarse matcher rather than anything
/// linguistically principled.
fn relevance(query: &str, text: &str) -> f32 {
    let query_words: Vec<&str> = query.split(' ').filter(|w| w.len() > 2).collect();
    if query_words.is_empty() {
        return 0.0;
    }
    let text_words: Vec<&str> = text.split_whitespace().filter(|w| w.len() > 2).collect();
    let matches = query_words
        .iter()
        .filter(|qw| text_words.iter().any(|tw| tw.contains(*qw) || qw.contains(tw)))
        .count();
    matches as f32 / query_words.len() as f32
}
