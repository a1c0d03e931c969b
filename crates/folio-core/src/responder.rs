//! Reply selection: fixed variant tables per topic, templated from the
//! knowledge store at construction time, plus the structured fallback for
//! unclassified input.
//!
//! Variant selection is uniformly random and memoryless; repetition across
//! consecutive calls is allowed. The random source is injected so tests can
//! pin outcomes.

use crate::knowledge::KnowledgeStore;
use crate::topic::{Topic, TopicMatch};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

/// Example questions suggested in the structured fallback. Mirrors the chat
/// widget's suggestion chips verbatim.
const SUGGESTED_QUESTIONS: &[&str] = &[
    "What are your skills?",
    "Show me your projects",
    "What's your GitHub?",
    "LinkedIn profile?",
];

/// Canned answers for common off-domain question families. Consulted only
/// when the bridge is unavailable or failed, before the generic fallback.
const OFF_DOMAIN_HINTS: &[(&[&str], &str)] = &[
    (
        &["weather"],
        "I can't provide real-time weather information, but for current conditions try weather.com or your local weather service.",
    ),
    (
        &["joke", "funny"],
        "I'm focused on being helpful rather than entertaining, but I can recommend some great comedy podcasts or shows! What would you like help with?",
    ),
    (
        &["math", "calculate"],
        "For mathematical calculations, I'd recommend a calculator app or a site like Wolfram Alpha. I'm better at questions about this portfolio.",
    ),
    (
        &["recipe", "cooking"],
        "I can't provide recipes, but great cooking sites like AllRecipes or Food Network can. What would you like to cook?",
    ),
    (
        &["movie", "film"],
        "I can't make movie recommendations, but IMDb or Rotten Tomatoes are good places to look. What genre are you interested in?",
    ),
];

/// Picks reply text for a resolved topic. Immutable after construction.
pub struct Responder {
    variants: HashMap<Topic, Vec<String>>,
    projects_context: String,
    skills_context: String,
    name: String,
    knowledge: Arc<KnowledgeStore>,
}

impl Responder {
    /// Builds all variant tables, interpolating facts from `knowledge` so that
    /// every fact-bearing reply embeds the same literal values on every call.
    pub fn new(knowledge: Arc<KnowledgeStore>) -> Self {
        let name = knowledge.fact_text("name");
        let github = knowledge.fact_text("github_url");
        let linkedin = knowledge.fact_text("linkedin_url");
        let email = knowledge.fact_text("email");
        let education = knowledge.fact_text("education");

        let mut variants: HashMap<Topic, Vec<String>> = HashMap::new();

        variants.insert(Topic::Greeting, vec![
            format!("Hello! I'm here to help you learn more about {name}'s portfolio. What would you like to know?"),
            format!("Hi there! I'm excited to tell you about {name}'s work and experience. What interests you?"),
            format!("Hey! I'm your guide to {name}'s portfolio. Ask me anything about his projects, skills, or background!"),
            format!("Welcome! I'm here to answer your questions about {name}'s development journey. What would you like to explore?"),
        ]);

        variants.insert(Topic::Skills, vec![
            format!("{name} is a skilled Full Stack Developer with expertise in React, Next.js, Node.js, TypeScript, Docker, and Cybersecurity. He's also proficient with Tailwind CSS, modern web tools, and has a strong foundation in both frontend and backend development."),
            format!("{name}'s technical arsenal includes the React ecosystem, Next.js for full-stack development, Node.js backends, TypeScript for type safety, Docker for containerization, and specialized knowledge in Cybersecurity."),
            format!("As a Full Stack Developer, {name} masters React, Next.js, Node.js, TypeScript, and Docker. His combination of web development skills and Cybersecurity expertise makes him versatile in building secure, scalable applications."),
            format!("{name} brings together modern web technologies like React, Next.js, Node.js, and TypeScript with DevOps practices using Docker. His Cybersecurity background adds an extra layer of security awareness to all his projects."),
        ]);

        variants.insert(Topic::Projects, vec![
            format!("{name} has built several projects including a Weather App with real-time data, a Blog Site with modern CMS features, and this Portfolio showcasing his skills. Each demonstrates a different aspect of his technical abilities."),
            format!("{name}'s project portfolio includes a Weather App that showcases API integration and real-time updates, a Blog Site demonstrating content management capabilities, and this Portfolio built with Next.js and Tailwind CSS. He's always working on new ideas!"),
            format!("From a Weather App with dynamic data handling to a Blog Site with modern architecture, {name}'s projects showcase his full-stack capabilities. This Portfolio itself is a testament to his design and development skills."),
            format!("{name}'s projects range from practical applications like a Weather App to content platforms like a Blog Site. Each is crafted to demonstrate specific technical skills and user experience principles."),
        ]);

        variants.insert(Topic::Github, vec![
            format!("You can explore {name}'s code and contributions at {github}. His repositories showcase his coding style, project organization, and commitment to clean, maintainable code."),
            format!("Check out {name}'s GitHub profile at {github} to see his active development work, project contributions, and coding practices."),
            format!("Visit {github} to see {name}'s latest projects, code samples, and development activity."),
            format!("{name}'s GitHub at {github} is where you'll find his latest work, project updates, and contributions to the developer community."),
        ]);

        variants.insert(Topic::Linkedin, vec![
            format!("Connect with {name} on LinkedIn at {linkedin}. His profile showcases his professional journey, skills, and network in the tech industry."),
            format!("{name}'s LinkedIn profile at {linkedin} is where you can learn about his professional experience and connect for opportunities."),
            format!("Find {name} on LinkedIn: {linkedin}. His profile highlights his Full Stack Development and Cybersecurity expertise."),
            format!("Visit {linkedin} to connect with {name} professionally."),
        ]);

        variants.insert(Topic::Experience, vec![
            format!("{name} is a Full Stack Web Developer & Cybersecurity Specialist with hands-on experience building modern web applications. He combines technical expertise with security best practices."),
            format!("With a background in both web development and Cybersecurity, {name} brings a unique perspective to his projects. He's experienced in building scalable applications while maintaining security standards."),
            format!("{name}'s experience spans the full development stack, from React frontends to Node.js backends, with a specialized focus on Cybersecurity."),
            format!("As a Full Stack Developer, {name} has experience across the entire development lifecycle. His Cybersecurity expertise ensures that security is built into every project from the ground up."),
        ]);

        variants.insert(Topic::Contact, vec![
            format!("You can reach {name} through LinkedIn at {linkedin} or explore his work on GitHub at {github}. He's always open to connecting with fellow developers and potential collaborators!"),
            format!("Connect with {name} on LinkedIn ({linkedin}) for professional networking, or check out his code on GitHub ({github})."),
            format!("{name} is accessible through LinkedIn at {linkedin}, by email at {email}, and shares his development work on GitHub at {github}. Feel free to reach out!"),
            format!("For professional connections, find {name} on LinkedIn: {linkedin}. For his technical work, visit his GitHub: {github}. He's always interested in new opportunities!"),
        ]);

        variants.insert(Topic::About, vec![
            format!("{name} is a passionate developer who loves building modern web applications and exploring Cybersecurity. He's constantly learning new technologies and looking for ways to improve his craft."),
            format!("A dedicated Full Stack Developer with a Cybersecurity mindset, {name} enjoys the challenge of building applications that are both powerful and secure."),
            format!("{name} combines creativity with technical expertise, building applications that solve real problems while maintaining high security standards."),
            format!("As a developer, {name} is driven by the challenge of creating elegant solutions to complex problems. His Cybersecurity background gives him a unique perspective on building applications users can trust."),
        ]);

        variants.insert(Topic::Resume, vec![
            format!("{name}'s CV is available in the portfolio and provides detailed information about his experience, education, and technical skills."),
            format!("You can download {name}'s CV from the portfolio to get a complete picture of his professional experience, technical skills, and educational background. It's regularly updated."),
            format!("{name}'s resume is accessible through the portfolio and showcases his professional journey, technical expertise, and career progression."),
        ]);

        variants.insert(Topic::Help, vec![
            format!("I'm the assistant for {name}'s portfolio! I can tell you about his skills, projects, experience, GitHub, LinkedIn, and more. Just ask me anything specific or try one of the suggested questions."),
            format!("I can help you learn about {name}'s technical skills, project portfolio, professional experience, GitHub contributions, and LinkedIn profile. What specific area interests you?"),
        ]);

        variants.insert(Topic::Security, vec![
            format!("Security is a core part of {name}'s work: as a Cybersecurity Specialist he builds web applications with security baked in from the start, from input validation to secure deployment practices."),
            format!("{name} pairs full-stack development with Cybersecurity expertise, so every project is designed with web application security in mind rather than bolted on afterwards."),
        ]);

        variants.insert(Topic::Education, vec![
            format!("{name} holds a {education}, with coursework in Data Structures, Algorithms, Web Development, and Database Systems."),
            format!("{name}'s formal background is a {education}; beyond that he is constantly learning new frameworks and security techniques."),
        ]);

        variants.insert(Topic::Process, vec![
            format!("{name} works iteratively in an Agile/Scrum style: small increments, code reviews, CI/CD with Docker, and security checks built into the workflow."),
            format!("{name}'s approach combines modern development practice (version control, code review, continuous delivery) with a security-first mindset from his Cybersecurity background."),
        ]);

        variants.insert(Topic::Future, vec![
            format!("{name} is currently focused on building scalable, secure web applications, learning new technologies, and contributing to open source."),
            format!("Looking ahead, {name} plans to keep deepening his full-stack and Cybersecurity expertise while contributing to open source projects and growing his professional network."),
        ]);

        let projects_context = format!(
            "Based on our conversation, it sounds like you're interested in {name}'s work. Would you like to know more about his specific projects, or would you prefer to explore his GitHub to see his code in action?"
        );
        let skills_context = format!(
            "Since we've been discussing technical topics, would you like me to elaborate on any specific skills or technologies that {name} uses? I can provide detailed information about his tech stack and expertise areas."
        );

        Self {
            variants,
            projects_context,
            skills_context,
            name,
            knowledge,
        }
    }

    /// Selects reply text with the thread-local random source.
    pub fn respond(&self, matched: TopicMatch, raw_input: &str) -> String {
        self.respond_with(matched, raw_input, &mut rand::thread_rng())
    }

    /// Selects reply text with an injected random source. Logging here is
    /// observability only and never affects the returned text.
    pub fn respond_with<R: Rng>(&self, matched: TopicMatch, raw_input: &str, rng: &mut R) -> String {
        tracing::debug!(
            target: "folio::responder",
            topic = matched.topic.label(),
            contextual = matched.contextual,
            input = raw_input,
            "resolved reply topic"
        );
        if matched.contextual {
            return match matched.topic {
                Topic::Skills => self.skills_context.clone(),
                _ => self.projects_context.clone(),
            };
        }
        if matched.topic == Topic::Unknown {
            return self.unknown_fallback(raw_input);
        }
        self.variants
            .get(&matched.topic)
            .and_then(|set| set.choose(rng))
            .cloned()
            .unwrap_or_else(|| self.unknown_fallback(raw_input))
    }

    /// Structured fallback for unclassified input: echoes the question, embeds
    /// any knowledge chunks that literally match it, lists what the assistant
    /// can answer, and suggests example questions. Fixed template pieces, no
    /// randomization.
    pub fn unknown_fallback(&self, raw_input: &str) -> String {
        let question = raw_input.trim();
        let mut reply = format!(
            "That's an interesting question! I'm focused on {name}'s portfolio, so I don't have a good answer for \"{question}\".\n\n",
            name = self.name,
        );
        let context = self.knowledge.context_for(question);
        if !context.is_empty() {
            reply.push_str(&format!("Here's what I found in the portfolio:\n\n{context}\n\n"));
        }
        let suggestions = SUGGESTED_QUESTIONS
            .iter()
            .map(|q| format!("- \"{q}\""))
            .collect::<Vec<_>>()
            .join("\n");
        reply.push_str(&format!(
            "I can tell you about:\n\
             - Technical skills and technologies\n\
             - Projects and work experience\n\
             - GitHub and LinkedIn profiles\n\
             - How to get in touch\n\n\
             Try asking:\n{suggestions}"
        ));
        reply
    }

    /// Canned answer for common off-domain question families (weather, jokes,
    /// math, recipes, movies). `None` when the input matches no family.
    pub fn off_domain_hint(&self, raw_input: &str) -> Option<String> {
        let input = raw_input.trim().to_lowercase();
        OFF_DOMAIN_HINTS
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| input.contains(n)))
            .map(|(_, hint)| hint.to_string())
    }

    /// The variant set for a topic (empty for `Unknown`). Exposed for tests
    /// and the status endpoint.
    pub fn variant_set(&self, topic: Topic) -> &[String] {
        self.variants.get(&topic).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn responder() -> Responder {
        Responder::new(Arc::new(KnowledgeStore::portfolio_default()))
    }

    #[test]
    fn every_topic_has_variants() {
        let r = responder();
        for topic in Topic::all() {
            if topic == Topic::Unknown {
                continue;
            }
            assert!(
                !r.variant_set(topic).is_empty(),
                "topic {} has no reply variants",
                topic.label()
            );
        }
    }

    #[test]
    fn replies_are_members_of_the_variant_set() {
        let r = responder();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let reply = r.respond_with(TopicMatch::plain(Topic::Github), "github", &mut rng);
            assert!(r.variant_set(Topic::Github).contains(&reply));
        }
    }

    #[test]
    fn repeated_calls_eventually_vary() {
        let r = responder();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            seen.insert(r.respond_with(TopicMatch::plain(Topic::Greeting), "hi", &mut rng));
        }
        assert!(seen.len() > 1, "50 samples produced a single variant");
    }

    #[test]
    fn pinned_rng_is_deterministic() {
        let r = responder();
        let a = r.respond_with(
            TopicMatch::plain(Topic::Skills),
            "skills",
            &mut StdRng::seed_from_u64(3),
        );
        let b = r.respond_with(
            TopicMatch::plain(Topic::Skills),
            "skills",
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn fact_bearing_replies_embed_identical_literals() {
        let r = responder();
        for reply in r.variant_set(Topic::Github) {
            assert!(reply.contains("https://github.com/mohamadchalhoub"));
        }
        for reply in r.variant_set(Topic::Linkedin) {
            assert!(reply.contains("https://www.linkedin.com/in/mohamadchalhoub"));
        }
    }

    #[test]
    fn unknown_fallback_echoes_question_and_suggestions() {
        let r = responder();
        let reply = r.unknown_fallback("what is the meaning of life?");
        assert!(reply.contains("\"what is the meaning of life?\""));
        assert!(reply.contains("Technical skills"));
        for q in SUGGESTED_QUESTIONS {
            assert!(reply.contains(q), "missing suggestion {q:?}");
        }
    }

    #[test]
    fn contextual_matches_use_fixed_context_strings() {
        let r = responder();
        let mut rng = StdRng::seed_from_u64(0);
        let projects = r.respond_with(TopicMatch::contextual(Topic::Projects), "and?", &mut rng);
        assert!(projects.contains("interested in Mohamad's work"));
        let skills = r.respond_with(TopicMatch::contextual(Topic::Skills), "and?", &mut rng);
        assert!(skills.contains("technical topics"));
    }

    #[test]
    fn unknown_fallback_embeds_matching_knowledge_chunks() {
        let r = responder();
        let reply = r.unknown_fallback("docker");
        assert!(reply.contains("DevOps: Docker"), "got: {reply}");
    }

    #[test]
    fn off_domain_hints_cover_known_families_only() {
        let r = responder();
        assert!(r.off_domain_hint("what's the weather today?").is_some());
        assert!(r.off_domain_hint("tell me a joke").is_some());
        assert!(r.off_domain_hint("what is the meaning of life?").is_none());
    }
}
