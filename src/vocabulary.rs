use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Classification tables used by keyword categorization, expertise inference
/// and sentiment scoring
///
/// Every table has a built-in default and can be replaced from TOML. Lists
/// missing from a TOML document keep their defaults, so a file can override a
/// single table:
///
/// ```toml
/// skills = ["rust", "embedded", "fpga"]
/// role_tokens = ["founder", "partner"]
///
/// [polarity]
/// superb = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Professional skills, matched by substring in either direction
    pub skills: Vec<String>,
    /// Words that turn a skill match into a role
    pub management_tokens: Vec<String>,
    /// Whole-word technology markers
    pub technology_tokens: HashSet<String>,
    /// Whole-word role titles
    pub role_tokens: HashSet<String>,
    /// Whole-word industry names
    pub industry_tokens: HashSet<String>,
    /// Whole-word company suffixes
    pub company_tokens: HashSet<String>,
    pub stopwords: HashSet<String>,
    /// Verbs and fillers that end a noun-phrase run
    pub phrase_breakers: HashSet<String>,
    /// Word polarity in the range -5..=5
    pub polarity: HashMap<String, f64>,
    /// Words that flip the polarity of the following word
    pub negations: HashSet<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Trimmed, lower-cased entries; blanks would match every term by substring
fn substring_entries(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            skills: strings(DEFAULT_SKILLS),
            management_tokens: strings(&["management", "manager"]),
            technology_tokens: set(&[
                "js", "css", "html", "api", "sdk", "framework", "library", "database", "server",
                "cloud",
            ]),
            role_tokens: set(&[
                "manager", "director", "lead", "senior", "junior", "intern", "ceo", "cto", "cfo",
                "developer", "engineer", "designer",
            ]),
            industry_tokens: set(&[
                "healthcare", "finance", "education", "retail", "manufacturing", "consulting",
                "tech", "startup",
            ]),
            company_tokens: set(&[
                "corp", "inc", "ltd", "llc", "company", "technologies", "solutions", "systems",
            ]),
            stopwords: set(DEFAULT_STOPWORDS),
            phrase_breakers: set(DEFAULT_PHRASE_BREAKERS),
            polarity: DEFAULT_POLARITY
                .iter()
                .map(|(w, s)| (w.to_string(), *s))
                .collect(),
            negations: set(&[
                "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "cannot",
                "dont", "don't", "isnt", "isn't", "wasnt", "wasn't", "cant", "can't", "wont",
                "won't", "didnt", "didn't",
            ]),
        }
    }
}

impl Vocabulary {
    /// Parse a TOML table, falling back to defaults for absent lists
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut vocabulary: Self = toml::from_str(text)?;
        vocabulary.skills = substring_entries(vocabulary.skills);
        vocabulary.management_tokens = substring_entries(vocabulary.management_tokens);
        Ok(vocabulary)
    }

    /// Load a TOML vocabulary file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Polarity of a lower-cased word, 0 when unknown
    pub fn polarity_of(&self, word: &str) -> f64 {
        self.polarity.get(word).copied().unwrap_or(0.0)
    }
}

const DEFAULT_SKILLS: &[&str] = &[
    // Programming and technology
    "javascript", "python", "react", "node", "typescript", "java", "c++", "sql", "mongodb",
    "postgresql", "docker", "kubernetes", "aws", "azure", "gcp", "cloud", "devops", "ci/cd", "git",
    "api", "rest", "graphql", "microservices", "frontend", "backend", "fullstack", "mobile", "ios",
    "android", "flutter", "machine learning", "ai", "data science", "analytics", "blockchain",
    "web3", "crypto",
    // Business and management
    "product management", "project management", "agile", "scrum", "marketing", "sales",
    "business development", "strategy", "consulting", "operations", "finance", "accounting",
    "investment", "venture capital", "fundraising", "startup", "entrepreneur", "leadership",
    "team management",
    // Design and creative
    "ui design", "ux design", "graphic design", "branding", "photoshop", "figma", "sketch",
    "illustration", "animation", "video editing", "content creation",
    // Other professional
    "legal", "law", "compliance", "hr", "recruiting", "education", "research", "writing",
    "editing", "translation", "healthcare", "medicine", "engineering", "architecture",
    "real estate",
];

const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "might", "more", "most", "must", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shall", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve", "very",
    "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "won", "would", "wouldn", "y", "you", "your", "yours", "yourself",
    "yourselves", "also", "yes", "yeah", "ok", "okay", "get", "got", "one", "like", "really",
    "well", "know", "think", "going", "want", "let", "see", "say", "said", "thing", "things",
    "lot", "much", "even", "still", "oh", "hey", "hi",
];

const DEFAULT_PHRASE_BREAKERS: &[&str] = &[
    "need", "needs", "needed", "use", "uses", "using", "used", "work", "works", "working",
    "worked", "build", "builds", "building", "built", "create", "creates", "created", "develop",
    "developed", "make", "makes", "made", "help", "helps", "helped", "try", "trying", "tried",
    "looking", "look", "looks", "sounds", "seems", "feel", "hope", "thanks", "thank", "please",
    "sure", "good", "great", "new", "done", "go", "goes", "come", "take", "give", "tell", "told",
    "ask", "asked", "call", "meet", "start", "started", "finished", "happy", "glad", "cool",
    "awesome", "love", "lol", "haha", "expert", "experienced", "skilled", "familiar", "via",
];

const DEFAULT_POLARITY: &[(&str, f64)] = &[
    ("good", 3.0), ("great", 3.0), ("excellent", 3.0), ("awesome", 4.0), ("amazing", 4.0),
    ("fantastic", 4.0), ("wonderful", 4.0), ("love", 3.0), ("loved", 3.0), ("loves", 3.0),
    ("like", 2.0), ("liked", 2.0), ("nice", 3.0), ("happy", 3.0), ("glad", 3.0),
    ("excited", 3.0), ("exciting", 3.0), ("thanks", 2.0), ("thank", 2.0), ("thankful", 2.0),
    ("appreciate", 2.0), ("appreciated", 2.0), ("helpful", 2.0), ("useful", 2.0), ("cool", 1.0),
    ("fun", 4.0), ("best", 3.0), ("better", 2.0), ("perfect", 3.0), ("brilliant", 4.0),
    ("beautiful", 3.0), ("enjoy", 2.0), ("enjoyed", 2.0), ("success", 2.0), ("successful", 3.0),
    ("win", 4.0), ("won", 3.0), ("congrats", 2.0), ("congratulations", 2.0), ("welcome", 2.0),
    ("sure", 1.0), ("yes", 1.0), ("easy", 1.0), ("interesting", 2.0), ("impressive", 3.0),
    ("recommend", 2.0), ("support", 2.0), ("help", 2.0), ("proud", 2.0), ("lol", 3.0),
    ("haha", 3.0), ("pleased", 3.0), ("smart", 1.0), ("solid", 2.0), ("kind", 2.0),
    ("bad", -3.0), ("terrible", -3.0), ("awful", -3.0), ("horrible", -3.0), ("hate", -3.0),
    ("hated", -3.0), ("sad", -2.0), ("angry", -3.0), ("annoying", -2.0), ("annoyed", -2.0),
    ("problem", -2.0), ("problems", -2.0), ("issue", -1.0), ("issues", -1.0), ("bug", -2.0),
    ("bugs", -2.0), ("broken", -1.0), ("fail", -2.0), ("failed", -2.0), ("failure", -2.0),
    ("wrong", -2.0), ("worse", -3.0), ("worst", -3.0), ("sorry", -1.0), ("difficult", -1.0),
    ("hard", -1.0), ("stuck", -2.0), ("confused", -2.0), ("worried", -3.0), ("worry", -3.0),
    ("disappointed", -2.0), ("disappointing", -2.0), ("stupid", -2.0), ("useless", -2.0),
    ("crash", -2.0), ("crashed", -2.0), ("error", -2.0), ("errors", -2.0), ("slow", -2.0),
    ("tired", -2.0), ("unfortunately", -2.0),
];
