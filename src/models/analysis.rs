use serde::{Deserialize, Serialize};

/// Fixed classification of an extracted keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Skill,
    Technology,
    Industry,
    Role,
    Company,
    General,
}

impl KeywordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Skill => "skill",
            KeywordCategory::Technology => "technology",
            KeywordCategory::Industry => "industry",
            KeywordCategory::Role => "role",
            KeywordCategory::Company => "company",
            KeywordCategory::General => "general",
        }
    }
}

/// A frequent term in a contact's messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// Lower-cased term, single word or short phrase
    pub term: String,
    pub frequency: usize,
    pub category: KeywordCategory,
    /// min(frequency / 10, 1)
    pub confidence: f64,
    /// Up to three sentences mentioning the term
    pub context: Vec<String>,
}

/// A skill attributed to a contact from textual evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertiseClaim {
    pub skill: String,
    /// Clamped into [0, 1]
    pub confidence: f64,
    pub evidence: Vec<String>,
    pub category: KeywordCategory,
    /// Number of supporting occurrences
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Mean lexical polarity, -1 to 1
    pub overall: f64,
    /// Share of messages offering help or advice, 0 to 1
    pub helpfulness: f64,
    /// Share of messages with exclamations or positive affect, 0 to 1
    pub enthusiasm: f64,
}

impl Default for Sentiment {
    fn default() -> Self {
        Self {
            overall: 0.0,
            helpfulness: 0.0,
            enthusiasm: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTime {
    Fast,
    Medium,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLength {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Informal,
    Neutral,
    Formal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationStyle {
    /// Volume proxy: message count, not measured reply latency
    pub response_time: ResponseTime,
    pub message_length: MessageLength,
    pub formality: Formality,
}

impl Default for CommunicationStyle {
    fn default() -> Self {
        Self {
            response_time: ResponseTime::Medium,
            message_length: MessageLength::Medium,
            formality: Formality::Neutral,
        }
    }
}

/// Everything inferred about one contact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactAnalysis {
    pub keywords: Vec<Keyword>,
    pub expertise: Vec<ExpertiseClaim>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    pub communication_style: CommunicationStyle,
}
