pub mod error;
pub mod inference;
pub mod io;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod relevance;
pub mod vocabulary;

pub use error::{Error, Result, StructuralInputError};
pub use inference::{analyze_contact, InferenceConfig};
pub use io::{parse_transcript_file, read_transcript, write_json, AnalysisSummary, TranscriptFile};
pub use models::{
    ChatTranscript, ContactAnalysis, ContactProfile, DateRange, ExpertiseClaim, Keyword,
    KeywordCategory, ParsedMessage,
};
pub use parser::{
    normalize_name, parse_transcript, preview_transcript, validate_transcript, ParserConfig,
    TranscriptPreview, ValidationReport,
};
pub use pipeline::{analyze_transcript, rank_contacts, ContactReport, SearchHit, SearchOptions};
pub use relevance::{score_relevance, RelevanceScore, ScorerConfig};
pub use vocabulary::Vocabulary;
