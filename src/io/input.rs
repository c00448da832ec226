use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::ChatTranscript;
use crate::parser::{ParserConfig, parse_transcript};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Raw export text plus the file facts the parser wants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFile {
    pub text: String,
    pub file_name: String,
    pub file_size: u64,
}

/// Read a chat export from disk
///
/// Invalid UTF-8 is replaced rather than rejected, and a leading byte order
/// mark is dropped.
pub fn read_transcript(path: &Path) -> Result<TranscriptFile> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let file_size = bytes.len() as u64;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("{:?} is not valid UTF-8, replacing invalid sequences", path);
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    let text = match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => rest.to_string(),
        None => text,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!("Read {} bytes from {:?}", file_size, path);
    Ok(TranscriptFile {
        text,
        file_name,
        file_size,
    })
}

/// Read and parse a chat export in one step
pub fn parse_transcript_file(path: &Path, config: &ParserConfig) -> Result<ChatTranscript> {
    let file = read_transcript(path)?;
    Ok(parse_transcript(
        &file.text,
        Some(&file.file_name),
        Some(file.file_size),
        config,
    ))
}
