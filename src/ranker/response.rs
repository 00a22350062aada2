use crate::model::RankError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<ChunkCandidate>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkCandidate {
    #[serde(default)]
    content: Option<ChunkContent>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkContent {
    #[serde(default)]
    parts: Vec<ChunkPart>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StreamBody {
    Chunks(Vec<StreamChunk>),
    Single(StreamChunk),
}

/// Reassembles the text of a streamed generation response and strips a surrounding
/// markdown code fence.
pub fn collect_text(body: &str) -> Result<String, RankError> {
    let chunks = match serde_json::from_str(body) {
        Ok(StreamBody::Chunks(chunks)) => chunks,
        Ok(StreamBody::Single(chunk)) => vec![chunk],
        Err(e) => return Err(RankError::InvalidAnswer(format!("stream body: {e}"))),
    };

    let text: String = chunks
        .iter()
        .flat_map(|chunk| &chunk.candidates)
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| &content.parts)
        .filter_map(|part| part.text.as_deref())
        .collect();

    Ok(strip_code_fence(&text).to_string())
}

/// Removes a ```` ```json ```` style fence if the model wrapped its answer in one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
