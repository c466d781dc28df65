use crate::checklist::{AnswerRecord, Item, Section};
use crate::oracle::{Oracle, OracleError};

use super::prompt::{build_item_prompt, build_section_extract_prompt};

/// Lower temperature for section-text extraction, for determinism.
const SECTION_EXTRACT_TEMPERATURE: f32 = 0.3;
const ITEM_ANSWER_TEMPERATURE: f32 = 0.5;

/// Manuscript window sizes, in characters.
const EXTRACT_WINDOW: usize = 5000;
const FALLBACK_WINDOW: usize = 1500;
const CONTEXT_WINDOW: usize = 1000;

/// A section-text response shorter than this triggers one retry on the
/// next manuscript window.
const MIN_SECTION_TEXT_CHARS: usize = 100;

/// Substituted when cleanup leaves an empty answer.
pub const MISSING_INFO_ANSWER: &str = "Information not found in the provided text snippet.";

/// Generate one answer per item of a section, in item order.
///
/// Oracle failures degrade into the answer text itself; they never abort
/// the remaining items or sections.
pub fn resolve_section_answers(
    section: &Section,
    manuscript_text: &str,
    oracle: &dyn Oracle,
) -> Vec<AnswerRecord> {
    tracing::info!(section = %section.name, items = section.items.len(), "processing section");

    let section_text = extract_section_text(section, manuscript_text, oracle);

    section
        .items
        .iter()
        .map(|item| AnswerRecord {
            item_text: item.text.clone(),
            answer: answer_item(item, &section.guidance, &section_text, manuscript_text, oracle),
        })
        .collect()
}

/// Ask the oracle for the manuscript portions relevant to this section.
///
/// A short first response triggers one retry on the next 5000-character
/// window, appended after a blank line. Any oracle failure degrades
/// silently to the first 1500 manuscript characters.
fn extract_section_text(section: &Section, manuscript_text: &str, oracle: &dyn Oracle) -> String {
    let attempt = (|| -> Result<String, OracleError> {
        let prompt = build_section_extract_prompt(
            &section.name,
            &section.guidance,
            take_chars(manuscript_text, EXTRACT_WINDOW),
        );
        let mut text = oracle
            .call(&prompt, SECTION_EXTRACT_TEMPERATURE)?
            .trim()
            .to_string();

        if text.chars().count() < MIN_SECTION_TEXT_CHARS
            && manuscript_text.chars().count() > EXTRACT_WINDOW
        {
            let retry_prompt = build_section_extract_prompt(
                &section.name,
                &section.guidance,
                char_slice(manuscript_text, EXTRACT_WINDOW, 2 * EXTRACT_WINDOW),
            );
            let more = oracle.call(&retry_prompt, SECTION_EXTRACT_TEMPERATURE)?;
            text.push_str("\n\n");
            text.push_str(more.trim());
        }

        Ok(text)
    })();

    match attempt {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(section = %section.name, error = %e, "section text extraction failed, using manuscript head");
            take_chars(manuscript_text, FALLBACK_WINDOW).to_string()
        }
    }
}

/// Answer one checklist item against the extracted section text plus a
/// small slice of the full manuscript.
fn answer_item(
    item: &Item,
    section_guidance: &str,
    section_text: &str,
    manuscript_text: &str,
    oracle: &dyn Oracle,
) -> String {
    let context = format!(
        "{section_text}\n\n--- Additional manuscript text ---\n\n{}",
        take_chars(manuscript_text, CONTEXT_WINDOW)
    );
    let prompt = build_item_prompt(&item.text, &item.instruction, section_guidance, &context);

    match oracle.call(&prompt, ITEM_ANSWER_TEMPERATURE) {
        Ok(raw) => cleanup_answer(&raw),
        Err(e) => {
            tracing::error!(item = %item.text, error = %e, "answer generation failed");
            match e {
                OracleError::Unreachable(_) => {
                    format!("Error: Ollama connection failed for item '{}'", item.text)
                }
                OracleError::RequestFailed(cause) => {
                    format!("Error: Ollama request failed for item '{}': {cause}", item.text)
                }
                OracleError::DecodeFailed(_) => {
                    format!("Error: Ollama JSON decode failed for item '{}'", item.text)
                }
                OracleError::Unexpected(cause) => format!("Error generating answer: {cause}"),
            }
        }
    }
}

/// Strip a leading "Answer:" echo and substitute a fixed string when
/// nothing usable remains.
fn cleanup_answer(raw: &str) -> String {
    let mut answer = raw.trim().to_string();
    if answer.is_empty() || answer.to_lowercase().starts_with("answer:") {
        answer = answer
            .splitn(2, ':')
            .last()
            .unwrap_or_default()
            .trim()
            .to_string();
    }
    if answer.is_empty() {
        MISSING_INFO_ANSWER.to_string()
    } else {
        answer
    }
}

/// First `n` characters of `s` (not bytes).
fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Characters `[start, end)` of `s`.
fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let begin = match s.char_indices().nth(start) {
        Some((idx, _)) => idx,
        None => return "",
    };
    take_chars(&s[begin..], end.saturating_sub(start))
}
