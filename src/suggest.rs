//! Checklist suggestion: ask the oracle which EQUATOR reporting checklist
//! fits a manuscript, then scan its reply for a known template name.

use crate::oracle::{Oracle, OracleError};

/// Low temperature: the reply should be a single checklist name.
const SUGGEST_TEMPERATURE: f32 = 0.2;

/// Only the head of the manuscript goes into the prompt; the abstract and
/// introduction are enough to pick a checklist.
const SUGGEST_EXCERPT_CHARS: usize = 2000;

/// Reporting checklists the tool knows by name, in match-priority order.
pub const TEMPLATE_NAMES: &[&str] = &[
    "PRISMA", "CONSORT", "STARD", "STROBE", "CARE", "SPIRIT", "ARRIVE", "CHEERS", "TRIPOD",
    "SQUIRE",
];

/// Suggest the most appropriate reporting checklist for a manuscript.
///
/// `Ok(None)` when the oracle replied but named no known checklist.
pub fn suggest_checklist(
    manuscript_text: &str,
    oracle: &dyn Oracle,
) -> Result<Option<&'static str>, OracleError> {
    let prompt = build_suggest_prompt(manuscript_text);
    let response = oracle.call(&prompt, SUGGEST_TEMPERATURE)?;
    tracing::debug!(response = %response.trim(), "oracle suggestion response");

    Ok(find_checklist_name(&response))
}

fn build_suggest_prompt(manuscript_text: &str) -> String {
    let manuscript_text = head_chars(manuscript_text, SUGGEST_EXCERPT_CHARS);
    format!(
        "Analyze the following research manuscript abstract or introduction text and determine \
the most appropriate reporting checklist based on the Enhancing the QUAlity and Transparency \
Of health Research (EQUATOR) Network.\n\
Manuscript Text:\n---\n{manuscript_text}\n---\n\
Based on the text, which of the following reporting checklists is most suitable?\n\n\
Available checklists: {}\n\
Choose exactly ONE checklist name from the list above. Your answer should be only the name \
of the checklist (e.g., PRISMA).",
        TEMPLATE_NAMES.join(", ")
    )
}

/// First `n` characters of `s` (not bytes).
fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// First known template name mentioned in the response, case-insensitive.
fn find_checklist_name(response: &str) -> Option<&'static str> {
    let lower = response.to_lowercase();
    TEMPLATE_NAMES
        .iter()
        .find(|name| lower.contains(&name.to_lowercase()))
        .copied()
}
