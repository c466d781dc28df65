use crate::checklist::ChecklistDocument;
use crate::oracle::Oracle;

use super::prompt::{build_general_guidance_prompt, build_section_guidance_prompt};

/// Temperature for guidance generation.
const GUIDANCE_TEMPERATURE: f32 = 0.7;

/// Returned as the general guidance when the overview call fails.
pub const GENERAL_GUIDANCE_FALLBACK: &str =
    "Failed to obtain preprocessing guidance. Proceeding with default approach.";

/// Ask the oracle how to approach each section of the checklist.
///
/// One overview call, then one call per section in document order.
/// Failures are local: a failed overview yields the fixed fallback string,
/// a failed section call leaves that section's default guidance untouched,
/// and the remaining sections are still processed.
pub fn resolve_guidance(document: &mut ChecklistDocument, oracle: &dyn Oracle) -> String {
    let section_names: Vec<&str> = document.sections.iter().map(|s| s.name.as_str()).collect();
    tracing::info!(sections = section_names.len(), "resolving checklist guidance");

    let general_guidance =
        match oracle.call(&build_general_guidance_prompt(&section_names), GUIDANCE_TEMPERATURE) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::error!(error = %e, "checklist preprocessing failed");
                GENERAL_GUIDANCE_FALLBACK.to_string()
            }
        };

    for section in &mut document.sections {
        match oracle.call(&build_section_guidance_prompt(&section.name), GUIDANCE_TEMPERATURE) {
            Ok(text) => section.guidance = text.trim().to_string(),
            Err(e) => {
                tracing::warn!(section = %section.name, error = %e, "keeping default guidance");
            }
        }
    }

    general_guidance
}
