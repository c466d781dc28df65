//! Prompt builders for guidance and answer generation.

/// Prompt asking for an overview approach across all checklist sections.
pub fn build_general_guidance_prompt(section_names: &[&str]) -> String {
    format!(
        "I need to fill a medical/scientific checklist based on a manuscript. \
The checklist has the following sections:\n\n{}\n\n\
The manuscript appears to be a medical/scientific paper. For each section, \
I need to extract relevant information.\n\n\
Provide specific guidance on how to approach extracting information for each \
of these sections from a scientific manuscript.\n\
Be specific about what types of content to look for in each section.",
        section_names.join(", ")
    )
}

/// Prompt asking how to extract information for one named section.
pub fn build_section_guidance_prompt(section_name: &str) -> String {
    format!(
        "For the checklist section \"{section_name}\" in a medical/scientific paper checklist:\n\n\
1. What specific information should I look for in the manuscript?\n\
2. Where in a scientific manuscript would this information typically be found?\n\
3. What are key phrases or concepts that would indicate this information?\n\n\
Provide specific, concise guidance."
    )
}

/// Prompt asking for the manuscript portions relevant to one section.
pub fn build_section_extract_prompt(
    section_name: &str,
    section_guidance: &str,
    manuscript_excerpt: &str,
) -> String {
    format!(
        "Given the following manuscript text, extract the portions most relevant \
to the \"{section_name}\" section of a scientific checklist.\n\n\
Section Guidance: {section_guidance}\n\n\
Manuscript Text:\n---\n{manuscript_excerpt}\n---\n\n\
Extract only the most relevant parts of the text for the \"{section_name}\" section."
    )
}

/// Prompt asking for a concise answer to one checklist item.
pub fn build_item_prompt(
    item_text: &str,
    instruction: &str,
    section_guidance: &str,
    context_text: &str,
) -> String {
    format!(
        "Based on the following manuscript text, provide a concise answer for \
the checklist item: '{item_text}'\n\n\
Specific instruction for this item: {instruction}\n\n\
Section guidance: {section_guidance}\n\n\
Manuscript Text:\n---\n{context_text}\n---\n\n\
Checklist Item: {item_text}\n\n\
Answer concisely based only on the provided text. If the information isn't present, state that.\n\
Answer: "
    )
}
