use std::sync::LazyLock;

use regex::RegexSet;

use super::types::{ChecklistDocument, FormatVariant, Item, Section};

/// Anchor phrases that open a PRISMA section. Substring matches,
/// case-insensitive, no word boundaries — a body line containing one of
/// these phrases is treated as a header.
static PRISMA_SECTION_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)Title\s+and\s+Abstract",
        r"(?i)Introduction",
        r"(?i)Methods",
        r"(?i)Results",
        r"(?i)Discussion",
        r"(?i)Funding",
    ])
    .expect("PRISMA section patterns compile")
});

/// Parse raw checklist text under the strategy selected by the classifier.
///
/// Never fails: blank input yields an empty document, and the generic
/// structural heuristics accept anything else.
pub fn parse(raw_text: &str, variant: FormatVariant) -> ChecklistDocument {
    let sections = match variant {
        FormatVariant::Prisma => parse_prisma(raw_text),
        FormatVariant::Custom => parse_custom(raw_text),
        // STARD and CONSORT have no dedicated heuristics yet; both share
        // the generic structural parser.
        FormatVariant::Stard | FormatVariant::Consort | FormatVariant::Generic => {
            parse_generic(raw_text)
        }
    };
    ChecklistDocument { sections }
}

/// PRISMA layout: known anchor phrases open sections, numbered lines
/// (`#<n> <text>`) contribute the text after the first `#`, other lines
/// are items verbatim. Lines before the first header are discarded.
fn parse_prisma(raw_text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in raw_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if PRISMA_SECTION_PATTERNS.is_match(line) {
            // Sections are appended on creation, so a header without
            // following items is retained in the output.
            sections.push(Section::new(line));
        } else if let Some(current) = sections.last_mut() {
            let text = match line.split_once('#') {
                Some((_, after)) => after.trim(),
                None => line,
            };
            current.items.push(Item::plain(text));
        }
    }

    sections
}

/// Custom `item :: instruction` layout. Lines starting with `#` are
/// comments. A short `Name:` prefix inside the item text opens a new
/// section; the in-progress buffer is flushed under the previous name.
fn parse_custom(raw_text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current_name = "General".to_string();
    let mut buffer: Vec<Item> = Vec::new();

    for line in raw_text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((text, instruction)) = line.split_once("::") {
            let item_text = text.trim().to_string();
            let instruction = instruction.trim().to_string();

            if let Some((prefix, _)) = item_text.split_once(':') {
                if prefix.chars().count() < 30 {
                    if !buffer.is_empty() {
                        sections.push(Section::with_items(
                            current_name.clone(),
                            std::mem::take(&mut buffer),
                        ));
                    }
                    current_name = prefix.trim().to_string();
                }
            }

            buffer.push(Item {
                text: item_text,
                instruction,
            });
        } else {
            buffer.push(Item::plain(line));
        }
    }

    if !buffer.is_empty() {
        sections.push(Section::with_items(current_name, buffer));
    }

    sections
}

/// Generic structural layout: upper-case lines, lines ending with `:`,
/// and short title-cased lines are headers; everything else is an item.
fn parse_generic(raw_text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current_name = "General".to_string();
    let mut buffer: Vec<Item> = Vec::new();

    for line in raw_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_generic_header(line) {
            if !buffer.is_empty() {
                sections.push(Section::with_items(
                    current_name.clone(),
                    std::mem::take(&mut buffer),
                ));
            }
            current_name = line.to_string();
        } else {
            buffer.push(Item::plain(line));
        }
    }

    if !buffer.is_empty() {
        sections.push(Section::with_items(current_name, buffer));
    }

    sections
}

fn is_generic_header(line: &str) -> bool {
    is_all_uppercase(line)
        || line.ends_with(':')
        || (line.chars().count() < 50 && first_token_is_title_cased(line))
}

/// True when the line has at least one cased character and none lowercase.
fn is_all_uppercase(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// True when the first whitespace token's first letter is upper-case and
/// its remaining letters are lower-case.
fn first_token_is_title_cased(line: &str) -> bool {
    let Some(token) = line.split_whitespace().next() else {
        return false;
    };
    let mut letters = token.chars().filter(|c| c.is_alphabetic());
    match letters.next() {
        Some(first) if first.is_uppercase() => letters.all(|c| c.is_lowercase()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::types::{DEFAULT_ITEM_INSTRUCTION, DEFAULT_SECTION_GUIDANCE};

    const ALL_VARIANTS: [FormatVariant; 5] = [
        FormatVariant::Prisma,
        FormatVariant::Stard,
        FormatVariant::Consort,
        FormatVariant::Custom,
        FormatVariant::Generic,
    ];

    #[test]
    fn empty_input_yields_no_sections_for_every_variant() {
        for variant in ALL_VARIANTS {
            assert!(parse("", variant).is_empty(), "variant {variant:?}");
            assert!(parse("  \n\n\t\n", variant).is_empty(), "variant {variant:?}");
        }
    }

    // ── PRISMA ────────────────────────────────────────────────────────

    #[test]
    fn prisma_splits_numbered_items_under_anchor_headers() {
        let text = "Methods\n#1 Study design\n#2 Setting\nResults\n#3 Outcomes";
        let doc = parse(text, FormatVariant::Prisma);

        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].name, "Methods");
        // Everything after the first '#' is kept, numeral included.
        let items: Vec<&str> = doc.sections[0].items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(items, vec!["1 Study design", "2 Setting"]);
        assert_eq!(doc.sections[1].name, "Results");
        assert_eq!(doc.sections[1].items[0].text, "3 Outcomes");
    }

    #[test]
    fn prisma_headers_match_case_insensitively_as_substrings() {
        let text = "TITLE AND ABSTRACT\n#1 Identify the report";
        let doc = parse(text, FormatVariant::Prisma);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].name, "TITLE AND ABSTRACT");
    }

    #[test]
    fn prisma_lines_before_first_header_are_discarded() {
        let text = "ignored preamble line\nMethods\n#1 Study design";
        let doc = parse(text, FormatVariant::Prisma);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].items.len(), 1);
    }

    #[test]
    fn prisma_header_without_items_is_retained() {
        let text = "Introduction\nMethods\n#1 Study design";
        let doc = parse(text, FormatVariant::Prisma);
        assert_eq!(doc.sections.len(), 2);
        assert!(doc.sections[0].items.is_empty());
        assert_eq!(doc.sections[1].items.len(), 1);
    }

    #[test]
    fn prisma_plain_line_under_section_is_item_verbatim() {
        let text = "Discussion\nSummarize the main findings in context";
        let doc = parse(text, FormatVariant::Prisma);
        assert_eq!(
            doc.sections[0].items[0].text,
            "Summarize the main findings in context"
        );
        assert_eq!(doc.sections[0].items[0].instruction, DEFAULT_ITEM_INSTRUCTION);
    }

    // ── STARD / CONSORT alias ─────────────────────────────────────────

    #[test]
    fn stard_and_consort_share_the_generic_parser() {
        let text = "METHODS\ndescribe the eligibility criteria for participants";
        let generic = parse(text, FormatVariant::Generic);
        assert_eq!(parse(text, FormatVariant::Stard), generic);
        assert_eq!(parse(text, FormatVariant::Consort), generic);
    }

    // ── Custom ────────────────────────────────────────────────────────

    #[test]
    fn custom_two_header_blocks_yield_two_sections() {
        let text = "\
Title: identify the study design :: Quote the title verbatim
was a protocol registered :: Look for a registration number
Methods: describe eligibility :: Check the methods section
were databases listed :: List every database searched";
        let doc = parse(text, FormatVariant::Custom);

        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].name, "Title");
        assert_eq!(doc.sections[0].items.len(), 2);
        assert_eq!(doc.sections[0].items[0].text, "Title: identify the study design");
        assert_eq!(doc.sections[0].items[0].instruction, "Quote the title verbatim");
        assert_eq!(doc.sections[0].items[1].text, "was a protocol registered");

        assert_eq!(doc.sections[1].name, "Methods");
        assert_eq!(doc.sections[1].items.len(), 2);
        assert_eq!(
            doc.sections[1].items[1].instruction,
            "List every database searched"
        );
    }

    #[test]
    fn custom_flushes_buffer_under_previous_section_name() {
        // Items seen before the first header land under "General".
        let text = "first item :: do this\nScope: narrow item :: do that";
        let doc = parse(text, FormatVariant::Custom);
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].name, "General");
        assert_eq!(doc.sections[0].items.len(), 1);
        assert_eq!(doc.sections[1].name, "Scope");
    }

    #[test]
    fn custom_skips_comment_lines() {
        let text = "# a comment\nitem one :: instruction one";
        let doc = parse(text, FormatVariant::Custom);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].items.len(), 1);
    }

    #[test]
    fn custom_long_colon_prefix_is_not_a_section() {
        let prefix = "a".repeat(30);
        let text = format!("{prefix}: still one item :: the instruction");
        let doc = parse(&text, FormatVariant::Custom);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].name, "General");
    }

    #[test]
    fn custom_line_without_delimiter_gets_default_instruction() {
        let doc = parse("a bare checklist item", FormatVariant::Custom);
        assert_eq!(doc.sections[0].items[0].instruction, DEFAULT_ITEM_INSTRUCTION);
    }

    // ── Generic ───────────────────────────────────────────────────────

    #[test]
    fn generic_upper_case_header_collects_following_items() {
        let text = "METHODS\ndescribe the study design to readers\nreport the setting and dates";
        let doc = parse(text, FormatVariant::Generic);

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].name, "METHODS");
        assert_eq!(doc.sections[0].items.len(), 2);
    }

    #[test]
    fn generic_colon_suffix_and_title_case_are_headers() {
        let text = "Search strategy details go here:\nlist the full search strings used\nResults\nreport the number of records screened";
        let doc = parse(text, FormatVariant::Generic);
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].name, "Search strategy details go here:");
        assert_eq!(doc.sections[1].name, "Results");
    }

    #[test]
    fn generic_long_title_cased_line_is_an_item() {
        // 50+ chars disqualifies the title-case rule.
        let long_line = "Describe every eligibility criterion applied during screening of records";
        assert!(long_line.chars().count() >= 50);
        let doc = parse(&format!("METHODS\n{long_line}"), FormatVariant::Generic);
        assert_eq!(doc.sections[0].items.len(), 1);
    }

    #[test]
    fn generic_items_before_first_header_fall_under_general() {
        let text = "report funding sources for the review\nMETHODS\ndescribe the design";
        let doc = parse(text, FormatVariant::Generic);
        assert_eq!(doc.sections[0].name, "General");
        assert_eq!(doc.sections[1].name, "METHODS");
    }

    #[test]
    fn generic_numbered_prisma_style_lines_are_items_not_headers() {
        // Under the generic path headers come from case/colon rules, so the
        // '#'-numbered lines stay items with their markers intact.
        let text = "Methods\n#1 Study design\n#2 Setting\nResults\n#3 Outcomes";
        let doc = parse(text, FormatVariant::Generic);

        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].name, "Methods");
        let items: Vec<&str> = doc.sections[0].items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(items, vec!["#1 Study design", "#2 Setting"]);
        assert_eq!(doc.sections[1].items[0].text, "#3 Outcomes");
    }

    #[test]
    fn every_parsed_section_starts_with_default_guidance() {
        let text = "Methods\n#1 Study design\nResults\n#2 Outcomes";
        for variant in [FormatVariant::Prisma, FormatVariant::Generic] {
            for section in parse(text, variant).sections {
                assert_eq!(section.guidance, DEFAULT_SECTION_GUIDANCE);
            }
        }
    }

    #[test]
    fn header_heuristics() {
        assert!(is_all_uppercase("METHODS"));
        assert!(!is_all_uppercase("Methods"));
        assert!(!is_all_uppercase("#1 2024"));
        assert!(first_token_is_title_cased("Results of the search"));
        assert!(!first_token_is_title_cased("METHODS"));
        assert!(!first_token_is_title_cased("describe the design"));
        assert!(!first_token_is_title_cased("McNemar test"));
    }
}
