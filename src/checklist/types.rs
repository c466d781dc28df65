use serde::{Deserialize, Serialize};

/// Default guidance attached to every section at parse time. May be
/// overwritten exactly once by the guidance resolver.
pub const DEFAULT_SECTION_GUIDANCE: &str =
    "Extract information related to this section from the manuscript.";

/// Default per-item instruction when the source format does not encode one.
pub const DEFAULT_ITEM_INSTRUCTION: &str = "Answer based on the manuscript text.";

/// Checklist authoring convention, detected once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatVariant {
    Prisma,
    Stard,
    Consort,
    Custom,
    Generic,
}

impl FormatVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatVariant::Prisma => "PRISMA",
            FormatVariant::Stard => "STARD",
            FormatVariant::Consort => "CONSORT",
            FormatVariant::Custom => "custom",
            FormatVariant::Generic => "generic",
        }
    }
}

/// A single checklist requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub text: String,
    pub instruction: String,
}

impl Item {
    /// Item with the default extraction instruction.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            instruction: DEFAULT_ITEM_INSTRUCTION.to_string(),
        }
    }
}

/// A named group of checklist items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub items: Vec<Item>,
    pub guidance: String,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            guidance: DEFAULT_SECTION_GUIDANCE.to_string(),
        }
    }

    pub fn with_items(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items,
            guidance: DEFAULT_SECTION_GUIDANCE.to_string(),
        }
    }
}

/// Parsed checklist: ordered sections, each with ordered items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistDocument {
    pub sections: Vec<Section>,
}

impl ChecklistDocument {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Answer generated for one checklist item. Grouped per section, ordered
/// identically to the parsed items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub item_text: String,
    pub answer: String,
}
