use super::types::FormatVariant;

/// Detect which parsing strategy fits a raw checklist text.
///
/// Named standards self-identify by keyword; a `::` delimiter or a large
/// number of `#` markers signals a hand-authored machine-readable format;
/// everything else falls back to structural-heuristic parsing. Checked in
/// priority order, first match wins, never fails.
pub fn classify(raw_text: &str) -> FormatVariant {
    let lower = raw_text.to_lowercase();

    if lower.contains("prisma")
        && (lower.contains("systematic review") || lower.contains("meta-analysis"))
    {
        FormatVariant::Prisma
    } else if lower.contains("stard") && lower.contains("diagnostic accuracy") {
        FormatVariant::Stard
    } else if lower.contains("consort") && lower.contains("randomized") {
        FormatVariant::Consort
    } else if raw_text.contains("::") || raw_text.matches('#').count() > 5 {
        FormatVariant::Custom
    } else {
        FormatVariant::Generic
    }
}
