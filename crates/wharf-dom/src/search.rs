//! Text search support: the XPath query built for `DOM.performSearch` and
//! the "best match" tie-break rule used to pick among several results.

/// Build an XPath `contains(text(), ...)` query for a plain text search,
/// quoting `text` so it survives embedding in the expression even if it
/// contains quote characters itself.
#[must_use]
pub fn text_search_query(text: &str) -> String {
    format!("//*[text()[contains(., {})]]", xpath_literal(text))
}

fn xpath_literal(text: &str) -> String {
    if !text.contains('"') {
        format!("\"{text}\"")
    } else if !text.contains('\'') {
        format!("'{text}'")
    } else {
        let parts: Vec<String> = text.split('"').map(|part| format!("\"{part}\"")).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

/// Pick the index of the candidate whose text length is closest to `text`'s.
/// Ties are broken by position: the first minimum wins, matching the
/// behavior of a linear scan that keeps the first best result seen.
#[must_use]
pub fn best_match_index(text: &str, candidates: &[String]) -> Option<usize> {
    let target_len = i64::try_from(text.chars().count()).unwrap_or(i64::MAX);
    candidates
        .iter()
        .map(|c| (i64::try_from(c.chars().count()).unwrap_or(i64::MAX) - target_len).abs())
        .enumerate()
        .min_by_key(|&(_, diff)| diff)
        .map(|(i, _)| i)
}
