//! MCP text extraction utilities.
//!
//! Provides functions for extracting text segments from MCP `Content` slices.
//! These are domain-level utilities used across the application for processing
//! MCP protocol responses.

use rmcp::model::Content;

/// Concatenate all text segments from an MCP `Content` slice using a custom separator.
#[must_use]
pub fn extract_text_with_sep(content: &[Content], sep: &str) -> String {
    content
        .iter()
        .filter_map(|c| {
            if let Ok(v) = serde_json::to_value(c) {
                v.get("text")
                    .and_then(|t| t.as_str())
                    .map(ToOwned::to_owned)
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join(sep)
}

/// Concatenate all text segments from an MCP `Content` slice, separated by newlines.
#[must_use]
pub fn extract_text(content: &[Content]) -> String {
    extract_text_with_sep(content, "\n")
}

/// Splits a leading or trailing date token off a metadata query.
///
/// Recognises `YYYY[./-]MM[./-]DD`, `MM[./-]DD`, and `MM月DD日?` forms
/// anywhere at the start or end of the (trimmed) input, separated from the
/// remaining free-text query by whitespace. Returns `(date_token, rest)`;
/// `date_token` is `None` when no recognisable date is present, in which
/// case `rest` is the trimmed input unchanged.
#[must_use]
pub fn split_date_and_query(input: &str) -> (Option<String>, String) {
    static DATE_RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let re = DATE_RE.get_or_init(|| {
        regex::Regex::new(
            r"^(\d{4}[./-]\d{1,2}[./-]\d{1,2}|\d{1,2}[./-]\d{1,2}|\d{1,2}月\d{1,2}日?)$",
        )
        .expect("date regex is a fixed valid pattern")
    });

    let trimmed = input.trim();
    let mut tokens: Vec<&str> = trimmed.split_whitespace().collect();

    if let Some(first) = tokens.first() {
        if re.is_match(first) {
            let date = (*first).to_owned();
            tokens.remove(0);
            return (Some(date), tokens.join(" "));
        }
    }

    if let Some(last) = tokens.last() {
        if re.is_match(last) {
            let date = (*last).to_owned();
            tokens.pop();
            return (Some(date), tokens.join(" "));
        }
    }

    (None, trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_short_date_is_split_from_query() {
        let (date, query) = split_date_and_query("1.18 海边");
        assert_eq!(date.as_deref(), Some("1.18"));
        assert_eq!(query, "海边");
    }

    #[test]
    fn plain_query_has_no_date() {
        let (date, query) = split_date_and_query("海边");
        assert_eq!(date, None);
        assert_eq!(query, "海边");
    }

    #[test]
    fn full_date_is_trimmed_and_split() {
        let (date, query) = split_date_and_query(" 2026-01-18  红色跑车 ");
        assert_eq!(date.as_deref(), Some("2026-01-18"));
        assert_eq!(query, "红色跑车");
    }

    #[test]
    fn chinese_month_day_form_is_recognised() {
        let (date, query) = split_date_and_query("1月18日 雪山");
        assert_eq!(date.as_deref(), Some("1月18日"));
        assert_eq!(query, "雪山");
    }

    #[test]
    fn trailing_date_is_recognised() {
        let (date, query) = split_date_and_query("雪山 1月18日");
        assert_eq!(date.as_deref(), Some("1月18日"));
        assert_eq!(query, "雪山");
    }
}
