//! Presentation helpers shared by every front-end.

use super::state::WorkflowState;

pub const NO_MATCH_HINT: &str = "該当するグループはありません";
pub const ENTER_CRITERIA_HINT: &str = "検索条件を入力して検索してください";

/// `2024-01-15T10:30:00[.fff][zone]` → `2024/01/15 10:30`.
///
/// Anything that does not look like an ISO local date-time is returned as is.
pub fn format_timestamp(raw: &str) -> String {
    let (Some(date), Some(time)) = (raw.get(..10), raw.get(11..16)) else {
        return raw.to_string();
    };

    let separator = raw.as_bytes()[10];
    if separator != b'T' && separator != b' ' {
        return raw.to_string();
    }

    if !matches_pattern(date, "dddd-dd-dd") || !matches_pattern(time, "dd:dd") {
        return raw.to_string();
    }

    format!("{} {}", date.replace('-', "/"), time)
}

fn matches_pattern(value: &str, pattern: &str) -> bool {
    value.len() == pattern.len()
        && value.bytes().zip(pattern.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            other => c == other,
        })
}

/// Hint shown in place of an empty list, `None` while results exist.
pub fn empty_list_hint(state: &WorkflowState) -> Option<&'static str> {
    if !state.groups().is_empty() {
        return None;
    }

    let has_query = state
        .last_criteria()
        .map(|criteria| !criteria.query().trim().is_empty())
        .unwrap_or_else(|| !state.search_form.query.trim().is_empty());

    Some(if has_query {
        NO_MATCH_HINT
    } else {
        ENTER_CRITERIA_HINT
    })
}
