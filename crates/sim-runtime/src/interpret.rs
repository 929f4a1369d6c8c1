//! Free-text interpretation: map a board message onto menu decisions.
//!
//! Precedence is fixed: explicit `option N` references first (in the order
//! they appear), then menu decisions whose id (dashes read as spaces) or
//! the first 18 characters of whose title occur in the text, in menu order.
//! Duplicates collapse and the result is capped at `max`.

use sim_core::Decision;

const TITLE_PREFIX_CHARS: usize = 18;

/// Decision ids referenced by `text`, drawn only from `menu`.
pub fn interpret_free_text(text: &str, menu: &[&Decision], max: usize) -> Vec<String> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() || menu.is_empty() {
        return Vec::new();
    }

    let mut ids: Vec<String> = Vec::new();
    for index in option_references(&normalized) {
        if let Some(d) = index.checked_sub(1).and_then(|i| menu.get(i)) {
            ids.push(d.id.clone());
        }
    }

    for d in menu {
        let spaced_id = d.id.replace('-', " ");
        let title: String = d.title.to_lowercase().chars().take(TITLE_PREFIX_CHARS).collect();
        if normalized.contains(&spaced_id) || (!title.is_empty() && normalized.contains(&title)) {
            ids.push(d.id.clone());
        }
    }

    dedup_capped(ids, max)
}

/// Single digits following the word `option`, optionally separated by
/// whitespace: `option 2`, `option2`.
fn option_references(text: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("option") {
        rest = &rest[pos + "option".len()..];
        let digit = rest
            .trim_start()
            .chars()
            .next()
            .and_then(|c| c.to_digit(10));
        if let Some(n) = digit {
            out.push(n as usize);
        }
    }
    out
}

/// First-seen order, duplicates dropped, at most `max` entries.
pub(crate) fn dedup_capped(ids: Vec<String>, max: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(max);
    for id in ids {
        if out.len() >= max {
            break;
        }
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
