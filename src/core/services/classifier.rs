use crate::core::models::category::{CATEGORIES, Category, CategorySpec};

/// Pick the category announced by a message.
///
/// Every category whose aliases occur in `text` is a candidate; the one
/// whose earliest alias starts at the smallest byte offset wins. Equal
/// offsets go to the category declared first. Returns `None` when no
/// alias occurs at all.
pub fn classify(text: &str) -> Option<Category> {
    let mut best: Option<(usize, Category)> = None;

    for spec in CATEGORIES {
        let Some(offset) = earliest_alias(spec, text) else {
            continue;
        };
        if best.is_none_or(|(best_offset, _)| offset < best_offset) {
            best = Some((offset, spec.category));
        }
    }

    best.map(|(_, category)| category)
}

/// Offset of the earliest occurrence of any alias of `spec` in `text`.
fn earliest_alias(spec: &CategorySpec, text: &str) -> Option<usize> {
    spec.aliases
        .iter()
        .filter_map(|alias| text.find(alias))
        .min()
}
