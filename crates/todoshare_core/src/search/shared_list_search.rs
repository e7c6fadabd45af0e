//! Shared-list search and ordering.

use crate::model::shared_list::SharedList;
use crate::model::sort::SharedListSort;

/// Keeps lists whose title or sharer contains `search` (case-insensitive)
/// and orders them by `sort`.
pub fn view_shared_lists<'a>(
    lists: &'a [SharedList],
    search: &str,
    sort: SharedListSort,
) -> Vec<&'a SharedList> {
    let needle = search.to_lowercase();
    let mut result: Vec<&SharedList> = lists
        .iter()
        .filter(|list| {
            list.title.to_lowercase().contains(&needle)
                || list.shared_by.to_lowercase().contains(&needle)
        })
        .collect();

    match sort {
        SharedListSort::Newest => result.sort_by(|a, b| b.shared_at.cmp(&a.shared_at)),
        SharedListSort::Oldest => result.sort_by(|a, b| a.shared_at.cmp(&b.shared_at)),
        SharedListSort::Alphabetical => result.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
    }
    result
}
