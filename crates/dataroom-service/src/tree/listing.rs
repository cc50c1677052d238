//! Listing adapter and presentation.
//!
//! Wraps the store's one-level `list` primitive: filters the `.keep`
//! marker out of user-visible results, classifies entries, and applies the
//! folders-first sort and fixed-size pagination.

use std::cmp::Ordering;

use dataroom_core::result::AppResult;
use dataroom_core::traits::storage::{ListOptions, ObjectStore};
use dataroom_core::types::pagination::{PageRequest, PageResponse};
use dataroom_core::types::sorting::{SortColumn, SortDirection};
use dataroom_entity::entry::TreeEntry;

/// List the user-visible entries directly under a prefix.
///
/// The marker object is filtered out here; it is exactly the mechanism by
/// which an otherwise-empty folder remains listable, never a row the user
/// sees.
pub async fn list_entries(store: &dyn ObjectStore, prefix: &str) -> AppResult<Vec<TreeEntry>> {
    let entries = store.list(prefix, &ListOptions::default()).await?;
    Ok(entries
        .into_iter()
        .filter(|e| !e.is_marker())
        .map(TreeEntry::from)
        .collect())
}

/// Sort entries in place: folders always before files, then by the chosen
/// column and direction within each group.
pub fn sort_entries(entries: &mut [TreeEntry], column: SortColumn, direction: SortDirection) {
    entries.sort_by(|a, b| {
        b.is_folder()
            .cmp(&a.is_folder())
            .then_with(|| compare_by(a, b, column, direction))
    });
}

fn compare_by(
    a: &TreeEntry,
    b: &TreeEntry,
    column: SortColumn,
    direction: SortDirection,
) -> Ordering {
    let ordering = match column {
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::Kind => a.kind.label().cmp(b.kind.label()),
        SortColumn::Size => a.sort_size().cmp(&b.sort_size()),
    };
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Slice a sorted entry list into the requested page.
pub fn paginate(entries: Vec<TreeEntry>, page: &PageRequest) -> PageResponse<TreeEntry> {
    let total = entries.len() as u64;
    let items = entries
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(items, page.page, page.page_size, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataroom_entity::entry::EntryKind;

    fn folder(name: &str) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::Folder,
            size: None,
            created_at: None,
        }
    }

    fn file(name: &str, size: u64) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            kind: EntryKind::File,
            size: Some(size),
            created_at: None,
        }
    }

    fn names(entries: &[TreeEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn folders_sort_before_files_on_every_column() {
        for column in [SortColumn::Name, SortColumn::Kind, SortColumn::Size] {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let mut entries = vec![
                    file("a.pdf", 10),
                    folder("zeta"),
                    file("b.pdf", 5),
                    folder("alpha"),
                ];
                sort_entries(&mut entries, column, direction);
                assert!(entries[0].is_folder(), "{column:?}/{direction:?}");
                assert!(entries[1].is_folder(), "{column:?}/{direction:?}");
                assert!(!entries[2].is_folder(), "{column:?}/{direction:?}");
                assert!(!entries[3].is_folder(), "{column:?}/{direction:?}");
            }
        }
    }

    #[test]
    fn name_sort_is_lexicographic_within_groups() {
        let mut entries = vec![file("b.pdf", 1), folder("z"), file("a.pdf", 1), folder("a")];
        sort_entries(&mut entries, SortColumn::Name, SortDirection::Asc);
        assert_eq!(names(&entries), vec!["a", "z", "a.pdf", "b.pdf"]);

        sort_entries(&mut entries, SortColumn::Name, SortDirection::Desc);
        assert_eq!(names(&entries), vec!["z", "a", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn size_sort_orders_files_by_byte_count() {
        let mut entries = vec![file("big.pdf", 300), file("small.pdf", 3)];
        sort_entries(&mut entries, SortColumn::Size, SortDirection::Desc);
        assert_eq!(names(&entries), vec!["big.pdf", "small.pdf"]);
    }

    #[test]
    fn pagination_uses_fixed_page_size() {
        let entries: Vec<TreeEntry> =
            (0..30).map(|i| file(&format!("{i:02}.pdf"), 1)).collect();
        let page = paginate(entries, &PageRequest::default());
        assert_eq!(page.items.len(), 25);
        assert_eq!(page.total_items, 30);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
    }
}
