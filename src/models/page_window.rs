//! Page-window for paging controls: the compact run of page numbers, with
//! ellipsis markers, shown around the current page.

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

use crate::models::pagination::PageMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(i64),
    Ellipsis,
}

impl PageEntry {
    /// Page requested when this entry is selected. Ellipses are inert.
    pub fn target(&self) -> Option<i64> {
        match self {
            Self::Page(p) => Some(*p),
            Self::Ellipsis => None,
        }
    }
}

impl Serialize for PageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(p) => serializer.serialize_i64(*p),
            Self::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Entries to display for `page` out of `total_pages`.
///
/// Empty when there is at most one page. Page 1, the last page, and the
/// neighbours of the current page are shown; positions `page - 2` and
/// `page + 2` become an ellipsis when not already shown as numbers, and
/// adjacent ellipses collapse into one.
pub fn page_window(page: i64, total_pages: i64) -> Vec<PageEntry> {
    if total_pages <= 1 {
        return Vec::new();
    }

    // Only these positions can yield an entry.
    let positions: BTreeSet<i64> = [
        1,
        page.saturating_sub(2),
        page.saturating_sub(1),
        page,
        page.saturating_add(1),
        page.saturating_add(2),
        total_pages,
    ]
    .into_iter()
    .filter(|p| (1..=total_pages).contains(p))
    .collect();

    let mut entries: Vec<PageEntry> = Vec::with_capacity(positions.len());
    for i in positions {
        let entry = if i == 1 || i == total_pages || i.abs_diff(page) <= 1 {
            PageEntry::Page(i)
        } else {
            PageEntry::Ellipsis
        };
        if entry == PageEntry::Ellipsis && entries.last() == Some(&PageEntry::Ellipsis) {
            continue;
        }
        entries.push(entry);
    }
    entries
}

/// Everything a paging control needs to render itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub current: i64,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub entries: Vec<PageEntry>,
}

impl PageWindow {
    /// `None` means the control renders nothing.
    pub fn from_meta(meta: &PageMeta) -> Option<Self> {
        let entries = page_window(meta.page, meta.total_pages);
        if entries.is_empty() {
            return None;
        }
        Some(Self {
            current: meta.page,
            prev_enabled: meta.has_prev,
            next_enabled: meta.has_next,
            entries,
        })
    }

    pub fn prev_target(&self) -> Option<i64> {
        self.prev_enabled.then(|| self.current.saturating_sub(1))
    }

    pub fn next_target(&self) -> Option<i64> {
        self.next_enabled.then(|| self.current.saturating_add(1))
    }
}
