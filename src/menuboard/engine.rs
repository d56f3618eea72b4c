//! # Pagination/Filter Engine
//!
//! Every list screen shows the same thing: a source list fetched from the API,
//! narrowed by a filter, ordered by a sort key, and cut into a page window.
//! This module is that pipeline, written once and parameterized.
//!
//! ## Pipeline
//!
//! ```text
//! source ──filter──▶ filtered ──stable sort──▶ arranged ──window──▶ Page
//! ```
//!
//! - [`arrange`] runs the first two steps. The filter preserves source order and
//!   the sort is stable, so records that compare equal keep their relative
//!   position.
//! - [`recompute`] runs the whole pipeline for an explicit page number.
//! - [`Paginator`] is the per-screen state (page number and page size) that
//!   drives [`recompute`] and remembers the clamped page.
//!
//! ## Page Bounds
//!
//! A requested page outside `[1, max(total_pages, 1)]` is clamped, never
//! rejected: a filter can shrink the page count while the caller still holds
//! a page number from before. An empty result is a regular [`Page`] whose
//! [`Page::is_empty`] is true, with info `(0, 0, 0)` and no controls.
//!
//! ## Page Size
//!
//! [`PageSize`] cannot be zero. Operator input goes through
//! [`PageSize::parse_or`], which keeps the previous size when the input is not
//! a positive integer. Any accepted change resets the page to 1.
//!
//! Nothing here mutates the source list; calling [`recompute`] twice with the
//! same inputs returns the same page.

use crate::model::Record;
use serde::Serialize;
use std::cmp::Ordering;
use std::num::NonZeroUsize;

/// Page sizes offered to operators.
pub const PAGE_SIZE_CHOICES: [usize; 5] = [10, 12, 25, 50, 100];

/// Maximum number of consecutive page numbers in the page controls.
pub const MAX_VISIBLE_PAGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Parses operator input; `None` unless it is a positive integer.
    pub fn parse(input: &str) -> Option<PageSize> {
        input
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|n| usize::try_from(n).ok())
            .and_then(PageSize::new)
    }

    /// Like [`parse`](Self::parse), keeping `previous` for rejected input.
    pub fn parse_or(input: &str, previous: PageSize) -> PageSize {
        Self::parse(input).unwrap_or(previous)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(9))
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ascending by explicit order; missing order counts as 0.
pub fn by_order<T: Record>(a: &T, b: &T) -> Ordering {
    a.order().cmp(&b.order())
}

/// Keeps the filtered list in source order.
pub fn source_order<T>(_: &T, _: &T) -> Ordering {
    Ordering::Equal
}

/// Filters `source` and stable-sorts what remains.
pub fn arrange<'a, T, P, C>(source: &'a [T], predicate: P, comparator: C) -> Vec<&'a T>
where
    P: Fn(&T) -> bool,
    C: Fn(&T, &T) -> Ordering,
{
    let mut filtered: Vec<&T> = source.iter().filter(|record| predicate(record)).collect();
    // slice::sort_by is stable
    filtered.sort_by(|a, b| comparator(a, b));
    filtered
}

/// Runs the full pipeline for one page.
pub fn recompute<'a, T, P, C>(
    source: &'a [T],
    predicate: P,
    comparator: C,
    page_size: PageSize,
    page: usize,
) -> Page<'a, T>
where
    P: Fn(&T) -> bool,
    C: Fn(&T, &T) -> Ordering,
{
    paginate(arrange(source, predicate, comparator), page_size, page)
}

/// Cuts an already arranged list into the requested page window.
pub fn paginate<T>(arranged: Vec<&T>, page_size: PageSize, page: usize) -> Page<'_, T> {
    let size = page_size.get();
    let total_records = arranged.len();
    let total_pages = total_records.div_ceil(size);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * size;
    let end = (start + size).min(total_records);
    let items = arranged
        .into_iter()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect();

    Page {
        items,
        page,
        page_size,
        total_records,
        total_pages,
    }
}

/// "Showing `start` to `end` of `total`", 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PageInfo {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl PageInfo {
    pub const EMPTY: PageInfo = PageInfo {
        start: 0,
        end: 0,
        total: 0,
    };
}

/// One computed page window.
#[derive(Debug, Clone)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub page_size: PageSize,
    pub total_records: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    pub fn info(&self) -> PageInfo {
        if self.is_empty() {
            return PageInfo::EMPTY;
        }
        let start = (self.page - 1) * self.page_size.get();
        PageInfo {
            start: start + 1,
            end: start + self.items.len(),
            total: self.total_records,
        }
    }

    pub fn controls(&self) -> PageControls {
        page_controls(self.page, self.total_pages)
    }

    /// Maps the visible records, keeping the window metadata.
    pub fn map<U, F>(&self, f: F) -> Vec<U>
    where
        F: FnMut(&&'a T) -> U,
    {
        self.items.iter().map(f).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageIndicator {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Navigation for a page window.
///
/// `previous`/`next` hold the target page, or `None` when disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PageControls {
    pub previous: Option<usize>,
    pub next: Option<usize>,
    pub indicators: Vec<PageIndicator>,
}

impl PageControls {
    /// True when there is nothing to navigate (one page or none).
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

/// Builds the page indicators around `current`.
///
/// Shows at most [`MAX_VISIBLE_PAGES`] consecutive numbers centered on the
/// current page, shifted back when the window would run past the last page.
/// Page 1 and the last page stay reachable, with an ellipsis when the gap to
/// the window is more than one page.
pub fn page_controls(current: usize, total_pages: usize) -> PageControls {
    if total_pages <= 1 {
        return PageControls::default();
    }
    let current = current.clamp(1, total_pages);

    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end - start < MAX_VISIBLE_PAGES - 1 {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }

    let mut indicators = Vec::with_capacity(MAX_VISIBLE_PAGES + 4);
    if start > 1 {
        indicators.push(PageIndicator::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            indicators.push(PageIndicator::Ellipsis);
        }
    }
    for number in start..=end {
        indicators.push(PageIndicator::Page {
            number,
            current: number == current,
        });
    }
    if end < total_pages {
        if end < total_pages - 1 {
            indicators.push(PageIndicator::Ellipsis);
        }
        indicators.push(PageIndicator::Page {
            number: total_pages,
            current: false,
        });
    }

    PageControls {
        previous: (current > 1).then(|| current - 1),
        next: (current < total_pages).then(|| current + 1),
        indicators,
    }
}

/// Page state owned by a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: PageSize,
}

impl Paginator {
    pub fn new(page_size: PageSize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Requests a page. Out-of-range values are clamped by the next [`view`](Self::view).
    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Applies operator input for the page size.
    ///
    /// Returns false, leaving the state untouched, when the input is rejected.
    pub fn set_page_size(&mut self, input: &str) -> bool {
        match PageSize::parse(input) {
            Some(size) => {
                self.resize(size);
                true
            }
            None => false,
        }
    }

    pub fn resize(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Computes the current page and remembers where it was clamped to.
    pub fn view<'a, T, P, C>(&mut self, source: &'a [T], predicate: P, comparator: C) -> Page<'a, T>
    where
        P: Fn(&T) -> bool,
        C: Fn(&T, &T) -> Ordering,
    {
        let page = recompute(source, predicate, comparator, self.page_size, self.page);
        self.page = page.page;
        page
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
