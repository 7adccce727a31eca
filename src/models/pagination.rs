//! Pagination primitives shared across all list views.

use serde::{Deserialize, Serialize};

/// Paging metadata returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub per_page: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

/// One page of records plus its metadata.
///
/// Replaced wholesale on every successful fetch, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// A value rendered in the page-selector control: a concrete page number or
/// an ellipsis placeholder standing in for an elided run of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Gap,
}

/// Largest page count that is rendered without any elision.
const FULL_RANGE_MAX: u32 = 5;

/// Compact page-selector tokens for the current page.
///
/// The first and last pages are always shown. A window around the current
/// page fills the middle, with at most one gap on each side. The window
/// pivots on the current page clamped away from the fixed first and last
/// entries, so edge pages still get a three-wide neighborhood.
///
/// Invalid inputs are clamped rather than rejected: a non-positive total is
/// treated as a single page and `current` is pulled into `[1, total]`.
pub fn page_tokens(current: u32, total: u32) -> Vec<PageToken> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= FULL_RANGE_MAX {
        return (1..=total).map(PageToken::Page).collect();
    }

    let pivot = current.clamp(2, total - 1);

    let mut tokens = vec![PageToken::Page(1)];
    if pivot > 3 {
        tokens.push(PageToken::Gap);
    }
    for page in (pivot - 1).max(2)..=(pivot + 1).min(total - 1) {
        tokens.push(PageToken::Page(page));
    }
    if pivot < total - 2 {
        tokens.push(PageToken::Gap);
    }
    tokens.push(PageToken::Page(total));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(tokens: &[PageToken]) -> Vec<u32> {
        tokens
            .iter()
            .filter_map(|t| match t {
                PageToken::Page(n) => Some(*n),
                PageToken::Gap => None,
            })
            .collect()
    }

    #[test]
    fn small_totals_render_every_page() {
        for total in 1..=5 {
            for current in 1..=total {
                let expected: Vec<PageToken> = (1..=total).map(PageToken::Page).collect();
                assert_eq!(page_tokens(current, total), expected);
            }
        }
    }

    #[test]
    fn known_layouts() {
        use PageToken::{Gap, Page};

        assert_eq!(page_tokens(1, 1), vec![Page(1)]);
        assert_eq!(
            page_tokens(1, 6),
            vec![Page(1), Page(2), Page(3), Gap, Page(6)]
        );
        assert_eq!(
            page_tokens(4, 10),
            vec![Page(1), Gap, Page(3), Page(4), Page(5), Gap, Page(10)]
        );
        assert_eq!(
            page_tokens(9, 10),
            vec![Page(1), Gap, Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            page_tokens(10, 10),
            vec![Page(1), Gap, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn large_totals_are_framed_by_first_and_last() {
        for total in 6..=40 {
            for current in 1..=total {
                let tokens = page_tokens(current, total);
                assert_eq!(tokens.first(), Some(&PageToken::Page(1)));
                assert_eq!(tokens.last(), Some(&PageToken::Page(total)));

                let numbers = pages(&tokens);
                assert!(numbers.windows(2).all(|w| w[0] < w[1]), "ordered pages");
                assert!(
                    numbers.contains(&current.clamp(2, total - 1)),
                    "window covers the pivot for current={current} total={total}"
                );

                let gaps = tokens
                    .iter()
                    .filter(|t| matches!(t, PageToken::Gap))
                    .count();
                assert!(gaps <= 2, "at most one gap per side");
            }
        }
    }

    #[test]
    fn gaps_only_replace_real_runs() {
        // A gap must stand for at least one elided page, never sit between
        // two consecutive page numbers.
        for total in 6..=40 {
            for current in 1..=total {
                let tokens = page_tokens(current, total);
                for window in tokens.windows(3) {
                    if let [PageToken::Page(a), PageToken::Gap, PageToken::Page(b)] = window {
                        assert!(b - a >= 2, "gap between {a} and {b} elides nothing");
                    }
                }
            }
        }
    }

    #[test]
    fn invalid_inputs_are_clamped() {
        assert_eq!(page_tokens(1, 0), vec![PageToken::Page(1)]);
        assert_eq!(page_tokens(99, 3), page_tokens(3, 3));
        assert_eq!(page_tokens(0, 10), page_tokens(1, 10));
    }

    #[test]
    fn tokens_are_deterministic() {
        assert_eq!(page_tokens(7, 20), page_tokens(7, 20));
    }

    #[test]
    fn meta_uses_wire_field_names() {
        let meta: PageMeta = serde_json::from_str(
            r#"{"total": 42, "perPage": 10, "currentPage": 2, "totalPages": 5}"#,
        )
        .unwrap();
        assert_eq!(meta.total, 42);
        assert_eq!(meta.per_page, 10);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.total_pages, 5);
    }
}
