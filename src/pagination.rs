//! Offset pagination with whitelisted sorting.
//!
//! A [`PaginationRequest`] arrives straight from the query string and is
//! never trusted: page and limit are normalized, and the sort column is only
//! honoured when it is an exact member of the listing's allow list. The
//! [`paginate`] driver counts the filtered rows before fetching the window so
//! the returned [`PaginationResult`] always reflects the full result set.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_SORT_COLUMN: &str = "created_at";

/// Ordering direction applied to the sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Only a case-insensitive `asc` selects ascending order.
    pub fn parse(value: &str) -> Self {
        if value.to_uppercase() == "ASC" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A validated ordering. `column` always comes from an allow list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            column: DEFAULT_SORT_COLUMN,
            direction: SortDirection::Desc,
        }
    }
}

/// Raw paging parameters as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// The slice of rows to fetch once the request has been normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub sort: Sort,
    pub offset: i64,
    pub limit: i64,
}

impl PaginationRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn sort(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(sort_order.into());
        self
    }

    /// Configured limit, or [`DEFAULT_LIMIT`] when unset or non-positive.
    pub fn limit(&self) -> i64 {
        self.limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_LIMIT)
    }

    /// Configured 1-based page, or [`DEFAULT_PAGE`] when unset or non-positive.
    pub fn page(&self) -> i64 {
        self.page.filter(|page| *page > 0).unwrap_or(DEFAULT_PAGE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Resolves the ordering against `allowed`.
    ///
    /// Unknown or missing columns fall back to `created_at DESC` and the
    /// requested direction is discarded with them.
    pub fn resolve_sort(&self, allowed: &[&'static str]) -> Sort {
        let requested = self.sort_by.as_deref().unwrap_or_default();
        match allowed.iter().copied().find(|column| *column == requested) {
            Some(column) => Sort {
                column,
                direction: SortDirection::parse(self.sort_order.as_deref().unwrap_or_default()),
            },
            None => Sort::default(),
        }
    }

    pub fn window(&self, allowed: &[&'static str]) -> Window {
        Window {
            sort: self.resolve_sort(allowed),
            offset: self.offset(),
            limit: self.limit(),
        }
    }

    /// Metadata for a result set of `total_rows` matching rows.
    pub fn result(&self, total_rows: i64) -> PaginationResult {
        let limit = self.limit();
        PaginationResult {
            limit,
            page: self.page(),
            total_rows,
            total_pages: total_pages(total_rows, limit),
            sort_by: self.sort_by.clone().unwrap_or_default(),
            sort_order: self.sort_order.clone().unwrap_or_default(),
        }
    }
}

/// `ceil(total_rows / limit)`, zero for an empty result set.
pub fn total_pages(total_rows: i64, limit: i64) -> i64 {
    if total_rows <= 0 || limit <= 0 {
        return 0;
    }
    total_rows / limit + i64::from(total_rows % limit != 0)
}

/// Pagination metadata returned alongside a page of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResult {
    pub limit: i64,
    pub page: i64,
    pub total_rows: i64,
    pub total_pages: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sort_by: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sort_order: String,
}

/// One page of rows together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationResult,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: PaginationResult) -> Self {
        Self { items, pagination }
    }

    pub fn try_map<U, E, F>(self, f: F) -> Result<Paginated<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated {
            items,
            pagination: self.pagination,
        })
    }
}

/// Runs a paginated listing against `conn`.
///
/// `count` must apply the same filter as `fetch` and ignore limit/offset; it
/// runs first. `fetch` receives the normalized [`Window`] and loads the
/// ordered slice. Either failure aborts the listing.
pub fn paginate<C, T, E>(
    conn: &mut C,
    request: &PaginationRequest,
    allowed: &[&'static str],
    count: impl FnOnce(&mut C) -> Result<i64, E>,
    fetch: impl FnOnce(&mut C, Window) -> Result<Vec<T>, E>,
) -> Result<Paginated<T>, E> {
    let total_rows = count(conn)?;
    let items = fetch(conn, request.window(allowed))?;
    Ok(Paginated::new(items, request.result(total_rows)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["created_at", "title", "is_public"];

    #[test]
    fn limit_and_page_fall_back_to_defaults() {
        for value in [None, Some(0), Some(-5)] {
            let request = PaginationRequest {
                page: value,
                limit: value,
                ..PaginationRequest::default()
            };
            assert_eq!(request.limit(), 10);
            assert_eq!(request.page(), 1);
            assert_eq!(request.offset(), 0);
        }
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(PaginationRequest::new(3, 25).offset(), 50);
        assert_eq!(PaginationRequest::new(1, 7).offset(), 0);
        assert_eq!(PaginationRequest::new(2, 5).offset(), 5);
    }

    #[test]
    fn unknown_sort_column_uses_default_ordering() {
        let request = PaginationRequest::new(1, 10).sort("password; DROP TABLE projects", "ASC");
        assert_eq!(request.resolve_sort(ALLOWED), Sort::default());
    }

    #[test]
    fn sort_column_match_is_case_sensitive() {
        let request = PaginationRequest::new(1, 10).sort("Title", "asc");
        assert_eq!(request.resolve_sort(ALLOWED), Sort::default());
    }

    #[test]
    fn allowed_column_keeps_requested_direction() {
        let request = PaginationRequest::new(1, 10).sort("title", "asc");
        assert_eq!(
            request.resolve_sort(ALLOWED),
            Sort {
                column: "title",
                direction: SortDirection::Asc,
            }
        );
    }

    #[test]
    fn anything_but_asc_sorts_descending() {
        for order in ["", "DESC", "ascending", "up", "  asc"] {
            let request = PaginationRequest::new(1, 10).sort("title", order);
            assert_eq!(
                request.resolve_sort(ALLOWED).direction,
                SortDirection::Desc,
                "order {order:?}"
            );
        }
    }

    #[test]
    fn missing_sort_by_uses_default_ordering() {
        let request = PaginationRequest {
            sort_order: Some("ASC".to_string()),
            ..PaginationRequest::default()
        };
        assert_eq!(request.resolve_sort(ALLOWED), Sort::default());
    }

    #[test]
    fn total_pages_is_ceiling_and_zero_when_empty() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(12, 5), 3);
    }

    #[test]
    fn result_echoes_request_and_counts() {
        let request = PaginationRequest::new(2, 5).sort("title", "ASC");
        let result = request.result(12);
        assert_eq!(
            result,
            PaginationResult {
                limit: 5,
                page: 2,
                total_rows: 12,
                total_pages: 3,
                sort_by: "title".to_string(),
                sort_order: "ASC".to_string(),
            }
        );
    }

    #[test]
    fn unrequested_sort_is_left_out_of_metadata() {
        let json = serde_json::to_value(PaginationRequest::new(1, 10).result(3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"limit": 10, "page": 1, "total_rows": 3, "total_pages": 1})
        );

        let sorted = PaginationRequest::new(1, 10).sort("title", "asc").result(3);
        let json = serde_json::to_value(sorted).unwrap();
        assert_eq!(json["sort_by"], "title");
        assert_eq!(json["sort_order"], "asc");
    }

    #[test]
    fn paginate_counts_then_fetches_window() {
        let mut rows: Vec<i64> = (1..=12).collect();
        let request = PaginationRequest::new(2, 5);
        let page = paginate(
            &mut rows,
            &request,
            ALLOWED,
            |rows| Ok::<_, ()>(rows.len() as i64),
            |rows, window| {
                assert_eq!(window.sort, Sort::default());
                Ok(rows
                    .iter()
                    .skip(window.offset as usize)
                    .take(window.limit as usize)
                    .copied()
                    .collect())
            },
        )
        .unwrap();

        assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.pagination.total_rows, 12);
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn paginate_propagates_count_failure_without_fetching() {
        let mut fetched = false;
        let result: Result<Paginated<i64>, &str> = paginate(
            &mut fetched,
            &PaginationRequest::default(),
            ALLOWED,
            |_| Err("count failed"),
            |fetched, _| {
                *fetched = true;
                Ok(vec![])
            },
        );
        assert_eq!(result.unwrap_err(), "count failed");
        assert!(!fetched);
    }
}
