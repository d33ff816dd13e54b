//! Latest known state of one source collection.

/// Snapshot of a collection query.
///
/// Revalidation keeps the previous `data` visible while `loading` is set; an
/// error may coexist with stale data. Consumers decide how much of that to
/// trust; the merger trusts none of it unless the query is error-free.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<Vec<T>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    /// Nothing fetched yet; the first request is in flight.
    pub fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn ready(data: Vec<T>) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(error.into()),
        }
    }

    /// Collection contents, only when resolved and error-free.
    pub fn resolved(&self) -> Option<&[T]> {
        if self.error.is_some() {
            return None;
        }
        self.data.as_deref()
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::pending()
    }
}
