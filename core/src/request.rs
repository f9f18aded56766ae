use crate::filter::{FilterChain, RowFilter};
use crate::selector::{RowSelector, RowSet};

/// A finished read, as handed to an [`ExecutionAdapter`](crate::adapter::ExecutionAdapter).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadRowsRequest {
    /// Fully qualified table name.
    pub table_name: String,
    pub app_profile_id: Option<String>,
    pub rows: RowSet,
    /// The filter chain collapsed into a single predicate.
    pub filter: Option<RowFilter>,
    /// `0` means no limit.
    pub rows_limit: u64,
}

impl ReadRowsRequest {
    pub fn new(
        table_name: impl Into<String>,
        app_profile_id: Option<String>,
        selector: RowSelector,
        filters: &FilterChain,
    ) -> Self {
        let (rows, rows_limit) = selector.into_parts();
        Self {
            table_name: table_name.into(),
            app_profile_id,
            rows,
            filter: filters.to_filter(),
            rows_limit,
        }
    }

    /// Number of predicates the request carries once the chain is unwrapped.
    pub fn filter_count(&self) -> usize {
        match &self.filter {
            None => 0,
            Some(RowFilter::Chain(filters)) => filters.len(),
            Some(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Field, exact_match};

    #[test]
    fn request_collects_selector_and_chain() {
        let mut selector = RowSelector::new();
        selector.add_keys(["k"]).unwrap();
        selector.limit(1);
        let chain: FilterChain = [
            exact_match(Field::Family, "f"),
            exact_match(Field::Qualifier, "q"),
        ]
        .into_iter()
        .collect();

        let request = ReadRowsRequest::new("projects/p/instances/i/tables/t", None, selector, &chain);
        assert_eq!(request.rows, RowSet::Keys(vec!["k".into()]));
        assert_eq!(request.rows_limit, 1);
        assert_eq!(request.filter_count(), 2);
    }
}
