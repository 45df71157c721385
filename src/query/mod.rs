//! Database query model: filter trees, sorts and pagination.
//!
//! A query is built locally and only becomes JSON through the codec, so a
//! malformed filter (wrong predicate for a property type, empty compound) is
//! rejected here instead of as an opaque API error.

pub mod filter;
pub mod sort;

use crate::pagination::Pagination;
use crate::types::ValidationError;

pub use filter::{
    CheckboxPredicate, DatabaseQueryPredicate, DatePredicate, FilesPredicate, FilterCategory,
    FormulaPredicate, MultiSelectPredicate, NumberPredicate, PeoplePredicate, PropertyFilter,
    RelationPredicate, SelectPredicate, TextPredicate,
};
pub use sort::{Direction, PropertySort, SortKey, SortTerm, TimestampKey};

/// A node of a filter tree. Compound nodes always hold at least one operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Property(PropertyFilter),
    Or(Vec<Filter>),
    And(Vec<Filter>),
}

impl Filter {
    pub fn or<I, F>(filters: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        let operands: Vec<Filter> = filters.into_iter().map(Into::into).collect();
        if operands.is_empty() {
            return Err(ValidationError::EmptyCompound("or"));
        }
        Ok(Filter::Or(operands))
    }

    pub fn and<I, F>(filters: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        let operands: Vec<Filter> = filters.into_iter().map(Into::into).collect();
        if operands.is_empty() {
            return Err(ValidationError::EmptyCompound("and"));
        }
        Ok(Filter::And(operands))
    }
}

impl From<PropertyFilter> for Filter {
    fn from(filter: PropertyFilter) -> Self {
        Filter::Property(filter)
    }
}

/// Builder for a database query.
///
/// `all` and `any` accumulate operands in call order. The root filter is
/// derived from them when the query is serialized:
///
/// - only `all` operands: `and` of them
/// - only `any` operands: `or` of them
/// - both: `and` of the `all` operands followed by one `or` of the `any` operands
///
/// A compound with a single operand collapses to that operand.
///
/// ```
/// use notionkit::{DatabaseQuery, PropertyFilter, PropertySort, TextPredicate};
///
/// let query = DatabaseQuery::new()
///     .any([
///         PropertyFilter::title("Name", TextPredicate::Contains("tea".into())),
///         PropertyFilter::title("Name", TextPredicate::Contains("coffee".into())),
///     ])
///     .sort(PropertySort::new().ascending("Name"));
/// assert!(query.root_filter().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatabaseQuery {
    all: Vec<Filter>,
    any: Vec<Filter>,
    sort: PropertySort,
    pagination: Pagination,
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires every one of `filters` to match.
    pub fn all<I, F>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        self.all.extend(filters.into_iter().map(Into::into));
        self
    }

    /// Requires at least one of `filters` to match.
    pub fn any<I, F>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        self.any.extend(filters.into_iter().map(Into::into));
        self
    }

    /// Adds a single required filter; same as `all([filter])`.
    pub fn filter(self, filter: impl Into<Filter>) -> Self {
        self.all([filter.into()])
    }

    /// Appends sort terms after any already present.
    pub fn sort(mut self, sort: PropertySort) -> Self {
        self.sort = std::mem::take(&mut self.sort).then(sort);
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn sorts(&self) -> &PropertySort {
        &self.sort
    }

    pub fn page(&self) -> &Pagination {
        &self.pagination
    }

    /// Same query, asking for a different page.
    pub fn with_pagination(&self, pagination: Pagination) -> Self {
        self.clone().pagination(pagination)
    }

    /// The filter tree actually sent, `None` meaning no filtering.
    pub fn root_filter(&self) -> Option<Filter> {
        let any = collapse(self.any.clone(), Filter::Or);
        let mut all = self.all.clone();
        match any {
            None => collapse(all, Filter::And),
            Some(any) if all.is_empty() => Some(any),
            Some(any) => {
                all.push(any);
                collapse(all, Filter::And)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.any.is_empty() && self.sort.is_empty()
    }
}

fn collapse(mut operands: Vec<Filter>, compound: fn(Vec<Filter>) -> Filter) -> Option<Filter> {
    match operands.len() {
        0 => None,
        1 => operands.pop(),
        _ => Some(compound(operands)),
    }
}
