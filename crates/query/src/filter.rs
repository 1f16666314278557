//! Dimension filters
//!
//! A dimension filter narrows the rows of a report: an allow-list of item ids,
//! an exclude-list, and search criteria built from clauses.

use crate::clause::Criterion;
use crate::error::{QueryError, Result};
use crate::wire::SearchRequest;

/// Item ids and search criteria applied to the report dimension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionFilter {
    item_ids: Vec<String>,
    exclude_item_ids: Vec<String>,
    criteria: Vec<Criterion>,
}

impl DimensionFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter from top-level search criteria
    pub fn search<I, C>(criteria: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criterion>,
    {
        Self::new().with_criteria(criteria)
    }

    /// Add one top-level criterion
    pub fn with_criterion(mut self, criterion: impl Into<Criterion>) -> Self {
        self.criteria.push(criterion.into());
        self
    }

    /// Add top-level criteria, keeping their order
    pub fn with_criteria<I, C>(mut self, criteria: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criterion>,
    {
        self.criteria.extend(criteria.into_iter().map(Into::into));
        self
    }

    /// Only report these items
    pub fn with_item_ids<I, S>(mut self, item_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_ids.extend(item_ids.into_iter().map(Into::into));
        self
    }

    /// Leave these items out of the report
    pub fn excluding<I, S>(mut self, item_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_item_ids
            .extend(item_ids.into_iter().map(Into::into));
        self
    }

    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    pub fn exclude_item_ids(&self) -> &[String] {
        &self.exclude_item_ids
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Always true; the API then reports totals for the searched items only
    pub fn include_search_total(&self) -> bool {
        true
    }

    /// Build the `search` object of a report request
    pub fn compile(&self) -> Result<SearchRequest> {
        let (item_id, item_ids) = match self.item_ids.as_slice() {
            [] => (None, None),
            [single] => (Some(single.clone()), None),
            many => (None, Some(many.to_vec())),
        };

        let exclude_item_ids =
            (!self.exclude_item_ids.is_empty()).then(|| self.exclude_item_ids.clone());

        let clause = if self.criteria.is_empty() {
            None
        } else {
            Some(self.compile_search()?)
        };

        Ok(SearchRequest {
            include_search_total: self.include_search_total(),
            item_id,
            item_ids,
            exclude_item_ids,
            clause,
        })
    }

    /// Render the criteria into one clause string
    ///
    /// A lone clause renders as its leaf text. Otherwise each criterion must be
    /// a conjunction or a group; they are concatenated in order.
    fn compile_search(&self) -> Result<String> {
        if let [Criterion::Clause(clause)] = self.criteria.as_slice() {
            return Ok(clause.compile());
        }

        let mut out = String::new();
        for criterion in &self.criteria {
            if let Criterion::Clause(clause) = criterion {
                return Err(QueryError::configuration(format!(
                    "clause '{}' must be composed into a conjunction when combined with other criteria",
                    clause.compile()
                )));
            }
            out.push_str(&criterion.compile()?);
        }
        Ok(out)
    }
}
