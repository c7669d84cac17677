//! Query parameters for PocketBase collection requests.
//!
//! The backend accepts `perPage`, `filter`, `sort` and `expand` on every
//! `/api/collections/{name}/records` request. The filter is a small boolean
//! grammar over field comparisons; [`Filter`] builds those strings but the
//! client never inspects them.

use std::fmt;

/// Parameters attached to a collection query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub per_page: Option<u32>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub expand: Option<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sort key, prefixed with `-` for descending (e.g. `-start_date`)
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Relation field(s) the backend should expand inline
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Query pairs in a stable order, skipping unset parameters.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(per_page) = self.per_page {
            pairs.push(("perPage", per_page.to_string()));
        }
        if let Some(ref filter) = self.filter {
            pairs.push(("filter", filter.clone()));
        }
        if let Some(ref sort) = self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(ref expand) = self.expand {
            pairs.push(("expand", expand.clone()));
        }
        pairs
    }
}

/// PocketBase filter expression.
///
/// Rendered wrapped in parentheses, e.g. `(vid_urls!=''||updates!='')`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    expr: String,
    compound: bool,
}

impl Filter {
    /// `field!=''`
    pub fn not_empty(field: &str) -> Self {
        Self {
            expr: format!("{}!=''", field),
            compound: false,
        }
    }

    /// `field='value'`, with backslashes and single quotes in the value escaped
    pub fn eq(field: &str, value: &str) -> Self {
        let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
        Self {
            expr: format!("{}='{}'", field, escaped),
            compound: false,
        }
    }

    /// An expression passed through untouched
    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            compound: true,
        }
    }

    pub fn and(self, other: Filter) -> Self {
        self.combine("&&", other)
    }

    pub fn or(self, other: Filter) -> Self {
        self.combine("||", other)
    }

    fn combine(self, op: &str, other: Filter) -> Self {
        Self {
            expr: format!("{}{}{}", self.grouped(), op, other.grouped()),
            compound: true,
        }
    }

    fn grouped(&self) -> String {
        if self.compound {
            format!("({})", self.expr)
        } else {
            self.expr.clone()
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.to_string()
    }
}
