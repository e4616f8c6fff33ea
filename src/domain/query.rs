use std::fmt;

use crate::domain::value::PageSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Comparison modifier appended to a filter key in bracket notation (`name[prefix]=foo`).
pub enum Modifier {
    Ne,
    Prefix,
    NotPrefix,
    Gte,
    Gt,
    Lt,
    Lte,
    Min,
    Max,
    Exists,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ne => "ne",
            Self::Prefix => "prefix",
            Self::NotPrefix => "not_prefix",
            Self::Gte => "gte",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Min => "min",
            Self::Max => "max",
            Self::Exists => "exists",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One filter condition as sent on the query string.
pub struct Filter {
    path: Vec<String>,
    modifier: Option<Modifier>,
    value: String,
}

impl Filter {
    /// Key segments, outermost first (`["vars", "email"]`).
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn modifier(&self) -> Option<Modifier> {
        self.modifier
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, Default)]
/// Options for a paginated list query.
///
/// Filters are passed through unchanged; the server decides which keys it accepts.
pub struct QueryOptions {
    filters: Vec<Filter>,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    page_size: PageSize,
    offset: u64,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact match: `field=value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl fmt::Display) -> Self {
        self.filters.push(Filter {
            path: vec![field.into()],
            modifier: None,
            value: value.to_string(),
        });
        self
    }

    /// Comparison: `field[modifier]=value`.
    pub fn filter(
        mut self,
        field: impl Into<String>,
        modifier: Modifier,
        value: impl fmt::Display,
    ) -> Self {
        self.filters.push(Filter {
            path: vec![field.into()],
            modifier: Some(modifier),
            value: value.to_string(),
        });
        self
    }

    /// Custom variable filter: `vars[name]=value` or `vars[name][modifier]=value`.
    pub fn var(
        mut self,
        name: impl Into<String>,
        modifier: Option<Modifier>,
        value: impl fmt::Display,
    ) -> Self {
        self.filters.push(Filter {
            path: vec!["vars".to_owned(), name.into()],
            modifier,
            value: value.to_string(),
        });
        self
    }

    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    pub fn sort_dir(mut self, dir: SortDirection) -> Self {
        self.sort_dir = Some(dir);
        self
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Number of items to skip before the first page.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn page_size_value(&self) -> PageSize {
        self.page_size
    }

    pub fn offset_value(&self) -> u64 {
        self.offset
    }
}
