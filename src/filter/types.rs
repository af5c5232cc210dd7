use serde::{Deserialize, Serialize};

/// Selection criteria for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeQuery {
    /// Exact match on the stored department value.
    pub department: Option<String>,
    /// Exact match on the stored role value.
    pub role: Option<String>,
    /// Every term must appear (case-insensitively) in the name or the email.
    pub search: Vec<String>,
    pub ordering: Vec<FilterOrderInfo>,
}

impl EmployeeQuery {
    /// Build a query from raw query-string values. Blank values mean "no filter".
    pub fn from_params(
        department: Option<&str>,
        role: Option<&str>,
        search: Option<&str>,
        ordering: Option<&str>,
    ) -> Self {
        Self {
            department: non_blank(department),
            role: non_blank(role),
            search: search.map(split_search_terms).unwrap_or_default(),
            ordering: ordering
                .map(super::filter_order::FilterOrder::parse)
                .unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Search terms are separated by whitespace and/or commas.
pub fn split_search_terms(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderField {
    Name,
    Email,
    DateJoined,
}

impl OrderField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(OrderField::Name),
            "email" => Some(OrderField::Email),
            "date_joined" => Some(OrderField::DateJoined),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            OrderField::Name => "name",
            OrderField::Email => "email",
            OrderField::DateJoined => "date_joined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOrderInfo {
    pub field: OrderField,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_dropped() {
        let query = EmployeeQuery::from_params(Some(""), Some("  "), Some(""), None);
        assert_eq!(query, EmployeeQuery::default());
    }

    #[test]
    fn search_splits_on_whitespace_and_commas() {
        assert_eq!(split_search_terms("john, doe  x"), vec!["john", "doe", "x"]);
        assert!(split_search_terms(" , ").is_empty());
    }
}
