use super::types::{EmployeeQuery, SqlResult};
use crate::database::models::Employee;

/// Translates an [`EmployeeQuery`] into a parameterized WHERE clause, or
/// evaluates it directly against a record.
pub struct FilterWhere {
    param_values: Vec<String>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Returns the condition (without the `WHERE` keyword) and its bind values.
    pub fn generate(query: &EmployeeQuery, starting_param_index: usize) -> SqlResult {
        let mut filter_where = Self::new(starting_param_index);
        filter_where.build(query)
    }

    fn build(&mut self, query: &EmployeeQuery) -> SqlResult {
        let mut conditions = vec![];

        if let Some(department) = &query.department {
            conditions.push(format!("\"department\" = {}", self.param(department.clone())));
        }
        if let Some(role) = &query.role {
            conditions.push(format!("\"role\" = {}", self.param(role.clone())));
        }
        for term in &query.search {
            let placeholder = self.param(format!("%{}%", escape_like(term)));
            conditions.push(format!(
                "(\"name\" ILIKE {p} OR \"email\" ILIKE {p})",
                p = placeholder
            ));
        }

        let query = if conditions.is_empty() {
            "1=1".to_string()
        } else {
            conditions.join(" AND ")
        };
        SqlResult {
            query,
            params: self.param_values.clone(),
        }
    }

    /// In-process evaluation with the same semantics as the generated SQL.
    pub fn matches(query: &EmployeeQuery, employee: &Employee) -> bool {
        if let Some(department) = &query.department {
            if employee.department.map(|d| d.as_str()) != Some(department.as_str()) {
                return false;
            }
        }
        if let Some(role) = &query.role {
            if employee.role.map(|r| r.as_str()) != Some(role.as_str()) {
                return false;
            }
        }

        let name = employee.name.to_lowercase();
        let email = employee.email.to_lowercase();
        query.search.iter().all(|term| {
            let term = term.to_lowercase();
            name.contains(&term) || email.contains(&term)
        })
    }

    fn param(&mut self, value: String) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escape LIKE wildcards so search terms match literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
