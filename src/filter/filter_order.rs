use std::cmp::Ordering;

use super::types::{FilterOrderInfo, OrderField, SortDirection};
use crate::database::models::Employee;

/// Applied when the client does not ask for (valid) ordering.
pub const DEFAULT_ORDERING: [FilterOrderInfo; 2] = [
    FilterOrderInfo { field: OrderField::DateJoined, sort: SortDirection::Desc },
    FilterOrderInfo { field: OrderField::Name, sort: SortDirection::Asc },
];

pub struct FilterOrder;

impl FilterOrder {
    /// Parse `name,-date_joined`. Unknown fields are skipped.
    pub fn parse(s: &str) -> Vec<FilterOrderInfo> {
        let mut out: Vec<FilterOrderInfo> = Vec::new();
        for part in s.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let (sort, name) = match trimmed.strip_prefix('-') {
                Some(rest) => (SortDirection::Desc, rest),
                None => (SortDirection::Asc, trimmed),
            };
            match OrderField::parse(name) {
                Some(field) if !out.iter().any(|o| o.field == field) => {
                    out.push(FilterOrderInfo { field, sort });
                }
                Some(_) => {}
                None => tracing::debug!("Ignoring unknown ordering field '{}'", name),
            }
        }
        out
    }

    pub fn effective(infos: &[FilterOrderInfo]) -> &[FilterOrderInfo] {
        if infos.is_empty() {
            &DEFAULT_ORDERING
        } else {
            infos
        }
    }

    /// `ORDER BY` clause; `id` always breaks ties so pages are stable.
    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        let mut parts: Vec<String> = Self::effective(infos)
            .iter()
            .map(|i| format!("\"{}\" {}", i.field.column(), i.sort.to_sql()))
            .collect();
        parts.push("\"id\" ASC".to_string());
        format!("ORDER BY {}", parts.join(", "))
    }

    pub fn compare(infos: &[FilterOrderInfo], a: &Employee, b: &Employee) -> Ordering {
        for info in Self::effective(infos) {
            let ord = match info.field {
                OrderField::Name => a.name.cmp(&b.name),
                OrderField::Email => a.email.cmp(&b.email),
                OrderField::DateJoined => a.date_joined.cmp(&b.date_joined),
            };
            let ord = match info.sort {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.id.cmp(&b.id)
    }
}
