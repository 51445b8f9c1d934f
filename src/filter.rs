use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Categorical value that disables filtering on its field.
pub const ALL: &str = "all";

/// A record that can be searched and filtered by field name.
pub trait Record {
    /// Fields consulted by the free-text query.
    const SEARCHABLE: &'static [&'static str];
    /// Fields that accept an exact-match categorical filter.
    const CATEGORIES: &'static [&'static str];

    /// Raw value of a named field, or `None` if the record has no such field
    /// (or the field is empty for this record).
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub query: String,
    pub filters: BTreeMap<String, String>,
}

impl Criteria {
    #[cfg(test)]
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            query: q.into(),
            filters: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// True when no predicate would reject anything.
    pub fn is_neutral(&self) -> bool {
        self.query.is_empty() && self.filters.values().all(|v| v == ALL)
    }

    /// Parse `{ "query": "...", "filters": { field: value | null } }` out of
    /// request params. Filter keys must be categorical fields of `T`.
    pub fn from_params<T: Record>(params: &serde_json::Value) -> Result<Self, String> {
        let query = match params.get("query") {
            None => String::new(),
            Some(v) if v.is_null() => String::new(),
            Some(v) => match v.as_str() {
                Some(s) => s.to_string(),
                None => return Err("query must be a string".into()),
            },
        };

        let mut filters = BTreeMap::new();
        match params.get("filters") {
            None => {}
            Some(v) if v.is_null() => {}
            Some(v) => {
                let Some(obj) = v.as_object() else {
                    return Err("filters must be an object".into());
                };
                for (field, value) in obj {
                    if !T::CATEGORIES.contains(&field.as_str()) {
                        return Err(format!(
                            "unknown filter field: {} (expected one of {})",
                            field,
                            T::CATEGORIES.join(", ")
                        ));
                    }
                    if value.is_null() {
                        continue;
                    }
                    let Some(s) = value.as_str() else {
                        return Err(format!("filters.{} must be a string", field));
                    };
                    filters.insert(field.clone(), s.to_string());
                }
            }
        }

        Ok(Self { query, filters })
    }
}

pub fn matches_query<T: Record>(record: &T, needle_lower: &str, searchable: &[&str]) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    searchable.iter().any(|name| {
        record
            .field(name)
            .map(|v| v.to_lowercase().contains(needle_lower))
            .unwrap_or(false)
    })
}

pub fn matches_filters<T: Record>(record: &T, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(name, wanted)| {
        if wanted == ALL {
            return true;
        }
        record.field(name).as_deref() == Some(wanted.as_str())
    })
}

/// Stable filter: the records satisfying the query and every categorical
/// filter, in source order.
pub fn filter_records<'a, T: Record>(
    records: &'a [T],
    criteria: &Criteria,
    searchable: &[&str],
) -> Vec<&'a T> {
    if criteria.is_neutral() {
        return records.iter().collect();
    }
    let needle = criteria.query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_query(*r, &needle, searchable) && matches_filters(*r, &criteria.filters))
        .collect()
}
