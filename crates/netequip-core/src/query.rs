// Client-side filtering over a loaded collection.

use chrono::NaiveDateTime;

use crate::schema::EntitySchema;

/// Search text plus the entity's discrete filter selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query<F> {
    pub search: String,
    pub filter: F,
}

impl<F: Default + PartialEq> Query<F> {
    /// `true` when nothing narrows the collection.
    pub fn is_default(&self) -> bool {
        self.search.trim().is_empty() && self.filter == F::default()
    }
}

/// Records matching `query`, in their original order.
///
/// The search text is trimmed and compared case-insensitively against
/// every searchable field; a record must also satisfy every active filter.
pub fn filter_records<'a, S: EntitySchema>(
    records: &'a [S::Record],
    query: &Query<S::Filter>,
    now: NaiveDateTime,
) -> Vec<&'a S::Record> {
    let needle = query.search.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            let found = needle.is_empty()
                || S::search_fields(record)
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle));
            found && S::matches(&query.filter, record, now)
        })
        .collect()
}
