use crate::model::Record;
use crate::schema::EntitySchema;

/// True when any searchable field of `record` contains `query` as a
/// case-insensitive substring. An empty query matches everything.
pub fn matches(record: &Record, schema: &EntitySchema, query: &str) -> bool {
    contains_lowered(record, schema, &query.to_lowercase())
}

/// Lazy, order-preserving projection of `records` under a search query.
/// Never reorders, never duplicates, never mutates.
pub fn filter<'a>(
    records: &'a [Record],
    schema: &'a EntitySchema,
    query: &str,
) -> impl Iterator<Item = &'a Record> + 'a {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(move |record| contains_lowered(record, schema, &needle))
}

fn contains_lowered(record: &Record, schema: &EntitySchema, needle: &str) -> bool {
    schema.searchable_fields().any(|field| {
        record
            .get(&field.name)
            .map(|value| value.to_string().to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, Fields};
    use crate::schema::USERS;

    fn user(id: &str, name: &str, email: &str) -> Record {
        let mut fields = Fields::new();
        fields.insert("name".into(), FieldValue::text(name));
        fields.insert("email".into(), FieldValue::text(email));
        Record::seeded(id, fields)
    }

    #[test]
    fn empty_query_yields_everything_in_order() {
        let records = vec![
            user("1", "John Doe", "john@x.com"),
            user("2", "Jane Smith", "jane@x.com"),
        ];

        let names: Vec<&str> = filter(&records, &USERS, "")
            .map(|r| r.text("name"))
            .collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith"]);
    }

    #[test]
    fn matches_searchable_fields_case_insensitively() {
        let records = vec![
            user("1", "John Doe", "john@x.com"),
            user("2", "Jane Smith", "jane@x.com"),
        ];

        let ids: Vec<&str> = filter(&records, &USERS, "jane")
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2"]);

        let ids: Vec<&str> = filter(&records, &USERS, "X.COM")
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn no_match_yields_nothing() {
        let records = vec![user("1", "John Doe", "john@x.com")];
        assert_eq!(filter(&records, &USERS, "zzz").count(), 0);
    }

    #[test]
    fn non_searchable_fields_are_ignored() {
        let mut record = user("1", "John Doe", "john@x.com");
        record
            .fields
            .insert("role".into(), FieldValue::text("Admin"));

        assert!(!matches(&record, &USERS, "admin"));
    }
}
