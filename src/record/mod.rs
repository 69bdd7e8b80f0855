//! Ordered record type for CSV rows.
//!
//! A [`Record`] is an ordered mapping from field name to string value.
//! Insertion order is preserved, overwriting a field keeps its position,
//! and new fields append at the end. The "backfill a missing field" and
//! "project onto a schema" behaviors the pipeline relies on are explicit
//! methods here instead of incidental map operations.

/// An ordered field → value mapping representing one CSV row.
///
/// One input record may branch into several output records during rule
/// processing; [`Clone`] provides the snapshot copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build a record from `(name, value)` pairs, keeping their order.
    ///
    /// A repeated name overwrites the earlier value in place.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.insert(name.into(), value.into());
        }
        record
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every value is an empty string (or there are no fields).
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }

    /// Look up a field value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// True when the field exists, regardless of its value.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    /// Set a field value.
    ///
    /// An existing field keeps its position; a new field appends.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Remove a field, returning its value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Backfill: set `name` to `default` when the field is absent or empty.
    pub fn fill_default(&mut self, name: &str, default: &str) {
        match self.get(name) {
            Some(value) if !value.is_empty() => {}
            _ => self.insert(name, default),
        }
    }

    /// Field names in record order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(field, _)| field.as_str())
    }

    /// `(name, value)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Project the record onto an ordered field list.
    ///
    /// Returns one value per schema field, in schema order: the record's
    /// value when present, the empty string when missing. Record fields
    /// not named by the schema are dropped.
    pub fn project(&self, schema_fields: &[String]) -> Vec<String> {
        schema_fields
            .iter()
            .map(|name| self.get(name).unwrap_or("").to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let record = Record::from_pairs([("id", "1"), ("msg", "hello"), ("level", "info")]);
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["id", "msg", "level"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut record = Record::from_pairs([("a", "1"), ("b", "2"), ("c", "3")]);
        record.insert("b", "changed");

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(record.get("b"), Some("changed"));
    }

    #[test]
    fn test_fill_default_only_when_missing_or_empty() {
        let mut record = Record::from_pairs([("status", ""), ("id", "7")]);

        record.fill_default("status", "new");
        record.fill_default("id", "0");
        record.fill_default("source", "import");

        assert_eq!(record.get("status"), Some("new"));
        assert_eq!(record.get("id"), Some("7"));
        assert_eq!(record.get("source"), Some("import"));
    }

    #[test]
    fn test_project_drops_and_backfills() {
        let record = Record::from_pairs([("id", "1"), ("extra", "x"), ("msg", "hi")]);
        let schema = vec!["id".to_string(), "status".to_string(), "msg".to_string()];

        assert_eq!(record.project(&schema), vec!["1", "", "hi"]);
    }

    #[test]
    fn test_remove() {
        let mut record = Record::from_pairs([("a", "1"), ("b", "2")]);
        assert_eq!(record.remove("a"), Some("1".to_string()));
        assert_eq!(record.remove("a"), None);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_is_blank() {
        let record = Record::from_pairs([("a", ""), ("b", "")]);
        assert!(record.is_blank());

        let record = Record::from_pairs([("a", ""), ("b", "x")]);
        assert!(!record.is_blank());
    }
}
