//! Output schema resolution.
//!
//! The output schema is the frozen ordered field list written as the CSV
//! header and used to project every emitted record. It is resolved once,
//! from the first non-empty record of the run plus the config directives,
//! and owned as a separate value — the config is never mutated to cache it.
//! The pipeline holds the resolved schema in a `OnceCell`.

use crate::config::Config;
use crate::record::Record;

/// The frozen ordered output field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    fields: Vec<String>,
}

impl OutputSchema {
    /// Resolve the schema from the config and one sample record.
    ///
    /// Derivation order:
    /// 1. Start from the sample record's own field order.
    /// 2. Insert each `add-fields` name not already present immediately
    ///    after its `after` field, or at the end when `after` is absent or
    ///    unknown.
    /// 3. When `output.fields` is configured, that list is used verbatim
    ///    instead of the derived one.
    /// 4. The rule-identifier field (position 0) and file-provenance field
    ///    (position 1) are ensured in either case, so an explicit field
    ///    list never silently loses provenance.
    pub fn resolve(config: &Config, sample: &Record) -> Self {
        let mut derived: Vec<String> = sample.field_names().map(String::from).collect();

        for added in &config.add_fields {
            if derived.iter().any(|field| *field == added.name) {
                continue;
            }
            let index = added
                .after
                .as_ref()
                .and_then(|after| derived.iter().position(|field| field == after))
                .map(|position| position + 1)
                .unwrap_or(derived.len());
            derived.insert(index, added.name.clone());
        }

        let mut fields = match &config.output.fields {
            Some(explicit) => explicit.clone(),
            None => derived,
        };

        let rule_field = &config.output.rule_match_field;
        if !fields.iter().any(|field| field == rule_field) {
            fields.insert(0, rule_field.clone());
        }
        let file_field = &config.output.file_processed_field;
        if !fields.iter().any(|field| field == file_field) {
            fields.insert(1.min(fields.len()), file_field.clone());
        }

        Self { fields }
    }

    /// The ordered field names.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// True when `name` is part of the schema.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{example_config, AddedField, Config};

    fn sample() -> Record {
        Record::from_pairs([("id", "1"), ("msg", "ERROR: fail")])
    }

    #[test]
    fn test_derived_schema_with_added_field_after() {
        let config = example_config();
        let schema = OutputSchema::resolve(&config, &sample());

        assert_eq!(
            schema.fields(),
            &["_rule", "_file", "id", "status", "msg"]
        );
    }

    #[test]
    fn test_added_field_unknown_after_goes_last() {
        let mut config = Config::default();
        config.add_fields.push(AddedField {
            name: "status".to_string(),
            after: Some("nope".to_string()),
            default_value: String::new(),
        });

        let schema = OutputSchema::resolve(&config, &sample());
        assert_eq!(schema.fields(), &["_rule", "_file", "id", "msg", "status"]);
    }

    #[test]
    fn test_added_field_already_present_not_duplicated() {
        let mut config = Config::default();
        config.add_fields.push(AddedField {
            name: "msg".to_string(),
            after: None,
            default_value: String::new(),
        });

        let schema = OutputSchema::resolve(&config, &sample());
        assert_eq!(schema.fields(), &["_rule", "_file", "id", "msg"]);
    }

    #[test]
    fn test_explicit_fields_used_verbatim_with_provenance_ensured() {
        let mut config = Config::default();
        config.output.fields = Some(vec!["msg".to_string(), "id".to_string()]);

        let schema = OutputSchema::resolve(&config, &sample());
        assert_eq!(schema.fields(), &["_rule", "_file", "msg", "id"]);
    }

    #[test]
    fn test_provenance_fields_not_duplicated() {
        let mut config = Config::default();
        config.output.fields = Some(vec![
            "id".to_string(),
            "_rule".to_string(),
            "_file".to_string(),
        ]);

        let schema = OutputSchema::resolve(&config, &sample());
        assert_eq!(schema.fields(), &["id", "_rule", "_file"]);
    }

    #[test]
    fn test_renamed_provenance_fields() {
        let mut config = Config::default();
        config.output.rule_match_field = "matched_by".to_string();
        config.output.file_processed_field = "origin".to_string();

        let schema = OutputSchema::resolve(&config, &sample());
        assert_eq!(schema.fields(), &["matched_by", "origin", "id", "msg"]);
        assert!(schema.contains("matched_by"));
        assert!(!schema.contains("_rule"));
    }
}
