//! Rule engine: the per-record evaluation state machine.
//!
//! One input record goes in; zero, one or several output records come out,
//! depending on which rules match and what their actions are. Rules run in
//! declared order, so a `replace` mutation is visible to the assertions of
//! every later rule. `drop-row` short-circuits the whole pass, including
//! any copies accumulated by earlier `create-row` rules.

use crate::config::{AddedField, CompiledRule, Config, RuleAction};
use crate::error::ConfigResult;
use crate::logs::{log_debug, log_info};
use crate::record::Record;
use crate::schema::OutputSchema;

use super::matcher;
use super::truth::apply_write_truth;

/// Separator used by the `pipe` action to accumulate rule names.
const PIPE_SEPARATOR: &str = " | ";

/// The rule engine for one run: compiled rules plus the output directives
/// they consult.
#[derive(Debug)]
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
    add_fields: Vec<AddedField>,
    rule_field: String,
    drop_unmatched: bool,
}

impl RuleEngine {
    /// Build an engine from a config, compiling every rule pattern.
    pub fn from_config(config: &Config) -> ConfigResult<Self> {
        Ok(Self {
            rules: config.compile_rules()?,
            add_fields: config.add_fields.clone(),
            rule_field: config.output.rule_match_field.clone(),
            drop_unmatched: config.output.drop_unmatched,
        })
    }

    /// Run the full rule pass over one record.
    ///
    /// `file` and `row_number` only feed diagnostics. Returns the output
    /// records for this input record, in emission order.
    pub fn process(
        &self,
        mut record: Record,
        schema: &OutputSchema,
        file: &str,
        row_number: usize,
    ) -> Vec<Record> {
        // Pre-pass backfills: an empty rule tag when the field is part of
        // the schema, then the configured add-field defaults.
        if schema.contains(&self.rule_field) && !record.contains(&self.rule_field) {
            record.insert(self.rule_field.as_str(), "");
        }
        for added in &self.add_fields {
            record.fill_default(&added.name, &added.default_value);
        }

        let mut produced: Vec<Record> = Vec::new();
        let mut any_matched = false;

        for rule in &self.rules {
            log_debug(
                format!("Evaluating rule '{}' on row {}", rule.name, row_number),
                4,
            );

            let outcome = matcher::evaluate(&record, rule);
            if !outcome.matched {
                continue;
            }

            log_info(
                format!("Match rule {} in {} at row {}", rule.name, file, row_number),
                2,
            );
            any_matched = true;

            match rule.action {
                RuleAction::DropRow => {
                    log_info(
                        format!("Dropping row {} due to rule '{}'", row_number, rule.name),
                        2,
                    );
                    return Vec::new();
                }

                RuleAction::Replace => {
                    for assertion in &rule.assertions {
                        for field in &assertion.fields {
                            let replaced = record.get(field).map(|value| {
                                assertion
                                    .regex
                                    .replace_all(value, rule.replace_by.as_str())
                                    .into_owned()
                            });
                            if let Some(value) = replaced {
                                record.insert(field.as_str(), value);
                            }
                        }
                    }
                    apply_write_truth(&mut record, rule.write_truth.as_ref(), &outcome.summary);
                }

                RuleAction::CreateRow => {
                    let mut copy = record.clone();
                    apply_write_truth(&mut copy, rule.write_truth.as_ref(), &outcome.summary);
                    if schema.contains(&self.rule_field) {
                        copy.insert(self.rule_field.as_str(), rule.name.as_str());
                    }
                    produced.push(copy);
                }

                RuleAction::Pipe => {
                    apply_write_truth(&mut record, rule.write_truth.as_ref(), &outcome.summary);
                    if schema.contains(&self.rule_field) {
                        let tag = match record.get(&self.rule_field) {
                            Some(existing) if !existing.is_empty() => {
                                format!("{}{}{}", existing, PIPE_SEPARATOR, rule.name)
                            }
                            _ => rule.name.clone(),
                        };
                        record.insert(self.rule_field.as_str(), tag);
                    }
                }
            }
        }

        if !any_matched {
            if self.drop_unmatched {
                log_info(format!("Dropping row {} due to no match", row_number), 4);
                return Vec::new();
            }
            return vec![record];
        }

        // create-row copies replace the (possibly mutated) original.
        if produced.is_empty() {
            return vec![record];
        }
        produced
    }
}
