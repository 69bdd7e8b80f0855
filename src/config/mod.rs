//! Rule configuration: the JSON document driving a transformation run.
//!
//! The config carries three top-level blocks: `add-fields` (fields to
//! introduce into the output), `rules` (the ordered regex rules) and
//! `output` (schema and provenance directives). Deserialization is typed,
//! so an unknown rule action fails the load instead of silently doing
//! nothing, and every regex is compiled eagerly into a [`CompiledRule`] —
//! a broken pattern aborts the run before any row is read.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// A complete transformation config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Fields to introduce into the output schema, with placement and default.
    #[serde(default)]
    pub add_fields: Vec<AddedField>,

    /// Rules, evaluated per record in declared order.
    #[serde(default)]
    pub rules: Vec<Rule>,

    /// Output schema and provenance directives.
    #[serde(default)]
    pub output: OutputConfig,
}

/// A field to add to the output schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AddedField {
    /// Field name.
    pub name: String,

    /// Insert immediately after this field; appended when absent or unknown.
    #[serde(default)]
    pub after: Option<String>,

    /// Default value backfilled into rows missing (or empty in) the field.
    #[serde(default)]
    pub default_value: String,
}

/// A single transformation rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Rule {
    /// Rule name, used for provenance tagging.
    #[serde(default = "default_rule_name")]
    pub name: String,

    /// What a match does to the record.
    pub action: RuleAction,

    /// Match case-sensitively. Off by default.
    #[serde(default)]
    pub case_sensitive: bool,

    /// Assertions that must all be satisfied for the rule to match.
    #[serde(rename = "match", default)]
    pub assertions: Vec<Assertion>,

    /// Replacement string for the `replace` action.
    #[serde(default)]
    pub replace_by: String,

    /// Optional annotation to write into the record on match.
    #[serde(default)]
    pub write_truth: Option<WriteTruth>,
}

fn default_rule_name() -> String {
    "no-name".to_string()
}

/// The effect a matched rule has on the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleAction {
    /// Discard the record entirely; no further rules run.
    DropRow,
    /// Apply the regex substitution in place on the asserted fields.
    Replace,
    /// Emit an annotated snapshot copy; the original record is untouched.
    CreateRow,
    /// Tag the record in place, accumulating rule names.
    Pipe,
}

/// One field-list + regex test within a rule's match clause.
///
/// Satisfied when ANY listed field present in the record matches the
/// pattern; fields are tried in order and the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assertion {
    /// Fields to test, in order.
    #[serde(default)]
    pub fields: Vec<String>,

    /// Regex pattern.
    pub regex: String,
}

/// Directive writing a computed value into a record field on match.
///
/// The literal token `$match` in `value` is replaced by the match summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteTruth {
    /// Target field.
    pub field: String,

    /// Value template.
    #[serde(default)]
    pub value: String,
}

/// Output schema and provenance directives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Explicit output field list. Derived from the first record when absent.
    #[serde(default)]
    pub fields: Option<Vec<String>>,

    /// Field receiving the matching rule's name.
    #[serde(default = "default_rule_field")]
    pub rule_match_field: String,

    /// Field receiving the source file's base name.
    #[serde(default = "default_file_field")]
    pub file_processed_field: String,

    /// Drop records that matched no rule instead of passing them through.
    #[serde(default)]
    pub drop_unmatched: bool,
}

fn default_rule_field() -> String {
    "_rule".to_string()
}

fn default_file_field() -> String {
    "_file".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fields: None,
            rule_match_field: default_rule_field(),
            file_processed_field: default_file_field(),
            drop_unmatched: false,
        }
    }
}

impl Config {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a config file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Compile every rule's patterns, surfacing the first broken regex.
    pub fn compile_rules(&self) -> ConfigResult<Vec<CompiledRule>> {
        self.rules.iter().map(CompiledRule::compile).collect()
    }
}

impl Rule {
    /// Create a rule with the given name and action.
    pub fn new(name: &str, action: RuleAction) -> Self {
        Self {
            name: name.to_string(),
            action,
            case_sensitive: false,
            assertions: Vec::new(),
            replace_by: String::new(),
            write_truth: None,
        }
    }

    /// Add an assertion to the match clause.
    pub fn with_assertion(mut self, fields: &[&str], regex: &str) -> Self {
        self.assertions.push(Assertion {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            regex: regex.to_string(),
        });
        self
    }

    /// Set the replacement string for a `replace` rule.
    pub fn with_replace_by(mut self, replace_by: &str) -> Self {
        self.replace_by = replace_by.to_string();
        self
    }

    /// Set the write-truth directive.
    pub fn with_write_truth(mut self, field: &str, value: &str) -> Self {
        self.write_truth = Some(WriteTruth {
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Match case-sensitively.
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }
}

// =============================================================================
// Compiled form
// =============================================================================

/// A rule with its patterns compiled, ready for per-row evaluation.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub action: RuleAction,
    pub assertions: Vec<CompiledAssertion>,
    pub replace_by: String,
    pub write_truth: Option<WriteTruth>,
}

/// An assertion with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledAssertion {
    pub fields: Vec<String>,
    pub regex: Regex,
}

impl CompiledRule {
    /// Compile a rule's assertion patterns.
    ///
    /// Case sensitivity is baked into the compiled regexes, so evaluation
    /// never re-checks the flag.
    pub fn compile(rule: &Rule) -> ConfigResult<Self> {
        let assertions = rule
            .assertions
            .iter()
            .map(|assertion| {
                let regex = RegexBuilder::new(&assertion.regex)
                    .case_insensitive(!rule.case_sensitive)
                    .build()
                    .map_err(|source| ConfigError::BadRegex {
                        rule: rule.name.clone(),
                        pattern: assertion.regex.clone(),
                        source,
                    })?;
                Ok(CompiledAssertion {
                    fields: assertion.fields.clone(),
                    regex,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self {
            name: rule.name.clone(),
            action: rule.action,
            assertions,
            replace_by: rule.replace_by.clone(),
            write_truth: rule.write_truth.clone(),
        })
    }
}

/// Generate an example config for documentation and the CLI.
pub fn example_config() -> Config {
    Config {
        add_fields: vec![AddedField {
            name: "status".to_string(),
            after: Some("id".to_string()),
            default_value: "new".to_string(),
        }],
        rules: vec![
            Rule::new("drop-heartbeats", RuleAction::DropRow)
                .with_assertion(&["msg"], r"^heartbeat$"),
            Rule::new("mask-emails", RuleAction::Replace)
                .with_assertion(&["msg", "detail"], r"[\w.]+@[\w.]+")
                .with_replace_by("<email>"),
            Rule::new("flag-errors", RuleAction::CreateRow)
                .with_assertion(&["msg"], "ERROR")
                .with_write_truth("status", "matched on $match"),
            Rule::new("tag-warnings", RuleAction::Pipe).with_assertion(&["level"], "warn"),
        ],
        output: OutputConfig::default(),
    }
}
