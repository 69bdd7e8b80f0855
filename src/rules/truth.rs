//! Truth writing: annotating a record with a match-derived value.

use crate::config::WriteTruth;
use crate::record::Record;

/// Literal placeholder replaced by the joined match summary.
pub const MATCH_TOKEN: &str = "$match";

/// Separator joining summary entries in the substituted value.
const SUMMARY_SEPARATOR: &str = " AND ";

/// Apply a rule's write-truth directive to a record.
///
/// No-op when the directive is absent. Otherwise the template value is
/// written into the target field, overwriting any existing value; the
/// literal token `$match` is first replaced by the summary entries joined
/// with `" AND "`. Token detection is exact — `$MATCH` is not a token.
pub fn apply_write_truth(record: &mut Record, write_truth: Option<&WriteTruth>, summary: &[String]) {
    let Some(directive) = write_truth else {
        return;
    };

    let mut value = directive.value.clone();
    if value.contains(MATCH_TOKEN) {
        value = value.replace(MATCH_TOKEN, &summary.join(SUMMARY_SEPARATOR));
    }
    record.insert(directive.field.as_str(), value);
}
