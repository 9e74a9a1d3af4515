use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A bracketed placeholder: `[` + uppercase letters/underscores + `]`.
pub(crate) static MERGE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Z_]+)\]").expect("Invalid merge field regex"));

/// Rough category of a merge field, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeFieldKind {
    Name,
    Organization,
    Email,
    Amount,
    Date,
    Number,
    Location,
    Text,
}

impl MergeFieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MergeFieldKind::Name => "name",
            MergeFieldKind::Organization => "organization",
            MergeFieldKind::Email => "email",
            MergeFieldKind::Amount => "amount",
            MergeFieldKind::Date => "date",
            MergeFieldKind::Number => "number",
            MergeFieldKind::Location => "location",
            MergeFieldKind::Text => "text",
        }
    }

    /// Classify a field name by its underscore-separated tokens.
    ///
    /// Earlier rules win, so `ORGANIZATION_NAME` is an organization and
    /// `DONOR_EMAIL` an email rather than a name.
    pub fn classify(name: &str) -> Self {
        let tokens: Vec<&str> = name.split('_').filter(|t| !t.is_empty()).collect();
        let has = |words: &[&str]| tokens.iter().any(|t| words.contains(t));

        if has(&["EMAIL"]) {
            MergeFieldKind::Email
        } else if has(&["ORGANIZATION", "ORG", "COMPANY", "NONPROFIT"]) {
            MergeFieldKind::Organization
        } else if has(&[
            "AMOUNT", "GIFT", "DONATION", "REVENUE", "COST", "COSTS", "EXPENSES", "PRICE",
            "BUDGET", "FUNDING",
        ]) {
            MergeFieldKind::Amount
        } else if has(&["DATE", "YEAR", "MONTH", "DAY", "DEADLINE", "TIME"]) {
            MergeFieldKind::Date
        } else if has(&[
            "COUNT", "NUMBER", "PERCENTAGE", "RATE", "HOURS", "TOTAL", "PROVIDED", "HOUSED",
        ]) {
            MergeFieldKind::Number
        } else if has(&["ADDRESS", "LOCATION", "LOCATIONS", "CITY", "VENUE", "STATE"]) {
            MergeFieldKind::Location
        } else if has(&["NAME", "TITLE"]) {
            MergeFieldKind::Name
        } else {
            MergeFieldKind::Text
        }
    }
}

/// A merge field together with its inferred kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeField {
    pub name: String,
    pub kind: MergeFieldKind,
}

/// Extract unique merge field names in order of first appearance.
///
/// Malformed placeholders (`[FIELD`, `[field]`, `[TWO WORDS]`) do not match
/// and are skipped.
pub fn extract_merge_fields(text: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for caps in MERGE_FIELD.captures_iter(text) {
        let name = &caps[1];
        if !fields.iter().any(|f| f == name) {
            fields.push(name.to_string());
        }
    }
    fields
}

/// Pair each field name with its kind.
pub fn classify_merge_fields(names: &[String]) -> Vec<MergeField> {
    names
        .iter()
        .map(|name| MergeField {
            name: name.clone(),
            kind: MergeFieldKind::classify(name),
        })
        .collect()
}
