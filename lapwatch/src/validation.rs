//! Per-field form rules: required and regex pattern
//!
//! Each field is checked against its rules in order and reports the first
//! failure. An empty error map means the form is valid.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Field name used by the countdown duration input
pub const DURATION_FIELD: &str = "duration";

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(:\d{1,2}){0,2}$").expect("Invalid duration regex")
});

static COUNTDOWN_RULES: LazyLock<FormRules> = LazyLock::new(|| {
    FormRules::new()
        .required(DURATION_FIELD, "Duration is required")
        .pattern(
            DURATION_FIELD,
            DURATION_PATTERN.clone(),
            "Use SS, MM:SS or HH:MM:SS",
        )
});

#[derive(Debug, Clone)]
enum Rule {
    Required { message: String },
    Pattern { regex: Regex, message: String },
}

impl Rule {
    fn check(&self, value: &str) -> Option<&str> {
        match self {
            Rule::Required { message } if value.trim().is_empty() => Some(message.as_str()),
            // Empty optional fields are not pattern-checked
            Rule::Pattern { regex, message } if !value.is_empty() && !regex.is_match(value) => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormRules {
    fields: BTreeMap<String, Vec<Rule>>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for the countdown duration field
    pub fn countdown() -> &'static FormRules {
        &COUNTDOWN_RULES
    }

    pub fn required(mut self, field: &str, message: impl Into<String>) -> Self {
        self.rules_for(field).push(Rule::Required {
            message: message.into(),
        });
        self
    }

    pub fn pattern(mut self, field: &str, regex: Regex, message: impl Into<String>) -> Self {
        self.rules_for(field).push(Rule::Pattern {
            regex,
            message: message.into(),
        });
        self
    }

    fn rules_for(&mut self, field: &str) -> &mut Vec<Rule> {
        self.fields.entry(field.to_string()).or_default()
    }

    /// Validate `inputs` (field -> value). Missing fields count as empty.
    pub fn validate<K, V>(&self, inputs: &BTreeMap<K, V>) -> BTreeMap<String, String>
    where
        K: std::borrow::Borrow<str> + Ord,
        V: AsRef<str>,
    {
        let mut errors = BTreeMap::new();
        for (field, rules) in &self.fields {
            let value = inputs.get(field.as_str()).map_or("", |v| v.as_ref());
            if let Some(message) = rules.iter().find_map(|rule| rule.check(value)) {
                errors.insert(field.clone(), message.to_string());
            }
        }
        errors
    }

    /// Validate a single field.
    pub fn validate_field(&self, field: &str, value: &str) -> Option<String> {
        self.fields
            .get(field)?
            .iter()
            .find_map(|rule| rule.check(value))
            .map(str::to_string)
    }
}
