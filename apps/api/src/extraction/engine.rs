//! Field extractor — turns the flat text of a résumé into an `ExtractedRecord`.
//!
//! Pure and synchronous: the same input always yields the same output, and
//! calls may run in parallel freely.
//!
//! Sections are located independently of each other. For each section the
//! first occurrence of its start header is found, then the nearest occurrence
//! after it of any header in its stop-set. Headers are matched literally and
//! case-sensitively anywhere in the text, so out-of-order headers can produce
//! overlapping spans. That behaviour is relied on and must not be replaced by
//! a single top-to-bottom partition.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::extraction::rules::{PatternRule, SectionRule, PATTERN_RULES, SECTION_RULES};
use crate::models::cv::{CvField, ExtractedRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("required field '{0}' could not be found in the document")]
    RequiredFieldMissing(CvField),
}

static COMPILED_RULES: LazyLock<Vec<(PatternRule, Regex)>> = LazyLock::new(|| {
    PATTERN_RULES
        .iter()
        .map(|rule| {
            let re = Regex::new(rule.pattern).expect("pattern rules are valid regexes");
            (*rule, re)
        })
        .collect()
});

/// Extracts every known field from `text`.
///
/// Fails on the first required field without a match; optional fields and
/// sections that are missing come back as `None`.
pub fn extract(text: &str) -> Result<ExtractedRecord, ExtractionError> {
    let mut found = match_patterns(text, &COMPILED_RULES)?;
    found.extend(match_sections(text, SECTION_RULES));

    Ok(ExtractedRecord {
        name: take_required(&mut found, CvField::Name)?,
        email: take_required(&mut found, CvField::Email)?,
        phone: take_required(&mut found, CvField::Phone)?,
        linkedin: found.remove(&CvField::Linkedin),
        education: found.remove(&CvField::Education),
        work_experience: found.remove(&CvField::WorkExperience),
        projects: found.remove(&CvField::Projects),
        skills: found.remove(&CvField::Skills),
    })
}

fn match_patterns(
    text: &str,
    rules: &[(PatternRule, Regex)],
) -> Result<HashMap<CvField, String>, ExtractionError> {
    let mut found = HashMap::new();
    for (rule, re) in rules {
        match re.find(text) {
            Some(m) => {
                found.insert(rule.field, m.as_str().to_string());
            }
            None if rule.required => return Err(ExtractionError::RequiredFieldMissing(rule.field)),
            None => {}
        }
    }
    Ok(found)
}

fn match_sections(text: &str, rules: &[SectionRule]) -> HashMap<CvField, String> {
    rules
        .iter()
        .filter_map(|rule| {
            find_section(text, rule.start, rule.stops).map(|body| (rule.field, body.to_string()))
        })
        .collect()
}

/// Returns the trimmed text between the first `start` header and the nearest
/// following occurrence of any `stops` header (or end of text).
pub fn find_section<'a>(text: &'a str, start: &str, stops: &[&str]) -> Option<&'a str> {
    let body_start = text.find(start)? + start.len();
    let rest = &text[body_start..];
    let body_end = stops
        .iter()
        .filter_map(|stop| rest.find(stop))
        .min()
        .unwrap_or(rest.len());
    Some(rest[..body_end].trim())
}

fn take_required(
    found: &mut HashMap<CvField, String>,
    field: CvField,
) -> Result<String, ExtractionError> {
    found
        .remove(&field)
        .ok_or(ExtractionError::RequiredFieldMissing(field))
}
