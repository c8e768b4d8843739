//! Rule tables driving the field extractor.
//!
//! Adding a field means adding a row here plus a slot on `ExtractedRecord`;
//! the matching loop in `engine` never names a field.

use crate::models::cv::CvField;

/// A single-value field located by the first regex match in the document.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub field: CvField,
    pub pattern: &'static str,
    pub required: bool,
}

/// A free-text section bounded by a start header and the nearest following
/// header from `stops`. Empty `stops` means the section runs to end of text.
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    pub field: CvField,
    pub start: &'static str,
    pub stops: &'static [&'static str],
}

/// Evaluated in order. Required rules fail fast, so order decides which
/// missing field is reported first.
pub const PATTERN_RULES: &[PatternRule] = &[
    // Two Titlecase tokens separated by one space. Also hits "Acme Corp"
    // or "Senior Engineer" if those come first.
    PatternRule {
        field: CvField::Name,
        pattern: r"\b[A-Z][a-z]+ [A-Z][a-z]+\b",
        required: true,
    },
    PatternRule {
        field: CvField::Email,
        pattern: r"[\w.-]+@[\w.-]+",
        required: true,
    },
    // Permissive: trailing digits on the same line are swallowed.
    PatternRule {
        field: CvField::Phone,
        pattern: r"\+?\d[\d ()-]{7,}",
        required: true,
    },
    PatternRule {
        field: CvField::Linkedin,
        pattern: r"linkedin\.com/[^\s|]+",
        required: false,
    },
];

pub const SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        field: CvField::Education,
        start: "EDUCATION",
        stops: &["EXPERIENCE", "SKILLS"],
    },
    SectionRule {
        field: CvField::WorkExperience,
        start: "EXPERIENCE",
        stops: &["SKILLS", "EDUCATION"],
    },
    SectionRule {
        field: CvField::Projects,
        start: "PROJECTS",
        stops: &["EXPERIENCE", "SKILLS", "EDUCATION"],
    },
    SectionRule {
        field: CvField::Skills,
        start: "SKILLS",
        stops: &[],
    },
];
