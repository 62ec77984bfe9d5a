//! Field kinds and the two question sets.
//!
//! Merge behavior is carried by the field's kind, not by its name: a `Scalar`
//! answer overwrites, a `List` answer appends an entry built from its template.

use crate::intake::prompts::*;
use crate::models::{Entry, ExperienceEntry, FieldValue, ProjectEntry, Record};

const USER_PROVIDED: &str = "User Provided";
const NOT_SPECIFIED: &str = "Not specified";
const USER_PROJECT: &str = "User Project";

/// Builds a list entry around a raw spoken answer. Slots the answer does not
/// fill get fixed placeholder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTemplate {
    /// Answer becomes the single bullet.
    Experience,
    /// Answer becomes the description.
    Project,
}

impl EntryTemplate {
    pub fn build(&self, answer: &str) -> Entry {
        match self {
            EntryTemplate::Experience => Entry::Experience(ExperienceEntry {
                company: USER_PROVIDED.to_string(),
                role: NOT_SPECIFIED.to_string(),
                duration: NOT_SPECIFIED.to_string(),
                bullets: vec![answer.to_string()],
            }),
            EntryTemplate::Project => Entry::Project(ProjectEntry {
                title: USER_PROJECT.to_string(),
                description: answer.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    List(EntryTemplate),
}

impl FieldKind {
    pub fn merge(&self, record: &mut Record, field: &str, answer: &str) {
        match self {
            FieldKind::Scalar => record.set(field, answer),
            FieldKind::List(template) => {
                let entry = template.build(answer);
                match record.get_mut(field) {
                    Some(FieldValue::List(entries)) => entries.push(entry),
                    // Absent or scalar: the kind wins, the field becomes a list.
                    _ => record.set(field, vec![entry]),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub prompt: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn scalar(name: &'static str, prompt: &'static str) -> Self {
        Self {
            name,
            prompt,
            kind: FieldKind::Scalar,
        }
    }

    const fn list(name: &'static str, prompt: &'static str, template: EntryTemplate) -> Self {
        Self {
            name,
            prompt,
            kind: FieldKind::List(template),
        }
    }
}

/// Fields the Completer must attempt to satisfy, in asking order.
pub const REQUIRED_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("name", ASK_NAME),
    FieldSpec::scalar("tag", ASK_PROFESSION),
    FieldSpec::scalar("location", ASK_LOCATION),
    FieldSpec::scalar("education", ASK_QUALIFICATION),
    FieldSpec::list("experience", ASK_WORK, EntryTemplate::Experience),
    FieldSpec::list("projects", ASK_PROJECT, EntryTemplate::Project),
    FieldSpec::scalar("email", ASK_EMAIL),
];

/// The full interview, in asking order. Every answer is stored as text.
pub const INTERVIEW_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("name", ASK_NAME),
    FieldSpec::scalar("date_of_birth", ASK_DATE_OF_BIRTH),
    FieldSpec::scalar("country", ASK_COUNTRY),
    FieldSpec::scalar("city", ASK_CITY),
    FieldSpec::scalar("phone", ASK_PHONE),
    FieldSpec::scalar("email", ASK_EMAIL),
    FieldSpec::scalar("github", ASK_GITHUB),
    FieldSpec::scalar("tag", ASK_LIVING),
    FieldSpec::scalar("linkedin", ASK_LINKEDIN),
    FieldSpec::scalar("education", ASK_DEGREE),
    FieldSpec::scalar("school", ASK_SCHOOL),
    FieldSpec::scalar("experience", ASK_JOBS),
    FieldSpec::scalar("responsibilities", ASK_LEADERSHIP),
    FieldSpec::scalar("projects", ASK_PROJECTS),
    FieldSpec::scalar("achievements", ASK_ACHIEVEMENTS),
    FieldSpec::scalar("qr_code", ASK_QR),
    FieldSpec::scalar("style", ASK_STYLE),
];

/// Required fields that are currently missing from `record`, in order.
pub fn missing_fields<'f>(record: &Record, fields: &'f [FieldSpec]) -> Vec<&'f FieldSpec> {
    fields.iter().filter(|f| record.is_missing(f.name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_PROVIDED;

    #[test]
    fn test_scalar_merge_overwrites() {
        let mut record = Record::new();
        record.set("name", NOT_PROVIDED);
        FieldKind::Scalar.merge(&mut record, "name", "Alenso");
        assert_eq!(record.text("name"), Some("Alenso"));
    }

    #[test]
    fn test_experience_merge_appends_template_entry() {
        let mut record = Record::new();
        record.set("experience", Vec::<Entry>::new());
        FieldKind::List(EntryTemplate::Experience).merge(
            &mut record,
            "experience",
            "Interned at TCS",
        );

        let entries = record.get("experience").and_then(FieldValue::as_entries).unwrap();
        assert_eq!(
            entries,
            &[Entry::Experience(ExperienceEntry {
                company: "User Provided".to_string(),
                role: "Not specified".to_string(),
                duration: "Not specified".to_string(),
                bullets: vec!["Interned at TCS".to_string()],
            })]
        );
    }

    #[test]
    fn test_project_merge_keeps_existing_entries() {
        let mut record = Record::new();
        record.set("projects", vec![EntryTemplate::Project.build("first")]);
        FieldKind::List(EntryTemplate::Project).merge(&mut record, "projects", "second");

        let entries = record.get("projects").and_then(FieldValue::as_entries).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1],
            Entry::Project(ProjectEntry {
                title: "User Project".to_string(),
                description: "second".to_string(),
            })
        );
    }

    #[test]
    fn test_list_merge_replaces_scalar_sentinel() {
        let mut record = Record::new();
        record.set("projects", NOT_PROVIDED);
        FieldKind::List(EntryTemplate::Project).merge(
            &mut record,
            "projects",
            "A voice CV builder",
        );
        assert!(!record.is_missing("projects"));
        assert_eq!(
            record
                .get("projects")
                .and_then(FieldValue::as_entries)
                .map(<[Entry]>::len),
            Some(1)
        );
    }

    #[test]
    fn test_missing_fields_preserves_order() {
        let mut record = Record::new();
        record.set("name", "Alenso");
        record.set("location", "Kochi");
        let missing: Vec<_> = missing_fields(&record, REQUIRED_FIELDS)
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(missing, vec!["tag", "education", "experience", "projects", "email"]);
    }

    #[test]
    fn test_interview_covers_contact_and_style_fields() {
        let names: Vec<_> = INTERVIEW_FIELDS.iter().map(|f| f.name).collect();
        for expected in ["email", "github", "linkedin", "qr_code", "style"] {
            assert!(names.contains(&expected), "missing {expected}");
        }
        assert_eq!(names.len(), 17);
    }
}
