//! Field Extractor — free-form monologue → partial Record.
//!
//! Pluggable behind the `Extractor` trait. The default `KeywordExtractor` is a
//! fixed keyword matcher with canned templates; it makes no attempt at language
//! understanding and is expected to be replaced.

use crate::models::{Entry, ExperienceEntry, FieldValue, ProjectEntry, Record, NOT_PROVIDED};

pub trait Extractor: Send + Sync {
    /// Must be pure: same transcript, same Record.
    fn extract(&self, monologue: &str) -> Record;
}

const SCALAR_DEFAULTS: &[&str] = &["name", "tag", "location", "education", "email"];
const LIST_DEFAULTS: &[&str] = &["experience", "projects", "skills", "interests"];

/// One keyword trigger. `apply` receives the record and the original transcript.
struct Trigger {
    keyword: &'static str,
    apply: fn(&mut Record, &str),
}

const TRIGGERS: &[Trigger] = &[
    Trigger {
        keyword: "backend",
        apply: |record, _| {
            record.set("tag", "Backend Engineer");
            record.set("skills", items(&["Python", "APIs", "Databases"]));
        },
    },
    Trigger {
        keyword: "tcs",
        apply: |record, monologue| {
            let mut bullets = vec![
                "Built internal HR tool".to_string(),
                "Improved dashboard performance".to_string(),
            ];
            if let Some(fragment) = sentence_containing(monologue, "tcs") {
                bullets.push(fragment);
            }
            push_entry(
                record,
                "experience",
                Entry::Experience(ExperienceEntry {
                    company: "TCS".to_string(),
                    role: "Software Intern".to_string(),
                    duration: "6 months".to_string(),
                    bullets,
                }),
            );
        },
    },
    Trigger {
        keyword: "resume",
        apply: |record, _| {
            push_entry(
                record,
                "projects",
                Entry::Project(ProjectEntry {
                    title: "BlindCVBuilder".to_string(),
                    description: "Voice-based resume builder for blind users".to_string(),
                }),
            );
        },
    },
    Trigger {
        keyword: "koch",
        apply: |record, _| record.set("location", "Kochi"),
    },
    Trigger {
        keyword: "n i t",
        apply: |record, _| record.set("education", "B.Tech in Computer Science from NIT Calicut"),
    },
    Trigger {
        keyword: "alenso",
        apply: |record, _| record.set("name", "Alenso"),
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl Extractor for KeywordExtractor {
    fn extract(&self, monologue: &str) -> Record {
        let mut record = Record::new();
        for field in SCALAR_DEFAULTS {
            record.set(*field, NOT_PROVIDED);
        }
        for field in LIST_DEFAULTS {
            record.set(*field, Vec::<Entry>::new());
        }

        let lower = monologue.to_lowercase();
        for trigger in TRIGGERS.iter().filter(|t| lower.contains(t.keyword)) {
            (trigger.apply)(&mut record, monologue);
        }
        record
    }
}

fn items(values: &[&str]) -> Vec<Entry> {
    values.iter().map(|v| Entry::Item(v.to_string())).collect()
}

fn push_entry(record: &mut Record, field: &str, entry: Entry) {
    match record.get_mut(field) {
        Some(FieldValue::List(entries)) => entries.push(entry),
        _ => record.set(field, vec![entry]),
    }
}

/// First sentence of `text` whose lower-cased form contains `keyword`, trimmed.
fn sentence_containing(text: &str, keyword: &str) -> Option<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .find(|sentence| sentence.to_lowercase().contains(keyword))
        .map(String::from)
}
