//! Document Assembler — deterministic Record → DocumentModel.
//!
//! # Rules
//! - Fixed section order: Education, Experience, Projects, Responsibilities,
//!   Achievements; Skills and Interests follow only when present; Contact is last.
//! - Text sections split on ". " into trimmed bullets. A missing section renders
//!   the single bullet "Not provided".
//! - List sections render one block per entry, in list order.
//! - Contact lists email, github and linkedin when provided. The linkedin entry
//!   carries the QR marker iff the record's `qr_code` answer is "yes".
//!
//! Every branch has a default, so `assemble` is total.

use crate::models::{
    BlockBody, ContactEntry, DocumentModel, Entry, EntryBlock, FieldValue, Record, Section,
    SectionItem, StyleVariant, NOT_PROVIDED,
};

pub const CONTACT_TITLE: &str = "CONTACT";

/// (record field, section title)
const FIXED_SECTIONS: &[(&str, &str)] = &[
    ("education", "EDUCATION"),
    ("experience", "EXPERIENCE"),
    ("projects", "PROJECTS"),
    ("responsibilities", "RESPONSIBILITIES"),
    ("achievements", "ACHIEVEMENTS"),
];

const OPTIONAL_SECTIONS: &[(&str, &str)] = &[
    ("skills", "TECHNICAL SKILLS"),
    ("interests", "INTERESTS"),
];

/// (record field, contact label)
const CONTACT_FIELDS: &[(&str, &str)] = &[
    ("email", "Email"),
    ("github", "Github"),
    ("linkedin", "Linkedin"),
];

const QR_CONTACT_FIELD: &str = "linkedin";
const QR_OPT_IN_FIELD: &str = "qr_code";
const STYLE_FIELD: &str = "style";

const FRAGMENT_DELIMITER: &str = ". ";

pub fn assemble(record: &Record) -> DocumentModel {
    let mut sections: Vec<Section> = FIXED_SECTIONS
        .iter()
        .map(|(key, title)| build_section(record, key, title))
        .collect();

    sections.extend(
        OPTIONAL_SECTIONS
            .iter()
            .filter(|(key, _)| !record.is_missing(key))
            .map(|(key, title)| build_section(record, key, title)),
    );

    DocumentModel {
        sections,
        contact: contact_entries(record),
        style: StyleVariant::from_answer(record.text(STYLE_FIELD)),
    }
}

/// Splits free text into bullet fragments. Trailing periods are dropped and
/// empty fragments removed.
pub fn split_fragments(text: &str) -> Vec<String> {
    text.split(FRAGMENT_DELIMITER)
        .map(|fragment| fragment.trim().trim_end_matches('.').trim())
        .filter(|fragment| !fragment.is_empty())
        .map(String::from)
        .collect()
}

fn build_section(record: &Record, key: &str, title: &str) -> Section {
    Section {
        key: key.to_string(),
        title: title.to_string(),
        items: section_items(record.get(key)),
    }
}

fn section_items(value: Option<&FieldValue>) -> Vec<SectionItem> {
    let items: Vec<SectionItem> = match value {
        Some(value) if !value.is_missing() => match value {
            FieldValue::Text(text) => split_fragments(text)
                .into_iter()
                .map(SectionItem::Bullet)
                .collect(),
            FieldValue::List(entries) => entries.iter().map(entry_item).collect(),
        },
        _ => Vec::new(),
    };

    if items.is_empty() {
        vec![SectionItem::Bullet(NOT_PROVIDED.to_string())]
    } else {
        items
    }
}

fn entry_item(entry: &Entry) -> SectionItem {
    match entry {
        Entry::Experience(e) => SectionItem::Block(EntryBlock {
            heading: e.company.clone(),
            subheading: Some(format!("{} | {}", e.role, e.duration)),
            body: BlockBody::Bullets(e.bullets.clone()),
        }),
        Entry::Project(p) => SectionItem::Block(EntryBlock {
            heading: p.title.clone(),
            subheading: None,
            body: BlockBody::Paragraph(p.description.clone()),
        }),
        Entry::Item(text) => SectionItem::Bullet(text.clone()),
    }
}

fn contact_entries(record: &Record) -> Vec<ContactEntry> {
    let wants_qr = record
        .text(QR_OPT_IN_FIELD)
        .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("yes"));

    CONTACT_FIELDS
        .iter()
        .filter_map(|(field, label)| {
            record.provided_text(field).map(|url| ContactEntry {
                label: label.to_string(),
                url: url.trim().to_string(),
                qr: wants_qr && *field == QR_CONTACT_FIELD,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceEntry, ProjectEntry};

    fn record(pairs: &[(&str, &str)]) -> Record {
        let mut record = Record::new();
        for (k, v) in pairs {
            record.set(*k, *v);
        }
        record
    }

    // ── sections ────────────────────────────────────────────────────────────

    #[test]
    fn test_fixed_section_order_and_splitting() {
        let model = assemble(&record(&[("education", "A. B."), ("experience", "")]));

        assert_eq!(
            model.section_keys(),
            vec!["education", "experience", "projects", "responsibilities", "achievements"]
        );
        assert_eq!(model.section("education").unwrap().bullets(), vec!["A", "B"]);
        assert_eq!(
            model.section("experience").unwrap().bullets(),
            vec![NOT_PROVIDED]
        );
    }

    #[test]
    fn test_empty_record_is_all_defaults() {
        let model = assemble(&Record::new());
        assert_eq!(model.sections.len(), FIXED_SECTIONS.len());
        for section in &model.sections {
            assert_eq!(section.items, vec![SectionItem::Bullet(NOT_PROVIDED.to_string())]);
        }
        assert!(model.contact.is_empty());
        assert_eq!(model.style, StyleVariant::Basic);
    }

    #[test]
    fn test_split_fragments_edge_cases() {
        assert_eq!(split_fragments("B.Tech in CS"), vec!["B.Tech in CS"]);
        assert_eq!(
            split_fragments("  Led the club.  Won a hackathon. "),
            vec!["Led the club", "Won a hackathon"]
        );
        assert!(split_fragments(" . ").is_empty());
    }

    #[test]
    fn test_list_sections_render_blocks_in_order() {
        let mut rec = Record::new();
        rec.set(
            "experience",
            vec![
                Entry::Experience(ExperienceEntry {
                    company: "TCS".to_string(),
                    role: "Software Intern".to_string(),
                    duration: "6 months".to_string(),
                    bullets: vec!["Built internal HR tool".to_string()],
                }),
                Entry::Experience(ExperienceEntry {
                    company: "User Provided".to_string(),
                    role: "Not specified".to_string(),
                    duration: "Not specified".to_string(),
                    bullets: vec!["Freelance work".to_string()],
                }),
            ],
        );
        rec.set(
            "projects",
            vec![Entry::Project(ProjectEntry {
                title: "BlindCVBuilder".to_string(),
                description: "Voice-based resume builder".to_string(),
            })],
        );

        let model = assemble(&rec);
        let experience = &model.section("experience").unwrap().items;
        assert_eq!(experience.len(), 2);
        assert_eq!(
            experience[0],
            SectionItem::Block(EntryBlock {
                heading: "TCS".to_string(),
                subheading: Some("Software Intern | 6 months".to_string()),
                body: BlockBody::Bullets(vec!["Built internal HR tool".to_string()]),
            })
        );
        assert!(matches!(&experience[1], SectionItem::Block(b) if b.heading == "User Provided"));

        let projects = &model.section("projects").unwrap().items;
        assert_eq!(
            projects[0],
            SectionItem::Block(EntryBlock {
                heading: "BlindCVBuilder".to_string(),
                subheading: None,
                body: BlockBody::Paragraph("Voice-based resume builder".to_string()),
            })
        );
    }

    #[test]
    fn test_optional_sections_only_when_present() {
        let mut rec = Record::new();
        rec.set("skills", vec![Entry::Item("Python".to_string())]);
        rec.set("interests", Vec::<Entry>::new());

        let model = assemble(&rec);
        assert_eq!(model.section_keys().last(), Some(&"skills"));
        assert!(model.section("interests").is_none());
        assert_eq!(model.section("skills").unwrap().bullets(), vec!["Python"]);
    }

    // ── contact ─────────────────────────────────────────────────────────────

    #[test]
    fn test_contact_filters_not_provided() {
        let model = assemble(&record(&[("email", "x@y.com"), ("github", "Not provided")]));
        assert_eq!(
            model.contact,
            vec![ContactEntry {
                label: "Email".to_string(),
                url: "x@y.com".to_string(),
                qr: false,
            }]
        );
    }

    #[test]
    fn test_contact_filter_is_case_insensitive() {
        let model = assemble(&record(&[("github", "NOT PROVIDED"), ("linkedin", "https://x")]));
        assert_eq!(model.contact.len(), 1);
        assert_eq!(model.contact[0].label, "Linkedin");
    }

    #[test]
    fn test_contact_order_is_fixed() {
        let model = assemble(&record(&[
            ("linkedin", "https://l"),
            ("github", "https://g"),
            ("email", "e@x.com"),
        ]));
        let labels: Vec<_> = model.contact.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Email", "Github", "Linkedin"]);
    }

    // ── QR gating ───────────────────────────────────────────────────────────

    #[test]
    fn test_qr_gated_on_opt_in() {
        let no = assemble(&record(&[("linkedin", "https://x"), ("qr_code", "No")]));
        assert!(no.qr_entry().is_none());

        let yes = assemble(&record(&[("linkedin", "https://x"), ("qr_code", "Yes")]));
        assert_eq!(yes.contact.iter().filter(|c| c.qr).count(), 1);
        assert_eq!(yes.qr_entry().unwrap().url, "https://x");
    }

    #[test]
    fn test_qr_requires_linkedin_entry() {
        let model = assemble(&record(&[("email", "x@y.com"), ("qr_code", "yes")]));
        assert!(model.qr_entry().is_none());

        let skipped = assemble(&record(&[("linkedin", "Not provided"), ("qr_code", "yes")]));
        assert!(skipped.qr_entry().is_none());
    }

    // ── style ───────────────────────────────────────────────────────────────

    #[test]
    fn test_style_changes_only_the_variant() {
        let basic = assemble(&record(&[("education", "A. B."), ("style", "basic")]));
        let highlight = assemble(&record(&[("education", "A. B."), ("style", "Highlight")]));

        assert_eq!(basic.style, StyleVariant::Basic);
        assert_eq!(highlight.style, StyleVariant::Highlight);
        assert_eq!(basic.sections, highlight.sections);
        assert_eq!(basic.contact, highlight.contact);
    }
}
