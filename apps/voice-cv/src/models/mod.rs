pub mod document;
pub mod record;

pub use document::{
    BlockBody, ContactEntry, DocumentModel, EntryBlock, Section, SectionItem, StyleVariant,
};
pub use record::{
    Entry, ExperienceEntry, FieldValue, ProjectEntry, Record, NOT_PROVIDED, SKIPPED_BY_USER,
};
