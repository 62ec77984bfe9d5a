use serde::{Deserialize, Serialize};

/// Title decoration variant. Never affects section order or content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleVariant {
    #[default]
    Basic,
    Highlight,
}

impl StyleVariant {
    /// Maps the spoken style answer to a variant. Anything but "highlight" is Basic.
    pub fn from_answer(answer: Option<&str>) -> Self {
        match answer {
            Some(a) if a.trim().eq_ignore_ascii_case("highlight") => StyleVariant::Highlight,
            _ => StyleVariant::Basic,
        }
    }
}

/// Content that follows an entry block's heading lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockBody {
    Bullets(Vec<String>),
    Paragraph(String),
}

/// A structured list entry (experience or project) rendered as a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryBlock {
    /// Rendered bold.
    pub heading: String,
    pub subheading: Option<String>,
    pub body: BlockBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionItem {
    /// Bullet text without its marker.
    Bullet(String),
    Block(EntryBlock),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Record field the section was built from.
    pub key: String,
    pub title: String,
    pub items: Vec<SectionItem>,
}

#[cfg(test)]
impl Section {
    /// Bullet texts in order, skipping blocks.
    pub fn bullets(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                SectionItem::Bullet(text) => Some(text.as_str()),
                SectionItem::Block(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub label: String,
    pub url: String,
    /// A QR code linking to `url` is placed next to this entry.
    pub qr: bool,
}

/// Ordered, renderer-independent representation of a CV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub sections: Vec<Section>,
    pub contact: Vec<ContactEntry>,
    pub style: StyleVariant,
}

#[cfg(test)]
impl DocumentModel {
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn section_keys(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.key.as_str()).collect()
    }

    /// The contact entry carrying the QR marker, if any.
    pub fn qr_entry(&self) -> Option<&ContactEntry> {
        self.contact.iter().find(|c| c.qr)
    }
}
