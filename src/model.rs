//! Data structures describing the content tree of a cheatsheet.
//!
//! The types in this module form a serialization-friendly model of the
//! cheatsheet asset: groups of sections, each holding entries.  They do not
//! reference the layout or rendering layers so the values can be loaded from
//! JSON, built in code, or shared between exports without pulling in the PDF
//! backend.

use serde::{Deserialize, Serialize};

/// The atomic unit of content: a concept with its explanation and a code sample.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    concept: String,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(default)]
    code: String,
}

impl Entry {
    /// Creates an entry with the given concept and no other content.
    pub fn new(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            ..Self::default()
        }
    }

    /// Returns the short title of the entry.
    pub fn concept(&self) -> &str {
        &self.concept
    }

    /// Returns the body text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the annotation, if any.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the preformatted code sample.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether any field holds non-blank text.
    pub fn has_content(&self) -> bool {
        [self.concept.as_str(), self.description.as_str(), self.code.as_str()]
            .into_iter()
            .chain(self.note.as_deref())
            .any(|text| !text.trim().is_empty())
    }

    /// Sets the description and returns the updated entry.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the note and returns the updated entry.
    pub fn with_note(mut self, note: impl Into<Option<String>>) -> Self {
        self.note = note.into();
        self
    }

    /// Sets the code sample and returns the updated entry.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

/// A named subdivision of a [`Group`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    title: String,
    #[serde(default)]
    items: Vec<Entry>,
}

impl Section {
    /// Creates an empty section with the provided title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Returns the title of the section.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the entries in rendering order.
    pub fn items(&self) -> &[Entry] {
        &self.items
    }

    /// Whether the title or any entry holds non-blank text.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() || self.items.iter().any(Entry::has_content)
    }

    /// Appends an entry and returns the updated section.
    pub fn with_item(mut self, item: Entry) -> Self {
        self.items.push(item);
        self
    }

    /// Extends the section with additional entries and returns the updated instance.
    pub fn with_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        self.items.extend(items);
        self
    }
}

/// Top-level content category, rendered as a major division of the document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    title: String,
    #[serde(default)]
    intro: String,
    #[serde(default)]
    sections: Vec<Section>,
}

impl Group {
    /// Creates an empty group with the provided title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns the group title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the introductory text shown under the title.
    pub fn intro(&self) -> &str {
        &self.intro
    }

    /// Returns the sections in rendering order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Whether the title, the intro or any section holds non-blank text.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty()
            || !self.intro.trim().is_empty()
            || self.sections.iter().any(Section::has_content)
    }

    /// Sets the intro text and returns the updated group.
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = intro.into();
        self
    }

    /// Appends a section and returns the updated group.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Extends the group with multiple sections and returns the updated instance.
    pub fn with_sections<I>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = Section>,
    {
        self.sections.extend(sections);
        self
    }
}

/// Parses a content tree from its JSON representation.
///
/// The expected shape is an array of groups, each with `title`, `intro` and
/// `sections`; sections carry `title` and `items`; items carry `concept`,
/// `description`, an optional `note` and `code`.  Missing text fields default
/// to empty strings, which the layout engine skips.
pub fn groups_from_json(json: &str) -> serde_json::Result<Vec<Group>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_content_tree_with_optional_fields() {
        let json = r#"[
            {
                "title": "JavaScript",
                "intro": "Basics",
                "sections": [
                    {
                        "title": "Variables",
                        "items": [
                            { "concept": "let", "description": "block-scoped", "code": "let x = 1;" },
                            { "concept": "const", "note": "cannot reassign" }
                        ]
                    }
                ]
            },
            { "title": "Empty" }
        ]"#;

        let groups = groups_from_json(json).expect("content parses");
        assert_eq!(groups.len(), 2);

        let items = groups[0].sections()[0].items();
        assert_eq!(items[0].note(), None);
        assert_eq!(items[0].code(), "let x = 1;");
        assert_eq!(items[1].description(), "");
        assert_eq!(items[1].note(), Some("cannot reassign"));

        assert_eq!(groups[1].intro(), "");
        assert!(groups[1].sections().is_empty());
    }

    #[test]
    fn rejects_entries_without_concept() {
        let json = r#"[{ "title": "T", "sections": [{ "title": "S", "items": [{ "code": "x" }] }] }]"#;
        assert!(groups_from_json(json).is_err());
    }

    #[test]
    fn blank_fields_carry_no_content() {
        let blank = Entry::new(" ").with_note(Some("\t".to_string())).with_code("\n");
        assert!(!blank.has_content());
        assert!(Entry::new("").with_note(Some("see docs".to_string())).has_content());

        let section = Section::new("").with_items(vec![blank.clone(), Entry::new("")]);
        assert!(!section.has_content());
        assert!(!Group::new("  ").with_section(section.clone()).has_content());
        assert!(Group::new("")
            .with_section(section.with_item(Entry::new("").with_code("x")))
            .has_content());
    }

    #[test]
    fn missing_note_is_not_serialized() {
        let entry = Entry::new("let").with_code("let x = 1;");
        let json = serde_json::to_string(&entry).expect("entry serializes");
        assert!(!json.contains("note"));
    }
}
