use crate::section::Section;

/// An in-memory buildout configuration: sections in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buildout {
    sections: Vec<Section>,
}

impl Buildout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name() == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|section| section.name() == name)
    }

    /// Insert `section`, or merge its fields into the section already carrying its name.
    pub fn upsert(&mut self, section: Section) {
        if let Some(existing) = self.section_mut(section.name()) {
            existing.merge(section);
        } else {
            self.sections.push(section);
        }
    }
}

impl FromIterator<Section> for Buildout {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        let mut buildout = Self::new();
        for section in iter {
            buildout.upsert(section);
        }
        buildout
    }
}
