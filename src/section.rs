use std::fmt;

/// A named block of `key = value` settings.
///
/// Entries keep their insertion order; the writer reproduces that order verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_entries(name, Vec::with_capacity(16))
    }

    #[must_use]
    pub fn with_entries(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Set `key` to `value`. An existing key is overwritten in place and keeps its position;
    /// a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();

        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == key) {
            entry.value = value;
        } else {
            self.entries.push(Entry { key, value });
        }
    }

    /// Builder form of [`Section::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Upsert every field of `other` into `self`. Fields `other` does not mention are retained.
    pub fn merge(&mut self, other: Section) {
        for Entry { key, value } in other.entries {
            self.set(key, value);
        }
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

impl Entry {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Raw(String),
    List(Vec<String>),
}

/// How a [`Value::List`] is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// Bracketed literal, e.g. `['a', 'b']`.
    #[default]
    Literal,
    /// One item per line, as buildout expects. A single item renders as a plain scalar.
    Lines,
}

impl Value {
    #[must_use]
    pub fn render(&self, style: ListStyle) -> String {
        match (self, style) {
            (Self::Raw(value), _) => value.clone(),
            (Self::List(values), ListStyle::Lines) => values.join("\n"),
            (Self::List(values), ListStyle::Literal) => {
                let quoted = values
                    .iter()
                    .map(|v| format!("'{v}'"))
                    .collect::<Vec<String>>()
                    .join(", ");
                format!("[{quoted}]")
            }
        }
    }

    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(value) => Some(value),
            Self::List(..) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            Self::Raw(..) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(ListStyle::Literal).fmt(f)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Raw(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Raw(value.to_owned())
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value)
    }
}
