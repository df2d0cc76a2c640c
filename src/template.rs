use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::section::Section;

/// Templates compiled into the binary, searched after the user's template directory.
const BUILTIN: &[(&str, &str)] = &[
    ("pytest", include_str!("../templates/pytest.cfg")),
    ("sphinx", include_str!("../templates/sphinx.cfg")),
];

/// Supplies ready-made sections by name.
pub trait TemplateSource {
    /// # Errors
    ///
    /// [`Error::TemplateNotFound`] when no template carries `name`.
    fn lookup(&self, name: &str) -> Result<Section>;
}

/// Looks up `<dir>/<name>.cfg` first, then the built-in templates.
#[derive(Debug, Clone)]
pub struct Templates {
    dir: PathBuf,
}

impl Templates {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$XDG_CONFIG_HOME/buildstrap` or the platform equivalent.
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("buildstrap")
    }

    /// Names of every template reachable through [`TemplateSource::lookup`], sorted.
    ///
    /// # Errors
    ///
    /// Fails if the template directory exists but cannot be read.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = BUILTIN
            .iter()
            .map(|(name, _)| (*name).to_owned())
            .collect::<BTreeSet<String>>();

        if self.dir.is_dir() {
            for entry in fs::read_dir(&self.dir)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "cfg") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.insert(stem.to_owned());
                    }
                }
            }
        }

        Ok(names.into_iter().collect())
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl TemplateSource for Templates {
    fn lookup(&self, name: &str) -> Result<Section> {
        let not_found = || Error::TemplateNotFound {
            name: name.to_owned(),
            searched: self.dir.clone(),
        };

        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(not_found());
        }

        let path = self.dir.join(format!("{name}.cfg"));
        if path.is_file() {
            debug!(template = name, path = %path.display(), "using user template");
            let text = fs::read_to_string(&path)?;
            return extract_section(name, &text, &path);
        }

        let (_, text) = BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .ok_or_else(not_found)?;
        debug!(template = name, "using built-in template");
        extract_section(name, text, &PathBuf::from(format!("<built-in>/{name}.cfg")))
    }
}

fn extract_section(name: &str, text: &str, path: &Path) -> Result<Section> {
    let sections = Parser::new(text)
        .into_sections()
        .map_err(|source| Error::Parse {
            path: path.to_owned(),
            source,
        })?;

    sections
        .into_iter()
        .find(|section| section.name() == name)
        .ok_or_else(|| Error::TemplateSectionMissing {
            name: name.to_owned(),
            path: path.to_owned(),
        })
}
