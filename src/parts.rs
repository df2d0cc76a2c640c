//! Builders for the sections of a generated `buildout.cfg`.
//!
//! Every builder is a pure function of its arguments. [`build_parts`] calls them in dependency
//! order and wires the cross-references between the sections it produces.

use std::str::FromStr;

use tracing::debug;

use crate::buildout::Buildout;
use crate::error::{Error, Result};
use crate::section::Section;
use crate::template::TemplateSource;
use crate::util::{DEVELOP_REF, anchor, cross_ref, join, split_list};

/// Name of the global section.
pub const BUILDOUT: &str = "buildout";

const DEFAULT_ENV: &str = "var";
const DEFAULT_BIN: &str = "bin";

const EGG_RECIPE: &str = "zc.recipe.egg";
const PIP_RECIPE: &str = "collective.recipe.pip";
const EXTENSIONS: &str = "gp.vcsdevelop";

/// Path overrides for the `[buildout]` section. `None` keeps buildout's default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paths {
    pub root: Option<String>,
    pub src: Option<String>,
    pub env: Option<String>,
    pub bin: Option<String>,
}

/// An extra target and the requirements files it installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub requirements: Vec<String>,
}

impl FromStr for Target {
    type Err = String;

    /// Parse `name=requirements[,requirements...]`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((name, requirements)) = s.split_once('=') else {
            return Err(format!("expected <target>=<requirements>, got `{s}`"));
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing target name in `{s}`"));
        }

        Ok(Self {
            name: name.to_owned(),
            requirements: split_list(requirements),
        })
    }
}

/// Everything [`build_parts`] needs. Lists are already split; see [`split_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Packages under development. The first one names the main target.
    pub packages: Vec<String>,
    /// Requirements files of the main target.
    pub requirements: Vec<String>,
    pub targets: Vec<Target>,
    /// Template parts to add, by name.
    pub parts: Vec<String>,
    pub interpreter: Option<String>,
    pub paths: Paths,
}

/// Name of the section fetching the requirements of `target`.
#[must_use]
pub fn partname_pip(target: &str) -> String {
    format!("{target}-pip")
}

/// Build the global `[buildout]` section.
///
/// Relative environment and bin paths are anchored under `${buildout:directory}`; the storage
/// directories always live inside the environment path. `directory` is only written when a
/// root is given.
#[must_use]
pub fn build_part_buildout(paths: &Paths) -> Section {
    let env = anchor(paths.env.as_deref().unwrap_or(DEFAULT_ENV));
    let bin = anchor(paths.bin.as_deref().unwrap_or(DEFAULT_BIN));

    let mut section = Section::new(BUILDOUT)
        .with("newest", "false")
        .with("parts", Vec::<String>::new())
        .with("package", Vec::<String>::new())
        .with("extensions", EXTENSIONS);

    if let Some(root) = &paths.root {
        section.set("directory", root.as_str());
    }

    section
        .with("develop", paths.src.as_deref().unwrap_or("."))
        .with("eggs-directory", join(&env, "eggs"))
        .with("develop-eggs-directory", join(&env, "develop-eggs"))
        .with("parts-directory", join(&env, "parts"))
        .with("develop-dir", join(&env, "develop"))
        .with("bin-directory", bin)
        .with("requirements", Vec::<String>::new())
}

/// Build the section installing `packages` on top of the eggs fetched for `target`.
#[must_use]
pub fn build_part_target(target: &str, packages: &[String], interpreter: Option<&str>) -> Section {
    egg_section(target, target, packages, interpreter)
}

/// Build the `<target>-pip` section reading `requirements`, relative to `${buildout:develop}`.
///
/// # Errors
///
/// [`Error::NoRequirements`] if `requirements` is empty.
pub fn build_part_pip(target: &str, requirements: &[String]) -> Result<Section> {
    if requirements.is_empty() {
        return Err(Error::NoRequirements {
            target: target.to_owned(),
        });
    }

    Ok(Section::new(partname_pip(target))
        .with("recipe", PIP_RECIPE)
        .with("configs", develop_paths(requirements)))
}

/// Assemble the whole configuration.
///
/// Order: `[buildout]`, the main target and its pip section, each extra target and its pip
/// section, then template parts. Template parts share the main target's eggs and their
/// template fields are merged over them.
///
/// # Errors
///
/// Validation errors ([`Error::NoPackages`], [`Error::NoRequirements`]) and template lookup
/// errors are returned before anything is built.
pub fn build_parts(request: &Request, templates: &dyn TemplateSource) -> Result<Buildout> {
    let main = request.packages.first().ok_or(Error::NoPackages)?;
    if request.requirements.is_empty() {
        return Err(Error::NoRequirements {
            target: main.clone(),
        });
    }
    if let Some(target) = request.targets.iter().find(|t| t.requirements.is_empty()) {
        return Err(Error::NoRequirements {
            target: target.name.clone(),
        });
    }
    let template_parts = request
        .parts
        .iter()
        .map(|name| templates.lookup(name))
        .collect::<Result<Vec<Section>>>()?;

    let interpreter = request.interpreter.as_deref();
    let mut buildout = Buildout::new();
    let mut names = Vec::<String>::with_capacity(1 + request.targets.len() + template_parts.len());

    buildout.upsert(build_part_buildout(&request.paths));

    buildout.upsert(build_part_target(main, &request.packages, interpreter));
    buildout.upsert(build_part_pip(main, &request.requirements)?);
    push_unique(&mut names, main);

    for target in &request.targets {
        buildout.upsert(build_part_target(&target.name, &[], interpreter));
        buildout.upsert(build_part_pip(&target.name, &target.requirements)?);
        push_unique(&mut names, &target.name);
    }

    for template in template_parts {
        let name = template.name().to_owned();
        buildout.upsert(egg_section(&name, main, &request.packages, interpreter));
        buildout.upsert(template);
        push_unique(&mut names, &name);
    }

    for name in &names {
        debug!(part = %name, "built part");
    }

    if let Some(global) = buildout.section_mut(BUILDOUT) {
        global.set("parts", names);
        global.set("package", request.packages.clone());
        global.set("requirements", develop_paths(&request.requirements));
    }

    Ok(buildout)
}

/// A `zc.recipe.egg` section named `name` whose eggs come from the pip section of `fetch_from`.
fn egg_section(
    name: &str,
    fetch_from: &str,
    packages: &[String],
    interpreter: Option<&str>,
) -> Section {
    let mut eggs = Vec::with_capacity(packages.len() + 1);
    eggs.push(cross_ref(&partname_pip(fetch_from), "eggs"));
    eggs.extend(packages.iter().cloned());

    let mut section = Section::new(name)
        .with("recipe", EGG_RECIPE)
        .with("eggs", eggs);

    if let Some(interpreter) = interpreter {
        section.set("interpreter", interpreter);
    }

    section
}

fn develop_paths(files: &[String]) -> Vec<String> {
    files.iter().map(|file| join(DEVELOP_REF, file)).collect()
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_owned());
    }
}
