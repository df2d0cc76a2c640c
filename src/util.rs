use std::path::Path;

/// Reference to the directory buildout runs from.
pub const DIRECTORY_REF: &str = "${buildout:directory}";

/// Reference to the directory holding the developed sources.
pub const DEVELOP_REF: &str = "${buildout:develop}";

/// Split a comma separated argument into its non-empty, trimmed items.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Anchor `path` under `${buildout:directory}` unless it is already absolute.
#[must_use]
pub fn anchor(path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_owned()
    } else {
        join(DIRECTORY_REF, path)
    }
}

/// Join two path fragments with a single `/`. Works on strings because either side may hold
/// buildout placeholders.
#[must_use]
pub fn join(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// `${section:key}`
#[must_use]
pub fn cross_ref(section: &str, key: &str) -> String {
    format!("${{{section}:{key}}}")
}
