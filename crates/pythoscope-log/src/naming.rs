//! Source-path to dotted-name conversion.
//!
//! [`module_path_to_name`] is the generic converter; [`PathNamer`] specializes
//! it for paths that live under the project's own source root.

/// Recognized source extensions, each paired with the file stem that stands
/// for its enclosing directory.
const SOURCE_KINDS: &[(&str, &str)] = &[(".py", "__init__"), (".rs", "mod")];

const DEFAULT_ROOT: &str = "pythoscope";

/// Converts a relative module path into a name joined by `sep`.
///
/// The source extension is stripped, a trailing package-marker segment is
/// dropped, and both `/` and `\` are treated as separators.
///
/// ```
/// use pythoscope_log::naming::module_path_to_name;
///
/// assert_eq!(module_path_to_name("generator/adder.py", "."), "generator.adder");
/// assert_eq!(module_path_to_name("generator/__init__.py", "_"), "generator");
/// ```
pub fn module_path_to_name(path: &str, sep: &str) -> String {
    let path = path.replace('\\', "/");
    let mut stem = path.as_str();

    for &(ext, marker) in SOURCE_KINDS {
        if let Some(s) = stem.strip_suffix(ext) {
            // Only a whole segment counts as a marker: `x_mod.rs` stays `x_mod`.
            stem = s
                .strip_suffix(marker)
                .and_then(|s| s.strip_suffix('/'))
                .unwrap_or(s);
            break;
        }
    }

    stem.replace('/', sep)
}

/// Maps paths inside a project source root to dotted module names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNamer {
    marker: String,
}

impl PathNamer {
    /// Creates a namer for the given source root directory name.
    pub fn new(root: impl Into<String>) -> Self {
        let mut marker: String = root.into();
        while marker.ends_with('/') || marker.ends_with('\\') {
            marker.pop();
        }
        marker.push('/');
        Self { marker }
    }

    /// Root directory name this namer looks for, without the trailing separator.
    pub fn root(&self) -> &str {
        &self.marker[..self.marker.len() - 1]
    }

    /// Returns the dotted module name for `path`, or `default` when the path
    /// does not go through the source root.
    ///
    /// The last occurrence of the root marker wins.
    pub fn name(&self, path: &str, default: &str) -> String {
        let path = path.replace('\\', "/");
        match path.rfind(&self.marker) {
            Some(at) => module_path_to_name(&path[at + self.marker.len()..], "."),
            None => default.to_owned(),
        }
    }
}

impl Default for PathNamer {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

/// [`PathNamer::name`] with the default `pythoscope` root.
pub fn path_to_module_name(path: &str, default: &str) -> String {
    PathNamer::default().name(path, default)
}
