// Component scaffolding from templates

use crate::errors::ScaffoldError;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Literal replaced by the component name in every template.
pub const PLACEHOLDER_TOKEN: &str = "{templateName}";

pub const COMPONENT_NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9]*$";

lazy_static::lazy_static! {
    static ref COMPONENT_NAME_RE: Regex =
        Regex::new(COMPONENT_NAME_PATTERN).expect("component name pattern must compile");
}

const BUILTIN_TEMPLATES: [(&str, &str); 2] = [
    ("index.jsx", include_str!("../../templates/jsx/index.jsx")),
    (
        "index.module.less",
        include_str!("../../templates/jsx/index.module.less"),
    ),
];

#[derive(Debug, Clone)]
pub struct ComponentScaffoldRequest {
    pub target_directory: PathBuf,
    pub component_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFile {
    pub file_name: String,
    pub raw_content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedFiles {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
}

impl TemplateFile {
    pub fn new(file_name: impl Into<String>, raw_content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            raw_content: raw_content.into(),
        }
    }

    pub fn render(&self, component_name: &str) -> String {
        self.raw_content.replace(PLACEHOLDER_TOKEN, component_name)
    }
}

/// The JSX component and its stylesheet shipped with the binary.
pub fn builtin_templates() -> Vec<TemplateFile> {
    BUILTIN_TEMPLATES
        .iter()
        .map(|(name, content)| TemplateFile::new(*name, *content))
        .collect()
}

/// Every regular file of `dir`, sorted by name, is a template.
pub fn load_templates(dir: &Path) -> Result<Vec<TemplateFile>, ScaffoldError> {
    let io_failure = |source: std::io::Error| ScaffoldError::IoFailure {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_failure)? {
        let path = entry.map_err(io_failure)?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(io_failure(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no template files",
        )));
    }

    paths
        .into_iter()
        .map(|path| {
            let raw_content =
                std::fs::read_to_string(&path).map_err(|source| ScaffoldError::IoFailure {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            Ok(TemplateFile::new(file_name, raw_content))
        })
        .collect()
}

/// Rejection message for an unusable component name, `None` when it is valid.
pub fn validate_component_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("component name must not be empty".to_string());
    }

    if COMPONENT_NAME_RE.is_match(name) {
        None
    } else {
        Some("component name must start with a letter and contain only letters and digits".to_string())
    }
}

pub fn capitalize_first_letter(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Create `<target>/<Name>/` holding every template rendered with `<Name>`.
///
/// Nothing is overwritten: an existing folder is rejected. A failure while
/// writing leaves the folder as far as it got.
pub fn scaffold_component(
    request: &ComponentScaffoldRequest,
    templates: &[TemplateFile],
) -> Result<CreatedFiles, ScaffoldError> {
    if let Some(message) = validate_component_name(&request.component_name) {
        return Err(ScaffoldError::InvalidName(message));
    }

    let name = capitalize_first_letter(&request.component_name);
    let directory = request.target_directory.join(&name);

    if directory.exists() {
        log::warn!("⚠️  Folder already exists: {}", directory.display());
        return Err(ScaffoldError::AlreadyExists(directory));
    }

    std::fs::create_dir(&directory).map_err(|source| ScaffoldError::IoFailure {
        path: directory.clone(),
        source,
    })?;
    log::info!("📁 Created {}", directory.display());

    let mut files = Vec::with_capacity(templates.len());
    for template in templates {
        let path = directory.join(&template.file_name);
        std::fs::write(&path, template.render(&name)).map_err(|source| {
            ScaffoldError::IoFailure {
                path: path.clone(),
                source,
            }
        })?;
        log::info!("📝 Wrote {}", path.display());
        files.push(path);
    }

    Ok(CreatedFiles { directory, files })
}
