use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathCheckError {
    #[error("empty path")]
    Empty,

    #[error("leading slash")]
    LeadingSlash,

    #[error("empty path element")]
    EmptyElement,

    #[error("invalid path element {0:?}")]
    DotElement(String),

    #[error("trailing dot in path element {0:?}")]
    TrailingDot(String),

    #[error("invalid char {0:?}")]
    InvalidChar(char),

    #[error("{0:?} is a reserved file name")]
    ReservedName(String),

    #[error("{0:?} looks like a short file name")]
    ShortName(String),
}

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Checks that `path` is safe to appear in a module: relative, clean, and
/// free of characters or names that break on some filesystem.
pub fn check_file_path(path: &str) -> Result<(), PathCheckError> {
    if path.is_empty() {
        return Err(PathCheckError::Empty);
    }
    if path.starts_with('/') {
        return Err(PathCheckError::LeadingSlash);
    }
    for element in path.split('/') {
        check_element(element)?;
    }
    Ok(())
}

fn check_element(element: &str) -> Result<(), PathCheckError> {
    if element.is_empty() {
        return Err(PathCheckError::EmptyElement);
    }
    if element == "." || element == ".." {
        return Err(PathCheckError::DotElement(element.to_string()));
    }
    if element.ends_with('.') {
        return Err(PathCheckError::TrailingDot(element.to_string()));
    }
    if let Some(c) = element.chars().find(|c| !is_allowed_char(*c)) {
        return Err(PathCheckError::InvalidChar(c));
    }

    let stem = element.split('.').next().unwrap_or(element);
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
    {
        return Err(PathCheckError::ReservedName(element.to_string()));
    }

    if let Some((_, suffix)) = stem.rsplit_once('~') {
        if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
            return Err(PathCheckError::ShortName(element.to_string()));
        }
    }
    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || "!#$%&()+,-.=@[]^_{}~".contains(c)
}
