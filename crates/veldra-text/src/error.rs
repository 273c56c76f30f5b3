/// Errors from the font loading collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontLoadError {
    /// Font file not found.
    FileNotFound(std::path::PathBuf),

    /// The file exists but is not a usable font.
    InvalidFontData(String),

    /// Generic IO error.
    IoError(String),
}

impl std::fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontLoadError::FileNotFound(path) => {
                write!(f, "font file not found: {}", path.display())
            }
            FontLoadError::InvalidFontData(msg) => write!(f, "invalid font data: {}", msg),
            FontLoadError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FontLoadError {}

impl From<std::io::Error> for FontLoadError {
    fn from(err: std::io::Error) -> Self {
        FontLoadError::IoError(err.to_string())
    }
}
