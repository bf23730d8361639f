pub mod evaluate;
pub mod inspect;
pub mod quantize;

use std::path::Path;

/// File name for report headers, falling back to the full path
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
