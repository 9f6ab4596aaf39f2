/// Path configuration for the cropper
///
/// The tool has no config file and takes no arguments: it always reads
/// from `input/` and writes to `cropped/`, both next to the executable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the folder scanned for source images
pub const INPUT_DIR_NAME: &str = "input";

/// Name of the folder receiving exported crops
pub const OUTPUT_DIR_NAME: &str = "cropped";

/// Prefix prepended to the source file name of every export
pub const OUTPUT_PREFIX: &str = "cropped_";

/// Extensions (lowercase) picked up by the directory scan
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropperConfig {
    /// Folder the image list is built from
    pub input_dir: PathBuf,
    /// Folder exports are written into
    pub output_dir: PathBuf,
}

impl CropperConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Resolve `input/` and `cropped/` relative to the running executable.
    ///
    /// Falls back to the current working directory when the executable
    /// path cannot be determined.
    pub fn beside_executable() -> Self {
        let base = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::rooted_at(&base)
    }

    /// Both folders under a common base directory
    pub fn rooted_at(base: &Path) -> Self {
        Self::new(base.join(INPUT_DIR_NAME), base.join(OUTPUT_DIR_NAME))
    }

    /// Create the output folder if it does not exist yet
    pub fn ensure_output_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_at_uses_fixed_folder_names() {
        let config = CropperConfig::rooted_at(Path::new("/opt/tool"));
        assert_eq!(config.input_dir, PathBuf::from("/opt/tool/input"));
        assert_eq!(config.output_dir, PathBuf::from("/opt/tool/cropped"));
    }

    #[test]
    fn test_ensure_output_dir_creates_missing_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CropperConfig::rooted_at(tmp.path());
        assert!(!config.output_dir.exists());

        config.ensure_output_dir().unwrap();
        assert!(config.output_dir.is_dir());

        // Second call is a no-op
        config.ensure_output_dir().unwrap();
    }
}
