//! Input acquisition.
//!
//! The layout description is read in full before parsing starts, from one of:
//!
//! 1. a file given on the command line
//! 2. standard input, until end of stream
//! 3. the example document compiled into the binary

use crate::config::Config;
use crate::error::Result;
use crate::ids::IdGenerator;
use std::io::Read;
use std::path::Path;

/// Example layout description shipped with the binary.
pub const EMBEDDED_EXAMPLE: &str = include_str!("../demos/layout.json");

/// Where the layout description comes from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    File(&'a Path),
    Stdin,
    Embedded,
}

/// Read the whole input for `source` into a string.
///
/// # Errors
///
/// Returns [`crate::LayoutError::IoError`] if the file or stream cannot be read.
pub fn read_input(source: Source<'_>) -> Result<String> {
    match source {
        Source::File(path) => {
            log::debug!("reading layout from {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
        Source::Stdin => {
            log::debug!("reading layout from stdin");
            read_all(std::io::stdin().lock())
        }
        Source::Embedded => Ok(EMBEDDED_EXAMPLE.to_string()),
    }
}

/// Drain a reader to end of stream.
pub fn read_all(mut reader: impl Read) -> Result<String> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Read and parse a layout description.
///
/// Convenience wrapper that combines [`read_input`] and [`Config::from_json`].
pub fn load_config(source: Source<'_>, ids: &mut dyn IdGenerator) -> Result<Config> {
    let contents = read_input(source)?;
    Config::from_json(&contents, ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutError;
    use crate::ids::SequentialIds;
    use crate::render::render_to_string;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"layouts": [{{"name": "empty", "windows": []}}]}}"#
        )
        .unwrap();

        let config = load_config(Source::File(file.path()), &mut SequentialIds::new()).unwrap();
        assert_eq!(config.list_layouts(), ["empty"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_config(Source::File(&path), &mut SequentialIds::new()).unwrap_err();
        assert!(matches!(err, LayoutError::IoError(_)));
    }

    #[test]
    fn test_read_all() {
        let input = read_all(&b"{\"profiles\": []}"[..]).unwrap();
        assert_eq!(input, "{\"profiles\": []}");
    }

    #[test]
    fn test_embedded_example_compiles() {
        let mut ids = SequentialIds::new();
        let config = load_config(Source::Embedded, &mut ids).unwrap();
        assert_eq!(config.templates.names(), ["echo", "htop", "ssh"]);

        let out = render_to_string(&config, &mut ids).unwrap();
        assert!(out.starts_with("[global_config]\n"));
        assert!(out.ends_with("[plugins]\n"));
        assert!(out.contains("type = Notebook"));
        assert!(out.contains("type = HPaned"));
        assert!(out.contains("type = VPaned"));
        assert!(out.contains("ratio = 0.6666666666666667"));
    }
}
