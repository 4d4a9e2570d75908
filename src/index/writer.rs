use crate::error::{Error, Result};
use crate::index::types::IndexArtifact;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the artifact as 2-space pretty-printed JSON, creating parent directories
pub fn write_artifact(artifact: &IndexArtifact, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, artifact).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| Error::io(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::Projection;
    use serde_json::json;

    #[test]
    fn test_write_pretty_two_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist").join("api.json");

        let mut projection = Projection::new();
        projection.insert("title".into(), json!("Ally"));
        let mut artifact = IndexArtifact::new();
        artifact.insert("ally".into(), projection);

        write_artifact(&artifact, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"ally\": {\n    \"title\": \"Ally\"\n  }\n}");
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("dist");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_artifact(&IndexArtifact::new(), &blocker.join("api.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
