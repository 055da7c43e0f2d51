//! Source file injection
//!
//! Writes fixed payloads into a directory, overwriting whatever is there.
//! Files are rewritten on every run; nothing is diffed.

use std::path::PathBuf;
use tracing::info;

use crate::payloads::SourcePayload;
use crate::ModError;

/// Writes source payloads into one directory
#[derive(Debug, Clone)]
pub struct SourceWriter {
    dir: PathBuf,
}

impl SourceWriter {
    /// Create a writer targeting `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the directory if needed and write every payload
    pub async fn write_all(&self, payloads: &[SourcePayload]) -> Result<Vec<PathBuf>, ModError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut written = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let path = self.dir.join(payload.file_name);
            tokio::fs::write(&path, payload.contents).await?;
            info!("Wrote {:?}", path);
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads::JAVA_SOURCES;

    #[tokio::test]
    async fn test_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("app/src/main/java/com/junominu/junggaenote");

        let written = SourceWriter::new(&target).write_all(&JAVA_SOURCES).await.unwrap();

        assert_eq!(written.len(), 4);
        for payload in JAVA_SOURCES {
            let contents = tokio::fs::read_to_string(target.join(payload.file_name)).await.unwrap();
            assert_eq!(contents, payload.contents);
        }
    }

    #[tokio::test]
    async fn test_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("CallReceiver.java");
        tokio::fs::write(&stale, "// hand edited, longer than nothing at all").await.unwrap();

        let writer = SourceWriter::new(dir.path());
        writer.write_all(&JAVA_SOURCES).await.unwrap();
        writer.write_all(&JAVA_SOURCES).await.unwrap();

        let contents = tokio::fs::read_to_string(&stale).await.unwrap();
        assert_eq!(contents, crate::payloads::CALL_RECEIVER.contents);
    }

    #[tokio::test]
    async fn test_leaves_other_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let main_activity = dir.path().join("MainActivity.kt");
        tokio::fs::write(&main_activity, "class MainActivity").await.unwrap();

        SourceWriter::new(dir.path()).write_all(&JAVA_SOURCES).await.unwrap();

        let contents = tokio::fs::read_to_string(&main_activity).await.unwrap();
        assert_eq!(contents, "class MainActivity");
    }

    #[tokio::test]
    async fn test_directory_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("java");
        tokio::fs::write(&blocker, "").await.unwrap();

        let err = SourceWriter::new(blocker.join("com"))
            .write_all(&JAVA_SOURCES)
            .await
            .unwrap_err();
        assert!(matches!(err, ModError::Io(_)));
    }
}
