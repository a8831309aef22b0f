//! Local document store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::Result;

pub const DEFAULT_EXTENSION: &str = "pdf";

/// Stands for an empty name; escaping never yields a lone `%`
const EMPTY_NAME: &str = "%";

/// Maps (folder, document) names onto files below a data root
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    extension: String,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn folder_dir(&self, folder: &str) -> PathBuf {
        self.root.join(sanitize_segment(folder))
    }

    pub fn document_path(&self, folder: &str, document: &str) -> PathBuf {
        let file_name = format!("{}.{}", sanitize_segment(document), self.extension);
        self.folder_dir(folder).join(file_name)
    }

    /// Create the folder directory if it is missing; true if it was created
    pub async fn ensure_folder(&self, folder: &str) -> Result<bool> {
        let dir = self.folder_dir(folder);
        if tokio::fs::metadata(&dir).await.is_ok_and(|m| m.is_dir()) {
            return Ok(false);
        }

        tracing::info!(folder = %folder, path = %dir.display(), "Creating folder");
        tokio::fs::create_dir_all(&dir).await?;
        Ok(true)
    }

    /// Whether a regular file exists at `path`
    pub async fn contains(&self, path: &Path) -> Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `body` as the whole content of `path`.
    ///
    /// The bytes go to a `.part` sibling first so an interrupted write never
    /// leaves a file that counts as downloaded. The parent directory must
    /// already exist.
    pub async fn write(&self, path: &Path, body: &[u8]) -> Result<()> {
        let partial = partial_path(path);
        tokio::fs::write(&partial, body).await?;
        tokio::fs::rename(&partial, path).await?;
        Ok(())
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

/// Make a remote display name safe to use as a single path component.
///
/// `%`, separators, control characters and characters Windows rejects are
/// written as `%XX` per UTF-8 byte, as are leading whitespace and trailing
/// dots or whitespace. Every other character is kept, so distinct names
/// always map to distinct segments and `.`/`..` can never come out.
pub fn sanitize_segment(name: &str) -> String {
    if name.is_empty() {
        return EMPTY_NAME.to_string();
    }

    let lead = name.len() - name.trim_start().len();
    let tail = name
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .len();

    let mut out = String::with_capacity(name.len());
    for (i, c) in name.char_indices() {
        let escape = match c {
            '%' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => true,
            c if c.is_control() => true,
            _ => i < lead || i >= tail,
        };

        if escape {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path() {
        let store = DocumentStore::new("data");
        assert_eq!(
            store.document_path("2020", "Kontoauszug_01"),
            Path::new("data").join("2020").join("Kontoauszug_01.pdf")
        );

        let store = DocumentStore::new("data").with_extension(".html");
        assert_eq!(
            store.document_path("2020", "Brief"),
            Path::new("data").join("2020").join("Brief.html")
        );
    }

    #[test]
    fn test_sanitize_segment() {
        assert_eq!(sanitize_segment("Kontoauszug_01"), "Kontoauszug_01");
        assert_eq!(sanitize_segment("Brief 2015"), "Brief 2015");
        assert_eq!(sanitize_segment("Rechnung 01/2020"), "Rechnung 01%2F2020");
        assert_eq!(sanitize_segment("..\\..\\etc"), "..%5C..%5Cetc");
        assert_eq!(sanitize_segment("a\nb\0c"), "a%0Ab%00c");
        assert_eq!(sanitize_segment("100%"), "100%25");
        assert_eq!(sanitize_segment(".."), "%2E%2E");
        assert_eq!(sanitize_segment("."), "%2E");
        assert_eq!(sanitize_segment(" Steuer. "), "%20Steuer%2E%20");
        assert_eq!(sanitize_segment(""), EMPTY_NAME);
    }

    #[test]
    fn test_similar_names_stay_distinct() {
        let names = [
            "Rechnung 01/2020",
            "Rechnung 01_2020",
            "Rechnung 01%2F2020",
            "Steuer.",
            "Steuer",
            "Steuer ",
            " Steuer",
            "",
            "%",
            "   ",
        ];

        let segments: std::collections::HashSet<String> =
            names.iter().map(|n| sanitize_segment(n)).collect();
        assert_eq!(segments.len(), names.len());

        let store = DocumentStore::new("data");
        assert_ne!(store.folder_dir("2020/1"), store.folder_dir("2020_1"));
        assert_ne!(
            store.document_path("2020", "Steuer."),
            store.document_path("2020", "Steuer")
        );
    }

    #[test]
    fn test_traversal_stays_below_root() {
        let store = DocumentStore::new("/srv/data");
        let path = store.document_path("../../etc", "../passwd");

        assert!(path.starts_with("/srv/data"));
        assert_eq!(path.components().count(), Path::new("/srv/data").components().count() + 2);
    }

    #[tokio::test]
    async fn test_ensure_folder_and_write() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(tmp.path());

        assert!(store.ensure_folder("2020").await.unwrap());
        assert!(!store.ensure_folder("2020").await.unwrap());

        let path = store.document_path("2020", "Kontoauszug_01");
        assert!(!store.contains(&path).await.unwrap());

        store.write(&path, b"%PDF-1.4").await.unwrap();
        assert!(store.contains(&path).await.unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
        assert!(!partial_path(&path).exists());
    }

    #[tokio::test]
    async fn test_write_requires_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(tmp.path());
        let path = store.document_path("missing", "doc");

        assert!(store.write(&path, b"x").await.is_err());
    }

    #[tokio::test]
    async fn test_directory_is_not_a_document() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(tmp.path());
        store.ensure_folder("2020").await.unwrap();

        let path = store.document_path("2020", "odd");
        std::fs::create_dir(&path).unwrap();
        assert!(!store.contains(&path).await.unwrap());
    }
}
