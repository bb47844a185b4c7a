//! Tests for the storage collaborator.

use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn store_with_file(name: &str, content: &[u8]) -> (TempDir, FileContentStore) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(name), content).unwrap();
    let store = FileContentStore::with_base_dir(dir.path());
    (dir, store)
}

mod content_ref {
    use super::*;

    #[test]
    fn displays_raw_reference() {
        let reference = ContentRef::new("/data/input.csv");

        assert_eq!(reference.to_string(), "/data/input.csv");
        assert_eq!(reference.as_str(), "/data/input.csv");
    }

    #[test]
    fn converts_from_strings() {
        assert_eq!(ContentRef::from("a"), ContentRef::new("a"));
        assert_eq!(ContentRef::from("a".to_string()), ContentRef::new("a"));
    }
}

mod file_store {
    use super::*;

    #[test]
    fn reads_relative_path_against_base_dir() {
        let (_dir, store) = store_with_file("input.csv", b"a,b\n1,2\n");

        let bytes = store.read(&ContentRef::new("input.csv")).unwrap();

        assert_eq!(bytes, b"a,b\n1,2\n");
    }

    #[test]
    fn reads_absolute_path() {
        let (dir, _) = store_with_file("payload.bin", &[0, 159, 146, 150]);
        let path = dir.path().join("payload.bin");

        let bytes = FileContentStore::new()
            .read(&ContentRef::new(path.to_string_lossy()))
            .unwrap();

        assert_eq!(bytes, vec![0, 159, 146, 150]);
    }

    #[test]
    fn reads_file_uri() {
        let (dir, _) = store_with_file("doc.xml", b"<a/>");
        let uri = format!("file://{}", dir.path().join("doc.xml").display());

        let bytes = FileContentStore::new().read(&ContentRef::new(uri)).unwrap();

        assert_eq!(bytes, b"<a/>");
    }

    #[test]
    fn missing_file_is_not_found() {
        let (_dir, store) = store_with_file("present.txt", b"");

        let err = store.read(&ContentRef::new("absent.txt")).unwrap_err();

        assert!(matches!(err, StorageError::NotFound(ref r) if r.as_str() == "absent.txt"));
    }

    #[test]
    fn remote_scheme_is_unsupported() {
        let err = FileContentStore::new()
            .read(&ContentRef::new("kestra:///flows/input.csv"))
            .unwrap_err();

        assert!(matches!(err, StorageError::UnsupportedReference(_)));
    }

    #[test]
    fn directory_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let store = FileContentStore::new();

        let err = store
            .read(&ContentRef::new(dir.path().to_string_lossy()))
            .unwrap_err();

        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let path = FileContentStore::new()
            .resolve(&ContentRef::new("~/inbox/file.json"))
            .unwrap();

        assert_eq!(path, home.join("inbox/file.json"));
    }

    #[test]
    fn absolute_path_ignores_base_dir() {
        let store = FileContentStore::with_base_dir("/base");

        let path = store.resolve(&ContentRef::new("/abs/file")).unwrap();

        assert_eq!(path, PathBuf::from("/abs/file"));
    }

    #[test]
    fn store_is_usable_through_reference() {
        fn read_via<S: ContentStore>(store: S, reference: &ContentRef) -> Vec<u8> {
            store.read(reference).unwrap()
        }

        let (_dir, store) = store_with_file("x", b"x");

        assert_eq!(read_via(&store, &ContentRef::new("x")), b"x");
    }
}
