use super::*;
use std::fs;
use tempfile::TempDir;

mod common {
    use super::*;

    pub(super) fn create_test_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, name.as_bytes()).unwrap();
        path
    }

    pub(super) fn canonical(path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap()
    }
}

mod encode {
    use super::common::{canonical, create_test_file};
    use super::*;

    #[test]
    fn test_encode_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.txt");

        let result = CanonicalPathCodec.encode(&missing);
        assert!(matches!(result, Err(LocatorError::NotFound(p)) if p == missing));
    }

    #[test]
    fn test_encode_canonicalizes_relative_components() {
        let temp = TempDir::new().unwrap();
        let file = create_test_file(&temp, "a.txt");
        fs::create_dir(temp.path().join("sub")).unwrap();
        let roundabout = temp.path().join("sub").join("..").join("a.txt");

        let direct = CanonicalPathCodec.encode(&file).unwrap();
        let indirect = CanonicalPathCodec.encode(&roundabout).unwrap();

        assert_eq!(direct, indirect);
        assert_eq!(
            CanonicalPathCodec.decode(&indirect).unwrap().path,
            canonical(&file)
        );
    }

    #[test]
    fn test_encode_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("folder");
        fs::create_dir(&dir).unwrap();

        let bookmark = CanonicalPathCodec.encode(&dir).unwrap();
        let resolution = CanonicalPathCodec.decode(&bookmark).unwrap();
        assert!(resolution.reachable);
        assert_eq!(resolution.path, canonical(&dir));
    }
}

mod decode {
    use super::common::{canonical, create_test_file};
    use super::*;

    #[test]
    fn test_decode_existing_file_is_reachable_and_fresh() {
        let temp = TempDir::new().unwrap();
        let file = create_test_file(&temp, "a.txt");

        let bookmark = CanonicalPathCodec.encode(&file).unwrap();
        let resolution = CanonicalPathCodec.decode(&bookmark).unwrap();

        assert_eq!(
            resolution,
            Resolution {
                path: canonical(&file),
                reachable: true,
                stale: false,
            }
        );
    }

    #[test]
    fn test_decode_deleted_file_is_unreachable_not_error() {
        let temp = TempDir::new().unwrap();
        let file = create_test_file(&temp, "a.txt");
        let expected_path = canonical(&file);
        let bookmark = CanonicalPathCodec.encode(&file).unwrap();

        fs::remove_file(&file).unwrap();

        let resolution = CanonicalPathCodec.decode(&bookmark).unwrap();
        assert!(!resolution.reachable);
        assert!(!resolution.stale);
        assert_eq!(resolution.path, expected_path);
    }

    #[cfg(unix)]
    #[test]
    fn test_decode_renamed_file_is_found_and_stale() {
        let temp = TempDir::new().unwrap();
        let file = create_test_file(&temp, "before.txt");
        let bookmark = CanonicalPathCodec.encode(&file).unwrap();

        let renamed = temp.path().join("after.txt");
        fs::rename(&file, &renamed).unwrap();

        let resolution = CanonicalPathCodec.decode(&bookmark).unwrap();
        assert!(resolution.reachable);
        assert!(resolution.stale);
        assert_eq!(resolution.path, canonical(&renamed));

        let refreshed = CanonicalPathCodec.encode(&resolution.path).unwrap();
        assert!(!CanonicalPathCodec.decode(&refreshed).unwrap().stale);
    }

    #[test]
    fn test_decode_missing_parent_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("gone");
        fs::create_dir(&dir).unwrap();
        let file = dir.join("a.txt");
        fs::write(&file, b"x").unwrap();
        let bookmark = CanonicalPathCodec.encode(&file).unwrap();

        fs::remove_dir_all(&dir).unwrap();

        assert!(!CanonicalPathCodec.decode(&bookmark).unwrap().reachable);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let empty = Bookmark::from_bytes(vec![]);
        assert!(matches!(
            CanonicalPathCodec.decode(&empty),
            Err(LocatorError::Empty)
        ));

        let future = Bookmark::from_bytes(vec![9, 1, 2]);
        assert!(matches!(
            CanonicalPathCodec.decode(&future),
            Err(LocatorError::UnsupportedVersion(9))
        ));

        let truncated = Bookmark::from_bytes(vec![1, 200]);
        assert!(matches!(
            CanonicalPathCodec.decode(&truncated),
            Err(LocatorError::Encoding(_))
        ));
    }
}
