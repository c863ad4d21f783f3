use super::*;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

mod common {
    use super::*;

    pub(super) fn create_test_settings() -> (SettingsStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let settings = SettingsStore::open(&temp_dir.path().join("shelf.redb")).unwrap();
        (settings, temp_dir)
    }
}

mod raw {
    use super::common::create_test_settings;
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let (settings, _temp) = create_test_settings();
        assert!(settings.get(STORED_ITEMS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let (mut settings, _temp) = create_test_settings();
        settings.set("a", b"hello").unwrap();
        assert_eq!(settings.get("a").unwrap().as_deref(), Some(&b"hello"[..]));

        settings.set("a", b"replaced").unwrap();
        assert_eq!(settings.get("a").unwrap().as_deref(), Some(&b"replaced"[..]));
    }

    #[test]
    fn test_remove_reports_presence() {
        let (mut settings, _temp) = create_test_settings();
        settings.set("a", b"x").unwrap();

        assert!(settings.remove("a").unwrap());
        assert!(!settings.remove("a").unwrap());
        assert!(settings.get("a").unwrap().is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("shelf.redb");

        {
            let mut settings = SettingsStore::open(&path).unwrap();
            settings.set(STORED_ITEMS_KEY, &[1, 2, 3]).unwrap();
        }

        let settings = SettingsStore::open(&path).unwrap();
        assert_eq!(
            settings.get(STORED_ITEMS_KEY).unwrap(),
            Some(vec![1, 2, 3])
        );
    }
}

mod bookmarks {
    use super::common::create_test_settings;
    use super::*;

    fn bookmark(bytes: &[u8]) -> Bookmark {
        Bookmark::from_bytes(bytes.to_vec())
    }

    #[test]
    fn test_absent_list_is_empty() {
        let (settings, _temp) = create_test_settings();
        assert!(settings.bookmarks().unwrap().is_empty());
    }

    #[test]
    fn test_list_order_is_preserved() {
        let (mut settings, _temp) = create_test_settings();
        let list = vec![bookmark(b"c"), bookmark(b"a"), bookmark(b""), bookmark(b"b")];

        settings.set_bookmarks(&list).unwrap();
        assert_eq!(settings.bookmarks().unwrap(), list);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let (mut settings, _temp) = create_test_settings();
        settings.set(STORED_ITEMS_KEY, &[42, 0]).unwrap();

        let result = settings.bookmarks();
        assert!(matches!(result, Err(SettingsError::UnsupportedVersion(42))));
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let (mut settings, _temp) = create_test_settings();
        settings.set(STORED_ITEMS_KEY, &[]).unwrap();

        assert!(matches!(settings.bookmarks(), Err(SettingsError::Empty)));
    }
}

mod maintenance {
    use super::common::create_test_settings;
    use super::*;

    #[test]
    fn test_default_when_never_written() {
        let (settings, _temp) = create_test_settings();
        let metadata = settings.maintenance().unwrap();
        assert!(metadata.last_validated_at.is_none());
        assert!(metadata.last_pruned_count.is_none());
    }

    #[test]
    fn test_round_trip() {
        let (mut settings, _temp) = create_test_settings();
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);

        settings
            .set_maintenance(&MaintenanceMetadata {
                last_validated_at: Some(at),
                last_pruned_count: Some(2),
            })
            .unwrap();

        let metadata = settings.maintenance().unwrap();
        assert_eq!(metadata.last_validated_at, Some(at));
        assert_eq!(metadata.last_pruned_count, Some(2));
    }
}
