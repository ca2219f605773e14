use super::*;
use crate::foundation::core::PixelSize;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "themeframe_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn sample() -> Pixmap {
    Pixmap::from_premul_rgba8(2, 1, vec![10, 20, 30, 40, 0, 0, 0, 0]).unwrap()
}

#[test]
fn memory_cache_counts_calls() {
    let cache = MemoryFrameCache::new();
    assert!(cache.get("a").unwrap().is_none());
    cache.put("a", &sample()).unwrap();
    cache.put("a", &sample()).unwrap();
    assert_eq!(cache.get("a").unwrap(), Some(sample()));
    assert_eq!(cache.put_count("a"), 2);
    assert_eq!(cache.total_puts(), 2);
    assert_eq!(cache.get_count(), 2);
    assert_eq!(cache.keys(), vec!["a".to_string()]);
}

#[test]
fn disk_entries_keep_premultiplied_bytes() {
    let dir = temp_dir("disk_roundtrip");
    let cache = DiskFrameCache::new(&dir).unwrap();
    assert!(cache.get("15_1_2__theme_").unwrap().is_none());

    cache.put("15_1_2__theme_", &sample()).unwrap();
    assert_eq!(cache.get("15_1_2__theme_").unwrap(), Some(sample()));

    let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(files.len(), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn disk_entry_for_other_key_is_a_miss() {
    let bytes = encode_entry("a", &sample());
    assert!(decode_entry("b", &bytes).unwrap().is_none());
    assert_eq!(decode_entry("a", &bytes).unwrap(), Some(sample()));
}

#[test]
fn corrupt_disk_entry_is_an_error() {
    assert!(decode_entry("a", b"nope").is_err());

    let mut bytes = encode_entry("a", &Pixmap::new(PixelSize::new(3, 3)));
    bytes.truncate(bytes.len() - 5);
    let err = decode_entry("a", &bytes).unwrap_err();
    assert!(err.to_string().starts_with("cache error:"));
}
