use std::time::Duration;

use dirsift_core::{Digest, TtlCache, WalkConfig};

#[test]
fn test_walk_config_roundtrips_through_json() {
    let config = WalkConfig::builder()
        .pattern("*.rs")
        .max_depth(Some(3))
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let parsed: WalkConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.pattern, "*.rs");
    assert_eq!(parsed.max_depth, Some(3));
    assert!(parsed.recursive);
}

#[test]
fn test_walk_config_json_defaults() {
    // Omitted fields take the documented defaults.
    let parsed: WalkConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(parsed.pattern, "*");
    assert!(parsed.recursive);
    assert!(!parsed.include_hidden);
    assert_eq!(parsed.max_depth, None);
}

#[test]
fn test_digest_display_matches_hex() {
    let digest = Digest::new([0x0f; 32]);
    assert_eq!(format!("{digest}"), digest.to_hex());
}

#[test]
fn test_cache_holds_walk_results() {
    let mut cache: TtlCache<String, Vec<String>> = TtlCache::new();
    cache.insert(
        "scan:/tmp".to_string(),
        vec!["a.txt".to_string(), "b.txt".to_string()],
        Some(Duration::from_secs(60)),
    );

    let hit = cache.get(&"scan:/tmp".to_string()).unwrap();
    assert_eq!(hit.len(), 2);
}
