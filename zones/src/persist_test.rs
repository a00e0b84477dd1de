use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::*;

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

fn temp_path(tag: &str) -> PathBuf {
    let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("zones-persist-{tag}-{}-{n}.json", std::process::id()))
}

fn sample_store() -> ZoneStore {
    [
        Zone::new(NormalizedRect::new(1250, 1667, 2500, 1667)),
        Zone::with_score(NormalizedRect::new(0, 0, 10, 20), -1),
    ]
    .into_iter()
    .collect()
}

// =============================================================
// encode
// =============================================================

#[test]
fn encode_empty_store_is_empty_array() {
    let text = encode(&ZoneStore::new()).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!([]));
}

#[test]
fn encode_writes_tagged_records_in_order() {
    let text = encode(&sample_store()).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!([
            { "kind": "zone", "topleft": [1250, 1667], "size": [2500, 1667], "score": 1 },
            { "kind": "zone", "topleft": [0, 0], "size": [10, 20], "score": -1 },
        ])
    );
}

// =============================================================
// decode
// =============================================================

#[test]
fn decode_reads_back_encoded_store() {
    let decoded = decode(&encode(&sample_store()).unwrap()).unwrap();
    assert_eq!(decoded.store, sample_store());
    assert!(decoded.skipped.is_empty());
}

#[test]
fn decode_empty_array_yields_no_zones() {
    let decoded = decode("[]").unwrap();
    assert!(decoded.store.is_empty());
    assert!(decoded.skipped.is_empty());
}

#[test]
fn decode_ignores_unknown_extra_fields() {
    let text = json!([
        { "kind": "zone", "topleft": [1, 2], "size": [3, 4], "score": 1, "label": "door" },
    ])
    .to_string();
    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.store.len(), 1);
}

#[test]
fn decode_skips_record_without_discriminator() {
    let text = json!([
        { "topleft": [1, 2], "size": [3, 4], "score": 1 },
        { "kind": "zone", "topleft": [5, 6], "size": [7, 8], "score": -1 },
    ])
    .to_string();
    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.store.len(), 1);
    assert_eq!(decoded.store.get(0).map(|z| z.rect.left), Some(5));
    assert_eq!(decoded.skipped.len(), 1);
    assert_eq!(decoded.skipped[0].position, 0);
}

#[test]
fn decode_skips_record_of_other_kind() {
    let text = json!([{ "kind": "marker", "at": [1, 2] }]).to_string();
    let decoded = decode(&text).unwrap();
    assert!(decoded.store.is_empty());
    assert_eq!(decoded.skipped.len(), 1);
}

#[test]
fn decode_skips_record_missing_field() {
    let text = json!([
        { "kind": "zone", "topleft": [1, 2], "size": [3, 4] },
        { "kind": "zone", "topleft": [1, 2], "score": 1 },
        { "kind": "zone", "size": [3, 4], "score": 1 },
    ])
    .to_string();
    let decoded = decode(&text).unwrap();
    assert!(decoded.store.is_empty());
    let positions: Vec<_> = decoded.skipped.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert!(decoded.skipped[0].reason.contains("score"));
}

#[test]
fn decode_skips_record_with_wrong_shape() {
    let text = json!([
        { "kind": "zone", "topleft": [1, 2, 3], "size": [3, 4], "score": 1 },
        { "kind": "zone", "topleft": "1,2", "size": [3, 4], "score": 1 },
        { "kind": "zone", "topleft": [1, 2], "size": [3, 4], "score": "high" },
        42,
    ])
    .to_string();
    let decoded = decode(&text).unwrap();
    assert!(decoded.store.is_empty());
    assert_eq!(decoded.skipped.len(), 4);
}

#[test]
fn decode_skips_negative_size() {
    let text = json!([{ "kind": "zone", "topleft": [1, 2], "size": [-3, 4], "score": 1 }]).to_string();
    let decoded = decode(&text).unwrap();
    assert!(decoded.store.is_empty());
    assert!(decoded.skipped[0].reason.contains("negative size"));
}

#[test]
fn decode_skips_unnegatable_score() {
    let text = json!([
        { "kind": "zone", "topleft": [0, 0], "size": [10000, 10000], "score": i32::MIN },
        { "kind": "zone", "topleft": [0, 0], "size": [10, 10], "score": i32::MIN + 1 },
    ])
    .to_string();
    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.store.len(), 1);
    assert_eq!(decoded.store.get(0).map(|z| z.score), Some(i32::MIN + 1));
    assert_eq!(decoded.skipped[0].position, 0);
    assert!(decoded.skipped[0].reason.contains("cannot be negated"));
}

#[test]
fn decode_accepts_out_of_range_coordinates() {
    let text = json!([{ "kind": "zone", "topleft": [-500, 12000], "size": [3, 4], "score": 1 }]).to_string();
    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.store.get(0).map(|z| z.rect.top), Some(12_000));
}

#[test]
fn decode_rejects_non_array_document() {
    let err = decode(r#"{ "zones": [] }"#).unwrap_err();
    assert!(matches!(err, PersistError::NotASequence));
}

#[test]
fn decode_rejects_invalid_json() {
    let err = decode("[{").unwrap_err();
    assert!(matches!(err, PersistError::Json(_)));
}

// =============================================================
// save / load
// =============================================================

#[test]
fn save_then_load_restores_store() {
    let path = temp_path("roundtrip");
    save(&sample_store(), &path).unwrap();
    let decoded = load(&path).unwrap();
    assert_eq!(decoded.store, sample_store());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn save_empty_store_then_load_yields_zero_zones() {
    let path = temp_path("empty");
    save(&ZoneStore::new(), &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), json!([]));
    assert!(load(&path).unwrap().store.is_empty());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn save_into_missing_directory_is_io_error() {
    let path = std::env::temp_dir().join("zones-no-such-dir").join("nested").join("zones.json");
    let err = save(&sample_store(), &path).unwrap_err();
    assert!(matches!(err, PersistError::Io { .. }));
    assert!(err.to_string().contains("zones.json"));
}

#[test]
fn load_missing_file_is_not_found() {
    let err = load(&temp_path("missing")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn json_error_is_not_not_found() {
    let err = decode("nope").unwrap_err();
    assert!(!err.is_not_found());
}
