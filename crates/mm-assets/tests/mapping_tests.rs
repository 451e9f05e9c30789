use mm_assets::mapping::*;
use mm_core::vision::VisibilityCode;

fn code(s: &str) -> VisibilityCode {
    s.parse().unwrap()
}

#[test]
fn test_specificity_counts_fixed_slots() {
    assert_eq!(WallSetEntry::new("?????", 0, "any").specificity(), 0);
    assert_eq!(WallSetEntry::new("11?1?", 1, "dead end").specificity(), 3);
    assert_eq!(WallSetEntry::new("110110110101", 2, "exact").specificity(), 12);
}

#[test]
fn test_pattern_matches_prefix() {
    let entry = WallSetEntry::new("11?0", 2, "corridor");
    assert!(entry.matches(code("11101101")));
    assert!(entry.matches(code("110011111111")));
    assert!(!entry.matches(code("10101101")));
    assert!(!entry.matches(code("11111111")));
}

#[test]
fn test_pattern_longer_than_code_never_matches() {
    let entry = WallSetEntry::new("1111111111", 9, "long");
    assert!(!entry.matches(code("11111111")));
    assert!(entry.matches(code("111111111111")));
}

#[test]
fn test_best_match_prefers_specific_then_first() {
    let mapping = WallSetMapping {
        wallsets: vec![
            WallSetEntry::new("??", 0, "fallback"),
            WallSetEntry::new("1?", 1, "left wall"),
            WallSetEntry::new("?1", 2, "right wall"),
            WallSetEntry::new("11", 3, "both walls"),
        ],
    };

    let (index, entry) = mapping.best_match(code("11101101")).unwrap();
    assert_eq!((index, entry.asset), (3, 3));

    // "1?" and "?1" tie on specificity; the earlier entry wins
    let mapping = WallSetMapping {
        wallsets: mapping.wallsets[..3].to_vec(),
    };
    assert_eq!(mapping.best_match(code("11101101")).unwrap().1.label, "left wall");
    assert_eq!(mapping.best_match(code("00101101")).unwrap().1.label, "fallback");
}

#[test]
fn test_best_match_none_when_uncovered() {
    let mapping = WallSetMapping {
        wallsets: vec![WallSetEntry::new("1", 0, "left wall")],
    };
    assert!(mapping.best_match(code("01111111")).is_none());
}

#[test]
fn test_deserialize_mapping() {
    let json = r#"{
        "wallsets": [
            { "pattern": "11?0?", "asset": 2, "label": "corridor", "color": "white" },
            { "pattern": "?????", "asset": 0, "label": "open view" }
        ]
    }"#;

    let mapping: WallSetMapping = serde_json::from_str(json).unwrap();
    assert_eq!(mapping.wallsets.len(), 2);
    assert_eq!(mapping.wallsets[0].color.as_deref(), Some("white"));
    assert_eq!(mapping.wallsets[1].color, None);
}

#[test]
fn test_builtin_mapping_parses() {
    let mapping = WallSetMapping::builtin().unwrap();
    assert!(!mapping.wallsets.is_empty());
    assert!(mapping.wallsets.iter().all(|e| e.invalid_char().is_none()));
}
