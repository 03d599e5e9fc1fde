use std::path::{Path, PathBuf};

use space_shooter::config::*;

// ── Parsing ───────────────────────────────────────────────────────────────────

#[test]
fn partial_file_keeps_other_defaults() {
    let cfg = GameConfig::from_ron_str(
        "(enemy_count: 5, powerup_drop_chance: 0.25)",
        Path::new("test.ron"),
    )
    .unwrap();
    assert_eq!(cfg.enemy_count, 5);
    assert_eq!(cfg.powerup_drop_chance, 0.25);
    assert_eq!(cfg.field_width, 800);
    assert_eq!(cfg.shoot_delay_ms, 250);
    assert_eq!(cfg.high_score_path, PathBuf::from("highscore.txt"));
}

#[test]
fn empty_struct_is_all_defaults() {
    let cfg = GameConfig::from_ron_str("()", Path::new("test.ron")).unwrap();
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn syntax_error_is_a_parse_error() {
    let err = GameConfig::from_ron_str("(enemy_count: ", Path::new("bad.ron")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("bad.ron"));
}

#[test]
fn zero_tick_rate_is_rejected() {
    let err = GameConfig::from_ron_str("(tick_rate: 0)", Path::new("test.ron")).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn drop_chance_must_be_a_probability() {
    let err = GameConfig::from_ron_str("(powerup_drop_chance: 1.5)", Path::new("test.ron"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn tiny_field_is_rejected() {
    let err = GameConfig::from_ron_str("(field_width: 40)", Path::new("test.ron")).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn tick_length_follows_rate() {
    assert_eq!(GameConfig::default().tick_ms(), 16);
}

// ── Files ─────────────────────────────────────────────────────────────────────

#[test]
fn missing_file_falls_back_silently() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, rejected) = GameConfig::load_or_default(dir.path().join("absent.ron"));
    assert_eq!(cfg, GameConfig::default());
    assert!(rejected.is_none());
}

#[test]
fn broken_file_falls_back_with_reason() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ron");
    std::fs::write(&path, "not ron at all").unwrap();

    let (cfg, rejected) = GameConfig::load_or_default(&path);
    assert_eq!(cfg, GameConfig::default());
    assert!(matches!(rejected, Some(ConfigError::Parse { .. })));
}

#[test]
fn valid_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.ron");
    std::fs::write(&path, "(tick_rate: 30, high_score_path: \"best.txt\")").unwrap();

    let cfg = GameConfig::load_from_file(&path).unwrap();
    assert_eq!(cfg.tick_rate, 30);
    assert_eq!(cfg.high_score_path, PathBuf::from("best.txt"));
}
