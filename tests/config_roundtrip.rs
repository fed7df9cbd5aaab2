//! Config persistence through the filesystem.

use shoppinator::{AppConfig, AppError, OutputFormat};

#[test]
fn save_then_load_preserves_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.format = OutputFormat::Json;
    config.log_filter = "shop_scraper=debug".into();
    config.scraper.max_concurrency = Some(3);
    config.scraper.user_agent = Some("shoppinator-test/1.0".into());
    config.scraper.selectors.card = "article.product".into();

    config.save_to_file(&path).expect("save");
    let loaded = AppConfig::from_file(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn load_prefers_explicit_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scraper]\nbase_source = \"listing.html\"\n").expect("write");

    let config = AppConfig::load(Some(&path)).expect("load");
    assert_eq!(config.scraper.base_source, "listing.html");
    assert_eq!(config.format, OutputFormat::Table);
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "scraper = [not toml").expect("write");

    let err = AppConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn wrong_type_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scraper]\nmax_pages = \"many\"\n").expect("write");

    assert!(matches!(AppConfig::from_file(&path), Err(AppError::Config(_))));
}
