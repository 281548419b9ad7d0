//! Integration tests for loading and translating with the on-disk fixtures
//! in `tests/testdata`.
//!
//! Layout:
//! - `en.ini`, `zh-CN.ini`: file mode sources
//! - `en/`, `zh-CN/`: dir mode sources (`en/other.ini` overrides `en/default.ini`)

use ini_i18n::{Args, I18n, I18nConfig, I18nError, LoadMode, MessageStore, RenderMode};
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ==================== Test Helpers ====================

fn testdata() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/testdata")
}

fn languages() -> Vec<(&'static str, &'static str)> {
    vec![("en", "English"), ("zh-CN", "简体中文")]
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn file_mode() -> I18n {
    init_tracing();
    I18n::new_with_init(testdata(), "en", languages()).expect("fixtures should load")
}

// ==================== File Mode Tests ====================

#[test]
fn test_file_mode_translations() {
    let i18n = file_mode();

    assert!(i18n.has_lang("zh-CN"));
    assert!(!i18n.has_lang("zh-TW"));
    assert_eq!(i18n.load_mode(), LoadMode::File);

    assert_eq!(i18n.translate("en", "name"), "Blog");
    assert_eq!(i18n.translate_default("name"), "Blog");
    assert_eq!(i18n.translate("zh-CN", "name"), "博客");
    assert_eq!(i18n.translate("zh-CN", "site.title"), "我的博客");
    assert_eq!(
        i18n.translate_default_with("argMsg", &Args::list(["inhere"])),
        "hello inhere, welcome"
    );
    assert_eq!(i18n.languages()["en"], "English");
}

#[test]
fn test_file_mode_unknown_language_echoes_key() {
    let i18n = file_mode();
    assert_eq!(i18n.translate("zh-TW", "key"), "key");
}

#[test]
fn test_file_mode_fallback() {
    let mut i18n = file_mode();
    i18n.set_fallback_lang("en");

    assert_eq!(i18n.translate("zh-CN", "onlyInEn"), "val0");
    assert_eq!(i18n.translate("zh-CN", "noKey"), "noKey");
    assert!(i18n
        .translate_with("no-lang", "argMsg", &Args::list(["inhere"]))
        .contains("inhere"));
    assert_eq!(i18n.translate("no-lang", "no-key"), "no-key");
}

#[test]
fn test_has_key_does_not_use_fallback() {
    let mut i18n = file_mode();
    i18n.set_fallback_lang("en");

    assert!(i18n.has_key("en", "onlyInEn"));
    assert!(!i18n.has_key("zh-CN", "onlyInEn"));
    assert!(!i18n.has_key("no-lang", "key"));
    assert_eq!(i18n.translate("zh-CN", "onlyInEn"), "val0");
}

#[test]
fn test_file_mode_missing_language_file_fails() {
    init_tracing();
    let mut langs = languages();
    langs.push(("not-exist", "Not-Exist"));

    let err = I18n::new_with_init(testdata(), "en", langs).unwrap_err();
    match err {
        I18nError::LoadLanguage { lang, .. } => assert_eq!(lang, "not-exist"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_del_lang_then_translate_falls_through() {
    let mut i18n = file_mode();
    i18n.set_fallback_lang("en");

    assert!(i18n.del_lang("zh-CN"));
    assert!(!i18n.has_lang("zh-CN"));
    assert!(i18n.lang("zh-CN").is_none());
    assert_eq!(i18n.translate("zh-CN", "name"), "Blog");

    i18n.set_fallback_lang("");
    assert_eq!(i18n.translate("zh-CN", "name"), "name");
}

#[test]
fn test_reinit_loads_new_language_and_keeps_others() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    std::fs::copy(testdata().join("en.ini"), tmp.path().join("en.ini")).unwrap();
    std::fs::write(tmp.path().join("fr.ini"), "name = Blogue").unwrap();

    let mut i18n = I18n::new_with_init(tmp.path(), "en", [("en", "English")]).unwrap();
    i18n.load_string("en", "runtime = added later").unwrap();

    i18n.add("fr", "Français");
    i18n.init().unwrap();

    assert_eq!(i18n.translate("fr", "name"), "Blogue");
    assert_eq!(i18n.translate("en", "name"), "Blog");
    assert_eq!(i18n.translate("en", "runtime"), "added later");
}

// ==================== Dir Mode Tests ====================

#[test]
fn test_dir_mode_merges_files() {
    init_tracing();
    let mut i18n = I18n::new(testdata(), "en", languages());
    i18n.set_load_mode(LoadMode::Dir);
    i18n.init().unwrap();

    assert_eq!(i18n.load_mode(), LoadMode::Dir);
    assert_eq!(i18n.translate_default("name"), "inhere");
    assert_eq!(i18n.translate("en", "use-for"), "language manager");
    assert_eq!(i18n.translate("en", "extra"), "from other");
    assert_eq!(i18n.translate("en", "site.title"), "My Blog");
    assert_eq!(i18n.translate("zh-CN", "use-for"), "语言管理");
}

#[test]
fn test_dir_mode_ignores_subdirs_and_other_files() {
    init_tracing();
    let mut i18n = I18n::new(testdata(), "en", [("en", "English")]);
    i18n.set_load_mode(LoadMode::Dir);
    i18n.init().unwrap();

    let store = i18n.lang("en").unwrap();
    assert_ne!(store.get("name"), Some("should never load"));
    assert_eq!(store.len(), 4);
}

#[test]
fn test_dir_mode_missing_directory_fails() {
    init_tracing();
    let mut langs = languages();
    langs.push(("not-exist", "Not-Exist"));

    let mut i18n = I18n::new(testdata(), "en", langs);
    i18n.set_load_mode(LoadMode::Dir);
    assert!(i18n.init().is_err());
}

#[test]
fn test_dir_mode_later_file_wins() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("en")).unwrap();
    std::fs::write(tmp.path().join("en/a.ini"), "k = from a").unwrap();
    std::fs::write(tmp.path().join("en/b.ini"), "k = from b").unwrap();

    let mut i18n = I18n::new(tmp.path(), "en", [("en", "English")]);
    i18n.set_load_mode(LoadMode::Dir);
    i18n.init().unwrap();

    assert_eq!(i18n.translate("en", "k"), "from b");
}

#[test]
fn test_custom_extension() {
    init_tracing();
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("en.lang"), "name = Blog").unwrap();

    let mut i18n = I18n::new(tmp.path(), "en", [("en", "English")]);
    i18n.set_file_extension("lang");
    i18n.init().unwrap();

    assert_eq!(i18n.translate("en", "name"), "Blog");
}

// ==================== Runtime Loading Tests ====================

#[test]
fn test_new_lang_and_load_file() {
    let mut i18n = I18n::new_empty();
    i18n.add("en", "English");

    i18n.load_file("en", testdata().join("en.ini")).unwrap();
    assert!(matches!(
        i18n.load_file("en", "not-exist.ini"),
        Err(I18nError::Io { .. })
    ));
    assert!(i18n.load_string("en", "invalid string").is_err());

    assert_eq!(i18n.translate("en", "name"), "Blog");
    assert_eq!(i18n.translate_default("name"), "name");

    assert!(i18n.load_file("zh-CN", testdata().join("zh-CN.ini")).is_err());
    assert!(i18n.load_string("zh-CN", "name = 博客").is_err());
    i18n.new_lang("zh-CN", "简体中文");
    i18n.load_string("zh-CN", "name = 博客").unwrap();
    assert_eq!(i18n.translate("zh-CN", "name"), "博客");

    i18n.set_default_lang("en");
    assert_eq!(i18n.translate_default("name"), "Blog");
}

#[test]
fn test_export_round_trip() {
    let i18n = file_mode();
    let exported = i18n.export("zh-CN");

    let mut fresh = I18n::new_empty();
    fresh.add("zh-CN", "简体中文");
    fresh.load_string("zh-CN", &exported).unwrap();

    assert_eq!(fresh.lang("zh-CN"), i18n.lang("zh-CN"));
    assert_eq!(MessageStore::parse(&exported).unwrap(), *i18n.lang("zh-CN").unwrap());
}

// ==================== Rendering Tests ====================

#[test]
fn test_replace_mode_all_conventions() {
    let mut i18n = file_mode();
    i18n.set_render_mode(RenderMode::Replace);

    let conventions = [
        Args::pairs(["{name}", "tom", "{age}", "22"]),
        Args::named([("name", json!("tom")), ("age", json!(22))]),
        Args::list([json!("name"), json!("tom"), json!("age"), json!(22)]),
    ];
    for args in &conventions {
        assert_eq!(i18n.tr("en", "intro", args), "i am tom, age is 22");
    }

    let bad_age = Args::named([("name", json!("tom")), ("age", json!({"years": 22}))]);
    assert_eq!(
        i18n.tr("en", "intro", &bad_age),
        "i am tom, age is CANNOT-TO-STRING"
    );
}

#[test]
fn test_sprintf_mode_greeting() {
    let mut i18n = I18n::new_empty().with_lang("en", "English");
    i18n.load_string("en", "greet = hello, %s").unwrap();
    assert_eq!(
        i18n.translate_with("en", "greet", &Args::list(["Bob"])),
        "hello, Bob"
    );
}

// ==================== Configuration Tests ====================

#[test]
fn test_from_config_json() {
    init_tracing();
    let json = format!(
        r#"{{
            "lang_dir": {:?},
            "default_lang": "zh-CN",
            "fallback_lang": "en",
            "load_mode": "dir",
            "languages": {{ "en": "English", "zh-CN": "简体中文" }}
        }}"#,
        testdata().to_string_lossy()
    );
    let config = I18nConfig::from_json_str(&json).unwrap();

    let mut i18n = I18n::from_config(config);
    i18n.init().unwrap();

    assert_eq!(i18n.translate_default("use-for"), "语言管理");
    assert_eq!(i18n.translate_default("extra"), "from other");
}
