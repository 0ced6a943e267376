use blocktint::category::{CategoryColors, HighlightCategory};
use blocktint::theme::{
    self, Color, Theme, ThemeSource, BUILTIN_THEMES, DEFAULT_DARK_YAML, DEFAULT_LIGHT_YAML,
};

#[test]
fn test_color_from_hex_6() {
    let color = Color::from_hex("#1E1E1E").unwrap();
    assert_eq!(color.r, 0x1E);
    assert_eq!(color.g, 0x1E);
    assert_eq!(color.b, 0x1E);
    assert_eq!(color.a, 255);
}

#[test]
fn test_color_from_hex_8() {
    let color = Color::from_hex("#E0618533").unwrap();
    assert_eq!(color, HighlightCategory::Condition.base_color());
}

#[test]
fn test_default_theme() {
    let theme = Theme::default_dark();
    assert_eq!(theme.name, "Default Dark");
    assert_eq!(theme.background, Color::rgb(0x1E, 0x1E, 0x1E));
    assert_eq!(theme.blocks, CategoryColors::default());
}

#[test]
fn test_default_dark_yaml_parses() {
    let theme = Theme::from_yaml(DEFAULT_DARK_YAML).unwrap();
    assert_eq!(theme.name, "Default Dark");
}

#[test]
fn test_parse_default_light() {
    let theme = Theme::from_yaml(DEFAULT_LIGHT_YAML).unwrap();
    assert_eq!(theme.name, "Default Light");
    assert_eq!(theme.background, Color::rgb(0xFF, 0xFF, 0xFF));
    assert_eq!(
        theme.blocks.get(HighlightCategory::Import),
        Color::rgba(0xB0, 0xB8, 0xB4, 0x4D)
    );
    assert_eq!(
        theme.blocks.get(HighlightCategory::Method),
        HighlightCategory::Method.base_color()
    );
}

#[test]
fn test_from_builtin() {
    let theme = Theme::from_builtin("default-light").unwrap();
    assert_eq!(theme.name, "Default Light");

    let result = Theme::from_builtin("nonexistent");
    assert!(result.is_err());
}

#[test]
fn test_all_builtin_themes_parse() {
    for builtin in BUILTIN_THEMES {
        let theme = Theme::from_yaml(builtin.yaml)
            .unwrap_or_else(|e| panic!("Failed to parse theme '{}': {}", builtin.id, e));
        assert!(
            !theme.name.is_empty(),
            "Theme '{}' has empty name",
            builtin.id
        );
    }
}

#[test]
fn test_missing_background_is_an_error() {
    let yaml = "version: 1\nname: Broken\neditor: {}\n";
    assert!(Theme::from_yaml(yaml).is_err());
}

#[test]
fn test_user_theme_overrides_builtin() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("default-dark.yaml"),
        "version: 1\nname: \"My Dark\"\neditor:\n  background: \"#000000\"\n",
    )
    .unwrap();

    let theme = theme::load_theme_from(dir.path(), "default-dark").unwrap();
    assert_eq!(theme.name, "My Dark");
    assert_eq!(theme.background, Color::rgb(0, 0, 0));

    let light = theme::load_theme_from(dir.path(), "default-light").unwrap();
    assert_eq!(light.name, "Default Light");
}

#[test]
fn test_list_themes_in_merges_sources() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("default-dark.yaml"),
        "version: 1\nname: \"My Dark\"\neditor:\n  background: \"#000000\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("solar.yml"),
        "version: 1\nname: Solar\neditor:\n  background: \"#FDF6E3\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("readme.txt"), "not a theme").unwrap();

    let themes = theme::list_themes_in(dir.path());
    let ids: Vec<(&str, ThemeSource)> = themes.iter().map(|t| (t.id.as_str(), t.source)).collect();
    assert_eq!(
        ids,
        vec![
            ("default-dark", ThemeSource::User),
            ("solar", ThemeSource::User),
            ("default-light", ThemeSource::Builtin),
        ]
    );
    assert_eq!(themes[0].name, "My Dark");
}
