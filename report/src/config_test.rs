use crate::config::{ConfigErrors, Palette, PlotConfig, ReportConfig, Rgb, FALLBACK_COLOR};
use std::fs;

#[test]
pub fn empty_config_uses_defaults() {
    let config = ReportConfig::from_yaml("{}").unwrap();

    assert_eq!(config, ReportConfig::default());
    assert_eq!(config.plot.width, 1200);
    assert_eq!(config.plot.height, 600);
    assert_eq!(config.plot.log_threshold_ms, 1000.0);
    assert_eq!(config.palette().unwrap(), Palette::default());
}

#[test]
pub fn partial_plot_section() {
    let config = ReportConfig::from_yaml("plot:\n  log_threshold_ms: 250\n").unwrap();

    assert_eq!(
        config.plot,
        PlotConfig {
            log_threshold_ms: 250.0,
            ..PlotConfig::default()
        }
    );
}

#[test]
pub fn palette_merges_over_builtin_colors() {
    let config = ReportConfig::from_yaml(
        "palette:\n  postgres: \"#000000\"\n  mydb: \"#123456\"\nfallback_color: \"#ffffff\"\n",
    )
    .unwrap();
    let palette = config.palette().unwrap();

    assert_eq!(palette.color("postgres"), Rgb(0, 0, 0));
    assert_eq!(palette.color("mydb"), Rgb(0x12, 0x34, 0x56));
    assert_eq!(palette.color("questdb"), Rgb(0xFF, 0x6B, 0x35));
    assert_eq!(palette.color("unknown"), Rgb(0xFF, 0xFF, 0xFF));
}

#[test]
pub fn unknown_database_uses_fallback() {
    assert_eq!(Palette::default().color("sqlite"), FALLBACK_COLOR);
    assert_eq!(Palette::default().color("timescaledb"), Rgb(0xFD, 0xB4, 0x62));
}

#[test]
pub fn invalid_colors_are_all_reported() {
    let config = ReportConfig::from_yaml(
        "palette:\n  a: \"red\"\n  b: \"#12345\"\n  c: \"#123456\"\nfallback_color: \"#GGGGGG\"\n",
    )
    .unwrap();

    match config.palette() {
        Err(ConfigErrors::InvalidColors(keys)) => assert_eq!(
            keys,
            vec![
                "palette.a".to_string(),
                "palette.b".to_string(),
                "fallback_color".to_string(),
            ]
        ),
        other => panic!("expected invalid colors, got {other:?}"),
    }
}

#[test]
pub fn unknown_keys_are_rejected() {
    assert!(matches!(
        ReportConfig::from_yaml("colours: {}\n"),
        Err(ConfigErrors::Parse(_))
    ));
    assert!(matches!(
        ReportConfig::from_yaml("plot:\n  dpi: 300\n"),
        Err(ConfigErrors::Parse(_))
    ));
}

#[test]
pub fn zero_plot_size_is_rejected() {
    assert!(matches!(
        ReportConfig::from_yaml("plot:\n  width: 0\n"),
        Err(ConfigErrors::InvalidPlotSize {
            width: 0,
            height: 600
        })
    ));
}

#[test]
pub fn rgb_parses_and_prints() {
    assert_eq!("#336791".parse::<Rgb>(), Ok(Rgb(0x33, 0x67, 0x91)));
    assert_eq!("#ff6b35".parse::<Rgb>(), Ok(Rgb(0xFF, 0x6B, 0x35)));
    assert!("336791".parse::<Rgb>().is_err());
    assert!("#3367911".parse::<Rgb>().is_err());
    assert_eq!(Rgb(0xFF, 0x6B, 0x35).to_string(), "#FF6B35");
}

#[test]
pub fn load_without_path_is_default() {
    assert_eq!(ReportConfig::load(None).unwrap(), ReportConfig::default());
}

#[test]
pub fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.yaml");
    fs::write(&path, "plot:\n  width: 800\n").unwrap();

    assert_eq!(ReportConfig::load(Some(&path)).unwrap().plot.width, 800);
    assert!(matches!(
        ReportConfig::load(Some(&dir.path().join("missing.yaml"))),
        Err(ConfigErrors::Read(_))
    ));
}
