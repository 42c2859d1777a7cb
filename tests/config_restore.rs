use std::fs;
use std::path::PathBuf;

use drumhead::config::{
    AnimationConfig, AppConfig, CurvesConfig, MembraneConfig, OutputConfig, SamplingConfig,
    SolverBackend, SolverConfig,
};
use drumhead::output::OutputFormat;

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "drumhead_config_restore_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn assert_config_eq(actual: &AppConfig, expected: &AppConfig) {
    assert_eq!(actual.membrane.radius, expected.membrane.radius);
    assert_eq!(actual.membrane.modes, expected.membrane.modes);
    assert_eq!(actual.sampling.radial, expected.sampling.radial);
    assert_eq!(actual.sampling.angular, expected.sampling.angular);
    assert_eq!(actual.sampling.cartesian, expected.sampling.cartesian);
    assert_eq!(actual.solver.backend, expected.solver.backend);
    assert_eq!(actual.solver.tolerance, expected.solver.tolerance);
    assert_eq!(actual.solver.max_iterations, expected.solver.max_iterations);
    assert_eq!(actual.solver.max_argument, expected.solver.max_argument);
    assert_eq!(actual.animation.fps, expected.animation.fps);
    assert_eq!(actual.animation.duration_s, expected.animation.duration_s);
    assert_eq!(actual.curves.orders, expected.curves.orders);
    assert_eq!(actual.curves.index, expected.curves.index);
    assert_eq!(actual.curves.x_max, expected.curves.x_max);
    assert_eq!(actual.curves.points, expected.curves.points);
    assert_eq!(actual.output.format, expected.output.format);
}

#[test]
fn config_roundtrip_default_toml() {
    let default_cfg = AppConfig::default();
    let text = toml::to_string_pretty(&default_cfg).expect("serialize default");
    let parsed: AppConfig = toml::from_str(&text).expect("parse default");
    assert_config_eq(&parsed, &default_cfg);
}

#[test]
fn config_load_custom_values() {
    let path = unique_path("custom.toml");
    let path_str = path.to_string_lossy().to_string();
    let custom = AppConfig {
        membrane: MembraneConfig {
            radius: 0.75,
            modes: vec![[1, 1], [3, 2], [0, 4]],
        },
        sampling: SamplingConfig {
            radial: 10,
            angular: 12,
            cartesian: true,
        },
        solver: SolverConfig {
            backend: SolverBackend::Scirs2,
            tolerance: 1e-12,
            max_iterations: 64,
            max_argument: 2_500.0,
        },
        animation: AnimationConfig {
            fps: 24.0,
            duration_s: 1.5,
        },
        curves: CurvesConfig {
            orders: 3,
            index: 1,
            x_max: 20.0,
            points: 200,
        },
        output: OutputConfig {
            format: OutputFormat::Json,
        },
    };
    let text = toml::to_string_pretty(&custom).expect("serialize custom");
    fs::write(&path, text).expect("write custom config");

    let loaded = AppConfig::load_or_default(&path_str);
    assert_config_eq(&loaded, &custom);
    assert_eq!(loaded.mode_set().unwrap().len(), 3);

    let _ = fs::remove_file(&path);
}

#[test]
fn config_missing_file_fallback() {
    let path = unique_path("missing.toml");
    let path_str = path.to_string_lossy().to_string();
    let _ = fs::remove_file(&path);

    let loaded = AppConfig::load_or_default(&path_str);
    let defaults = AppConfig::default();
    assert!(path.exists(), "missing config should be created");
    assert_config_eq(&loaded, &defaults);

    // The written file only carries commented values, so it reloads as defaults.
    let reloaded = AppConfig::load_or_default(&path_str);
    assert_config_eq(&reloaded, &defaults);

    let _ = fs::remove_file(&path);
}

#[test]
fn config_partial_sections_keep_defaults() {
    let text = r#"
[membrane]
modes = [[2, 3]]

[animation]
fps = 60.0
"#;
    let parsed: AppConfig = toml::from_str(text).expect("parse partial config");
    assert_eq!(parsed.membrane.radius, 3.0);
    assert_eq!(parsed.membrane.modes, vec![[2, 3]]);
    assert_eq!(parsed.animation.fps, 60.0);
    assert_eq!(parsed.animation.duration_s, 5.0);
    assert_eq!(parsed.timebase().frame_count(parsed.animation.duration_s), 300);
}
