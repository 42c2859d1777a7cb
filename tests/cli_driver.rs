use std::fs;
use std::path::PathBuf;

use clap::Parser;
use drumhead::app::{self, AppError};
use drumhead::cli::{Args, Command};
use drumhead::config::AppConfig;
use drumhead::output::OutputFormat;

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "drumhead_cli_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

/// Runs the driver with a throwaway config and returns the output text.
fn run_to_string(name: &str, argv: &[&str]) -> String {
    let config = unique_path(&format!("{name}.toml"));
    let output = unique_path(&format!("{name}.out"));
    let mut full = vec![
        "drumhead".to_string(),
        "--config".to_string(),
        config.to_string_lossy().to_string(),
        "--output".to_string(),
        output.to_string_lossy().to_string(),
    ];
    full.extend(argv.iter().map(|s| s.to_string()));

    let args = Args::try_parse_from(&full).expect("parse args");
    app::run(args).expect("run driver");
    let text = fs::read_to_string(&output).expect("read output");

    let _ = fs::remove_file(&config);
    let _ = fs::remove_file(&output);
    text
}

#[test]
fn parses_mode_lists_and_overrides() {
    let args = Args::try_parse_from([
        "drumhead", "--format", "json", "field", "--radius", "2", "--modes", "0:1,2:3", "--radial",
        "5", "--cartesian",
    ])
    .unwrap();
    let mut cfg = AppConfig::default();
    args.apply(&mut cfg);
    assert_eq!(cfg.output.format, OutputFormat::Json);
    assert_eq!(cfg.membrane.radius, 2.0);
    assert_eq!(cfg.membrane.modes, vec![[0, 1], [2, 3]]);
    assert_eq!(cfg.sampling.radial, 5);
    assert_eq!(cfg.sampling.angular, 64);
    assert!(cfg.sampling.cartesian);
    assert!(matches!(args.command, Command::Field { time, .. } if time == 0.0));
}

#[test]
fn rejects_malformed_modes() {
    assert!(Args::try_parse_from(["drumhead", "freq", "--modes", "0-1"]).is_err());
    assert!(Args::try_parse_from(["drumhead", "freq", "--modes", "-1:1"]).is_err());
}

#[test]
fn freq_lists_zero_and_frequency_per_mode() {
    let text = run_to_string("freq", &["freq", "--radius", "3", "--modes", "0:1,0:2"]);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "n,m,zero,omega");
    assert_eq!(lines.len(), 3);

    let cells: Vec<f64> = lines[2].split(',').map(|c| c.parse().unwrap()).collect();
    assert_eq!(cells[0], 0.0);
    assert_eq!(cells[1], 2.0);
    assert!((cells[2] - 5.520_078_110_286_311).abs() < 1e-12);
    assert!((cells[3] - 1.840_026_036_762_107).abs() < 1e-12);
}

#[test]
fn field_json_rows_cover_the_grid() {
    let text = run_to_string(
        "field",
        &[
            "--format", "json", "field", "--modes", "0:1", "--radial", "3", "--angular", "4",
            "--time", "0.5",
        ],
    );
    let rows: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rows.len(), 12);
    for row in &rows {
        assert_eq!(row["frame"], 0);
        assert_eq!(row["t"], 0.5);
    }
    // Last radial ring sits on the rim.
    for row in &rows[8..] {
        assert_eq!(row["r"], 3.0);
        assert!(row["z"].as_f64().unwrap().abs() < 1e-12);
    }
}

#[test]
fn animate_advances_time_per_frame() {
    let text = run_to_string(
        "animate",
        &[
            "animate", "--modes", "0:1,1:1", "--radial", "2", "--angular", "2", "--fps", "10",
            "--duration", "0.3", "--cartesian",
        ],
    );
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "frame,t,x,y,z");
    // 3 frames of a 2x2 grid.
    assert_eq!(lines.len(), 1 + 3 * 4);
    let last: Vec<f64> = lines[12].split(',').map(|c| c.parse().unwrap()).collect();
    assert_eq!(last[0], 2.0);
    assert!((last[1] - 0.2).abs() < 1e-15);
}

#[test]
fn curves_trace_each_order() {
    let text = run_to_string(
        "curves",
        &["curves", "--orders", "3", "--index", "1", "--x-max", "10", "--points", "11"],
    );
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "n,m,x,y");
    assert_eq!(lines.len(), 1 + 3 * 11);
    // J_0(0) = 1 starts the first curve.
    assert_eq!(lines[1], "0,1,0.0,1.0");
}

#[test]
fn invalid_radius_is_reported() {
    let config = unique_path("bad_radius.toml");
    let args = Args::try_parse_from([
        "drumhead",
        "--config",
        config.to_str().unwrap(),
        "freq",
        "--radius=-2",
    ])
    .unwrap();
    let err = app::run(args).unwrap_err();
    assert!(matches!(err, AppError::Membrane(ref e) if e.is_invalid_argument()));
    let _ = fs::remove_file(&config);
}

#[test]
fn configured_backend_drives_freq() {
    let config = unique_path("backend.toml");
    let output = unique_path("backend.out");
    fs::write(&config, "[solver]\nbackend = \"scirs2\"\n").unwrap();
    let args = Args::try_parse_from([
        "drumhead",
        "--config",
        config.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "freq",
        "--modes",
        "0:1",
    ])
    .unwrap();
    let result = app::run(args);
    #[cfg(feature = "scirs2")]
    {
        result.expect("run driver");
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("n,m,zero,omega\n0,1,2.4048255576957"), "{text}");
    }
    #[cfg(not(feature = "scirs2"))]
    assert!(matches!(result, Err(AppError::Config(ref msg)) if msg.contains("scirs2")));
    let _ = fs::remove_file(&config);
    let _ = fs::remove_file(&output);
}
