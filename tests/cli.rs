//! The `mapgis2geojson` binary: exit codes and output streams.

mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use common::*;
use mapgis_tools_rs::{FileType, Kcmy};

fn mapgis2geojson(args: &[&Path], flags: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mapgis2geojson"))
        .args(args)
        .args(flags)
        .output()
        .unwrap()
}

fn triangle() -> MapGisFileBuilder {
    MapGisFileBuilder::new(FileType::Polygon)
        .line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], 0)
        .line(&[(0.0, 0.0), (10.0, 10.0)], 0)
        .polygon(&[1, -2], 1)
}

#[test]
fn test_document_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("parcels.WP");
    fs::write(&input, triangle().build()).unwrap();
    let colors = dir.path().join("Pcolor.lib");
    fs::write(
        &colors,
        color_table_bytes(&[], &[(Kcmy::new(50, 100, 0, 0), Vec::new())]),
    )
    .unwrap();

    let output = mapgis2geojson(&[&input], &["--colors", colors.to_str().unwrap(), "--crs", "EPSG:4490"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "parcels");
    assert_eq!(value["crs"]["properties"]["name"], "EPSG:4490");
    assert_eq!(value["features"][0]["properties"]["fill"], "#7dcdcd");

    // The missing attribute region is reported, not fatal.
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[warning]"));
}

#[test]
fn test_fatal_decode_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.WP");
    fs::write(&input, triangle().polygon(&[1, 2, 3], 1).build()).unwrap();

    let output = mapgis2geojson(&[&input], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("ERROR: failed to decode"));
    assert!(stderr.contains("Line number 3"));
}

#[test]
fn test_dump_runs_before_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.WP");
    fs::write(&input, triangle().polygon(&[1, 2, 3], 1).build()).unwrap();

    let output = mapgis2geojson(&[&input], &["--dump"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Type: Polygon"));
    assert!(stderr.contains("polygon 2 [4]: 1 2 3!"));
    assert!(stderr.contains("ERROR: failed to decode"));
}
