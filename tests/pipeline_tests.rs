//! End-to-end pipeline tests against an on-disk fixture tree.

use polars::prelude::*;
use serde_json::json;
use songlake::config::{AppConfig, CliConfig};
use songlake::Pipeline;
use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn write_ndjson(path: &Path, records: &[serde_json::Value]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let lines: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    fs::write(path, lines.join("\n") + "\n").unwrap();
}

fn song(song_id: &str, title: &str, artist_id: &str, year: i64) -> serde_json::Value {
    json!({
        "song_id": song_id,
        "title": title,
        "artist_id": artist_id,
        "artist_name": format!("Artist {artist_id}"),
        "artist_location": "Portland",
        "artist_latitude": 45.5,
        "artist_longitude": -122.6,
        "year": year,
        "duration": 210.75,
    })
}

fn log_event(user: &str, level: &str, page: &str, song: &str, ts: i64) -> serde_json::Value {
    json!({
        "userId": user,
        "firstName": "Jane",
        "lastName": "Doe",
        "gender": "F",
        "level": level,
        "ts": ts,
        "page": page,
        "song": song,
        "sessionId": 583,
        "location": "San Jose",
        "userAgent": "Firefox",
    })
}

/// Input tree with two song leaves and one log file covering: a duplicated
/// song id, a user upgrading from free to paid, and a play with no matching
/// title.
fn build_fixture(input: &Path) {
    write_ndjson(
        &input.join("song_data/A/B/C/TRAAAAW128F429D538.json"),
        &[song("S1", "Setanta matins", "AR1", 1999)],
    );
    write_ndjson(
        &input.join("song_data/A/B/D/TRAAABD128F429CF47.json"),
        &[
            song("S2", "Intro", "AR2", 2004),
            song("S1", "Setanta matins", "AR1", 1999),
        ],
    );
    write_ndjson(
        &input.join("log_data/2018/11/2018-11-12-events.json"),
        &[
            log_event("26", "free", "NextSong", "Setanta matins", 1541990258796),
            log_event("26", "paid", "NextSong", "Intro", 1541990300000),
            log_event("26", "paid", "Home", "", 1541990400000),
            log_event("80", "free", "NextSong", "No Such Title", 1541990500000),
        ],
    );
}

fn run_pipeline(input: &Path, output: &Path) {
    let cli = CliConfig {
        input_data: Some(input.to_path_buf()),
        output_data: Some(output.to_path_buf()),
    };
    let config = AppConfig::resolve(&cli, None).unwrap();
    Pipeline::new(config).run().unwrap();
}

/// Read every part file under a table directory into one frame.
fn read_table(dir: &Path) -> DataFrame {
    let mut parts = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|e| e == "parquet")
        {
            parts.push(
                ParquetReader::new(File::open(entry.path()).unwrap())
                    .finish()
                    .unwrap(),
            );
        }
    }
    let mut merged = parts.pop().expect("no parquet parts found");
    for part in parts {
        merged.vstack_mut(&part).unwrap();
    }
    merged
}

#[test]
fn full_run_derives_all_five_tables() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    build_fixture(input.path());
    run_pipeline(input.path(), output.path());

    for table in ["songs", "artists", "users", "time", "songplays"] {
        assert!(output.path().join(table).is_dir(), "missing table {table}");
    }

    // Songs deduped on song_id and laid out by year/artist_id.
    assert!(output
        .path()
        .join("songs/year=1999/artist_id=AR1/part-00000.parquet")
        .is_file());
    assert!(output
        .path()
        .join("songs/year=2004/artist_id=AR2/part-00000.parquet")
        .is_file());
    let songs = read_table(&output.path().join("songs"));
    assert_eq!(songs.height(), 2);

    let artists = read_table(&output.path().join("artists"));
    assert_eq!(artists.height(), 2);

    // One row per user, carrying the attributes of the latest play event.
    let users = read_table(&output.path().join("users"));
    assert_eq!(users.height(), 2);
    let ids = users.column("user_id").unwrap().str().unwrap();
    let levels = users.column("level").unwrap().str().unwrap();
    for i in 0..users.height() {
        match ids.get(i).unwrap() {
            "26" => assert_eq!(levels.get(i), Some("paid")),
            "80" => assert_eq!(levels.get(i), Some("free")),
            other => panic!("unexpected user {other}"),
        }
    }

    // Time rows all fall in the 2018/11 partition; one per distinct ts of
    // the three play events (the Home event is filtered out).
    let time_root = output.path().join("time");
    let time = read_table(&time_root.join("year=2018/month=11"));
    assert_eq!(time.height(), 3);
    assert_eq!(
        time.column("weekday").unwrap().str().unwrap().get(0),
        Some("Mon")
    );

    // Only plays with a matching song title become facts.
    let songplays = read_table(&output.path().join("songplays/year=2018/month=11"));
    assert_eq!(songplays.height(), 2);
    let fact_ids = songplays
        .column("songplay_id")
        .unwrap()
        .as_materialized_series();
    assert_eq!(fact_ids.n_unique().unwrap(), songplays.height());
    let fact_songs = songplays.column("song_id").unwrap().str().unwrap();
    for i in 0..songplays.height() {
        assert!(matches!(fact_songs.get(i), Some("S1") | Some("S2")));
    }
}

#[test]
fn rerun_overwrites_previous_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    build_fixture(input.path());
    run_pipeline(input.path(), output.path());
    run_pipeline(input.path(), output.path());

    let songs = read_table(&output.path().join("songs"));
    assert_eq!(songs.height(), 2);
    let users = read_table(&output.path().join("users"));
    assert_eq!(users.height(), 2);
}

#[test]
fn empty_input_yields_empty_but_valid_tables() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    // No files at all under the input root.
    run_pipeline(input.path(), output.path());

    for table in ["songs", "artists", "users", "time", "songplays"] {
        assert!(output.path().join(table).is_dir(), "missing table {table}");
    }
    // Unpartitioned tables still carry a readable, zero-row part file.
    let artists = read_table(&output.path().join("artists"));
    assert_eq!(artists.height(), 0);
    let users = read_table(&output.path().join("users"));
    assert_eq!(users.height(), 0);
}
