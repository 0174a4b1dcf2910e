use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn markboard_cmd() -> Command {
    Command::cargo_bin("markboard").expect("binary exists")
}

#[test]
fn markboard_help_prints_usage() {
    markboard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Headless annotation canvas engine",
        ));
}

#[test]
fn showcase_export_writes_a_png_of_the_requested_size() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("showcase.png");

    markboard_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["--size", "320x240", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 320x240 image"));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn native_size_requires_a_background() {
    markboard_cmd()
        .args(["--native-size", "--size", "200x200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--native-size requires --background"));
}

#[test]
fn invalid_size_specs_are_rejected() {
    markboard_cmd()
        .args(["--size", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected WIDTHxHEIGHT"));
}

#[test]
fn native_export_matches_the_background_dimensions() {
    let temp = TempDir::new().unwrap();
    let bg_path = temp.path().join("bg.png");
    let out = temp.path().join("native.png");

    // A solid background at a size different from the canvas
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 123, 77).unwrap();
    let mut file = std::fs::File::create(&bg_path).unwrap();
    surface.write_to_png(&mut file).unwrap();

    markboard_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["--size", "400x300", "--native-size", "--background"])
        .arg(&bg_path)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 123x77 image"));
}

#[test]
fn config_file_sets_drawing_defaults() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "[canvas]\nwidth = 256.0\nheight = 128.0\n").unwrap();
    let out = temp.path().join("configured.png");

    markboard_cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 256x128 image"));
}
