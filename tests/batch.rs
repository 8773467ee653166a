//! End-to-end runs over temporary asset trees.

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use ripper::process::REPORT_FILENAME;
use ripper::{discover, process, BatchController, ProcessingOptions, Status};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLUE: Rgba<u8> = Rgba([30, 60, 200, 255]);

/// White canvas with a blue square inset by `border` on every side.
fn bordered(size: u32, border: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        let inner = border..size - border;
        if inner.contains(&x) && inner.contains(&y) {
            BLUE
        } else {
            WHITE
        }
    })
}

fn save(root: &Path, rel: &str, img: &RgbaImage) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    img.save(path).unwrap();
}

#[test]
fn test_single_sprite_scenario() {
    let dir = tempdir().unwrap();
    save(dir.path(), "bat.png", &bordered(32, 4));
    let input = dir.path().join("bat.png");

    let entry = process(&input, &ProcessingOptions::default());

    assert_eq!(entry.status, Status::Processed);
    assert_eq!(entry.flood_pixels, 32 * 32 - 24 * 24);
    assert_eq!(entry.confidence, Some(1.0));

    let out = image::open(&input).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), (28, 28));
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
    assert_eq!(*out.get_pixel(2, 2), BLUE);
    assert_eq!(*out.get_pixel(25, 25), BLUE);
    assert!(dir.path().join("bat_preview.png").exists());
}

#[test]
fn test_enclosed_island_survives() {
    // A white hole inside the sprite is not connected to the border.
    let mut img = bordered(40, 4);
    for y in 16..24 {
        for x in 16..24 {
            img.put_pixel(x, y, WHITE);
        }
    }
    let dir = tempdir().unwrap();
    save(dir.path(), "ring.png", &img);
    let input = dir.path().join("ring.png");

    let options = ProcessingOptions {
        crop: false,
        preview: false,
        ..Default::default()
    };
    let entry = process(&input, &options);
    assert_eq!(entry.status, Status::Processed);

    let out = image::open(&input).unwrap().to_rgba8();
    assert_eq!(*out.get_pixel(20, 20), WHITE);
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
}

#[test]
fn test_batch_tree_with_report() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("gen");
    save(&root, "items/sword.png", &bordered(128, 16));
    save(&root, "enemies/bat.png", &bordered(64, 8));
    save(&root, "enemies/bat_preview.png", &bordered(64, 8));
    save(&root, "enemies/_originals/bat.png", &bordered(64, 8));
    save(&root, "misc/done.png", &RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0])));

    let found = discover(&root, None, None).unwrap();
    assert_eq!(found.files.len(), 3);

    let out_dir = dir.path().join("out");
    let options = ProcessingOptions {
        output_dir: Some(out_dir.clone()),
        root: Some(found.root.clone()),
        report: true,
        ..Default::default()
    };
    let policy = found.config.size_policy();
    let report = BatchController::new(&options, &policy)
        .with_jobs(2)
        .run(&found.files, |_| {})
        .unwrap();

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.processed, 2);
    assert_eq!(report.summary.skipped, 1);
    assert_eq!(report.summary.failed, 0);

    // Discovery order is sorted, and the report follows it.
    let statuses: Vec<Status> = report.files.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![Status::Processed, Status::Processed, Status::Skipped]
    );

    // Structure is preserved under the output directory, inputs untouched.
    let sword = image::open(out_dir.join("items/sword.png")).unwrap();
    assert!(sword.width().max(sword.height()) <= 64);
    assert!(out_dir.join("enemies/bat.png").exists());
    assert!(out_dir.join("enemies/bat_preview.png").exists());
    assert_eq!(image::open(root.join("items/sword.png")).unwrap().width(), 128);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join(REPORT_FILENAME)).unwrap()).unwrap();
    assert_eq!(json["summary"]["processed"], 2);
    assert_eq!(json["summary"]["interrupted"], false);
    assert_eq!(json["files"].as_array().unwrap().len(), 3);
    assert_eq!(json["files"][2]["status"], "skipped");
}

#[test]
fn test_dry_run_batch() {
    let dir = tempdir().unwrap();
    save(dir.path(), "a.png", &bordered(32, 4));
    fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

    let found = discover(dir.path(), None, None).unwrap();
    let options = ProcessingOptions {
        dry_run: true,
        root: Some(found.root.clone()),
        ..Default::default()
    };
    let policy = found.config.size_policy();
    let report = BatchController::new(&options, &policy)
        .with_jobs(1)
        .run(&found.files, |_| {})
        .unwrap();

    assert_eq!(report.summary.would_process, 1);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.files[0].status, Status::WouldProcess);
    assert_eq!(report.files[1].status, Status::Error);
    assert!(!dir.path().join("a_preview.png").exists());
}
