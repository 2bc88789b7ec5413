use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use placard_common::config::{EventInfo, TemplateVariant};
use placard_common::error::{PlacardError, PlacardResult};
use placard_layout::LayoutConfig;
use placard_render_engine::compositor::{PlacardStyle, TextPainter};
use placard_render_engine::{run_batch, BatchProgress, PlacardRenderer, TalkStage, Template};
use placard_talk_model::{PhotoSource, Talk};

struct NullPainter;

impl TextPainter for NullPainter {
    fn draw_line(&self, _: &mut RgbaImage, _: i32, _: i32, _: f32, _: Rgba<u8>, _: &str) {}

    fn line_height(&self, size: f32) -> f32 {
        size
    }
}

/// Photos served from memory; unknown URLs fail like a 404.
#[derive(Default)]
struct MemoryPhotos {
    photos: HashMap<String, Vec<u8>>,
    requested: Vec<String>,
}

impl PhotoSource for MemoryPhotos {
    fn fetch_photo(&mut self, url: &str) -> PlacardResult<Vec<u8>> {
        self.requested.push(url.to_string());
        self.photos
            .get(url)
            .cloned()
            .ok_or_else(|| PlacardError::photo_fetch(url, "HTTP 404 Not Found"))
    }
}

fn png(color: [u8; 3]) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 80, Rgb(color)))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn talk(code: &str, name: &str, photo: Option<&str>) -> Talk {
    Talk {
        code: code.to_string(),
        title: format!("Talk {code}"),
        speaker_name: name.to_string(),
        time: "Feb 5, 2022\n1:30PM PST".to_string(),
        photo_url: photo.map(str::to_string),
        social_handle: None,
    }
}

fn renderer(output_dir: &Path) -> PlacardRenderer {
    let variant = |name: &str, suffix: &str| TemplateVariant {
        name: name.to_string(),
        path: PathBuf::from(format!("{name}.png")),
        suffix: suffix.to_string(),
    };
    PlacardRenderer::new(
        vec![
            Template::new(
                variant("wide", ""),
                RgbaImage::from_pixel(1600, 900, Rgba([255, 255, 255, 255])),
            ),
            Template::new(
                variant("insta", "-insta"),
                RgbaImage::from_pixel(1080, 1080, Rgba([255, 255, 255, 255])),
            ),
        ],
        PlacardStyle::default(),
        LayoutConfig::default(),
        Box::new(NullPainter),
        output_dir,
    )
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn renders_good_talks_and_skips_the_rest() {
    let dir = scratch_dir("placard_batch_mixed");
    let mut photos = MemoryPhotos::default();
    photos
        .photos
        .insert("https://cdn.example/ada.png".into(), png([255, 0, 0]));
    photos
        .photos
        .insert("https://cdn.example/broken.png".into(), b"<html>".to_vec());
    photos
        .photos
        .insert("https://cdn.example/grace.png".into(), png([0, 0, 255]));

    let talks = vec![
        talk("AAA111", "Ada Lovelace", Some("https://cdn.example/ada.png")),
        talk("BBB222", "No Photo", None),
        talk("CCC333", "Broken Photo", Some("https://cdn.example/broken.png")),
        talk("DDD444", "Gone Photo", Some("https://cdn.example/404.png")),
        talk("EEE555", "Grace Hopper", Some("https://cdn.example/grace.png")),
    ];

    let summary = run_batch(
        &talks,
        &mut photos,
        &renderer(&dir),
        &EventInfo::default(),
        None,
    )
    .unwrap();

    assert_eq!(summary.rendered, 2);
    assert_eq!(summary.skipped.len(), 3);
    assert_eq!(summary.total(), 5);
    assert_eq!(summary.files.len(), 4);

    let skipped: Vec<&str> = summary.skipped.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(skipped, vec!["BBB222", "CCC333", "DDD444"]);
    assert!(summary.skipped[1].reason.contains("https://cdn.example/broken.png"));

    assert_eq!(
        file_names(&dir),
        vec![
            "Ada Lovelace-insta.png",
            "Ada Lovelace.png",
            "Grace Hopper-insta.png",
            "Grace Hopper.png",
            "tweets.txt",
        ]
    );

    // The talk without a photo URL never reached the photo source.
    assert_eq!(photos.requested.len(), 4);

    let tweets = std::fs::read_to_string(dir.join("tweets.txt")).unwrap();
    assert!(tweets.contains("talk/AAA111/"));
    assert!(tweets.contains("talk/EEE555/"));
    assert!(!tweets.contains("BBB222"));
    assert!(!tweets.contains("CCC333"));
    assert_eq!(summary.announcements, Some(dir.join("tweets.txt")));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_photo_alone_still_succeeds() {
    let dir = scratch_dir("placard_batch_missing_photo");
    let talks = vec![talk("BBB222", "No Photo", None)];

    let summary = run_batch(
        &talks,
        &mut MemoryPhotos::default(),
        &renderer(&dir),
        &EventInfo::default(),
        None,
    )
    .unwrap();

    assert_eq!(summary.rendered, 0);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(file_names(&dir), vec!["tweets.txt"]);
    assert_eq!(std::fs::read_to_string(dir.join("tweets.txt")).unwrap(), "");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn blank_speaker_is_skipped() {
    let dir = scratch_dir("placard_batch_blank_speaker");
    let talks = vec![talk("FFF666", "  ", Some("https://cdn.example/x.png"))];

    let summary = run_batch(
        &talks,
        &mut MemoryPhotos::default(),
        &renderer(&dir),
        &EventInfo::default(),
        None,
    )
    .unwrap();

    assert_eq!(summary.skipped[0].code, "FFF666");
    assert!(summary.skipped[0].reason.contains("no speaker"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn progress_reports_each_stage() {
    let dir = scratch_dir("placard_batch_progress");
    let mut photos = MemoryPhotos::default();
    photos
        .photos
        .insert("https://cdn.example/ada.png".into(), png([0, 255, 0]));
    let talks = vec![
        talk("AAA111", "Ada Lovelace", Some("https://cdn.example/ada.png")),
        talk("BBB222", "No Photo", None),
    ];

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    run_batch(
        &talks,
        &mut photos,
        &renderer(&dir),
        &EventInfo::default(),
        Some(Box::new(move |p: BatchProgress| {
            sink.borrow_mut().push((p.index, p.total, p.stage))
        })),
    )
    .unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], (0, 2, TalkStage::Working));
    assert_eq!(seen[1], (0, 2, TalkStage::Rendered { files: 2 }));
    assert_eq!(seen[2], (1, 2, TalkStage::Working));
    assert!(matches!(seen[3], (1, 2, TalkStage::Skipped { .. })));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unwritable_output_aborts_the_run() {
    let dir = scratch_dir("placard_batch_unwritable");
    std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
    // A regular file where the output directory should be.
    std::fs::write(&dir, b"occupied").unwrap();

    let mut photos = MemoryPhotos::default();
    photos
        .photos
        .insert("https://cdn.example/ada.png".into(), png([255, 0, 0]));
    let talks = vec![talk("AAA111", "Ada Lovelace", Some("https://cdn.example/ada.png"))];

    let err = run_batch(
        &talks,
        &mut photos,
        &renderer(&dir),
        &EventInfo::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, PlacardError::Io(_)));
    assert!(!err.is_skippable());

    std::fs::remove_file(&dir).ok();
}
