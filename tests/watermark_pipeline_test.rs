// End-to-end pipeline tests: placement geometry and compositing semantics
// observed through real files on disk.

use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use sukashi::config::Config;
use sukashi::walker::process_tree;
use sukashi::watermark::{load_watermark, CornerAnchor, OutputFormat, PlacementPolicy};
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32, color: Rgba<u8>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbaImage::from_pixel(width, height, color).save(path).unwrap();
}

fn write_jpg(path: &Path, width: u32, height: u32, color: Rgb<u8>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, color).save(path).unwrap();
}

// The scenario from the design discussion: two photos of different sizes, a
// 400x200 watermark with transparency, scale 0.15, padding 10, bottom-right.
#[test]
fn test_scaled_corner_scenario_two_photo_sizes() {
    let root = TempDir::new().unwrap();
    let input_dir = root.path().join("input");
    let output_dir = root.path().join("output");
    let watermark_path = root.path().join("watermark.png");

    write_png(&input_dir.join("a/photo1.png"), 800, 600, Rgba([20, 40, 160, 255]));
    write_jpg(&input_dir.join("b/photo2.jpg"), 1920, 1080, Rgb([20, 40, 160]));

    // Opaque red watermark so its placement is visible after JPEG encoding
    RgbaImage::from_pixel(400, 200, Rgba([255, 0, 0, 255]))
        .save(&watermark_path)
        .unwrap();

    let config = Config {
        input_dir,
        output_dir: output_dir.clone(),
        watermark: watermark_path,
        placement: PlacementPolicy::ScaledCorner {
            scale_factor: 0.15,
            padding_x: 10,
            padding_y: 10,
            corner: CornerAnchor::BottomRight,
        },
        jpeg_quality: 90,
        output_format: Some(OutputFormat::Jpeg),
    };
    let watermark = load_watermark(&config.watermark).unwrap();
    let summary = process_tree(&config, &watermark);

    assert!(summary.is_success());
    assert_eq!(summary.processed_count(), 2);

    // photo1: 800x600 output, watermark resized to 120x60 at (670, 530)
    let photo1 = image::open(output_dir.join("a/photo1.jpg")).unwrap();
    assert_eq!(photo1.dimensions(), (800, 600));
    let inside = photo1.get_pixel(730, 560);
    assert!(inside[0] > 180 && inside[1] < 80 && inside[2] < 80);
    let outside = photo1.get_pixel(100, 100);
    assert!(outside[2] > 100 && outside[0] < 80);

    // photo2: 1920x1080 output, watermark resized to 288x144 at (1622, 926)
    let photo2 = image::open(output_dir.join("b/photo2.jpg")).unwrap();
    assert_eq!(photo2.dimensions(), (1920, 1080));
    let inside = photo2.get_pixel(1766, 998);
    assert!(inside[0] > 180 && inside[1] < 80 && inside[2] < 80);
    let outside = photo2.get_pixel(1500, 800);
    assert!(outside[2] > 100 && outside[0] < 80);
}

#[test]
fn test_transparent_watermark_half_leaves_base_pixels_exact() {
    let root = TempDir::new().unwrap();
    let input_dir = root.path().join("input");
    let output_dir = root.path().join("output");
    let watermark_path = root.path().join("watermark.png");

    let base_color = Rgba([90, 120, 150, 255]);
    write_png(&input_dir.join("photo.png"), 100, 100, base_color);

    // Left half opaque green, right half fully transparent
    let mut wm = RgbaImage::from_pixel(40, 20, Rgba([0, 200, 0, 255]));
    for y in 0..20 {
        for x in 20..40 {
            wm.put_pixel(x, y, Rgba([0, 200, 0, 0]));
        }
    }
    wm.save(&watermark_path).unwrap();

    let config = Config {
        input_dir,
        output_dir: output_dir.clone(),
        watermark: watermark_path,
        placement: PlacementPolicy::CenteredBottom { margin: 10 },
        jpeg_quality: 90,
        output_format: None,
    };
    let watermark = load_watermark(&config.watermark).unwrap();
    assert!(process_tree(&config, &watermark).is_success());

    // PNG output is lossless, so the checks are pixel-exact.
    // Watermark spans x in [30, 70), y in [70, 90); opaque half is x < 50.
    let result = image::open(output_dir.join("photo.png")).unwrap().to_rgba8();

    // Opaque watermark pixels fully replace the base color
    assert_eq!(*result.get_pixel(40, 80), Rgba([0, 200, 0, 255]));
    // Transparent watermark pixels leave the base untouched
    assert_eq!(*result.get_pixel(60, 80), base_color);
    // Pixels outside the watermark region are untouched
    assert_eq!(*result.get_pixel(10, 10), base_color);
    assert_eq!(*result.get_pixel(29, 80), base_color);
    assert_eq!(*result.get_pixel(70, 80), base_color);
}

#[test]
fn test_centered_bottom_watermark_is_horizontally_centered() {
    let root = TempDir::new().unwrap();
    let input_dir = root.path().join("input");
    let output_dir = root.path().join("output");
    let watermark_path = root.path().join("watermark.png");

    write_png(&input_dir.join("photo.png"), 200, 100, Rgba([255, 255, 255, 255]));
    RgbaImage::from_pixel(40, 20, Rgba([255, 0, 0, 255]))
        .save(&watermark_path)
        .unwrap();

    let config = Config {
        input_dir,
        output_dir: output_dir.clone(),
        watermark: watermark_path,
        placement: PlacementPolicy::CenteredBottom { margin: 10 },
        jpeg_quality: 90,
        output_format: None,
    };
    let watermark = load_watermark(&config.watermark).unwrap();
    assert!(process_tree(&config, &watermark).is_success());

    let result = image::open(output_dir.join("photo.png")).unwrap().to_rgba8();

    // Watermark spans x in [80, 120): equal white margins on both sides
    assert_eq!(*result.get_pixel(79, 80), Rgba([255, 255, 255, 255]));
    assert_eq!(*result.get_pixel(80, 80), Rgba([255, 0, 0, 255]));
    assert_eq!(*result.get_pixel(119, 80), Rgba([255, 0, 0, 255]));
    assert_eq!(*result.get_pixel(120, 80), Rgba([255, 255, 255, 255]));
    // Bottom edge sits 10px above the image bottom
    assert_eq!(*result.get_pixel(100, 89), Rgba([255, 0, 0, 255]));
    assert_eq!(*result.get_pixel(100, 90), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_semi_transparent_watermark_blends_on_disk() {
    let root = TempDir::new().unwrap();
    let input_dir = root.path().join("input");
    let output_dir = root.path().join("output");
    let watermark_path = root.path().join("watermark.png");

    write_png(&input_dir.join("photo.png"), 100, 100, Rgba([0, 0, 0, 255]));
    RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 128]))
        .save(&watermark_path)
        .unwrap();

    let config = Config {
        input_dir,
        output_dir: output_dir.clone(),
        watermark: watermark_path,
        placement: PlacementPolicy::CenteredBottom { margin: 40 },
        jpeg_quality: 90,
        output_format: None,
    };
    let watermark = load_watermark(&config.watermark).unwrap();
    assert!(process_tree(&config, &watermark).is_success());

    let result = image::open(output_dir.join("photo.png")).unwrap().to_rgba8();
    let blended = result.get_pixel(50, 50);
    assert!(blended[0] > 100 && blended[0] < 160);
    assert_eq!(blended[3], 255);
}
