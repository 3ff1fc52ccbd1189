use std::fs;
use std::path::Path;

use favicon_forge::{
    encode_png, FaviconConfig, FaviconError, FaviconGenerator, ManifestSettings, PlatformFlags,
    FAVICON_DIR, ICO_NAME,
};
use image::{ImageFormat, Rgba, RgbaImage};

fn logo(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let inside = (x as i64 - width as i64 / 2).pow(2) + (y as i64 - height as i64 / 2).pow(2)
            < (width.min(height) as i64 / 2).pow(2);
        if inside {
            Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 180, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn write_logo(path: &Path, width: u32, height: u32) {
    fs::write(path, encode_png(&logo(width, height)).unwrap()).unwrap();
}

fn run(source: &Path, dest: &Path, config: FaviconConfig) -> FaviconGenerator {
    let mut generator = FaviconGenerator::new(source, dest.to_str().unwrap(), config);
    generator.generate().unwrap();
    generator
}

fn full_config() -> FaviconConfig {
    FaviconConfig::new()
        .with_tile_background("#2b5797")
        .with_manifest(ManifestSettings {
            name: Some("Example".into()),
            short_name: Some("Ex".into()),
            start_url: Some("/".into()),
            theme_color: Some("#ffffff".into()),
            display: Some("standalone".into()),
            ..Default::default()
        })
}

#[test]
fn full_bundle() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("logo.png");
    write_logo(&source, 256, 256);
    let dest = dir.path().join("public");

    let generator = run(&source, &dest, full_config());
    let favicon_dir = dest.join(FAVICON_DIR);

    // 2 icons + 26 PNGs + manifest + browserconfig
    assert_eq!(generator.produced().len(), 2 + 26 + 2);
    assert!(generator.produced().iter().all(|path| path.is_file()));

    let ico = ico::IconDir::read(fs::File::open(favicon_dir.join(ICO_NAME)).unwrap()).unwrap();
    let frames: Vec<u32> = ico.entries().iter().map(|entry| entry.width()).collect();
    assert_eq!(frames, [16, 48, 64]);
    assert_eq!(
        fs::read(favicon_dir.join(ICO_NAME)).unwrap(),
        fs::read(dest.join(ICO_NAME)).unwrap()
    );

    for (name, size) in [
        ("favicon-16x16.png", (16, 16)),
        ("apple-touch-icon.png", (180, 180)),
        ("apple-touch-icon-precomposed.png", (57, 57)),
        ("android-chrome-192x192.png", (192, 192)),
        ("mstile-144x144.png", (144, 144)),
        ("mstile-310x150.png", (310, 150)),
    ] {
        let image = image::open(favicon_dir.join(name)).unwrap();
        assert_eq!((image.width(), image.height()), size, "{name}");
    }

    let tile = image::open(favicon_dir.join("mstile-70x70.png")).unwrap().to_rgba8();
    assert_eq!(tile.get_pixel(0, 0).0, [0x2b, 0x57, 0x97, 255]);
    assert!(tile.pixels().all(|p| p[3] == 255));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(favicon_dir.join("manifest.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "Example");
    assert_eq!(manifest["theme_color"], "#ffffff");
    assert!(manifest.get("lang").is_none());
    for icon in manifest["icons"].as_array().unwrap() {
        let side: f64 = icon["sizes"].as_str().unwrap().split('x').next().unwrap().parse().unwrap();
        let expected = (side / 48.0 * 100.0).round() / 100.0;
        assert_eq!(icon["density"].as_f64().unwrap(), expected);
        let src = icon["src"].as_str().unwrap().trim_start_matches("/favicon/");
        assert!(favicon_dir.join(src).is_file(), "{src} not generated");
    }

    let xml = fs::read_to_string(favicon_dir.join("browserconfig.xml")).unwrap();
    assert!(xml.contains("<TileColor>#ffffff</TileColor>"));
}

#[test]
fn excluded_platforms_skip_text_files() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("logo.png");
    write_logo(&source, 100, 100);
    let dest = dir.path().join("site");

    let config = FaviconConfig::new()
        .with_ico_sizes(false, false)
        .with_platforms(PlatformFlags {
            exclude_old_apple: true,
            exclude_android: true,
            exclude_ms: true,
        });
    let generator = run(&source, &dest, config);

    assert_eq!(generator.produced().len(), 12);
    assert!(dest.join(ICO_NAME).is_file());
    assert!(!dest.join(FAVICON_DIR).join("manifest.json").exists());
    assert!(!dest.join(FAVICON_DIR).join("browserconfig.xml").exists());
    assert!(!dest.join(FAVICON_DIR).join("android-chrome-36x36.png").exists());

    let ico = ico::IconDir::read(fs::File::open(dest.join(ICO_NAME)).unwrap()).unwrap();
    assert_eq!(ico.entries().len(), 1);
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("logo.png");
    write_logo(&source, 301, 173);
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    let a = run(&source, &first, full_config());
    let b = run(&source, &second, full_config());
    assert_eq!(a.produced().len(), b.produced().len());

    for (left, right) in a.produced().iter().zip(b.produced()) {
        assert_eq!(left.file_name(), right.file_name());
        assert_eq!(fs::read(left).unwrap(), fs::read(right).unwrap(), "{}", left.display());
    }

    // running again in place just overwrites
    let again = run(&source, &first, full_config());
    for path in again.produced() {
        let twin = second.join(path.strip_prefix(&first).unwrap());
        assert_eq!(fs::read(path).unwrap(), fs::read(twin).unwrap());
    }
}

#[cfg(all(feature = "jpeg", feature = "gif"))]
#[test]
fn jpeg_and_gif_sources_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let rgb = image::DynamicImage::ImageRgba8(logo(64, 64)).to_rgb8();

    for (name, format) in [("logo.jpg", ImageFormat::Jpeg), ("logo.gif", ImageFormat::Gif)] {
        let source = dir.path().join(name);
        rgb.save_with_format(&source, format).unwrap();

        let dest = dir.path().join(format!("out-{name}"));
        let config = FaviconConfig::new().with_platforms(PlatformFlags {
            exclude_old_apple: true,
            exclude_android: true,
            exclude_ms: true,
        });
        let generator = run(&source, &dest, config);
        assert_eq!(generator.produced().len(), 12, "{name}");
    }
}

#[test]
fn non_square_source_keeps_aspect_in_pngs() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("banner.png");
    write_logo(&source, 800, 400);
    let dest = dir.path().join("out");

    run(&source, &dest, full_config());

    let png = image::open(dest.join(FAVICON_DIR).join("favicon-96x96.png")).unwrap();
    assert_eq!((png.width(), png.height()), (96, 48));

    // icon frames are padded to squares
    let ico = ico::IconDir::read(fs::File::open(dest.join(ICO_NAME)).unwrap()).unwrap();
    assert!(ico.entries().iter().all(|entry| entry.width() == entry.height()));
}

#[test]
fn failure_keeps_audit_trail() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("logo.png");
    write_logo(&source, 64, 64);
    let dest = dir.path().join("out");
    // a directory where a PNG should go makes that write fail
    fs::create_dir_all(dest.join(FAVICON_DIR).join("favicon-32x32.png")).unwrap();

    let mut generator = FaviconGenerator::new(&source, dest.to_str().unwrap(), full_config());
    let err = generator.generate().unwrap_err();

    assert!(matches!(err, FaviconError::Generator { .. }));
    assert_eq!(
        err.path(),
        Some(dest.join(FAVICON_DIR).join("favicon-32x32.png").as_path())
    );
    let produced: Vec<_> = generator
        .produced()
        .iter()
        .map(|path| path.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(produced, [ICO_NAME, ICO_NAME, "favicon-16x16.png"]);
}

#[test]
fn mixed_separators_in_destination() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("logo.png");
    write_logo(&source, 32, 32);

    let dest = format!("{}/nested\\deeper//", dir.path().display());
    let mut generator = FaviconGenerator::new(&source, &dest, FaviconConfig::new());
    generator.generate().unwrap();

    let expected = dir.path().join("nested").join("deeper");
    assert_eq!(generator.destination(), expected.as_path());
    assert!(expected.join(ICO_NAME).is_file());
}
