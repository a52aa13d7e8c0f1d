use lensforge::config::LayoutParams;
use lensforge::display::compute_display;
use lensforge::prescription::{DisplayMode, PrescriptionEntry, RawEyeEntry};
use lensforge::render::layout::{OrderSheet, Scene, WHITE};
use lensforge::render::{render_sheet, FontRasterizer, RenderError, RenderedImage, SceneRasterizer};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const FONT_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSans.ttf");
static FONT_BYTES: &[u8] = include_bytes!("fixtures/DejaVuSans.ttf");

fn fixture_font() -> FontRasterizer {
    FontRasterizer::from_bytes(FONT_BYTES.to_vec()).expect("bundled font parses")
}

#[test]
fn test_configured_font_path_is_used() {
    let params = LayoutParams {
        font_path: Some(FONT_FIXTURE.to_string()),
        ..Default::default()
    };
    assert!(FontRasterizer::from_config(&params).is_ok());
}

#[test]
fn test_missing_font_file_is_reported() {
    let params = LayoutParams {
        font_path: Some("/nonexistent/fonts/none.ttf".to_string()),
        ..Default::default()
    };
    let err = FontRasterizer::from_config(&params).unwrap_err();
    assert!(matches!(err, RenderError::FontUnavailable(ref p) if p.contains("none.ttf")));
}

#[test]
fn test_non_font_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bogus.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();
    let err = FontRasterizer::from_file(&path).unwrap_err();
    assert!(matches!(err, RenderError::InvalidFont));
}

#[test]
fn test_zero_area_canvas_is_an_error_not_a_blank_image() {
    let rasterizer = fixture_font();
    let scene = Scene {
        width: 0,
        height: 900,
        background: WHITE,
        ops: Vec::new(),
    };
    assert!(matches!(
        rasterizer.rasterize_png(&scene),
        Err(RenderError::EmptyCanvas)
    ));
}

#[test]
fn test_full_sheet_encodes_as_png() {
    let rasterizer = fixture_font();
    let entry = PrescriptionEntry::builder()
        .right_eye(RawEyeEntry::builder().cylinder("-0.75").build())
        .left_eye(RawEyeEntry::builder().sphere("+1.00").addition("+2.00").build())
        .lens_description("Single vision with anti reflective coating")
        .build();
    let display = compute_display(&entry, DisplayMode::Complete, false);
    let sheet = OrderSheet {
        entry: &entry,
        display: &display,
        timestamp: "18 Oct 2026, 10:30 AM",
    };

    let image = render_sheet(&rasterizer, &sheet, &LayoutParams::default()).unwrap();
    assert_eq!(image.content_type, RenderedImage::PNG);
    assert_eq!((image.width, image.height), (800, 900));
    assert_eq!(&image.bytes[..8], &PNG_SIGNATURE);

    let decoded = image::load_from_memory(&image.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (800, 900));
    // Axis error cell sits on the pink highlight.
    assert_eq!(decoded.get_pixel(700, 200).0, [0xFF, 0xCC, 0xCC]);
    assert_eq!(decoded.get_pixel(780, 600).0, [0xFF, 0xFF, 0xFF]);

    // Glyphs actually landed: the title row holds dark pixels.
    let inked = (50..250)
        .flat_map(|x| (55..85).map(move |y| (x, y)))
        .any(|(x, y)| decoded.get_pixel(x, y).0[0] < 0x80);
    assert!(inked);
}
