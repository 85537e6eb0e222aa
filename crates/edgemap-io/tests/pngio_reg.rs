//! PNG I/O regression test
//!
//! Writes quantized fields to disk and reads them back through format
//! detection.

use edgemap_io::{ImageFormat, detect_format, read_gray_field, write_field_png, write_gray_png};
use edgemap_test::{RegParams, synthetic};

#[test]
fn pngio_reg() {
    let mut rp = RegParams::new("pngio");
    let dir = std::env::temp_dir().join(format!("edgemap_pngio_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create dir");

    // --- Test 1: quantized field survives a file roundtrip ---
    let field = synthetic::ramp(64, 8).expect("ramp");
    let path = dir.join("ramp.png");
    write_field_png(&field, &path).expect("write");
    rp.compare_values(
        1.0,
        if detect_format(&path).expect("detect") == ImageFormat::Png { 1.0 } else { 0.0 },
        0.0,
    );
    let back = read_gray_field(&path).expect("read");
    rp.compare_values(64.0, back.width() as f64, 0.0);
    rp.compare_values(8.0, back.height() as f64, 0.0);
    rp.compare_fields(&field, &back, 0.5 / 255.0 + 1e-12);
    rp.compare_gray(&field.to_gray_image(), &back.to_gray_image());

    // --- Test 2: out-of-range values are clipped on the way out ---
    let wild = field.map(|v| v * 3.0 - 1.0);
    let path = dir.join("wild.png");
    write_field_png(&wild, &path).expect("write wild");
    let back = read_gray_field(&path).expect("read wild");
    rp.compare_values(0.0, back.min_value(), 0.0);
    rp.compare_values(1.0, back.max_value(), 0.0);

    // --- Test 3: existing files are overwritten ---
    let gray = synthetic::step(4, 4, 2).expect("step").to_gray_image();
    write_gray_png(&gray, &path).expect("overwrite");
    let back = read_gray_field(&path).expect("read overwritten");
    rp.compare_values(4.0, back.width() as f64, 0.0);
    rp.compare_gray(&gray, &back.to_gray_image());

    let _ = std::fs::remove_dir_all(&dir);
    assert!(rp.cleanup(), "pngio regression test failed");
}
