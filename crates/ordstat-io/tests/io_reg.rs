//! Image I/O regression test
//!
//! Tests reading and writing filter inputs/outputs:
//!   (1) PNG and PNM round-trips through files on disk
//!   (2) format detection drives reading, independent of extension
//!   (3) PNM output keeps color planes and drops alpha

use ordstat_core::Raster;
use ordstat_io::{ImageFormat, read_image, read_image_mem, write_image, write_image_mem};
use ordstat_test::{RegParams, random_grid};

fn random_raster(channels: usize, seed: u64) -> Raster {
    let planes = (0..channels)
        .map(|c| random_grid(13, 17, seed + c as u64))
        .collect();
    Raster::from_planes(planes).unwrap()
}

#[test]
fn io_reg_file_roundtrip() {
    let mut rp = RegParams::new("io_file_roundtrip");
    let dir = tempfile::tempdir().expect("tempdir");

    for channels in 1..=4 {
        let raster = random_raster(channels, 10 * channels as u64);
        let path = dir.path().join(format!("img{}.png", channels));
        write_image(&raster, &path, ImageFormat::Png).expect("write png");
        let back = read_image(&path).expect("read png");
        rp.check(back == raster);
    }

    // PNM keeps gray and RGB exactly
    for channels in [1usize, 3] {
        let raster = random_raster(channels, 77);
        let path = dir.path().join(format!("img{}.pnm", channels));
        write_image(&raster, &path, ImageFormat::Pnm).expect("write pnm");
        let back = read_image(&path).expect("read pnm");
        rp.check(back == raster);
    }

    assert!(rp.cleanup(), "io_file_roundtrip regression test failed");
}

#[test]
fn io_reg_detect_ignores_extension() {
    let mut rp = RegParams::new("io_detect");
    let dir = tempfile::tempdir().expect("tempdir");

    let raster = random_raster(1, 5);
    // PNG bytes behind a .pgm name
    let path = dir.path().join("misnamed.pgm");
    write_image(&raster, &path, ImageFormat::Png).expect("write");
    rp.check(read_image(&path).expect("read") == raster);

    rp.check(read_image_mem(b"GIF89a....").is_err());
    rp.check(read_image(dir.path().join("missing.png")).is_err());

    // Header dimensions that cannot be allocated fail as data errors
    rp.check(read_image_mem(b"P5\n4294967296 4294967296 255\n\x00").is_err());

    assert!(rp.cleanup(), "io_detect regression test failed");
}

#[test]
fn io_reg_alpha_dropped_by_pnm() {
    let mut rp = RegParams::new("io_pnm_alpha");

    let raster = random_raster(4, 9);
    let bytes = write_image_mem(&raster, ImageFormat::Pnm).expect("encode");
    let back = read_image_mem(&bytes).expect("decode");
    rp.compare_values(3.0, back.channels() as f64, 0.0);
    for c in 0..3 {
        rp.compare_grids(raster.plane(c).unwrap(), back.plane(c).unwrap());
    }

    assert!(rp.cleanup(), "io_pnm_alpha regression test failed");
}
