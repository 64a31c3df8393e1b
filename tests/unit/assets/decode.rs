use std::io::Cursor;

use super::*;

fn png_bytes(rgba: Vec<u8>, w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_raster_premultiplies() {
    let buf = png_bytes(vec![100, 50, 200, 128], 1, 1);
    let art = decode_raster_image(&buf).unwrap();
    assert_eq!((art.width, art.height), (1, 1));
    assert_eq!(
        art.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_raster_rejects_garbage() {
    assert!(decode_raster_image(b"not an image").is_err());
}

#[test]
fn svg_renders_at_native_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="3">
        <rect x="0" y="0" width="4" height="3" fill="#ff0000"/>
    </svg>"##;
    let art = rasterize_svg(svg).unwrap();
    assert_eq!((art.width, art.height), (4, 3));
    // Solid red fill survives rendering.
    assert_eq!(&art.rgba8_premul[0..4], &[255, 0, 0, 255]);
}

#[test]
fn svg_parse_errors_are_reported() {
    assert!(rasterize_svg(b"<svg").is_err());
}

#[test]
fn artwork_dispatch_follows_the_extension() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"></svg>"#;
    assert!(decode_artwork("frames/petals.svg", svg).is_ok());

    let png = png_bytes(vec![0, 0, 0, 255], 1, 1);
    assert!(decode_artwork("frames/burst.png", &png).is_ok());
    assert!(decode_artwork("frames/burst.png", svg).is_err());
}
