use std::sync::Arc;

use super::*;
use crate::{
    assets::decode::Artwork,
    effects::tint::CompositeTint,
    frame::catalog::descriptor,
};

fn qr_stub(side: u32, color: Color) -> Raster {
    let mut r = Raster::new(side, side).unwrap();
    r.fill_solid(color);
    r
}

fn px_near(actual: [u8; 4], expected: [u8; 4], tol: i32) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(&a, &e)| (i32::from(a) - i32::from(e)).abs() <= tol)
}

const GREEN: Color = Color {
    r: 0,
    g: 200,
    b: 0,
};
const BLUE: Color = Color {
    r: 0x3b,
    g: 0x82,
    b: 0xf6,
};

#[test]
fn simple_frame_has_padded_dimensions() {
    let out = compose_frame(
        &qr_stub(260, GREEN),
        descriptor("simple"),
        Color::BLACK,
        None,
        &BackgroundMode::Transparent,
        None,
        &CompositeTint,
        None,
    )
    .unwrap();

    assert_eq!((out.raster.width(), out.raster.height()), (340, 340));
    assert!(!out.degraded);
}

#[test]
fn transparent_background_stays_transparent_outside_the_outline() {
    let out = compose_frame(
        &qr_stub(260, GREEN),
        descriptor("simple"),
        BLUE,
        None,
        &BackgroundMode::Transparent,
        None,
        &CompositeTint,
        None,
    )
    .unwrap();

    // The rounded outline leaves the very corner uncovered.
    assert_eq!(out.raster.pixel(0, 0)[3], 0);
    // The outline band carries the frame color.
    assert!(px_near(out.raster.pixel(170, 3), [0x3b, 0x82, 0xf6, 255], 8));
}

#[test]
fn qr_render_is_blitted_unscaled_into_the_percent_box() {
    let out = compose_frame(
        &qr_stub(260, GREEN),
        descriptor("simple"),
        Color::BLACK,
        None,
        &BackgroundMode::Solid { color: Color::WHITE },
        None,
        &CompositeTint,
        None,
    )
    .unwrap();

    // Default catalog position centers a 260 px render at offset 40.
    assert!(px_near(out.raster.pixel(40, 40), [0, 200, 0, 255], 2));
    assert!(px_near(out.raster.pixel(299, 299), [0, 200, 0, 255], 2));
    assert!(px_near(out.raster.pixel(170, 170), [0, 200, 0, 255], 2));
    // Padding ring stays background.
    assert!(px_near(out.raster.pixel(25, 170), [255, 255, 255, 255], 8));
}

#[test]
fn gradient_background_runs_top_to_bottom() {
    let out = compose_frame(
        &qr_stub(260, GREEN),
        descriptor("simple"),
        Color::BLACK,
        None,
        &BackgroundMode::Gradient {
            top: Color::new(255, 0, 0),
            bottom: Color::new(0, 0, 255),
        },
        None,
        &CompositeTint,
        None,
    )
    .unwrap();

    // Corners sit outside the rounded outline, exposing the gradient fill.
    assert!(px_near(out.raster.pixel(0, 0), [255, 0, 0, 255], 4));
    assert!(px_near(out.raster.pixel(0, 339), [0, 0, 255, 255], 4));
}

#[test]
fn missing_label_font_degrades_but_still_composes() {
    let out = compose_frame(
        &qr_stub(260, GREEN),
        descriptor("rounded"),
        Color::BLACK,
        Some("Scan me"),
        &BackgroundMode::Solid { color: Color::WHITE },
        None,
        &CompositeTint,
        None,
    )
    .unwrap();

    assert!(out.degraded);
    assert_eq!((out.raster.width(), out.raster.height()), (340, 370));
}

#[test]
fn bag_grows_a_handle_and_a_gradient_body() {
    let out = compose_frame(
        &qr_stub(260, GREEN),
        descriptor("bag"),
        BLUE,
        Some("Scan me"),
        &BackgroundMode::Transparent,
        None,
        &CompositeTint,
        None,
    )
    .unwrap();

    // 260 + 80 + 35: the label bakes onto the body, no extra band.
    assert_eq!((out.raster.width(), out.raster.height()), (340, 375));
    // Baked label with no font is a degraded output.
    assert!(out.degraded);

    // The handle ring is painted above the body...
    assert_eq!(out.raster.pixel(105, 5)[3], 255);
    // ...around a transparent hole.
    assert_eq!(out.raster.pixel(170, 20)[3], 0);

    // Body color derives from the frame color, lighter at the top.
    let top = out.raster.pixel(20, 100);
    let bottom = out.raster.pixel(20, 360);
    assert!(top[3] == 255 && bottom[3] == 255);
    assert!(top[2] > top[0], "body should stay blue-dominant");
    let luma = |p: [u8; 4]| 299 * u32::from(p[0]) + 587 * u32::from(p[1]) + 114 * u32::from(p[2]);
    assert!(luma(top) > luma(bottom));
}

#[test]
fn artwork_overlay_is_tinted_to_the_frame_color() {
    let artwork = Artwork {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(vec![255, 0, 0, 255].repeat(4)),
    };
    let out = compose_frame(
        &qr_stub(260, GREEN),
        descriptor("abstract-burst"),
        BLUE,
        None,
        &BackgroundMode::Transparent,
        Some(&artwork),
        &CompositeTint,
        None,
    )
    .unwrap();

    // Inside the frame box but outside the QR: the tinted overlay shows.
    assert!(px_near(out.raster.pixel(20, 170), [0x3b, 0x82, 0xf6, 255], 8));
    // The QR itself stays on top of the artwork.
    assert!(px_near(out.raster.pixel(170, 170), [0, 200, 0, 255], 2));
}
