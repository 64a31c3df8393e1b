use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn new_raster_is_transparent() {
    let r = Raster::new(3, 2).unwrap();
    assert_eq!(r.width(), 3);
    assert_eq!(r.height(), 2);
    assert!(r.data().iter().all(|&b| b == 0));
}

#[test]
fn zero_dimension_is_rejected() {
    assert!(Raster::new(0, 4).is_err());
    assert!(Raster::from_premul_rgba8(2, 2, vec![0; 4]).is_err());
}

#[test]
fn fill_solid_floods_every_pixel() {
    let mut r = Raster::new(2, 2).unwrap();
    r.fill_solid(Color::new(1, 2, 3));
    for px in r.data().chunks_exact(4) {
        assert_eq!(px, &[1, 2, 3, 255]);
    }
}

#[test]
fn vertical_gradient_endpoints_match_colors() {
    let mut r = Raster::new(2, 4).unwrap();
    let top = Color::new(0, 0, 0);
    let bottom = Color::new(255, 255, 255);
    r.fill_vertical_gradient(top, bottom);

    assert_eq!(r.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(r.pixel(1, 3), [255, 255, 255, 255]);
    // Interior rows are strictly between the endpoints.
    let mid = r.pixel(0, 1);
    assert!(mid[0] > 0 && mid[0] < 255);
}

#[test]
fn blit_over_places_at_offset_and_clips() {
    let mut dst = Raster::new(4, 4).unwrap();
    dst.fill_solid(Color::WHITE);

    let mut src = Raster::new(2, 2).unwrap();
    src.fill_solid(Color::new(255, 0, 0));

    dst.blit_over(&src, 3, 3);
    assert_eq!(dst.pixel(3, 3), [255, 0, 0, 255]);
    assert_eq!(dst.pixel(2, 2), [255, 255, 255, 255]);

    // Negative offsets drop the out-of-bounds part.
    dst.blit_over(&src, -1, -1);
    assert_eq!(dst.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(dst.pixel(1, 1), [255, 255, 255, 255]);
}

#[test]
fn erase_knocks_out_masked_pixels() {
    let mut layer = Raster::new(2, 1).unwrap();
    layer.fill_solid(Color::new(10, 20, 30));

    let mut mask = Raster::new(2, 1).unwrap();
    let mask_data = mask.data_mut();
    mask_data[3] = 255; // opaque at (0,0) only

    layer.erase(&mask);
    assert_eq!(layer.pixel(0, 0), [0, 0, 0, 0]);
    assert_eq!(layer.pixel(1, 0), [10, 20, 30, 255]);
}

#[test]
fn straight_conversion_inverts_premultiply() {
    let premul = vec![50, 25, 0, 128, 0, 0, 0, 0];
    let r = Raster::from_premul_rgba8(2, 1, premul).unwrap();
    let straight = r.to_straight_rgba8();
    // 50/128 ≈ 100/255, 25/128 ≈ 50/255.
    assert_eq!(straight[3], 128);
    assert!((i32::from(straight[0]) - 100).abs() <= 1);
    assert!((i32::from(straight[1]) - 50).abs() <= 1);
    // Fully transparent pixels stay zeroed.
    assert_eq!(&straight[4..8], &[0, 0, 0, 0]);
}
