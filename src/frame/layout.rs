use crate::frame::catalog::{FrameFamily, PercentRect};

/// Padding between the QR render and the frame edge, px.
pub const PADDING: u32 = 40;
/// Height of the label band below the frame box, px.
pub const LABEL_HEIGHT: u32 = 30;
/// Height of the bag handle band above the body, px.
pub const HANDLE_HEIGHT: u32 = 35;

/// Resolved pixel geometry of a framed composition.
///
/// The frame box is the square region holding the QR plus padding; the bag
/// handle sits above it and the label band (non-bag families only) below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    /// Final canvas width, px.
    pub canvas_width: u32,
    /// Final canvas height, px.
    pub canvas_height: u32,
    /// Square region containing the QR and its padding.
    pub frame_box: kurbo::Rect,
    /// Handle band above the frame box (`bag` only).
    pub handle_band: Option<kurbo::Rect>,
    /// Label band below the frame box (text present, family ≠ `bag`).
    pub label_band: Option<kurbo::Rect>,
}

/// Compute the canvas dimensions and bands for a composition.
///
/// `width = qr + 2·PADDING`; `height = qr + 2·PADDING`, plus
/// [`LABEL_HEIGHT`] when a label band is needed, plus [`HANDLE_HEIGHT`] for
/// the bag family (which bakes its label onto the body instead of adding a
/// band).
pub fn layout(qr_size: u32, family: FrameFamily, has_text: bool) -> FrameLayout {
    let box_side = qr_size + 2 * PADDING;
    let width = box_side;

    match family {
        FrameFamily::Bag => {
            let handle = f64::from(HANDLE_HEIGHT);
            FrameLayout {
                canvas_width: width,
                canvas_height: box_side + HANDLE_HEIGHT,
                frame_box: kurbo::Rect::new(
                    0.0,
                    handle,
                    f64::from(width),
                    handle + f64::from(box_side),
                ),
                handle_band: Some(kurbo::Rect::new(0.0, 0.0, f64::from(width), handle)),
                label_band: None,
            }
        }
        _ => {
            let label = if has_text { LABEL_HEIGHT } else { 0 };
            let box_bottom = f64::from(box_side);
            FrameLayout {
                canvas_width: width,
                canvas_height: box_side + label,
                frame_box: kurbo::Rect::new(0.0, 0.0, f64::from(width), box_bottom),
                handle_band: None,
                label_band: (label > 0).then(|| {
                    kurbo::Rect::new(0.0, box_bottom, f64::from(width), box_bottom + f64::from(label))
                }),
            }
        }
    }
}

/// Convert a percent box to absolute pixels within the frame box.
pub fn qr_box(frame_box: kurbo::Rect, position: PercentRect) -> kurbo::Rect {
    let w = frame_box.width();
    let h = frame_box.height();
    let x0 = frame_box.x0 + w * position.x / 100.0;
    let y0 = frame_box.y0 + h * position.y / 100.0;
    kurbo::Rect::new(
        x0,
        y0,
        x0 + w * position.w / 100.0,
        y0 + h * position.h / 100.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/frame/layout.rs"]
mod tests;
