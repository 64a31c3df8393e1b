//! Quirl is the QR code visual composition engine: it turns an encoded QR
//! module matrix plus a styling/decoration request into a final raster image
//! suitable for download, preview, or upload.
//!
//! # Pipeline overview
//!
//! 1. **Encode**: an injected [`QrEncoder`] turns `data + EcLevel` into a
//!    [`ModuleMatrix`] (the encoder itself is an external collaborator).
//! 2. **Render**: [`render_modules`] rasterizes the matrix under a
//!    [`StyleConfig`] (pattern, finder corner treatment, colors).
//! 3. **Compose** (optional): [`compose_frame`] lays out a decorative frame
//!    from the fixed [`catalog`], recolors artwork through the
//!    [`TintFilter`], and bakes labels.
//! 4. **Serialize**: [`encode_raster`] produces the portable [`RasterImage`]
//!    (PNG bytes + straight RGBA8, pixel-identical views).
//!
//! The [`Composer`] wraps the whole pipeline per [`CompositionRequest`] and
//! is the only component with cross-request state: the single-flight artwork
//! cache and the token counter implementing last-request-wins delivery.
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: identical requests produce pixel-identical
//!   artifacts; every export-path pixel transform is integer math.
//! - **Premultiplied RGBA8** end-to-end: surfaces stay premultiplied until
//!   the output encoder unpremultiplies for serialization.
//! - **Graceful degradation**: only invalid input and encoder failures abort;
//!   everything else yields a best-effort artifact flagged `degraded`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod effects;
mod encode;
mod foundation;
mod frame;
mod matrix;
mod render;

pub use assets::cache::ArtworkCache;
pub use assets::decode::{Artwork, decode_artwork, decode_raster_image, rasterize_svg};
pub use assets::loader::{ArtworkLoader, FsArtworkLoader, normalize_rel_path};
pub use compose::controller::{Composer, ComposerConfig, CompositionPhase, Outcome};
pub use compose::request::{CompositionRequest, FrameOptions, RequestToken};
pub use effects::tint::{
    CompositeTint, PreviewTint, TintFilter, TintIntent, filter_for_intent, tint_vertical_gradient,
};
pub use encode::png::{RasterImage, encode_raster};
pub use foundation::color::Color;
pub use foundation::error::{QuirlError, QuirlResult};
pub use foundation::raster::{PremulRgba8, Raster, over};
pub use frame::catalog::{FrameDescriptor, FrameFamily, PercentRect, catalog, descriptor};
pub use frame::compositor::{BackgroundMode, ComposedFrame, compose_frame};
pub use frame::layout::{FrameLayout, HANDLE_HEIGHT, LABEL_HEIGHT, PADDING, layout, qr_box};
pub use frame::recipe::{PathCmd, build_path};
pub use frame::text::LabelBrush;
pub use matrix::encoder::{EncoderCell, EncoderFactory, QrEncoder};
pub use matrix::model::{
    EcLevel, FINDER_SIDE, MAX_DATA_LEN, MIN_MATRIX_SIDE, ModuleMatrix, ModuleRegion,
};
pub use render::modules::{CornerStyle, Pattern, StyleConfig, render_modules};
