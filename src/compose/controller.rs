use std::{
    sync::{Arc, Mutex, atomic::AtomicU64, atomic::Ordering},
    time::Duration,
};

use crate::{
    assets::{cache::ArtworkCache, loader::ArtworkLoader},
    compose::request::{CompositionRequest, RequestToken},
    effects::tint::{TintIntent, filter_for_intent},
    encode::png::{RasterImage, encode_raster},
    foundation::error::{QuirlError, QuirlResult},
    frame::{catalog, compositor::compose_frame},
    matrix::encoder::{EncoderCell, EncoderFactory, QrEncoder},
    matrix::model::MAX_DATA_LEN,
    render::modules::render_modules,
};

/// Composer tunables. `asset_wait` bounds how long a composition waits on an
/// in-flight artwork load before falling back to the unframed render.
#[derive(Clone, Debug)]
pub struct ComposerConfig {
    /// Bounded wait for artwork loads.
    pub asset_wait: Duration,
    /// Loader-relative path of the label font, e.g. `fonts/label.ttf`.
    pub label_font_path: Option<String>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            asset_wait: Duration::from_secs(10),
            label_font_path: Some("fonts/label.ttf".to_string()),
        }
    }
}

/// Lifecycle of one in-flight composition, reported through tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositionPhase {
    /// Request accepted, nothing started.
    Idle,
    /// Waiting for frame artwork.
    Loading,
    /// Artwork failed; continuing without a frame.
    Fallback,
    /// Pixel work in progress.
    Rendering,
    /// Result produced and delivered.
    Done,
    /// Result produced but a newer request owns delivery.
    Superseded,
}

/// What a finished composition yielded.
///
/// `Delivered` vs [`Outcome::Superseded`] is the last-request-wins rule;
/// `degraded` distinguishes a best-effort artifact (frame or label dropped)
/// from a faithful one.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// This request still owns delivery; here is its artifact.
    Delivered {
        /// The final artifact.
        image: RasterImage,
        /// True when the output lost a decoration along the way.
        degraded: bool,
    },
    /// A newer request was issued before this one finished.
    Superseded,
}

enum LabelFontSlot {
    Unresolved,
    Missing,
    Ready(Arc<Vec<u8>>),
}

/// Orchestrates the composition pipeline and owns all cross-request state:
/// the artwork cache, the lazily initialized encoder, and the token counter.
pub struct Composer {
    encoder: EncoderCell,
    loader: Arc<dyn ArtworkLoader>,
    cache: ArtworkCache,
    label_font: Mutex<LabelFontSlot>,
    latest: AtomicU64,
    config: ComposerConfig,
}

impl Composer {
    /// Build a composer whose encoder is created on first use; concurrent
    /// first uses share one factory call.
    pub fn new(
        encoder: EncoderFactory,
        loader: Arc<dyn ArtworkLoader>,
        config: ComposerConfig,
    ) -> Self {
        let cache = ArtworkCache::new(config.asset_wait);
        Self {
            encoder: EncoderCell::new(encoder),
            loader,
            cache,
            label_font: Mutex::new(LabelFontSlot::Unresolved),
            latest: AtomicU64::new(0),
            config,
        }
    }

    /// Build a composer around an already-constructed encoder.
    pub fn with_encoder(
        encoder: Arc<dyn QrEncoder>,
        loader: Arc<dyn ArtworkLoader>,
        config: ComposerConfig,
    ) -> Self {
        let cache = ArtworkCache::new(config.asset_wait);
        Self {
            encoder: EncoderCell::ready(encoder),
            loader,
            cache,
            label_font: Mutex::new(LabelFontSlot::Unresolved),
            latest: AtomicU64::new(0),
            config,
        }
    }

    /// Issue the next request token. The most recently issued token is the
    /// only one whose result will be delivered.
    pub fn issue_token(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Number of decoded artworks currently cached.
    pub fn cached_artworks(&self) -> usize {
        self.cache.len()
    }

    /// Run the full pipeline for `request`.
    ///
    /// Superseded work is computed to completion but never surfaced; only
    /// the holder of the latest token receives `Delivered`.
    #[tracing::instrument(skip(self, request), fields(token = request.token.0))]
    pub fn compose(&self, request: &CompositionRequest) -> QuirlResult<Outcome> {
        let mut phase = PhaseLog::new(request.token);

        if request.data.is_empty() {
            return Err(QuirlError::invalid_input("data must be non-empty"));
        }
        if request.data.chars().count() > MAX_DATA_LEN {
            return Err(QuirlError::invalid_input(format!(
                "data exceeds QR capacity of {MAX_DATA_LEN} characters"
            )));
        }

        let encoder = self.encoder.get()?;
        let matrix = encoder.encode(&request.data, request.ec_level)?;

        phase.advance(CompositionPhase::Rendering);
        let qr = render_modules(&matrix, &request.style, request.size_px)?;

        let mut degraded = false;
        let composed = match &request.frame {
            None => qr,
            Some(opts) => {
                let desc = catalog::descriptor(&opts.frame_id);
                let artwork = match &desc.asset_ref {
                    None => None,
                    Some(rel_path) => {
                        phase.advance(CompositionPhase::Loading);
                        match self.cache.get_or_load(&desc.id, rel_path, self.loader.as_ref()) {
                            Ok(a) => Some(a),
                            Err(e) => {
                                tracing::warn!(frame = %desc.id, "artwork load failed: {e}");
                                phase.advance(CompositionPhase::Fallback);
                                degraded = true;
                                None
                            }
                        }
                    }
                };

                phase.advance(CompositionPhase::Rendering);
                if degraded {
                    // Asset failure degrades to the unframed render.
                    qr
                } else {
                    let paint = opts
                        .color
                        .or(desc.default_color)
                        .unwrap_or(crate::foundation::color::Color::BLACK);
                    let font = self.label_font();
                    let out = compose_frame(
                        &qr,
                        desc,
                        paint,
                        opts.text.as_deref(),
                        &opts.background,
                        artwork.as_deref(),
                        filter_for_intent(TintIntent::Export),
                        font.as_deref().map(|v| v.as_slice()),
                    )?;
                    degraded |= out.degraded;
                    out.raster
                }
            }
        };

        let image = encode_raster(&composed)?;

        if request.token.0 == self.latest.load(Ordering::SeqCst) {
            phase.advance(CompositionPhase::Done);
            Ok(Outcome::Delivered { image, degraded })
        } else {
            phase.advance(CompositionPhase::Superseded);
            Ok(Outcome::Superseded)
        }
    }

    /// Resolve the label font once through the loader; misses are remembered
    /// (the font is a static resource like the frame catalog).
    fn label_font(&self) -> Option<Arc<Vec<u8>>> {
        let mut slot = self
            .label_font
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match &*slot {
            LabelFontSlot::Ready(bytes) => return Some(bytes.clone()),
            LabelFontSlot::Missing => return None,
            LabelFontSlot::Unresolved => {}
        }

        let loaded = self
            .config
            .label_font_path
            .as_deref()
            .and_then(|path| match self.loader.fetch(path) {
                Ok(bytes) => Some(Arc::new(bytes)),
                Err(e) => {
                    tracing::warn!("label font unavailable: {e}");
                    None
                }
            });

        match loaded {
            Some(bytes) => {
                *slot = LabelFontSlot::Ready(bytes.clone());
                Some(bytes)
            }
            None => {
                *slot = LabelFontSlot::Missing;
                None
            }
        }
    }
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("encoder", &self.encoder)
            .field("cache", &self.cache)
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .finish()
    }
}

/// Logs phase transitions for one request.
struct PhaseLog {
    token: RequestToken,
    phase: CompositionPhase,
}

impl PhaseLog {
    fn new(token: RequestToken) -> Self {
        Self {
            token,
            phase: CompositionPhase::Idle,
        }
    }

    fn advance(&mut self, next: CompositionPhase) {
        if self.phase != next {
            tracing::debug!(token = self.token.0, from = ?self.phase, to = ?next, "phase");
            self.phase = next;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/controller.rs"]
mod tests;
