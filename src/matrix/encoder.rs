use std::sync::{Arc, Mutex};

use crate::{
    foundation::error::QuirlResult,
    matrix::model::{EcLevel, ModuleMatrix},
};

/// The external QR matrix source.
///
/// Encoding text into a module matrix is a standard, well-known algorithm and
/// is deliberately not implemented in this crate; hosts inject an
/// implementation at [`Composer`](crate::compose::controller::Composer)
/// construction. Implementations must be pure with respect to their inputs:
/// the same `(data, ec)` pair always yields the same matrix.
pub trait QrEncoder: Send + Sync {
    /// Encode `data` at the requested error-correction level.
    fn encode(&self, data: &str, ec: EcLevel) -> QuirlResult<ModuleMatrix>;
}

/// Factory producing the encoder on first use.
pub type EncoderFactory = Box<dyn Fn() -> QuirlResult<Arc<dyn QrEncoder>> + Send + Sync>;

/// Lazily initialized encoder slot with a single-flight guard.
///
/// The reference behavior imported its encoding capability into a module-level
/// global on first use; here the dependency is explicit and the lock ensures
/// concurrent first uses share one factory call instead of racing. A failed
/// initialization is not cached, so a later request retries.
pub struct EncoderCell {
    factory: EncoderFactory,
    slot: Mutex<Option<Arc<dyn QrEncoder>>>,
}

impl EncoderCell {
    /// Wrap a factory; no initialization happens until [`EncoderCell::get`].
    pub fn new(factory: EncoderFactory) -> Self {
        Self {
            factory,
            slot: Mutex::new(None),
        }
    }

    /// Wrap an already-built encoder.
    pub fn ready(encoder: Arc<dyn QrEncoder>) -> Self {
        let for_factory = encoder.clone();
        Self {
            factory: Box::new(move || Ok(for_factory.clone())),
            slot: Mutex::new(Some(encoder)),
        }
    }

    /// Return the encoder, initializing it on first use.
    pub fn get(&self) -> QuirlResult<Arc<dyn QrEncoder>> {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(enc) = slot.as_ref() {
            return Ok(enc.clone());
        }
        let enc = (self.factory)()?;
        *slot = Some(enc.clone());
        Ok(enc)
    }
}

impl std::fmt::Debug for EncoderCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let initialized = self
            .slot
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false);
        f.debug_struct("EncoderCell")
            .field("initialized", &initialized)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matrix/encoder.rs"]
mod tests;
