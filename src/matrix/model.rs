use crate::foundation::error::{QuirlError, QuirlResult};

/// Practical QR byte-mode capacity ceiling; longer payloads are rejected
/// before the encoder is consulted.
pub const MAX_DATA_LEN: usize = 2953;

/// Smallest QR symbol side (version 1).
pub const MIN_MATRIX_SIDE: usize = 21;

/// Side length of a finder pattern block, in modules.
pub const FINDER_SIDE: usize = 7;

/// QR error-correction level, trading capacity for damage tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EcLevel {
    /// ~7% recovery.
    L,
    /// ~15% recovery.
    M,
    /// ~25% recovery.
    Q,
    /// ~30% recovery.
    H,
}

impl std::str::FromStr for EcLevel {
    type Err = QuirlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(QuirlError::invalid_input(format!(
                "unknown error-correction level '{other}'"
            ))),
        }
    }
}

/// Immutable square grid of QR modules (`true` = dark).
///
/// Produced by an external [`QrEncoder`](crate::matrix::encoder::QrEncoder);
/// the constructor enforces the squareness and minimum-size invariants so the
/// renderer never needs to re-check them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMatrix {
    side: usize,
    modules: Vec<bool>,
}

/// A rectangular module region, used to address finder patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModuleRegion {
    /// Leftmost module column.
    pub x: usize,
    /// Topmost module row.
    pub y: usize,
    /// Region side length in modules.
    pub side: usize,
}

impl ModuleMatrix {
    /// Build a matrix from row-major module values.
    ///
    /// `modules.len()` must equal `side * side` and `side` must be at least
    /// [`MIN_MATRIX_SIDE`].
    pub fn new(side: usize, modules: Vec<bool>) -> QuirlResult<Self> {
        if side < MIN_MATRIX_SIDE {
            return Err(QuirlError::encoding(format!(
                "matrix side {side} below QR minimum {MIN_MATRIX_SIDE}"
            )));
        }
        if modules.len() != side * side {
            return Err(QuirlError::encoding(format!(
                "matrix is not square: {} modules for side {side}",
                modules.len()
            )));
        }
        Ok(Self { side, modules })
    }

    /// Side length in modules.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Module value at (x, y). Out-of-bounds reads are light.
    pub fn module(&self, x: usize, y: usize) -> bool {
        if x >= self.side || y >= self.side {
            return false;
        }
        self.modules[y * self.side + x]
    }

    /// The three standard 7×7 finder blocks: top-left, top-right,
    /// bottom-left. Located purely by matrix coordinates.
    pub fn finder_regions(&self) -> [ModuleRegion; 3] {
        let far = self.side - FINDER_SIDE;
        [
            ModuleRegion {
                x: 0,
                y: 0,
                side: FINDER_SIDE,
            },
            ModuleRegion {
                x: far,
                y: 0,
                side: FINDER_SIDE,
            },
            ModuleRegion {
                x: 0,
                y: far,
                side: FINDER_SIDE,
            },
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matrix/model.rs"]
mod tests;
