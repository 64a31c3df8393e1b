use kurbo::Shape;

/// One path-construction command of a frame recipe.
///
/// Coordinates and sizes are fractions of the target canvas (0.0..=1.0 in x
/// maps to canvas width, in y to canvas height), so one recipe scales to any
/// composed size. A frame family is an ordered list of these commands; new
/// families are added by appending catalog data, not by writing drawing code.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum PathCmd {
    /// Axis-aligned rectangle.
    Rect {
        /// Left edge, fraction of width.
        x: f64,
        /// Top edge, fraction of height.
        y: f64,
        /// Width fraction.
        w: f64,
        /// Height fraction.
        h: f64,
    },
    /// Rectangle with rounded corners; `radius` is a fraction of the shorter
    /// canvas side.
    RoundRect {
        /// Left edge, fraction of width.
        x: f64,
        /// Top edge, fraction of height.
        y: f64,
        /// Width fraction.
        w: f64,
        /// Height fraction.
        h: f64,
        /// Corner radius, fraction of the shorter side.
        radius: f64,
    },
    /// Circle; `radius` is a fraction of the shorter canvas side.
    Circle {
        /// Center x, fraction of width.
        cx: f64,
        /// Center y, fraction of height.
        cy: f64,
        /// Radius, fraction of the shorter side.
        radius: f64,
    },
    /// Closed polygon through the given fractional points.
    Polygon {
        /// Vertices as `[x, y]` fractional pairs.
        points: Vec<[f64; 2]>,
    },
    /// Quadratic arc from `from` to `to` bending through control point `via`.
    Arc {
        /// Start point.
        from: [f64; 2],
        /// Control point.
        via: [f64; 2],
        /// End point.
        to: [f64; 2],
    },
}

/// Scale a recipe into an absolute-coordinate path for a canvas.
pub fn build_path(recipe: &[PathCmd], width: f64, height: f64) -> kurbo::BezPath {
    let short = width.min(height);
    let mut out = kurbo::BezPath::new();

    for cmd in recipe {
        match cmd {
            PathCmd::Rect { x, y, w, h } => {
                let rect =
                    kurbo::Rect::new(x * width, y * height, (x + w) * width, (y + h) * height);
                out.extend(rect.to_path(0.1));
            }
            PathCmd::RoundRect { x, y, w, h, radius } => {
                let rect =
                    kurbo::Rect::new(x * width, y * height, (x + w) * width, (y + h) * height);
                out.extend(kurbo::RoundedRect::from_rect(rect, radius * short).to_path(0.025));
            }
            PathCmd::Circle { cx, cy, radius } => {
                let center = kurbo::Point::new(cx * width, cy * height);
                out.extend(kurbo::Circle::new(center, radius * short).to_path(0.025));
            }
            PathCmd::Polygon { points } => {
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    out.move_to(kurbo::Point::new(first[0] * width, first[1] * height));
                    for p in iter {
                        out.line_to(kurbo::Point::new(p[0] * width, p[1] * height));
                    }
                    out.close_path();
                }
            }
            PathCmd::Arc { from, via, to } => {
                out.move_to(kurbo::Point::new(from[0] * width, from[1] * height));
                out.quad_to(
                    kurbo::Point::new(via[0] * width, via[1] * height),
                    kurbo::Point::new(to[0] * width, to[1] * height),
                );
                out.close_path();
            }
        }
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/frame/recipe.rs"]
mod tests;
