//! Heat colour ramp shared by the choropleth fill and the heatmap.

use serde_json::{Value, json};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS `rgb(r, g, b)` form, as accepted by style expressions.
    #[must_use]
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::suboptimal_flops
    )]
    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
        )
    }
}

/// A colour ramp defined by `(stop, colour)` pairs.
///
/// The lowest stop is the most intense colour: with the heat ramp, stop 1
/// is dark red and stop 3 is yellow-green.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<(f64, Rgb)>,
}

impl ColorRamp {
    /// Builds a ramp from its stops, sorting them by stop value.
    ///
    /// Returns `None` with fewer than two stops, or when two stops share a
    /// value (`interpolate` needs strictly ascending inputs).
    #[must_use]
    pub fn new(mut stops: Vec<(f64, Rgb)>) -> Option<Self> {
        if stops.len() < 2 {
            return None;
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        if stops.windows(2).any(|w| (w[1].0 - w[0].0).abs() < f64::EPSILON) {
            log::debug!("Rejecting colour ramp with repeated stop values");
            return None;
        }
        Some(Self { stops })
    }

    /// Dark red, orange, yellow-green.
    #[must_use]
    pub fn heat() -> Self {
        Self {
            stops: vec![
                (1.0, Rgb(139, 0, 0)),
                (2.0, Rgb(255, 165, 0)),
                (3.0, Rgb(189, 224, 64)),
            ],
        }
    }

    /// Stops as `(intensity, colour)` with intensity in `[0, 1]`, ascending.
    #[must_use]
    pub fn intensity_stops(&self) -> Vec<(f64, Rgb)> {
        let lo = self.stops[0].0;
        let hi = self.stops[self.stops.len() - 1].0;
        self.stops
            .iter()
            .rev()
            .map(|(v, c)| ((hi - v) / (hi - lo), *c))
            .collect()
    }

    /// Colour at `intensity` (clamped to `[0, 1]`), linearly interpolated.
    #[must_use]
    pub fn color_at(&self, intensity: f64) -> Rgb {
        let t = intensity.clamp(0.0, 1.0);
        let stops = self.intensity_stops();
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.0 {
                let span = b.0 - a.0;
                let local = if span > 0.0 { (t - a.0) / span } else { 0.0 };
                return a.1.lerp(b.1, local);
            }
        }
        stops[stops.len() - 1].1
    }

    /// An `interpolate` expression over `input`, spreading the ramp from
    /// least intense at `lo` to most intense at `hi`.
    #[must_use]
    pub fn expression(&self, input: Value, lo: f64, hi: f64) -> Value {
        let mut expr = vec![json!("interpolate"), json!(["linear"]), input];
        expr.extend(self.stop_values(lo, hi));
        Value::Array(expr)
    }

    /// `heatmap-color` expression: transparent at zero density, then the
    /// ramp.
    #[must_use]
    pub fn heatmap_color(&self) -> Value {
        let mut expr = vec![
            json!("interpolate"),
            json!(["linear"]),
            json!(["heatmap-density"]),
            json!(0),
            json!("rgba(0, 0, 0, 0)"),
        ];
        expr.extend(self.stop_values(0.25, 1.0));
        Value::Array(expr)
    }

    /// Choropleth `fill-color` expression over the feature `value`,
    /// scaled to `max_value`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_color(&self, max_value: u64) -> Value {
        self.expression(json!(["get", "value"]), 0.0, max_value.max(1) as f64)
    }

    fn stop_values(&self, lo: f64, hi: f64) -> impl Iterator<Item = Value> {
        self.intensity_stops()
            .into_iter()
            .flat_map(move |(intensity, color)| {
                [json!(intensity.mul_add(hi - lo, lo)), json!(color.css())]
            })
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::heat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_ramp_endpoints_and_midpoint() {
        let ramp = ColorRamp::heat();
        assert_eq!(ramp.color_at(0.0), Rgb(189, 224, 64));
        assert_eq!(ramp.color_at(0.5), Rgb(255, 165, 0));
        assert_eq!(ramp.color_at(1.0), Rgb(139, 0, 0));
        assert_eq!(ramp.color_at(7.0), Rgb(139, 0, 0));
    }

    #[test]
    fn interpolates_between_stops() {
        let ramp = ColorRamp::heat();
        assert_eq!(ramp.color_at(0.75), Rgb(197, 83, 0));
    }

    #[test]
    fn new_sorts_and_rejects_degenerate() {
        assert!(ColorRamp::new(vec![(1.0, Rgb(0, 0, 0))]).is_none());
        assert!(ColorRamp::new(vec![(1.0, Rgb(0, 0, 0)), (1.0, Rgb(1, 1, 1))]).is_none());
        let ramp = ColorRamp::new(vec![(3.0, Rgb(189, 224, 64)), (1.0, Rgb(139, 0, 0))]).unwrap();
        assert_eq!(ramp.color_at(1.0), Rgb(139, 0, 0));
    }

    #[test]
    fn new_rejects_repeated_interior_stop() {
        let stops = vec![
            (1.0, Rgb(139, 0, 0)),
            (2.0, Rgb(255, 165, 0)),
            (2.0, Rgb(200, 200, 0)),
            (3.0, Rgb(189, 224, 64)),
        ];
        assert!(ColorRamp::new(stops).is_none());

        let ramp = ColorRamp::new(vec![
            (2.0, Rgb(255, 165, 0)),
            (3.0, Rgb(189, 224, 64)),
            (1.0, Rgb(139, 0, 0)),
        ])
        .unwrap();
        assert_eq!(ramp, ColorRamp::heat());
    }

    #[test]
    fn heatmap_color_starts_transparent() {
        let expr = ColorRamp::heat().heatmap_color();
        assert_eq!(
            expr,
            json!([
                "interpolate",
                ["linear"],
                ["heatmap-density"],
                0,
                "rgba(0, 0, 0, 0)",
                0.25,
                "rgb(189, 224, 64)",
                0.625,
                "rgb(255, 165, 0)",
                1.0,
                "rgb(139, 0, 0)"
            ])
        );
    }

    #[test]
    fn fill_color_never_has_duplicate_stops() {
        let expr = ColorRamp::heat().fill_color(0);
        assert_eq!(expr[3], json!(0.0));
        assert_eq!(expr[7], json!(1.0));
    }
}
