//! Scale and arc primitives used by the plot, the time cursor and the
//! project pie. All of them are plain value types with no rendering surface.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::f64::consts::TAU;

const MS_PER_DAY: i64 = 86_400_000;

/// Minimum and maximum of a sequence, skipping values that are unordered
/// with themselves (`NaN`).
pub fn extent<T, I>(values: I) -> Option<(T, T)>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = T>,
{
    let mut bounds: Option<(T, T)> = None;
    for v in values {
        if v.partial_cmp(&v).is_none() {
            continue;
        }
        bounds = match bounds {
            None => Some((v, v)),
            Some((lo, hi)) => Some((
                if v < lo { v } else { lo },
                if v > hi { v } else { hi },
            )),
        };
    }
    bounds
}

/// Maps a continuous domain onto a continuous range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A zero-width domain maps everything to the middle of the range.
    pub fn scale(&self, x: f64) -> f64 {
        let t = normalize(self.domain, x);
        interpolate(self.range, t)
    }

    /// A zero-width range inverts everything to the start of the domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (r0, r1) = self.range;
        let t = if r1 == r0 { 0.0 } else { (y - r0) / (r1 - r0) };
        interpolate(self.domain, t)
    }
}

fn normalize((d0, d1): (f64, f64), x: f64) -> f64 {
    let width = d1 - d0;
    if width.is_nan() {
        f64::NAN
    } else if width == 0.0 {
        0.5
    } else {
        (x - d0) / width
    }
}

fn interpolate((a, b): (f64, f64), t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear scale over epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>, range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(
                (start.timestamp_millis() as f64, end.timestamp_millis() as f64),
                range,
            ),
        }
    }

    pub fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (d0, d1) = self.inner.domain();
        (from_millis(d0), from_millis(d1))
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn scale<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> f64 {
        self.inner.scale(at.timestamp_millis() as f64)
    }

    pub fn invert(&self, y: f64) -> DateTime<Utc> {
        from_millis(self.inner.invert(y))
    }

    /// Widen the domain outward to whole UTC days.
    pub fn nice_days(self) -> Self {
        let (d0, d1) = self.inner.domain();
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let lo = (lo as i64).div_euclid(MS_PER_DAY) * MS_PER_DAY;
        let hi_ms = hi as i64;
        let hi = if hi_ms.rem_euclid(MS_PER_DAY) == 0 {
            hi_ms
        } else {
            (hi_ms.div_euclid(MS_PER_DAY) + 1) * MS_PER_DAY
        };
        let hi = if hi == lo { lo + MS_PER_DAY } else { hi };
        let domain = if d0 <= d1 {
            (lo as f64, hi as f64)
        } else {
            (hi as f64, lo as f64)
        };
        Self {
            inner: LinearScale::new(domain, self.inner.range()),
        }
    }
}

fn from_millis(ms: f64) -> DateTime<Utc> {
    let ms = if ms.is_finite() { ms.round() as i64 } else { 0 };
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Square-root scale, used to size dots by area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SqrtScale {
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((domain.0.sqrt(), domain.1.sqrt()), range),
        }
    }

    pub fn scale(&self, x: f64) -> f64 {
        self.inner.scale(x.sqrt())
    }
}

/// One wedge of a pie, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slice {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Slice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Midpoint of the wedge between the two radii. Angle 0 points up and
    /// grows clockwise, so the returned `y` is negative above the centre.
    pub fn centroid(&self, inner_radius: f64, outer_radius: f64) -> (f64, f64) {
        let r = (inner_radius + outer_radius) / 2.0;
        let a = (self.start_angle + self.end_angle) / 2.0;
        (a.sin() * r, -a.cos() * r)
    }

    pub fn contains_angle(&self, angle: f64) -> bool {
        let angle = angle.rem_euclid(TAU);
        angle >= self.start_angle && angle < self.end_angle
    }
}

/// Angle a value occupies out of a full turn.
pub fn arc_span(value: f64, total: f64) -> f64 {
    if total > 0.0 && value > 0.0 {
        value / total * TAU
    } else {
        0.0
    }
}

/// Lay out a pie. Larger values are placed first going clockwise from the
/// top, ties keep input order; slices come back in input order.
pub fn pie(values: &[f64]) -> Vec<Slice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut slices: Vec<Slice> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| Slice {
            index,
            value,
            start_angle: 0.0,
            end_angle: 0.0,
        })
        .collect();

    let mut angle = 0.0;
    for i in order {
        let span = arc_span(values[i], total);
        slices[i].start_angle = angle;
        slices[i].end_angle = angle + span;
        angle += span;
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn linear_scale_and_invert() {
        let s = LinearScale::new((0.0, 24.0), (600.0, 0.0));
        assert_eq!(s.scale(0.0), 600.0);
        assert_eq!(s.scale(24.0), 0.0);
        assert_eq!(s.scale(12.0), 300.0);
        assert_eq!(s.invert(150.0), 18.0);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.scale(5.0), 50.0);
        assert_eq!(s.invert(80.0), 5.0);
    }

    #[test]
    fn time_scale_nice_rounds_to_days() {
        let a = DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap();
        let b = DateTime::parse_from_rfc3339("2024-01-03T05:00:00Z").unwrap();
        let s = TimeScale::new(&a, &b, (0.0, 1000.0)).nice_days();
        let (lo, hi) = s.domain();
        assert_eq!(lo.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(hi.to_rfc3339(), "2024-01-04T00:00:00+00:00");
    }

    #[test]
    fn sqrt_scale_endpoints() {
        let s = SqrtScale::new((1.0, 100.0), (2.0, 30.0));
        assert_eq!(s.scale(1.0), 2.0);
        assert_eq!(s.scale(100.0), 30.0);
    }

    #[test]
    fn extent_skips_nan() {
        assert_eq!(extent([3.0, f64::NAN, 1.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }

    #[test]
    fn pie_orders_by_value_and_covers_full_turn() {
        let slices = pie(&[1.0, 3.0, 1.0]);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[1].start_angle, 0.0);
        assert!((slices[1].span() - TAU * 0.6).abs() < 1e-12);
        // Equal values keep input order after the larger one.
        assert!((slices[0].start_angle - TAU * 0.6).abs() < 1e-12);
        assert!((slices[0].end_angle - TAU * 0.8).abs() < 1e-12);
        assert!((slices[2].start_angle - TAU * 0.8).abs() < 1e-12);
        assert!((slices[2].end_angle - TAU).abs() < 1e-12);
        assert!(slices[1].contains_angle(1.0));
    }

    #[test]
    fn arc_span_handles_empty_total() {
        assert_eq!(arc_span(1.0, 0.0), 0.0);
        assert!((arc_span(1.0, 4.0) - TAU / 4.0).abs() < 1e-12);
    }
}
