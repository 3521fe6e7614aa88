use crate::{Distance, LonLat, EPSILON_DEGREES};

/// Orientation results closer to zero than this are treated as collinear.
const COLLINEAR_EPSILON: f64 = 1e-12;

/// A segment between two GPS points. Longitude is treated as x and latitude as y for the planar
/// tests; that's only valid because the segments involved are short.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GPSLine(LonLat, LonLat);

/// Where a point lands when projected onto a `GPSLine`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProjection {
    /// The closest point on the segment
    pub pt: LonLat,
    /// Planar distance from the query point to `pt`
    pub dist: Distance,
    /// Fraction along the segment, clamped to [0, 1]
    pub t: f64,
}

impl GPSLine {
    pub fn new(pt1: LonLat, pt2: LonLat) -> GPSLine {
        GPSLine(pt1, pt2)
    }

    pub fn pt1(&self) -> LonLat {
        self.0
    }

    pub fn pt2(&self) -> LonLat {
        self.1
    }

    pub fn length(&self) -> Distance {
        self.0.gps_dist(self.1)
    }

    /// True if the two segments touch or cross, including collinear overlaps and shared
    /// endpoints.
    pub fn crosses(&self, other: &GPSLine) -> bool {
        let (p1, p2, p3, p4) = (self.0, self.1, other.0, other.1);
        let o1 = Orientation::of(p1, p2, p3);
        let o2 = Orientation::of(p1, p2, p4);
        let o3 = Orientation::of(p3, p4, p1);
        let o4 = Orientation::of(p3, p4, p2);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && in_bbox(p1, p3, p2))
            || (o2 == Orientation::Collinear && in_bbox(p1, p4, p2))
            || (o3 == Orientation::Collinear && in_bbox(p3, p1, p4))
            || (o4 == Orientation::Collinear && in_bbox(p3, p2, p4))
    }

    /// The single point where the two segments cross. Parallel and collinear segments have no
    /// single answer and produce None, even if they overlap.
    pub fn intersection(&self, other: &GPSLine) -> Option<LonLat> {
        if !self.crosses(other) {
            return None;
        }

        let (x1, y1) = (self.0.longitude, self.0.latitude);
        let (x2, y2) = (self.1.longitude, self.1.latitude);
        let (x3, y3) = (other.0.longitude, other.0.latitude);
        let (x4, y4) = (other.1.longitude, other.1.latitude);

        let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if denom.abs() < COLLINEAR_EPSILON {
            return None;
        }

        let a = x1 * y2 - y1 * x2;
        let b = x3 * y4 - y3 * x4;
        let px = (a * (x3 - x4) - (x1 - x2) * b) / denom;
        let py = (a * (y3 - y4) - (y1 - y2) * b) / denom;

        let within = |v: f64, lo: f64, hi: f64| {
            v >= lo.min(hi) - EPSILON_DEGREES && v <= lo.max(hi) + EPSILON_DEGREES
        };
        if !within(px, x1, x2) || !within(px, x3, x4) || !within(py, y1, y2) || !within(py, y3, y4)
        {
            return None;
        }

        Some(LonLat::new(px, py))
    }

    /// How far along the segment `pt` is, as a fraction of the great-circle length. A zero-length
    /// segment reports 0.
    pub fn percent_along(&self, pt: LonLat) -> f64 {
        self.0.gps_dist(pt).safe_percent(self.length())
    }

    /// Projects a point onto this segment in a local equirectangular frame, centered on the mean
    /// latitude of the three points. Fine for tens to low hundreds of meters; never use the result
    /// for long-haul distances.
    pub fn project(&self, pt: LonLat) -> SegmentProjection {
        let ref_lat = LonLat::center(&[pt, self.0, self.1]).latitude.to_radians();

        let start = self.0.to_local_pt(ref_lat);
        let end = self.1.to_local_pt(ref_lat);
        let query = pt.to_local_pt(ref_lat);

        let dx = end.x() - start.x();
        let dy = end.y() - start.y();
        let len_squared = dx * dx + dy * dy;

        let mut t = 0.0;
        if len_squared > 0.0 {
            t = ((query.x() - start.x()) * dx + (query.y() - start.y()) * dy) / len_squared;
        }
        let t = t.clamp(0.0, 1.0);

        let closest = start.offset(t * dx, t * dy);
        SegmentProjection {
            pt: LonLat::from_local_pt(closest, ref_lat),
            dist: Distance::meters(query.dist_to(closest)),
            t,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    fn of(p: LonLat, q: LonLat, r: LonLat) -> Orientation {
        let val = (q.latitude - p.latitude) * (r.longitude - q.longitude)
            - (q.longitude - p.longitude) * (r.latitude - q.latitude);
        if val.abs() < COLLINEAR_EPSILON {
            Orientation::Collinear
        } else if val > 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        }
    }
}

// Is q inside the bounding box of p and r?
fn in_bbox(p: LonLat, q: LonLat, r: LonLat) -> bool {
    q.longitude <= p.longitude.max(r.longitude) + COLLINEAR_EPSILON
        && q.longitude + COLLINEAR_EPSILON >= p.longitude.min(r.longitude)
        && q.latitude <= p.latitude.max(r.latitude) + COLLINEAR_EPSILON
        && q.latitude + COLLINEAR_EPSILON >= p.latitude.min(r.latitude)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn line(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> GPSLine {
        GPSLine::new(LonLat::new(lon1, lat1), LonLat::new(lon2, lat2))
    }

    #[test]
    fn crossing_segments() {
        let a = line(0.0, 0.0, 0.001, 0.001);
        let b = line(0.0, 0.001, 0.001, 0.0);
        assert!(a.crosses(&b));
        let pt = a.intersection(&b).unwrap();
        assert!(pt.approx_eq(LonLat::new(0.0005, 0.0005)));
    }

    #[test]
    fn disjoint_segments() {
        let a = line(0.0, 0.0, 0.001, 0.0);
        let b = line(0.002, -0.001, 0.002, 0.001);
        assert!(!a.crosses(&b));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn parallel_overlap_is_skipped() {
        // Two streets drawn along the same path. No single junction exists, so this is ignored.
        let a = line(0.0, 0.0, 0.002, 0.0);
        let b = line(0.001, 0.0, 0.003, 0.0);
        assert!(a.crosses(&b));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn touching_at_an_endpoint() {
        let a = line(0.0, 0.0, 0.001, 0.0);
        let b = line(0.001, 0.0, 0.001, 0.001);
        let pt = a.intersection(&b).unwrap();
        assert!(pt.approx_eq(a.pt2()));
    }

    #[test]
    fn project_onto_interior() {
        let l = line(0.0, 0.0, 0.001, 0.0);
        let proj = l.project(LonLat::new(0.0005, 0.0001));
        assert!((proj.t - 0.5).abs() < 1e-6);
        assert!(proj.pt.approx_eq(LonLat::new(0.0005, 0.0)));
        // 0.0001 degrees of latitude
        assert!((proj.dist.inner_meters() - 11.119).abs() < 0.01);
    }

    #[test]
    fn project_clamps_past_the_ends() {
        let l = line(0.0, 0.0, 0.001, 0.0);
        let before = l.project(LonLat::new(-0.001, 0.0));
        assert_eq!(before.t, 0.0);
        assert!(before.pt.approx_eq(l.pt1()));

        let after = l.project(LonLat::new(0.005, 0.0002));
        assert_eq!(after.t, 1.0);
        assert!(after.pt.approx_eq(l.pt2()));
    }

    #[test]
    fn project_onto_zero_length_segment() {
        let l = line(0.001, 0.001, 0.001, 0.001);
        let proj = l.project(LonLat::new(0.001, 0.002));
        assert_eq!(proj.t, 0.0);
        assert!(proj.pt.approx_eq(l.pt1()));
        assert!(proj.dist > Distance::ZERO);
        assert_eq!(l.percent_along(LonLat::new(0.001, 0.002)), 0.0);
    }

    #[test]
    fn projection_never_beats_the_true_distance_by_much() {
        // Near the query, the planar projection should agree with haversine to well under a
        // meter.
        let mut rng = XorShiftRng::seed_from_u64(42);
        for _ in 0..100 {
            let base_lon = rng.gen_range(-120.0..120.0);
            let base_lat = rng.gen_range(-60.0..60.0);
            let l = GPSLine::new(
                LonLat::new(base_lon, base_lat),
                LonLat::new(
                    base_lon + rng.gen_range(-0.001..0.001),
                    base_lat + rng.gen_range(-0.001..0.001),
                ),
            );
            let pt = LonLat::new(
                base_lon + rng.gen_range(-0.001..0.001),
                base_lat + rng.gen_range(-0.001..0.001),
            );
            let proj = l.project(pt);
            assert!((0.0..=1.0).contains(&proj.t));
            let true_dist = pt.gps_dist(proj.pt);
            assert!(true_dist.approx_eq(proj.dist, 0.5));
        }
    }
}
