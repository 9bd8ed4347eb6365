//! This module builds the garland wire: a smooth tube threaded through every bulb on a spiral.

use crate::{GenerationError, Mesh, RGBArray, SpiralPath};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::{debug, instrument};

/// The number of tube segments along each strand.
pub const TUBULAR_SEGMENTS: usize = 50;

/// The number of sides around the tube.
pub const RADIAL_SEGMENTS: usize = 8;

/// The number of samples used to measure the length of a curve.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// A centripetal Catmull-Rom curve that passes through every one of its points.
///
/// The centripetal parametrisation (knots spaced by the square root of the chord length) avoids
/// the cusps and self-intersections that the uniform version produces on tight spirals.
#[derive(Clone, Debug, PartialEq)]
pub struct CatmullRomCurve {
    /// The points the curve passes through, with one extrapolated point added at each end.
    control_points: Vec<Vec3>,

    /// The cumulative length of the curve at each of the evenly spaced `t` samples.
    arc_lengths: Vec<f32>,
}

impl CatmullRomCurve {
    /// Build a curve through the given points. At least 2 points are needed.
    pub fn centripetal(points: &[Vec3]) -> Result<Self, GenerationError> {
        let (Some(&first), Some(&second), Some(&last)) =
            (points.first(), points.get(1), points.last())
        else {
            return Err(GenerationError::DegeneratePath {
                what: "garland curve",
                needed: 2,
                got: points.len(),
            });
        };
        let penultimate = points[points.len() - 2];

        let control_points = {
            let mut v = Vec::with_capacity(points.len() + 2);
            v.push(first + (first - second));
            v.extend(points.iter());
            v.push(last + (last - penultimate));
            v
        };

        let mut curve = Self {
            control_points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.measure();
        Ok(curve)
    }

    /// The number of segments between consecutive points.
    pub fn segment_count(&self) -> usize {
        self.control_points.len() - 3
    }

    /// The total length of the curve.
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.)
    }

    /// The point at parameter `t` in `[0, 1]`, where each segment takes an equal share of `t`.
    pub fn point(&self, t: f32) -> Vec3 {
        let segments = self.segment_count();
        let scaled = t.clamp(0., 1.) * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f32;

        let [p0, p1, p2, p3] = [0, 1, 2, 3].map(|offset| self.control_points[index + offset]);
        interpolate_centripetal_segment(p0, p1, p2, p3, local.clamp(0., 1.))
    }

    /// The point at a proportion `u` of the way along the curve by arc length.
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.arc_length_to_t(u))
    }

    /// `divisions + 1` points evenly spaced along the curve by arc length, including both ends.
    pub fn spaced_points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }

    /// Cumulative lengths at `ARC_LENGTH_DIVISIONS + 1` evenly spaced values of `t`.
    fn measure(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut previous = self.point(0.);
        let mut total = 0.;
        lengths.push(0.);

        for i in 1..=ARC_LENGTH_DIVISIONS {
            let current = self.point(i as f32 / ARC_LENGTH_DIVISIONS as f32);
            total += current.distance(previous);
            lengths.push(total);
            previous = current;
        }

        lengths
    }

    /// Map a proportion of the arc length to the curve parameter `t`.
    fn arc_length_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= 0. {
            return u.clamp(0., 1.);
        }

        let target = u.clamp(0., 1.) * total;
        let upper = self
            .arc_lengths
            .partition_point(|&length| length < target)
            .clamp(1, ARC_LENGTH_DIVISIONS);
        let lower = upper - 1;

        let before = self.arc_lengths[lower];
        let span = self.arc_lengths[upper] - before;
        let fraction = if span > 0. {
            (target - before) / span
        } else {
            0.
        };

        (lower as f32 + fraction) / ARC_LENGTH_DIVISIONS as f32
    }
}

/// Interpolate a segment of a centripetal Catmull-Rom spline with the 4 given points and the `t`
/// value.
///
/// Knot intervals shorter than `1e-4` are replaced so that repeated points don't divide by zero.
fn interpolate_centripetal_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    debug_assert!((0.0..=1.0).contains(&t), "t must be in [0, 1]");

    let mut dt0 = p0.distance(p1).sqrt();
    let mut dt1 = p1.distance(p2).sqrt();
    let mut dt2 = p2.distance(p3).sqrt();

    if dt1 < 1e-4 {
        dt1 = 1.;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let t0 = 0.;
    let t1 = t0 + dt0;
    let t2 = t1 + dt1;
    let t3 = t2 + dt2;

    let t = (t2 - t1).mul_add(t, t1);

    let a1 = p0 * ((t1 - t) / (t1 - t0)) + p1 * ((t - t0) / (t1 - t0));
    let a2 = p1 * ((t2 - t) / (t2 - t1)) + p2 * ((t - t1) / (t2 - t1));
    let a3 = p2 * ((t3 - t) / (t3 - t2)) + p3 * ((t - t2) / (t3 - t2));

    let b1 = a1 * ((t2 - t) / (t2 - t0)) + a2 * ((t - t0) / (t2 - t0));
    let b2 = a2 * ((t3 - t) / (t3 - t1)) + a3 * ((t - t1) / (t3 - t1));

    b1 * ((t2 - t) / (t2 - t1)) + b2 * ((t - t1) / (t2 - t1))
}

/// Build a tube of the given radius around a polyline.
///
/// The cross-section is carried along the line with parallel-transported frames, so the tube
/// never twists around its own axis.
pub fn tube_mesh(points: &[Vec3], radius: f32, radial_segments: usize) -> Mesh {
    let radial = radial_segments.max(3);
    let tangents = tangents(points);
    let normals = transport_normals(&tangents);

    let mut mesh = Mesh::default();
    for ((&point, &tangent), &normal) in points.iter().zip(&tangents).zip(&normals) {
        let binormal = tangent.cross(normal);

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let (sin, cos) = v.sin_cos();
            let direction = (-cos * normal + sin * binormal).normalize_or_zero();

            mesh.positions.push(point + radius * direction);
            mesh.normals.push(direction);
        }
    }

    let row = radial as u32 + 1;
    for j in 1..points.len() as u32 {
        for i in 1..=radial as u32 {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            mesh.indices.extend([a, b, d, b, c, d]);
        }
    }

    mesh
}

/// The unit tangent at each point of a polyline, by central differences.
fn tangents(points: &[Vec3]) -> Vec<Vec3> {
    let last = points.len().saturating_sub(1);
    let mut previous = Vec3::Y;

    (0..points.len())
        .map(|i| {
            let tangent =
                (points[(i + 1).min(last)] - points[i.saturating_sub(1)]).normalize_or_zero();
            if tangent != Vec3::ZERO {
                previous = tangent;
            }
            previous
        })
        .collect()
}

/// Carry a normal along the tangents, rotating it only as much as each tangent turns.
fn transport_normals(tangents: &[Vec3]) -> Vec<Vec3> {
    let Some(&first) = tangents.first() else {
        return Vec::new();
    };

    // Start perpendicular to the first tangent, using the axis it is least aligned with
    let abs = first.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };

    let mut normal = first.cross(axis).normalize_or_zero();
    let mut normals = Vec::with_capacity(tangents.len());
    normals.push(normal);

    for pair in tangents.windows(2) {
        normal = (Quat::from_rotation_arc(pair[0], pair[1]) * normal).normalize_or_zero();
        normals.push(normal);
    }

    normals
}

/// One strand of the garland, following one spiral.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GarlandStrand {
    /// The spiral this strand follows.
    pub spiral_index: usize,

    /// The evenly spaced points along the smoothed curve that the tube is built around.
    pub curve_points: Vec<Vec3>,

    /// The tube itself.
    pub mesh: Mesh,
}

/// The complete garland wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Garland {
    /// One strand per spiral.
    pub strands: Vec<GarlandStrand>,

    /// The colour of the wire.
    pub wire_colour: RGBArray,

    /// The radius of the wire.
    pub thickness: f32,
}

impl Garland {
    /// Thread a tube through the bulbs of every spiral.
    #[instrument(skip_all, fields(strands = paths.len()))]
    pub fn generate(
        paths: &[SpiralPath],
        thickness: f32,
        wire_colour: RGBArray,
    ) -> Result<Self, GenerationError> {
        let strands = paths
            .iter()
            .map(|path| {
                let curve = CatmullRomCurve::centripetal(&path.points)?;
                let curve_points = curve.spaced_points(TUBULAR_SEGMENTS);
                let mesh = tube_mesh(&curve_points, thickness, RADIAL_SEGMENTS);
                mesh.validate("garland tube")?;

                Ok(GarlandStrand {
                    spiral_index: path.spiral_index,
                    curve_points,
                    mesh,
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        debug!(strands = strands.len(), "Generated garland");
        Ok(Self {
            strands,
            wire_colour,
            thickness,
        })
    }
}
