//! Closed-form constructions on cartesian 2D primitives.
//!
//! These are the pure numeric helpers construction algorithms combine with
//! the topological mutators of [`Dcel`][crate::Dcel]: all of them are
//! deterministic formulas over an opaque scalar type `S` and none of them
//! touch a subdivision. The results are exact exactly when the scalar's
//! arithmetic is; no robustness guarantees are made beyond that.
//!
//! The module also provides [`CartesianTraits`], a ready-made geometric
//! traits class over these primitives.

use cgmath::{BaseFloat, Point2, Vector2};
use num_traits::{One, Zero};

use crate::traits::GeomTraits;


/// The answer of an oriented side test: where a point lies relative to a
/// directed line.
///
/// For a line through `p` and `q` (directed from `p` to `q`), the positive
/// side is the left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientedSide {
    /// The point lies strictly on the negative (right) side.
    Negative,
    /// The point lies on the line.
    OnLine,
    /// The point lies strictly on the positive (left) side.
    Positive,
}

/// A line in the implicit form `a·x + b·y + c = 0`.
///
/// The coefficients are not normalized; `(a, b)` is a normal vector of the
/// line and `(b, -a)` points along its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2<S> {
    pub a: S,
    pub b: S,
    pub c: S,
}

/// A straight segment, the x-monotone curve type of [`CartesianTraits`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<S> {
    pub source: Point2<S>,
    pub target: Point2<S>,
}

impl<S> Segment2<S> {
    pub fn new(source: Point2<S>, target: Point2<S>) -> Self {
        Self { source, target }
    }
}


/// Returns the midpoint of `p` and `q`.
pub fn midpoint<S: BaseFloat>(p: Point2<S>, q: Point2<S>) -> Point2<S> {
    let two = S::one() + S::one();
    Point2::new((p.x + q.x) / two, (p.y + q.y) / two)
}

/// Returns the center of the circle through the three points.
///
/// The points must not be collinear (the denominator would vanish).
pub fn circumcenter<S: BaseFloat>(p: Point2<S>, q: Point2<S>, r: Point2<S>) -> Point2<S> {
    let two = S::one() + S::one();
    let dq = q - p;
    let dr = r - p;
    let q2 = dq.x * dq.x + dq.y * dq.y;
    let r2 = dr.x * dr.x + dr.y * dr.y;
    let den = two * (dq.x * dr.y - dq.y * dr.x);

    Point2::new(
        p.x + (dr.y * q2 - dq.y * r2) / den,
        p.y + (dq.x * r2 - dr.x * q2) / den,
    )
}

/// Returns the line through `p` and `q`, directed from `p` to `q`.
pub fn line_from_points<S: BaseFloat>(p: Point2<S>, q: Point2<S>) -> Line2<S> {
    Line2 {
        a: p.y - q.y,
        b: q.x - p.x,
        c: p.x * q.y - p.y * q.x,
    }
}

/// Returns the line through `p` with direction `d`.
pub fn line_from_point_direction<S: BaseFloat>(p: Point2<S>, d: Vector2<S>) -> Line2<S> {
    Line2 {
        a: -d.y,
        b: d.x,
        c: p.x * d.y - p.y * d.x,
    }
}

/// Returns the y coordinate of the line's point at the given x coordinate.
/// The line must not be vertical.
pub fn line_y_at_x<S: BaseFloat>(l: Line2<S>, x: S) -> S {
    (-l.a * x - l.c) / l.b
}

/// Returns the x coordinate of the line's point at the given y coordinate.
/// The line must not be horizontal.
pub fn line_x_at_y<S: BaseFloat>(l: Line2<S>, y: S) -> S {
    (-l.b * y - l.c) / l.a
}

/// Returns a point on the line: the point closest to the origin, displaced
/// by `i` times the direction vector `(b, -a)`.
pub fn line_point_at<S: BaseFloat>(l: Line2<S>, i: S) -> Point2<S> {
    let n2 = l.a * l.a + l.b * l.b;
    Point2::new(
        -l.a * l.c / n2 + i * l.b,
        -l.b * l.c / n2 - i * l.a,
    )
}

/// Returns the orthogonal projection of `p` onto the line.
pub fn line_project_point<S: BaseFloat>(l: Line2<S>, p: Point2<S>) -> Point2<S> {
    let n2 = l.a * l.a + l.b * l.b;
    Point2::new(
        (l.b * (l.b * p.x - l.a * p.y) - l.a * l.c) / n2,
        (l.a * (l.a * p.y - l.b * p.x) - l.b * l.c) / n2,
    )
}

/// Classifies on which side of the directed line `p` lies.
pub fn line_oriented_side<S: BaseFloat>(l: Line2<S>, p: Point2<S>) -> OrientedSide {
    let d = l.a * p.x + l.b * p.y + l.c;
    if d > S::zero() {
        OrientedSide::Positive
    } else if d < S::zero() {
        OrientedSide::Negative
    } else {
        OrientedSide::OnLine
    }
}

/// Returns the squared radius of the circle through the three points.
pub fn squared_circumradius<S: BaseFloat>(p: Point2<S>, q: Point2<S>, r: Point2<S>) -> S {
    squared_distance(circumcenter(p, q, r), p)
}

/// Returns the squared distance between `p` and `q`.
pub fn squared_distance<S: BaseFloat>(p: Point2<S>, q: Point2<S>) -> S {
    let d = p - q;
    d.x * d.x + d.y * d.y
}

/// Returns the signed distance of `p` to the line, scaled by the norm of
/// the line's normal vector `(a, b)`. The sign matches
/// [`line_oriented_side`].
pub fn scaled_distance_to_line<S: BaseFloat>(l: Line2<S>, p: Point2<S>) -> S {
    l.a * p.x + l.b * p.y + l.c
}

/// Returns the signed distance of `r` to the line through `p` and `q`,
/// scaled by the distance between `p` and `q`.
pub fn scaled_distance_to_line_through<S: BaseFloat>(
    p: Point2<S>,
    q: Point2<S>,
    r: Point2<S>,
) -> S {
    (p.x - r.x) * (q.y - r.y) - (p.y - r.y) * (q.x - r.x)
}


/// A geometric traits class over cartesian coordinates of scalar type `S`:
/// points are [`Point2<S>`] and x-monotone curves are straight
/// [`Segment2<S>`]s.
///
/// This type is only used on the type level and cannot be constructed.
pub struct CartesianTraits<S>(std::marker::PhantomData<S>);

impl<S: BaseFloat + 'static> GeomTraits for CartesianTraits<S> {
    type Point = Point2<S>;
    type Curve = Segment2<S>;
}
