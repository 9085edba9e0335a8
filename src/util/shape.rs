#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::cache::Cached;
use crate::util::float;
use crate::util::linalg::Vec2;
use crate::util::matrix::Mat2;
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;

/// A directed parametric ray `origin + t * direction`, used as the query
/// object for intersection tests. The direction need not be unit length;
/// immutable per query.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub direction: Vec2,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2) -> Ray {
        Ray { origin, direction }
    }

    /// The point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> Vec2 {
        &self.origin + &(t * &self.direction)
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ray({} + t*{})", self.origin, self.direction)
    }
}

/// A 2D shape supporting ray intersection, translation and rotation.
///
/// Each `cast_ray` is a pure function of shape state and ray: it returns the
/// finite sequence of intersection points with `t >= 0` (hits behind the ray
/// origin are discarded), and never mutates the shape.
pub trait Shape {
    /// The shape's reference position: centre for [`Circle`], start point
    /// for [`Line`], origin for [`Polygon`]/[`Rect`].
    fn position(&self) -> Vec2;

    /// Moves the shape so its reference position coincides with `position`,
    /// preserving its geometry.
    fn set_position(&mut self, position: Vec2) {
        let delta = &position - &self.position();
        self.translate(&delta);
    }

    fn cast_ray(&self, ray: &Ray) -> Vec<Vec2>;

    /// Moves the shape by adding `by` to its position.
    fn translate(&mut self, by: &Vec2);

    /// Rotates the shape about its own reference position (not the world
    /// origin), holding that position fixed.
    fn rotate(&mut self, radians: f64);

    fn into_any(self) -> AnyShape
    where
        Self: Sized;
}

#[derive(Debug, Clone)]
pub struct Circle {
    pub centre: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(centre: Vec2, radius: f64) -> Circle {
        Circle { centre, radius }
    }
}

impl Shape for Circle {
    fn position(&self) -> Vec2 {
        self.centre.clone()
    }

    // Substitutes the ray equation into (x - cx)^2 + (y - cy)^2 = r^2 and
    // solves the resulting quadratic in t.
    fn cast_ray(&self, ray: &Ray) -> Vec<Vec2> {
        let a = ray.direction.magnitude_squared();
        if float::almost_zero(a) {
            warn!("cast_ray(): degenerate ray direction: {}", ray);
            return Vec::new();
        }
        let offset = &ray.origin - &self.centre;
        let b = 2.0 * ray.direction.dot(&offset);
        let c = offset.magnitude_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            // No real roots: the ray's line misses the circle entirely.
            return Vec::new();
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        let mut hits = Vec::new();
        if t1 >= 0.0 {
            hits.push(ray.at(t1));
        }
        // Tangent case: the two roots coincide, report a single point.
        if t2 >= 0.0 && (t2 - t1).abs() >= EPSILON {
            hits.push(ray.at(t2));
        }
        hits
    }

    fn translate(&mut self, by: &Vec2) {
        self.centre += by;
    }

    fn rotate(&mut self, _radians: f64) {
        // Rotationally symmetric.
    }

    fn into_any(self) -> AnyShape {
        AnyShape::Circle(self)
    }
}

/// A line segment from `start` to `end`.
///
/// The segment length is lazily cached like a vector's magnitude: any
/// endpoint mutation invalidates it, and a later read recomputes it once.
#[derive(Debug, Clone)]
pub struct Line {
    start: Vec2,
    end: Vec2,
    length: Cached<f64>,
    length_squared: Cached<f64>,
}

impl Line {
    pub fn new(start: Vec2, end: Vec2) -> Line {
        Line {
            start,
            end,
            length: Cached::new(),
            length_squared: Cached::new(),
        }
    }

    pub fn start(&self) -> &Vec2 {
        &self.start
    }
    pub fn end(&self) -> &Vec2 {
        &self.end
    }

    pub fn set_start(&mut self, start: Vec2) {
        self.start = start;
        self.invalidate();
    }
    pub fn set_end(&mut self, end: Vec2) {
        self.end = end;
        self.invalidate();
    }

    fn invalidate(&self) {
        self.length.invalidate();
        self.length_squared.invalidate();
    }

    /// The vector from `start` to `end`.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        &self.end - &self.start
    }

    pub fn length_squared(&self) -> f64 {
        self.length_squared
            .get_or_recompute(|| self.delta().magnitude_squared())
    }

    pub fn length(&self) -> f64 {
        self.length.get_or_recompute(|| self.length_squared().sqrt())
    }
}

impl Shape for Line {
    fn position(&self) -> Vec2 {
        self.start.clone()
    }

    // Solves origin + t*direction = start + u*(end - start) by Cramer's
    // rule on the 2x2 coefficient matrix [direction | -(end - start)].
    fn cast_ray(&self, ray: &Ray) -> Vec<Vec2> {
        let edge = self.delta();
        let coefficients = Mat2::from_rows([
            [ray.direction.x(), -edge.x()],
            [ray.direction.y(), -edge.y()],
        ]);
        let det = coefficients.det();
        if float::almost_zero(det) {
            // Ray and segment are parallel.
            return Vec::new();
        }

        let rhs = &self.start - &ray.origin;
        let t_numerator = Mat2::from_rows([[rhs.x(), -edge.x()], [rhs.y(), -edge.y()]]);
        let u_numerator = Mat2::from_rows([
            [ray.direction.x(), rhs.x()],
            [ray.direction.y(), rhs.y()],
        ]);
        let t = t_numerator.det() / det;
        let u = u_numerator.det() / det;

        if t >= 0.0 && (0.0..=1.0).contains(&u) {
            vec![ray.at(t)]
        } else {
            Vec::new()
        }
    }

    fn translate(&mut self, by: &Vec2) {
        self.start += by;
        self.end += by;
        self.invalidate();
    }

    fn rotate(&mut self, radians: f64) {
        // Rotate the delta vector about the (fixed) start point.
        let rotated = Mat2::rotation(radians) * self.delta();
        self.end = &self.start + &rotated;
        self.invalidate();
    }

    fn into_any(self) -> AnyShape {
        AnyShape::Line(self)
    }
}

/// A polygon given by an ordered cyclic sequence of local-space offsets
/// from its position. The last point connects back to the first.
#[derive(Debug, Clone)]
pub struct Polygon {
    position: Vec2,
    points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(position: Vec2, points: Vec<Vec2>) -> Polygon {
        Polygon { position, points }
    }

    /// The local-space offsets from [`position`](Shape::position).
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// The world-space vertices, in order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Vec2> {
        self.points.iter().map(|p| &self.position + p).collect()
    }
}

impl Shape for Polygon {
    fn position(&self) -> Vec2 {
        self.position.clone()
    }

    // Delegates to the Line algorithm edge by edge. Duplicate points are
    // reported as-is: a ray through a shared vertex hits both of its edges.
    fn cast_ray(&self, ray: &Ray) -> Vec<Vec2> {
        self.vertices()
            .into_iter()
            .circular_tuple_windows()
            .flat_map(|(u, v)| Line::new(u, v).cast_ray(ray))
            .collect()
    }

    fn translate(&mut self, by: &Vec2) {
        self.position += by;
    }

    fn rotate(&mut self, radians: f64) {
        let rotation = Mat2::rotation(radians);
        for point in &mut self.points {
            *point = rotation * &*point;
        }
    }

    fn into_any(self) -> AnyShape {
        AnyShape::Polygon(self)
    }
}

/// A rectangle: a [`Polygon`] constrained to four corners at
/// `(±width/2, ±height/2)`, re-derived whenever the width or height
/// changes (which also discards any accumulated corner rotation).
#[derive(Debug, Clone)]
pub struct Rect {
    polygon: Polygon,
    width: f64,
    height: f64,
}

impl Rect {
    pub fn new(centre: Vec2, width: f64, height: f64) -> Rect {
        let mut rv = Rect {
            polygon: Polygon::new(centre, Vec::new()),
            width,
            height,
        };
        rv.rederive_corners();
        rv
    }

    fn rederive_corners(&mut self) {
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        self.polygon.points = vec![
            Vec2::new(-half_width, -half_height),
            Vec2::new(half_width, -half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(-half_width, half_height),
        ];
    }

    pub fn width(&self) -> f64 {
        self.width
    }
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.rederive_corners();
    }
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.rederive_corners();
    }

    pub fn as_polygon(&self) -> &Polygon {
        &self.polygon
    }
}

impl Shape for Rect {
    fn position(&self) -> Vec2 {
        self.polygon.position()
    }

    fn cast_ray(&self, ray: &Ray) -> Vec<Vec2> {
        self.polygon.cast_ray(ray)
    }

    fn translate(&mut self, by: &Vec2) {
        self.polygon.translate(by);
    }

    fn rotate(&mut self, radians: f64) {
        self.polygon.rotate(radians);
    }

    fn into_any(self) -> AnyShape {
        AnyShape::Rect(self)
    }
}

/// A closed union over the shape variants, dispatching by match.
#[derive(Debug, Clone)]
pub enum AnyShape {
    Circle(Circle),
    Line(Line),
    Polygon(Polygon),
    Rect(Rect),
}

impl Shape for AnyShape {
    fn position(&self) -> Vec2 {
        match self {
            AnyShape::Circle(s) => s.position(),
            AnyShape::Line(s) => s.position(),
            AnyShape::Polygon(s) => s.position(),
            AnyShape::Rect(s) => s.position(),
        }
    }

    fn set_position(&mut self, position: Vec2) {
        match self {
            AnyShape::Circle(s) => s.set_position(position),
            AnyShape::Line(s) => s.set_position(position),
            AnyShape::Polygon(s) => s.set_position(position),
            AnyShape::Rect(s) => s.set_position(position),
        }
    }

    fn cast_ray(&self, ray: &Ray) -> Vec<Vec2> {
        match self {
            AnyShape::Circle(s) => s.cast_ray(ray),
            AnyShape::Line(s) => s.cast_ray(ray),
            AnyShape::Polygon(s) => s.cast_ray(ray),
            AnyShape::Rect(s) => s.cast_ray(ray),
        }
    }

    fn translate(&mut self, by: &Vec2) {
        match self {
            AnyShape::Circle(s) => s.translate(by),
            AnyShape::Line(s) => s.translate(by),
            AnyShape::Polygon(s) => s.translate(by),
            AnyShape::Rect(s) => s.translate(by),
        }
    }

    fn rotate(&mut self, radians: f64) {
        match self {
            AnyShape::Circle(s) => s.rotate(radians),
            AnyShape::Line(s) => s.rotate(radians),
            AnyShape::Polygon(s) => s.rotate(radians),
            AnyShape::Rect(s) => s.rotate(radians),
        }
    }

    fn into_any(self) -> AnyShape {
        self
    }
}
