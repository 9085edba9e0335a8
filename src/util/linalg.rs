#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::cache::Cached;
use crate::util::float;
use num_traits::Zero;
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A 2D vector with 64-bit floating point coordinates.
///
/// [`Vec2`] provides the usual vector operations (addition, subtraction,
/// scaling, dot and cross products) plus lazily cached derived quantities:
/// [`magnitude`](Vec2::magnitude) and [`direction`](Vec2::direction) are
/// computed at most once after each mutation and then served from a cache.
/// Because of the cache cells, [`Vec2`] is [`Clone`] but not [`Copy`], and a
/// single instance must not be mutated from multiple threads (see
/// [`Cached`]).
///
/// # Equality
/// Two vectors are considered equal if their components differ by less than
/// [`EPSILON`](crate::core::config::EPSILON). This handles floating point
/// imprecision while still ensuring reflexivity.
///
/// # Examples
///
/// ```
/// use glimmer::core::prelude::*;
///
/// let v1 = Vec2::new(3.0, 4.0);
/// let v2 = Vec2::new(1.0, 2.0);
///
/// assert_eq!(&v1 + &v2, Vec2::new(4.0, 6.0));
/// assert_eq!(v1.magnitude(), 5.0);
/// ```
#[derive(Default, Debug, Clone)]
pub struct Vec2 {
    x: f64,
    y: f64,
    magnitude: Cached<f64>,
    direction: Cached<f64>,
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        if self.is_finite() || other.is_finite() {
            (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
        } else {
            self.x == other.x && self.y == other.y
        }
    }
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Vec2 {
        Vec2 {
            x,
            y,
            magnitude: Cached::new(),
            direction: Cached::new(),
        }
    }

    /// Returns a unit vector pointing to the right (positive x-axis).
    #[must_use]
    pub fn right() -> Vec2 {
        Vec2::new(1.0, 0.0)
    }
    /// Returns a unit vector pointing upward (negative y-axis).
    ///
    /// Note: This follows a coordinate system where y increases downward,
    /// which is common in 2D graphics applications.
    #[must_use]
    pub fn up() -> Vec2 {
        Vec2::new(0.0, -1.0)
    }
    /// Returns a unit vector pointing to the left (negative x-axis).
    #[must_use]
    pub fn left() -> Vec2 {
        Vec2::new(-1.0, 0.0)
    }
    /// Returns a unit vector pointing downward (positive y-axis).
    ///
    /// Note: This follows a coordinate system where y increases downward,
    /// which is common in 2D graphics applications.
    #[must_use]
    pub fn down() -> Vec2 {
        Vec2::new(0.0, 1.0)
    }
    /// Returns a vector with both components set to 1.0.
    #[must_use]
    pub fn one() -> Vec2 {
        Vec2::new(1.0, 1.0)
    }
    /// Returns a vector with both components set to 0.0.
    #[must_use]
    pub fn zero() -> Vec2 {
        Vec2::new(0.0, 0.0)
    }

    /// Creates a new vector with both components set to the given value.
    #[must_use]
    pub fn splat(v: f64) -> Vec2 {
        Vec2::new(v, v)
    }

    pub fn x(&self) -> f64 {
        self.x
    }
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.set_components(x, self.y);
    }
    pub fn set_y(&mut self, y: f64) {
        self.set_components(self.x, y);
    }

    // All mutation funnels through here so the caches stay honest.
    fn set_components(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.magnitude.invalidate();
        self.direction.invalidate();
    }

    /// Returns the squared magnitude of the vector.
    ///
    /// A single fused expression, so it is recomputed on each call rather
    /// than cached; use this instead of [`magnitude`](Vec2::magnitude) when
    /// comparing lengths to avoid the square root.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the magnitude (Euclidean norm) of the vector.
    ///
    /// The result is cached until the next mutation of the vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use glimmer::core::prelude::*;
    /// let v = Vec2::new(3.0, 4.0);
    /// assert_eq!(v.magnitude(), 5.0);
    /// ```
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
            .get_or_recompute(|| self.magnitude_squared().sqrt())
    }

    /// Rescales the vector to the given magnitude along its current normal.
    ///
    /// A zero vector has no direction to rescale along; it is left unchanged
    /// and a warning is logged.
    pub fn set_magnitude(&mut self, magnitude: f64) {
        if self.is_zero() {
            warn!("set_magnitude() on zero vector, ignoring: {}", self);
            return;
        }
        let normal = self.normal();
        self.set_components(normal.x * magnitude, normal.y * magnitude);
    }

    /// Returns a normalised (unit) vector in the same direction as this
    /// vector.
    ///
    /// If the original vector's magnitude is zero, returns a zero vector to
    /// avoid division by zero. Also converts negative zero (-0.0) to
    /// positive zero (0.0) in both components.
    ///
    /// # Examples
    ///
    /// ```
    /// use glimmer::core::prelude::*;
    /// let v = Vec2::new(10.0, 0.0);
    /// assert_eq!(v.normal(), Vec2::right());
    /// assert_eq!(Vec2::zero().normal(), Vec2::zero());
    /// ```
    #[must_use]
    pub fn normal(&self) -> Vec2 {
        let rv = match self.magnitude() {
            0.0 => Vec2::zero(),
            magnitude => self / magnitude,
        };
        Vec2::new(
            float::force_positive_zero(rv.x),
            float::force_positive_zero(rv.y),
        )
    }

    /// Returns the angle of the vector in radians, measured from the
    /// positive x-axis as `atan2(y, x)`.
    ///
    /// The result is cached until the next mutation of the vector.
    #[must_use]
    pub fn direction(&self) -> f64 {
        self.direction.get_or_recompute(|| f64::atan2(self.y, self.x))
    }

    /// Re-derives the components from the current magnitude and the given
    /// angle. This is a projection rather than a pure setter: the magnitude
    /// is preserved exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use glimmer::core::prelude::*;
    /// let mut v = Vec2::new(3.0, 4.0);
    /// v.set_direction(0.0);
    /// assert_eq!(v, Vec2::new(5.0, 0.0));
    /// assert_eq!(v.magnitude(), 5.0);
    /// ```
    pub fn set_direction(&mut self, radians: f64) {
        let magnitude = self.magnitude();
        self.set_components(magnitude * f64::cos(radians), magnitude * f64::sin(radians));
        self.magnitude.put(magnitude);
        self.direction.put(radians);
    }

    /// Computes the dot product of two vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// use glimmer::core::prelude::*;
    /// let v1 = Vec2::new(2.0, 3.0);
    /// let v2 = Vec2::new(4.0, 5.0);
    /// assert_eq!(v1.dot(&v2), 23.0); // 2*4 + 3*5
    /// ```
    #[must_use]
    pub fn dot(&self, other: &Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product of two vectors.
    ///
    /// In 2D, the cross product is a scalar representing the signed area of
    /// the parallelogram formed by the two vectors.
    #[must_use]
    pub fn cross(&self, other: &Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns a new vector rotated anticlockwise by the given angle in
    /// radians (for the y-up reading; on screen with y down the rotation
    /// appears clockwise).
    #[must_use]
    pub fn rotated(&self, radians: f64) -> Vec2 {
        crate::util::matrix::Mat2::rotation(radians) * self
    }

    /// Computes the Euclidean distance between two points.
    #[must_use]
    pub fn dist(&self, other: &Vec2) -> f64 {
        (other - self).magnitude()
    }

    /// Computes the squared Euclidean distance between two points.
    #[must_use]
    pub fn dist_squared(&self, other: &Vec2) -> f64 {
        (other - self).magnitude_squared()
    }

    /// Linearly interpolates between this vector and another vector.
    /// `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(&self, to: &Vec2, t: f64) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2::new(float::lerp(self.x, to.x, t), float::lerp(self.y, to.y, t))
    }

    /// Checks if the vector is approximately equal to another vector:
    /// the magnitude of their difference is less than
    /// [`EPSILON`](crate::core::config::EPSILON).
    pub fn almost_eq(&self, rhs: &Vec2) -> bool {
        (self - rhs).magnitude() < EPSILON
    }

    pub fn is_finite(&self) -> bool {
        float::is_finite(self.x) && float::is_finite(self.y)
    }

    /// Explicit conversion for the single-precision rendering boundary.
    #[must_use]
    pub fn to_f32_array(&self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Vec2::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(&Self::zero())
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(value: [f64; 2]) -> Self {
        Vec2::new(value[0], value[1])
    }
}

impl From<Vec2> for [f64; 2] {
    fn from(value: Vec2) -> Self {
        [value.x, value.y]
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision();

        write!(f, "vec(")?;
        if let Some(p) = precision {
            write!(f, "{0:.1$}", self.x, p)?;
            write!(f, ", {0:.1$}", self.y, p)?;
        } else {
            write!(f, "{}, {}", self.x, self.y)?;
        }
        write!(f, ")")
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Add<&Vec2> for &Vec2 {
    type Output = Vec2;

    fn add(self, rhs: &Vec2) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl AddAssign<Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.set_components(self.x + rhs.x, self.y + rhs.y);
    }
}
impl AddAssign<&Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: &Vec2) {
        self.set_components(self.x + rhs.x, self.y + rhs.y);
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Sub<&Vec2> for &Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: &Vec2) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.set_components(self.x - rhs.x, self.y - rhs.y);
    }
}
impl SubAssign<&Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: &Vec2) {
        self.set_components(self.x - rhs.x, self.y - rhs.y);
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2::new(-self.x, -self.y)
    }
}
impl Neg for &Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2::new(-self.x, -self.y)
    }
}

impl Sum<Vec2> for Vec2 {
    fn sum<I: Iterator<Item = Vec2>>(iter: I) -> Self {
        iter.fold(Vec2::zero(), Vec2::add)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Self::Output {
        rhs * &self
    }
}
impl Mul<f64> for &Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Self::Output {
        rhs * self
    }
}
impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        self * &rhs
    }
}
impl Mul<&Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: &Vec2) -> Self::Output {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}
impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.set_components(self.x * rhs, self.y * rhs);
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}
impl Div<f64> for &Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}
impl DivAssign<f64> for Vec2 {
    fn div_assign(&mut self, rhs: f64) {
        self.set_components(self.x / rhs, self.y / rhs);
    }
}

/// A 3D vector with 64-bit floating point coordinates.
///
/// Like [`Vec2`], the [`magnitude`](Vec3::magnitude) is lazily cached and
/// invalidated by any component mutation, so the type is [`Clone`] but not
/// [`Copy`].
#[derive(Default, Debug, Clone)]
pub struct Vec3 {
    x: f64,
    y: f64,
    z: f64,
    magnitude: Cached<f64>,
}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        if self.is_finite() || other.is_finite() {
            (self.x - other.x).abs() < EPSILON
                && (self.y - other.y).abs() < EPSILON
                && (self.z - other.z).abs() < EPSILON
        } else {
            self.x == other.x && self.y == other.y && self.z == other.z
        }
    }
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 {
            x,
            y,
            z,
            magnitude: Cached::new(),
        }
    }

    #[must_use]
    pub fn zero() -> Vec3 {
        Vec3::new(0.0, 0.0, 0.0)
    }
    #[must_use]
    pub fn one() -> Vec3 {
        Vec3::new(1.0, 1.0, 1.0)
    }
    #[must_use]
    pub fn splat(v: f64) -> Vec3 {
        Vec3::new(v, v, v)
    }

    pub fn x(&self) -> f64 {
        self.x
    }
    pub fn y(&self) -> f64 {
        self.y
    }
    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn set_x(&mut self, x: f64) {
        self.set_components(x, self.y, self.z);
    }
    pub fn set_y(&mut self, y: f64) {
        self.set_components(self.x, y, self.z);
    }
    pub fn set_z(&mut self, z: f64) {
        self.set_components(self.x, self.y, z);
    }

    fn set_components(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.magnitude.invalidate();
    }

    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the magnitude of the vector, cached until the next mutation.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
            .get_or_recompute(|| self.magnitude_squared().sqrt())
    }

    /// Rescales the vector to the given magnitude along its current normal.
    /// A zero vector is left unchanged (with a warning).
    pub fn set_magnitude(&mut self, magnitude: f64) {
        if self.is_zero() {
            warn!("set_magnitude() on zero vector, ignoring: {}", self);
            return;
        }
        let normal = self.normal();
        self.set_components(
            normal.x * magnitude,
            normal.y * magnitude,
            normal.z * magnitude,
        );
    }

    /// Returns a normalised (unit) vector in the same direction as this
    /// vector; a zero vector normalises to the zero vector.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        let rv = match self.magnitude() {
            0.0 => Vec3::zero(),
            magnitude => self / magnitude,
        };
        Vec3::new(
            float::force_positive_zero(rv.x),
            float::force_positive_zero(rv.y),
            float::force_positive_zero(rv.z),
        )
    }

    #[must_use]
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product, a vector orthogonal to both inputs
    /// following the right-hand rule: `a.cross(b) == -(b.cross(a))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use glimmer::core::prelude::*;
    /// let x = Vec3::new(1.0, 0.0, 0.0);
    /// let y = Vec3::new(0.0, 1.0, 0.0);
    /// assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
    /// ```
    #[must_use]
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn almost_eq(&self, rhs: &Vec3) -> bool {
        (self - rhs).magnitude() < EPSILON
    }

    pub fn is_finite(&self) -> bool {
        float::is_finite(self.x) && float::is_finite(self.y) && float::is_finite(self.z)
    }

    /// Explicit conversion for the single-precision rendering boundary.
    #[must_use]
    pub fn to_f32_array(&self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

impl Zero for Vec3 {
    fn zero() -> Self {
        Vec3::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(&Self::zero())
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(value: [f64; 3]) -> Self {
        Vec3::new(value[0], value[1], value[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(value: Vec3) -> Self {
        [value.x, value.y, value.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl Add<&Vec3> for &Vec3 {
    type Output = Vec3;

    fn add(self, rhs: &Vec3) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.set_components(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z);
    }
}

impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl Sub<&Vec3> for &Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: &Vec3) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl SubAssign<Vec3> for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        self.set_components(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z);
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}
impl Neg for &Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Sum<Vec3> for Vec3 {
    fn sum<I: Iterator<Item = Vec3>>(iter: I) -> Self {
        iter.fold(Vec3::zero(), Vec3::add)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        rhs * &self
    }
}
impl Mul<f64> for &Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        rhs * self
    }
}
impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self * &rhs
    }
}
impl Mul<&Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: &Vec3) -> Self::Output {
        Vec3::new(self * rhs.x, self * rhs.y, self * rhs.z)
    }
}
impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.set_components(self.x * rhs, self.y * rhs, self.z * rhs);
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
impl Div<f64> for &Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        self.set_components(self.x / rhs, self.y / rhs, self.z / rhs);
    }
}

/// A 4D vector, mostly used for homogeneous coordinates:
/// [`Mat4`](crate::util::matrix::Mat4) rows and columns, and points passed
/// through a 4x4 transform.
#[derive(Default, Debug, Clone)]
pub struct Vec4 {
    x: f64,
    y: f64,
    z: f64,
    w: f64,
    magnitude: Cached<f64>,
}

impl PartialEq for Vec4 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
            && (self.w - other.w).abs() < EPSILON
    }
}

impl Vec4 {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Vec4 {
        Vec4 {
            x,
            y,
            z,
            w,
            magnitude: Cached::new(),
        }
    }

    #[must_use]
    pub fn zero() -> Vec4 {
        Vec4::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Lifts a [`Vec3`] into homogeneous coordinates with the given w.
    #[must_use]
    pub fn from_vec3(v: &Vec3, w: f64) -> Vec4 {
        Vec4::new(v.x(), v.y(), v.z(), w)
    }

    pub fn x(&self) -> f64 {
        self.x
    }
    pub fn y(&self) -> f64 {
        self.y
    }
    pub fn z(&self) -> f64 {
        self.z
    }
    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
        self.magnitude.invalidate();
    }
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
        self.magnitude.invalidate();
    }
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
        self.magnitude.invalidate();
    }
    pub fn set_w(&mut self, w: f64) {
        self.w = w;
        self.magnitude.invalidate();
    }

    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
            .get_or_recompute(|| self.magnitude_squared().sqrt())
    }

    #[must_use]
    pub fn dot(&self, other: &Vec4) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Drops the w component.
    #[must_use]
    pub fn truncate(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn almost_eq(&self, rhs: &Vec4) -> bool {
        (self - rhs).magnitude() < EPSILON
    }

    /// Explicit conversion for the single-precision rendering boundary.
    #[must_use]
    pub fn to_f32_array(&self) -> [f32; 4] {
        [self.x as f32, self.y as f32, self.z as f32, self.w as f32]
    }
}

impl From<[f64; 4]> for Vec4 {
    fn from(value: [f64; 4]) -> Self {
        Vec4::new(value[0], value[1], value[2], value[3])
    }
}

impl From<Vec4> for [f64; 4] {
    fn from(value: Vec4) -> Self {
        [value.x, value.y, value.z, value.w]
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl Add<Vec4> for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Self::Output {
        Vec4::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}
impl Add<&Vec4> for &Vec4 {
    type Output = Vec4;

    fn add(self, rhs: &Vec4) -> Self::Output {
        Vec4::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl Sub<Vec4> for Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: Vec4) -> Self::Output {
        Vec4::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}
impl Sub<&Vec4> for &Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: &Vec4) -> Self::Output {
        Vec4::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl Neg for Vec4 {
    type Output = Vec4;

    fn neg(self) -> Self::Output {
        Vec4::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec4::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}
impl Mul<Vec4> for f64 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Self::Output {
        rhs * self
    }
}

impl Div<f64> for Vec4 {
    type Output = Vec4;

    fn div(self, rhs: f64) -> Self::Output {
        Vec4::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}
