#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::float;
use crate::util::linalg::{Vec2, Vec3, Vec4};
use num_traits::{One, Zero};
use std::ops::{Add, Div, DivAssign, Mul, MulAssign, Neg, Sub};

/// A 2x2 matrix with row-major element storage.
///
/// Elements are addressed by 0-indexed `(row, column)` pairs; out-of-range
/// access fails rather than clamping. Matrices carry no lazily derived
/// state, so unlike the vector types they are plain [`Copy`] values.
///
/// # Equality
/// Element-wise comparison within
/// [`EPSILON`](crate::core::config::EPSILON).
///
/// # Examples
///
/// ```
/// use glimmer::core::prelude::*;
///
/// let m = Mat2::from_rows([[2.0, 5.0], [4.0, 8.0]]);
/// assert_eq!(m.det(), -4.0);
/// ```
#[derive(Debug, Copy, Clone)]
#[must_use]
pub struct Mat2 {
    elements: [f64; 4],
}

impl Mat2 {
    const N: usize = 2;

    const fn idx(row: usize, col: usize) -> usize {
        row * Self::N + col
    }

    pub fn from_rows(rows: [[f64; 2]; 2]) -> Mat2 {
        Mat2 {
            elements: [rows[0][0], rows[0][1], rows[1][0], rows[1][1]],
        }
    }

    /// Creates an identity matrix.
    pub fn one() -> Mat2 {
        Mat2::from_rows([[1.0, 0.0], [0.0, 1.0]])
    }

    /// Creates a zero matrix.
    pub fn zero() -> Mat2 {
        Mat2 {
            elements: [0.0; 4],
        }
    }

    /// Creates a rotation matrix:
    /// ```text
    /// | cos(θ)  -sin(θ) |
    /// | sin(θ)   cos(θ) |
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use glimmer::core::prelude::*;
    ///
    /// let rot = Mat2::rotation(std::f64::consts::FRAC_PI_2);
    /// let v = Vec2::new(1.0, 0.0);
    /// assert!((rot * v).almost_eq(&Vec2::new(0.0, 1.0)));
    /// ```
    pub fn rotation(radians: f64) -> Mat2 {
        Mat2::from_rows([
            [f64::cos(radians), -f64::sin(radians)],
            [f64::sin(radians), f64::cos(radians)],
        ])
    }

    /// Returns the element at the given 0-indexed `(row, column)`.
    /// Fails if either index is out of range.
    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        if row >= Self::N || col >= Self::N {
            bail!("Mat2: index out of range: ({row}, {col})");
        }
        Ok(self.elements[Self::idx(row, col)])
    }

    /// Replaces the element at the given 0-indexed `(row, column)`.
    /// Fails if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= Self::N || col >= Self::N {
            bail!("Mat2: index out of range: ({row}, {col})");
        }
        self.elements[Self::idx(row, col)] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<Vec2> {
        Ok(Vec2::new(self.at(row, 0)?, self.at(row, 1)?))
    }

    pub fn col(&self, col: usize) -> Result<Vec2> {
        Ok(Vec2::new(self.at(0, col)?, self.at(1, col)?))
    }

    /// Calculates the determinant by the explicit 2x2 formula.
    pub fn det(&self) -> f64 {
        self.elements[0] * self.elements[3] - self.elements[1] * self.elements[2]
    }

    pub fn transposed(&self) -> Mat2 {
        Mat2 {
            elements: [
                self.elements[0],
                self.elements[2],
                self.elements[1],
                self.elements[3],
            ],
        }
    }

    /// The cofactor matrix: each element replaced by the determinant of its
    /// minor, with the alternating `(row + column)` parity sign. For a 2x2
    /// the minors are single elements.
    pub fn cofactor(&self) -> Mat2 {
        Mat2 {
            elements: [
                self.elements[3],
                -self.elements[2],
                -self.elements[1],
                self.elements[0],
            ],
        }
    }

    /// The inverse, `transpose(cofactor) / det`. Fails if the determinant is
    /// within [`EPSILON`](crate::core::config::EPSILON) of zero.
    pub fn inverse(&self) -> Result<Mat2> {
        let det = self.det();
        if float::almost_zero(det) {
            bail!("Mat2: singular matrix: det = {det}");
        }
        Ok(self.cofactor().transposed() / det)
    }

    pub fn almost_eq(&self, rhs: &Mat2) -> bool {
        self.elements
            .iter()
            .zip(rhs.elements.iter())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }

    /// Explicit conversion for the single-precision rendering boundary.
    #[must_use]
    pub fn to_f32_row_major(&self) -> [f32; 4] {
        self.elements.map(|e| e as f32)
    }
}

impl PartialEq for Mat2 {
    fn eq(&self, other: &Self) -> bool {
        self.almost_eq(other)
    }
}

impl One for Mat2 {
    fn one() -> Self {
        Self::one()
    }
}

impl Zero for Mat2 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(&Self::zero())
    }
}

impl Add<Mat2> for Mat2 {
    type Output = Mat2;

    fn add(self, rhs: Mat2) -> Self::Output {
        let mut elements = self.elements;
        for (e, rhs) in elements.iter_mut().zip(rhs.elements) {
            *e += rhs;
        }
        Mat2 { elements }
    }
}

impl Sub<Mat2> for Mat2 {
    type Output = Mat2;

    fn sub(self, rhs: Mat2) -> Self::Output {
        let mut elements = self.elements;
        for (e, rhs) in elements.iter_mut().zip(rhs.elements) {
            *e -= rhs;
        }
        Mat2 { elements }
    }
}

impl Neg for Mat2 {
    type Output = Mat2;

    fn neg(self) -> Self::Output {
        Mat2 {
            elements: self.elements.map(|e| -e),
        }
    }
}

impl Mul<f64> for Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: f64) -> Self::Output {
        Mat2 {
            elements: self.elements.map(|e| rhs * e),
        }
    }
}
impl Mul<Mat2> for f64 {
    type Output = Mat2;

    fn mul(self, rhs: Mat2) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<f64> for Mat2 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Div<f64> for Mat2 {
    type Output = Mat2;

    fn div(self, rhs: f64) -> Self::Output {
        Mat2 {
            elements: self.elements.map(|e| e / rhs),
        }
    }
}
impl DivAssign<f64> for Mat2 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl Mul<Mat2> for Mat2 {
    type Output = Mat2;

    fn mul(self, rhs: Mat2) -> Self::Output {
        let mut elements = [0.0; 4];
        for row in 0..2 {
            for col in 0..2 {
                for k in 0..2 {
                    elements[Self::idx(row, col)] +=
                        self.elements[Self::idx(row, k)] * rhs.elements[Self::idx(k, col)];
                }
            }
        }
        Mat2 { elements }
    }
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        self * &rhs
    }
}
impl Mul<&Vec2> for Mat2 {
    type Output = Vec2;

    fn mul(self, rhs: &Vec2) -> Self::Output {
        Vec2::new(
            self.elements[0] * rhs.x() + self.elements[1] * rhs.y(),
            self.elements[2] * rhs.x() + self.elements[3] * rhs.y(),
        )
    }
}

/// A 3x3 matrix with row-major element storage.
///
/// The determinant is computed by cofactor expansion along row 0, recursing
/// into 2x2 minors; the 4x4 determinant recurses into this one in turn.
#[derive(Debug, Copy, Clone)]
#[must_use]
pub struct Mat3 {
    elements: [f64; 9],
}

impl Mat3 {
    const N: usize = 3;

    const fn idx(row: usize, col: usize) -> usize {
        row * Self::N + col
    }

    pub fn from_rows(rows: [[f64; 3]; 3]) -> Mat3 {
        let mut elements = [0.0; 9];
        for (row, row_elements) in rows.iter().enumerate() {
            elements[Self::idx(row, 0)..=Self::idx(row, 2)].copy_from_slice(row_elements);
        }
        Mat3 { elements }
    }

    /// Creates an identity matrix.
    pub fn one() -> Mat3 {
        Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Creates a zero matrix.
    pub fn zero() -> Mat3 {
        Mat3 {
            elements: [0.0; 9],
        }
    }

    /// Creates a rotation about the x-axis.
    pub fn rotation_x(radians: f64) -> Mat3 {
        let (sin, cos) = radians.sin_cos();
        Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]])
    }

    /// Creates a rotation about the y-axis.
    pub fn rotation_y(radians: f64) -> Mat3 {
        let (sin, cos) = radians.sin_cos();
        Mat3::from_rows([[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]])
    }

    /// Creates a rotation about the z-axis.
    pub fn rotation_z(radians: f64) -> Mat3 {
        let (sin, cos) = radians.sin_cos();
        Mat3::from_rows([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Creates a combined rotation about all three axes, composed as
    /// `Rz * Ry * Rx` (x applied first).
    pub fn rotation(x_radians: f64, y_radians: f64, z_radians: f64) -> Mat3 {
        Mat3::rotation_z(z_radians) * Mat3::rotation_y(y_radians) * Mat3::rotation_x(x_radians)
    }

    /// Returns the element at the given 0-indexed `(row, column)`.
    /// Fails if either index is out of range.
    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        if row >= Self::N || col >= Self::N {
            bail!("Mat3: index out of range: ({row}, {col})");
        }
        Ok(self.elements[Self::idx(row, col)])
    }

    /// Replaces the element at the given 0-indexed `(row, column)`.
    /// Fails if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= Self::N || col >= Self::N {
            bail!("Mat3: index out of range: ({row}, {col})");
        }
        self.elements[Self::idx(row, col)] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<Vec3> {
        Ok(Vec3::new(
            self.at(row, 0)?,
            self.at(row, 1)?,
            self.at(row, 2)?,
        ))
    }

    pub fn col(&self, col: usize) -> Result<Vec3> {
        Ok(Vec3::new(
            self.at(0, col)?,
            self.at(1, col)?,
            self.at(2, col)?,
        ))
    }

    // Callers guarantee the indices are in range.
    fn minor_unchecked(&self, row: usize, col: usize) -> Mat2 {
        let mut elements = [0.0; 4];
        let mut k = 0;
        for r in 0..Self::N {
            if r == row {
                continue;
            }
            for c in 0..Self::N {
                if c == col {
                    continue;
                }
                elements[k] = self.elements[Self::idx(r, c)];
                k += 1;
            }
        }
        Mat2 { elements }
    }

    /// The 2x2 minor obtained by deleting the given row and column.
    pub fn minor(&self, row: usize, col: usize) -> Result<Mat2> {
        if row >= Self::N || col >= Self::N {
            bail!("Mat3: index out of range: ({row}, {col})");
        }
        Ok(self.minor_unchecked(row, col))
    }

    /// Calculates the determinant by cofactor expansion along row 0.
    pub fn det(&self) -> f64 {
        (0..Self::N)
            .map(|col| {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                sign * self.elements[Self::idx(0, col)] * self.minor_unchecked(0, col).det()
            })
            .sum()
    }

    pub fn transposed(&self) -> Mat3 {
        let mut elements = [0.0; 9];
        for row in 0..Self::N {
            for col in 0..Self::N {
                elements[Self::idx(col, row)] = self.elements[Self::idx(row, col)];
            }
        }
        Mat3 { elements }
    }

    /// The cofactor matrix: each element replaced by the determinant of its
    /// 2x2 minor, with the alternating `(row + column)` parity sign.
    pub fn cofactor(&self) -> Mat3 {
        let mut elements = [0.0; 9];
        for row in 0..Self::N {
            for col in 0..Self::N {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                elements[Self::idx(row, col)] = sign * self.minor_unchecked(row, col).det();
            }
        }
        Mat3 { elements }
    }

    /// The inverse, `transpose(cofactor) / det`. Fails if the determinant is
    /// within [`EPSILON`](crate::core::config::EPSILON) of zero.
    pub fn inverse(&self) -> Result<Mat3> {
        let det = self.det();
        if float::almost_zero(det) {
            bail!("Mat3: singular matrix: det = {det}");
        }
        Ok(self.cofactor().transposed() / det)
    }

    pub fn almost_eq(&self, rhs: &Mat3) -> bool {
        self.elements
            .iter()
            .zip(rhs.elements.iter())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }

    /// Explicit conversion for the single-precision rendering boundary.
    #[must_use]
    pub fn to_f32_row_major(&self) -> [f32; 9] {
        self.elements.map(|e| e as f32)
    }
}

impl PartialEq for Mat3 {
    fn eq(&self, other: &Self) -> bool {
        self.almost_eq(other)
    }
}

impl One for Mat3 {
    fn one() -> Self {
        Self::one()
    }
}

impl Zero for Mat3 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(&Self::zero())
    }
}

impl Add<Mat3> for Mat3 {
    type Output = Mat3;

    fn add(self, rhs: Mat3) -> Self::Output {
        let mut elements = self.elements;
        for (e, rhs) in elements.iter_mut().zip(rhs.elements) {
            *e += rhs;
        }
        Mat3 { elements }
    }
}

impl Sub<Mat3> for Mat3 {
    type Output = Mat3;

    fn sub(self, rhs: Mat3) -> Self::Output {
        let mut elements = self.elements;
        for (e, rhs) in elements.iter_mut().zip(rhs.elements) {
            *e -= rhs;
        }
        Mat3 { elements }
    }
}

impl Neg for Mat3 {
    type Output = Mat3;

    fn neg(self) -> Self::Output {
        Mat3 {
            elements: self.elements.map(|e| -e),
        }
    }
}

impl Mul<f64> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: f64) -> Self::Output {
        Mat3 {
            elements: self.elements.map(|e| rhs * e),
        }
    }
}
impl Mul<Mat3> for f64 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<f64> for Mat3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Div<f64> for Mat3 {
    type Output = Mat3;

    fn div(self, rhs: f64) -> Self::Output {
        Mat3 {
            elements: self.elements.map(|e| e / rhs),
        }
    }
}
impl DivAssign<f64> for Mat3 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut elements = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                for k in 0..3 {
                    elements[Self::idx(row, col)] +=
                        self.elements[Self::idx(row, k)] * rhs.elements[Self::idx(k, col)];
                }
            }
        }
        Mat3 { elements }
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self * &rhs
    }
}
impl Mul<&Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, rhs: &Vec3) -> Self::Output {
        let row_dot = |row: usize| {
            self.elements[Self::idx(row, 0)] * rhs.x()
                + self.elements[Self::idx(row, 1)] * rhs.y()
                + self.elements[Self::idx(row, 2)] * rhs.z()
        };
        Vec3::new(row_dot(0), row_dot(1), row_dot(2))
    }
}

/// A 4x4 matrix with row-major element storage, used for homogeneous 3D
/// transforms: model, view (look-at) and projection matrices.
///
/// The determinant and inverse recurse through 3x3 minors into 2x2
/// determinants, preserving the cofactor-expansion structure end to end.
#[derive(Debug, Copy, Clone)]
#[must_use]
pub struct Mat4 {
    elements: [f64; 16],
}

impl Mat4 {
    const N: usize = 4;

    const fn idx(row: usize, col: usize) -> usize {
        row * Self::N + col
    }

    pub fn from_rows(rows: [[f64; 4]; 4]) -> Mat4 {
        let mut elements = [0.0; 16];
        for (row, row_elements) in rows.iter().enumerate() {
            elements[Self::idx(row, 0)..=Self::idx(row, 3)].copy_from_slice(row_elements);
        }
        Mat4 { elements }
    }

    /// Creates an identity matrix.
    pub fn one() -> Mat4 {
        Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a zero matrix.
    pub fn zero() -> Mat4 {
        Mat4 {
            elements: [0.0; 16],
        }
    }

    /// Creates a translation matrix, translation in the last column:
    /// ```text
    /// | 1 0 0 dx |
    /// | 0 1 0 dy |
    /// | 0 0 1 dz |
    /// | 0 0 0 1  |
    /// ```
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Mat4 {
        Mat4::from_rows([
            [1.0, 0.0, 0.0, dx],
            [0.0, 1.0, 0.0, dy],
            [0.0, 0.0, 1.0, dz],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix from a [`Vec3`].
    pub fn translation_vec3(delta: &Vec3) -> Mat4 {
        Self::translation(delta.x(), delta.y(), delta.z())
    }

    /// Embeds a 3x3 linear transform (e.g. a [`Mat3`] rotation) in the
    /// upper-left block of a homogeneous 4x4 matrix.
    pub fn from_mat3(m: &Mat3) -> Mat4 {
        let mut rv = Mat4::one();
        for row in 0..3 {
            for col in 0..3 {
                rv.elements[Self::idx(row, col)] = m.elements[Mat3::idx(row, col)];
            }
        }
        rv
    }

    /// Creates a view matrix looking from `eye` towards `target`.
    ///
    /// The camera basis is built Gram-Schmidt style from the forward vector
    /// and `up` via cross products; `up` need not be orthogonal to the view
    /// direction, only non-parallel to it.
    pub fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
        let forward = (target - eye).normal();
        let side = forward.cross(up).normal();
        let up = side.cross(&forward);
        Mat4::from_rows([
            [side.x(), side.y(), side.z(), -side.dot(eye)],
            [up.x(), up.y(), up.z(), -up.dot(eye)],
            [-forward.x(), -forward.y(), -forward.z(), forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a perspective projection matrix.
    ///
    /// `fov_y` is the vertical field of view in radians; the near and far
    /// planes map to depths -1 and +1 (left-multiply
    /// [`clip_correction`](Mat4::clip_correction) for the Vulkan-style
    /// convention).
    pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
        let tan_half_fov = (fov_y / 2.0).tan();
        Mat4::from_rows([
            [1.0 / (aspect * tan_half_fov), 0.0, 0.0, 0.0],
            [0.0, 1.0 / tan_half_fov, 0.0, 0.0],
            [
                0.0,
                0.0,
                -(far + near) / (far - near),
                -(2.0 * far * near) / (far - near),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates an orthographic projection matrix over the given box.
    pub fn orthographic(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Mat4 {
        Mat4::from_rows([
            [
                2.0 / (right - left),
                0.0,
                0.0,
                -(right + left) / (right - left),
            ],
            [
                0.0,
                2.0 / (top - bottom),
                0.0,
                -(top + bottom) / (top - bottom),
            ],
            [0.0, 0.0, -2.0 / (far - near), -(far + near) / (far - near)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// The clip-space correction for Vulkan-style conventions: flips y and
    /// remaps depth from [-1, 1] to [0, 1]. Apply by left-multiplication
    /// onto a projection matrix:
    ///
    /// ```
    /// use glimmer::core::prelude::*;
    ///
    /// let proj = Mat4::clip_correction()
    ///     * Mat4::perspective(std::f64::consts::FRAC_PI_2, 16.0 / 9.0, 0.1, 100.0);
    /// ```
    pub fn clip_correction() -> Mat4 {
        Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, -1.0, 0.0, 0.0],
            [0.0, 0.0, 0.5, 0.5],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns the element at the given 0-indexed `(row, column)`.
    /// Fails if either index is out of range.
    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        if row >= Self::N || col >= Self::N {
            bail!("Mat4: index out of range: ({row}, {col})");
        }
        Ok(self.elements[Self::idx(row, col)])
    }

    /// Replaces the element at the given 0-indexed `(row, column)`.
    /// Fails if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= Self::N || col >= Self::N {
            bail!("Mat4: index out of range: ({row}, {col})");
        }
        self.elements[Self::idx(row, col)] = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<Vec4> {
        Ok(Vec4::new(
            self.at(row, 0)?,
            self.at(row, 1)?,
            self.at(row, 2)?,
            self.at(row, 3)?,
        ))
    }

    pub fn col(&self, col: usize) -> Result<Vec4> {
        Ok(Vec4::new(
            self.at(0, col)?,
            self.at(1, col)?,
            self.at(2, col)?,
            self.at(3, col)?,
        ))
    }

    // Callers guarantee the indices are in range.
    fn minor_unchecked(&self, row: usize, col: usize) -> Mat3 {
        let mut elements = [0.0; 9];
        let mut k = 0;
        for r in 0..Self::N {
            if r == row {
                continue;
            }
            for c in 0..Self::N {
                if c == col {
                    continue;
                }
                elements[k] = self.elements[Self::idx(r, c)];
                k += 1;
            }
        }
        Mat3 { elements }
    }

    /// The 3x3 minor obtained by deleting the given row and column.
    pub fn minor(&self, row: usize, col: usize) -> Result<Mat3> {
        if row >= Self::N || col >= Self::N {
            bail!("Mat4: index out of range: ({row}, {col})");
        }
        Ok(self.minor_unchecked(row, col))
    }

    /// Calculates the determinant by cofactor expansion along row 0,
    /// recursing through the 3x3 minors (and their 2x2 minors in turn).
    pub fn det(&self) -> f64 {
        (0..Self::N)
            .map(|col| {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                sign * self.elements[Self::idx(0, col)] * self.minor_unchecked(0, col).det()
            })
            .sum()
    }

    pub fn transposed(&self) -> Mat4 {
        let mut elements = [0.0; 16];
        for row in 0..Self::N {
            for col in 0..Self::N {
                elements[Self::idx(col, row)] = self.elements[Self::idx(row, col)];
            }
        }
        Mat4 { elements }
    }

    /// The cofactor matrix: each element replaced by the determinant of its
    /// 3x3 minor, with the alternating `(row + column)` parity sign.
    pub fn cofactor(&self) -> Mat4 {
        let mut elements = [0.0; 16];
        for row in 0..Self::N {
            for col in 0..Self::N {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                elements[Self::idx(row, col)] = sign * self.minor_unchecked(row, col).det();
            }
        }
        Mat4 { elements }
    }

    /// The inverse, `transpose(cofactor) / det`. Fails if the determinant is
    /// within [`EPSILON`](crate::core::config::EPSILON) of zero.
    pub fn inverse(&self) -> Result<Mat4> {
        let det = self.det();
        if float::almost_zero(det) {
            bail!("Mat4: singular matrix: det = {det}");
        }
        Ok(self.cofactor().transposed() / det)
    }

    /// Transforms a point in homogeneous coordinates (w = 1), performing the
    /// perspective divide when the resulting w is meaningful.
    #[must_use]
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let transformed = *self * Vec4::from_vec3(point, 1.0);
        let w = transformed.w();
        if float::almost_zero(w) {
            transformed.truncate()
        } else {
            transformed.truncate() / w
        }
    }

    pub fn almost_eq(&self, rhs: &Mat4) -> bool {
        self.elements
            .iter()
            .zip(rhs.elements.iter())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }

    /// Explicit conversion for the single-precision rendering boundary,
    /// elements in row-major order.
    #[must_use]
    pub fn to_f32_row_major(&self) -> [f32; 16] {
        self.elements.map(|e| e as f32)
    }

    /// Explicit conversion for the single-precision rendering boundary,
    /// elements in column-major order (the layout Vulkan-style APIs expect).
    #[must_use]
    pub fn to_f32_column_major(&self) -> [f32; 16] {
        self.transposed().to_f32_row_major()
    }
}

impl PartialEq for Mat4 {
    fn eq(&self, other: &Self) -> bool {
        self.almost_eq(other)
    }
}

impl One for Mat4 {
    fn one() -> Self {
        Self::one()
    }
}

impl Zero for Mat4 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(&Self::zero())
    }
}

impl Add<Mat4> for Mat4 {
    type Output = Mat4;

    fn add(self, rhs: Mat4) -> Self::Output {
        let mut elements = self.elements;
        for (e, rhs) in elements.iter_mut().zip(rhs.elements) {
            *e += rhs;
        }
        Mat4 { elements }
    }
}

impl Sub<Mat4> for Mat4 {
    type Output = Mat4;

    fn sub(self, rhs: Mat4) -> Self::Output {
        let mut elements = self.elements;
        for (e, rhs) in elements.iter_mut().zip(rhs.elements) {
            *e -= rhs;
        }
        Mat4 { elements }
    }
}

impl Neg for Mat4 {
    type Output = Mat4;

    fn neg(self) -> Self::Output {
        Mat4 {
            elements: self.elements.map(|e| -e),
        }
    }
}

impl Mul<f64> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: f64) -> Self::Output {
        Mat4 {
            elements: self.elements.map(|e| rhs * e),
        }
    }
}
impl Mul<Mat4> for f64 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        rhs * self
    }
}
impl MulAssign<f64> for Mat4 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Div<f64> for Mat4 {
    type Output = Mat4;

    fn div(self, rhs: f64) -> Self::Output {
        Mat4 {
            elements: self.elements.map(|e| e / rhs),
        }
    }
}
impl DivAssign<f64> for Mat4 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut elements = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                for k in 0..4 {
                    elements[Self::idx(row, col)] +=
                        self.elements[Self::idx(row, k)] * rhs.elements[Self::idx(k, col)];
                }
            }
        }
        Mat4 { elements }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Self::Output {
        self * &rhs
    }
}
impl Mul<&Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: &Vec4) -> Self::Output {
        let row_dot = |row: usize| {
            self.elements[Self::idx(row, 0)] * rhs.x()
                + self.elements[Self::idx(row, 1)] * rhs.y()
                + self.elements[Self::idx(row, 2)] * rhs.z()
                + self.elements[Self::idx(row, 3)] * rhs.w()
        };
        Vec4::new(row_dot(0), row_dot(1), row_dot(2), row_dot(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

    // ==================== Element Access ====================

    #[test]
    fn mat2_element_access() {
        let mut m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.at(0, 1).unwrap(), 2.0);
        assert_eq!(m.at(1, 0).unwrap(), 3.0);
        m.set(1, 1, 9.0).unwrap();
        assert_eq!(m.at(1, 1).unwrap(), 9.0);
    }

    #[test]
    fn mat2_out_of_range_access_fails() {
        let mut m = Mat2::one();
        assert!(m.at(2, 0).is_err());
        assert!(m.at(0, 2).is_err());
        assert!(m.set(2, 0, 1.0).is_err());
    }

    #[test]
    fn mat3_out_of_range_access_fails() {
        let m = Mat3::one();
        assert!(m.at(3, 0).is_err());
        assert!(m.at(0, 3).is_err());
        assert!(m.minor(3, 0).is_err());
    }

    #[test]
    fn mat4_out_of_range_access_fails() {
        let m = Mat4::one();
        assert!(m.at(4, 0).is_err());
        assert!(m.row(4).is_err());
        assert!(m.col(4).is_err());
    }

    #[test]
    fn mat3_row_and_column_extraction() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.row(1).unwrap(), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(m.col(2).unwrap(), Vec3::new(3.0, 6.0, 9.0));
    }

    // ==================== Arithmetic ====================

    #[test]
    fn mat2_arithmetic() {
        let a = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let b = Mat2::from_rows([[4.0, 3.0], [2.0, 1.0]]);
        assert_eq!(a + b, Mat2::from_rows([[5.0, 5.0], [5.0, 5.0]]));
        assert_eq!(a - b, Mat2::from_rows([[-3.0, -1.0], [1.0, 3.0]]));
        assert_eq!(-a, Mat2::from_rows([[-1.0, -2.0], [-3.0, -4.0]]));
        assert_eq!(a * 2.0, Mat2::from_rows([[2.0, 4.0], [6.0, 8.0]]));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, Mat2::from_rows([[0.5, 1.0], [1.5, 2.0]]));
    }

    #[test]
    fn mat2_matrix_product() {
        let a = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(a * Mat2::one(), a);
        assert_eq!(Mat2::one() * a, a);
        let b = Mat2::from_rows([[2.0, 0.0], [1.0, 2.0]]);
        assert_eq!(a * b, Mat2::from_rows([[4.0, 4.0], [10.0, 8.0]]));
    }

    #[test]
    fn mat2_vector_product() {
        let m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m * Vec2::new(1.0, 1.0), Vec2::new(3.0, 7.0));
    }

    #[test]
    fn mat3_vector_product() {
        let m = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]]);
        assert_eq!(m * Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 2.0, 3.0));
    }

    // ==================== Determinants ====================

    #[test]
    fn mat2_determinant() {
        // 2*8 - 5*4 == -4, exact.
        assert_eq!(Mat2::from_rows([[2.0, 5.0], [4.0, 8.0]]).det(), -4.0);
        assert_eq!(Mat2::one().det(), 1.0);
    }

    #[test]
    fn mat3_determinant_via_minors() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        assert_eq!(m.det(), -3.0);
        assert_eq!(Mat3::one().det(), 1.0);
        assert_eq!(
            m.minor(0, 0).unwrap(),
            Mat2::from_rows([[5.0, 6.0], [8.0, 10.0]])
        );
    }

    #[test]
    fn mat4_determinant_via_minors() {
        // Diagonal: determinant is the product of the diagonal.
        let m = Mat4::from_rows([
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 3.0, 0.0, 0.0],
            [0.0, 0.0, 4.0, 0.0],
            [0.0, 0.0, 0.0, 5.0],
        ]);
        assert_eq!(m.det(), 120.0);
        // Translation matrices are volume-preserving.
        assert_eq!(Mat4::translation(10.0, -3.0, 7.0).det(), 1.0);
    }

    #[test]
    fn mat3_cofactor_sign_pattern() {
        let m = Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(m.cofactor(), Mat3::one());
        // cofactor(0, 1) carries the odd-parity sign: -det(minor(0, 1)).
        let m = Mat3::from_rows([[1.0, 2.0, 0.0], [3.0, 4.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(m.cofactor().at(0, 1).unwrap(), -3.0);
    }

    // ==================== Transpose & Inverse ====================

    #[test]
    fn mat3_transpose_involution() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.transposed().transposed(), m);
        assert_eq!(m.transposed().at(0, 1).unwrap(), 4.0);
    }

    #[test]
    fn mat2_inverse_identity() {
        let m = Mat2::from_rows([[4.0, 7.0], [2.0, 6.0]]);
        let inv = m.inverse().unwrap();
        assert!((m * inv).almost_eq(&Mat2::one()));
        assert!((inv * m).almost_eq(&Mat2::one()));
        assert!(inv.inverse().unwrap().almost_eq(&m));
    }

    #[test]
    fn mat3_inverse_identity() {
        let m = Mat3::from_rows([[2.0, 0.0, 1.0], [1.0, 3.0, 0.0], [0.0, 1.0, 4.0]]);
        let inv = m.inverse().unwrap();
        assert!((m * inv).almost_eq(&Mat3::one()));
        assert!(inv.inverse().unwrap().almost_eq(&m));
    }

    #[test]
    fn mat4_inverse_identity() {
        let m = Mat4::translation(1.0, 2.0, 3.0) * Mat4::from_mat3(&Mat3::rotation_z(0.7));
        let inv = m.inverse().unwrap();
        assert!((m * inv).almost_eq(&Mat4::one()));
        assert!(inv.inverse().unwrap().almost_eq(&m));
    }

    #[test]
    fn random_matrices_invert_to_identity() {
        let mut rng = rand::thread_rng();
        let mut checked = 0;
        while checked < 20 {
            let m = Mat3::from_rows([
                [rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)],
                [rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)],
                [rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)],
            ]);
            // Skip near-singular draws; the property only holds for invertible m.
            if m.det().abs() < 0.1 {
                continue;
            }
            let inv = m.inverse().unwrap();
            assert!((m * inv).almost_eq(&Mat3::one()), "failed for {m:?}");
            assert!(inv.inverse().unwrap().almost_eq(&m));
            checked += 1;
        }
    }

    #[test]
    fn singular_matrix_inversion_fails() {
        assert!(Mat2::from_rows([[1.0, 2.0], [2.0, 4.0]]).inverse().is_err());
        assert!(Mat3::zero().inverse().is_err());
        assert!(Mat4::zero().inverse().is_err());
    }

    // ==================== Builders ====================

    #[test]
    fn mat2_rotation_quarter_turn() {
        let rot = Mat2::rotation(FRAC_PI_2);
        assert!((rot * Vec2::new(1.0, 0.0)).almost_eq(&Vec2::new(0.0, 1.0)));
        assert!((rot * Vec2::new(0.0, 1.0)).almost_eq(&Vec2::new(-1.0, 0.0)));
        assert!((rot.det() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn mat3_axis_rotations() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);
        assert!((Mat3::rotation_z(FRAC_PI_2) * &x).almost_eq(&y));
        assert!((Mat3::rotation_x(FRAC_PI_2) * &y).almost_eq(&z));
        assert!((Mat3::rotation_y(FRAC_PI_2) * &z).almost_eq(&x));
    }

    #[test]
    fn mat3_combined_rotation_order() {
        let combined = Mat3::rotation(FRAC_PI_6, FRAC_PI_4, FRAC_PI_3);
        let manual =
            Mat3::rotation_z(FRAC_PI_3) * Mat3::rotation_y(FRAC_PI_4) * Mat3::rotation_x(FRAC_PI_6);
        assert!(combined.almost_eq(&manual));
        // Rotations are orthonormal.
        assert!((combined.det() - 1.0).abs() < EPSILON);
        assert!(combined.inverse().unwrap().almost_eq(&combined.transposed()));
    }

    #[test]
    fn mat4_translation_moves_points() {
        let m = Mat4::translation(10.0, 20.0, 30.0);
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(m.transform_point(&p), Vec3::new(11.0, 22.0, 33.0));
        assert_eq!(
            Mat4::translation_vec3(&Vec3::new(1.0, 1.0, 1.0)).transform_point(&Vec3::zero()),
            Vec3::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn mat4_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let target = Vec3::zero();
        let up = Vec3::new(0.0, 1.0, 0.0);
        let view = Mat4::look_at(&eye, &target, &up);
        assert!(view.transform_point(&eye).almost_eq(&Vec3::zero()));
        // The target lies straight ahead, along -z in view space.
        assert!(view
            .transform_point(&target)
            .almost_eq(&Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn mat4_perspective_maps_near_and_far_planes() {
        let proj = Mat4::perspective(FRAC_PI_2, 1.0, 1.0, 10.0);
        let on_near = proj.transform_point(&Vec3::new(0.0, 0.0, -1.0));
        assert!((on_near.z() + 1.0).abs() < EPSILON);
        let on_far = proj.transform_point(&Vec3::new(0.0, 0.0, -10.0));
        assert!((on_far.z() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn mat4_orthographic_maps_box_corners() {
        let proj = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
        assert!(proj
            .transform_point(&Vec3::new(2.0, 1.0, -10.0))
            .almost_eq(&Vec3::new(1.0, 1.0, 1.0)));
        assert!(proj
            .transform_point(&Vec3::new(-2.0, -1.0, 0.0))
            .almost_eq(&Vec3::new(-1.0, -1.0, -1.0)));
    }

    #[test]
    fn mat4_clip_correction_flips_y_and_halves_depth() {
        let m = Mat4::clip_correction();
        assert!(m
            .transform_point(&Vec3::new(1.0, 1.0, 1.0))
            .almost_eq(&Vec3::new(1.0, -1.0, 1.0)));
        assert!(m
            .transform_point(&Vec3::new(0.0, 0.0, -1.0))
            .almost_eq(&Vec3::new(0.0, 0.0, 0.0)));
    }

    // ==================== Boundary Conversions ====================

    #[test]
    fn mat4_f32_export_orders() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        let row_major = m.to_f32_row_major();
        let column_major = m.to_f32_column_major();
        assert_eq!(row_major[3], 1.0);
        assert_eq!(column_major[12], 1.0);
        assert_eq!(row_major[7], 2.0);
        assert_eq!(column_major[13], 2.0);
    }

    #[test]
    fn matrix_num_traits_impls() {
        assert_eq!(<Mat2 as One>::one(), Mat2::one());
        assert!(<Mat3 as Zero>::zero().is_zero());
        assert!(!Mat4::one().is_zero());
    }
}
