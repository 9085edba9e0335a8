#[allow(unused_imports)]
use crate::core::prelude::*;

use crate::util::linalg::Vec3;

/// A scalar field over the 2D parameter domain.
pub type ScalarField = Box<dyn Fn(f64, f64) -> f64>;

/// An embedding of a 2D parameter domain into 3D, given by three
/// independent scalar fields for the x, y and z coordinates. Used for
/// procedural geometry; surfaces take no part in intersection tests.
pub struct ParametricSurface {
    x: ScalarField,
    y: ScalarField,
    z: ScalarField,
}

impl ParametricSurface {
    pub fn new(x: ScalarField, y: ScalarField, z: ScalarField) -> ParametricSurface {
        ParametricSurface { x, y, z }
    }

    /// Evaluates the embedding at the given parameters.
    #[must_use]
    pub fn point_at(&self, u: f64, v: f64) -> Vec3 {
        Vec3::new((self.x)(u, v), (self.y)(u, v), (self.z)(u, v))
    }

    /// Samples the embedding over the unit parameter square on a regular
    /// grid, endpoints included: `(u_steps + 1) * (v_steps + 1)` points in
    /// row-major order (u varies fastest). Step counts of zero are treated
    /// as one.
    #[must_use]
    pub fn grid(&self, u_steps: usize, v_steps: usize) -> Vec<Vec3> {
        let u_steps = u_steps.max(1);
        let v_steps = v_steps.max(1);
        let mut points = Vec::with_capacity((u_steps + 1) * (v_steps + 1));
        for v in 0..=v_steps {
            for u in 0..=u_steps {
                points.push(self.point_at(u as f64 / u_steps as f64, v as f64 / v_steps as f64));
            }
        }
        points
    }

    /// Explicit conversion for the single-precision rendering boundary:
    /// the [`grid`](ParametricSurface::grid) samples as flat vertex data.
    #[must_use]
    pub fn to_f32_vertices(&self, u_steps: usize, v_steps: usize) -> Vec<[f32; 3]> {
        self.grid(u_steps, v_steps)
            .iter()
            .map(Vec3::to_f32_array)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn plane() -> ParametricSurface {
        ParametricSurface::new(
            Box::new(|u, _| u),
            Box::new(|_, v| v),
            Box::new(|_, _| 0.0),
        )
    }

    fn sphere(radius: f64) -> ParametricSurface {
        ParametricSurface::new(
            Box::new(move |u, v| radius * (PI * v).sin() * (2.0 * PI * u).cos()),
            Box::new(move |u, v| radius * (PI * v).sin() * (2.0 * PI * u).sin()),
            Box::new(move |_, v| radius * (PI * v).cos()),
        )
    }

    #[test]
    fn surface_point_at_evaluates_all_three_fields() {
        let surface = ParametricSurface::new(
            Box::new(|u, v| u + v),
            Box::new(|u, v| u * v),
            Box::new(|u, v| u - v),
        );
        assert_eq!(surface.point_at(3.0, 2.0), Vec3::new(5.0, 6.0, 1.0));
    }

    #[test]
    fn surface_grid_size_and_corners() {
        let grid = plane().grid(4, 2);
        assert_eq!(grid.len(), 5 * 3);
        assert_eq!(grid[0], Vec3::new(0.0, 0.0, 0.0));
        // u varies fastest.
        assert_eq!(grid[4], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(grid[14], Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn surface_grid_zero_steps_treated_as_one() {
        let grid = plane().grid(0, 0);
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn surface_sphere_samples_lie_on_sphere() {
        let surface = sphere(3.0);
        for point in surface.grid(8, 8) {
            assert!((point.magnitude() - 3.0).abs() < EPSILON);
        }
    }

    #[test]
    fn surface_f32_vertices_match_grid() {
        let surface = plane();
        let grid = surface.grid(2, 2);
        let vertices = surface.to_f32_vertices(2, 2);
        assert_eq!(vertices.len(), grid.len());
        assert_eq!(vertices[0], [0.0, 0.0, 0.0]);
        assert_eq!(vertices[8], [1.0, 1.0, 0.0]);
    }
}
