#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::config::*,
    util::{
        cache::Cached,
        linalg,
        linalg::{Vec2, Vec3, Vec4},
        matrix::{Mat2, Mat3, Mat4},
        shape::{AnyShape, Circle, Line, Polygon, Ray, Rect, Shape},
        surface::ParametricSurface,
    },
};
