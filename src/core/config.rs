// TODO: some way to override these from user code.
pub const EPSILON: f64 = 1e-3;
