//! Vector helpers over 3-element arrays, shared by all placement math.

use rand::Rng;

#[must_use]
pub fn add3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[must_use]
pub fn scale3(scalar: f64, v: [f64; 3]) -> [f64; 3] {
    [scalar * v[0], scalar * v[1], scalar * v[2]]
}

/// Element-wise product.
#[must_use]
pub fn mul3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2]]
}

/// Component-wise uniform sample in `[mins[i], maxes[i])`.
///
/// A degenerate axis (`mins[i] == maxes[i]`) always yields `mins[i]`.
pub fn random_in3<R: Rng>(rng: &mut R, mins: [f64; 3], maxes: [f64; 3]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = mins[i] + (maxes[i] - mins[i]) * rng.gen::<f64>();
    }
    out
}

/// Integer lattice step.
#[must_use]
pub fn add_cell(a: [i32; 3], b: [i32; 3]) -> [i32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}
