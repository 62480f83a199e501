use core::f32::consts::PI;
use libm::{fabsf, fmodf};

const TAU: f32 = 2.0 * PI;

// fold any angle into [0, 2pi)
pub fn normalize(rad: f32) -> f32 {
    let a = fmodf(rad, TAU);
    let a = if a < 0.0 { a + TAU } else { a };
    // -tiny + TAU rounds up to TAU
    if a >= TAU {
        0.0
    } else {
        a
    }
}

// fold degrees into [0, 360)
pub fn wrap360(deg: f32) -> f32 {
    let a = fmodf(deg, 360.0);
    let a = if a < 0.0 { a + 360.0 } else { a };
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

// Shortest signed difference between two headings in [0, 2pi).
// + means measured is counter-clockwise of desired.
pub fn heading_error(measured: f32, desired: f32) -> f32 {
    let error = measured - desired;
    if fabsf(error) <= PI {
        error
    } else if error > 0.0 {
        error - TAU
    } else {
        error + TAU
    }
}

pub fn is_aligned(measured: f32, desired: f32, tolerance: f32) -> bool {
    fabsf(heading_error(measured, desired)) <= tolerance
}
