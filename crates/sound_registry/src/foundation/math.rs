//! Math utilities and types
//!
//! World-space positions for sound emitters and listeners.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Convert a point into the `[x, y, z]` layout audio backends expect
pub fn point_to_array(point: &Point3) -> [f32; 3] {
    [point.x, point.y, point.z]
}

/// Math utility functions
pub mod utils {
    /// Clamp a value into `[min, max]`, replacing NaN and infinities with `fallback`
    ///
    /// `fallback` is returned as-is, so callers pass a value already inside the range.
    pub fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
        if value.is_finite() {
            value.clamp(min, max)
        } else {
            fallback
        }
    }
}
