//! Utility functions for face boxes and pixel coordinates.

use opencv::core::Rect;

/// Clamp and convert f32 to i32 for pixel coordinates
#[must_use]
#[allow(clippy::cast_precision_loss)] // Acceptable for clamping bounds
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn clamp_to_i32(value: f32, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if !value.is_finite() {
        return min;
    }
    (value.clamp(min as f32, max as f32) as i32).clamp(min, max)
}

/// Grow a face box by `shift` of its size on every side, make it square and
/// keep it inside a `max_width` x `max_height` frame.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Precision loss acceptable for box dimensions
pub fn expand_to_square(face: Rect, max_width: i32, max_height: i32, shift: f32) -> Rect {
    let x_shift = clamp_to_i32(face.width as f32 * shift, 0, max_width);
    let y_shift = clamp_to_i32(face.height as f32 * shift, 0, max_height);

    let x = (face.x - x_shift).max(0);
    let y = (face.y - y_shift).max(0);
    let width = (face.width + 2 * x_shift).min(max_width - x);
    let height = (face.height + 2 * y_shift).min(max_height - y);

    let side = width.max(height).min(max_width).min(max_height);
    let x = x.min(max_width - side);
    let y = y.min(max_height - side);

    Rect::new(x, y, side, side)
}

/// Face with the largest area
#[must_use]
pub fn largest_face(faces: &[Rect]) -> Option<Rect> {
    faces.iter().copied().max_by_key(|face| face.width * face.height)
}
