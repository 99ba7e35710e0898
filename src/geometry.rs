// Small layout helpers for placing content in the middle of the viewport.

/// Offset that centers something of size `position` inside `dimension`.
pub fn centered(position: f32, dimension: f32) -> f32 {
    (dimension - position) / 2.0
}

/// Width / height of an image. `None` for a degenerate (zero-height) image.
pub fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    if height == 0 {
        return None;
    }
    Some(width as f32 / height as f32)
}

/// Scale (width, height) so its longer side becomes `desired`, keeping the
/// aspect ratio. Landscape images get width = `desired`, portrait ones
/// height = `desired`.
pub fn fit_dimension(width: u32, height: u32, desired: f32) -> Option<(f32, f32)> {
    let ratio = aspect_ratio(width, height)?;
    if ratio >= 1.0 {
        Some((desired, desired / ratio))
    } else {
        Some((desired * ratio, desired))
    }
}

/// Top-left corner that centers a `w`x`h` box in a `view_w`x`view_h` viewport.
pub fn centered_origin(view_w: u32, view_h: u32, w: f32, h: f32) -> (i32, i32) {
    let x = (view_w as f32 / 2.0 - w / 2.0).round() as i32;
    let y = (view_h as f32 / 2.0 - h / 2.0).round() as i32;
    (x, y)
}
