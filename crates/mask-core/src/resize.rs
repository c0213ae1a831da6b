//! Plane resampling: point and bilinear.
//!
//! Center-aligned sampling (`src = (dst + 0.5) * scale - 0.5`), with
//! edge replication outside the source. Enough for mask upscaling and
//! chroma alignment; this is not a general-purpose scaler.

use maskwork_frame_model::Plane;

/// Nearest-neighbor resample.
pub fn resize_plane_point(plane: &Plane, width: usize, height: usize) -> Plane {
    if plane.width() == width && plane.height() == height {
        return plane.clone();
    }
    let mut out = Plane::new(width, height);
    let sx = plane.width() as f32 / width as f32;
    let sy = plane.height() as f32 / height as f32;
    for y in 0..height {
        for x in 0..width {
            let src_x = ((x as f32 + 0.5) * sx) as isize;
            let src_y = ((y as f32 + 0.5) * sy) as isize;
            out.set(x, y, plane.get_clamped(src_x, src_y));
        }
    }
    out
}

/// Bilinear resample.
pub fn resize_plane_bilinear(plane: &Plane, width: usize, height: usize) -> Plane {
    if plane.width() == width && plane.height() == height {
        return plane.clone();
    }
    let mut out = Plane::new(width, height);
    let sx = plane.width() as f32 / width as f32;
    let sy = plane.height() as f32 / height as f32;
    for y in 0..height {
        let src_y = (y as f32 + 0.5) * sy - 0.5;
        let y0 = src_y.floor();
        let fy = src_y - y0;
        for x in 0..width {
            let src_x = (x as f32 + 0.5) * sx - 0.5;
            let x0 = src_x.floor();
            let fx = src_x - x0;

            let (xi, yi) = (x0 as isize, y0 as isize);
            let top = plane.get_clamped(xi, yi) * (1.0 - fx) + plane.get_clamped(xi + 1, yi) * fx;
            let bottom = plane.get_clamped(xi, yi + 1) * (1.0 - fx)
                + plane.get_clamped(xi + 1, yi + 1) * fx;
            out.set(x, y, top * (1.0 - fy) + bottom * fy);
        }
    }
    out
}
