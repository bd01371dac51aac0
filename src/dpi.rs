//! Logical/physical size and position types, and the DPI and
//! density-independent point-pixel ("pp") formulas.
//!
//! Mirrors the `LogicalSize`/`PhysicalSize`/`LogicalPosition`/`PhysicalPosition`
//! shape `crate::dpi` is used as in `event_loop/mod.rs`/`event_loop/state.rs`,
//! generalized to be backend-independent instead of winit's.

/// A size expressed in logical (DPI-independent) pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LogicalSize<T> {
    pub width: T,
    pub height: T,
}

impl<T> LogicalSize<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl LogicalSize<u32> {
    pub fn to_physical(self, scale_factor: f64) -> PhysicalSize<u32> {
        PhysicalSize::new(
            (self.width as f64 * scale_factor).round() as u32,
            (self.height as f64 * scale_factor).round() as u32,
        )
    }
}

/// A size expressed in physical (device) pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicalSize<T> {
    pub width: T,
    pub height: T,
}

impl<T> PhysicalSize<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl PhysicalSize<u32> {
    pub fn to_logical<T: From<u32>>(self, scale_factor: f64) -> LogicalSize<T> {
        LogicalSize::new(
            T::from((self.width as f64 / scale_factor).round() as u32),
            T::from((self.height as f64 / scale_factor).round() as u32),
        )
    }
}

/// A position expressed in logical (DPI-independent) pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LogicalPosition<T> {
    pub x: T,
    pub y: T,
}

impl<T> LogicalPosition<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// A position expressed in physical (device) pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicalPosition<T> {
    pub x: T,
    pub y: T,
}

impl<T> PhysicalPosition<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Centimeters per inch, used to convert reported pixels-per-millimeter into
/// dots per inch.
const CM_PER_INCH: f32 = 2.54;

/// Computes logical DPI from physical screen dimensions. `resolution_px`
/// and `size_mm` are the `(width, height)` pixel count and millimeter size
/// of the primary screen.
///
/// DPI is the mean of the horizontal and vertical pixels-per-inch.
pub fn dots_per_inch(resolution_px: (u32, u32), size_mm: (f32, f32)) -> f32 {
    let (res_x, res_y) = resolution_px;
    let (mm_x, mm_y) = size_mm;

    let dpi_x = res_x as f32 / (mm_x / 10.0 / CM_PER_INCH);
    let dpi_y = res_y as f32 / (mm_y / 10.0 / CM_PER_INCH);

    (dpi_x + dpi_y) / 2.0
}

/// Computes pixels-per-density-independent-point-pixel.
///
/// Policy (desktop `integer_scale_factor` overrides this when not `1`):
/// - physical width < 150mm (handheld): `resolution / 200`
/// - physical width < 300mm (tablet): `resolution / 700`
/// - otherwise: `1.0`
pub fn pixels_per_pp(
    resolution_px: (u32, u32),
    size_mm: (f32, f32),
    integer_scale_factor: Option<u32>,
) -> f32 {
    if let Some(factor) = integer_scale_factor {
        if factor != 1 {
            return factor as f32;
        }
    }

    let width_mm = size_mm.0;
    let resolution = resolution_px.0 as f32;

    if width_mm < 150.0 {
        resolution / 200.0
    } else if width_mm < 300.0 {
        resolution / 700.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_per_pp_desktop_default() {
        // I-10: mm >= 300 => 1.0
        assert_eq!(pixels_per_pp((1920, 1080), (600.0, 340.0), None), 1.0);
    }

    #[test]
    fn pixels_per_pp_tablet() {
        // I-10: 150 <= mm < 300 => res/700
        let res = 1600.0;
        assert_eq!(
            pixels_per_pp((1600, 1200), (200.0, 150.0), None),
            res / 700.0
        );
    }

    #[test]
    fn pixels_per_pp_handheld() {
        // I-10: mm < 150 => res/200
        let res = 1080.0;
        assert_eq!(
            pixels_per_pp((1080, 1920), (70.0, 140.0), None),
            res / 200.0
        );
    }

    #[test]
    fn pixels_per_pp_integer_scale_factor_overrides() {
        assert_eq!(
            pixels_per_pp((1920, 1080), (600.0, 340.0), Some(2)),
            2.0
        );
        // scale factor of exactly 1 does not override the mm-based policy
        assert_eq!(pixels_per_pp((1920, 1080), (600.0, 340.0), Some(1)), 1.0);
    }

    #[test]
    fn logical_to_physical_round_trip_size() {
        let logical = LogicalSize::new(100u32, 200u32);
        let physical = logical.to_physical(1.5);
        assert_eq!(physical, PhysicalSize::new(150, 300));
    }
}
