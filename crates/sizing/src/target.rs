/// Default ceiling on rendered pixels: four 1080p frames.
pub const DEFAULT_MAX_PIXEL_COUNT: u64 = 1920 * 1080 * 4;

/// Quality knobs for choosing the canvas resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderScaleOptions {
    /// Render at least this many device pixels per CSS pixel.
    pub min_pixel_ratio: f32,
    /// Upper bound on `width * height`.
    pub max_pixel_count: u64,
}

impl Default for RenderScaleOptions {
    fn default() -> Self {
        Self {
            min_pixel_ratio: 2.0,
            max_pixel_count: DEFAULT_MAX_PIXEL_COUNT,
        }
    }
}

/// Canvas dimensions in device pixels and the effective pixel ratio
/// (uploaded as `u_pixelRatio`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl RenderTarget {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
        }
    }
}

/// Chooses canvas dimensions for an element of `css_width` x `css_height`.
///
/// Device pixel ratios below 1 are treated as a zoomed-out page and ignored;
/// the result never exceeds `options.max_pixel_count` pixels.
pub fn resolve_render_target(
    css_width: f32,
    css_height: f32,
    device_pixel_ratio: f32,
    pinch_zoom: f32,
    options: RenderScaleOptions,
) -> RenderTarget {
    let css_w = css_width.round();
    let css_h = css_height.round();
    if !(css_w.is_finite() && css_h.is_finite()) || css_w <= 0.0 || css_h <= 0.0 {
        return RenderTarget::empty();
    }

    let dpr = if device_pixel_ratio.is_finite() {
        device_pixel_ratio.max(1.0)
    } else {
        1.0
    };
    let zoom = if pinch_zoom.is_finite() && pinch_zoom > 0.0 {
        pinch_zoom
    } else {
        1.0
    };
    let render_scale = dpr.max(options.min_pixel_ratio) * zoom;

    let target_w = f64::from(css_w * render_scale);
    let target_h = f64::from(css_h * render_scale);
    let headroom = (options.max_pixel_count as f64).sqrt() / (target_w * target_h).sqrt();
    let clamp = headroom.min(1.0);

    let width = (target_w * clamp).round() as u32;
    let height = (target_h * clamp).round() as u32;
    if width == 0 || height == 0 {
        return RenderTarget::empty();
    }

    RenderTarget {
        width,
        height,
        pixel_ratio: width as f32 / css_w,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meets_minimum_pixel_ratio() {
        let target = resolve_render_target(800.0, 600.0, 1.0, 1.0, RenderScaleOptions::default());
        assert_eq!(target.width, 1600);
        assert_eq!(target.height, 1200);
        assert_eq!(target.pixel_ratio, 2.0);
    }

    #[test]
    fn high_dpi_wins_over_minimum() {
        let target = resolve_render_target(400.0, 300.0, 3.0, 1.0, RenderScaleOptions::default());
        assert_eq!((target.width, target.height), (1200, 900));
        assert_eq!(target.pixel_ratio, 3.0);
    }

    #[test]
    fn clamps_total_pixel_count() {
        let options = RenderScaleOptions::default();
        let target = resolve_render_target(4000.0, 3000.0, 2.0, 1.0, options);
        let pixels = u64::from(target.width) * u64::from(target.height);
        assert!(pixels <= options.max_pixel_count + target.width as u64 + target.height as u64);
        let aspect = target.width as f32 / target.height as f32;
        assert!((aspect - 4.0 / 3.0).abs() < 0.01);
        assert!(target.pixel_ratio < 2.0);
    }

    #[test]
    fn empty_elements_produce_empty_target() {
        let options = RenderScaleOptions::default();
        assert_eq!(
            resolve_render_target(0.0, 300.0, 1.0, 1.0, options),
            RenderTarget::empty()
        );
        assert_eq!(
            resolve_render_target(0.2, 0.2, 1.0, 1.0, options),
            RenderTarget::empty()
        );
    }
}
