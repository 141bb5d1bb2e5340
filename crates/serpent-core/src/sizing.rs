//! Backing-store sizing for crisp rendering at any device-pixel ratio.

/// Displayed (CSS) size and the matching backing resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub css_width: f64,
    pub css_height: f64,
    pub width_px: u32,
    pub height_px: u32,
    pub dpr: f64,
}

/// Browsers report 0 or NaN in odd embedding contexts; treat those as 1.
#[inline]
pub fn effective_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

#[inline]
fn to_px(css: f64, dpr: f64) -> u32 {
    if css.is_finite() && css > 0.0 {
        (css * dpr) as u32
    } else {
        0
    }
}

/// Largest square that fits the container, scaled to device pixels.
pub fn square_fit(container_width: f64, container_height: f64, dpr: f64) -> CanvasSize {
    let dpr = effective_dpr(dpr);
    let side = container_width.min(container_height).max(0.0);
    let px = to_px(side, dpr);
    CanvasSize {
        css_width: side,
        css_height: side,
        width_px: px,
        height_px: px,
        dpr,
    }
}

/// Backing resolution for a canvas whose displayed size is already fixed by
/// the page layout.
pub fn display_fit(css_width: f64, css_height: f64, dpr: f64) -> CanvasSize {
    let dpr = effective_dpr(dpr);
    CanvasSize {
        css_width: css_width.max(0.0),
        css_height: css_height.max(0.0),
        width_px: to_px(css_width, dpr),
        height_px: to_px(css_height, dpr),
        dpr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_uses_shorter_side() {
        let s = square_fit(800.0, 600.0, 2.0);
        assert_eq!(s.css_width, 600.0);
        assert_eq!((s.width_px, s.height_px), (1200, 1200));
    }

    #[test]
    fn bad_dpr_falls_back_to_one() {
        assert_eq!(display_fit(300.0, 100.0, 0.0).width_px, 300);
        assert_eq!(display_fit(300.0, 100.0, f64::NAN).height_px, 100);
    }
}
