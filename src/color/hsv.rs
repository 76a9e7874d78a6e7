use crate::models::{Hsv, Rgb};

/// Converts an 8-bit RGB triple to integer HSV.
///
/// Hue is in whole degrees `[0, 360)`, saturation and value in whole percent
/// `[0, 100]`. All three are truncated, not rounded, so exported values stay
/// identical to earlier exports near channel boundaries.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let value = max;

    if max == min {
        return Hsv {
            h: 0,
            s: 0,
            v: truncate_percent(value),
        };
    }

    let chroma = max - min;
    let saturation = chroma / max;

    let rc = (max - r) / chroma;
    let gc = (max - g) / chroma;
    let bc = (max - b) / chroma;

    let sector = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let hue = (sector / 6.0).rem_euclid(1.0);

    Hsv {
        // hue < 1.0, so the product stays below 360
        h: ((hue * 360.0) as u16).min(359),
        s: truncate_percent(saturation),
        v: truncate_percent(value),
    }
}

fn truncate_percent(fraction: f64) -> u8 {
    (fraction * 100.0) as u8
}
