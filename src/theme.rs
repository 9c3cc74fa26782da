use crate::grid::CellColor;

/// Foreground/background pair derived from the dark-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub foreground: CellColor,
    pub background: CellColor,
    /// Off cells in the stamp editor.
    pub disabled: CellColor,
}

impl Theme {
    pub fn new(dark_mode: bool) -> Self {
        let (foreground, background) = if dark_mode {
            (CellColor::WHITE, CellColor::BLACK)
        } else {
            (CellColor::BLACK, CellColor::WHITE)
        };
        Self {
            foreground,
            background,
            disabled: foreground.lerp(background, 0.8),
        }
    }
}

/// HSV to opaque RGB, all components in 0..=1.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> CellColor {
    let h = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |f: f32| ((f + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    CellColor([to_u8(r), to_u8(g), to_u8(b), 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme_is_white_on_black() {
        let theme = Theme::new(true);
        assert_eq!(theme.foreground, CellColor::WHITE);
        assert_eq!(theme.background, CellColor::BLACK);
        assert_eq!(theme.disabled, CellColor([51, 51, 51, 255]));
    }

    #[test]
    fn light_theme_inverts() {
        let theme = Theme::new(false);
        assert_eq!(theme.foreground, CellColor::BLACK);
        assert_eq!(theme.disabled, CellColor([204, 204, 204, 255]));
    }

    #[test]
    fn hue_wheel_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), CellColor([255, 0, 0, 255]));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), CellColor([0, 255, 0, 255]));
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), CellColor([0, 0, 255, 255]));
        assert_eq!(hsv_to_rgb(1.25, 0.0, 1.0), CellColor::WHITE);
    }
}
