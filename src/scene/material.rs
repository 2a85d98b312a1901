//! Surface material carried by every scene node
//!
//! Only what the viewer needs: a flat color plus the opacity/transparency pair
//! used to show and hide axes helpers.

/// Flat-shaded material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub transparent: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [0.8, 0.8, 0.8],
            opacity: 1.0,
            transparent: false,
        }
    }
}

impl Material {
    /// Opaque material with the given RGB color (components 0.0-1.0)
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Opaque material from a `0xRRGGBB` value
    pub fn from_hex(rgb: u32) -> Self {
        Self::new(hex_to_rgb(rgb))
    }

    /// Fully transparent material, used by axes helpers until they are shown
    pub fn invisible() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            opacity: 0.0,
            transparent: true,
        }
    }

    pub fn show(&mut self) {
        self.opacity = 1.0;
        self.transparent = false;
    }

    pub fn hide(&mut self) {
        self.opacity = 0.0;
        self.transparent = true;
    }

    /// True when nothing of this material would reach the screen
    pub fn is_hidden(&self) -> bool {
        self.transparent && self.opacity <= 0.0
    }

    /// RGBA as uploaded to shaders; alpha is the opacity
    pub fn rgba(&self) -> [f32; 4] {
        [self.color[0], self.color[1], self.color[2], self.opacity]
    }
}

/// Splits a `0xRRGGBB` value into normalized RGB components
pub fn hex_to_rgb(rgb: u32) -> [f32; 3] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_conversion() {
        let red = Material::from_hex(0xFF3333);
        assert_eq!(red.color[0], 1.0);
        assert_eq!(red.color[1], 0.2);
        assert_eq!(red.color[2], 0.2);
        assert!(!red.is_hidden());
    }

    #[test]
    fn test_show_and_hide() {
        let mut axes = Material::invisible();
        assert!(axes.is_hidden());

        axes.show();
        assert_eq!(axes.opacity, 1.0);
        assert!(!axes.transparent);
        assert!(!axes.is_hidden());

        axes.hide();
        assert!(axes.is_hidden());
        assert_eq!(axes.rgba()[3], 0.0);
    }
}
