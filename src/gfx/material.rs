/// Surface description carried by mesh entities
///
/// Only the properties interaction code reads or changes live here; shading
/// is the render engine's business.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0, 0.0, 0.0],
        }
    }
}

impl Material {
    pub fn new(name: &str, base_color: [f32; 4]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            ..Default::default()
        }
    }

    /// Builder pattern: Set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.set_color(r, g, b);
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    /// Replace the RGB part of the base color, keeping alpha
    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.base_color = [
            r.clamp(0.0, 1.0),
            g.clamp(0.0, 1.0),
            b.clamp(0.0, 1.0),
            self.base_color[3],
        ];
    }

    pub fn color(&self) -> [f32; 3] {
        [self.base_color[0], self.base_color[1], self.base_color[2]]
    }
}
