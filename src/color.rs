use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Color {
  pub const GREEN: Color = Color::rgba(0, 255, 0, 255);

  pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  pub const fn with_alpha(self, a: u8) -> Self {
    Self { a, ..self }
  }

  /// Random colour that never comes out too dark: when red and green together
  /// fall below `floor`, blue is drawn from the upper band instead.
  pub fn random_bright<R: Rng + ?Sized>(rng: &mut R, alpha: u8, floor: u16) -> Self {
    let r: u8 = rng.gen();
    let g: u8 = rng.gen();
    let b = if u16::from(r) + u16::from(g) < floor {
      rng.gen_range(100..=255)
    } else {
      rng.gen()
    };
    Self::rgba(r, g, b, alpha)
  }

  pub fn to_f32(self) -> [f32; 4] {
    [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
  }
}
