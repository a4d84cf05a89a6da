use crate::behavior::Particle;
use crate::error::{Error, Result};
use crate::particle::Shape;
use crate::plane::CartesianPlane;
use crate::PlaygroundParams;
use cgmath::Point2;
use rand::Rng;

/// What a left click spawns. `Random` picks one of the others per particle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ParticleKind {
  #[default]
  Normal,
  Constant,
  Wave,
  Grow,
  Random,
}

impl ParticleKind {
  const CONCRETE: [ParticleKind; 4] = [
    ParticleKind::Normal,
    ParticleKind::Constant,
    ParticleKind::Wave,
    ParticleKind::Grow,
  ];

  /// Order used when cycling with the right mouse button.
  pub fn next(self) -> Self {
    match self {
      ParticleKind::Normal => ParticleKind::Constant,
      ParticleKind::Constant => ParticleKind::Wave,
      ParticleKind::Wave => ParticleKind::Grow,
      ParticleKind::Grow => ParticleKind::Random,
      ParticleKind::Random => ParticleKind::Normal,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      ParticleKind::Normal => "Normal",
      ParticleKind::Constant => "Constant",
      ParticleKind::Wave => "Wave",
      ParticleKind::Grow => "Grow",
      ParticleKind::Random => "Random",
    }
  }
}

/// Builds one particle of `kind` centred on the pixel `click`.
pub fn spawn<R: Rng + ?Sized>(
  rng: &mut R,
  kind: ParticleKind,
  click: Point2<f64>,
  plane: &CartesianPlane,
  shape: &Shape,
  params: &PlaygroundParams,
) -> Result<Particle> {
  let p = &params.particle;
  match kind {
    ParticleKind::Normal => Particle::falling(rng, plane, click, shape, p),
    ParticleKind::Constant => Particle::constant(rng, plane, click, shape, p, &params.constant),
    ParticleKind::Wave => {
      Particle::wave(rng, plane, click, shape, p, &params.constant, &params.wave)
    }
    ParticleKind::Grow => Particle::grow(rng, plane, click, shape, p, &params.grow),
    ParticleKind::Random => {
      let kind = ParticleKind::CONCRETE[rng.gen_range(0..ParticleKind::CONCRETE.len())];
      spawn(rng, kind, click, plane, shape, params)
    }
  }
}

/// Random point count within the configured band.
pub fn random_point_count<R: Rng + ?Sized>(
  rng: &mut R,
  params: &PlaygroundParams,
) -> Result<usize> {
  if params.min_points < 3 || params.min_points > params.max_points {
    return Err(Error::InvalidArgument(format!(
      "point count range [{}, {}] must start at 3 or more",
      params.min_points, params.max_points
    )));
  }
  Ok(rng.gen_range(params.min_points..=params.max_points))
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::SmallRng, SeedableRng};

  #[test]
  fn cycling_visits_every_kind() {
    let mut kind = ParticleKind::Normal;
    let mut seen = vec![kind];
    for _ in 0..4 {
      kind = kind.next();
      seen.push(kind);
    }
    assert_eq!(
      seen,
      [
        ParticleKind::Normal,
        ParticleKind::Constant,
        ParticleKind::Wave,
        ParticleKind::Grow,
        ParticleKind::Random
      ]
    );
    assert_eq!(kind.next(), ParticleKind::Normal);
  }

  #[test]
  fn spawn_builds_requested_kind() {
    let mut rng = SmallRng::seed_from_u64(21);
    let plane = CartesianPlane::new(800, 600);
    let params = PlaygroundParams::default();
    for kind in ParticleKind::CONCRETE {
      let p = spawn(
        &mut rng,
        kind,
        plane.center_pixel(),
        &plane,
        &Shape::new(8),
        &params,
      )
      .unwrap();
      assert_eq!(p.kind(), kind);
      assert_eq!(p.body().points().shape(), (2, 8));
    }
  }

  #[test]
  fn random_kind_never_stays_random() {
    let mut rng = SmallRng::seed_from_u64(22);
    let plane = CartesianPlane::new(800, 600);
    let params = PlaygroundParams::default();
    let kinds: Vec<ParticleKind> = (0..40)
      .map(|_| {
        spawn(
          &mut rng,
          ParticleKind::Random,
          plane.center_pixel(),
          &plane,
          &Shape::new(5),
          &params,
        )
        .unwrap()
        .kind()
      })
      .collect();
    assert!(kinds.iter().all(|k| *k != ParticleKind::Random));
    assert!(kinds.iter().any(|k| *k != kinds[0]));
  }

  #[test]
  fn spawn_rejects_too_few_points() {
    let mut rng = SmallRng::seed_from_u64(23);
    let plane = CartesianPlane::new(800, 600);
    let err = spawn(
      &mut rng,
      ParticleKind::Wave,
      plane.center_pixel(),
      &plane,
      &Shape::new(2),
      &PlaygroundParams::default(),
    );
    assert!(matches!(err, Err(Error::InvalidArgument(_))));
  }

  #[test]
  fn point_count_stays_in_band() {
    let mut rng = SmallRng::seed_from_u64(24);
    let params = PlaygroundParams::default();
    for _ in 0..500 {
      let n = random_point_count(&mut rng, &params).unwrap();
      assert!((25..=50).contains(&n));
    }
    let bad = PlaygroundParams {
      min_points: 2,
      ..params
    };
    assert!(random_point_count(&mut rng, &bad).is_err());
  }
}
