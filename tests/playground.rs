use cgmath::Vector2;
use rand::{rngs::SmallRng, SeedableRng};
use splat_playground::behavior::{Motion, Particle};
use splat_playground::draw::Drawable;
use splat_playground::initialize::ParticleKind;
use splat_playground::matrix::Matrix;
use splat_playground::particle::Shape;
use splat_playground::plane::CartesianPlane;
use splat_playground::state::run_headless;
use splat_playground::transform::RotationMatrix;
use splat_playground::{ConstantParams, ParticleParams, PlaygroundParams, WaveParams};
use std::sync::atomic::AtomicBool;

fn plane() -> CartesianPlane {
  CartesianPlane::new(1920, 1080)
}

#[test]
fn one_second_update_rotates_about_origin() {
  let mut rng = SmallRng::seed_from_u64(2024);
  let params = ParticleParams {
    gravity: 0.0,
    scale_multiplier: 1.0,
    ..ParticleParams::default()
  };
  let shape = Shape::new(4).with_velocity(Vector2::new(0.0, 0.0));
  let mut p =
    Particle::falling(&mut rng, &plane(), plane().center_pixel(), &shape, &params).unwrap();
  assert_eq!(p.body().center(), cgmath::Point2::new(0.0, 0.0));

  let before = p.body().points().clone();
  let omega = p.body().angular_velocity();
  p.update(1.0).unwrap();

  assert!((p.ttl() - (params.ttl - 1.0)).abs() < 1e-12);
  let expected = (&*RotationMatrix::new(omega) * &before).unwrap();
  assert_eq!(p.body().points(), &expected);
  assert_eq!(p.body().points().shape(), (2, 4));
}

#[test]
fn wave_direction_flips_after_crossing_width() {
  let mut rng = SmallRng::seed_from_u64(7);
  let wave = WaveParams {
    width_x: 100.0,
    width_y: 0.0,
    speed: 10.0,
    color: None,
  };
  let mut p = Particle::wave(
    &mut rng,
    &plane(),
    plane().center_pixel(),
    &Shape::new(6),
    &ParticleParams::default(),
    &ConstantParams::default(),
    &wave,
  )
  .unwrap();
  let Motion::Wave(start) = *p.motion() else {
    panic!("expected a wave particle");
  };

  let mut flipped = false;
  for _ in 0..20 {
    p.update(1.0 / 60.0).unwrap();
    let Motion::Wave(now) = *p.motion() else {
      unreachable!();
    };
    assert_eq!(now.y, start.y);
    if now.x.rising != start.x.rising {
      assert!(now.x.displacement.abs() > 100.0);
      flipped = true;
      break;
    }
  }
  assert!(flipped, "x direction never flipped");
}

#[test]
fn ttl_strictly_decreases_until_expiry() {
  let mut rng = SmallRng::seed_from_u64(3);
  let mut p = Particle::falling(
    &mut rng,
    &plane(),
    plane().center_pixel(),
    &Shape::new(12),
    &ParticleParams::default(),
  )
  .unwrap();
  let dt = 0.5;
  let mut ttl = p.ttl();
  while !p.is_expired() {
    p.update(dt).unwrap();
    assert!((p.ttl() - (ttl - dt)).abs() < 1e-12);
    assert_eq!(p.is_expired(), p.ttl() <= 0.0);
    assert_eq!(p.body().points().shape(), (2, 12));
    ttl = p.ttl();
  }
}

#[test]
fn drawn_fan_matches_point_set() {
  let mut rng = SmallRng::seed_from_u64(5);
  let plane = plane();
  let p = Particle::falling(
    &mut rng,
    &plane,
    plane.center_pixel(),
    &Shape::new(9),
    &ParticleParams::default(),
  )
  .unwrap();
  let fan = p.fan(&plane);
  assert_eq!(fan.rim.len(), 9);
  assert_eq!(fan.center.position, [960.0, 540.0]);
  let mut triangles = Vec::new();
  fan.append_triangles(&mut triangles);
  assert_eq!(triangles.len(), 27);
  assert_eq!(triangles.last(), fan.rim.first());
}

#[test]
fn failed_spawn_leaves_others_running() {
  let report = run_headless(
    PlaygroundParams {
      seed: Some(1),
      min_points: 0,
      max_points: 2,
      ..PlaygroundParams::default()
    },
    ParticleKind::Normal,
    40,
    &AtomicBool::new(true),
  );
  assert_eq!(report.frames, 40);
  assert_eq!(report.spawned, 0);
  assert_eq!(report.live, 0);
}

#[test]
fn particles_expire_in_headless_run() {
  let report = run_headless(
    PlaygroundParams {
      seed: Some(11),
      ..PlaygroundParams::default()
    },
    ParticleKind::Normal,
    400,
    &AtomicBool::new(true),
  );
  assert!(report.retired > 0);
  assert_eq!(report.spawned, report.retired + report.live as u64);
}

#[test]
fn matrix_shapes_are_checked() {
  let a = Matrix::new(2, 4).unwrap();
  let b = Matrix::new(2, 5).unwrap();
  assert!((&a + &b).is_err());
  assert!((&a * &b).is_err());
  assert!((&*RotationMatrix::new(0.3) * &a).is_ok());
}
