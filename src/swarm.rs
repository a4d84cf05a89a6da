use crate::behavior::Particle;
use crate::draw::Drawable;
use crate::initialize::{random_point_count, spawn, ParticleKind};
use crate::particle::Shape;
use crate::plane::CartesianPlane;
use crate::{PlaygroundParams, Vertex};
use cgmath::Point2;
use log::{debug, error, warn};
use rand::Rng;

/// Owns every live particle, in spawn order.
#[derive(Debug, Default)]
pub struct Swarm {
  particles: Vec<Particle>,
  selected: ParticleKind,
  spawned: u64,
  retired: u64,
}

impl Swarm {
  pub fn new(selected: ParticleKind) -> Self {
    Self {
      selected,
      ..Self::default()
    }
  }

  pub fn selected(&self) -> ParticleKind {
    self.selected
  }

  /// Moves the selection on to the next kind and returns it.
  pub fn select_next(&mut self) -> ParticleKind {
    self.selected = self.selected.next();
    self.selected
  }

  pub fn len(&self) -> usize {
    self.particles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.particles.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Particle> {
    self.particles.iter()
  }

  /// Total particles ever added.
  pub fn spawned(&self) -> u64 {
    self.spawned
  }

  /// Total particles removed for expiring or failing to update.
  pub fn retired(&self) -> u64 {
    self.retired
  }

  pub fn push(&mut self, particle: Particle) {
    self.particles.push(particle);
    self.spawned += 1;
  }

  /// Spawns `params.burst` particles of the selected kind at the pixel `click`.
  ///
  /// A particle that cannot be built is logged and skipped. Returns how many
  /// were added.
  pub fn spawn_burst<R: Rng + ?Sized>(
    &mut self,
    rng: &mut R,
    click: Point2<f64>,
    plane: &CartesianPlane,
    params: &PlaygroundParams,
  ) -> usize {
    let mut added = 0;
    for _ in 0..params.burst {
      let built = random_point_count(rng, params)
        .and_then(|n| spawn(rng, self.selected, click, plane, &Shape::new(n), params));
      match built {
        Ok(p) => {
          self.push(p);
          added += 1;
        }
        Err(e) => warn!("skipping {} particle: {e}", self.selected.label()),
      }
    }
    debug!(
      "spawned {added} {} particles at ({:.0}, {:.0}), {} live",
      self.selected.label(),
      click.x,
      click.y,
      self.len()
    );
    added
  }

  /// Advances every particle by `dt` and drops the expired ones.
  ///
  /// A particle whose update fails is dropped too, without disturbing the
  /// rest. Returns how many were removed.
  pub fn update(&mut self, dt: f64) -> usize {
    let before = self.particles.len();
    self.particles.retain_mut(|p| match p.update(dt) {
      Ok(()) => !p.is_expired(),
      Err(e) => {
        error!("dropping {} particle after failed update: {e}", p.kind().label());
        false
      }
    });
    let removed = before - self.particles.len();
    self.retired += removed as u64;
    removed
  }

  /// Triangle list covering every live particle.
  pub fn vertices(&self, plane: &CartesianPlane) -> Vec<Vertex> {
    let mut out = Vec::new();
    for p in &self.particles {
      p.fan(plane).append_triangles(&mut out);
    }
    out
  }
}
