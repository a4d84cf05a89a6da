use crate::camera::{Camera, CameraUniform};
use crate::error::{Error, Result};
use crate::initialize::ParticleKind;
use crate::plane::CartesianPlane;
use crate::render::Render;
use crate::swarm::Swarm;
use crate::{PlaygroundParams, Vertex};
use cgmath::Point2;
use log::{error, info, warn};
use rand::{rngs::SmallRng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::{
  dpi::PhysicalSize,
  event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
  event_loop::{EventLoop, EventLoopWindowTarget},
  keyboard::{KeyCode, PhysicalKey},
  window::Window,
};

/// Longest step a single frame may take; a stalled window must not fling
/// particles across the screen or invert their scale.
const MAX_FRAME_DT: f64 = 0.1;
const HEADLESS_DT: f64 = 1.0 / 60.0;
const HEADLESS_SPAWN_EVERY: u64 = 30;

/// Particles plus everything needed to drive them one frame at a time.
pub struct Playground {
  swarm: Swarm,
  plane: CartesianPlane,
  rng: SmallRng,
  params: PlaygroundParams,
  cursor: Point2<f64>,
  pending_spawn: Option<Point2<f64>>,
}

impl Playground {
  pub fn new(params: PlaygroundParams, kind: ParticleKind) -> Self {
    let rng = match params.seed {
      Some(seed) => SmallRng::seed_from_u64(seed),
      None => SmallRng::from_entropy(),
    };
    let plane = CartesianPlane::new(params.width, params.height);
    Self {
      swarm: Swarm::new(kind),
      cursor: plane.center_pixel(),
      plane,
      rng,
      params,
      pending_spawn: None,
    }
  }

  pub fn swarm(&self) -> &Swarm {
    &self.swarm
  }

  pub fn plane(&self) -> &CartesianPlane {
    &self.plane
  }

  pub fn resize(&mut self, width: u32, height: u32) {
    self.plane = CartesianPlane::new(width, height);
  }

  /// Queues a burst at the pixel `at` for the next frame.
  pub fn request_spawn(&mut self, at: Point2<f64>) {
    self.pending_spawn = Some(at);
  }

  /// Handles mouse input. Returns `true` when the event was used.
  pub fn input(&mut self, event: &WindowEvent) -> bool {
    match event {
      WindowEvent::CursorMoved { position, .. } => {
        self.cursor = Point2::new(position.x, position.y);
        true
      }
      WindowEvent::MouseInput {
        state: ElementState::Pressed,
        button: MouseButton::Left,
        ..
      } => {
        self.request_spawn(self.cursor);
        true
      }
      WindowEvent::MouseInput {
        state: ElementState::Pressed,
        button: MouseButton::Right,
        ..
      } => {
        let kind = self.swarm.select_next();
        info!("now spawning {} particles", kind.label());
        true
      }
      _ => false,
    }
  }

  /// Spawns any queued burst, runs the update pass, then the draw pass.
  pub fn frame(&mut self, dt: f64) -> Vec<Vertex> {
    if let Some(at) = self.pending_spawn.take() {
      self
        .swarm
        .spawn_burst(&mut self.rng, at, &self.plane, &self.params);
    }
    self.swarm.update(dt.min(MAX_FRAME_DT));
    self.swarm.vertices(&self.plane)
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeadlessReport {
  pub frames: u64,
  pub spawned: u64,
  pub retired: u64,
  pub live: usize,
  pub last_vertices: usize,
}

/// Runs without a window at a fixed 60 Hz step, spawning a burst at the
/// centre every 30 frames. Stops early once `running` is cleared.
pub fn run_headless(
  params: PlaygroundParams,
  kind: ParticleKind,
  frames: u64,
  running: &AtomicBool,
) -> HeadlessReport {
  let mut playground = Playground::new(params, kind);
  let center = playground.plane().center_pixel();
  let mut report = HeadlessReport {
    frames: 0,
    spawned: 0,
    retired: 0,
    live: 0,
    last_vertices: 0,
  };
  for frame in 0..frames {
    if !running.load(Ordering::SeqCst) {
      info!("interrupted after {frame} frames");
      break;
    }
    if frame % HEADLESS_SPAWN_EVERY == 0 {
      playground.request_spawn(center);
    }
    report.last_vertices = playground.frame(HEADLESS_DT).len();
    report.frames = frame + 1;
  }
  let swarm = playground.swarm();
  report.spawned = swarm.spawned();
  report.retired = swarm.retired();
  report.live = swarm.len();
  info!(
    "headless run: {} frames, {} spawned, {} retired, {} live",
    report.frames, report.spawned, report.retired, report.live
  );
  report
}

struct EventLoopWrapper {
  event_loop: EventLoop<()>,
  window: Arc<Window>,
}

impl EventLoopWrapper {
  pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
    let event_loop = EventLoop::new()?;
    let builder = winit::window::WindowBuilder::new()
      .with_title(title)
      .with_inner_size(PhysicalSize::new(width, height));
    let window = Arc::new(builder.build(&event_loop)?);

    Ok(Self { event_loop, window })
  }
}

struct SurfaceWrapper {
  surface: wgpu::Surface<'static>,
  config: wgpu::SurfaceConfiguration,
}

impl SurfaceWrapper {
  fn configure(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
    self.config.width = size.width.max(1);
    self.config.height = size.height.max(1);
    self.surface.configure(device, &self.config);
  }

  fn acquire(&mut self, device: &wgpu::Device) -> Option<wgpu::SurfaceTexture> {
    match self.surface.get_current_texture() {
      Ok(frame) => Some(frame),
      Err(wgpu::SurfaceError::Timeout) => self.surface.get_current_texture().ok(),
      Err(e) => {
        warn!("reconfiguring surface: {e}");
        self.surface.configure(device, &self.config);
        self.surface.get_current_texture().ok()
      }
    }
  }
}

struct State {
  device: wgpu::Device,
  queue: wgpu::Queue,
  surface: SurfaceWrapper,
  camera: Camera,
  camera_uniform: CameraUniform,
  camera_buffer: wgpu::Buffer,
  camera_bind_group: wgpu::BindGroup,
  render: Render,
}

impl State {
  async fn init(window: Arc<Window>) -> Result<Self> {
    let size = window.inner_size();
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
      #[cfg(not(target_arch = "wasm32"))]
      backends: wgpu::Backends::PRIMARY,
      ..Default::default()
    });
    let surface = instance.create_surface(window)?;

    let adapter = instance
      .request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
      })
      .await
      .ok_or(Error::NoAdapter)?;

    let (device, queue) = adapter
      .request_device(
        &wgpu::DeviceDescriptor {
          label: None,
          required_features: wgpu::Features::empty(),
          required_limits: wgpu::Limits::default(),
          memory_hints: Default::default(),
        },
        None,
      )
      .await?;

    let mut config = surface
      .get_default_config(&adapter, size.width.max(1), size.height.max(1))
      .ok_or(Error::NoSurfaceConfig)?;
    let view_format = config.format.add_srgb_suffix();
    config.view_formats.push(view_format);
    let mut surface = SurfaceWrapper { surface, config };
    surface.configure(&device, size);

    let camera = Camera::new(size);
    let mut camera_uniform = CameraUniform::new();
    camera_uniform.update_view_proj(&camera);

    let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Camera Buffer"),
      contents: bytemuck::cast_slice(&[camera_uniform]),
      usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let camera_bind_group_layout =
      device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
          binding: 0,
          visibility: wgpu::ShaderStages::VERTEX,
          ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
          },
          count: None,
        }],
        label: Some("camera_bind_group_layout"),
      });
    let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
      layout: &camera_bind_group_layout,
      entries: &[wgpu::BindGroupEntry {
        binding: 0,
        resource: camera_buffer.as_entire_binding(),
      }],
      label: Some("camera_bind_group"),
    });
    let render = Render::init(&surface.config, &device, &camera_bind_group_layout);

    Ok(Self {
      device,
      queue,
      surface,
      camera,
      camera_uniform,
      camera_buffer,
      camera_bind_group,
      render,
    })
  }

  fn resize(&mut self, size: PhysicalSize<u32>) {
    self.surface.configure(&self.device, size);
    self.camera.resize(size);
    self.camera_uniform.update_view_proj(&self.camera);
    self.queue.write_buffer(
      &self.camera_buffer,
      0,
      bytemuck::cast_slice(&[self.camera_uniform]),
    );
  }

  fn draw(&mut self, vertices: &[Vertex]) {
    self.render.upload(&self.device, &self.queue, vertices);
    let Some(frame) = self.surface.acquire(&self.device) else {
      error!("no surface texture this frame");
      return;
    };
    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
      format: Some(self.surface.config.view_formats[0]),
      ..wgpu::TextureViewDescriptor::default()
    });
    self.render.render(
      &view,
      &self.device,
      &self.queue,
      &self.camera_bind_group,
    );
    frame.present();
  }
}

fn title(kind: ParticleKind) -> String {
  format!("Splat Playground - {}", kind.label())
}

fn start(params: PlaygroundParams, kind: ParticleKind) -> Result<()> {
  let window_loop = EventLoopWrapper::new(&title(kind), params.width, params.height)?;
  let size = window_loop.window.inner_size();
  let mut context = pollster::block_on(State::init(window_loop.window.clone()))?;
  let mut playground = Playground::new(params, kind);
  playground.resize(size.width, size.height);
  info!(
    "window {}x{}, left click spawns, right click cycles kinds",
    size.width, size.height
  );

  let window = window_loop.window;
  let mut last_frame = Instant::now();
  window_loop.event_loop.run(
    move |event, target: &EventLoopWindowTarget<()>| match event {
      Event::AboutToWait => window.request_redraw(),
      Event::WindowEvent { event, window_id } if window_id == window.id() => {
        let selected = playground.swarm().selected();
        if playground.input(&event) {
          if playground.swarm().selected() != selected {
            window.set_title(&title(playground.swarm().selected()));
          }
          return;
        }
        match event {
          WindowEvent::CloseRequested
          | WindowEvent::KeyboardInput {
            event:
              KeyEvent {
                state: ElementState::Pressed,
                physical_key: PhysicalKey::Code(KeyCode::Escape),
                ..
              },
            ..
          } => target.exit(),
          WindowEvent::Resized(size) => {
            context.resize(size);
            playground.resize(size.width.max(1), size.height.max(1));
          }
          WindowEvent::RedrawRequested => {
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f64();
            last_frame = now;
            let vertices = playground.frame(dt);
            context.draw(&vertices);
          }
          _ => {}
        }
      }
      _ => {}
    },
  )?;
  Ok(())
}

/// Opens the window, or runs `frames` frames headless.
pub fn run(
  params: PlaygroundParams,
  kind: ParticleKind,
  headless: bool,
  frames: u64,
) -> Result<()> {
  if headless {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst)) {
      warn!("could not install Ctrl-C handler: {e}");
    }
    run_headless(params, kind, frames, &running);
    Ok(())
  } else {
    start(params, kind)
  }
}
