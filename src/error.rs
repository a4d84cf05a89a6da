use thiserror::Error;

/// Errors raised by the transform core and the host loop around it.
#[derive(Debug, Error)]
pub enum Error {
  /// Operands of a matrix operation have incompatible shapes.
  #[error("dimensions must agree for {op}: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
  DimensionMismatch {
    op: &'static str,
    left: (usize, usize),
    right: (usize, usize),
  },

  /// A matrix or particle was asked to be built from bad arguments.
  #[error("invalid construction argument: {0}")]
  InvalidArgument(String),

  #[error("failed to create event loop: {0}")]
  EventLoop(#[from] winit::error::EventLoopError),

  #[error("failed to create window: {0}")]
  Window(#[from] winit::error::OsError),

  #[error("failed to create surface: {0}")]
  Surface(#[from] wgpu::CreateSurfaceError),

  #[error("no compatible GPU adapter found")]
  NoAdapter,

  #[error("failed to create GPU device: {0}")]
  Device(#[from] wgpu::RequestDeviceError),

  #[error("surface is not supported by the adapter")]
  NoSurfaceConfig,
}

pub type Result<T> = std::result::Result<T, Error>;
