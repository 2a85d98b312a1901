use thiserror::Error;

/// Failures while bringing up the window and GPU
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface does not support adapter {0}")]
    UnsupportedSurface(String),

    #[error("GPU out of memory")]
    OutOfMemory,
}

pub type Result<T> = std::result::Result<T, ViewerError>;
