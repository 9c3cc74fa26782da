use thiserror::Error;

use crate::rules::RuleError;

/// Failures that stop the application during startup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid built-in rule: {0}")]
    Rule(#[from] RuleError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
