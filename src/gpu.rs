//! Headless GPU device management.
//!
//! This module provides [`GpuContext`], which holds the wgpu device and queue
//! the [`TransformPass`](crate::TransformPass) creates its resources on and
//! uploads uniforms through. No surface is created: presentation belongs to
//! whoever owns the window.
//!
//! # Example
//!
//! ```no_run
//! use vertex_stage::{GpuConfig, GpuContext};
//!
//! let gpu = GpuContext::new(&GpuConfig::new().label("Terrain Device"))?;
//! let buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
//!     label: Some("Scratch"),
//!     size: 256,
//!     usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
//!     mapped_at_creation: false,
//! });
//! gpu.queue.write_buffer(&buffer, 0, &[0u8; 256]);
//! # Ok::<(), vertex_stage::GpuError>(())
//! ```

/// Adapter and device selection options.
#[derive(Clone, Debug)]
pub struct GpuConfig {
    /// Backends the instance may use.
    pub backends: wgpu::Backends,
    /// Preference between integrated and discrete adapters.
    pub power_preference: wgpu::PowerPreference,
    /// Force a software adapter.
    pub force_fallback_adapter: bool,
    /// Debug label for the device.
    pub label: String,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            label: "Vertex Stage Device".to_string(),
        }
    }
}

impl GpuConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backends(mut self, backends: wgpu::Backends) -> Self {
        self.backends = backends;
        self
    }

    pub fn power_preference(mut self, power_preference: wgpu::PowerPreference) -> Self {
        self.power_preference = power_preference;
        self
    }

    pub fn fallback_adapter(mut self, force: bool) -> Self {
        self.force_fallback_adapter = force;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Errors that can occur while acquiring a device.
#[derive(Debug)]
pub enum GpuError {
    /// No adapter matched the requested options.
    NoAdapter(wgpu::RequestAdapterError),
    /// The adapter refused to create a device.
    RequestDevice(wgpu::RequestDeviceError),
}

impl std::fmt::Display for GpuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuError::NoAdapter(e) => write!(f, "No suitable GPU adapter: {}", e),
            GpuError::RequestDevice(e) => write!(f, "Failed to create device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::NoAdapter(e) => Some(e),
            GpuError::RequestDevice(e) => Some(e),
        }
    }
}

/// Core GPU context holding the wgpu device and queue.
///
/// Fields are public to allow direct access to wgpu APIs when needed.
pub struct GpuContext {
    /// The logical GPU device for creating resources and pipelines.
    pub device: wgpu::Device,
    /// The command queue for submitting work to the GPU.
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Creates a headless GPU context.
    ///
    /// 1. Creates a wgpu instance with the configured backends
    /// 2. Requests an adapter (no compatible surface)
    /// 3. Creates the logical device and command queue
    ///
    /// Blocks on the asynchronous requests with `pollster`.
    pub fn new(config: &GpuConfig) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: config.power_preference,
            compatible_surface: None,
            force_fallback_adapter: config.force_fallback_adapter,
        }))
        .map_err(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        log::debug!("using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some(config.label.as_str()),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))
        .map_err(GpuError::RequestDevice)?;

        Ok(Self { device, queue })
    }
}
