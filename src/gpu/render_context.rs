use std::fmt;

/// Why the GPU could not be brought up for a window.
#[derive(Debug)]
pub enum GpuInitError {
    /// The window handle could not back a wgpu surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused the default limits.
    Device(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    NoSurfaceFormat,
}

impl fmt::Display for GpuInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create window surface: {e}"),
            Self::Adapter(e) => write!(f, "no adapter for this surface: {e}"),
            Self::Device(e) => write!(f, "cannot open device: {e}"),
            Self::NoSurfaceFormat => {
                write!(f, "surface supports no texture format")
            }
        }
    }
}

impl std::error::Error for GpuInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Adapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::NoSurfaceFormat => None,
        }
    }
}

/// The lighting shader writes linear colour, so an sRGB target is
/// preferred; otherwise the first advertised format is used.
#[must_use]
pub fn pick_surface_format(
    formats: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

/// Mailbox keeps gesture latency at one frame without tearing. Fifo is
/// always supported and is the fallback.
#[must_use]
pub fn pick_present_mode(modes: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if modes.contains(&wgpu::PresentMode::Mailbox) {
        wgpu::PresentMode::Mailbox
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Fit a requested surface size into `1..=max_dimension` on both axes.
#[must_use]
pub fn clamp_surface_size(size: (u32, u32), max_dimension: u32) -> (u32, u32) {
    let max = max_dimension.max(1);
    (size.0.clamp(1, max), size.1.clamp(1, max))
}

/// A swapchain image being drawn this frame.
pub struct SurfaceFrame {
    texture: wgpu::SurfaceTexture,
    /// Colour attachment view of the swapchain image.
    pub view: wgpu::TextureView,
}

/// The window's device, queue and configured surface.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    max_dimension: u32,
}

impl RenderContext {
    /// Bring up a device that can present to `window`.
    ///
    /// Backend and power preference honour `WGPU_BACKEND` and
    /// `WGPU_POWER_PREF`.
    ///
    /// # Errors
    ///
    /// Returns [`GpuInitError`] naming the first setup step that failed.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, GpuInitError> {
        let instance =
            wgpu::Instance::new(&wgpu::InstanceDescriptor::from_env_or_default());
        let surface = instance
            .create_surface(window)
            .map_err(GpuInitError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::from_env()
                    .unwrap_or(wgpu::PowerPreference::HighPerformance),
                force_fallback_adapter: false,
            })
            .await
            .map_err(GpuInitError::Adapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("gyre device"),
                ..Default::default()
            })
            .await
            .map_err(GpuInitError::Device)?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&caps.formats)
            .ok_or(GpuInitError::NoSurfaceFormat)?;
        let max_dimension = device.limits().max_texture_dimension_2d;
        let (width, height) = clamp_surface_size(size, max_dimension);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: pick_present_mode(&caps.present_modes),
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: Vec::new(),
        };
        surface.configure(&device, &config);

        let info = adapter.get_info();
        log::info!(
            "{} ({:?}): {:?} {}x{} {:?}",
            info.name,
            info.backend,
            config.format,
            width,
            height,
            config.present_mode
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            max_dimension,
        })
    }

    /// Swapchain texture format.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Configured surface size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure for a new window size. A zero dimension (minimised
    /// window) leaves the surface alone.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let (width, height) =
            clamp_surface_size((width, height), self.max_dimension);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next swapchain image. A lost or outdated surface is
    /// reconfigured and retried once.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the retry also fails, or on
    /// timeout or out-of-memory.
    pub fn acquire_frame(&mut self) -> Result<SurfaceFrame, wgpu::SurfaceError> {
        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface stale, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok(SurfaceFrame { texture, view })
    }

    /// Command encoder for one frame.
    #[must_use]
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            })
    }

    /// Submit the frame's commands and show the image.
    pub fn present(&self, encoder: wgpu::CommandEncoder, frame: SurfaceFrame) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
        frame.texture.present();
    }
}

#[cfg(test)]
mod tests {
    use wgpu::{PresentMode, TextureFormat};

    use super::*;

    #[test]
    fn srgb_format_preferred() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            pick_surface_format(&formats),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn linear_format_used_when_no_srgb() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
        assert_eq!(
            pick_surface_format(&formats),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }

    #[test]
    fn mailbox_when_available_else_fifo() {
        assert_eq!(
            pick_present_mode(&[PresentMode::Fifo, PresentMode::Mailbox]),
            PresentMode::Mailbox
        );
        assert_eq!(
            pick_present_mode(&[PresentMode::Immediate, PresentMode::Fifo]),
            PresentMode::Fifo
        );
        assert_eq!(pick_present_mode(&[]), PresentMode::Fifo);
    }

    #[test]
    fn surface_size_fits_device_limits() {
        assert_eq!(clamp_surface_size((0, 0), 8192), (1, 1));
        assert_eq!(clamp_surface_size((800, 9000), 8192), (800, 8192));
        assert_eq!(clamp_surface_size((5, 5), 0), (1, 1));
    }

    #[test]
    fn missing_format_has_no_source() {
        use std::error::Error;

        let err = GpuInitError::NoSurfaceFormat;
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "surface supports no texture format");
    }
}
