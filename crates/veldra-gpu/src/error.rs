use crate::types::FramebufferId;
use veldra_core::ConfigError;

/// Errors from the GPU resource layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The device could not allocate a resource (out of GPU memory).
    AllocationFailed {
        what: &'static str,
        width: u32,
        height: u32,
    },

    /// A framebuffer handle no longer refers to a live framebuffer.
    MissingFramebuffer(FramebufferId),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::AllocationFailed {
                what,
                width,
                height,
            } => write!(f, "failed to allocate {} ({}x{})", what, width, height),
            RenderError::MissingFramebuffer(id) => {
                write!(f, "framebuffer {} does not exist", id.0)
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Errors surfaced synchronously by [`SettingsApplier::apply`].
///
/// [`SettingsApplier::apply`]: crate::settings::SettingsApplier::apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The configuration was rejected before any GPU mutation.
    Config(ConfigError),

    /// Shadow framebuffer reallocation failed; the previous shadow target
    /// was kept and the rest of the configuration still applied.
    ShadowAllocation {
        resolution: u32,
        source: RenderError,
    },
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Config(err) => write!(f, "invalid configuration: {}", err),
            SettingsError::ShadowAllocation { resolution, source } => write!(
                f,
                "shadow map reallocation to {0}x{0} failed: {1}",
                resolution, source
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Config(err) => Some(err),
            SettingsError::ShadowAllocation { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for SettingsError {
    fn from(err: ConfigError) -> Self {
        SettingsError::Config(err)
    }
}
