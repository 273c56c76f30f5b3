//! Graphics configuration values and validation.
//!
//! A [`GraphicsConfig`] is an immutable description of one settings preset
//! (or a custom combination). Values outside the supported sets are rejected
//! by [`GraphicsConfig::validate`] rather than clamped, so a bad value never
//! silently changes what the user asked for.

/// Shadow map resolutions the renderer supports.
pub const SUPPORTED_SHADOW_RESOLUTIONS: [u32; 4] = [512, 1024, 2048, 4096];

/// MSAA sample counts the renderer supports (0 = off).
pub const SUPPORTED_SAMPLE_COUNTS: [u32; 4] = [0, 2, 4, 8];

/// Texture filtering quality tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFilterQuality {
    Low,
    #[default]
    Medium,
    High,
}

/// One graphics settings preset.
///
/// Construct directly or start from one of the named presets and adjust:
///
/// ```
/// use veldra_core::GraphicsConfig;
///
/// let config = GraphicsConfig {
///     shadow_resolution: 2048,
///     ..GraphicsConfig::medium()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsConfig {
    /// MSAA sample count, 0 disables antialiasing.
    pub antialiasing_samples: u32,
    /// Whether shadow mapping is enabled at all.
    pub shadow_enabled: bool,
    /// Shadow map edge length in texels (square, power of two).
    pub shadow_resolution: u32,
    /// Back-face culling for the 3D scene pass.
    pub cull_face_enabled: bool,
    /// Texture filtering quality.
    pub texture_filter_quality: TextureFilterQuality,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self::medium()
    }
}

impl GraphicsConfig {
    pub fn low() -> Self {
        Self {
            antialiasing_samples: 0,
            shadow_enabled: false,
            shadow_resolution: 512,
            cull_face_enabled: true,
            texture_filter_quality: TextureFilterQuality::Low,
        }
    }

    pub fn medium() -> Self {
        Self {
            antialiasing_samples: 2,
            shadow_enabled: true,
            shadow_resolution: 1024,
            cull_face_enabled: true,
            texture_filter_quality: TextureFilterQuality::Medium,
        }
    }

    pub fn high() -> Self {
        Self {
            antialiasing_samples: 4,
            shadow_enabled: true,
            shadow_resolution: 2048,
            cull_face_enabled: true,
            texture_filter_quality: TextureFilterQuality::High,
        }
    }

    pub fn ultra() -> Self {
        Self {
            antialiasing_samples: 8,
            shadow_enabled: true,
            shadow_resolution: 4096,
            cull_face_enabled: true,
            texture_filter_quality: TextureFilterQuality::High,
        }
    }

    /// Check every field against the supported sets.
    ///
    /// The shadow resolution is validated even when shadows are disabled, so
    /// a preset that later toggles shadows on cannot smuggle in a bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_SAMPLE_COUNTS.contains(&self.antialiasing_samples) {
            return Err(ConfigError::UnsupportedSampleCount {
                requested: self.antialiasing_samples,
            });
        }
        if !SUPPORTED_SHADOW_RESOLUTIONS.contains(&self.shadow_resolution) {
            return Err(ConfigError::UnsupportedShadowResolution {
                requested: self.shadow_resolution,
            });
        }
        Ok(())
    }
}

/// A configuration value outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// MSAA sample count not in the supported set.
    UnsupportedSampleCount { requested: u32 },

    /// Shadow map resolution not in the supported set.
    UnsupportedShadowResolution { requested: u32 },

    /// A value the device cannot honor (e.g. framebuffer size limit).
    ExceedsDeviceLimit {
        what: &'static str,
        requested: u32,
        limit: u32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnsupportedSampleCount { requested } => write!(
                f,
                "unsupported MSAA sample count {} (supported: {:?})",
                requested, SUPPORTED_SAMPLE_COUNTS
            ),
            ConfigError::UnsupportedShadowResolution { requested } => write!(
                f,
                "unsupported shadow resolution {} (supported: {:?})",
                requested, SUPPORTED_SHADOW_RESOLUTIONS
            ),
            ConfigError::ExceedsDeviceLimit {
                what,
                requested,
                limit,
            } => write!(f, "{} {} exceeds device limit {}", what, requested, limit),
        }
    }
}

impl std::error::Error for ConfigError {}
