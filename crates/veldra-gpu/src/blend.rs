//! Blend mode presets for common rendering scenarios.

use crate::types::{BlendFactor, BlendFunc};

/// Predefined blend modes for common use cases.
///
/// Use these to configure how source and destination colors are combined
/// during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No blending - source completely replaces destination.
    Replace,

    /// Standard alpha blending for transparent content.
    ///
    /// Formula: `src.rgb * src.a + dst.rgb * (1 - src.a)`
    ///
    /// Use for: UI overlays over scene content, sprites with transparency.
    #[default]
    Alpha,

    /// Premultiplied alpha blending.
    ///
    /// Formula: `src.rgb + dst.rgb * (1 - src.a)`
    ///
    /// Use for: compositing framebuffers with premultiplied alpha.
    PremultipliedAlpha,

    /// Additive blending - colors are added together.
    ///
    /// Formula: `src.rgb + dst.rgb`
    ///
    /// Use for: glow effects, particles, light sources.
    Additive,

    /// Custom factor pair for advanced use cases.
    Custom(BlendFunc),
}

impl BlendMode {
    /// Convert to the blend factor pair the device expects.
    pub fn func(self) -> BlendFunc {
        match self {
            BlendMode::Replace => BlendFunc::new(BlendFactor::One, BlendFactor::Zero),
            BlendMode::Alpha => {
                BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)
            }
            BlendMode::PremultipliedAlpha => {
                BlendFunc::new(BlendFactor::One, BlendFactor::OneMinusSrcAlpha)
            }
            BlendMode::Additive => BlendFunc::new(BlendFactor::SrcAlpha, BlendFactor::One),
            BlendMode::Custom(func) => func,
        }
    }
}

impl From<BlendFunc> for BlendMode {
    fn from(func: BlendFunc) -> Self {
        BlendMode::Custom(func)
    }
}
