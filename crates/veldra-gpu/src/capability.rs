//! Device capability reporting.

use bitflags::bitflags;

bitflags! {
    /// MSAA sample counts a device supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SampleCounts: u32 {
        const X2 = 1 << 1;
        const X4 = 1 << 2;
        const X8 = 1 << 3;
    }
}

impl SampleCounts {
    /// Whether the device can run at the given sample count (0 = MSAA off,
    /// always supported).
    pub fn supports(&self, samples: u32) -> bool {
        match samples {
            0 => true,
            2 => self.contains(SampleCounts::X2),
            4 => self.contains(SampleCounts::X4),
            8 => self.contains(SampleCounts::X8),
            _ => false,
        }
    }
}

/// Limits reported by a [`GpuApi`](crate::api::GpuApi) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuCapabilities {
    /// Largest framebuffer edge length the device can allocate.
    pub max_framebuffer_size: u32,
    /// Supported MSAA sample counts.
    pub msaa: SampleCounts,
}

impl Default for GpuCapabilities {
    fn default() -> Self {
        GpuCapabilities {
            max_framebuffer_size: 8192,
            msaa: SampleCounts::all(),
        }
    }
}
