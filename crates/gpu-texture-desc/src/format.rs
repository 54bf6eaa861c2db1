/// How the depth and stencil aspects of a combined format map onto the red/green channels.
///
/// Packed 24-bit depth formats put stencil in the low byte, which the sampler exposes as red;
/// everything else exposes depth as red and stencil as green.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthStencilPacking {
    DepthInRed,
    StencilInRed,
}

/// Pixel format record owned by an external format table.
///
/// The descriptor only carries this around by value; nothing in this crate interprets `id` or
/// derives byte sizes from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatInfo {
    /// Host format identifier, meaningful only to the table that produced it.
    pub id: u32,
    pub block_width: u8,
    pub block_height: u8,
    pub bytes_per_block: u8,
    pub components: u8,
    pub depth_stencil: Option<DepthStencilPacking>,
}

impl FormatInfo {
    pub const fn color(id: u32, bytes_per_block: u8, components: u8) -> Self {
        Self {
            id,
            block_width: 1,
            block_height: 1,
            bytes_per_block,
            components,
            depth_stencil: None,
        }
    }

    pub const fn compressed(id: u32, block_width: u8, block_height: u8, bytes_per_block: u8) -> Self {
        Self {
            id,
            block_width,
            block_height,
            bytes_per_block,
            components: 4,
            depth_stencil: None,
        }
    }

    pub const fn depth_stencil(id: u32, bytes_per_block: u8, packing: DepthStencilPacking) -> Self {
        Self {
            id,
            block_width: 1,
            block_height: 1,
            bytes_per_block,
            components: 2,
            depth_stencil: Some(packing),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.block_width > 1 || self.block_height > 1
    }

    pub fn is_depth_stencil(&self) -> bool {
        self.depth_stencil.is_some()
    }
}

impl Default for FormatInfo {
    /// Placeholder used when a format id cannot be resolved (RGBA8-shaped, id 0).
    fn default() -> Self {
        Self::color(0, 4, 4)
    }
}
