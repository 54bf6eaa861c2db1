use std::hash::{Hash, Hasher};

use xxhash_rust::xxh3::Xxh3;

use crate::format::FormatInfo;
use crate::swizzle::{DepthStencilMode, SampleState, Swizzle, SwizzleComponent};
use crate::target::TextureTarget;

/// Number of faces in one cube.
pub const CUBE_FACES: u32 = 6;

/// Every required input of [`TextureDescriptor`].
///
/// Values are taken as-is: keeping them consistent with the hardware state (e.g. `levels >= 1`)
/// is the producer's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureCreateDesc {
    pub guest_address: u64,
    pub mapped_address: u64,
    pub width: u32,
    pub height: u32,
    pub depth_or_layers: u32,
    pub levels: u32,
    pub samples_x: u32,
    pub samples_y: u32,
    /// Bytes per row; only read when `is_linear` is set.
    pub stride: u32,
    pub is_linear: bool,
    pub tile_blocks_y: u32,
    pub tile_blocks_z: u32,
    pub tile_blocks_per_row_x: u32,
    pub target: TextureTarget,
    pub format_info: FormatInfo,
}

/// The active memory layout parameters of a descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryLayout {
    Linear {
        stride: u32,
    },
    Tiled {
        blocks_y: u32,
        blocks_z: u32,
        blocks_per_row_x: u32,
    },
}

/// Texel extent of one mip level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent3d {
    pub width: u32,
    pub height: u32,
    /// Depth for 3D textures, layer count for everything else.
    pub depth_or_array_layers: u32,
}

/// Immutable description of a guest texture: where it lives, its geometry, its storage layout and
/// how it is sampled.
///
/// Descriptors compare and hash by value, so two descriptors built from the same inputs are
/// interchangeable as cache keys.
///
/// `depth_or_layers` is overloaded by `target`; read it through [`Self::effective_depth`] and
/// [`Self::layer_count`] rather than interpreting the raw value at call sites.
///
/// Both the linear (`stride`) and tiled (`tile_blocks_*`) parameter groups are stored, but only the
/// group selected by `is_linear` means anything. [`Self::memory_layout`] returns just that group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureDescriptor {
    guest_address: u64,
    mapped_address: u64,
    width: u32,
    height: u32,
    depth_or_layers: u32,
    levels: u32,
    samples_x: u32,
    samples_y: u32,
    stride: u32,
    is_linear: bool,
    tile_blocks_y: u32,
    tile_blocks_z: u32,
    tile_blocks_per_row_x: u32,
    target: TextureTarget,
    format_info: FormatInfo,
    depth_stencil_mode: DepthStencilMode,
    swizzle_r: SwizzleComponent,
    swizzle_g: SwizzleComponent,
    swizzle_b: SwizzleComponent,
    swizzle_a: SwizzleComponent,
}

impl TextureDescriptor {
    /// Builds a descriptor with a depth-channel read and the identity swizzle.
    pub fn new(desc: TextureCreateDesc) -> Self {
        Self::with_sample_state(desc, SampleState::default())
    }

    pub fn with_sample_state(desc: TextureCreateDesc, sample_state: SampleState) -> Self {
        let TextureCreateDesc {
            guest_address,
            mapped_address,
            width,
            height,
            depth_or_layers,
            levels,
            samples_x,
            samples_y,
            stride,
            is_linear,
            tile_blocks_y,
            tile_blocks_z,
            tile_blocks_per_row_x,
            target,
            format_info,
        } = desc;
        let swizzle = sample_state.swizzle;

        Self {
            guest_address,
            mapped_address,
            width,
            height,
            depth_or_layers,
            levels,
            samples_x,
            samples_y,
            stride,
            is_linear,
            tile_blocks_y,
            tile_blocks_z,
            tile_blocks_per_row_x,
            target,
            format_info,
            depth_stencil_mode: sample_state.depth_stencil_mode,
            swizzle_r: swizzle.r,
            swizzle_g: swizzle.g,
            swizzle_b: swizzle.b,
            swizzle_a: swizzle.a,
        }
    }

    pub fn guest_address(&self) -> u64 {
        self.guest_address
    }

    pub fn mapped_address(&self) -> u64 {
        self.mapped_address
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Base level height. For 1D array targets this is the layer count.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw overloaded depth/layer value; see [`Self::effective_depth`] and [`Self::layer_count`].
    pub fn depth_or_layers(&self) -> u32 {
        self.depth_or_layers
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn samples_x(&self) -> u32 {
        self.samples_x
    }

    pub fn samples_y(&self) -> u32 {
        self.samples_y
    }

    pub fn total_samples(&self) -> u32 {
        self.samples_x.saturating_mul(self.samples_y)
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn is_linear(&self) -> bool {
        self.is_linear
    }

    pub fn tile_blocks_y(&self) -> u32 {
        self.tile_blocks_y
    }

    pub fn tile_blocks_z(&self) -> u32 {
        self.tile_blocks_z
    }

    pub fn tile_blocks_per_row_x(&self) -> u32 {
        self.tile_blocks_per_row_x
    }

    pub fn target(&self) -> TextureTarget {
        self.target
    }

    pub fn format_info(&self) -> &FormatInfo {
        &self.format_info
    }

    pub fn depth_stencil_mode(&self) -> DepthStencilMode {
        self.depth_stencil_mode
    }

    pub fn swizzle_r(&self) -> SwizzleComponent {
        self.swizzle_r
    }

    pub fn swizzle_g(&self) -> SwizzleComponent {
        self.swizzle_g
    }

    pub fn swizzle_b(&self) -> SwizzleComponent {
        self.swizzle_b
    }

    pub fn swizzle_a(&self) -> SwizzleComponent {
        self.swizzle_a
    }

    pub fn sample_state(&self) -> SampleState {
        SampleState {
            depth_stencil_mode: self.depth_stencil_mode,
            swizzle: Swizzle::new(
                self.swizzle_r,
                self.swizzle_g,
                self.swizzle_b,
                self.swizzle_a,
            ),
        }
    }

    /// Number of depth slices to walk when addressing volume data.
    ///
    /// Only 3D textures have a depth axis; every other target reports 1.
    pub fn effective_depth(&self) -> u32 {
        match self.target {
            TextureTarget::Texture3D => self.depth_or_layers,
            _ => 1,
        }
    }

    /// Number of addressable 2D layers (array slices and cube faces).
    ///
    /// A plain cubemap always has 6 faces, even if `depth_or_layers` says otherwise (including 0).
    /// 1D arrays report 1 here since their layers live in `height`. Cube array layer counts
    /// saturate at `u32::MAX`. [`TextureTarget::has_depth_or_layers`] is true exactly for the
    /// targets that read `depth_or_layers` here or in [`Self::effective_depth`].
    pub fn layer_count(&self) -> u32 {
        match self.target {
            TextureTarget::Texture2DArray | TextureTarget::Texture2DMultisampleArray => {
                self.depth_or_layers
            }
            TextureTarget::CubemapArray => self.depth_or_layers.saturating_mul(CUBE_FACES),
            TextureTarget::Cubemap => CUBE_FACES,
            TextureTarget::Texture1D
            | TextureTarget::Texture2D
            | TextureTarget::Texture3D
            | TextureTarget::Texture1DArray
            | TextureTarget::Texture2DMultisample
            | TextureTarget::TextureBuffer => 1,
        }
    }

    pub fn memory_layout(&self) -> MemoryLayout {
        if self.is_linear {
            MemoryLayout::Linear {
                stride: self.stride,
            }
        } else {
            MemoryLayout::Tiled {
                blocks_y: self.tile_blocks_y,
                blocks_z: self.tile_blocks_z,
                blocks_per_row_x: self.tile_blocks_per_row_x,
            }
        }
    }

    /// Texel extent of mip `level`, or `None` if the texture has no such level.
    ///
    /// Width, height and 3D depth halve per level down to 1. Layer counts do not shrink, which
    /// includes the `height` of a 1D array.
    pub fn level_extent(&self, level: u32) -> Option<Extent3d> {
        if level >= self.levels {
            return None;
        }

        let height = match self.target {
            TextureTarget::Texture1DArray => self.height,
            _ => mip_dimension(self.height, level),
        };
        let depth_or_array_layers = match self.target {
            TextureTarget::Texture3D => mip_dimension(self.effective_depth(), level),
            _ => self.layer_count(),
        };

        Some(Extent3d {
            width: mip_dimension(self.width, level),
            height,
            depth_or_array_layers,
        })
    }

    /// 64-bit digest of every field, for caches keyed by integer rather than by descriptor.
    ///
    /// Deterministic for a given build (independent of thread and process), so it can be shared
    /// across workers. Equal descriptors always produce equal fingerprints.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// `base >> level`, clamped to 1 unless the base dimension itself is 0.
fn mip_dimension(base: u32, level: u32) -> u32 {
    if base == 0 {
        return 0;
    }
    base.checked_shr(level).unwrap_or(0).max(1)
}
