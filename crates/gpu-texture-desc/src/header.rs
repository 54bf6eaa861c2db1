//! Decoder for the raw 32-byte texture image header the guest places in its texture pool.
//!
//! This is the producer side of [`TextureDescriptor`]: it turns packed header words into typed
//! values and resolves the logical [`TextureTarget`] from the hardware target plus the
//! multisample mode. Address translation and format tables stay with the caller; the mapped
//! address is passed in and formats are looked up through [`FormatResolver`].

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DecodeConfig;
use crate::descriptor::{TextureCreateDesc, TextureDescriptor};
use crate::format::{DepthStencilPacking, FormatInfo};
use crate::swizzle::{DepthStencilMode, SampleState, Swizzle, SwizzleComponent};
use crate::target::TextureTarget;

pub const TEXTURE_HEADER_WORDS: usize = 8;
pub const TEXTURE_HEADER_SIZE: usize = TEXTURE_HEADER_WORDS * 4;

/// Pitch strides are stored in 32-byte units.
const STRIDE_SHIFT: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("texture header is {len} bytes, expected {expected}")]
    Truncated { len: usize, expected: usize },

    #[error("unknown texture header kind {0}")]
    UnknownKind(u32),

    #[error("unknown hardware texture target {0}")]
    UnknownTarget(u32),

    #[error("unknown multisample mode {0}")]
    UnknownMultisampleMode(u32),

    #[error("invalid swizzle source {value} for channel {channel}")]
    InvalidSwizzleSource { channel: char, value: u32 },
}

/// Looks up the host format record for a guest format id.
///
/// Implemented by the emulator's format table. Closures work too, which keeps tests small.
pub trait FormatResolver {
    fn resolve(&self, format_id: u32, srgb: bool) -> Option<FormatInfo>;
}

impl<F> FormatResolver for F
where
    F: Fn(u32, bool) -> Option<FormatInfo>,
{
    fn resolve(&self, format_id: u32, srgb: bool) -> Option<FormatInfo> {
        self(format_id, srgb)
    }
}

/// Layout family of a header (word 2, bits 21..24).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum HeaderKind {
    OneDBuffer = 0,
    PitchColorKey = 1,
    Pitch = 2,
    BlockLinear = 3,
    BlockLinearColorKey = 4,
}

impl HeaderKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0 => Self::OneDBuffer,
            1 => Self::PitchColorKey,
            2 => Self::Pitch,
            3 => Self::BlockLinear,
            4 => Self::BlockLinearColorKey,
            _ => return None,
        })
    }

    pub fn is_linear(self) -> bool {
        matches!(self, Self::OneDBuffer | Self::PitchColorKey | Self::Pitch)
    }
}

/// Hardware texture target (word 4, bits 23..27), before multisampling is folded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum HardwareTarget {
    Texture1D = 0,
    Texture2D = 1,
    Texture3D = 2,
    Cubemap = 3,
    Texture1DArray = 4,
    Texture2DArray = 5,
    Texture1DBuffer = 6,
    Texture2DNoMipmap = 7,
    CubemapArray = 8,
}

impl HardwareTarget {
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0 => Self::Texture1D,
            1 => Self::Texture2D,
            2 => Self::Texture3D,
            3 => Self::Cubemap,
            4 => Self::Texture1DArray,
            5 => Self::Texture2DArray,
            6 => Self::Texture1DBuffer,
            7 => Self::Texture2DNoMipmap,
            8 => Self::CubemapArray,
            _ => return None,
        })
    }

    pub fn resolve(self, multisample: bool) -> TextureTarget {
        match self {
            Self::Texture1D => TextureTarget::Texture1D,
            Self::Texture2D | Self::Texture2DNoMipmap if multisample => {
                TextureTarget::Texture2DMultisample
            }
            Self::Texture2D | Self::Texture2DNoMipmap => TextureTarget::Texture2D,
            Self::Texture3D => TextureTarget::Texture3D,
            Self::Cubemap => TextureTarget::Cubemap,
            Self::Texture1DArray => TextureTarget::Texture1DArray,
            Self::Texture2DArray if multisample => TextureTarget::Texture2DMultisampleArray,
            Self::Texture2DArray => TextureTarget::Texture2DArray,
            Self::Texture1DBuffer => TextureTarget::TextureBuffer,
            Self::CubemapArray => TextureTarget::CubemapArray,
        }
    }
}

/// Multisample mode (word 7, bits 8..12). Names are `<samples in X>x<samples in Y>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum MultisampleMode {
    Ms1x1 = 0,
    Ms2x2 = 2,
    Ms4x2 = 4,
    Ms2x1 = 5,
    Ms4x4 = 6,
}

impl MultisampleMode {
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0 => Self::Ms1x1,
            2 => Self::Ms2x2,
            4 => Self::Ms4x2,
            5 => Self::Ms2x1,
            6 => Self::Ms4x4,
            _ => return None,
        })
    }

    pub fn samples_x(self) -> u32 {
        match self {
            Self::Ms1x1 => 1,
            Self::Ms2x1 | Self::Ms2x2 => 2,
            Self::Ms4x2 | Self::Ms4x4 => 4,
        }
    }

    pub fn samples_y(self) -> u32 {
        match self {
            Self::Ms1x1 | Self::Ms2x1 => 1,
            Self::Ms2x2 | Self::Ms4x2 => 2,
            Self::Ms4x4 => 4,
        }
    }
}

fn swizzle_source(value: u32) -> Option<SwizzleComponent> {
    Some(match value {
        0 => SwizzleComponent::Zero,
        2 => SwizzleComponent::Red,
        3 => SwizzleComponent::Green,
        4 => SwizzleComponent::Blue,
        5 => SwizzleComponent::Alpha,
        // Integer and float "one" sample identically once the format is known.
        6 | 7 => SwizzleComponent::One,
        _ => return None,
    })
}

/// Raw texture image header, as eight little-endian words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureHeader {
    pub words: [u32; TEXTURE_HEADER_WORDS],
}

impl TextureHeader {
    pub const fn new(words: [u32; TEXTURE_HEADER_WORDS]) -> Self {
        Self { words }
    }

    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < TEXTURE_HEADER_SIZE {
            return Err(HeaderError::Truncated {
                len: bytes.len(),
                expected: TEXTURE_HEADER_SIZE,
            });
        }

        let mut words = [0u32; TEXTURE_HEADER_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Self { words })
    }

    pub fn format_id(&self) -> u32 {
        self.words[0] & 0x7f
    }

    /// Raw swizzle sources for the R, G, B and A outputs.
    pub fn swizzle_sources(&self) -> [u32; 4] {
        let w = self.words[0];
        [(w >> 19) & 7, (w >> 22) & 7, (w >> 25) & 7, (w >> 28) & 7]
    }

    pub fn address(&self) -> u64 {
        u64::from(self.words[1]) | (u64::from(self.words[2] & 0xffff) << 32)
    }

    pub fn kind(&self) -> Result<HeaderKind, HeaderError> {
        let raw = (self.words[2] >> 21) & 7;
        HeaderKind::from_u32(raw).ok_or(HeaderError::UnknownKind(raw))
    }

    /// Row pitch in bytes. Only meaningful for pitch kinds.
    pub fn stride(&self) -> u32 {
        (self.words[3] & 0xffff) << STRIDE_SHIFT
    }

    pub fn tile_blocks_y(&self) -> u32 {
        1 << ((self.words[3] >> 3) & 7)
    }

    pub fn tile_blocks_z(&self) -> u32 {
        1 << ((self.words[3] >> 6) & 7)
    }

    pub fn tile_blocks_per_row_x(&self) -> u32 {
        1 << ((self.words[3] >> 10) & 7)
    }

    pub fn levels(&self) -> u32 {
        (self.words[3] >> 28) + 1
    }

    pub fn width(&self) -> u32 {
        (self.words[4] & 0xffff) + 1
    }

    /// Element count of a buffer texture; the high bits are borrowed from word 3.
    pub fn buffer_width(&self) -> u32 {
        ((self.words[4] & 0xffff) | (self.words[3] << 16)).saturating_add(1)
    }

    pub fn is_srgb(&self) -> bool {
        self.words[4] & (1 << 22) != 0
    }

    pub fn hardware_target(&self) -> Result<HardwareTarget, HeaderError> {
        let raw = (self.words[4] >> 23) & 0xf;
        HardwareTarget::from_u32(raw).ok_or(HeaderError::UnknownTarget(raw))
    }

    pub fn height(&self) -> u32 {
        (self.words[5] & 0xffff) + 1
    }

    pub fn depth_or_layers(&self) -> u32 {
        ((self.words[5] >> 16) & 0x3fff) + 1
    }

    pub fn multisample_mode(&self) -> Result<MultisampleMode, HeaderError> {
        let raw = (self.words[7] >> 8) & 0xf;
        MultisampleMode::from_u32(raw).ok_or(HeaderError::UnknownMultisampleMode(raw))
    }

    fn swizzle(&self, config: &DecodeConfig) -> Result<Swizzle, HeaderError> {
        let mut out = [SwizzleComponent::Zero; 4];
        for ((slot, value), channel) in out
            .iter_mut()
            .zip(self.swizzle_sources())
            .zip(['r', 'g', 'b', 'a'])
        {
            *slot = match swizzle_source(value) {
                Some(component) => component,
                None if config.strict_swizzle => {
                    return Err(HeaderError::InvalidSwizzleSource { channel, value });
                }
                None => {
                    warn!(channel = %channel, value, "invalid swizzle source; reading as zero");
                    SwizzleComponent::Zero
                }
            };
        }
        Ok(Swizzle::new(out[0], out[1], out[2], out[3]))
    }
}

/// Picks the aspect a depth/stencil texture exposes, from the first red or green swizzle source.
fn depth_stencil_mode(format: &FormatInfo, swizzle: &Swizzle) -> DepthStencilMode {
    let Some(packing) = format.depth_stencil else {
        return DepthStencilMode::Depth;
    };
    let Some(component) = swizzle
        .as_array()
        .into_iter()
        .find(|c| c.is_red_or_green())
    else {
        return DepthStencilMode::Depth;
    };

    match (packing, component) {
        (DepthStencilPacking::StencilInRed, SwizzleComponent::Red) => DepthStencilMode::Stencil,
        (DepthStencilPacking::StencilInRed, _) => DepthStencilMode::Depth,
        (DepthStencilPacking::DepthInRed, SwizzleComponent::Red) => DepthStencilMode::Depth,
        (DepthStencilPacking::DepthInRed, _) => DepthStencilMode::Stencil,
    }
}

/// Decodes `header` into a descriptor for the texture at `mapped_address`.
///
/// The parameter group of the inactive layout (stride for tiled headers, tile blocks for linear
/// ones) is zeroed so that stale header bits do not split otherwise identical cache keys.
pub fn decode_header(
    header: &TextureHeader,
    mapped_address: u64,
    formats: &impl FormatResolver,
    config: &DecodeConfig,
) -> Result<TextureDescriptor, HeaderError> {
    let kind = header.kind()?;
    let msaa = header.multisample_mode()?;
    let target = header
        .hardware_target()?
        .resolve(msaa != MultisampleMode::Ms1x1);
    let swizzle = header.swizzle(config)?;

    let format_id = header.format_id();
    let srgb = header.is_srgb();
    let format_info = formats.resolve(format_id, srgb).unwrap_or_else(|| {
        warn!(format_id, srgb, "unknown texture format; using placeholder");
        FormatInfo::default()
    });

    let (width, height, depth_or_layers) = match target {
        TextureTarget::TextureBuffer => (header.buffer_width(), 1, 1),
        _ => (header.width(), header.height(), header.depth_or_layers()),
    };
    let levels = if target.is_multisample() || target == TextureTarget::TextureBuffer {
        1
    } else {
        header.levels()
    };

    let is_linear = kind.is_linear();
    let (stride, tile_blocks_y, tile_blocks_z, tile_blocks_per_row_x) = match kind {
        HeaderKind::OneDBuffer => (0, 0, 0, 0),
        HeaderKind::Pitch | HeaderKind::PitchColorKey => (header.stride(), 0, 0, 0),
        HeaderKind::BlockLinear | HeaderKind::BlockLinearColorKey => (
            0,
            header.tile_blocks_y(),
            header.tile_blocks_z(),
            header.tile_blocks_per_row_x(),
        ),
    };

    let sample_state = SampleState {
        depth_stencil_mode: depth_stencil_mode(&format_info, &swizzle),
        swizzle,
    };

    let desc = TextureDescriptor::with_sample_state(
        TextureCreateDesc {
            guest_address: header.address(),
            mapped_address,
            width,
            height,
            depth_or_layers,
            levels,
            samples_x: msaa.samples_x(),
            samples_y: msaa.samples_y(),
            stride,
            is_linear,
            tile_blocks_y,
            tile_blocks_z,
            tile_blocks_per_row_x,
            target,
            format_info,
        },
        sample_state,
    );

    debug!(
        texture_target = %desc.target(),
        width = desc.width(),
        height = desc.height(),
        depth_or_layers = desc.depth_or_layers(),
        levels = desc.levels(),
        samples = desc.total_samples(),
        linear = desc.is_linear(),
        guest_address = desc.guest_address(),
        "decoded texture header"
    );

    Ok(desc)
}
