use std::fmt;

/// Logical shape of a texture resource.
///
/// This is the "semantic" target (after the hardware target has been combined with the
/// multisample mode), not the raw header value. It decides how
/// [`TextureDescriptor::depth_or_layers`](crate::TextureDescriptor::depth_or_layers) is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextureTarget {
    Texture1D,
    Texture2D,
    Texture3D,
    Texture1DArray,
    Texture2DArray,
    Cubemap,
    CubemapArray,
    Texture2DMultisample,
    Texture2DMultisampleArray,
    TextureBuffer,
}

impl TextureTarget {
    pub const ALL: [TextureTarget; 10] = [
        TextureTarget::Texture1D,
        TextureTarget::Texture2D,
        TextureTarget::Texture3D,
        TextureTarget::Texture1DArray,
        TextureTarget::Texture2DArray,
        TextureTarget::Cubemap,
        TextureTarget::CubemapArray,
        TextureTarget::Texture2DMultisample,
        TextureTarget::Texture2DMultisampleArray,
        TextureTarget::TextureBuffer,
    ];

    pub fn is_multisample(self) -> bool {
        matches!(
            self,
            Self::Texture2DMultisample | Self::Texture2DMultisampleArray
        )
    }

    /// Array targets, including 1D arrays.
    ///
    /// Note that 1D arrays keep their layer count in `height`, so this is *not* the same set of
    /// targets that [`TextureDescriptor::layer_count`](crate::TextureDescriptor::layer_count)
    /// reads `depth_or_layers` for.
    pub fn is_array(self) -> bool {
        matches!(
            self,
            Self::Texture1DArray
                | Self::Texture2DArray
                | Self::Texture2DMultisampleArray
                | Self::CubemapArray
        )
    }

    pub fn is_cube(self) -> bool {
        matches!(self, Self::Cubemap | Self::CubemapArray)
    }

    /// Whether `depth_or_layers` carries any information for this target.
    pub fn has_depth_or_layers(self) -> bool {
        matches!(
            self,
            Self::Texture3D
                | Self::Texture2DArray
                | Self::Texture2DMultisampleArray
                | Self::CubemapArray
        )
    }
}

impl fmt::Display for TextureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TextureTarget::Texture1D => "texture_1d",
            TextureTarget::Texture2D => "texture_2d",
            TextureTarget::Texture3D => "texture_3d",
            TextureTarget::Texture1DArray => "texture_1d_array",
            TextureTarget::Texture2DArray => "texture_2d_array",
            TextureTarget::Cubemap => "cubemap",
            TextureTarget::CubemapArray => "cubemap_array",
            TextureTarget::Texture2DMultisample => "texture_2d_multisample",
            TextureTarget::Texture2DMultisampleArray => "texture_2d_multisample_array",
            TextureTarget::TextureBuffer => "texture_buffer",
        };
        f.write_str(s)
    }
}
