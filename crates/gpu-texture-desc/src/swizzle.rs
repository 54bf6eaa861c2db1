/// Source of one output channel when a texture is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwizzleComponent {
    Zero,
    One,
    Red,
    Green,
    Blue,
    Alpha,
}

impl SwizzleComponent {
    pub(crate) fn is_red_or_green(self) -> bool {
        matches!(self, Self::Red | Self::Green)
    }
}

/// Per-channel output remapping (`r`, `g`, `b`, `a` name the *output* channels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swizzle {
    pub r: SwizzleComponent,
    pub g: SwizzleComponent,
    pub b: SwizzleComponent,
    pub a: SwizzleComponent,
}

impl Swizzle {
    pub const IDENTITY: Swizzle = Swizzle {
        r: SwizzleComponent::Red,
        g: SwizzleComponent::Green,
        b: SwizzleComponent::Blue,
        a: SwizzleComponent::Alpha,
    };

    pub const fn new(
        r: SwizzleComponent,
        g: SwizzleComponent,
        b: SwizzleComponent,
        a: SwizzleComponent,
    ) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn as_array(&self) -> [SwizzleComponent; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Swizzle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Which aspect of a combined depth/stencil format is visible to shader reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthStencilMode {
    #[default]
    Depth,
    Stencil,
}

/// Sampling-related descriptor state that callers usually leave at its defaults.
///
/// `SampleState::default()` is a depth-channel read with the identity swizzle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleState {
    pub depth_stencil_mode: DepthStencilMode,
    pub swizzle: Swizzle,
}
