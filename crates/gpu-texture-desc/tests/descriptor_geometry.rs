use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use gpu_texture_desc::{
    DepthStencilMode, FormatInfo, SampleState, Swizzle, SwizzleComponent, TextureCreateDesc,
    TextureDescriptor, TextureTarget,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn base(target: TextureTarget, depth_or_layers: u32) -> TextureCreateDesc {
    TextureCreateDesc {
        guest_address: 0x4_2000_0000,
        mapped_address: 0x10_0000,
        width: 256,
        height: 128,
        depth_or_layers,
        levels: 1,
        samples_x: 1,
        samples_y: 1,
        stride: 0,
        is_linear: false,
        tile_blocks_y: 8,
        tile_blocks_z: 1,
        tile_blocks_per_row_x: 1,
        target,
        format_info: FormatInfo::color(0x08, 4, 4),
    }
}

fn hash_of(desc: &TextureDescriptor) -> u64 {
    let mut hasher = DefaultHasher::new();
    desc.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn cubemap_with_zero_layers_still_has_six_faces() {
    let tex = TextureDescriptor::new(base(TextureTarget::Cubemap, 0));
    assert_eq!(tex.layer_count(), 6);
    assert_eq!(tex.effective_depth(), 1);
}

#[test]
fn cubemap_array_multiplies_by_faces() {
    let tex = TextureDescriptor::new(base(TextureTarget::CubemapArray, 3));
    assert_eq!(tex.layer_count(), 18);
    assert_eq!(tex.effective_depth(), 1);
}

#[test]
fn volume_texture_depth() {
    let tex = TextureDescriptor::new(TextureCreateDesc {
        levels: 4,
        ..base(TextureTarget::Texture3D, 8)
    });
    assert_eq!(tex.effective_depth(), 8);
    assert_eq!(tex.layer_count(), 1);
    assert_eq!(tex.levels(), 4);
}

#[test]
fn texture_2d_array_layers() {
    let tex = TextureDescriptor::new(base(TextureTarget::Texture2DArray, 5));
    assert_eq!(tex.layer_count(), 5);
    assert_eq!(tex.effective_depth(), 1);
}

#[test]
fn multisample_total_samples() {
    let tex = TextureDescriptor::new(TextureCreateDesc {
        samples_x: 4,
        samples_y: 2,
        ..base(TextureTarget::Texture2D, 1)
    });
    assert_eq!(tex.total_samples(), 8);

    let single = TextureDescriptor::new(base(TextureTarget::Texture2D, 1));
    assert_eq!(single.total_samples(), 1);
}

#[test]
fn cube_array_layer_count_saturates() {
    let tex = TextureDescriptor::new(base(TextureTarget::CubemapArray, u32::MAX / 6 + 1));
    assert_eq!(tex.layer_count(), u32::MAX);

    let largest_exact = TextureDescriptor::new(base(TextureTarget::CubemapArray, u32::MAX / 6));
    assert_eq!(largest_exact.layer_count(), (u32::MAX / 6) * 6);
}

#[test]
fn total_samples_saturates() {
    let tex = TextureDescriptor::new(TextureCreateDesc {
        samples_x: u32::MAX,
        samples_y: u32::MAX,
        ..base(TextureTarget::Texture2DMultisample, 1)
    });
    assert_eq!(tex.total_samples(), u32::MAX);
}

#[test]
fn one_d_array_layers_stay_in_height() {
    let tex = TextureDescriptor::new(TextureCreateDesc {
        height: 12,
        ..base(TextureTarget::Texture1DArray, 1)
    });
    assert_eq!(tex.height(), 12);
    assert_eq!(tex.layer_count(), 1);
}

#[test]
fn explicit_defaults_equal_implicit_defaults() {
    let implicit = TextureDescriptor::new(base(TextureTarget::Texture2D, 1));
    let explicit = TextureDescriptor::with_sample_state(
        base(TextureTarget::Texture2D, 1),
        SampleState {
            depth_stencil_mode: DepthStencilMode::Depth,
            swizzle: Swizzle::new(
                SwizzleComponent::Red,
                SwizzleComponent::Green,
                SwizzleComponent::Blue,
                SwizzleComponent::Alpha,
            ),
        },
    );
    assert_eq!(implicit, explicit);
    assert_eq!(hash_of(&implicit), hash_of(&explicit));
    assert_eq!(implicit.fingerprint(), explicit.fingerprint());
}

#[test]
fn changing_any_single_field_breaks_equality() {
    let reference = TextureDescriptor::new(base(TextureTarget::Texture2D, 1));
    let b = base(TextureTarget::Texture2D, 1);

    let variants = [
        TextureCreateDesc { guest_address: 1, ..b },
        TextureCreateDesc { mapped_address: 1, ..b },
        TextureCreateDesc { width: 1, ..b },
        TextureCreateDesc { height: 1, ..b },
        TextureCreateDesc { depth_or_layers: 2, ..b },
        TextureCreateDesc { levels: 2, ..b },
        TextureCreateDesc { samples_x: 2, ..b },
        TextureCreateDesc { samples_y: 2, ..b },
        TextureCreateDesc { stride: 64, ..b },
        TextureCreateDesc { is_linear: true, ..b },
        TextureCreateDesc { tile_blocks_y: 1, ..b },
        TextureCreateDesc { tile_blocks_z: 2, ..b },
        TextureCreateDesc { tile_blocks_per_row_x: 2, ..b },
        TextureCreateDesc { target: TextureTarget::Texture2DArray, ..b },
        TextureCreateDesc { format_info: FormatInfo::color(0x09, 4, 4), ..b },
    ];
    let mut changed: Vec<TextureDescriptor> =
        variants.into_iter().map(TextureDescriptor::new).collect();

    let identity = Swizzle::IDENTITY;
    let sample_variants = [
        SampleState {
            depth_stencil_mode: DepthStencilMode::Stencil,
            swizzle: identity,
        },
        SampleState {
            depth_stencil_mode: DepthStencilMode::Depth,
            swizzle: Swizzle { r: SwizzleComponent::Zero, ..identity },
        },
        SampleState {
            depth_stencil_mode: DepthStencilMode::Depth,
            swizzle: Swizzle { g: SwizzleComponent::Zero, ..identity },
        },
        SampleState {
            depth_stencil_mode: DepthStencilMode::Depth,
            swizzle: Swizzle { b: SwizzleComponent::Zero, ..identity },
        },
        SampleState {
            depth_stencil_mode: DepthStencilMode::Depth,
            swizzle: Swizzle { a: SwizzleComponent::One, ..identity },
        },
    ];
    changed.extend(
        sample_variants
            .into_iter()
            .map(|state| TextureDescriptor::with_sample_state(b, state)),
    );

    for desc in &changed {
        assert_ne!(*desc, reference, "{desc:?}");
    }

    let unique: HashSet<TextureDescriptor> = changed.iter().copied().collect();
    assert_eq!(unique.len(), changed.len());
    assert!(!unique.contains(&reference));
}

#[test]
fn descriptors_work_as_cache_keys_across_threads() {
    let desc = TextureDescriptor::new(base(TextureTarget::CubemapArray, 2));
    let local = desc.fingerprint();
    let remote = std::thread::spawn(move || desc.fingerprint())
        .join()
        .unwrap();
    assert_eq!(local, remote);
}

#[cfg(feature = "serde")]
#[test]
fn serde_preserves_value_identity() {
    let desc = TextureDescriptor::with_sample_state(
        base(TextureTarget::Texture2DMultisampleArray, 4),
        SampleState {
            depth_stencil_mode: DepthStencilMode::Stencil,
            swizzle: Swizzle::new(
                SwizzleComponent::Red,
                SwizzleComponent::Red,
                SwizzleComponent::Red,
                SwizzleComponent::One,
            ),
        },
    );
    let json = serde_json::to_string(&desc).unwrap();
    let back: TextureDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, desc);
}

fn target_strategy() -> impl Strategy<Value = TextureTarget> {
    prop::sample::select(TextureTarget::ALL.to_vec())
}

fn create_desc_strategy() -> impl Strategy<Value = TextureCreateDesc> {
    (
        (any::<u64>(), any::<u64>()),
        (0u32..=16384, 0u32..=16384, 0u32..=2048, 1u32..=16),
        (1u32..=4, 1u32..=4),
        (any::<u32>(), any::<bool>(), 0u32..=32, 0u32..=32, 0u32..=32),
        target_strategy(),
    )
        .prop_map(
            |(
                (guest_address, mapped_address),
                (width, height, depth_or_layers, levels),
                (samples_x, samples_y),
                (stride, is_linear, tile_blocks_y, tile_blocks_z, tile_blocks_per_row_x),
                target,
            )| TextureCreateDesc {
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
                format_info: FormatInfo::default(),
            },
        )
}

proptest! {
    #[test]
    fn effective_depth_only_for_volumes(desc in create_desc_strategy()) {
        let tex = TextureDescriptor::new(desc);
        if desc.target == TextureTarget::Texture3D {
            prop_assert_eq!(tex.effective_depth(), desc.depth_or_layers);
        } else {
            prop_assert_eq!(tex.effective_depth(), 1);
        }
    }

    #[test]
    fn layer_count_by_target(desc in create_desc_strategy()) {
        let tex = TextureDescriptor::new(desc);
        let expected = match desc.target {
            TextureTarget::Texture2DArray | TextureTarget::Texture2DMultisampleArray => {
                desc.depth_or_layers
            }
            TextureTarget::CubemapArray => desc.depth_or_layers * 6,
            TextureTarget::Cubemap => 6,
            _ => 1,
        };
        prop_assert_eq!(tex.layer_count(), expected);
    }

    #[test]
    fn total_samples_is_product(desc in create_desc_strategy()) {
        let tex = TextureDescriptor::new(desc);
        prop_assert_eq!(tex.total_samples(), desc.samples_x * desc.samples_y);
    }

    #[test]
    fn equal_inputs_are_interchangeable(desc in create_desc_strategy()) {
        let a = TextureDescriptor::new(desc);
        let b = TextureDescriptor::new(desc);
        prop_assert_eq!(a, b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn accessors_return_construction_values(desc in create_desc_strategy()) {
        let tex = TextureDescriptor::new(desc);
        let rebuilt = TextureCreateDesc {
            guest_address: tex.guest_address(),
            mapped_address: tex.mapped_address(),
            width: tex.width(),
            height: tex.height(),
            depth_or_layers: tex.depth_or_layers(),
            levels: tex.levels(),
            samples_x: tex.samples_x(),
            samples_y: tex.samples_y(),
            stride: tex.stride(),
            is_linear: tex.is_linear(),
            tile_blocks_y: tex.tile_blocks_y(),
            tile_blocks_z: tex.tile_blocks_z(),
            tile_blocks_per_row_x: tex.tile_blocks_per_row_x(),
            target: tex.target(),
            format_info: *tex.format_info(),
        };
        prop_assert_eq!(rebuilt, desc);
    }
}
