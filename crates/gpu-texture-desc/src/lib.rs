//! `gpu-texture-desc` defines the canonical description of a guest GPU texture.
//!
//! Currently this crate provides:
//! - [`TextureDescriptor`], the immutable value shared by texture-cache lookup, layout decoding
//!   and backend resource creation, together with its derived geometry
//!   ([`TextureDescriptor::effective_depth`], [`TextureDescriptor::layer_count`]).
//! - A decoder for raw texture image headers (see [`header`]), which is how descriptors are
//!   normally produced from guest state.

mod config;
mod descriptor;
mod format;
mod swizzle;
mod target;

pub mod header;

pub use config::{DecodeConfig, STRICT_SWIZZLE_ENV};
pub use descriptor::{Extent3d, MemoryLayout, TextureCreateDesc, TextureDescriptor, CUBE_FACES};
pub use format::{DepthStencilPacking, FormatInfo};
pub use header::{decode_header, FormatResolver, HeaderError, TextureHeader};
pub use swizzle::{DepthStencilMode, SampleState, Swizzle, SwizzleComponent};
pub use target::TextureTarget;
