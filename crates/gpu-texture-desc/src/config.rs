/// Enables strict swizzle decoding (see [`DecodeConfig::strict_swizzle`]).
pub const STRICT_SWIZZLE_ENV: &str = "GPU_TEXTURE_DESC_STRICT_SWIZZLE";

/// Options for [`crate::header::decode_header`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Reject headers with undefined swizzle sources instead of reading them as `Zero`.
    pub strict_swizzle: bool,
}

impl DecodeConfig {
    pub fn from_env() -> Self {
        Self {
            strict_swizzle: env_var_truthy(STRICT_SWIZZLE_ENV),
        }
    }
}

fn env_var_truthy(name: &str) -> bool {
    let Ok(raw) = std::env::var(name) else {
        return false;
    };
    is_truthy(&raw)
}

fn is_truthy(raw: &str) -> bool {
    let v = raw.trim();
    v == "1"
        || v.eq_ignore_ascii_case("true")
        || v.eq_ignore_ascii_case("yes")
        || v.eq_ignore_ascii_case("on")
}
