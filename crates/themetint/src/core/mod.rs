mod conversion;
mod shortcut;
mod string;

// conversion
pub(crate) use conversion::{
    from_24bit, normalize_hue, oklab_to_oklch, oklab_to_srgb, oklch_to_oklab, srgb_to_oklab,
    to_24bit,
};

// shortcut
pub(crate) use shortcut::{
    is_pure_red, looks_red, red_shade, DEFAULT_OKLCH, RED, RED_HUE, RED_OKLCH,
};

// string
pub(crate) use string::{
    format_oklch, parse_hex, parse_number, parse_oklch, parse_rgb, split_oklch,
};
