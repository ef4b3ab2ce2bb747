//! Constants and limits for the fieldpack format mini-language

/// Mode prefix characters accepted at the start of a format string
pub const MODE_PREFIXES: &[char] = &['@', '=', '<', '>', '!'];

/// Maximum total encoded size of a single format (256 MB)
///
/// Formats describing more than this are rejected at parse time, before any
/// allocation proportional to the size happens.
pub const MAX_FORMAT_SIZE: usize = 256 * 1024 * 1024;

/// Maximum payload length a Pascal string can carry (one-byte length prefix)
pub const PASCAL_MAX_PAYLOAD: usize = 255;

/// Width in bytes of pointer-sized fields (`n`, `N`, `P`, and native `l`/`L`)
pub const POINTER_WIDTH: usize = core::mem::size_of::<usize>();
