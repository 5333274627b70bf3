//! The 8-byte magic every PNG datastream opens with (ISO/IEC 15948 §5.2).

pub const BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
