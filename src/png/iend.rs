//! IEND: the empty chunk that marks the end of the PNG datastream.

pub const BODY: &[u8] = &[];
