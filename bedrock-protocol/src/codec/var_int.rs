use std::num::NonZeroUsize;

use super::{Codec, var_uint::VarUInt};
use crate::ser::{NetworkRead, NetworkWrite, ReadingError, WritingError};

/// A signed 32-bit integer as ZigZag `(n << 1) ^ (n >> 31)` over LEB128,
/// so small magnitudes of either sign stay short on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarInt(pub i32);

impl VarInt {
    fn zigzag(self) -> u32 {
        ((self.0 << 1) ^ (self.0 >> 31)) as u32
    }

    fn from_zigzag(raw: u32) -> Self {
        Self((raw >> 1) as i32 ^ -((raw & 1) as i32))
    }
}

impl Codec<Self> for VarInt {
    const MAX_SIZE: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(5) };

    fn written_size(&self) -> usize {
        VarUInt(self.zigzag()).written_size()
    }

    fn encode(&self, write: &mut impl NetworkWrite) -> Result<(), WritingError> {
        VarUInt(self.zigzag()).encode(write)
    }

    fn decode(read: &mut impl NetworkRead) -> Result<Self, ReadingError> {
        Ok(Self::from_zigzag(VarUInt::decode(read)?.0))
    }
}

impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
