use std::io::{self, Read, Write};

use crate::ser::{NetworkRead, NetworkWrite, ReadingError, WritingError};

pub mod item_stack;
pub mod skin;

/// A voxel coordinate. Three signed varints on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The "no causing block" marker used by world-spawn packets.
    pub const fn sentinel() -> Self {
        Self::new(i32::MIN, i32::MIN, i32::MIN)
    }
}

/// The read half of the protocol-aware serializer. Wraps any byte source
/// and carries the protocol version that every version-gated codec
/// branches on; the version never changes for the lifetime of one reader.
///
/// Implements [`Read`] by delegation, so all [`NetworkRead`] primitives
/// are directly available next to the structured helpers below.
pub struct ProtocolReader<R: Read> {
    read: R,
    protocol: u32,
}

impl<R: Read> Read for ProtocolReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read.read(buf)
    }
}

impl<R: Read> ProtocolReader<R> {
    pub fn new(read: R, protocol: u32) -> Self {
        Self { read, protocol }
    }

    pub fn protocol_id(&self) -> u32 {
        self.protocol
    }

    pub fn into_inner(self) -> R {
        self.read
    }

    pub fn get_block_position(&mut self) -> Result<BlockPos, ReadingError> {
        Ok(BlockPos {
            x: self.get_var_int()?.0,
            y: self.get_var_int()?.0,
            z: self.get_var_int()?.0,
        })
    }

    pub fn get_actor_unique_id(&mut self) -> Result<i64, ReadingError> {
        Ok(self.get_var_long()?.0)
    }

    /// Request IDs and creative item net IDs share this encoding.
    pub fn get_generic_type_network_id(&mut self) -> Result<i32, ReadingError> {
        Ok(self.get_var_int()?.0)
    }
}

/// The write half of the protocol-aware serializer; mirror of
/// [`ProtocolReader`].
pub struct ProtocolWriter<W: Write> {
    write: W,
    protocol: u32,
}

impl<W: Write> Write for ProtocolWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write.flush()
    }
}

impl<W: Write> ProtocolWriter<W> {
    pub fn new(write: W, protocol: u32) -> Self {
        Self { write, protocol }
    }

    pub fn protocol_id(&self) -> u32 {
        self.protocol
    }

    pub fn put_block_position(&mut self, pos: &BlockPos) -> Result<(), WritingError> {
        self.write_var_int(&pos.x.into())?;
        self.write_var_int(&pos.y.into())?;
        self.write_var_int(&pos.z.into())
    }

    pub fn put_actor_unique_id(&mut self, id: i64) -> Result<(), WritingError> {
        self.write_var_long(&id.into())
    }

    pub fn put_generic_type_network_id(&mut self, id: i32) -> Result<(), WritingError> {
        self.write_var_int(&id.into())
    }
}
