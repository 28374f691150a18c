use std::io::{Read, Write};

use bytes::Bytes;

use super::{ProtocolReader, ProtocolWriter};
use crate::ser::{NetworkRead, NetworkWrite, ReadingError, WritingError};

/// A network item stack. The codec treats stacks as opaque inventory
/// values: the NBT payload stays a raw blob and item IDs are whatever the
/// peer's item registry says they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub id: i32,
    pub count: u8,
    pub meta: u32,
    pub nbt: Bytes,
    pub can_place_on: Vec<String>,
    pub can_destroy: Vec<String>,
}

impl ItemStack {
    pub const fn empty() -> Self {
        Self {
            id: 0,
            count: 0,
            meta: 0,
            nbt: Bytes::new(),
            can_place_on: Vec::new(),
            can_destroy: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0
    }
}

impl<R: Read> ProtocolReader<R> {
    pub fn get_item_stack(&mut self) -> Result<ItemStack, ReadingError> {
        let id = self.get_var_int()?.0;
        if id == 0 {
            return Ok(ItemStack::empty());
        }

        let aux = self.get_var_int()?.0;
        let meta = (aux >> 8) as u32;
        let count = (aux & 0xff) as u8;

        let nbt_len = self.get_u16_le()? as usize;
        let nbt = Bytes::from(Vec::from(self.read_boxed_slice(nbt_len)?));

        let can_place_on = self.get_list(|r| r.get_string())?;
        let can_destroy = self.get_list(|r| r.get_string())?;

        Ok(ItemStack {
            id,
            count,
            meta,
            nbt,
            can_place_on,
            can_destroy,
        })
    }
}

impl<W: Write> ProtocolWriter<W> {
    pub fn put_item_stack(&mut self, stack: &ItemStack) -> Result<(), WritingError> {
        self.write_var_int(&stack.id.into())?;
        if stack.is_empty() {
            return Ok(());
        }

        let aux = ((stack.meta as i32) << 8) | i32::from(stack.count);
        self.write_var_int(&aux.into())?;

        self.write_u16_le(stack.nbt.len() as u16)?;
        self.write_slice(&stack.nbt)?;

        self.write_list(&stack.can_place_on, |w, v| w.write_string(v))?;
        self.write_list(&stack.can_destroy, |w, v| w.write_string(v))
    }
}
