use std::io::{Read, Write};

use bedrock_data::version::{PROTOCOL_1_17_30, PROTOCOL_1_18_10};

use crate::packet_decoder::PacketDecodeError;
use crate::packet_encoder::PacketEncodeError;
use crate::ser::{NetworkRead, NetworkWrite, ReadingError, WritingError};
use crate::serializer::item_stack::ItemStack;
use crate::serializer::{ProtocolReader, ProtocolWriter};

// Canonical action type IDs, matching the numbering of 1.18.10 and
// newer. Older wire formats are derived via `wire_action_type`.
pub const ACTION_TAKE: u8 = 0;
pub const ACTION_PLACE: u8 = 1;
pub const ACTION_SWAP: u8 = 2;
pub const ACTION_DROP: u8 = 3;
pub const ACTION_DESTROY: u8 = 4;
pub const ACTION_CRAFTING_CONSUME_INPUT: u8 = 5;
pub const ACTION_CRAFTING_MARK_SECONDARY_RESULT: u8 = 6;
pub const ACTION_PLACE_INTO_BUNDLE: u8 = 7;
pub const ACTION_TAKE_FROM_BUNDLE: u8 = 8;
pub const ACTION_LAB_TABLE_COMBINE: u8 = 9;
pub const ACTION_BEACON_PAYMENT: u8 = 10;
pub const ACTION_MINE_BLOCK: u8 = 11;
pub const ACTION_CRAFT_RECIPE: u8 = 12;
pub const ACTION_CRAFT_RECIPE_AUTO: u8 = 13;
pub const ACTION_CREATIVE_CREATE: u8 = 14;
pub const ACTION_CRAFT_RECIPE_OPTIONAL: u8 = 15;
pub const ACTION_CRAFT_GRINDSTONE: u8 = 16;
pub const ACTION_CRAFT_LOOM: u8 = 17;
pub const ACTION_CRAFT_NON_IMPLEMENTED_DEPRECATED: u8 = 18;
pub const ACTION_CRAFT_RESULTS_DEPRECATED: u8 = 19;

/// The bundle actions were inserted into the middle of the numbering in
/// 1.18.10; older wire tags skip them.
const BUNDLE_TAG_OFFSET: u8 = ACTION_LAB_TABLE_COMBINE - ACTION_PLACE_INTO_BUNDLE;

/// Canonical action type to wire tag for the target protocol.
pub fn wire_action_type(canonical: u8, protocol: u32) -> u8 {
    if protocol < PROTOCOL_1_18_10 && canonical >= ACTION_LAB_TABLE_COMBINE {
        canonical - BUNDLE_TAG_OFFSET
    } else {
        canonical
    }
}

/// Inverse of [`wire_action_type`].
pub fn canonical_action_type(wire: u8, protocol: u32) -> u8 {
    if protocol < PROTOCOL_1_18_10 && wire >= ACTION_PLACE_INTO_BUNDLE {
        wire + BUNDLE_TAG_OFFSET
    } else {
        wire
    }
}

/// Identifies one slot within one open container, plus the stack ID the
/// client believed was in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStackRequestSlotInfo {
    pub container_id: u8,
    pub slot_id: u8,
    pub stack_id: i32,
}

impl ItemStackRequestSlotInfo {
    fn read(read: &mut ProtocolReader<impl Read>) -> Result<Self, ReadingError> {
        Ok(Self {
            container_id: read.get_u8()?,
            slot_id: read.get_u8()?,
            stack_id: read.get_generic_type_network_id()?,
        })
    }

    fn write(&self, write: &mut ProtocolWriter<impl Write>) -> Result<(), WritingError> {
        write.write_u8(self.container_id)?;
        write.write_u8(self.slot_id)?;
        write.put_generic_type_network_id(self.stack_id)
    }
}

/// One step of a client-authoritative inventory transaction. Every
/// variant owns its payload codec; the type tag is handled by the
/// request codec around this.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemStackRequestAction {
    Take {
        count: u8,
        source: ItemStackRequestSlotInfo,
        destination: ItemStackRequestSlotInfo,
    },
    Place {
        count: u8,
        source: ItemStackRequestSlotInfo,
        destination: ItemStackRequestSlotInfo,
    },
    Swap {
        slot1: ItemStackRequestSlotInfo,
        slot2: ItemStackRequestSlotInfo,
    },
    Drop {
        count: u8,
        source: ItemStackRequestSlotInfo,
        randomly: bool,
    },
    Destroy {
        count: u8,
        source: ItemStackRequestSlotInfo,
    },
    CraftingConsumeInput {
        count: u8,
        source: ItemStackRequestSlotInfo,
    },
    CraftingMarkSecondaryResult {
        crafting_grid_slot: u8,
    },
    PlaceIntoBundle {
        count: u8,
        source: ItemStackRequestSlotInfo,
        destination: ItemStackRequestSlotInfo,
    },
    TakeFromBundle {
        count: u8,
        source: ItemStackRequestSlotInfo,
        destination: ItemStackRequestSlotInfo,
    },
    LabTableCombine,
    BeaconPayment {
        primary_effect: i32,
        secondary_effect: i32,
    },
    MineBlock {
        hotbar_slot: i32,
        predicted_durability: i32,
        stack_id: i32,
    },
    CraftRecipe {
        recipe_network_id: u32,
    },
    CraftRecipeAuto {
        recipe_network_id: u32,
        /// Absent on the wire below 1.17.30; defaults to a single craft.
        repetitions: u8,
    },
    CreativeCreate {
        creative_item_network_id: i32,
    },
    CraftRecipeOptional {
        recipe_network_id: u32,
        filter_string_index: i32,
    },
    Grindstone {
        recipe_network_id: u32,
        repair_cost: i32,
    },
    Loom {
        pattern_id: String,
    },
    DeprecatedCraftingNonImplemented,
    DeprecatedCraftingResults {
        results: Vec<ItemStack>,
        times_crafted: u8,
    },
}

impl ItemStackRequestAction {
    pub fn type_id(&self) -> u8 {
        match self {
            Self::Take { .. } => ACTION_TAKE,
            Self::Place { .. } => ACTION_PLACE,
            Self::Swap { .. } => ACTION_SWAP,
            Self::Drop { .. } => ACTION_DROP,
            Self::Destroy { .. } => ACTION_DESTROY,
            Self::CraftingConsumeInput { .. } => ACTION_CRAFTING_CONSUME_INPUT,
            Self::CraftingMarkSecondaryResult { .. } => ACTION_CRAFTING_MARK_SECONDARY_RESULT,
            Self::PlaceIntoBundle { .. } => ACTION_PLACE_INTO_BUNDLE,
            Self::TakeFromBundle { .. } => ACTION_TAKE_FROM_BUNDLE,
            Self::LabTableCombine => ACTION_LAB_TABLE_COMBINE,
            Self::BeaconPayment { .. } => ACTION_BEACON_PAYMENT,
            Self::MineBlock { .. } => ACTION_MINE_BLOCK,
            Self::CraftRecipe { .. } => ACTION_CRAFT_RECIPE,
            Self::CraftRecipeAuto { .. } => ACTION_CRAFT_RECIPE_AUTO,
            Self::CreativeCreate { .. } => ACTION_CREATIVE_CREATE,
            Self::CraftRecipeOptional { .. } => ACTION_CRAFT_RECIPE_OPTIONAL,
            Self::Grindstone { .. } => ACTION_CRAFT_GRINDSTONE,
            Self::Loom { .. } => ACTION_CRAFT_LOOM,
            Self::DeprecatedCraftingNonImplemented => ACTION_CRAFT_NON_IMPLEMENTED_DEPRECATED,
            Self::DeprecatedCraftingResults { .. } => ACTION_CRAFT_RESULTS_DEPRECATED,
        }
    }

    /// Reads the payload for an already-consumed canonical type tag.
    pub fn read(
        canonical_type: u8,
        read: &mut ProtocolReader<impl Read>,
    ) -> Result<Self, PacketDecodeError> {
        let action = match canonical_type {
            ACTION_TAKE => Self::Take {
                count: read.get_u8()?,
                source: ItemStackRequestSlotInfo::read(read)?,
                destination: ItemStackRequestSlotInfo::read(read)?,
            },
            ACTION_PLACE => Self::Place {
                count: read.get_u8()?,
                source: ItemStackRequestSlotInfo::read(read)?,
                destination: ItemStackRequestSlotInfo::read(read)?,
            },
            ACTION_SWAP => Self::Swap {
                slot1: ItemStackRequestSlotInfo::read(read)?,
                slot2: ItemStackRequestSlotInfo::read(read)?,
            },
            ACTION_DROP => Self::Drop {
                count: read.get_u8()?,
                source: ItemStackRequestSlotInfo::read(read)?,
                randomly: read.get_bool()?,
            },
            ACTION_DESTROY => Self::Destroy {
                count: read.get_u8()?,
                source: ItemStackRequestSlotInfo::read(read)?,
            },
            ACTION_CRAFTING_CONSUME_INPUT => Self::CraftingConsumeInput {
                count: read.get_u8()?,
                source: ItemStackRequestSlotInfo::read(read)?,
            },
            ACTION_CRAFTING_MARK_SECONDARY_RESULT => Self::CraftingMarkSecondaryResult {
                crafting_grid_slot: read.get_u8()?,
            },
            ACTION_PLACE_INTO_BUNDLE => Self::PlaceIntoBundle {
                count: read.get_u8()?,
                source: ItemStackRequestSlotInfo::read(read)?,
                destination: ItemStackRequestSlotInfo::read(read)?,
            },
            ACTION_TAKE_FROM_BUNDLE => Self::TakeFromBundle {
                count: read.get_u8()?,
                source: ItemStackRequestSlotInfo::read(read)?,
                destination: ItemStackRequestSlotInfo::read(read)?,
            },
            ACTION_LAB_TABLE_COMBINE => Self::LabTableCombine,
            ACTION_BEACON_PAYMENT => Self::BeaconPayment {
                primary_effect: read.get_var_int()?.0,
                secondary_effect: read.get_var_int()?.0,
            },
            ACTION_MINE_BLOCK => Self::MineBlock {
                hotbar_slot: read.get_var_int()?.0,
                predicted_durability: read.get_var_int()?.0,
                stack_id: read.get_generic_type_network_id()?,
            },
            ACTION_CRAFT_RECIPE => Self::CraftRecipe {
                recipe_network_id: read.get_var_uint()?.0,
            },
            ACTION_CRAFT_RECIPE_AUTO => Self::CraftRecipeAuto {
                recipe_network_id: read.get_var_uint()?.0,
                repetitions: if read.protocol_id() >= PROTOCOL_1_17_30 {
                    read.get_u8()?
                } else {
                    1
                },
            },
            ACTION_CREATIVE_CREATE => Self::CreativeCreate {
                creative_item_network_id: read.get_generic_type_network_id()?,
            },
            ACTION_CRAFT_RECIPE_OPTIONAL => Self::CraftRecipeOptional {
                recipe_network_id: read.get_var_uint()?.0,
                filter_string_index: read.get_i32_le()?,
            },
            ACTION_CRAFT_GRINDSTONE => Self::Grindstone {
                recipe_network_id: read.get_var_uint()?.0,
                repair_cost: read.get_var_int()?.0,
            },
            ACTION_CRAFT_LOOM => Self::Loom {
                pattern_id: read.get_string()?,
            },
            ACTION_CRAFT_NON_IMPLEMENTED_DEPRECATED => Self::DeprecatedCraftingNonImplemented,
            ACTION_CRAFT_RESULTS_DEPRECATED => Self::DeprecatedCraftingResults {
                results: {
                    let count = read.get_var_uint()?.0 as usize;
                    let mut results = Vec::with_capacity(count.min(256));
                    for _ in 0..count {
                        results.push(read.get_item_stack()?);
                    }
                    results
                },
                times_crafted: read.get_u8()?,
            },
            other => return Err(PacketDecodeError::UnknownActionType(other)),
        };
        Ok(action)
    }

    /// Writes the payload only; the request codec emits the wire tag.
    pub fn write_payload(
        &self,
        write: &mut ProtocolWriter<impl Write>,
    ) -> Result<(), PacketEncodeError> {
        match self {
            Self::Take {
                count,
                source,
                destination,
            }
            | Self::Place {
                count,
                source,
                destination,
            }
            | Self::PlaceIntoBundle {
                count,
                source,
                destination,
            }
            | Self::TakeFromBundle {
                count,
                source,
                destination,
            } => {
                write.write_u8(*count)?;
                source.write(write)?;
                destination.write(write)?;
            }
            Self::Swap { slot1, slot2 } => {
                slot1.write(write)?;
                slot2.write(write)?;
            }
            Self::Drop {
                count,
                source,
                randomly,
            } => {
                write.write_u8(*count)?;
                source.write(write)?;
                write.write_bool(*randomly)?;
            }
            Self::Destroy { count, source } | Self::CraftingConsumeInput { count, source } => {
                write.write_u8(*count)?;
                source.write(write)?;
            }
            Self::CraftingMarkSecondaryResult { crafting_grid_slot } => {
                write.write_u8(*crafting_grid_slot)?;
            }
            Self::LabTableCombine | Self::DeprecatedCraftingNonImplemented => {}
            Self::BeaconPayment {
                primary_effect,
                secondary_effect,
            } => {
                write.write_var_int(&(*primary_effect).into())?;
                write.write_var_int(&(*secondary_effect).into())?;
            }
            Self::MineBlock {
                hotbar_slot,
                predicted_durability,
                stack_id,
            } => {
                write.write_var_int(&(*hotbar_slot).into())?;
                write.write_var_int(&(*predicted_durability).into())?;
                write.put_generic_type_network_id(*stack_id)?;
            }
            Self::CraftRecipe { recipe_network_id } => {
                write.write_var_uint(&(*recipe_network_id).into())?;
            }
            Self::CraftRecipeAuto {
                recipe_network_id,
                repetitions,
            } => {
                write.write_var_uint(&(*recipe_network_id).into())?;
                if write.protocol_id() >= PROTOCOL_1_17_30 {
                    write.write_u8(*repetitions)?;
                }
            }
            Self::CreativeCreate {
                creative_item_network_id,
            } => {
                write.put_generic_type_network_id(*creative_item_network_id)?;
            }
            Self::CraftRecipeOptional {
                recipe_network_id,
                filter_string_index,
            } => {
                write.write_var_uint(&(*recipe_network_id).into())?;
                write.write_i32_le(*filter_string_index)?;
            }
            Self::Grindstone {
                recipe_network_id,
                repair_cost,
            } => {
                write.write_var_uint(&(*recipe_network_id).into())?;
                write.write_var_int(&(*repair_cost).into())?;
            }
            Self::Loom { pattern_id } => {
                write.write_string(pattern_id)?;
            }
            Self::DeprecatedCraftingResults {
                results,
                times_crafted,
            } => {
                write.write_var_uint(&(results.len() as u32).into())?;
                for result in results {
                    write.put_item_stack(result)?;
                }
                write.write_u8(*times_crafted)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bedrock_data::version::{PROTOCOL_1_17_0, PROTOCOL_1_18_10};

    use super::*;

    #[test]
    fn test_tags_below_the_bundle_range_are_stable() {
        for tag in 0..ACTION_PLACE_INTO_BUNDLE {
            assert_eq!(wire_action_type(tag, PROTOCOL_1_17_0), tag);
            assert_eq!(canonical_action_type(tag, PROTOCOL_1_17_0), tag);
        }
    }

    #[test]
    fn test_renumbering_below_1_18_10() {
        assert_eq!(
            wire_action_type(ACTION_LAB_TABLE_COMBINE, PROTOCOL_1_17_0),
            ACTION_PLACE_INTO_BUNDLE
        );
        assert_eq!(
            canonical_action_type(ACTION_PLACE_INTO_BUNDLE, PROTOCOL_1_17_0),
            ACTION_LAB_TABLE_COMBINE
        );
        assert_eq!(
            wire_action_type(ACTION_CRAFT_RESULTS_DEPRECATED, PROTOCOL_1_17_0),
            ACTION_CRAFT_RESULTS_DEPRECATED - 2
        );
    }

    #[test]
    fn test_no_renumbering_from_1_18_10() {
        for tag in 0..=ACTION_CRAFT_RESULTS_DEPRECATED {
            assert_eq!(wire_action_type(tag, PROTOCOL_1_18_10), tag);
            assert_eq!(canonical_action_type(tag, PROTOCOL_1_18_10), tag);
        }
    }
}
