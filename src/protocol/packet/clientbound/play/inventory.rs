//! Windows, slots, trades and recipes.

use bytes::Bytes;

use crate::protocol::component::Component;
use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::item::ItemStack;
use crate::protocol::nbt::Compound;
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::{Hand, Identifier};

/// Window id of the player inventory
pub const PLAYER_INVENTORY: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseWindow {
    pub window_id: u8,
}

impl Packet for CloseWindow {
    const ID: i32 = 0x13;
    const NAME: &'static str = "CloseWindow";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_u8(self.window_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_u8()?,
        })
    }
}

/// Replaces every slot of a window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowItems {
    pub window_id: u8,
    pub state_id: i32,
    pub slots: Vec<Option<ItemStack>>,
    /// Item held by the cursor
    pub carried: Option<ItemStack>,
}

impl Packet for WindowItems {
    const ID: i32 = 0x14;
    const NAME: &'static str = "WindowItems";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_u8(self.window_id)
            .write_var_int(self.state_id)
            .write_list(&self.slots, |w, slot| {
                w.write_slot(slot.as_ref());
            })
            .write_slot(self.carried.as_ref());
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_u8()?,
            state_id: r.read_var_int()?,
            slots: r.read_list(|r| r.read_slot())?,
            carried: r.read_slot()?,
        })
    }
}

/// Window specific value such as furnace progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowProperty {
    pub window_id: u8,
    pub property: i16,
    pub value: i16,
}

impl Packet for WindowProperty {
    const ID: i32 = 0x15;
    const NAME: &'static str = "WindowProperty";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_u8(self.window_id)
            .write_i16(self.property)
            .write_i16(self.value);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_u8()?,
            property: r.read_i16()?,
            value: r.read_i16()?,
        })
    }
}

/// Single slot update; window -1 with slot -1 sets the cursor item
#[derive(Debug, Clone, PartialEq)]
pub struct SetSlot {
    pub window_id: i8,
    pub state_id: i32,
    pub slot: i16,
    pub item: Option<ItemStack>,
}

impl Packet for SetSlot {
    const ID: i32 = 0x16;
    const NAME: &'static str = "SetSlot";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i8(self.window_id)
            .write_var_int(self.state_id)
            .write_i16(self.slot)
            .write_slot(self.item.as_ref());
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_i8()?,
            state_id: r.read_var_int()?,
            slot: r.read_i16()?,
            item: r.read_slot()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCooldown {
    pub item_id: i32,
    pub cooldown_ticks: i32,
}

impl Packet for SetCooldown {
    const ID: i32 = 0x17;
    const NAME: &'static str = "SetCooldown";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.item_id)
            .write_var_int(self.cooldown_ticks);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            item_id: r.read_var_int()?,
            cooldown_ticks: r.read_var_int()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenHorseWindow {
    pub window_id: u8,
    pub slot_count: i32,
    pub entity_id: i32,
}

impl Packet for OpenHorseWindow {
    const ID: i32 = 0x1F;
    const NAME: &'static str = "OpenHorseWindow";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_u8(self.window_id)
            .write_var_int(self.slot_count)
            .write_i32(self.entity_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_u8()?,
            slot_count: r.read_var_int()?,
            entity_id: r.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub input: Option<ItemStack>,
    pub output: Option<ItemStack>,
    pub second_input: Option<ItemStack>,
    pub disabled: bool,
    pub uses: i32,
    pub max_uses: i32,
    pub experience: i32,
    pub special_price: i32,
    pub price_multiplier: f32,
    pub demand: i32,
}

/// Villager offers shown in a merchant window
#[derive(Debug, Clone, PartialEq)]
pub struct TradeList {
    pub window_id: i32,
    /// At most 255 trades fit the count byte
    pub trades: Vec<Trade>,
    pub villager_level: i32,
    pub experience: i32,
    pub is_regular_villager: bool,
    pub can_restock: bool,
}

impl Packet for TradeList {
    const ID: i32 = 0x28;
    const NAME: &'static str = "TradeList";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.window_id)
            .write_u8(self.trades.len() as u8);
        for trade in &self.trades {
            w.write_slot(trade.input.as_ref())
                .write_slot(trade.output.as_ref())
                .write_option(trade.second_input.as_ref(), |w, item| {
                    w.write_slot(Some(item));
                })
                .write_bool(trade.disabled)
                .write_i32(trade.uses)
                .write_i32(trade.max_uses)
                .write_i32(trade.experience)
                .write_i32(trade.special_price)
                .write_f32(trade.price_multiplier)
                .write_i32(trade.demand);
        }
        w.write_var_int(self.villager_level)
            .write_var_int(self.experience)
            .write_bool(self.is_regular_villager)
            .write_bool(self.can_restock);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let window_id = r.read_var_int()?;
        let count = r.read_u8()?;
        let mut trades = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            trades.push(Trade {
                input: r.read_slot()?,
                output: r.read_slot()?,
                second_input: r.read_option(|r| r.read_slot())?.flatten(),
                disabled: r.read_bool()?,
                uses: r.read_i32()?,
                max_uses: r.read_i32()?,
                experience: r.read_i32()?,
                special_price: r.read_i32()?,
                price_multiplier: r.read_f32()?,
                demand: r.read_i32()?,
            });
        }
        Ok(Self {
            window_id,
            trades,
            villager_level: r.read_var_int()?,
            experience: r.read_var_int()?,
            is_regular_villager: r.read_bool()?,
            can_restock: r.read_bool()?,
        })
    }
}

/// Opens a container window of the given type
#[derive(Debug, Clone, PartialEq)]
pub struct OpenWindow {
    pub window_id: i32,
    pub window_type: i32,
    pub title: Component,
}

impl Packet for OpenWindow {
    const ID: i32 = 0x2E;
    const NAME: &'static str = "OpenWindow";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.window_id)
            .write_var_int(self.window_type)
            .write_component(&self.title);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_var_int()?,
            window_type: r.read_var_int()?,
            title: r.read_component()?,
        })
    }
}

/// Opens the written book held in `hand`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBook {
    pub hand: Hand,
}

impl Packet for OpenBook {
    const ID: i32 = 0x2D;
    const NAME: &'static str = "OpenBook";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.hand);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            hand: r.read_enum()?,
        })
    }
}

/// Ghost recipe shown in the crafting grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftRecipeResponse {
    pub window_id: i8,
    pub recipe: Identifier,
}

impl Packet for CraftRecipeResponse {
    const ID: i32 = 0x31;
    const NAME: &'static str = "CraftRecipeResponse";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i8(self.window_id).write_identifier(&self.recipe);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_i8()?,
            recipe: r.read_identifier()?,
        })
    }
}

wire_enum! {
    pub enum UnlockAction {
        Init = 0,
        Add = 1,
        Remove = 2,
    }
}

/// Open and filtering flags of one recipe book tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecipeBookState {
    pub open: bool,
    pub filter_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockRecipes {
    pub action: UnlockAction,
    pub crafting: RecipeBookState,
    pub smelting: RecipeBookState,
    pub blast_furnace: RecipeBookState,
    pub smoker: RecipeBookState,
    pub recipes: Vec<Identifier>,
    /// Recipes to highlight as new; only sent with [`UnlockAction::Init`]
    pub highlighted: Vec<Identifier>,
}

impl Packet for UnlockRecipes {
    const ID: i32 = 0x39;
    const NAME: &'static str = "UnlockRecipes";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.action);
        for state in [self.crafting, self.smelting, self.blast_furnace, self.smoker] {
            w.write_bool(state.open).write_bool(state.filter_active);
        }
        let write_identifier = |w: &mut PacketWriter, recipe: &Identifier| {
            w.write_identifier(recipe);
        };
        w.write_list(&self.recipes, write_identifier);
        if self.action == UnlockAction::Init {
            w.write_list(&self.highlighted, write_identifier);
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        fn read_state(r: &mut PacketReader) -> Result<RecipeBookState, DecodeError> {
            Ok(RecipeBookState {
                open: r.read_bool()?,
                filter_active: r.read_bool()?,
            })
        }

        let action = r.read_enum()?;
        let crafting = read_state(r)?;
        let smelting = read_state(r)?;
        let blast_furnace = read_state(r)?;
        let smoker = read_state(r)?;
        let recipes = r.read_list(|r| r.read_identifier())?;
        let highlighted = if action == UnlockAction::Init {
            r.read_list(|r| r.read_identifier())?
        } else {
            Vec::new()
        };
        Ok(Self {
            action,
            crafting,
            smelting,
            blast_furnace,
            smoker,
            recipes,
            highlighted,
        })
    }
}

/// Recipe definitions; the ingredient encoding is kept undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareRecipes {
    pub data: Bytes,
}

impl Packet for DeclareRecipes {
    const ID: i32 = 0x66;
    const NAME: &'static str = "DeclareRecipes";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_bytes(&self.data);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            data: r.read_remaining(),
        })
    }
}

/// Answer to a block or entity NBT query
#[derive(Debug, Clone, PartialEq)]
pub struct NbtQueryResponse {
    pub transaction_id: i32,
    pub nbt: Option<Compound>,
}

impl Packet for NbtQueryResponse {
    const ID: i32 = 0x60;
    const NAME: &'static str = "NbtQueryResponse";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.transaction_id)
            .write_optional_compound(self.nbt.as_ref());
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            transaction_id: r.read_var_int()?,
            nbt: r.read_optional_compound()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode, reencode};
    use pretty_assertions::assert_eq;

    fn trade() -> Trade {
        Trade {
            input: Some(ItemStack::new(1, 12)),
            output: Some(ItemStack::new(2, 1)),
            second_input: None,
            disabled: false,
            uses: 0,
            max_uses: 12,
            experience: 2,
            special_price: 0,
            price_multiplier: 0.05,
            demand: 0,
        }
    }

    #[test]
    fn test_trade_list_count_is_a_byte() {
        let packet = TradeList {
            window_id: 300,
            trades: vec![trade(), trade()],
            villager_level: 1,
            experience: 0,
            is_regular_villager: true,
            can_restock: true,
        };
        let bytes = encode(&packet);
        // 300 takes two VarInt bytes
        assert_eq!(bytes[2], 2);
        assert_eq!(decode::<TradeList>(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_unlock_recipes_highlighted_only_on_init() {
        let add = UnlockRecipes {
            action: UnlockAction::Add,
            crafting: RecipeBookState::default(),
            smelting: RecipeBookState::default(),
            blast_furnace: RecipeBookState::default(),
            smoker: RecipeBookState {
                open: true,
                filter_active: false,
            },
            recipes: vec![Identifier::parse("oak_planks").unwrap()],
            highlighted: Vec::new(),
        };
        assert_eq!(reencode(&add), add);

        let init = UnlockRecipes {
            action: UnlockAction::Init,
            highlighted: vec![Identifier::parse("stick").unwrap()],
            ..add.clone()
        };
        assert_eq!(encode(&init).len(), encode(&add).len() + 1 + 1 + "minecraft:stick".len());
        assert_eq!(reencode(&init), init);
    }

    #[test]
    fn test_window_items_reencode() {
        let packet = WindowItems {
            window_id: PLAYER_INVENTORY,
            state_id: 3,
            slots: vec![None, Some(ItemStack::new(5, 64)), None],
            carried: None,
        };
        assert_eq!(reencode(&packet), packet);
    }
}
