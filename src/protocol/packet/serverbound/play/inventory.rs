//! Windows, items, trading and recipes.

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::item::ItemStack;
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::Identifier;

/// Button in an enchanting table, lectern, loom or stonecutter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickWindowButton {
    pub window_id: i8,
    pub button_id: i8,
}

impl Packet for ClickWindowButton {
    const ID: i32 = 0x07;
    const NAME: &'static str = "ClickWindowButton";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i8(self.window_id).write_i8(self.button_id);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_i8()?,
            button_id: r.read_i8()?,
        })
    }
}

wire_enum! {
    pub enum ClickMode {
        Click = 0,
        ShiftClick = 1,
        NumberKey = 2,
        MiddleClick = 3,
        Drop = 4,
        Drag = 5,
        DoubleClick = 6,
    }
}

/// Slot changed by a click, as predicted by the client
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedSlot {
    pub slot: i16,
    pub item: Option<ItemStack>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClickWindow {
    pub window_id: u8,
    /// Last state id received for the window
    pub state_id: i32,
    pub slot: i16,
    pub button: i8,
    pub mode: ClickMode,
    pub changed_slots: Vec<ChangedSlot>,
    pub carried: Option<ItemStack>,
}

impl Packet for ClickWindow {
    const ID: i32 = 0x08;
    const NAME: &'static str = "ClickWindow";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_u8(self.window_id)
            .write_var_int(self.state_id)
            .write_i16(self.slot)
            .write_i8(self.button)
            .write_enum(self.mode)
            .write_list(&self.changed_slots, |w, changed| {
                w.write_i16(changed.slot).write_slot(changed.item.as_ref());
            })
            .write_slot(self.carried.as_ref());
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_u8()?,
            state_id: r.read_var_int()?,
            slot: r.read_i16()?,
            button: r.read_i8()?,
            mode: r.read_enum()?,
            changed_slots: r.read_list(|r| {
                Ok(ChangedSlot {
                    slot: r.read_i16()?,
                    item: r.read_slot()?,
                })
            })?,
            carried: r.read_slot()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseWindow {
    pub window_id: u8,
}

impl Packet for CloseWindow {
    const ID: i32 = 0x09;
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

/// Swap the hotbar with the given inventory slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub slot: i32,
}

impl Packet for PickItem {
    const ID: i32 = 0x17;
    const NAME: &'static str = "PickItem";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.slot);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            slot: r.read_var_int()?,
        })
    }
}

/// Recipe book click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftRecipeRequest {
    pub window_id: i8,
    pub recipe: Identifier,
    /// Shift click, craft as many as possible
    pub make_all: bool,
}

impl Packet for CraftRecipeRequest {
    const ID: i32 = 0x18;
    const NAME: &'static str = "CraftRecipeRequest";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i8(self.window_id)
            .write_identifier(&self.recipe)
            .write_bool(self.make_all);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            window_id: r.read_i8()?,
            recipe: r.read_identifier()?,
            make_all: r.read_bool()?,
        })
    }
}

wire_enum! {
    pub enum RecipeBook {
        Crafting = 0,
        Furnace = 1,
        BlastFurnace = 2,
        Smoker = 3,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRecipeBookState {
    pub book: RecipeBook,
    pub book_open: bool,
    pub filter_active: bool,
}

impl Packet for SetRecipeBookState {
    const ID: i32 = 0x1E;
    const NAME: &'static str = "SetRecipeBookState";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.book)
            .write_bool(self.book_open)
            .write_bool(self.filter_active);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            book: r.read_enum()?,
            book_open: r.read_bool()?,
            filter_active: r.read_bool()?,
        })
    }
}

/// Recipe viewed in the recipe book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDisplayedRecipe {
    pub recipe: Identifier,
}

impl Packet for SetDisplayedRecipe {
    const ID: i32 = 0x1F;
    const NAME: &'static str = "SetDisplayedRecipe";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_identifier(&self.recipe);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            recipe: r.read_identifier()?,
        })
    }
}

/// Anvil rename text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameItem {
    pub item_name: String,
}

impl Packet for NameItem {
    const ID: i32 = 0x20;
    const NAME: &'static str = "NameItem";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.item_name);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            item_name: r.read_string(32_767)?,
        })
    }
}

/// Trade selected in a merchant window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectTrade {
    pub selected_slot: i32,
}

impl Packet for SelectTrade {
    const ID: i32 = 0x23;
    const NAME: &'static str = "SelectTrade";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.selected_slot);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            selected_slot: r.read_var_int()?,
        })
    }
}

/// Potion effect ids chosen in a beacon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetBeaconEffect {
    pub primary_effect: i32,
    pub secondary_effect: i32,
}

impl Packet for SetBeaconEffect {
    const ID: i32 = 0x24;
    const NAME: &'static str = "SetBeaconEffect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.primary_effect)
            .write_var_int(self.secondary_effect);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            primary_effect: r.read_var_int()?,
            secondary_effect: r.read_var_int()?,
        })
    }
}

/// Selected hotbar slot, `0..=8`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldItemChange {
    pub slot: i16,
}

impl Packet for HeldItemChange {
    const ID: i32 = 0x25;
    const NAME: &'static str = "HeldItemChange";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i16(self.slot);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let slot = r.read_i16()?;
        if !(0..=8).contains(&slot) {
            return Err(DecodeError::invalid(
                "slot",
                format!("{} is not a hotbar slot", slot),
            ));
        }
        Ok(Self { slot })
    }
}

/// Creative mode inventory edit; `None` deletes the item
#[derive(Debug, Clone, PartialEq)]
pub struct CreativeInventoryAction {
    pub slot: i16,
    pub clicked_item: Option<ItemStack>,
}

impl Packet for CreativeInventoryAction {
    const ID: i32 = 0x28;
    const NAME: &'static str = "CreativeInventoryAction";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i16(self.slot)
            .write_slot(self.clicked_item.as_ref());
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            slot: r.read_i16()?,
            clicked_item: r.read_slot()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, reencode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_click_window_reencodes() {
        let packet = ClickWindow {
            window_id: 1,
            state_id: 4,
            slot: 36,
            button: 0,
            mode: ClickMode::ShiftClick,
            changed_slots: vec![
                ChangedSlot {
                    slot: 36,
                    item: None,
                },
                ChangedSlot {
                    slot: 0,
                    item: Some(ItemStack::new(7, 3)),
                },
            ],
            carried: None,
        };
        assert_eq!(reencode(&packet), packet);
    }

    #[test]
    fn test_held_item_change_rejects_slot_outside_hotbar() {
        assert_eq!(decode::<HeldItemChange>(&[0x00, 0x04]).unwrap().slot, 4);
        assert!(matches!(
            decode::<HeldItemChange>(&[0x00, 0x09]),
            Err(DecodeError::InvalidField { field: "slot", .. })
        ));
    }
}
