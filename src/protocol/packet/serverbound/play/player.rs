//! Chat, settings and the player's interactions with entities.

use uuid::Uuid;

use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;
use crate::world::Hand;

/// Longest chat message or command a server accepts
pub const MAX_CHAT_LEN: usize = 256;

/// Chat message, or a command when it starts with `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub message: String,
}

impl Packet for ChatMessage {
    const ID: i32 = 0x03;
    const NAME: &'static str = "ChatMessage";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.message);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            message: r.read_string(MAX_CHAT_LEN)?,
        })
    }
}

wire_enum! {
    pub enum ClientStatusAction {
        PerformRespawn = 0,
        RequestStats = 1,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientStatus {
    pub action: ClientStatusAction,
}

impl Packet for ClientStatus {
    const ID: i32 = 0x04;
    const NAME: &'static str = "ClientStatus";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.action);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            action: r.read_enum()?,
        })
    }
}

wire_enum! {
    pub enum ChatMode {
        Enabled = 0,
        CommandsOnly = 1,
        Hidden = 2,
    }
}

wire_enum! {
    /// Dominant hand of the player model
    pub enum MainHand {
        Left = 0,
        Right = 1,
    }
}

/// Bits of [`ClientSettings::displayed_skin_parts`]
pub mod skin_parts {
    pub const CAPE: u8 = 0x01;
    pub const JACKET: u8 = 0x02;
    pub const LEFT_SLEEVE: u8 = 0x04;
    pub const RIGHT_SLEEVE: u8 = 0x08;
    pub const LEFT_PANTS_LEG: u8 = 0x10;
    pub const RIGHT_PANTS_LEG: u8 = 0x20;
    pub const HAT: u8 = 0x40;
    pub const ALL: u8 = 0x7F;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// e.g. `en_us`
    pub locale: String,
    pub view_distance: i8,
    pub chat_mode: ChatMode,
    pub chat_colors: bool,
    pub displayed_skin_parts: u8,
    pub main_hand: MainHand,
    pub enable_text_filtering: bool,
    /// Whether the player may appear in the server list sample
    pub allow_server_listings: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            locale: "en_us".to_owned(),
            view_distance: 10,
            chat_mode: ChatMode::Enabled,
            chat_colors: true,
            displayed_skin_parts: skin_parts::ALL,
            main_hand: MainHand::Right,
            enable_text_filtering: false,
            allow_server_listings: true,
        }
    }
}

impl Packet for ClientSettings {
    const ID: i32 = 0x05;
    const NAME: &'static str = "ClientSettings";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.locale)
            .write_i8(self.view_distance)
            .write_enum(self.chat_mode)
            .write_bool(self.chat_colors)
            .write_u8(self.displayed_skin_parts)
            .write_enum(self.main_hand)
            .write_bool(self.enable_text_filtering)
            .write_bool(self.allow_server_listings);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            locale: r.read_string(16)?,
            view_distance: r.read_i8()?,
            chat_mode: r.read_enum()?,
            chat_colors: r.read_bool()?,
            displayed_skin_parts: r.read_u8()?,
            main_hand: r.read_enum()?,
            enable_text_filtering: r.read_bool()?,
            allow_server_listings: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabComplete {
    pub transaction_id: i32,
    /// Text behind the cursor, including the leading `/`
    pub text: String,
}

impl Packet for TabComplete {
    const ID: i32 = 0x06;
    const NAME: &'static str = "TabComplete";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.transaction_id)
            .write_string(&self.text);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            transaction_id: r.read_var_int()?,
            text: r.read_string(32_500)?,
        })
    }
}

/// Book edit; a title signs the book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBook {
    pub hand: Hand,
    pub pages: Vec<String>,
    pub title: Option<String>,
}

impl Packet for EditBook {
    const ID: i32 = 0x0B;
    const NAME: &'static str = "EditBook";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.hand)
            .write_list(&self.pages, |w, page| {
                w.write_string(page);
            })
            .write_option(self.title.as_ref(), |w, title| {
                w.write_string(title);
            });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let hand = r.read_enum()?;
        let pages = r.read_list(|r| r.read_string(8192))?;
        if pages.len() > 200 {
            return Err(DecodeError::invalid(
                "pages",
                format!("{} pages exceed the limit of 200", pages.len()),
            ));
        }
        Ok(Self {
            hand,
            pages,
            title: r.read_option(|r| r.read_string(128))?,
        })
    }
}

/// How an entity was interacted with
#[derive(Debug, Clone, PartialEq)]
pub enum InteractAction {
    Interact(Hand),
    Attack,
    /// Interaction at a point relative to the entity
    InteractAt {
        target_x: f32,
        target_y: f32,
        target_z: f32,
        hand: Hand,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractEntity {
    pub entity_id: i32,
    pub action: InteractAction,
    pub sneaking: bool,
}

impl Packet for InteractEntity {
    const ID: i32 = 0x0D;
    const NAME: &'static str = "InteractEntity";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id);
        match &self.action {
            InteractAction::Interact(hand) => {
                w.write_var_int(0).write_enum(*hand);
            }
            InteractAction::Attack => {
                w.write_var_int(1);
            }
            InteractAction::InteractAt {
                target_x,
                target_y,
                target_z,
                hand,
            } => {
                w.write_var_int(2)
                    .write_f32(*target_x)
                    .write_f32(*target_y)
                    .write_f32(*target_z)
                    .write_enum(*hand);
            }
        }
        w.write_bool(self.sneaking);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let entity_id = r.read_var_int()?;
        let action = match r.read_var_int()? {
            0 => InteractAction::Interact(r.read_enum()?),
            1 => InteractAction::Attack,
            2 => InteractAction::InteractAt {
                target_x: r.read_f32()?,
                target_y: r.read_f32()?,
                target_z: r.read_f32()?,
                hand: r.read_enum()?,
            },
            id => {
                return Err(DecodeError::UnknownEnumId {
                    kind: "InteractAction",
                    id,
                })
            }
        };
        Ok(Self {
            entity_id,
            action,
            sneaking: r.read_bool()?,
        })
    }
}

/// Only the flying bit (0x02) is read by servers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAbilities {
    pub flags: i8,
}

impl Packet for PlayerAbilities {
    const ID: i32 = 0x19;
    const NAME: &'static str = "PlayerAbilities";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i8(self.flags);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            flags: r.read_i8()?,
        })
    }
}

wire_enum! {
    pub enum EntityActionKind {
        StartSneaking = 0,
        StopSneaking = 1,
        LeaveBed = 2,
        StartSprinting = 3,
        StopSprinting = 4,
        StartJumpWithHorse = 5,
        StopJumpWithHorse = 6,
        OpenHorseInventory = 7,
        StartFlyingWithElytra = 8,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityAction {
    pub entity_id: i32,
    pub action: EntityActionKind,
    /// Horse jump strength `0..=100`, zero otherwise
    pub jump_boost: i32,
}

impl Packet for EntityAction {
    const ID: i32 = 0x1B;
    const NAME: &'static str = "EntityAction";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.entity_id)
            .write_enum(self.action)
            .write_var_int(self.jump_boost);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity_id: r.read_var_int()?,
            action: r.read_enum()?,
            jump_boost: r.read_var_int()?,
        })
    }
}

/// Arm swing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub hand: Hand,
}

impl Packet for Animation {
    const ID: i32 = 0x2C;
    const NAME: &'static str = "Animation";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.hand);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            hand: r.read_enum()?,
        })
    }
}

/// Teleport a spectator to an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spectate {
    pub target: Uuid,
}

impl Packet for Spectate {
    const ID: i32 = 0x2D;
    const NAME: &'static str = "Spectate";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_uuid(&self.target);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            target: r.read_uuid()?,
        })
    }
}

/// Right click with the item in `hand`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseItem {
    pub hand: Hand,
}

impl Packet for UseItem {
    const ID: i32 = 0x2F;
    const NAME: &'static str = "UseItem";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_enum(self.hand);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            hand: r.read_enum()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode, reencode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chat_message_limit() {
        let ok = ChatMessage {
            message: "a".repeat(MAX_CHAT_LEN),
        };
        assert_eq!(reencode(&ok), ok);

        let too_long = ChatMessage {
            message: "a".repeat(MAX_CHAT_LEN + 1),
        };
        assert!(decode::<ChatMessage>(&encode(&too_long)).is_err());
    }

    #[test]
    fn test_client_settings_trailing_flags() {
        let settings = ClientSettings::default();
        let bytes = encode(&settings);
        // en_us, view distance, chat mode, colors, skin parts, hand, filter, listings
        assert_eq!(bytes.len(), 6 + 1 + 1 + 1 + 1 + 1 + 1 + 1);
        assert_eq!(bytes[bytes.len() - 1], 1);
        assert_eq!(reencode(&settings), settings);
    }

    #[test]
    fn test_interact_actions() {
        for action in [
            InteractAction::Interact(Hand::OffHand),
            InteractAction::Attack,
            InteractAction::InteractAt {
                target_x: 0.5,
                target_y: 1.0,
                target_z: 0.25,
                hand: Hand::MainHand,
            },
        ] {
            let packet = InteractEntity {
                entity_id: 12,
                action,
                sneaking: true,
            };
            assert_eq!(reencode(&packet), packet);
        }
    }

    #[test]
    fn test_attack_has_no_hand() {
        let packet = InteractEntity {
            entity_id: 1,
            action: InteractAction::Attack,
            sneaking: false,
        };
        assert_eq!(encode(&packet), vec![0x01, 0x01, 0x00]);
    }

    #[test]
    fn test_edit_book_signed() {
        let packet = EditBook {
            hand: Hand::MainHand,
            pages: vec!["page one".to_owned(), "page two".to_owned()],
            title: Some("Diary".to_owned()),
        };
        assert_eq!(reencode(&packet), packet);
    }
}
