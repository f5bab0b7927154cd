//! Chat, titles, boss bars and other text shown to the player.

use bytes::Bytes;
use uuid::Uuid;

use crate::protocol::component::Component;
use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;

wire_enum! {
    pub enum ChatPosition {
        Chat = 0,
        System = 1,
        /// Shown above the hotbar
        GameInfo = 2,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub message: Component,
    pub position: ChatPosition,
    /// Nil for messages not sent by a player
    pub sender: Uuid,
}

impl Packet for ChatMessage {
    const ID: i32 = 0x0F;
    const NAME: &'static str = "ChatMessage";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_component(&self.message)
            .write_i8_enum(self.position)
            .write_uuid(&self.sender);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            message: r.read_component()?,
            position: r.read_i8_enum()?,
            sender: r.read_uuid()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabCompleteMatch {
    pub text: String,
    pub tooltip: Option<Component>,
}

/// Completions for the text range `start..start + length`
#[derive(Debug, Clone, PartialEq)]
pub struct TabComplete {
    pub transaction_id: i32,
    pub start: i32,
    pub length: i32,
    pub matches: Vec<TabCompleteMatch>,
}

impl Packet for TabComplete {
    const ID: i32 = 0x11;
    const NAME: &'static str = "TabComplete";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_var_int(self.transaction_id)
            .write_var_int(self.start)
            .write_var_int(self.length)
            .write_list(&self.matches, |w, completion| {
                w.write_string(&completion.text)
                    .write_option(completion.tooltip.as_ref(), |w, tooltip| {
                        w.write_component(tooltip);
                    });
            });
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            transaction_id: r.read_var_int()?,
            start: r.read_var_int()?,
            length: r.read_var_int()?,
            matches: r.read_list(|r| {
                Ok(TabCompleteMatch {
                    text: r.read_string(32_767)?,
                    tooltip: r.read_option(|r| r.read_component())?,
                })
            })?,
        })
    }
}

/// Brigadier command graph, kept undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareCommands {
    pub data: Bytes,
}

impl Packet for DeclareCommands {
    const ID: i32 = 0x12;
    const NAME: &'static str = "DeclareCommands";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_bytes(&self.data);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            data: r.read_remaining(),
        })
    }
}

/// Kick during play
#[derive(Debug, Clone, PartialEq)]
pub struct Disconnect {
    pub reason: Component,
}

impl Packet for Disconnect {
    const ID: i32 = 0x1A;
    const NAME: &'static str = "Disconnect";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_component(&self.reason);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            reason: r.read_component()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionBar {
    pub text: Component,
}

impl Packet for ActionBar {
    const ID: i32 = 0x41;
    const NAME: &'static str = "ActionBar";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_component(&self.text);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            text: r.read_component()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearTitles {
    /// Also reset the fade times
    pub reset: bool,
}

impl Packet for ClearTitles {
    const ID: i32 = 0x10;
    const NAME: &'static str = "ClearTitles";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_bool(self.reset);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            reset: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetTitleSubtitle {
    pub subtitle: Component,
}

impl Packet for SetTitleSubtitle {
    const ID: i32 = 0x58;
    const NAME: &'static str = "SetTitleSubtitle";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_component(&self.subtitle);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            subtitle: r.read_component()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetTitleText {
    pub title: Component,
}

impl Packet for SetTitleText {
    const ID: i32 = 0x5A;
    const NAME: &'static str = "SetTitleText";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_component(&self.title);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            title: r.read_component()?,
        })
    }
}

/// Title timings in ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTitleTimes {
    pub fade_in: i32,
    pub stay: i32,
    pub fade_out: i32,
}

impl Packet for SetTitleTimes {
    const ID: i32 = 0x5B;
    const NAME: &'static str = "SetTitleTimes";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i32(self.fade_in)
            .write_i32(self.stay)
            .write_i32(self.fade_out);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            fade_in: r.read_i32()?,
            stay: r.read_i32()?,
            fade_out: r.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerListHeaderAndFooter {
    pub header: Component,
    pub footer: Component,
}

impl Packet for PlayerListHeaderAndFooter {
    const ID: i32 = 0x5F;
    const NAME: &'static str = "PlayerListHeaderAndFooter";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_component(&self.header)
            .write_component(&self.footer);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            header: r.read_component()?,
            footer: r.read_component()?,
        })
    }
}

wire_enum! {
    pub enum BossBarColor {
        Pink = 0,
        Blue = 1,
        Red = 2,
        Green = 3,
        Yellow = 4,
        Purple = 5,
        White = 6,
    }
}

wire_enum! {
    pub enum BossBarDivision {
        Solid = 0,
        Notches6 = 1,
        Notches10 = 2,
        Notches12 = 3,
        Notches20 = 4,
    }
}

/// Boss bar flags: 0x01 darken sky, 0x02 dragon bar, 0x04 create fog
#[derive(Debug, Clone, PartialEq)]
pub enum BossBarAction {
    Add {
        title: Component,
        health: f32,
        color: BossBarColor,
        division: BossBarDivision,
        flags: u8,
    },
    Remove,
    UpdateHealth(f32),
    UpdateTitle(Component),
    UpdateStyle {
        color: BossBarColor,
        division: BossBarDivision,
    },
    UpdateFlags(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossBar {
    pub uuid: Uuid,
    pub action: BossBarAction,
}

/// Vanilla sends 0..=1, but only negative health is malformed
fn read_health(r: &mut PacketReader) -> Result<f32, DecodeError> {
    r.read_f32_in("health", 0.0, f32::MAX)
}

impl Packet for BossBar {
    const ID: i32 = 0x0D;
    const NAME: &'static str = "BossBar";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_uuid(&self.uuid);
        match &self.action {
            BossBarAction::Add {
                title,
                health,
                color,
                division,
                flags,
            } => {
                w.write_var_int(0)
                    .write_component(title)
                    .write_f32(*health)
                    .write_enum(*color)
                    .write_enum(*division)
                    .write_u8(*flags);
            }
            BossBarAction::Remove => {
                w.write_var_int(1);
            }
            BossBarAction::UpdateHealth(health) => {
                w.write_var_int(2).write_f32(*health);
            }
            BossBarAction::UpdateTitle(title) => {
                w.write_var_int(3).write_component(title);
            }
            BossBarAction::UpdateStyle { color, division } => {
                w.write_var_int(4).write_enum(*color).write_enum(*division);
            }
            BossBarAction::UpdateFlags(flags) => {
                w.write_var_int(5).write_u8(*flags);
            }
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let uuid = r.read_uuid()?;
        let action = match r.read_var_int()? {
            0 => BossBarAction::Add {
                title: r.read_component()?,
                health: read_health(r)?,
                color: r.read_enum()?,
                division: r.read_enum()?,
                flags: r.read_u8()?,
            },
            1 => BossBarAction::Remove,
            2 => BossBarAction::UpdateHealth(read_health(r)?),
            3 => BossBarAction::UpdateTitle(r.read_component()?),
            4 => BossBarAction::UpdateStyle {
                color: r.read_enum()?,
                division: r.read_enum()?,
            },
            5 => BossBarAction::UpdateFlags(r.read_u8()?),
            id => {
                return Err(DecodeError::UnknownEnumId {
                    kind: "BossBarAction",
                    id,
                })
            }
        };
        Ok(Self { uuid, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::test_util::{decode, encode, reencode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chat_message_position_is_a_byte() {
        let packet = ChatMessage {
            message: Component::text("hi"),
            position: ChatPosition::System,
            sender: Uuid::nil(),
        };
        let bytes = encode(&packet);
        let json_len = usize::from(bytes[0]) + 1;
        assert_eq!(bytes[json_len], 1);
        assert_eq!(bytes.len(), json_len + 1 + 16);
        assert_eq!(decode::<ChatMessage>(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_boss_bar_actions() {
        for action in [
            BossBarAction::Add {
                title: Component::text("Ender Dragon"),
                health: 1.0,
                color: BossBarColor::Purple,
                division: BossBarDivision::Notches10,
                flags: 0x02,
            },
            BossBarAction::Remove,
            BossBarAction::UpdateHealth(0.5),
            BossBarAction::UpdateFlags(0x05),
        ] {
            let packet = BossBar {
                uuid: Uuid::from_u128(7),
                action,
            };
            assert_eq!(reencode(&packet), packet);
        }
    }

    #[test]
    fn test_boss_bar_health_must_not_be_negative() {
        let mut w = PacketWriter::new();
        w.write_uuid(&Uuid::nil()).write_var_int(2).write_f32(-0.5);
        assert!(matches!(
            decode::<BossBar>(w.as_slice()),
            Err(DecodeError::InvalidField { field: "health", .. })
        ));
    }

    #[test]
    fn test_boss_bar_health_above_one_is_kept() {
        let mut w = PacketWriter::new();
        w.write_uuid(&Uuid::nil()).write_var_int(2).write_f32(1.5);
        assert_eq!(
            decode::<BossBar>(w.as_slice()).unwrap().action,
            BossBarAction::UpdateHealth(1.5)
        );
    }

    #[test]
    fn test_tab_complete_tooltips() {
        let packet = TabComplete {
            transaction_id: 1,
            start: 5,
            length: 2,
            matches: vec![
                TabCompleteMatch {
                    text: "help".to_owned(),
                    tooltip: None,
                },
                TabCompleteMatch {
                    text: "home".to_owned(),
                    tooltip: Some(Component::text("Teleport home")),
                },
            ],
        };
        assert_eq!(reencode(&packet), packet);
    }
}
