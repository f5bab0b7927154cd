//! Scoreboard objectives, scores and teams.

use crate::protocol::component::Component;
use crate::protocol::io::{PacketReader, PacketWriter};
use crate::protocol::packet::Packet;
use crate::shared::error::DecodeError;

const OBJECTIVE_NAME_LEN: usize = 16;
const TEAM_NAME_LEN: usize = 16;
const ENTITY_NAME_LEN: usize = 40;

/// Shows an objective in a scoreboard slot.
///
/// Slot 0 is the player list, 1 the sidebar, 2 below the name and 3..=18
/// the team coloured sidebars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayScoreboard {
    pub position: i8,
    pub score_name: String,
}

impl Packet for DisplayScoreboard {
    const ID: i32 = 0x4C;
    const NAME: &'static str = "DisplayScoreboard";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_i8(self.position).write_string(&self.score_name);
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            position: r.read_i8()?,
            score_name: r.read_string(OBJECTIVE_NAME_LEN)?,
        })
    }
}

wire_enum! {
    pub enum ObjectiveType {
        Integer = 0,
        Hearts = 1,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveAction {
    Create {
        value: Component,
        objective_type: ObjectiveType,
    },
    Remove,
    Update {
        value: Component,
        objective_type: ObjectiveType,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardObjective {
    pub objective_name: String,
    pub action: ObjectiveAction,
}

impl Packet for ScoreboardObjective {
    const ID: i32 = 0x53;
    const NAME: &'static str = "ScoreboardObjective";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.objective_name);
        match &self.action {
            ObjectiveAction::Create {
                value,
                objective_type,
            } => {
                w.write_i8(0)
                    .write_component(value)
                    .write_enum(*objective_type);
            }
            ObjectiveAction::Remove => {
                w.write_i8(1);
            }
            ObjectiveAction::Update {
                value,
                objective_type,
            } => {
                w.write_i8(2)
                    .write_component(value)
                    .write_enum(*objective_type);
            }
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let objective_name = r.read_string(OBJECTIVE_NAME_LEN)?;
        let action = match r.read_i8()? {
            0 => ObjectiveAction::Create {
                value: r.read_component()?,
                objective_type: r.read_enum()?,
            },
            1 => ObjectiveAction::Remove,
            2 => ObjectiveAction::Update {
                value: r.read_component()?,
                objective_type: r.read_enum()?,
            },
            mode => {
                return Err(DecodeError::UnknownEnumId {
                    kind: "ObjectiveAction",
                    id: i32::from(mode),
                })
            }
        };
        Ok(Self {
            objective_name,
            action,
        })
    }
}

/// Display settings shared by team creation and updates
#[derive(Debug, Clone, PartialEq)]
pub struct TeamInfo {
    pub display_name: Component,
    /// 0x01 friendly fire, 0x02 see invisible teammates
    pub friendly_flags: i8,
    /// `always`, `hideForOtherTeams`, `hideForOwnTeam` or `never`
    pub name_tag_visibility: String,
    /// `always`, `pushOtherTeams`, `pushOwnTeam` or `never`
    pub collision_rule: String,
    /// Chat formatting code, 21 for reset
    pub color: i32,
    pub prefix: Component,
    pub suffix: Component,
}

impl TeamInfo {
    fn write(&self, w: &mut PacketWriter) {
        w.write_component(&self.display_name)
            .write_i8(self.friendly_flags)
            .write_string(&self.name_tag_visibility)
            .write_string(&self.collision_rule)
            .write_var_int(self.color)
            .write_component(&self.prefix)
            .write_component(&self.suffix);
    }

    fn read(r: &mut PacketReader) -> Result<Self, DecodeError> {
        Ok(Self {
            display_name: r.read_component()?,
            friendly_flags: r.read_i8()?,
            name_tag_visibility: r.read_string(ENTITY_NAME_LEN)?,
            collision_rule: r.read_string(ENTITY_NAME_LEN)?,
            color: r.read_var_int()?,
            prefix: r.read_component()?,
            suffix: r.read_component()?,
        })
    }
}

/// Team change; entities are player names or entity UUIDs
#[derive(Debug, Clone, PartialEq)]
pub enum TeamAction {
    Create {
        info: TeamInfo,
        entities: Vec<String>,
    },
    Remove,
    UpdateInfo(TeamInfo),
    AddEntities(Vec<String>),
    RemoveEntities(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Teams {
    pub team_name: String,
    pub action: TeamAction,
}

fn write_entities(w: &mut PacketWriter, entities: &[String]) {
    w.write_list(entities, |w, entity| {
        w.write_string(entity);
    });
}

fn read_entities(r: &mut PacketReader) -> Result<Vec<String>, DecodeError> {
    r.read_list(|r| r.read_string(ENTITY_NAME_LEN))
}

impl Packet for Teams {
    const ID: i32 = 0x55;
    const NAME: &'static str = "Teams";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.team_name);
        match &self.action {
            TeamAction::Create { info, entities } => {
                w.write_i8(0);
                info.write(w);
                write_entities(w, entities);
            }
            TeamAction::Remove => {
                w.write_i8(1);
            }
            TeamAction::UpdateInfo(info) => {
                w.write_i8(2);
                info.write(w);
            }
            TeamAction::AddEntities(entities) => {
                w.write_i8(3);
                write_entities(w, entities);
            }
            TeamAction::RemoveEntities(entities) => {
                w.write_i8(4);
                write_entities(w, entities);
            }
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let team_name = r.read_string(TEAM_NAME_LEN)?;
        let action = match r.read_i8()? {
            0 => TeamAction::Create {
                info: TeamInfo::read(r)?,
                entities: read_entities(r)?,
            },
            1 => TeamAction::Remove,
            2 => TeamAction::UpdateInfo(TeamInfo::read(r)?),
            3 => TeamAction::AddEntities(read_entities(r)?),
            4 => TeamAction::RemoveEntities(read_entities(r)?),
            mode => {
                return Err(DecodeError::UnknownEnumId {
                    kind: "TeamAction",
                    id: i32::from(mode),
                })
            }
        };
        Ok(Self { team_name, action })
    }
}

/// Sets a score, or removes it when `value` is `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateScore {
    pub entity_name: String,
    pub objective_name: String,
    pub value: Option<i32>,
}

impl Packet for UpdateScore {
    const ID: i32 = 0x56;
    const NAME: &'static str = "UpdateScore";

    fn encode(&self, w: &mut PacketWriter) {
        w.write_string(&self.entity_name)
            .write_i8(if self.value.is_some() { 0 } else { 1 })
            .write_string(&self.objective_name);
        if let Some(value) = self.value {
            w.write_var_int(value);
        }
    }

    fn decode(r: &mut PacketReader) -> Result<Self, DecodeError> {
        let entity_name = r.read_string(ENTITY_NAME_LEN)?;
        let action = r.read_i8()?;
        let objective_name = r.read_string(OBJECTIVE_NAME_LEN)?;
        let value = match action {
            0 => Some(r.read_var_int()?),
            1 => None,
            action => {
                return Err(DecodeError::UnknownEnumId {
                    kind: "ScoreAction",
                    id: i32::from(action),
                })
            }
        };
        Ok(Self {
            entity_name,
            objective_name,
            value,
        })
    }
}
