//! Static Registries
//!
//! One registry per direction and state, built on first use.

use once_cell::sync::Lazy;

use super::packet::clientbound::{self, ClientboundPacket};
use super::packet::serverbound::{self, ServerboundPacket};
use super::registry::{PacketRegistry, PacketRegistryBuilder};
use super::state::ConnectionState;

fn build<P>(builder: PacketRegistryBuilder<P>) -> PacketRegistry<P> {
    builder
        .build()
        .unwrap_or_else(|err| panic!("Invalid static packet registry: {}", err))
}

static CLIENTBOUND_NONE: Lazy<PacketRegistry<ClientboundPacket>> =
    Lazy::new(|| PacketRegistry::empty(ConnectionState::NotConnected));

static CLIENTBOUND_HANDSHAKING: Lazy<PacketRegistry<ClientboundPacket>> =
    Lazy::new(|| PacketRegistry::empty(ConnectionState::Handshaking));

static CLIENTBOUND_STATUS: Lazy<PacketRegistry<ClientboundPacket>> = Lazy::new(|| {
    use clientbound::status;
    build(
        PacketRegistry::builder(ConnectionState::Status)
            .register::<status::Response>()
            .register::<status::Pong>(),
    )
});

static CLIENTBOUND_LOGIN: Lazy<PacketRegistry<ClientboundPacket>> = Lazy::new(|| {
    use clientbound::login;
    build(
        PacketRegistry::builder(ConnectionState::Login)
            .register::<login::Disconnect>()
            .register::<login::EncryptionRequest>()
            .register::<login::LoginSuccess>()
            .register::<login::SetCompression>()
            .register::<login::LoginPluginRequest>(),
    )
});

static CLIENTBOUND_PLAY: Lazy<PacketRegistry<ClientboundPacket>> = Lazy::new(|| {
    use clientbound::play;
    build(
        PacketRegistry::builder(ConnectionState::Play)
            .register::<play::SpawnEntity>()
            .register::<play::SpawnExperienceOrb>()
            .register::<play::SpawnLivingEntity>()
            .register::<play::SpawnPainting>()
            .register::<play::SpawnPlayer>()
            .register::<play::SculkVibrationSignal>()
            .register::<play::EntityAnimation>()
            .register::<play::Statistics>()
            .register::<play::AckPlayerDigging>()
            .register::<play::BlockBreakAnimation>()
            .register::<play::BlockEntityData>()
            .register::<play::BlockAction>()
            .register::<play::BlockChange>()
            .register::<play::BossBar>()
            .register::<play::ServerDifficulty>()
            .register::<play::ChatMessage>()
            .register::<play::ClearTitles>()
            .register::<play::TabComplete>()
            .register::<play::DeclareCommands>()
            .register::<play::CloseWindow>()
            .register::<play::WindowItems>()
            .register::<play::WindowProperty>()
            .register::<play::SetSlot>()
            .register::<play::SetCooldown>()
            .register::<play::PluginMessage>()
            .register::<play::NamedSoundEffect>()
            .register::<play::Disconnect>()
            .register::<play::EntityStatus>()
            .register::<play::Explosion>()
            .register::<play::UnloadChunk>()
            .register::<play::ChangeGameState>()
            .register::<play::OpenHorseWindow>()
            .register::<play::InitializeWorldBorder>()
            .register::<play::KeepAlive>()
            .register::<play::ChunkDataAndUpdateLight>()
            .register::<play::Effect>()
            .register::<play::Particle>()
            .register::<play::UpdateLight>()
            .register::<play::JoinGame>()
            .register::<play::MapData>()
            .register::<play::TradeList>()
            .register::<play::EntityPosition>()
            .register::<play::EntityPositionAndRotation>()
            .register::<play::EntityRotation>()
            .register::<play::VehicleMove>()
            .register::<play::OpenBook>()
            .register::<play::OpenWindow>()
            .register::<play::OpenSignEditor>()
            .register::<play::Ping>()
            .register::<play::CraftRecipeResponse>()
            .register::<play::PlayerAbilities>()
            .register::<play::EndCombatEvent>()
            .register::<play::EnterCombatEvent>()
            .register::<play::DeathCombatEvent>()
            .register::<play::PlayerInfo>()
            .register::<play::FacePlayer>()
            .register::<play::PlayerPositionAndLook>()
            .register::<play::UnlockRecipes>()
            .register::<play::DestroyEntities>()
            .register::<play::RemoveEntityEffect>()
            .register::<play::ResourcePackSend>()
            .register::<play::Respawn>()
            .register::<play::EntityHeadLook>()
            .register::<play::MultiBlockChange>()
            .register::<play::SelectAdvancementTab>()
            .register::<play::ActionBar>()
            .register::<play::WorldBorderCenter>()
            .register::<play::WorldBorderLerpSize>()
            .register::<play::WorldBorderSize>()
            .register::<play::WorldBorderWarningDelay>()
            .register::<play::WorldBorderWarningReach>()
            .register::<play::Camera>()
            .register::<play::HeldItemChange>()
            .register::<play::UpdateViewPosition>()
            .register::<play::UpdateViewDistance>()
            .register::<play::SpawnPosition>()
            .register::<play::DisplayScoreboard>()
            .register::<play::EntityMetadata>()
            .register::<play::AttachEntity>()
            .register::<play::EntityVelocity>()
            .register::<play::EntityEquipment>()
            .register::<play::SetExperience>()
            .register::<play::UpdateHealth>()
            .register::<play::ScoreboardObjective>()
            .register::<play::SetPassengers>()
            .register::<play::Teams>()
            .register::<play::UpdateScore>()
            .register::<play::UpdateSimulationDistance>()
            .register::<play::SetTitleSubtitle>()
            .register::<play::TimeUpdate>()
            .register::<play::SetTitleText>()
            .register::<play::SetTitleTimes>()
            .register::<play::EntitySoundEffect>()
            .register::<play::SoundEffect>()
            .register::<play::StopSound>()
            .register::<play::PlayerListHeaderAndFooter>()
            .register::<play::NbtQueryResponse>()
            .register::<play::CollectItem>()
            .register::<play::EntityTeleport>()
            .register::<play::Advancements>()
            .register::<play::EntityProperties>()
            .register::<play::EntityEffect>()
            .register::<play::DeclareRecipes>()
            .register::<play::Tags>(),
    )
});

static SERVERBOUND_NONE: Lazy<PacketRegistry<ServerboundPacket>> =
    Lazy::new(|| PacketRegistry::empty(ConnectionState::NotConnected));

static SERVERBOUND_HANDSHAKING: Lazy<PacketRegistry<ServerboundPacket>> = Lazy::new(|| {
    use serverbound::handshaking;
    build(
        PacketRegistry::builder(ConnectionState::Handshaking)
            .register::<handshaking::Handshake>(),
    )
});

static SERVERBOUND_STATUS: Lazy<PacketRegistry<ServerboundPacket>> = Lazy::new(|| {
    use serverbound::status;
    build(
        PacketRegistry::builder(ConnectionState::Status)
            .register::<status::Request>()
            .register::<status::Ping>(),
    )
});

static SERVERBOUND_LOGIN: Lazy<PacketRegistry<ServerboundPacket>> = Lazy::new(|| {
    use serverbound::login;
    build(
        PacketRegistry::builder(ConnectionState::Login)
            .register::<login::LoginStart>()
            .register::<login::EncryptionResponse>()
            .register::<login::LoginPluginResponse>(),
    )
});

static SERVERBOUND_PLAY: Lazy<PacketRegistry<ServerboundPacket>> = Lazy::new(|| {
    use serverbound::play;
    build(
        PacketRegistry::builder(ConnectionState::Play)
            .register::<play::TeleportConfirm>()
            .register::<play::QueryBlockNbt>()
            .register::<play::SetDifficulty>()
            .register::<play::ChatMessage>()
            .register::<play::ClientStatus>()
            .register::<play::ClientSettings>()
            .register::<play::TabComplete>()
            .register::<play::ClickWindowButton>()
            .register::<play::ClickWindow>()
            .register::<play::CloseWindow>()
            .register::<play::PluginMessage>()
            .register::<play::EditBook>()
            .register::<play::QueryEntityNbt>()
            .register::<play::InteractEntity>()
            .register::<play::GenerateStructure>()
            .register::<play::KeepAlive>()
            .register::<play::LockDifficulty>()
            .register::<play::PlayerPosition>()
            .register::<play::PlayerPositionAndRotation>()
            .register::<play::PlayerRotation>()
            .register::<play::PlayerMovement>()
            .register::<play::VehicleMove>()
            .register::<play::SteerBoat>()
            .register::<play::PickItem>()
            .register::<play::CraftRecipeRequest>()
            .register::<play::PlayerAbilities>()
            .register::<play::PlayerDigging>()
            .register::<play::EntityAction>()
            .register::<play::SteerVehicle>()
            .register::<play::Pong>()
            .register::<play::SetRecipeBookState>()
            .register::<play::SetDisplayedRecipe>()
            .register::<play::NameItem>()
            .register::<play::ResourcePackStatus>()
            .register::<play::AdvancementTab>()
            .register::<play::SelectTrade>()
            .register::<play::SetBeaconEffect>()
            .register::<play::HeldItemChange>()
            .register::<play::UpdateCommandBlock>()
            .register::<play::UpdateCommandBlockMinecart>()
            .register::<play::CreativeInventoryAction>()
            .register::<play::UpdateJigsawBlock>()
            .register::<play::UpdateStructureBlock>()
            .register::<play::UpdateSign>()
            .register::<play::Animation>()
            .register::<play::Spectate>()
            .register::<play::PlayerBlockPlacement>()
            .register::<play::UseItem>(),
    )
});

/// Registry decoding packets received by a client in `state`
pub fn clientbound(state: ConnectionState) -> &'static PacketRegistry<ClientboundPacket> {
    match state {
        ConnectionState::Handshaking => &CLIENTBOUND_HANDSHAKING,
        ConnectionState::Status => &CLIENTBOUND_STATUS,
        ConnectionState::Login => &CLIENTBOUND_LOGIN,
        ConnectionState::Play => &CLIENTBOUND_PLAY,
        ConnectionState::NotConnected | ConnectionState::Disconnected => &CLIENTBOUND_NONE,
    }
}

/// Registry decoding packets received by a server in `state`
pub fn serverbound(state: ConnectionState) -> &'static PacketRegistry<ServerboundPacket> {
    match state {
        ConnectionState::Handshaking => &SERVERBOUND_HANDSHAKING,
        ConnectionState::Status => &SERVERBOUND_STATUS,
        ConnectionState::Login => &SERVERBOUND_LOGIN,
        ConnectionState::Play => &SERVERBOUND_PLAY,
        ConnectionState::NotConnected | ConnectionState::Disconnected => &SERVERBOUND_NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ConnectionState::NotConnected, 0)]
    #[test_case(ConnectionState::Handshaking, 0)]
    #[test_case(ConnectionState::Status, 2)]
    #[test_case(ConnectionState::Login, 5)]
    #[test_case(ConnectionState::Play, 104)]
    #[test_case(ConnectionState::Disconnected, 0)]
    fn test_clientbound_registry_sizes(state: ConnectionState, expected: usize) {
        assert_eq!(clientbound(state).len(), expected);
    }

    #[test_case(ConnectionState::NotConnected, 0)]
    #[test_case(ConnectionState::Handshaking, 1)]
    #[test_case(ConnectionState::Status, 2)]
    #[test_case(ConnectionState::Login, 3)]
    #[test_case(ConnectionState::Play, 48)]
    #[test_case(ConnectionState::Disconnected, 0)]
    fn test_serverbound_registry_sizes(state: ConnectionState, expected: usize) {
        assert_eq!(serverbound(state).len(), expected);
    }

    #[test]
    fn test_play_ids_are_contiguous() {
        let clientbound = clientbound(ConnectionState::Play);
        assert!((0x00..=0x67).all(|id| clientbound.contains(id)));

        let serverbound = serverbound(ConnectionState::Play);
        assert!((0x00..=0x2F).all(|id| serverbound.contains(id)));
    }

    #[test]
    fn test_registry_names() {
        let login = clientbound(ConnectionState::Login);
        assert_eq!(login.name_of(0x02), Some("LoginSuccess"));
        assert_eq!(login.name_of(0x03), Some("SetCompression"));
        assert_eq!(clientbound(ConnectionState::Play).name_of(0x21), Some("KeepAlive"));
        assert_eq!(serverbound(ConnectionState::Play).name_of(0x00), Some("TeleportConfirm"));
    }
}
