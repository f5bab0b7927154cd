//! Packets sent by the server.

pub mod login;
pub mod play;
pub mod status;

packet_enum! {
    /// Any packet a server can send, across every state
    pub enum ClientboundPacket {
        StatusResponse(status::Response),
        StatusPong(status::Pong),

        LoginDisconnect(login::Disconnect),
        EncryptionRequest(login::EncryptionRequest),
        LoginSuccess(login::LoginSuccess),
        SetCompression(login::SetCompression),
        LoginPluginRequest(login::LoginPluginRequest),

        SpawnEntity(play::SpawnEntity),
        SpawnExperienceOrb(play::SpawnExperienceOrb),
        SpawnLivingEntity(play::SpawnLivingEntity),
        SpawnPainting(play::SpawnPainting),
        SpawnPlayer(play::SpawnPlayer),
        SculkVibrationSignal(play::SculkVibrationSignal),
        EntityAnimation(play::EntityAnimation),
        Statistics(play::Statistics),
        AckPlayerDigging(play::AckPlayerDigging),
        BlockBreakAnimation(play::BlockBreakAnimation),
        BlockEntityData(play::BlockEntityData),
        BlockAction(play::BlockAction),
        BlockChange(play::BlockChange),
        BossBar(play::BossBar),
        ServerDifficulty(play::ServerDifficulty),
        ChatMessage(play::ChatMessage),
        ClearTitles(play::ClearTitles),
        TabComplete(play::TabComplete),
        DeclareCommands(play::DeclareCommands),
        CloseWindow(play::CloseWindow),
        WindowItems(play::WindowItems),
        WindowProperty(play::WindowProperty),
        SetSlot(play::SetSlot),
        SetCooldown(play::SetCooldown),
        PluginMessage(play::PluginMessage),
        NamedSoundEffect(play::NamedSoundEffect),
        Disconnect(play::Disconnect),
        EntityStatus(play::EntityStatus),
        Explosion(play::Explosion),
        UnloadChunk(play::UnloadChunk),
        ChangeGameState(play::ChangeGameState),
        OpenHorseWindow(play::OpenHorseWindow),
        InitializeWorldBorder(play::InitializeWorldBorder),
        KeepAlive(play::KeepAlive),
        ChunkDataAndUpdateLight(play::ChunkDataAndUpdateLight),
        Effect(play::Effect),
        Particle(play::Particle),
        UpdateLight(play::UpdateLight),
        JoinGame(play::JoinGame),
        MapData(play::MapData),
        TradeList(play::TradeList),
        EntityPosition(play::EntityPosition),
        EntityPositionAndRotation(play::EntityPositionAndRotation),
        EntityRotation(play::EntityRotation),
        VehicleMove(play::VehicleMove),
        OpenBook(play::OpenBook),
        OpenWindow(play::OpenWindow),
        OpenSignEditor(play::OpenSignEditor),
        Ping(play::Ping),
        CraftRecipeResponse(play::CraftRecipeResponse),
        PlayerAbilities(play::PlayerAbilities),
        EndCombatEvent(play::EndCombatEvent),
        EnterCombatEvent(play::EnterCombatEvent),
        DeathCombatEvent(play::DeathCombatEvent),
        PlayerInfo(play::PlayerInfo),
        FacePlayer(play::FacePlayer),
        PlayerPositionAndLook(play::PlayerPositionAndLook),
        UnlockRecipes(play::UnlockRecipes),
        DestroyEntities(play::DestroyEntities),
        RemoveEntityEffect(play::RemoveEntityEffect),
        ResourcePackSend(play::ResourcePackSend),
        Respawn(play::Respawn),
        EntityHeadLook(play::EntityHeadLook),
        MultiBlockChange(play::MultiBlockChange),
        SelectAdvancementTab(play::SelectAdvancementTab),
        ActionBar(play::ActionBar),
        WorldBorderCenter(play::WorldBorderCenter),
        WorldBorderLerpSize(play::WorldBorderLerpSize),
        WorldBorderSize(play::WorldBorderSize),
        WorldBorderWarningDelay(play::WorldBorderWarningDelay),
        WorldBorderWarningReach(play::WorldBorderWarningReach),
        Camera(play::Camera),
        HeldItemChange(play::HeldItemChange),
        UpdateViewPosition(play::UpdateViewPosition),
        UpdateViewDistance(play::UpdateViewDistance),
        SpawnPosition(play::SpawnPosition),
        DisplayScoreboard(play::DisplayScoreboard),
        EntityMetadata(play::EntityMetadata),
        AttachEntity(play::AttachEntity),
        EntityVelocity(play::EntityVelocity),
        EntityEquipment(play::EntityEquipment),
        SetExperience(play::SetExperience),
        UpdateHealth(play::UpdateHealth),
        ScoreboardObjective(play::ScoreboardObjective),
        SetPassengers(play::SetPassengers),
        Teams(play::Teams),
        UpdateScore(play::UpdateScore),
        UpdateSimulationDistance(play::UpdateSimulationDistance),
        SetTitleSubtitle(play::SetTitleSubtitle),
        TimeUpdate(play::TimeUpdate),
        SetTitleText(play::SetTitleText),
        SetTitleTimes(play::SetTitleTimes),
        EntitySoundEffect(play::EntitySoundEffect),
        SoundEffect(play::SoundEffect),
        StopSound(play::StopSound),
        PlayerListHeaderAndFooter(play::PlayerListHeaderAndFooter),
        NbtQueryResponse(play::NbtQueryResponse),
        CollectItem(play::CollectItem),
        EntityTeleport(play::EntityTeleport),
        Advancements(play::Advancements),
        EntityProperties(play::EntityProperties),
        EntityEffect(play::EntityEffect),
        DeclareRecipes(play::DeclareRecipes),
        Tags(play::Tags),
    }
}
