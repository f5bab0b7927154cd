//! Packets sent by the client.

pub mod handshaking;
pub mod login;
pub mod play;
pub mod status;

packet_enum! {
    /// Any packet a client can send, across every state
    pub enum ServerboundPacket {
        Handshake(handshaking::Handshake),

        StatusRequest(status::Request),
        StatusPing(status::Ping),

        LoginStart(login::LoginStart),
        EncryptionResponse(login::EncryptionResponse),
        LoginPluginResponse(login::LoginPluginResponse),

        TeleportConfirm(play::TeleportConfirm),
        QueryBlockNbt(play::QueryBlockNbt),
        SetDifficulty(play::SetDifficulty),
        ChatMessage(play::ChatMessage),
        ClientStatus(play::ClientStatus),
        ClientSettings(play::ClientSettings),
        TabComplete(play::TabComplete),
        ClickWindowButton(play::ClickWindowButton),
        ClickWindow(play::ClickWindow),
        CloseWindow(play::CloseWindow),
        PluginMessage(play::PluginMessage),
        EditBook(play::EditBook),
        QueryEntityNbt(play::QueryEntityNbt),
        InteractEntity(play::InteractEntity),
        GenerateStructure(play::GenerateStructure),
        KeepAlive(play::KeepAlive),
        LockDifficulty(play::LockDifficulty),
        PlayerPosition(play::PlayerPosition),
        PlayerPositionAndRotation(play::PlayerPositionAndRotation),
        PlayerRotation(play::PlayerRotation),
        PlayerMovement(play::PlayerMovement),
        VehicleMove(play::VehicleMove),
        SteerBoat(play::SteerBoat),
        PickItem(play::PickItem),
        CraftRecipeRequest(play::CraftRecipeRequest),
        PlayerAbilities(play::PlayerAbilities),
        PlayerDigging(play::PlayerDigging),
        EntityAction(play::EntityAction),
        SteerVehicle(play::SteerVehicle),
        Pong(play::Pong),
        SetRecipeBookState(play::SetRecipeBookState),
        SetDisplayedRecipe(play::SetDisplayedRecipe),
        NameItem(play::NameItem),
        ResourcePackStatus(play::ResourcePackStatus),
        AdvancementTab(play::AdvancementTab),
        SelectTrade(play::SelectTrade),
        SetBeaconEffect(play::SetBeaconEffect),
        HeldItemChange(play::HeldItemChange),
        UpdateCommandBlock(play::UpdateCommandBlock),
        UpdateCommandBlockMinecart(play::UpdateCommandBlockMinecart),
        CreativeInventoryAction(play::CreativeInventoryAction),
        UpdateJigsawBlock(play::UpdateJigsawBlock),
        UpdateStructureBlock(play::UpdateStructureBlock),
        UpdateSign(play::UpdateSign),
        Animation(play::Animation),
        Spectate(play::Spectate),
        PlayerBlockPlacement(play::PlayerBlockPlacement),
        UseItem(play::UseItem),
    }
}
