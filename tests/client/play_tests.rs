//! Play State Tests

use futures::StreamExt;
use pretty_assertions::assert_eq;
use tokio::time::timeout;
use uuid::Uuid;

use diorite::protocol::component::Component;
use diorite::protocol::packet::clientbound::play;
use diorite::protocol::packet::ServerboundPacket;
use diorite::protocol::ConnectionState;
use diorite::shared::error::{ClientError, EncodeError, ProtocolError};
use diorite::world::Position;
use diorite::Client;

use crate::common::{FakeServer, ServerConnection, STEP_TIMEOUT};

/// Log a client in and hand back both ends
async fn logged_in(server: &FakeServer) -> (Client, ServerConnection) {
    let (client, connection) = tokio::join!(server.client().connect(), async {
        let mut connection = server.accept().await;
        connection.accept_login().await;
        connection
    });
    (client.unwrap(), connection)
}

// =============================================================================
// Automatic replies
// =============================================================================

#[tokio::test]
async fn test_keep_alive_is_echoed() {
    let server = FakeServer::bind().await;
    let (_client, mut connection) = logged_in(&server).await;

    connection.send(play::KeepAlive { id: 424242 }).await;

    match connection.expect().await {
        ServerboundPacket::KeepAlive(reply) => assert_eq!(reply.id, 424242),
        other => panic!("expected keep alive, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ping_is_answered_with_pong() {
    let server = FakeServer::bind().await;
    let (_client, mut connection) = logged_in(&server).await;

    connection.send(play::Ping { id: -7 }).await;

    match connection.expect().await {
        ServerboundPacket::Pong(pong) => assert_eq!(pong.id, -7),
        other => panic!("expected pong, got {:?}", other),
    }
}

#[tokio::test]
async fn test_teleport_is_confirmed() {
    let server = FakeServer::bind().await;
    let (_client, mut connection) = logged_in(&server).await;

    connection
        .send(play::PlayerPositionAndLook {
            position: Position::new(8.5, 64.0, -3.5),
            yaw: 90.0,
            pitch: 0.0,
            relative: 0,
            teleport_id: 12,
            dismount_vehicle: false,
        })
        .await;

    match connection.expect().await {
        ServerboundPacket::TeleportConfirm(confirm) => assert_eq!(confirm.teleport_id, 12),
        other => panic!("expected teleport confirm, got {:?}", other),
    }
}

#[tokio::test]
async fn test_automatic_replies_can_be_disabled() {
    let server = FakeServer::bind().await;

    let (client, mut connection) =
        tokio::join!(server.client().automatic_replies(false).connect(), async {
            let mut connection = server.accept().await;
            connection.accept_login().await;
            connection
        });
    let client = client.unwrap();

    connection.send(play::KeepAlive { id: 1 }).await;
    client.chat("after keep alive").await.unwrap();

    match connection.expect().await {
        ServerboundPacket::ChatMessage(chat) => assert_eq!(chat.message, "after keep alive"),
        other => panic!("expected chat, got {:?}", other),
    }
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_chat_and_command_reach_server() {
    let server = FakeServer::bind().await;
    let (client, mut connection) = logged_in(&server).await;

    client.chat("hello").await.unwrap();
    client.command("tell", &["alex", "good game"]).await.unwrap();

    let mut messages = Vec::new();
    for _ in 0..2 {
        match connection.expect().await {
            ServerboundPacket::ChatMessage(chat) => messages.push(chat.message),
            other => panic!("expected chat, got {:?}", other),
        }
    }
    assert_eq!(messages, vec!["hello", "/tell alex \"good game\""]);
}

#[tokio::test]
async fn test_on_yields_only_the_requested_type() {
    let server = FakeServer::bind().await;
    let (client, mut connection) = logged_in(&server).await;

    let mut chat = client.on::<play::ChatMessage>().unwrap();

    connection
        .send(play::TimeUpdate {
            world_age: 100,
            time_of_day: 6000,
        })
        .await;
    connection
        .send(play::ChatMessage {
            message: Component::text("<alex> hi"),
            position: play::ChatPosition::Chat,
            sender: Uuid::new_v4(),
        })
        .await;

    let message = timeout(STEP_TIMEOUT, chat.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(message.message.plain_text(), "<alex> hi");
    assert_eq!(message.position, play::ChatPosition::Chat);
}

#[tokio::test]
async fn test_listener_registered_before_connect_sees_first_packets() {
    let server = FakeServer::bind().await;
    let mut client = server.client().build().unwrap();
    let mut time = client.on::<play::TimeUpdate>().unwrap();

    let (connected, _connection) = tokio::join!(client.connect(), async {
        let mut connection = server.accept().await;
        connection.accept_login().await;
        // Sent before the caller gets the connected client back
        connection
            .send(play::TimeUpdate {
                world_age: 1,
                time_of_day: 2,
            })
            .await;
        connection
    });
    connected.unwrap();

    let update = timeout(STEP_TIMEOUT, time.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(update.world_age, 1);
    assert_eq!(update.time_of_day, 2);
}

// =============================================================================
// Malformed input
// =============================================================================

#[tokio::test]
async fn test_unknown_and_malformed_packets_are_skipped() {
    let server = FakeServer::bind().await;
    let (client, mut connection) = logged_in(&server).await;

    // No play packet has this id
    connection.send_raw(0x70, &[1, 2, 3]).await;
    // Keep alive body cut short
    connection.send_raw(0x21, &[0, 0, 1]).await;
    connection.send(play::KeepAlive { id: 5 }).await;

    match connection.expect().await {
        ServerboundPacket::KeepAlive(reply) => assert_eq!(reply.id, 5),
        other => panic!("expected keep alive, got {:?}", other),
    }
    assert_eq!(client.state(), ConnectionState::Play);
}

#[tokio::test]
async fn test_oversized_send_fails_alone() {
    let server = FakeServer::bind().await;

    let (client, mut connection) =
        tokio::join!(server.client().max_frame_length(64).connect(), async {
            let mut connection = server.accept().await;
            connection.accept_login().await;
            connection
        });
    let client = client.unwrap();

    let err = client.chat("x".repeat(200)).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Protocol(ProtocolError::Encode(EncodeError::FrameTooLarge {
            max: 64,
            ..
        }))
    ));

    client.chat("still here").await.unwrap();
    match connection.expect().await {
        ServerboundPacket::ChatMessage(chat) => assert_eq!(chat.message, "still here"),
        other => panic!("expected chat, got {:?}", other),
    }
    assert_eq!(client.state(), ConnectionState::Play);
}

// =============================================================================
// Disconnects
// =============================================================================

#[tokio::test]
async fn test_server_disconnect_reason_is_reported() {
    let server = FakeServer::bind().await;
    let (client, mut connection) = logged_in(&server).await;

    connection
        .send(play::Disconnect {
            reason: Component::text("Kicked for spamming"),
        })
        .await;

    let reason = timeout(STEP_TIMEOUT, client.await_disconnect())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reason.unwrap().plain_text(), "Kicked for spamming");
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert!(client.chat("still there?").await.is_err());
}

#[tokio::test]
async fn test_server_hang_up_has_no_reason() {
    let server = FakeServer::bind().await;
    let (client, connection) = logged_in(&server).await;

    drop(connection);

    let reason = timeout(STEP_TIMEOUT, client.await_disconnect())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reason, None);
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_client_disconnect_closes_socket() {
    let server = FakeServer::bind().await;
    let (client, mut connection) = logged_in(&server).await;

    client.disconnect();

    assert!(connection.recv().await.is_none());
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_packet_stream_ends_on_disconnect() {
    let server = FakeServer::bind().await;
    let (client, connection) = logged_in(&server).await;

    let mut time = client.on::<play::TimeUpdate>().unwrap();
    drop(connection);

    let next = timeout(STEP_TIMEOUT, time.next()).await.unwrap();
    assert_eq!(next, None);
}

// =============================================================================
// Compression
// =============================================================================

#[tokio::test]
async fn test_keep_alive_over_compressed_session() {
    let server = FakeServer::bind().await;

    let (client, mut connection) = tokio::join!(server.client().connect(), async {
        let mut connection = server.accept().await;
        let username = connection.expect_login_start().await;
        connection.enable_compression(16).await;
        connection
            .send(diorite::protocol::packet::clientbound::login::LoginSuccess {
                uuid: Uuid::nil(),
                username,
            })
            .await;
        connection
    });
    let client = client.unwrap();

    connection.send(play::KeepAlive { id: 99 }).await;
    match connection.expect().await {
        ServerboundPacket::KeepAlive(reply) => assert_eq!(reply.id, 99),
        other => panic!("expected keep alive, got {:?}", other),
    }

    let long = "a chat message long enough to cross the threshold";
    client.chat(long).await.unwrap();
    match connection.expect().await {
        ServerboundPacket::ChatMessage(chat) => assert_eq!(chat.message, long),
        other => panic!("expected chat, got {:?}", other),
    }
}
