//! Login Tests

use std::time::Duration;

use bytes::Bytes;
use pretty_assertions::assert_eq;

use diorite::protocol::component::Component;
use diorite::protocol::packet::clientbound::login;
use diorite::protocol::packet::ServerboundPacket;
use diorite::protocol::{ConnectionState, PacketFormat};
use diorite::shared::error::{ClientError, ProtocolError};
use diorite::world::Identifier;

use crate::common::FakeServer;

#[tokio::test]
async fn test_login_success_enters_play() {
    let server = FakeServer::bind().await;

    let (client, (uuid, _connection)) =
        tokio::join!(server.client().name("steve").connect(), async {
            let mut connection = server.accept().await;
            let uuid = connection.accept_login().await;
            (uuid, connection)
        });
    let client = client.unwrap();

    assert_eq!(client.state(), ConnectionState::Play);
    assert_eq!(client.uuid(), Some(uuid));
    assert_eq!(client.name(), "steve");
}

#[tokio::test]
async fn test_server_may_rename_player() {
    let server = FakeServer::bind().await;

    let (client, _connection) = tokio::join!(server.client().connect(), async {
        let mut connection = server.accept().await;
        assert_eq!(connection.expect_login_start().await, "diorite_client");
        connection
            .send(login::LoginSuccess {
                uuid: uuid::Uuid::nil(),
                username: "Diorite_Client".to_string(),
            })
            .await;
        connection
    });

    assert_eq!(client.unwrap().name(), "Diorite_Client");
}

#[tokio::test]
async fn test_login_disconnect_is_reported() {
    let server = FakeServer::bind().await;

    let (client, _connection) = tokio::join!(server.client().connect(), async {
        let mut connection = server.accept().await;
        connection.expect_login_start().await;
        connection
            .send(login::Disconnect {
                reason: Component::text("Server is full"),
            })
            .await;
        connection
    });

    match client {
        Err(ClientError::Disconnected(reason)) => {
            assert_eq!(reason.plain_text(), "Server is full");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("login should fail"),
    }
}

#[tokio::test]
async fn test_encryption_request_is_unsupported() {
    let server = FakeServer::bind().await;

    let (client, _connection) = tokio::join!(server.client().connect(), async {
        let mut connection = server.accept().await;
        connection.expect_login_start().await;
        connection
            .send(login::EncryptionRequest {
                server_id: String::new(),
                public_key: Bytes::from_static(&[1, 2, 3]),
                verify_token: Bytes::from_static(&[4, 5, 6, 7]),
            })
            .await;
        connection
    });

    assert!(matches!(client, Err(ClientError::EncryptionUnsupported)));
}

#[tokio::test]
async fn test_plugin_request_is_declined() {
    let server = FakeServer::bind().await;

    let (client, _connection) = tokio::join!(server.client().connect(), async {
        let mut connection = server.accept().await;
        let username = connection.expect_login_start().await;
        connection
            .send(login::LoginPluginRequest {
                message_id: 9,
                channel: Identifier::parse("velocity:player_info").unwrap(),
                data: Bytes::from_static(&[1]),
            })
            .await;

        match connection.expect().await {
            ServerboundPacket::LoginPluginResponse(response) => {
                assert_eq!(response.message_id, 9);
                assert_eq!(response.data, None);
            }
            other => panic!("expected plugin response, got {:?}", other),
        }

        connection
            .send(login::LoginSuccess {
                uuid: uuid::Uuid::nil(),
                username,
            })
            .await;
        connection
    });

    assert_eq!(client.unwrap().state(), ConnectionState::Play);
}

#[tokio::test]
async fn test_compression_applies_from_next_frame() {
    let server = FakeServer::bind().await;

    let (client, _connection) = tokio::join!(server.client().connect(), async {
        let mut connection = server.accept().await;
        let username = connection.expect_login_start().await;
        connection.enable_compression(0).await;
        connection
            .send(login::LoginSuccess {
                uuid: uuid::Uuid::nil(),
                username,
            })
            .await;
        connection
    });

    let client = client.unwrap();
    assert_eq!(
        client.connection().unwrap().format(),
        PacketFormat::Compressed { threshold: 0 }
    );
}

#[tokio::test]
async fn test_login_times_out() {
    let server = FakeServer::bind().await;

    let (client, _connection) = tokio::join!(
        server
            .client()
            .login_timeout(Duration::from_millis(200))
            .connect(),
        async {
            let mut connection = server.accept().await;
            connection.expect_login_start().await;
            connection
        }
    );

    assert!(matches!(client, Err(ClientError::Timeout("login success"))));
}

#[tokio::test]
async fn test_server_hanging_up_during_login() {
    let server = FakeServer::bind().await;

    let (client, _) = tokio::join!(server.client().connect(), async {
        let mut connection = server.accept().await;
        connection.expect_login_start().await;
        drop(connection);
    });

    assert!(matches!(
        client,
        Err(ClientError::Protocol(ProtocolError::ChannelClosed))
    ));
}

#[tokio::test]
async fn test_connection_refused() {
    let port = {
        let server = FakeServer::bind().await;
        server.addr().port()
    };

    let result = diorite::Client::builder()
        .host("127.0.0.1")
        .port(port)
        .connect()
        .await;
    assert!(matches!(result, Err(ClientError::Protocol(ProtocolError::Io(_)))));
}
