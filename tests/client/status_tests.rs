//! Server List Ping Tests

use pretty_assertions::assert_eq;

use diorite::protocol::packet::clientbound::status;
use diorite::protocol::packet::serverbound::handshaking::NextState;
use diorite::protocol::packet::ServerboundPacket;
use diorite::shared::error::ClientError;

use crate::common::FakeServer;

const STATUS_JSON: &str = r#"{
    "version": {"name": "1.18.2", "protocol": 758},
    "players": {"max": 20, "online": 3, "sample": []},
    "description": {"text": "Hello ", "extra": [{"text": "world"}]}
}"#;

#[tokio::test]
async fn test_status_round_trip() {
    let server = FakeServer::bind().await;

    let (status, _connection) = tokio::join!(server.client().status(), async {
        let mut connection = server.accept().await;

        match connection.expect().await {
            ServerboundPacket::Handshake(handshake) => {
                assert_eq!(handshake.next_state, NextState::Status);
                assert_eq!(handshake.server_port, server.addr().port());
            }
            other => panic!("expected handshake, got {:?}", other),
        }
        assert!(matches!(
            connection.expect().await,
            ServerboundPacket::StatusRequest(_)
        ));
        connection
            .send(status::Response {
                json: STATUS_JSON.to_string(),
            })
            .await;

        let payload = match connection.expect().await {
            ServerboundPacket::StatusPing(ping) => ping.payload,
            other => panic!("expected ping, got {:?}", other),
        };
        connection.send(status::Pong { payload }).await;
        connection
    });

    let status = status.unwrap();
    assert_eq!(status.version.name, "1.18.2");
    assert_eq!(status.players.unwrap().online, 3);
    assert_eq!(status.description.plain_text(), "Hello world");
    assert!(status.latency.is_some());
}

#[tokio::test]
async fn test_status_rejects_malformed_json() {
    let server = FakeServer::bind().await;

    let (status, _connection) = tokio::join!(server.client().status(), async {
        let mut connection = server.accept().await;
        connection.expect().await;
        connection.expect().await;
        connection
            .send(status::Response {
                json: "{\"players\": 1}".to_string(),
            })
            .await;
        connection
    });

    assert!(matches!(status, Err(ClientError::InvalidStatus(_))));
}

#[tokio::test]
async fn test_status_rejects_mismatched_pong() {
    let server = FakeServer::bind().await;

    let (status, _connection) = tokio::join!(server.client().status(), async {
        let mut connection = server.accept().await;
        connection.expect().await;
        connection.expect().await;
        connection
            .send(status::Response {
                json: STATUS_JSON.to_string(),
            })
            .await;

        let payload = match connection.expect().await {
            ServerboundPacket::StatusPing(ping) => ping.payload,
            other => panic!("expected ping, got {:?}", other),
        };
        connection
            .send(status::Pong {
                payload: payload.wrapping_add(1),
            })
            .await;
        connection
    });

    assert!(matches!(
        status,
        Err(ClientError::UnexpectedPacket("StatusPong"))
    ));
}
