//! Connection States

use std::fmt;

/// Protocol state of a connection.
///
/// The state selects which packet registry decodes incoming frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// No socket has been opened yet
    NotConnected,
    Handshaking,
    Status,
    Login,
    Play,
    /// The socket has been closed
    Disconnected,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::NotConnected => "NOT_CONNECTED",
            ConnectionState::Handshaking => "HANDSHAKING",
            ConnectionState::Status => "STATUS",
            ConnectionState::Login => "LOGIN",
            ConnectionState::Play => "PLAY",
            ConnectionState::Disconnected => "DISCONNECTED",
        }
    }

    /// Whether packets can be exchanged in this state
    pub fn is_open(&self) -> bool {
        !matches!(
            self,
            ConnectionState::NotConnected | ConnectionState::Disconnected
        )
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
