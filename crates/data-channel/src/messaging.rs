//! Plain text messaging over the data channel.
//!
//! Availability here is simpler than for file sharing: the channel is
//! usable while either a publish or a play session is open, and there is
//! no manual override.

use chrono::{DateTime, Utc};
use dcshare_protocol::{ChannelEvent, ChannelRole};
use tracing::{debug, warn};

use crate::config::FileShareConfig;
use crate::error::DataChannelError;
use crate::transport::Transport;

/// Rewrites a message. `None` or an empty string suppresses it.
pub type Interceptor = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

/// One line of the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub direction: Direction,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Text messaging endpoint.
pub struct TextMessaging {
    publish_stream_id: Option<String>,
    play_stream_id: Option<String>,
    display_sent_messages: bool,
    on_receive: Option<Interceptor>,
    on_send: Option<Interceptor>,
    log: Vec<ChatEntry>,
}

impl TextMessaging {
    pub fn new(display_sent_messages: bool) -> Self {
        Self {
            publish_stream_id: None,
            play_stream_id: None,
            display_sent_messages,
            on_receive: None,
            on_send: None,
            log: Vec::new(),
        }
    }

    /// Builds an endpoint that follows the shared endpoint settings.
    pub fn from_config(config: &FileShareConfig) -> Self {
        Self::new(config.display_sent_messages)
    }

    /// Installs a hook run on every received message before it is logged.
    pub fn set_receive_interceptor(&mut self, f: Interceptor) {
        self.on_receive = Some(f);
    }

    /// Installs a hook run on every outgoing message before it is sent.
    pub fn set_send_interceptor(&mut self, f: Interceptor) {
        self.on_send = Some(f);
    }

    /// Whether a publish or play session is open.
    pub fn is_available(&self) -> bool {
        self.publish_stream_id.is_some() || self.play_stream_id.is_some()
    }

    /// Stream messages are sent to: the publish stream, else the play stream.
    pub fn target_stream_id(&self) -> Option<&str> {
        self.publish_stream_id
            .as_deref()
            .or(self.play_stream_id.as_deref())
    }

    pub fn log(&self) -> &[ChatEntry] {
        &self.log
    }

    /// Applies a transport notification.
    pub fn handle_event(&mut self, event: &ChannelEvent) {
        match event {
            ChannelEvent::ChannelOpened { role, stream_id } => {
                *self.slot(*role) = Some(stream_id.clone());
            }
            ChannelEvent::ChannelClosed { role, .. } => {
                *self.slot(*role) = None;
            }
            ChannelEvent::MessageReceived { stream_id, data } => {
                let raw = String::from_utf8_lossy(data);
                let shown = match &self.on_receive {
                    Some(intercept) => intercept(&raw).filter(|m| !m.is_empty()),
                    None => Some(raw.into_owned()),
                };
                match shown {
                    Some(text) => self.push(Direction::Received, text),
                    None => debug!(stream_id = %stream_id, "received message suppressed"),
                }
            }
        }
    }

    /// Sends a text message.
    ///
    /// Returns `Ok(false)` when nothing was sent: blank input, no open
    /// session, or the send interceptor vetoed the message.
    pub async fn send(
        &mut self,
        transport: &dyn Transport,
        message: &str,
    ) -> Result<bool, DataChannelError> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(false);
        }
        let Some(stream_id) = self.target_stream_id().map(str::to_owned) else {
            return Ok(false);
        };

        let message = match &self.on_send {
            Some(intercept) => match intercept(message).filter(|m| !m.is_empty()) {
                Some(m) => m,
                None => return Ok(false),
            },
            None => message.to_owned(),
        };

        match transport.send_data(&stream_id, message.clone().into_bytes()).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(DataChannelError::Send(
                    "Failed to send message: transport refused the message".into(),
                ));
            }
            Err(e) => {
                warn!(stream_id = %stream_id, error = %e, "message send failed");
                return Err(DataChannelError::Send(format!("Failed to send message: {e}")));
            }
        }

        if self.display_sent_messages {
            self.push(Direction::Sent, message);
        }
        Ok(true)
    }

    fn slot(&mut self, role: ChannelRole) -> &mut Option<String> {
        match role {
            ChannelRole::Publish => &mut self.publish_stream_id,
            ChannelRole::Play => &mut self.play_stream_id,
        }
    }

    fn push(&mut self, direction: Direction, text: String) {
        self.log.push(ChatEntry {
            direction,
            text,
            at: Utc::now(),
        });
    }
}
