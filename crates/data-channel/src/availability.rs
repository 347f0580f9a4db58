//! Channel availability tracking.
//!
//! Lifecycle notifications from the transport drive a two-state machine
//! (offline/active). The stream association is either learned from those
//! notifications (automatic) or fixed by the operator (manual).

use tracing::debug;

/// How the component is bound to a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamAssociation {
    /// Stream id follows whichever session last opened.
    Automatic { stream_id: Option<String> },
    /// Stream id fixed by the operator; close notifications are ignored.
    Manual { stream_id: String },
}

impl StreamAssociation {
    /// The currently associated stream id, if any.
    pub fn stream_id(&self) -> Option<&str> {
        match self {
            Self::Automatic { stream_id } => stream_id.as_deref(),
            Self::Manual { stream_id } => Some(stream_id),
        }
    }

    /// Whether the association was fixed by the operator.
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual { .. })
    }

    /// Whether a message from `stream_id` is allowed in.
    ///
    /// Automatic mode accepts everything; manual mode only its own stream.
    pub fn accepts(&self, stream_id: &str) -> bool {
        match self {
            Self::Automatic { .. } => true,
            Self::Manual { stream_id: expected } => expected == stream_id,
        }
    }
}

impl Default for StreamAssociation {
    fn default() -> Self {
        Self::Automatic { stream_id: None }
    }
}

/// Tracks whether the data channel is usable.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityTracker {
    association: StreamAssociation,
    active: bool,
}

impl AvailabilityTracker {
    /// Creates an offline tracker in automatic mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setup-time configuration. `Some(id)` switches to manual mode.
    pub fn configure(&mut self, stream_id: Option<String>) {
        if let Some(id) = stream_id {
            self.set_stream_id(id);
        }
    }

    /// Fixes the stream id and switches to manual mode.
    ///
    /// Does not change whether the channel is active.
    pub fn set_stream_id(&mut self, stream_id: impl Into<String>) {
        let stream_id = stream_id.into();
        debug!(stream_id = %stream_id, "manual stream association set");
        self.association = StreamAssociation::Manual { stream_id };
    }

    /// A publish or play session opened.
    pub fn on_channel_opened(&mut self, stream_id: &str) {
        self.active = true;
        if let StreamAssociation::Automatic { stream_id: current } = &mut self.association {
            *current = Some(stream_id.to_owned());
        }
        debug!(stream_id, manual = self.is_manual(), "data channel active");
    }

    /// A publish or play session closed. Ignored in manual mode.
    pub fn on_channel_closed(&mut self, stream_id: Option<&str>) {
        if let StreamAssociation::Automatic { stream_id: current } = &mut self.association {
            self.active = false;
            *current = None;
            debug!(?stream_id, "data channel offline");
        } else {
            debug!(?stream_id, "close ignored under manual stream association");
        }
    }

    /// Whether transfers may be attempted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The associated stream id, if any.
    pub fn stream_id(&self) -> Option<&str> {
        self.association.stream_id()
    }

    pub fn is_manual(&self) -> bool {
        self.association.is_manual()
    }

    pub fn association(&self) -> &StreamAssociation {
        &self.association
    }
}
