use huddle_core::ConnectionId;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Offer,
    Answer,
    IceCandidate,
}

impl EnvelopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeKind::Offer => "offer",
            EnvelopeKind::Answer => "answer",
            EnvelopeKind::IceCandidate => "ice-candidate",
        }
    }

    /// Name of the payload field on the wire.
    pub fn payload_field(&self) -> &'static str {
        match self {
            EnvelopeKind::Offer => "offer",
            EnvelopeKind::Answer => "answer",
            EnvelopeKind::IceCandidate => "candidate",
        }
    }
}

/// An offer, answer or ICE candidate on its way to exactly one peer.
/// The payload is opaque and forwarded untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub kind: EnvelopeKind,
    pub to: Option<ConnectionId>,
    pub payload: Option<Value>,
}
