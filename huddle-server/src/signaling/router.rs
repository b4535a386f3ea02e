use crate::error::SignalError;
use crate::registry::ConnectionRegistry;
use crate::signaling::envelope::{Envelope, EnvelopeKind};
use huddle_core::{ConnectionId, ServerEvent};
use tracing::debug;

/// Forward one envelope from `sender` to its addressed recipient.
///
/// The payload is not inspected. The recipient gets it with `from` set to
/// the sender (plus the sender's display name for offers and answers) and
/// nobody else sees it. A recipient that is not connected is reported as
/// `UnknownRecipient`; callers drop it without telling the sender.
pub fn relay(
    registry: &ConnectionRegistry,
    sender: &ConnectionId,
    envelope: Envelope,
) -> Result<(), SignalError> {
    let kind = envelope.kind;

    let Some(to) = envelope.to else {
        return Err(SignalError::MalformedEnvelope {
            kind: kind.as_str(),
            missing: "to",
        });
    };
    let Some(payload) = envelope.payload else {
        return Err(SignalError::MalformedEnvelope {
            kind: kind.as_str(),
            missing: kind.payload_field(),
        });
    };

    if !registry.is_alive(&to) {
        return Err(SignalError::UnknownRecipient(to));
    }

    let from = *sender;
    let username = registry.identity(sender).map(|i| i.display_name.clone());

    let event = match kind {
        EnvelopeKind::Offer => ServerEvent::Offer {
            offer: payload,
            from,
            username,
        },
        EnvelopeKind::Answer => ServerEvent::Answer {
            answer: payload,
            from,
            username,
        },
        EnvelopeKind::IceCandidate => ServerEvent::IceCandidate {
            candidate: payload,
            from,
        },
    };

    if !registry.deliver(&to, event) {
        return Err(SignalError::UnknownRecipient(to));
    }

    debug!("Relayed {} {} -> {}", kind.as_str(), from, to);
    Ok(())
}
