use crate::model::connection::ConnectionId;

/// Perfect-negotiation tie-break for simultaneous offers.
///
/// When two peers send each other an offer at the same time, the polite side
/// rolls back its own local offer and answers the remote one; the impolite
/// side ignores the incoming offer. The order is the string form of the
/// connection ids, so both ends reach the same verdict without talking.
pub fn is_polite(local: &ConnectionId, remote: &ConnectionId) -> bool {
    local.to_string() < remote.to_string()
}
