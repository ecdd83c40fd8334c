pub mod events;
pub mod logs;
pub mod factory;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GatewayPublisherVia {
    // logs every event and keeps it in memory
    Logs,
    // drops every event, for callers that only care about the returned outcome
    Discard,
}
