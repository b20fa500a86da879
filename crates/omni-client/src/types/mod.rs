//! Wire types shared with the chat platform.

pub mod agent;
pub mod event;

pub use agent::{Agent, AssignedAgent, WebhookEndpoint, WebhookTarget};
pub use event::{IncomingMessageEvent, LatestService, ResolutionEvent, ResolvedBy, ResolvedService};
