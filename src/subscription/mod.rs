mod errors;
mod helpers;
mod service;

pub use errors::{ConfirmError, SubscribeError, UnsubscribeError};
pub use service::SubscriptionService;
