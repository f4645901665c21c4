mod health_check;
mod helpers;
mod subscriptions;
mod subscriptions_confirm;
mod subscriptions_unsubscribe;
mod types;

pub use health_check::health_check;
pub use helpers::error_chain_fmt;
pub use subscriptions::subscribe;
pub use subscriptions_confirm::confirm;
pub use subscriptions_unsubscribe::unsubscribe;
pub use types::{ApiResponse, SubscribeRequest};
