mod gdpr_consent;
mod new_subscriber;
mod subscriber;
mod subscriber_email;
mod subscription_token;

pub use gdpr_consent::GdprConsent;
pub use new_subscriber::NewSubscriber;
pub use subscriber::Subscriber;
pub use subscriber_email::SubscriberEmail;
pub use subscription_token::SubscriptionToken;
