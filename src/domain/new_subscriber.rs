use super::{GdprConsent, SubscriberEmail};

pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub gdpr_consent: GdprConsent,
}

impl NewSubscriber {
    pub fn parse(email: String, gdpr_consent: bool) -> Result<Self, String> {
        let email = SubscriberEmail::parse(email)?;
        let gdpr_consent = GdprConsent::parse(gdpr_consent)?;
        Ok(Self {
            email,
            gdpr_consent,
        })
    }
}
