/// Consent is a creation gate: a `GdprConsent` can only be obtained from an
/// explicit `true`, so a record without consent cannot be constructed.
#[derive(Debug, Clone, Copy)]
pub struct GdprConsent(bool);

impl GdprConsent {
    pub fn parse(granted: bool) -> Result<Self, String> {
        if granted {
            Ok(Self(true))
        } else {
            Err("GDPR consent is required to subscribe.".to_string())
        }
    }

    pub fn granted(&self) -> bool {
        self.0
    }
}
