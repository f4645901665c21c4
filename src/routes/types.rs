#[derive(serde::Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    #[serde(rename = "gdprConsent")]
    pub gdpr_consent: bool,
}

#[derive(serde::Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
