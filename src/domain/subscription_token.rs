use rand::Rng;
use serde::de;
use unicode_segmentation::UnicodeSegmentation;

const TOKEN_BYTES: usize = 32;
const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// 32 bytes of CSPRNG entropy, hex-encoded. Minted once per subscription,
/// once for confirmation and once for unsubscribe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionToken(String);

impl SubscriptionToken {
    pub fn new() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill(&mut bytes[..]);
        Self(hex::encode(bytes))
    }

    pub fn parse(s: String) -> Result<Self, String> {
        let is_wrong_length = s.graphemes(true).count() != TOKEN_LEN;
        let contains_non_hex = !s.chars().all(|c| c.is_ascii_hexdigit());

        if is_wrong_length || contains_non_hex {
            Err(format!("{} is not a valid subscription token.", s))
        } else {
            Ok(Self(s.to_lowercase()))
        }
    }
}

impl Default for SubscriptionToken {
    fn default() -> Self {
        Self::new()
    }
}

struct SubscriptionTokenVisitor;

impl de::Visitor<'_> for SubscriptionTokenVisitor {
    type Value = SubscriptionToken;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a valid subscription token string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        SubscriptionToken::parse(value.to_string()).map_err(de::Error::custom)
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        SubscriptionToken::parse(value).map_err(de::Error::custom)
    }
}

impl<'de> serde::Deserialize<'de> for SubscriptionToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(SubscriptionTokenVisitor)
    }
}

impl AsRef<str> for SubscriptionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
