use serde::{Deserialize, Serialize};

pub const DEFAULT_DOMAIN: &str = "wa.me";
pub const DEFAULT_COUNTRY_CODE: &str = "972";

/// Where deep links point and which country code replaces a trunk-prefix zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub domain: String,
    pub country_code: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl LinkConfig {
    /// `https://<domain>/<phone>?text=<message>`. Never fails; a phone without
    /// digits gives an empty number segment.
    pub fn build(&self, phone: &str, message: &str) -> String {
        format!(
            "https://{}/{}?text={}",
            self.domain,
            self.international_number(phone),
            encode_message(message)
        )
    }

    /// Keep ASCII digits only, then swap a single leading `0` for the country code.
    pub fn international_number(&self, phone: &str) -> String {
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        match digits.strip_prefix('0') {
            Some(rest) => format!("{}{rest}", self.country_code),
            None => digits,
        }
    }
}

/// Build a deep link with the default domain and country code.
pub fn build_messaging_link(phone: &str, message: &str) -> String {
    LinkConfig::default().build(phone, message)
}

/// Percent-encode as a standard URL quote: unreserved characters and `/` pass
/// through, every other UTF-8 byte becomes `%XX` with uppercase hex.
pub fn encode_message(message: &str) -> String {
    urlencoding::encode(message).replace("%2F", "/")
}
