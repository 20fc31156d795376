use serde::{Deserialize, Serialize};

/// Phone number split the way clients send it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneInput {
    pub countrycode: String,
    pub phonenumber: String,
}

impl PhoneInput {
    /// Provider-facing number: country code followed by the local number.
    pub fn full_number(&self) -> String {
        format!("{}{}", self.countrycode.trim(), self.phonenumber.trim())
    }
}

/// Phone signup/login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneLoginInput {
    pub countrycode: String,
    pub phonenumber: String,
    pub otp: String,
}

impl PhoneLoginInput {
    pub fn phone(&self) -> PhoneInput {
        PhoneInput { countrycode: self.countrycode.clone(), phonenumber: self.phonenumber.clone() }
    }
}

/// Access/refresh pair returned by every successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub accesstoken: String,
    pub refreshtoken: String,
}

/// Identity returned by the Google userinfo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub verified_email: bool,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Query parameters Google appends to the redirect URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallback {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_number_concatenates_country_code() {
        let p = PhoneInput { countrycode: "+1".into(), phonenumber: "5550100".into() };
        assert_eq!(p.full_number(), "+15550100");
    }
}
