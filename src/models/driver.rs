use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(rename = "driverId")]
    pub driver_id: String,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
    pub nationality: String,
    #[serde(rename = "permanentNumber", skip_serializing_if = "Option::is_none", default)]
    pub permanent_number: Option<String>,
    #[serde(rename = "portraitUrl", skip_serializing_if = "Option::is_none", default)]
    pub portrait_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(rename = "constructorId")]
    pub constructor_id: String,
    pub name: String,
    pub nationality: String,
}

impl Constructor {
    pub fn unknown() -> Self {
        Self {
            constructor_id: "unknown".to_string(),
            name: "Unknown".to_string(),
            nationality: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriversResponse {
    pub drivers: Vec<Driver>,
    pub total: usize,
    pub season: u32,
}
