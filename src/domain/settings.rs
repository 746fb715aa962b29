use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shop contact details and opening hours. A single record, not a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub shop_name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub hours: OpeningHours,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    pub weekdays: String,
    pub saturday: String,
    pub sunday: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shop_name: "Cukráreň Janka".to_string(),
            address: "Hlavná 123".to_string(),
            city: "010 01 Žilina".to_string(),
            phone: "+421 123 456 789".to_string(),
            email: "info@cukrarenjanka.sk".to_string(),
            hours: OpeningHours::default(),
            updated_at: None,
            extra: Map::new(),
        }
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            weekdays: "7:00 - 18:00".to_string(),
            saturday: "8:00 - 14:00".to_string(),
            sunday: "Zatvorené".to_string(),
        }
    }
}
