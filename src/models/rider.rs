use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rider {
    pub rider_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRider {
    pub rider_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub rating: f64,
}

impl CreateRider {
    pub fn into_rider(self) -> Rider {
        Rider {
            rider_id: self.rider_id.trim().to_string(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            rating: self.rating,
        }
    }
}
