use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const AWB_PREFIX: &str = "AWB-";
const AWB_SUFFIX_LEN: usize = 8;

/// Rider id used in prompts when a ride has nobody assigned.
pub const UNASSIGNED_RIDER: &str = "UNASSIGNED";

/// Statuses written by other systems are kept verbatim in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum RideStatus {
    #[default]
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Exception,
    Cancelled,
    Other(String),
}

impl RideStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RideStatus::Pending => "Pending",
            RideStatus::Assigned => "Assigned",
            RideStatus::InTransit => "InTransit",
            RideStatus::Delivered => "Delivered",
            RideStatus::Exception => "Exception",
            RideStatus::Cancelled => "Cancelled",
            RideStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RideStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Pending" => RideStatus::Pending,
            "Assigned" => RideStatus::Assigned,
            "InTransit" => RideStatus::InTransit,
            "Delivered" => RideStatus::Delivered,
            "Exception" => RideStatus::Exception,
            "Cancelled" => RideStatus::Cancelled,
            _ => RideStatus::Other(raw),
        }
    }
}

impl From<RideStatus> for String {
    fn from(status: RideStatus) -> Self {
        match status {
            RideStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ride {
    pub awb: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub distance: String,
    pub price: f64,
    pub rider_id: Option<String>,
    pub status: RideStatus,
}

impl Ride {
    pub fn rider_or_unassigned(&self) -> &str {
        self.rider_id.as_deref().unwrap_or(UNASSIGNED_RIDER)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRide {
    #[serde(default)]
    pub awb: Option<String>,
    pub pickup_address: String,
    pub delivery_address: String,
    pub distance: String,
    pub price: f64,
    #[serde(default)]
    pub rider_id: Option<String>,
    #[serde(default)]
    pub status: RideStatus,
}

impl CreateRide {
    pub fn into_ride(self) -> Ride {
        let awb = self
            .awb
            .map(|awb| awb.trim().to_string())
            .filter(|awb| !awb.is_empty())
            .unwrap_or_else(generate_awb);

        Ride {
            awb,
            pickup_address: self.pickup_address,
            delivery_address: self.delivery_address,
            distance: self.distance,
            price: self.price,
            rider_id: self.rider_id.filter(|id| !id.trim().is_empty()),
            status: self.status,
        }
    }
}

/// `AWB-` followed by eight lowercase hex characters.
pub fn generate_awb() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{AWB_PREFIX}{}", &id[..AWB_SUFFIX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_ride(awb: Option<&str>, rider_id: Option<&str>) -> CreateRide {
        CreateRide {
            awb: awb.map(str::to_string),
            pickup_address: "1 Depot Rd".to_string(),
            delivery_address: "12 Main St".to_string(),
            distance: "4.2 km".to_string(),
            price: 120.0,
            rider_id: rider_id.map(str::to_string),
            status: RideStatus::default(),
        }
    }

    #[test]
    fn generated_awb_has_prefix_and_eight_hex_chars() {
        let awb = generate_awb();
        let suffix = awb.strip_prefix(AWB_PREFIX).unwrap();

        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn missing_or_blank_awb_is_generated() {
        let ride = create_ride(None, None).into_ride();
        assert!(ride.awb.starts_with(AWB_PREFIX));

        let ride = create_ride(Some("  "), None).into_ride();
        assert!(ride.awb.starts_with(AWB_PREFIX));

        let ride = create_ride(Some("AWB-deadbeef"), None).into_ride();
        assert_eq!(ride.awb, "AWB-deadbeef");
    }

    #[test]
    fn new_ride_defaults_to_pending_and_unassigned() {
        let ride = create_ride(None, Some("")).into_ride();

        assert_eq!(ride.status, RideStatus::Pending);
        assert_eq!(ride.rider_id, None);
        assert_eq!(ride.rider_or_unassigned(), UNASSIGNED_RIDER);
    }

    #[test]
    fn known_status_text_maps_to_variant() {
        assert_eq!(RideStatus::from("InTransit".to_string()), RideStatus::InTransit);
        assert_eq!(RideStatus::InTransit.to_string(), "InTransit");
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status = RideStatus::from("Picked Up".to_string());

        assert_eq!(status, RideStatus::Other("Picked Up".to_string()));
        assert_eq!(status.to_string(), "Picked Up");
        assert_eq!(serde_json::to_value(&status).unwrap(), "Picked Up");
    }
}
