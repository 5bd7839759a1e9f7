//! Domain records held by the application state store
//!
//! Every record is a plain value object: no references between records other
//! than string ids, no floats, nothing that cannot be written to JSON and read
//! back unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Operator,
    Viewer,
}

/// UI color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub status: DriverStatus,
    #[serde(default)]
    pub assigned_vehicle_id: Option<String>,
    pub joined_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverStatus {
    Active,
    Inactive,
    OnLeave,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub vehicle_type: String,
    pub status: VehicleStatus,
    pub mileage_km: u32,
    pub fuel_type: String,
    #[serde(default)]
    pub assigned_driver_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    Inactive,
}

/// Trackable equipment (scanners, tablets, dash cams, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category: String,
    pub serial_number: String,
    pub status: AssetStatus,
    pub location: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub purchased_on: NaiveDate,
    /// Purchase value in whole dirhams
    pub value_aed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Available,
    Assigned,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimCard {
    pub id: String,
    pub phone_number: String,
    pub iccid: String,
    pub carrier: String,
    pub plan: String,
    pub status: SimStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub data_used_mb: u32,
    pub data_limit_mb: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: ClientStatus,
    pub contract_start: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Inactive,
    Pending,
}

/// Driver ↔ vehicle (and optional equipment) pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub asset_ids: Vec<String>,
    #[serde(default)]
    pub sim_card_id: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: AssignmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Email of the acting user
    pub user: String,
    pub action: String,
    /// Collection the action touched (e.g. "driver")
    pub entity: String,
    pub entity_id: String,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_status_uses_kebab_case() {
        let json = serde_json::to_string(&DriverStatus::OnLeave).unwrap();
        assert_eq!(json, "\"on-leave\"");
    }

    #[test]
    fn test_theme_defaults_to_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(serde_json::to_string(&Theme::default()).unwrap(), "\"dark\"");
    }

    #[test]
    fn test_omitted_optional_fields_deserialize_as_none() {
        let json = r#"{
            "id": "V-1",
            "plateNumber": "DXB A 12345",
            "make": "Toyota",
            "model": "Hiace",
            "year": 2022,
            "vehicleType": "van",
            "status": "active",
            "mileageKm": 41200,
            "fuelType": "diesel"
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.assigned_driver_id, None);
    }

    #[test]
    fn test_null_optional_field_deserializes_as_none() {
        let json = r#"{
            "id": "u-1",
            "name": "Ops",
            "email": "ops@deliops.ae",
            "role": "operator",
            "avatar": null
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.avatar, None);
        assert_eq!(user.role, UserRole::Operator);
    }

    #[test]
    fn test_dates_serialize_as_iso_days() {
        let client = Client {
            id: "C-1".to_string(),
            name: "Acme".to_string(),
            contact_person: "Jane".to_string(),
            email: "jane@acme.ae".to_string(),
            phone: "+971 4 000 0000".to_string(),
            address: "Dubai".to_string(),
            status: ClientStatus::Pending,
            contract_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["contractStart"], "2024-03-01");
        assert_eq!(value["contactPerson"], "Jane");
    }
}
