//! Hard-coded mock state for demo data and fixtures
//!
//! Used by the batch generator so a snapshot can be produced without a live
//! front-end. Two drivers, two vehicles, two assets, one SIM, one client, no
//! assignments, one audit entry.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::state::AppState;
use crate::types::*;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .expect("fixture timestamps are valid")
}

pub fn mock_user() -> User {
    User {
        id: "user-001".to_string(),
        name: "Fleet Admin".to_string(),
        email: "admin@deliops.ae".to_string(),
        role: UserRole::Admin,
        avatar: None,
    }
}

pub fn mock_state() -> AppState {
    AppState {
        current_user: Some(mock_user()),
        user_role: Some(UserRole::Admin),
        theme: Some(Theme::Dark),
        drivers: vec![
            Driver {
                id: "DRV-001".to_string(),
                name: "Ahmed Hassan".to_string(),
                email: "ahmed.hassan@deliops.ae".to_string(),
                phone: "+971 50 123 4567".to_string(),
                license_number: "DXB-4482913".to_string(),
                license_expiry: date(2026, 8, 14),
                status: DriverStatus::Active,
                assigned_vehicle_id: Some("VEH-001".to_string()),
                joined_on: date(2022, 3, 1),
            },
            Driver {
                id: "DRV-002".to_string(),
                name: "Ravi Kumar".to_string(),
                email: "ravi.kumar@deliops.ae".to_string(),
                phone: "+971 55 987 6543".to_string(),
                license_number: "SHJ-1039275".to_string(),
                license_expiry: date(2025, 11, 30),
                status: DriverStatus::OnLeave,
                assigned_vehicle_id: None,
                joined_on: date(2023, 6, 15),
            },
        ],
        vehicles: vec![
            Vehicle {
                id: "VEH-001".to_string(),
                plate_number: "DXB A 48213".to_string(),
                make: "Toyota".to_string(),
                model: "Hiace".to_string(),
                year: 2022,
                vehicle_type: "van".to_string(),
                status: VehicleStatus::Active,
                mileage_km: 48_210,
                fuel_type: "diesel".to_string(),
                assigned_driver_id: Some("DRV-001".to_string()),
            },
            Vehicle {
                id: "VEH-002".to_string(),
                plate_number: "SHJ 3 77120".to_string(),
                make: "Honda".to_string(),
                model: "Unicorn 150".to_string(),
                year: 2023,
                vehicle_type: "motorbike".to_string(),
                status: VehicleStatus::Maintenance,
                mileage_km: 12_904,
                fuel_type: "petrol".to_string(),
                assigned_driver_id: None,
            },
        ],
        assets: vec![
            Asset {
                id: "AST-001".to_string(),
                name: "Handheld Scanner".to_string(),
                category: "scanner".to_string(),
                serial_number: "ZB-TC52-000183".to_string(),
                status: AssetStatus::Assigned,
                location: "Al Quoz Hub".to_string(),
                assigned_to: Some("DRV-001".to_string()),
                purchased_on: date(2023, 1, 20),
                value_aed: 3_200,
            },
            Asset {
                id: "AST-002".to_string(),
                name: "Dash Camera".to_string(),
                category: "camera".to_string(),
                serial_number: "DC-70MAI-55120".to_string(),
                status: AssetStatus::Available,
                location: "Sharjah Depot".to_string(),
                assigned_to: None,
                purchased_on: date(2024, 2, 5),
                value_aed: 650,
            },
        ],
        sim_cards: vec![SimCard {
            id: "SIM-001".to_string(),
            phone_number: "+971 52 400 1188".to_string(),
            iccid: "8997101234567890123".to_string(),
            carrier: "Etisalat".to_string(),
            plan: "Business Data 20GB".to_string(),
            status: SimStatus::Active,
            assigned_to: Some("AST-001".to_string()),
            data_used_mb: 6_144,
            data_limit_mb: 20_480,
        }],
        clients: vec![Client {
            id: "CLT-001".to_string(),
            name: "Gulf Retail Group".to_string(),
            contact_person: "Sara Al Mansoori".to_string(),
            email: "sara@gulfretail.ae".to_string(),
            phone: "+971 4 321 0000".to_string(),
            address: "Business Bay, Dubai".to_string(),
            status: ClientStatus::Active,
            contract_start: date(2023, 9, 1),
        }],
        assignments: Vec::new(),
        audit_logs: vec![AuditLogEntry {
            id: "LOG-001".to_string(),
            timestamp: timestamp(2024, 1, 15, 9, 30),
            user: "admin@deliops.ae".to_string(),
            action: "create".to_string(),
            entity: "driver".to_string(),
            entity_id: "DRV-002".to_string(),
            details: "Added driver Ravi Kumar".to_string(),
        }],
    }
}

/// An assignment linking the two fixture records, for tests that need one
#[cfg(test)]
pub(crate) fn sample_assignment() -> Assignment {
    Assignment {
        id: "ASG-001".to_string(),
        driver_id: "DRV-001".to_string(),
        vehicle_id: "VEH-001".to_string(),
        asset_ids: vec!["AST-001".to_string()],
        sim_card_id: Some("SIM-001".to_string()),
        start_date: date(2024, 1, 2),
        end_date: None,
        status: AssignmentStatus::Active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::snapshot::{build_snapshot, DataCounts};

    #[test]
    fn test_fixture_counts() {
        let doc = build_snapshot(&mock_state(), &ExportConfig::default());
        assert_eq!(
            *doc.data_counts(),
            DataCounts {
                drivers: 2,
                vehicles: 2,
                assets: 2,
                sim_cards: 1,
                clients: 1,
                assignments: 0,
                audit_logs: 1,
            }
        );
    }

    #[test]
    fn test_fixture_exported_by_mock_admin() {
        let doc = build_snapshot(&mock_state(), &ExportConfig::default());
        assert_eq!(doc.exported_by(), "admin@deliops.ae");
        assert_eq!(doc.user_role(), Some(UserRole::Admin));
    }

    #[test]
    fn test_fixture_cross_references_resolve() {
        let state = mock_state();
        for driver in &state.drivers {
            if let Some(vehicle_id) = &driver.assigned_vehicle_id {
                assert!(state.vehicles.iter().any(|v| &v.id == vehicle_id));
            }
        }
        for vehicle in &state.vehicles {
            if let Some(driver_id) = &vehicle.assigned_driver_id {
                assert!(state.drivers.iter().any(|d| &d.id == driver_id));
            }
        }
    }
}
