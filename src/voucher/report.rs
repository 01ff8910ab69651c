//! Report synthesis - the service-specific key-value payload inside a voucher.
//!
//! Reports are randomized stand-ins for real lookup data. The key set is
//! fixed per service; values are drawn fresh on every call except for the
//! identity-lookup services, which are constant apart from the echoed input.

use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use super::models::ServiceName;

/// Base coordinate for location jitter (Dhaka).
const BASE_LATITUDE: f64 = 23.8103;
const BASE_LONGITUDE: f64 = 90.4125;
/// Total jitter spread in degrees, centered on the base coordinate.
const COORD_JITTER: f64 = 0.1;

/// Upper bound (ms) on how far in the past a synthesized call date lands.
const CALL_LOG_LOOKBACK_MS: i64 = 10_000_000_000;

pub fn synthesize(service: ServiceName, input_value: &str) -> Map<String, Value> {
    let mut report = Map::new();

    match service {
        ServiceName::NidToAllNumber => {
            report.insert("Target NID".into(), json!(input_value));
            report.insert(
                "Linked Numbers".into(),
                json!(["+88017********1", "+88018********2", "+88019********3"]),
            );
            report.insert("Owner Name".into(), json!("John Doe"));
        }
        ServiceName::MobileNumberToNid => {
            report.insert("Target Number".into(), json!(input_value));
            report.insert("NID Number".into(), json!("1990123456789"));
            report.insert("Owner Name".into(), json!("Jane Smith"));
            report.insert("Address".into(), json!("123 Main St, Dhaka"));
        }
        ServiceName::CdrCallLogs => {
            report.insert("Target Number".into(), json!(input_value));
            report.insert("Total Calls".into(), json!(fastrand::u32(50..150)));
            report.insert(
                "Total Duration".into(),
                json!(format!("{} minutes", fastrand::u32(100..600))),
            );
            report.insert("Last Call".into(), json!(recent_call_date()));
        }
        ServiceName::LocationTracking => {
            report.insert("Target ID".into(), json!(input_value));
            report.insert("Latitude".into(), json!(jittered_coordinate(BASE_LATITUDE)));
            report.insert(
                "Longitude".into(),
                json!(jittered_coordinate(BASE_LONGITUDE)),
            );
            report.insert(
                "Last Updated".into(),
                json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        // Wallet and IMEI style services share one account-summary shape.
        ServiceName::ImeiToAllNumbers
        | ServiceName::NagadInfo
        | ServiceName::NagadStatement
        | ServiceName::BkashInfo
        | ServiceName::BkashStatement => {
            report.insert("Account".into(), json!(input_value));
            report.insert(
                "Balance".into(),
                json!(format!("৳{:.2}", fastrand::f64() * 10_000.0)),
            );
            report.insert("Status".into(), json!("Active"));
            report.insert(
                "Recent Transactions".into(),
                json!(fastrand::u32(5..25)),
            );
        }
    }

    report
}

fn jittered_coordinate(base: f64) -> String {
    format!("{:.6}", base + (fastrand::f64() - 0.5) * COORD_JITTER)
}

fn recent_call_date() -> String {
    let when = Utc::now() - Duration::milliseconds(fastrand::i64(0..CALL_LOG_LOOKBACK_MS));
    when.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(report: &Map<String, Value>) -> Vec<&str> {
        report.keys().map(String::as_str).collect()
    }

    #[test]
    fn nid_lookup_is_constant_apart_from_input() {
        let first = synthesize(ServiceName::NidToAllNumber, "1990123456789");
        let second = synthesize(ServiceName::NidToAllNumber, "1990123456789");
        assert_eq!(first, second);
        assert_eq!(first["Target NID"], json!("1990123456789"));
        assert_eq!(first["Owner Name"], json!("John Doe"));
        assert_eq!(first["Linked Numbers"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn mobile_lookup_has_identity_shape() {
        let report = synthesize(ServiceName::MobileNumberToNid, "01711000000");
        assert_eq!(
            keys(&report),
            vec!["Target Number", "NID Number", "Owner Name", "Address"]
        );
        assert_eq!(report["Target Number"], json!("01711000000"));
    }

    #[test]
    fn call_log_values_stay_in_bounds() {
        for _ in 0..100 {
            let report = synthesize(ServiceName::CdrCallLogs, "01811000000");
            assert_eq!(
                keys(&report),
                vec!["Target Number", "Total Calls", "Total Duration", "Last Call"]
            );

            let calls = report["Total Calls"].as_u64().unwrap();
            assert!((50..150).contains(&calls));

            let duration = report["Total Duration"].as_str().unwrap();
            let minutes: u64 = duration
                .strip_suffix(" minutes")
                .unwrap()
                .parse()
                .unwrap();
            assert!((100..600).contains(&minutes));
        }
    }

    #[test]
    fn location_coordinates_stay_near_base() {
        for _ in 0..100 {
            let report = synthesize(ServiceName::LocationTracking, "01811000000");
            let lat: f64 = report["Latitude"].as_str().unwrap().parse().unwrap();
            let lon: f64 = report["Longitude"].as_str().unwrap().parse().unwrap();
            assert!((lat - BASE_LATITUDE).abs() <= COORD_JITTER / 2.0 + f64::EPSILON);
            assert!((lon - BASE_LONGITUDE).abs() <= COORD_JITTER / 2.0 + f64::EPSILON);
        }
    }

    #[test]
    fn wallet_services_share_the_account_shape() {
        for service in [
            ServiceName::ImeiToAllNumbers,
            ServiceName::NagadInfo,
            ServiceName::NagadStatement,
            ServiceName::BkashInfo,
            ServiceName::BkashStatement,
        ] {
            let report = synthesize(service, "01911000000");
            assert_eq!(
                keys(&report),
                vec!["Account", "Balance", "Status", "Recent Transactions"]
            );
            assert_eq!(report["Status"], json!("Active"));

            let balance = report["Balance"].as_str().unwrap();
            let amount: f64 = balance.strip_prefix('৳').unwrap().parse().unwrap();
            assert!((0.0..10_000.0).contains(&amount));

            let transactions = report["Recent Transactions"].as_u64().unwrap();
            assert!((5..25).contains(&transactions));
        }
    }
}
