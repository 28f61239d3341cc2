use concourse::live::feeds::{RailCallingPoint, RailService};
use concourse::live::rail::{crs_of, resolve_service};
use concourse::shared::Timestamp;

fn base_service(service_id: &str) -> RailService {
    RailService {
        service_id: service_id.to_string(),
        destination_crs: "PAD".to_string(),
        operator: "GW".to_string(),
        is_cancelled: false,
        eta: None,
        ata: None,
        sta: None,
        platform: None,
        previous_calling_points: Vec::new(),
        subsequent_calling_points: Vec::new(),
    }
}

fn calling_point(stop_id: &str, et: &str) -> RailCallingPoint {
    RailCallingPoint { stop_id: stop_id.to_string(), at: None, et: Some(et.to_string()), st: None }
}

#[test]
fn cancelled_services_are_dropped() {
    let service = RailService { is_cancelled: true, eta: Some("10:00".to_string()), ..base_service("1234567") };
    let now = Timestamp::from_hms_today("09:00").unwrap();
    assert!(resolve_service("PAD", &service, now).is_none());
}

#[test]
fn non_seven_char_service_ids_are_dropped() {
    let service = RailService { eta: Some("10:00".to_string()), ..base_service("123") };
    let now = Timestamp::from_hms_today("09:00").unwrap();
    assert!(resolve_service("PAD", &service, now).is_none());
}

#[test]
fn time_preference_is_eta_then_ata_then_sta() {
    let now = Timestamp::from_hms_today("09:00").unwrap();

    let eta_preferred = RailService {
        eta: Some("10:00".to_string()),
        ata: Some("11:00".to_string()),
        sta: Some("12:00".to_string()),
        ..base_service("1234567")
    };
    let resolved = resolve_service("PAD", &eta_preferred, now).expect("a future eta resolves");
    assert!(resolved.stops.contains(&("PAD".into(), Timestamp::from_hms_today("10:00").unwrap())));

    let ata_preferred = RailService { eta: None, ata: Some("11:00".to_string()), sta: Some("12:00".to_string()), ..base_service("1234567") };
    let resolved = resolve_service("PAD", &ata_preferred, now).expect("a future ata resolves");
    assert!(resolved.stops.contains(&("PAD".into(), Timestamp::from_hms_today("11:00").unwrap())));

    let sta_fallback = RailService { eta: None, ata: None, sta: Some("12:00".to_string()), ..base_service("1234567") };
    let resolved = resolve_service("PAD", &sta_fallback, now).expect("a future sta resolves");
    assert!(resolved.stops.contains(&("PAD".into(), Timestamp::from_hms_today("12:00").unwrap())));
}

#[test]
fn platform_key_is_service_and_station() {
    let service = RailService { eta: Some("10:00".to_string()), platform: Some("4".to_string()), ..base_service("1234567") };
    let now = Timestamp::from_hms_today("09:00").unwrap();

    let resolved = resolve_service("PAD", &service, now).expect("a future eta resolves");
    assert_eq!(resolved.platform, Some(("1234567/PAD".to_string(), "4".to_string())));
}

#[test]
fn past_calling_points_are_dropped() {
    let now = Timestamp::from_hms_today("09:00").unwrap();
    let service = RailService {
        eta: Some("09:30".to_string()),
        previous_calling_points: vec![calling_point("OLD", "08:00")],
        subsequent_calling_points: vec![calling_point("NEW", "09:45")],
        ..base_service("1234567")
    };

    let resolved = resolve_service("PAD", &service, now).expect("a future eta resolves");
    let ids: Vec<&str> = resolved.stops.iter().map(|(id, _)| id.as_ref()).collect();
    assert!(ids.contains(&"PAD"));
    assert!(ids.contains(&"NEW"));
    assert!(!ids.contains(&"OLD"));
    assert_eq!(resolved.stops.len(), 2);
}

#[test]
fn route_id_is_operator_slash_destination() {
    let service = RailService { eta: Some("10:00".to_string()), ..base_service("1234567") };
    let now = Timestamp::from_hms_today("09:00").unwrap();

    let resolved = resolve_service("PAD", &service, now).expect("a future eta resolves");
    assert_eq!(&*resolved.route_id, "GW/PAD");
}

#[test]
fn crs_of_strips_compound_rail_stop_id() {
    assert_eq!(crs_of("PAD/4"), "PAD");
    assert_eq!(crs_of("PAD"), "PAD");
}
