use rusqlite::Connection;
use swaasth_core::db::open_db_in_memory;
use swaasth_core::{
    ProfileRepository, RecordVitalRequest, RepoError, SqliteProfileRepository,
    SqliteVitalRepository, UserId, UserProfile, Vital, VitalKind, VitalRepository, VitalService,
};

fn seed_user(conn: &Connection) -> UserId {
    let repo = SqliteProfileRepository::try_new(conn).unwrap();
    repo.create_profile(&UserProfile::new("Asha")).unwrap()
}

#[test]
fn record_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteVitalRepository::try_new(&conn).unwrap();

    let mut vital = Vital::new(user, VitalKind::BloodPressure, "120/80", 1_700_000_000_000);
    vital.unit = Some("mmHg".to_string());
    vital.notes = Some("after morning walk".to_string());
    repo.create_vital(&vital).unwrap();

    let listed = repo.list_vitals(user, None).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].kind, VitalKind::BloodPressure);
    assert_eq!(listed[0].value, "120/80");
    assert_eq!(listed[0].unit.as_deref(), Some("mmHg"));
    assert_eq!(listed[0].recorded_at, 1_700_000_000_000);
    assert!(listed[0].created_at > 0);
}

#[test]
fn list_orders_most_recent_reading_first() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteVitalRepository::try_new(&conn).unwrap();

    repo.create_vital(&Vital::new(user, VitalKind::Weight, "72", 1_000))
        .unwrap();
    repo.create_vital(&Vital::new(user, VitalKind::Weight, "71", 3_000))
        .unwrap();
    repo.create_vital(&Vital::new(user, VitalKind::Weight, "71.5", 2_000))
        .unwrap();

    let listed = repo.list_vitals(user, None).unwrap();
    let values: Vec<&str> = listed.iter().map(|vital| vital.value.as_str()).collect();
    assert_eq!(values, ["71", "71.5", "72"]);
}

#[test]
fn list_filters_by_kind() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteVitalRepository::try_new(&conn).unwrap();

    repo.create_vital(&Vital::new(user, VitalKind::HeartRate, "68", 1_000))
        .unwrap();
    repo.create_vital(&Vital::new(user, VitalKind::BloodSugar, "105", 2_000))
        .unwrap();

    let heart = repo.list_vitals(user, Some(VitalKind::HeartRate)).unwrap();
    assert_eq!(heart.len(), 1);
    assert_eq!(heart[0].value, "68");

    let temperature = repo
        .list_vitals(user, Some(VitalKind::Temperature))
        .unwrap();
    assert!(temperature.is_empty());
}

#[test]
fn validation_rejects_blank_value() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteVitalRepository::try_new(&conn).unwrap();

    let blank = Vital::new(user, VitalKind::HeartRate, "   ", 1_000);
    assert!(matches!(
        repo.create_vital(&blank).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn delete_is_permanent() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteVitalRepository::try_new(&conn).unwrap();

    let vital = Vital::new(user, VitalKind::Temperature, "98.6", 1_000);
    repo.create_vital(&vital).unwrap();

    repo.delete_vital(vital.uuid).unwrap();
    assert!(repo.list_vitals(user, None).unwrap().is_empty());
    assert!(matches!(
        repo.delete_vital(vital.uuid).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn readings_are_scoped_to_the_owning_user() {
    let conn = open_db_in_memory().unwrap();
    let user_a = seed_user(&conn);
    let user_b = seed_user(&conn);
    let repo = SqliteVitalRepository::try_new(&conn).unwrap();

    repo.create_vital(&Vital::new(user_a, VitalKind::Weight, "72", 1_000))
        .unwrap();

    assert_eq!(repo.list_vitals(user_a, None).unwrap().len(), 1);
    assert!(repo.list_vitals(user_b, None).unwrap().is_empty());
}

#[test]
fn service_record_trims_value() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let service = VitalService::new(SqliteVitalRepository::try_new(&conn).unwrap());

    service
        .record_vital(&RecordVitalRequest {
            user_uuid: user,
            kind: VitalKind::BloodSugar,
            value: " 105 ".to_string(),
            unit: Some("mg/dL".to_string()),
            notes: None,
            recorded_at: 1_700_000_000_000,
        })
        .unwrap();

    let listed = service.list_vitals(user, None).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].value, "105");
}
