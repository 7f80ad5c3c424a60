use rusqlite::Connection;
use swaasth_core::db::open_db_in_memory;
use swaasth_core::{
    AddMedicineRequest, CareServiceError, Medicine, MedicineRepository, MedicineService,
    ProfileRepository, RepoError, SqliteMedicineRepository, SqliteProfileRepository, UserId,
    UserProfile,
};
use uuid::Uuid;

fn seed_user(conn: &Connection) -> UserId {
    let repo = SqliteProfileRepository::try_new(conn).unwrap();
    repo.create_profile(&UserProfile::new("Asha")).unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteMedicineRepository::try_new(&conn).unwrap();

    let mut medicine = Medicine::new(user, "Metformin", "500mg", "twice daily");
    medicine.instructions = Some("after meals".to_string());
    medicine.next_dose_at = Some(1_700_000_000_000);
    let id = repo.create_medicine(&medicine).unwrap();

    let loaded = repo.get_medicine(id).unwrap().unwrap();
    assert_eq!(loaded.uuid, medicine.uuid);
    assert_eq!(loaded.user_uuid, user);
    assert_eq!(loaded.name, "Metformin");
    assert_eq!(loaded.instructions.as_deref(), Some("after meals"));
    assert_eq!(loaded.next_dose_at, Some(1_700_000_000_000));
    assert!(!loaded.taken);
    assert!(loaded.created_at > 0, "created_at should be storage-assigned");
}

#[test]
fn update_replaces_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteMedicineRepository::try_new(&conn).unwrap();

    let mut medicine = Medicine::new(user, "Metformin", "500mg", "twice daily");
    repo.create_medicine(&medicine).unwrap();

    medicine.dosage = "850mg".to_string();
    medicine.frequency = "once daily".to_string();
    medicine.next_dose_at = None;
    repo.update_medicine(&medicine).unwrap();

    let loaded = repo.get_medicine(medicine.uuid).unwrap().unwrap();
    assert_eq!(loaded.dosage, "850mg");
    assert_eq!(loaded.frequency, "once daily");
    assert_eq!(loaded.next_dose_at, None);
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteMedicineRepository::try_new(&conn).unwrap();

    let medicine = Medicine::new(user, "Ghost", "1mg", "never");
    let err = repo.update_medicine(&medicine).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == medicine.uuid));
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteMedicineRepository::try_new(&conn).unwrap();

    let blank_name = Medicine::new(user, "   ", "500mg", "twice daily");
    let err = repo.create_medicine(&blank_name).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let mut valid = Medicine::new(user, "Metformin", "500mg", "twice daily");
    repo.create_medicine(&valid).unwrap();
    valid.dosage = String::new();
    let err = repo.update_medicine(&valid).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn taken_flag_is_a_plain_toggle() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteMedicineRepository::try_new(&conn).unwrap();

    let medicine = Medicine::new(user, "Amlodipine", "5mg", "once daily");
    repo.create_medicine(&medicine).unwrap();

    repo.set_medicine_taken(medicine.uuid, true).unwrap();
    assert!(repo.get_medicine(medicine.uuid).unwrap().unwrap().taken);

    repo.set_medicine_taken(medicine.uuid, false).unwrap();
    assert!(!repo.get_medicine(medicine.uuid).unwrap().unwrap().taken);
}

#[test]
fn delete_is_permanent() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteMedicineRepository::try_new(&conn).unwrap();

    let medicine = Medicine::new(user, "Metformin", "500mg", "twice daily");
    repo.create_medicine(&medicine).unwrap();

    repo.delete_medicine(medicine.uuid).unwrap();
    assert!(repo.get_medicine(medicine.uuid).unwrap().is_none());

    let err = repo.delete_medicine(medicine.uuid).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == medicine.uuid));
}

#[test]
fn list_is_scoped_to_the_owning_user() {
    let conn = open_db_in_memory().unwrap();
    let user_a = seed_user(&conn);
    let user_b = seed_user(&conn);
    let repo = SqliteMedicineRepository::try_new(&conn).unwrap();

    repo.create_medicine(&Medicine::new(user_a, "Metformin", "500mg", "twice daily"))
        .unwrap();
    repo.create_medicine(&Medicine::new(user_b, "Amlodipine", "5mg", "once daily"))
        .unwrap();

    let for_a = repo.list_medicines(user_a).unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].name, "Metformin");
}

#[test]
fn list_orders_newest_first_with_stable_tie_break() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteMedicineRepository::try_new(&conn).unwrap();

    let older = medicine_with_fixed_id(user, "00000000-0000-4000-8000-000000000002", "Older");
    let newer = medicine_with_fixed_id(user, "00000000-0000-4000-8000-000000000001", "Newer");
    repo.create_medicine(&older).unwrap();
    repo.create_medicine(&newer).unwrap();

    conn.execute(
        "UPDATE medicines SET created_at = 1000 WHERE uuid = ?1;",
        [older.uuid.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE medicines SET created_at = 2000 WHERE uuid = ?1;",
        [newer.uuid.to_string()],
    )
    .unwrap();

    let listed = repo.list_medicines(user).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Newer");
    assert_eq!(listed[1].name, "Older");
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteMedicineRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE medicines (
            uuid TEXT PRIMARY KEY NOT NULL,
            user_uuid TEXT NOT NULL,
            name TEXT NOT NULL
        );
        PRAGMA user_version = 2;",
    )
    .unwrap();

    let result = SqliteMedicineRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "medicines",
            column: "dosage"
        })
    ));
}

#[test]
fn service_add_reads_back_storage_assigned_fields() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let service = MedicineService::new(SqliteMedicineRepository::try_new(&conn).unwrap());

    let created = service
        .add_medicine(&AddMedicineRequest {
            user_uuid: user,
            name: " Metformin ".to_string(),
            dosage: "500mg".to_string(),
            frequency: "twice daily".to_string(),
            instructions: None,
            next_dose_at: Some(1_700_000_000_000),
        })
        .unwrap();

    assert_eq!(created.name, "Metformin");
    assert!(created.created_at > 0);

    let toggled = service.set_taken(created.uuid, true).unwrap();
    assert!(toggled.taken);
}

#[test]
fn service_maps_missing_records_to_not_found() {
    let conn = open_db_in_memory().unwrap();
    seed_user(&conn);
    let service = MedicineService::new(SqliteMedicineRepository::try_new(&conn).unwrap());

    let missing = Uuid::new_v4();
    let err = service.set_taken(missing, true).unwrap_err();
    assert!(matches!(err, CareServiceError::NotFound(id) if id == missing));
}

fn medicine_with_fixed_id(user: UserId, id: &str, name: &str) -> Medicine {
    Medicine::with_id(
        Uuid::parse_str(id).unwrap(),
        user,
        name,
        "500mg",
        "twice daily",
    )
}
