use chrono::NaiveDate;
use roster_core::db::open_db_in_memory;
use roster_core::{
    NewStudent, ResourceKind, ServiceError, SqliteStudentRepository, StudentPatch,
    StudentRepository, StudentService,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> StudentService<SqliteStudentRepository<'_>> {
    StudentService::new(SqliteStudentRepository::try_new(conn).unwrap())
}

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 15).unwrap()
}

#[test]
fn create_then_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create(&NewStudent::new("Ann", "a@x.com").with_dob(dob()))
        .unwrap();
    let loaded = service.get_by_id(created.id).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Ann");
    assert_eq!(loaded.email, "a@x.com");
    assert_eq!(loaded.dob, Some(dob()));
}

#[test]
fn create_assigns_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let first = service.create(&NewStudent::new("Ann", "a@x.com")).unwrap();
    let second = service.create(&NewStudent::new("Bob", "b@x.com")).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(service.list_all().unwrap(), vec![first, second]);
}

#[test]
fn create_rejects_invalid_candidate_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.create(&NewStudent::new("", "bad")).unwrap_err();
    match err {
        ServiceError::Validation(validation) => {
            assert!(validation.has_field("name"));
            assert!(validation.has_field("email"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn get_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = service(&conn).get_by_id(42).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: ResourceKind::Student,
            id: 42
        }
    ));
    assert_eq!(err.to_string(), "student not found with id: 42");
}

#[test]
fn delete_removes_visibility() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let created = service.create(&NewStudent::new("Ann", "a@x.com")).unwrap();
    service.delete_by_id(created.id).unwrap();

    assert!(service.get_by_id(created.id).unwrap_err().is_not_found());
    assert!(!repo.exists_by_id(created.id).unwrap());
}

#[test]
fn second_delete_always_fails_with_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.create(&NewStudent::new("Ann", "a@x.com")).unwrap();
    service.delete_by_id(created.id).unwrap();
    assert!(service.delete_by_id(created.id).unwrap_err().is_not_found());
    assert!(service.delete_by_id(created.id).unwrap_err().is_not_found());

    assert!(service.delete_by_id(999).unwrap_err().is_not_found());
}

#[test]
fn deleted_ids_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let first = service.create(&NewStudent::new("Ann", "a@x.com")).unwrap();
    service.delete_by_id(first.id).unwrap();
    let second = service.create(&NewStudent::new("Bob", "b@x.com")).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn update_merges_and_preserves_omitted_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create(&NewStudent::new("Ann", "a@x.com").with_dob(dob()))
        .unwrap();
    let patch = StudentPatch {
        name: Some(String::new()),
        email: Some("b@x.com".to_string()),
        dob: None,
    };

    let updated = service.update(created.id, &patch).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Ann");
    assert_eq!(updated.email, "b@x.com");
    assert_eq!(updated.dob, Some(dob()));
    assert_eq!(service.get_by_id(created.id).unwrap(), updated);
}

#[test]
fn update_with_all_fields_overwrites_everything_but_id() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.create(&NewStudent::new("Ann", "a@x.com")).unwrap();
    let new_dob = NaiveDate::from_ymd_opt(1999, 9, 9).unwrap();
    let updated = service
        .update(
            created.id,
            &StudentPatch {
                name: Some("Annie".to_string()),
                email: Some("annie@x.com".to_string()),
                dob: Some(new_dob),
            },
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Annie");
    assert_eq!(updated.email, "annie@x.com");
    assert_eq!(updated.dob, Some(new_dob));
}

#[test]
fn empty_patch_leaves_record_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service
        .create(&NewStudent::new("Ann", "a@x.com").with_dob(dob()))
        .unwrap();
    let updated = service.update(created.id, &StudentPatch::default()).unwrap();
    assert_eq!(updated, created);
}

#[test]
fn update_with_invalid_email_keeps_stored_value() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.create(&NewStudent::new("Ann", "a@x.com")).unwrap();
    let err = service
        .update(
            created.id,
            &StudentPatch {
                email: Some("not-an-email".to_string()),
                ..StudentPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(service.get_by_id(created.id).unwrap(), created);
}

#[test]
fn update_missing_id_is_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let existing = service.create(&NewStudent::new("Ann", "a@x.com")).unwrap();
    let err = service
        .update(
            existing.id + 100,
            &StudentPatch {
                name: Some("Ghost".to_string()),
                ..StudentPatch::default()
            },
        )
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(service.list_all().unwrap(), vec![existing]);
}

#[test]
fn search_is_case_sensitive_and_sorted_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for name in ["Anna", "Bob", "Annika"] {
        service
            .create(&NewStudent::new(name, "someone@x.com"))
            .unwrap();
    }

    let names = |query: &str| {
        service
            .find_by_name_substring(query)
            .unwrap()
            .into_iter()
            .map(|student| student.name)
            .collect::<Vec<_>>()
    };

    assert_eq!(names("Ann"), vec!["Anna", "Annika"]);
    assert!(names("ann").is_empty());
    assert_eq!(names("nn"), vec!["Anna", "Annika"]);
    assert_eq!(names("o"), vec!["Bob"]);
}

#[test]
fn search_treats_like_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.create(&NewStudent::new("Anna", "a@x.com")).unwrap();
    service.create(&NewStudent::new("100%", "p@x.com")).unwrap();

    let hits = service.find_by_name_substring("%").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "100%");
    assert!(service.find_by_name_substring("A_na").unwrap().is_empty());
}

#[test]
fn empty_search_returns_everyone_sorted() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for name in ["Carl", "Anna", "Bob"] {
        service.create(&NewStudent::new(name, "x@x.com")).unwrap();
    }

    let names = service
        .find_by_name_substring("")
        .unwrap()
        .into_iter()
        .map(|student| student.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Anna", "Bob", "Carl"]);
}
