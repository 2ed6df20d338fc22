mod common;
use chrono::NaiveTime;
use common::{open_test_db, png_bytes};
use rattendance::core::reference::ReferenceLogic;
use rattendance::errors::AppError;
use rattendance::models::id_type::IdType;

#[test]
fn test_defaults_exist_after_init() {
    let mut pool = open_test_db("ref_defaults");

    let sups = ReferenceLogic::list_supervisors(&mut pool).unwrap();
    assert_eq!(sups.len(), 1);
    assert_eq!(sups[0].name, "Default Supervisor");
    assert_eq!(sups[0].email, "supervisor@example.com");

    let shifts = ReferenceLogic::list_shifts(&mut pool).unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].name, "Morning Shift");
    assert_eq!(shifts[0].start_str(), "09:00");
    assert_eq!(shifts[0].end_str(), "17:00");

    // a second init must not duplicate anything
    rattendance::db::initialize::init_db(&pool.conn).unwrap();
    assert_eq!(ReferenceLogic::list_supervisors(&mut pool).unwrap().len(), 1);
    assert_eq!(ReferenceLogic::list_shifts(&mut pool).unwrap().len(), 1);
}

#[test]
fn test_supervisor_crud() {
    let mut pool = open_test_db("ref_supervisor_crud");

    ReferenceLogic::add_supervisor(&mut pool, "Ravi", "ravi@example.com").unwrap();
    let dup = ReferenceLogic::add_supervisor(&mut pool, "Ravi", "other@example.com");
    match dup {
        Err(e @ AppError::DuplicateKey(_)) => assert!(e.to_string().contains("already exists")),
        other => panic!("unexpected: {:?}", other),
    }

    let n = ReferenceLogic::update_supervisor(&mut pool, "Ravi", "Ravi K", "rk@example.com").unwrap();
    assert_eq!(n, 1);
    let names: Vec<String> = ReferenceLogic::list_supervisors(&mut pool)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert!(names.contains(&"Ravi K".to_string()));
    assert!(!names.contains(&"Ravi".to_string()));

    // renaming onto an existing name
    assert!(matches!(
        ReferenceLogic::update_supervisor(&mut pool, "Ravi K", "Default Supervisor", "x@example.com"),
        Err(AppError::DuplicateKey(_))
    ));

    assert_eq!(ReferenceLogic::update_supervisor(&mut pool, "Nobody", "N", "n@example.com").unwrap(), 0);
    assert_eq!(ReferenceLogic::delete_supervisor(&mut pool, "Nobody").unwrap(), 0);
    assert_eq!(ReferenceLogic::delete_supervisor(&mut pool, "Ravi K").unwrap(), 1);
    assert_eq!(ReferenceLogic::list_supervisors(&mut pool).unwrap().len(), 1);
}

#[test]
fn test_blank_supervisor_name_is_rejected() {
    let mut pool = open_test_db("ref_supervisor_blank");
    assert!(matches!(
        ReferenceLogic::add_supervisor(&mut pool, "  ", "a@example.com"),
        Err(AppError::IncompleteSubmission(_))
    ));
}

#[test]
fn test_shift_names_are_not_unique() {
    let mut pool = open_test_db("ref_shift_dupes");

    ReferenceLogic::add_shift(&mut pool, "Night", "21:00", "05:00").unwrap();
    ReferenceLogic::add_shift(&mut pool, "Night", "22:00", "06:00").unwrap();
    assert_eq!(ReferenceLogic::list_shifts(&mut pool).unwrap().len(), 3);

    // update and delete act on every row with the name
    assert_eq!(ReferenceLogic::update_shift(&mut pool, "Night", "20:00", "04:00").unwrap(), 2);
    let nights: Vec<_> = ReferenceLogic::list_shifts(&mut pool)
        .unwrap()
        .into_iter()
        .filter(|s| s.name == "Night")
        .collect();
    assert!(nights.iter().all(|s| s.start_time == NaiveTime::from_hms_opt(20, 0, 0).unwrap()));

    assert_eq!(ReferenceLogic::delete_shift(&mut pool, "Night").unwrap(), 2);
    assert_eq!(ReferenceLogic::delete_shift(&mut pool, "Night").unwrap(), 0);
}

#[test]
fn test_shift_times_must_be_hh_mm() {
    let mut pool = open_test_db("ref_shift_times");

    assert!(matches!(
        ReferenceLogic::add_shift(&mut pool, "Late", "9pm", "05:00"),
        Err(AppError::InvalidTime(t)) if t == "9pm"
    ));
    assert!(matches!(
        ReferenceLogic::update_shift(&mut pool, "Morning Shift", "08:00", "24:30"),
        Err(AppError::InvalidTime(_))
    ));
    assert_eq!(ReferenceLogic::list_shifts(&mut pool).unwrap()[0].start_str(), "09:00");
}

#[test]
fn test_register_laborer() {
    let mut pool = open_test_db("ref_register_laborer");

    ReferenceLogic::register_laborer(
        &mut pool,
        " Arjun Kumar ",
        "9876543210",
        IdType::NationalIdCard,
        "1234-5678",
        "9123456780",
        "Default Supervisor",
        Some(png_bytes(40, 25)),
    )
    .unwrap();

    let found = ReferenceLogic::list_laborers(&mut pool, Some("Arjun Kumar")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id_type, IdType::NationalIdCard);
    assert_eq!(found[0].id_number, "1234-5678");
    assert!(found[0].id_proof.is_some());

    let dup = ReferenceLogic::register_laborer(
        &mut pool,
        "Arjun Kumar",
        "",
        IdType::Other,
        "",
        "",
        "",
        Some(png_bytes(10, 10)),
    );
    assert!(matches!(dup, Err(AppError::DuplicateKey(_))));

    assert!(ReferenceLogic::list_laborers(&mut pool, Some("Nobody")).unwrap().is_empty());
    assert_eq!(ReferenceLogic::list_laborers(&mut pool, None).unwrap().len(), 1);
}

#[test]
fn test_register_laborer_requires_readable_proof() {
    let mut pool = open_test_db("ref_register_proof");

    let missing = ReferenceLogic::register_laborer(
        &mut pool, "Meena", "", IdType::TaxIdCard, "", "", "", None,
    );
    assert!(matches!(missing, Err(AppError::IncompleteSubmission(_))));

    let broken = ReferenceLogic::register_laborer(
        &mut pool,
        "Meena",
        "",
        IdType::TaxIdCard,
        "",
        "",
        "",
        Some(b"not an image".to_vec()),
    );
    assert!(matches!(broken, Err(AppError::InvalidImage(_))));

    let no_name = ReferenceLogic::register_laborer(
        &mut pool,
        "",
        "",
        IdType::TaxIdCard,
        "",
        "",
        "",
        Some(png_bytes(10, 10)),
    );
    assert!(matches!(no_name, Err(AppError::IncompleteSubmission(_))));

    assert!(ReferenceLogic::list_laborers(&mut pool, None).unwrap().is_empty());
}
