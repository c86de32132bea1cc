//! Integration tests for the repository layer against a real database.
//!
//! Covers CRUD round-trips for every table, role guards inside
//! transactions, rollback on partial failure and constraint violations.

use academy_core::roles::Role;
use academy_db::models::credential::{CreateCredential, UpdateCredential};
use academy_db::models::group::{CreateGroup, UpdateGroup};
use academy_db::models::person::{CreatePerson, Person, RoleViolation, UpdatePerson};
use academy_db::models::salary::{CreateSalary, UpdateSalary};
use academy_db::models::subject::{CreateSubject, UpdateSubject};
use academy_db::repositories::{
    CredentialRepo, GroupRepo, PersonRepo, SalaryRepo, SubjectRepo,
};
use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_credential(login: &str) -> CreateCredential {
    CreateCredential {
        login: login.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

fn new_person(name: &str, role: Role) -> CreatePerson {
    CreatePerson {
        credential_id: None,
        name: name.to_string(),
        surname: format!("{name}son"),
        age: Some(30),
        role,
    }
}

async fn create_person(pool: &PgPool, name: &str, role: Role) -> Person {
    PersonRepo::create(pool, &new_person(name, role)).await.unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn salary(amount: f64, paid_on: NaiveDate) -> CreateSalary {
    CreateSalary { amount, paid_on }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credential_round_trip(pool: PgPool) {
    let created = CredentialRepo::create(&pool, &new_credential("teacher1"))
        .await
        .unwrap()
        .expect("login is free");
    assert_eq!(created.login, "teacher1");

    let by_id = CredentialRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(by_id.login, "teacher1");
    assert_eq!(by_id.password_hash, created.password_hash);

    let by_login = CredentialRepo::find_by_login(&pool, "teacher1").await.unwrap().unwrap();
    assert_eq!(by_login.id, created.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credential_duplicate_login_returns_none(pool: PgPool) {
    CredentialRepo::create(&pool, &new_credential("dup"))
        .await
        .unwrap()
        .unwrap();
    let second = CredentialRepo::create(&pool, &new_credential("dup")).await.unwrap();
    assert!(second.is_none());

    let all = CredentialRepo::list(&pool, 50, 0).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credential_list_returns_every_row(pool: PgPool) {
    for login in ["alpha", "bravo", "charlie"] {
        CredentialRepo::create(&pool, &new_credential(login)).await.unwrap().unwrap();
    }

    let all = CredentialRepo::list(&pool, 50, 0).await.unwrap();
    let logins: Vec<_> = all.iter().map(|c| c.login.as_str()).collect();
    assert_eq!(logins, ["alpha", "bravo", "charlie"]);

    let page = CredentialRepo::list(&pool, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].login, "bravo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credential_update_and_delete(pool: PgPool) {
    let c = CredentialRepo::create(&pool, &new_credential("old_login"))
        .await
        .unwrap()
        .unwrap();

    let updated = CredentialRepo::update(
        &pool,
        c.id,
        &UpdateCredential {
            login: Some("new_login".into()),
            password_hash: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.login, "new_login");
    assert_eq!(updated.password_hash, c.password_hash);

    assert!(CredentialRepo::update(&pool, 999_999, &UpdateCredential::default())
        .await
        .unwrap()
        .is_none());

    assert!(CredentialRepo::delete(&pool, c.id).await.unwrap());
    assert!(!CredentialRepo::delete(&pool, c.id).await.unwrap());
    assert!(CredentialRepo::find_by_id(&pool, c.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credential_update_to_taken_login_violates_unique(pool: PgPool) {
    CredentialRepo::create(&pool, &new_credential("first")).await.unwrap().unwrap();
    let second = CredentialRepo::create(&pool, &new_credential("second"))
        .await
        .unwrap()
        .unwrap();

    let err = CredentialRepo::update(
        &pool,
        second.id,
        &UpdateCredential {
            login: Some("first".into()),
            password_hash: None,
        },
    )
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credential_delete_by_login_and_hash(pool: PgPool) {
    let c = CredentialRepo::create(&pool, &new_credential("bye")).await.unwrap().unwrap();

    assert!(
        !CredentialRepo::delete_by_login_and_hash(&pool, "bye", "$argon2id$other")
            .await
            .unwrap()
    );
    assert!(CredentialRepo::find_by_id(&pool, c.id).await.unwrap().is_some());

    assert!(
        CredentialRepo::delete_by_login_and_hash(&pool, "bye", &c.password_hash)
            .await
            .unwrap()
    );
    assert!(CredentialRepo::find_by_id(&pool, c.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_credential_delete_by_login_and_hash_skips_reused_login(pool: PgPool) {
    let original = CredentialRepo::create(&pool, &new_credential("anna"))
        .await
        .unwrap()
        .unwrap();

    // Renamed after its password was checked, then the login is reused.
    CredentialRepo::update(
        &pool,
        original.id,
        &UpdateCredential {
            login: Some("anna_old".into()),
            password_hash: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    let newcomer = CredentialRepo::create(
        &pool,
        &CreateCredential {
            login: "anna".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$b3RoZXI$b3RoZXI".into(),
        },
    )
    .await
    .unwrap()
    .unwrap();

    let removed =
        CredentialRepo::delete_by_login_and_hash(&pool, "anna", &original.password_hash)
            .await
            .unwrap();
    assert!(!removed);
    assert!(CredentialRepo::find_by_id(&pool, newcomer.id).await.unwrap().is_some());
    assert!(CredentialRepo::find_by_id(&pool, original.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Persons
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_person_round_trip(pool: PgPool) {
    let p = create_person(&pool, "Anna", Role::Teacher).await;
    assert_eq!(p.role, "teacher");
    assert_eq!(p.age, Some(30));

    let found = PersonRepo::find_by_id(&pool, p.id).await.unwrap().unwrap();
    assert_eq!(found, p);

    let updated = PersonRepo::update(
        &pool,
        p.id,
        &UpdatePerson {
            surname: Some("Ivanova".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.surname, "Ivanova");
    assert_eq!(updated.name, "Anna");

    assert!(PersonRepo::delete(&pool, p.id).await.unwrap());
    assert!(PersonRepo::find_by_id(&pool, p.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_person_list_filters_by_role(pool: PgPool) {
    create_person(&pool, "Tom", Role::Teacher).await;
    create_person(&pool, "Sam", Role::Student).await;
    create_person(&pool, "Sue", Role::Student).await;

    let students = PersonRepo::list(&pool, Some(Role::Student), 50, 0).await.unwrap();
    assert_eq!(students.len(), 2);
    assert!(students.iter().all(|p| p.role == "student"));

    let everyone = PersonRepo::list(&pool, None, 50, 0).await.unwrap();
    assert_eq!(everyone.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_person_create_with_credential(pool: PgPool) {
    let (credential, person) = PersonRepo::create_with_credential(
        &pool,
        &new_credential("anna"),
        &new_person("Anna", Role::Teacher),
    )
    .await
    .unwrap()
    .expect("login is free");

    assert_eq!(person.credential_id, Some(credential.id));
    let owner = PersonRepo::find_by_credential_id(&pool, credential.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(owner.id, person.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_person_create_with_taken_login_writes_nothing(pool: PgPool) {
    CredentialRepo::create(&pool, &new_credential("taken")).await.unwrap().unwrap();

    let result = PersonRepo::create_with_credential(
        &pool,
        &new_credential("taken"),
        &new_person("Late", Role::Student),
    )
    .await
    .unwrap();
    assert!(result.is_none());

    let persons = PersonRepo::list(&pool, None, 50, 0).await.unwrap();
    assert!(persons.is_empty(), "no person may be created without its credential");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_credential_detaches_person(pool: PgPool) {
    let (credential, person) = PersonRepo::create_with_credential(
        &pool,
        &new_credential("detach"),
        &new_person("Dan", Role::Student),
    )
    .await
    .unwrap()
    .unwrap();

    CredentialRepo::delete(&pool, credential.id).await.unwrap();
    let person = PersonRepo::find_by_id(&pool, person.id).await.unwrap().unwrap();
    assert_eq!(person.credential_id, None);
}

// ---------------------------------------------------------------------------
// Salaries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_salary_round_trip(pool: PgPool) {
    let teacher = create_person(&pool, "Tina", Role::Teacher).await;

    let s = SalaryRepo::create_for_teacher(&pool, teacher.id, &salary(1500.0, date(2026, 1, 31)))
        .await
        .unwrap()
        .expect("person is a teacher");
    assert_eq!(s.teacher_id, teacher.id);
    assert_eq!(s.amount, 1500.0);

    let found = SalaryRepo::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(found, s);

    let updated = SalaryRepo::update(
        &pool,
        s.id,
        &UpdateSalary {
            amount: Some(1750.0),
            paid_on: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.amount, 1750.0);
    assert_eq!(updated.paid_on, date(2026, 1, 31));

    assert!(SalaryRepo::delete(&pool, s.id).await.unwrap());
    assert!(SalaryRepo::find_by_id(&pool, s.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_salary_for_student_is_refused(pool: PgPool) {
    let student = create_person(&pool, "Stan", Role::Student).await;

    let result =
        SalaryRepo::create_for_teacher(&pool, student.id, &salary(100.0, date(2026, 1, 31)))
            .await
            .unwrap();
    assert_matches!(
        result,
        Err(RoleViolation::WrongRole { person_id, ref actual, expected: Role::Teacher })
            if person_id == student.id && actual == "student"
    );

    assert!(SalaryRepo::list(&pool, 50, 0).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_salary_for_missing_person_is_refused(pool: PgPool) {
    let result = SalaryRepo::create_for_teacher(&pool, 424_242, &salary(100.0, date(2026, 1, 31)))
        .await
        .unwrap();
    assert_eq!(result, Err(RoleViolation::Missing { person_id: 424_242 }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_salary_lists_by_teacher_and_date(pool: PgPool) {
    let t1 = create_person(&pool, "Ted", Role::Teacher).await;
    let t2 = create_person(&pool, "Tia", Role::Teacher).await;
    let jan = date(2026, 1, 31);
    let feb = date(2026, 2, 28);

    for (teacher, amount, paid_on) in [(&t1, 100.0, jan), (&t1, 200.0, feb), (&t2, 300.0, jan)] {
        SalaryRepo::create_for_teacher(&pool, teacher.id, &salary(amount, paid_on))
            .await
            .unwrap()
            .unwrap();
    }

    let t1_salaries = SalaryRepo::list_by_teacher(&pool, t1.id).await.unwrap();
    let dates: Vec<_> = t1_salaries.iter().map(|s| s.paid_on).collect();
    assert_eq!(dates, [feb, jan], "newest first");

    let on_jan = SalaryRepo::list_by_date(&pool, jan, 50, 0).await.unwrap();
    assert_eq!(on_jan.len(), 2);
    assert!(on_jan.iter().all(|s| s.paid_on == jan));

    assert_eq!(SalaryRepo::list(&pool, 50, 0).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_teacher_cascades_salaries(pool: PgPool) {
    let teacher = create_person(&pool, "Gone", Role::Teacher).await;
    let s = SalaryRepo::create_for_teacher(&pool, teacher.id, &salary(10.0, date(2026, 1, 1)))
        .await
        .unwrap()
        .unwrap();

    PersonRepo::delete(&pool, teacher.id).await.unwrap();
    assert!(SalaryRepo::find_by_id(&pool, s.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subject_round_trip(pool: PgPool) {
    let s = SubjectRepo::create(&pool, &CreateSubject { name: "Physics".into() })
        .await
        .unwrap();

    let by_name = SubjectRepo::find_by_name(&pool, "Physics").await.unwrap().unwrap();
    assert_eq!(by_name.id, s.id);

    let renamed = SubjectRepo::update(
        &pool,
        s.id,
        &UpdateSubject {
            name: Some("Astrophysics".into()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Astrophysics");
    assert!(SubjectRepo::find_by_name(&pool, "Physics").await.unwrap().is_none());

    assert!(SubjectRepo::delete(&pool, s.id).await.unwrap());
    assert!(SubjectRepo::find_by_id(&pool, s.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subject_duplicate_name_violates_unique(pool: PgPool) {
    SubjectRepo::create(&pool, &CreateSubject { name: "Chemistry".into() })
        .await
        .unwrap();
    let err = SubjectRepo::create(&pool, &CreateSubject { name: "Chemistry".into() })
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_create_with_teacher_and_students(pool: PgPool) {
    let teacher = create_person(&pool, "Tara", Role::Teacher).await;
    let s1 = create_person(&pool, "Bob", Role::Student).await;
    let s2 = create_person(&pool, "Amy", Role::Student).await;

    let group = GroupRepo::create(
        &pool,
        &CreateGroup {
            title: "10-A".into(),
            teacher_id: Some(teacher.id),
            student_ids: vec![s1.id, s2.id],
        },
    )
    .await
    .unwrap()
    .expect("roles are valid");
    assert_eq!(group.teacher_id, Some(teacher.id));

    let students = GroupRepo::list_students(&pool, group.id).await.unwrap();
    let names: Vec<_> = students.iter().map(|p| p.name.as_str()).collect();
    // Ordered by surname: "Amyson" < "Bobson".
    assert_eq!(names, ["Amy", "Bob"]);

    let led = GroupRepo::find_by_teacher(&pool, teacher.id).await.unwrap();
    assert_eq!(led.len(), 1);
    assert_eq!(led[0].id, group.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_create_rolls_back_on_non_student(pool: PgPool) {
    let teacher = create_person(&pool, "Tess", Role::Teacher).await;
    let student = create_person(&pool, "Sid", Role::Student).await;
    let other_teacher = create_person(&pool, "Otto", Role::Teacher).await;

    let result = GroupRepo::create(
        &pool,
        &CreateGroup {
            title: "Broken".into(),
            teacher_id: Some(teacher.id),
            student_ids: vec![student.id, other_teacher.id],
        },
    )
    .await
    .unwrap();
    assert_matches!(result, Err(RoleViolation::WrongRole { expected: Role::Student, .. }));

    assert!(GroupRepo::list(&pool).await.unwrap().is_empty(), "group insert must roll back");
    let memberships: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(memberships.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_create_rejects_student_as_teacher(pool: PgPool) {
    let student = create_person(&pool, "Stu", Role::Student).await;
    let result = GroupRepo::create(
        &pool,
        &CreateGroup {
            title: "No Lead".into(),
            teacher_id: Some(student.id),
            student_ids: vec![],
        },
    )
    .await
    .unwrap();
    assert_matches!(result, Err(RoleViolation::WrongRole { expected: Role::Teacher, .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_update_and_clear_teacher(pool: PgPool) {
    let t1 = create_person(&pool, "First", Role::Teacher).await;
    let t2 = create_person(&pool, "Second", Role::Teacher).await;
    let group = GroupRepo::create(
        &pool,
        &CreateGroup {
            title: "11-B".into(),
            teacher_id: Some(t1.id),
            student_ids: vec![],
        },
    )
    .await
    .unwrap()
    .unwrap();

    let reassigned = GroupRepo::update(
        &pool,
        group.id,
        &UpdateGroup {
            title: Some("11-C".into()),
            teacher_id: Some(t2.id),
            clear_teacher: false,
        },
    )
    .await
    .unwrap()
    .unwrap()
    .unwrap();
    assert_eq!(reassigned.title, "11-C");
    assert_eq!(reassigned.teacher_id, Some(t2.id));

    let cleared = GroupRepo::update(
        &pool,
        group.id,
        &UpdateGroup {
            clear_teacher: true,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap()
    .unwrap();
    assert_eq!(cleared.teacher_id, None);
    assert_eq!(cleared.title, "11-C");

    let missing = GroupRepo::update(&pool, 999_999, &UpdateGroup::default())
        .await
        .unwrap()
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_membership_is_idempotent(pool: PgPool) {
    let student = create_person(&pool, "Ivy", Role::Student).await;
    let group = GroupRepo::create(
        &pool,
        &CreateGroup {
            title: "9-A".into(),
            teacher_id: None,
            student_ids: vec![],
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(GroupRepo::add_student(&pool, group.id, student.id).await.unwrap(), Ok(true));
    assert_eq!(GroupRepo::add_student(&pool, group.id, student.id).await.unwrap(), Ok(false));
    assert_eq!(GroupRepo::list_students(&pool, group.id).await.unwrap().len(), 1);

    assert!(GroupRepo::remove_student(&pool, group.id, student.id).await.unwrap());
    assert!(!GroupRepo::remove_student(&pool, group.id, student.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_subjects(pool: PgPool) {
    let group = GroupRepo::create(
        &pool,
        &CreateGroup {
            title: "8-A".into(),
            teacher_id: None,
            student_ids: vec![],
        },
    )
    .await
    .unwrap()
    .unwrap();
    let math = SubjectRepo::create(&pool, &CreateSubject { name: "Math".into() })
        .await
        .unwrap();
    let art = SubjectRepo::create(&pool, &CreateSubject { name: "Art".into() })
        .await
        .unwrap();

    assert!(GroupRepo::add_subject(&pool, group.id, math.id).await.unwrap());
    assert!(GroupRepo::add_subject(&pool, group.id, art.id).await.unwrap());
    assert!(!GroupRepo::add_subject(&pool, group.id, art.id).await.unwrap());

    let names: Vec<_> = GroupRepo::list_subjects(&pool, group.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Art", "Math"]);

    // Deleting a subject drops it from the curriculum.
    SubjectRepo::delete(&pool, math.id).await.unwrap();
    assert_eq!(GroupRepo::list_subjects(&pool, group.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_group_delete_cascades_memberships(pool: PgPool) {
    let student = create_person(&pool, "Max", Role::Student).await;
    let group = GroupRepo::create(
        &pool,
        &CreateGroup {
            title: "7-A".into(),
            teacher_id: None,
            student_ids: vec![student.id],
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert!(GroupRepo::delete(&pool, group.id).await.unwrap());
    assert!(GroupRepo::find_by_id(&pool, group.id).await.unwrap().is_none());
    assert!(PersonRepo::find_by_id(&pool, student.id).await.unwrap().is_some());

    let memberships: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(memberships.0, 0);
}
