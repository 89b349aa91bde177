use chrono::{NaiveDate, Utc};
use records_core::approval::{ApprovalMeta, ApprovalState};
use records_core::patch::Patch;
use records_db::models::internship::Internship;
use records_db::models::student_details::StudentDetails;
use records_db::models::user::CreateUser;
use records_db::repositories::{SubmittableRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

async fn create_user(pool: &PgPool, username: &str, department: Option<&str>) -> i64 {
    let department_id = match department {
        Some(acronym) => UserRepo::department_id_by_acronym(pool, acronym).await.unwrap(),
        None => None,
    };
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@x.edu"),
            role: None,
            department_id,
        },
    )
    .await
    .unwrap()
    .id
}

fn internship(provider: &str) -> Internship {
    serde_json::from_value(json!({
        "provider_name": provider,
        "domain": "Web",
        "mode": "Remote",
        "start_date": "2024-06-01",
        "end_date": "2024-07-31",
        "description": "frontend work"
    }))
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_starts_pending(pool: PgPool) {
    let owner = create_user(&pool, "asha", Some("CSE")).await;
    let record = SubmittableRepo::<Internship>::create(&pool, owner, &internship("Acme"), Some("t@x.edu"))
        .await
        .unwrap();

    assert_eq!(record.state, ApprovalState::Pending);
    assert!(record.approval.pending);
    assert!(!record.approval.approval_status);
    assert_eq!(record.owner_id, owner);
    assert_eq!(record.created_by, Some(owner));
    assert_eq!(record.reviewer_contact.as_deref(), Some("t@x.edu"));
    assert_eq!(record.payload.provider_name, "Acme");
    assert_eq!(record.payload.status, "Ongoing");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_pending_reports_department_or_na(pool: PgPool) {
    let with_dept = create_user(&pool, "asha", Some("CSE")).await;
    let without_dept = create_user(&pool, "ravi", None).await;
    SubmittableRepo::<Internship>::create(&pool, with_dept, &internship("Acme"), None)
        .await
        .unwrap();
    SubmittableRepo::<Internship>::create(&pool, without_dept, &internship("Globex"), None)
        .await
        .unwrap();

    let pending = SubmittableRepo::<Internship>::list_pending(&pool).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].username, "asha");
    assert_ne!(pending[0].department, "N/A");
    assert_eq!(pending[1].username, "ravi");
    assert_eq!(pending[1].department, "N/A");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_decision_is_guarded_on_pending(pool: PgPool) {
    let owner = create_user(&pool, "asha", None).await;
    let reviewer = create_user(&pool, "tutor", None).await;
    let record = SubmittableRepo::<Internship>::create(&pool, owner, &internship("Acme"), None)
        .await
        .unwrap();

    let mut meta = record.approval.clone();
    meta.approve(reviewer, Utc::now()).unwrap();
    let approved = SubmittableRepo::<Internship>::record_decision(&pool, record.id, &meta)
        .await
        .unwrap()
        .expect("pending record should accept a decision");
    assert_eq!(approved.state, ApprovalState::Approved);
    assert_eq!(approved.approval.approved_by, Some(reviewer));

    // A second decision on the same record is not written.
    let mut late = ApprovalMeta::submitted();
    late.reject(reviewer, Some("late".into()), Utc::now()).unwrap();
    let second = SubmittableRepo::<Internship>::record_decision(&pool, record.id, &late)
        .await
        .unwrap();
    assert!(second.is_none());

    let stored = SubmittableRepo::<Internship>::find_by_id(&pool, record.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.state, ApprovalState::Approved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_edit_merges_clears_and_resets(pool: PgPool) {
    let owner = create_user(&pool, "asha", None).await;
    let reviewer = create_user(&pool, "tutor", None).await;
    let record = SubmittableRepo::<Internship>::create(&pool, owner, &internship("Acme"), Some("t@x.edu"))
        .await
        .unwrap();

    let mut meta = record.approval.clone();
    meta.reject(reviewer, Some("wrong dates".into()), Utc::now()).unwrap();
    SubmittableRepo::<Internship>::record_decision(&pool, record.id, &meta)
        .await
        .unwrap()
        .unwrap();

    let patch = json!({ "domain": "ML", "description": null });
    let mut tx = pool.begin().await.unwrap();
    let edited = SubmittableRepo::<Internship>::apply_edit(
        &mut tx,
        record.id,
        &patch,
        &Patch::Keep,
        owner,
    )
    .await
    .unwrap()
    .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(edited.state, ApprovalState::Pending);
    assert_eq!(edited.approval, ApprovalMeta::submitted());
    assert_eq!(edited.payload.domain, "ML");
    assert_eq!(edited.payload.provider_name, "Acme");
    assert_eq!(edited.payload.description, None);
    assert_eq!(edited.reviewer_contact.as_deref(), Some("t@x.edu"));
    assert_eq!(edited.updated_by, Some(owner));
    assert_eq!(edited.payload.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_approved_newest_first(pool: PgPool) {
    let owner = create_user(&pool, "asha", None).await;
    let reviewer = create_user(&pool, "tutor", None).await;

    let mut ids = Vec::new();
    for provider in ["First", "Second", "Unapproved"] {
        let record = SubmittableRepo::<Internship>::create(&pool, owner, &internship(provider), None)
            .await
            .unwrap();
        ids.push(record.id);
    }
    for (offset, id) in ids[..2].iter().enumerate() {
        let mut meta = ApprovalMeta::submitted();
        meta.approve(reviewer, Utc::now() + chrono::Duration::seconds(offset as i64))
            .unwrap();
        SubmittableRepo::<Internship>::record_decision(&pool, *id, &meta)
            .await
            .unwrap()
            .unwrap();
    }

    let approved = SubmittableRepo::<Internship>::list_approved(&pool, owner).await.unwrap();
    let providers: Vec<_> = approved.iter().map(|r| r.payload.provider_name.as_str()).collect();
    assert_eq!(providers, vec!["Second", "First"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_returns_row_once(pool: PgPool) {
    let owner = create_user(&pool, "asha", None).await;
    let record = SubmittableRepo::<Internship>::create(&pool, owner, &internship("Acme"), None)
        .await
        .unwrap();

    let removed = SubmittableRepo::<Internship>::delete(&pool, record.id).await.unwrap();
    assert_eq!(removed.map(|r| r.id), Some(record.id));
    assert!(SubmittableRepo::<Internship>::delete(&pool, record.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_details_unique_per_owner_and_regno(pool: PgPool) {
    let owner = create_user(&pool, "asha", Some("CSE")).await;
    let other = create_user(&pool, "ravi", Some("CSE")).await;
    let department_id = UserRepo::department_id_by_acronym(&pool, "CSE")
        .await
        .unwrap()
        .unwrap();
    let details: StudentDetails = serde_json::from_value(json!({
        "regno": "21CS001",
        "department_id": department_id,
        "batch": "2021-2025",
        "tutor_email": "tutor@x.edu"
    }))
    .unwrap();

    SubmittableRepo::<StudentDetails>::create(&pool, owner, &details, None)
        .await
        .unwrap();
    assert!(SubmittableRepo::<StudentDetails>::exists_for_owner(&pool, owner)
        .await
        .unwrap());
    assert!(!SubmittableRepo::<StudentDetails>::exists_for_owner(&pool, other)
        .await
        .unwrap());

    let duplicate_regno = SubmittableRepo::<StudentDetails>::create(&pool, other, &details, None).await;
    match duplicate_regno {
        Err(sqlx::Error::Database(db_err)) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_student_details_regno"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }

    let latest = SubmittableRepo::<StudentDetails>::find_latest_for_owner(&pool, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.payload.tutor_email.as_deref(), Some("tutor@x.edu"));
}
