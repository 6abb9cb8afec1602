//! Cache behavior observed through the resource services.

mod common;

use caseload_core::auth::Credentials;
use caseload_core::cache_key::keys;
use caseload_core::session::{AddStudentToSessions, SessionUpdate, TherapySession};
use caseload_core::student::{DateRange, NewStudent, StudentUpdate};
use caseload_core::CaseloadError;

use common::{FakeBackend, THERAPIST, at, context, signed_in};

fn new_student(first_name: &str) -> NewStudent {
    NewStudent {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        grade: Some(2),
        school_id: None,
        date_of_birth: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_signed_out_reads_make_no_calls() {
    let backend = FakeBackend::new();
    let ctx = context(&backend);

    let students = ctx.students.list();
    assert!(!students.is_enabled());

    let result = students.fetch().await;
    assert!(result.data.is_empty());
    assert!(!result.is_loading);
    assert!(result.error.is_none());

    let sessions = ctx.sessions.list(Default::default()).fetch().await;
    assert!(sessions.data.is_empty());
    assert!(ctx.therapists.profile().fetch().await.data.is_none());

    assert_eq!(backend.total_calls(), 0);
    assert!(ctx.client.is_empty());
}

#[tokio::test]
async fn test_blank_ids_disable_reads() {
    let backend = FakeBackend::new();
    let ctx = signed_in(&backend).await;

    assert!(!ctx.students.detail("").is_enabled());
    assert!(!ctx.sessions.roster("  ").is_enabled());
    assert!(ctx.sessions.detail("").fetch().await.data.is_none());
    assert_eq!(backend.calls("get_session"), 0);
}

#[tokio::test]
async fn test_concurrent_equal_reads_share_one_call() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    let ctx = signed_in(&backend).await;

    let first = ctx.students.list();
    let second = ctx.students.list();
    let (a, b) = tokio::join!(first.fetch(), second.fetch());

    assert_eq!(a.data, b.data);
    assert_eq!(a.data.len(), 1);
    assert_eq!(backend.calls("list_students"), 1);

    // Served from cache afterwards.
    ctx.students.list().fetch().await;
    assert_eq!(backend.calls("list_students"), 1);
}

#[tokio::test]
async fn test_create_student_refreshes_list() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    let ctx = signed_in(&backend).await;

    assert_eq!(ctx.students.list().fetch().await.data.len(), 1);

    let created = ctx.students.create(&new_student("Grace")).await.unwrap();
    assert_eq!(created.therapist_id, THERAPIST);
    assert!(!ctx.client.is_fresh(&keys::students(THERAPIST)));

    let list = ctx.students.list().fetch().await;
    assert_eq!(list.data.len(), 2);
    assert_eq!(backend.calls("list_students"), 2);
}

#[tokio::test]
async fn test_failed_write_leaves_cache_fresh() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    let ctx = signed_in(&backend).await;
    ctx.students.list().fetch().await;
    ctx.students.detail("stu-1").fetch().await;

    backend.fail("update_student");
    let update = StudentUpdate {
        first_name: Some("Augusta".to_string()),
        ..Default::default()
    };
    let err = ctx.students.update("stu-1", &update).await.unwrap_err();
    assert!(matches!(err, CaseloadError::Api { status: 500, .. }));

    assert!(ctx.client.is_fresh(&keys::students(THERAPIST)));
    assert!(ctx.client.is_fresh(&keys::student("stu-1")));

    ctx.students.list().fetch().await;
    assert_eq!(backend.calls("list_students"), 1);
}

#[tokio::test]
async fn test_invalid_write_never_reaches_adapter() {
    let backend = FakeBackend::new();
    let ctx = signed_in(&backend).await;

    let err = ctx.students.create(&new_student("  ")).await.unwrap_err();
    assert!(matches!(err, CaseloadError::Validation(_)));
    assert_eq!(backend.calls("create_student"), 0);
}

#[tokio::test]
async fn test_signed_out_write_is_rejected() {
    let backend = FakeBackend::new();
    let ctx = context(&backend);

    let err = ctx.students.create(&new_student("Ada")).await.unwrap_err();
    assert!(matches!(err, CaseloadError::Unauthenticated));
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn test_enrolment_refreshes_every_affected_roster() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    backend.add_session("s-1", at(2025, 3, 5, 9));
    backend.add_session("s-2", at(2025, 3, 6, 9));
    let ctx = signed_in(&backend).await;

    for id in ["s-1", "s-2"] {
        assert!(ctx.sessions.roster(id).fetch().await.data.is_empty());
    }
    ctx.students.sessions("stu-1").fetch().await;
    ctx.students.list().fetch().await;

    ctx.sessions
        .add_student_to_sessions(&AddStudentToSessions {
            student_id: "stu-1".to_string(),
            session_ids: vec!["s-1".to_string(), "s-2".to_string()],
        })
        .await
        .unwrap();

    assert!(!ctx.client.is_fresh(&keys::session_students("s-1")));
    assert!(!ctx.client.is_fresh(&keys::session_students("s-2")));
    assert!(!ctx.client.is_fresh(&keys::student_sessions("stu-1")));
    assert!(ctx.client.is_fresh(&keys::students(THERAPIST)));

    for id in ["s-1", "s-2"] {
        let roster = ctx.sessions.roster(id).fetch().await.data;
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].student.id, "stu-1");
    }
    assert_eq!(ctx.students.sessions("stu-1").fetch().await.data.len(), 2);
}

fn enrol(student_id: &str, session_ids: &[&str]) -> AddStudentToSessions {
    AddStudentToSessions {
        student_id: student_id.to_string(),
        session_ids: session_ids.iter().map(|id| id.to_string()).collect(),
    }
}

fn roster_ids(sessions: &[TherapySession]) -> Vec<String> {
    sessions
        .iter()
        .flat_map(|s| s.students.iter().map(|st| st.id.clone()))
        .collect()
}

#[tokio::test]
async fn test_enrolment_refreshes_co_enrolled_student_sessions() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    backend.add_student("stu-2", "Grace");
    backend.add_session("s-1", at(2025, 3, 5, 9));
    let ctx = signed_in(&backend).await;

    ctx.sessions
        .add_student_to_sessions(&enrol("stu-2", &["s-1"]))
        .await
        .unwrap();
    let before = ctx.students.sessions("stu-2").fetch().await.data;
    assert_eq!(roster_ids(&before), vec!["stu-2"]);

    ctx.sessions
        .add_student_to_sessions(&enrol("stu-1", &["s-1"]))
        .await
        .unwrap();
    let after = ctx.students.sessions("stu-2").fetch().await.data;
    assert_eq!(roster_ids(&after), vec!["stu-2", "stu-1"]);

    ctx.sessions.remove_student("s-1", "stu-1").await.unwrap();
    let removed = ctx.students.sessions("stu-2").fetch().await.data;
    assert_eq!(roster_ids(&removed), vec!["stu-2"]);
}

#[tokio::test]
async fn test_rename_refreshes_embedded_student_summaries() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    backend.add_session("s-1", at(2025, 3, 5, 9));
    let ctx = signed_in(&backend).await;
    ctx.sessions
        .add_student_to_sessions(&enrol("stu-1", &["s-1"]))
        .await
        .unwrap();
    let before = ctx.students.sessions("stu-1").fetch().await.data;
    assert_eq!(before[0].students[0].first_name, "Ada");

    ctx.students
        .update(
            "stu-1",
            &StudentUpdate {
                first_name: Some("Augusta".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let after = ctx.students.sessions("stu-1").fetch().await.data;
    assert_eq!(after[0].students[0].first_name, "Augusta");
}

#[tokio::test]
async fn test_rescheduling_refreshes_attendance_dates() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    backend.add_session("s-1", at(2025, 3, 5, 9));
    let ctx = signed_in(&backend).await;
    ctx.sessions
        .add_student_to_sessions(&enrol("stu-1", &["s-1"]))
        .await
        .unwrap();
    let attendance = ctx.students.attendance("stu-1", DateRange::default());
    assert_eq!(attendance.fetch().await.data[0].date, at(2025, 3, 5, 0).date());

    ctx.sessions
        .update(
            "s-1",
            &SessionUpdate {
                start: Some(at(2025, 3, 12, 9)),
                end: Some(at(2025, 3, 12, 10)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!ctx.client.is_fresh(attendance.key().unwrap()));
    assert_eq!(attendance.fetch().await.data[0].date, at(2025, 3, 12, 0).date());
}

#[tokio::test]
async fn test_delete_student_refreshes_rosters() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    backend.add_session("s-1", at(2025, 3, 5, 9));
    let ctx = signed_in(&backend).await;
    ctx.sessions
        .add_student_to_sessions(&AddStudentToSessions {
            student_id: "stu-1".to_string(),
            session_ids: vec!["s-1".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(ctx.sessions.roster("s-1").fetch().await.data.len(), 1);

    ctx.students.delete("stu-1").await.unwrap();

    assert!(ctx.sessions.roster("s-1").fetch().await.data.is_empty());
    assert!(ctx.students.list().fetch().await.data.is_empty());
}

#[tokio::test]
async fn test_read_failure_keeps_previous_data() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    let ctx = signed_in(&backend).await;
    ctx.students.list().fetch().await;

    backend.fail("list_students");
    let result = ctx.students.list().refetch().await;
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.error.as_deref(), Some("list_students is broken"));

    backend.recover("list_students");
    let result = ctx.students.list().fetch().await;
    assert!(result.error.is_none());
    assert_eq!(backend.calls("list_students"), 3);
}

#[tokio::test]
async fn test_logout_clears_cache() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    let ctx = signed_in(&backend).await;
    ctx.students.list().fetch().await;
    ctx.health.status().fetch().await;
    assert!(!ctx.client.is_empty());

    ctx.auth.logout().await.unwrap();

    assert!(ctx.client.is_empty());
    assert!(!ctx.auth.is_authenticated());
    assert!(!ctx.students.list().is_enabled());
    assert_eq!(backend.calls("logout"), 1);
}

#[tokio::test]
async fn test_switching_therapist_drops_previous_reads() {
    let backend = FakeBackend::new();
    backend.add_student("stu-1", "Ada");
    let ctx = signed_in(&backend).await;
    ctx.students.list().fetch().await;

    ctx.auth
        .login(&Credentials {
            email: "other@school.org".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(ctx.auth.therapist_id().as_deref(), Some("t-2"));
    assert!(ctx.client.is_empty());
    assert!(ctx.students.list().fetch().await.data.is_empty());
}

#[tokio::test]
async fn test_restore_without_session_stays_signed_out() {
    let backend = FakeBackend::new();
    let ctx = context(&backend);

    assert!(ctx.auth.restore().await.unwrap().is_none());
    assert!(!ctx.auth.is_authenticated());
    assert_eq!(backend.calls("restore"), 1);
}

#[tokio::test]
async fn test_health_is_readable_signed_out() {
    let backend = FakeBackend::new();
    let ctx = context(&backend);

    let status = ctx.health.status().fetch().await;
    assert_eq!(status.data.status, "ok");
    assert_eq!(backend.calls("health"), 1);
}

#[tokio::test]
async fn test_schools_by_district() {
    let backend = FakeBackend::new();
    let ctx = context(&backend);

    assert_eq!(ctx.schools.schools(None).fetch().await.data.len(), 2);
    let lakeside = ctx.schools.schools(Some("d-1")).fetch().await.data;
    assert_eq!(lakeside.len(), 1);
    assert_eq!(lakeside[0].name, "North Elementary");
    assert_eq!(backend.calls("list_schools"), 2);
}
