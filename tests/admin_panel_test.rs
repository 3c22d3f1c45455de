use std::sync::Arc;

use chrono::NaiveTime;

use regpanel::api::mock::FaultFlags;
use regpanel::api::{CourseApi, MockApi, PrerequisiteApi};
use regpanel::models::{CourseDraft, DayOfWeek, PrerequisiteDraft, UnitConfig};
use regpanel::panels::{CoursePanel, FormState, PrerequisitePanel, SettingsPanel, SubmitOutcome};
use regpanel::session::Session;
use regpanel::state::{LoadPlan, load_admin};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn draft(code: &str) -> CourseDraft {
    CourseDraft {
        code: code.to_string(),
        name: "Operating Systems".to_string(),
        units: 3,
        department: "Computer Science".to_string(),
        semester: "1403-1".to_string(),
        professor_name: "Dr. Navidi".to_string(),
        day_of_week: DayOfWeek::Tue,
        start_time: time(10, 0),
        end_time: time(11, 30),
        location: "Room 202".to_string(),
        capacity: 30,
    }
}

fn panel(api: Arc<MockApi>) -> CoursePanel<MockApi> {
    CoursePanel::new(api, Session::shared(), LoadPlan::full())
}

#[tokio::test]
async fn load_populates_snapshot_and_summary() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = panel(api);
    panel.load().await.unwrap();

    let summary = panel.summary();
    assert_eq!(summary.total_courses, 4);
    assert_eq!(summary.total_capacity, 155);
    assert_eq!(summary.total_enrolled, 110);

    assert_eq!(
        panel.departments(),
        vec!["Computer Science", "Mathematics", "Physics"]
    );
    assert_eq!(panel.semesters(), vec!["1403-1"]);
}

#[tokio::test]
async fn search_and_dropdown_filters() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = panel(api);
    panel.load().await.unwrap();

    panel.set_search("cs1");
    let codes: Vec<String> = panel.courses().into_iter().map(|c| c.code).collect();
    assert_eq!(codes, vec!["CS101", "CS102"]);

    panel.set_search("");
    panel.set_department_filter(Some("Chemistry".to_string()));
    assert!(panel.courses().is_empty());

    panel.set_department_filter(Some("Mathematics".to_string()));
    let courses = panel.courses();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].code, "MATH101");
}

#[tokio::test]
async fn duplicate_code_is_rejected_before_submission() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = panel(api.clone());
    panel.load().await.unwrap();

    panel.open_add();
    let outcome = panel.submit(draft("cs101")).await.unwrap();
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected field errors, got {outcome:?}");
    };
    assert!(errors.iter().any(|e| e.field == "course-code"));
    assert_eq!(api.calls().add_course, 0);

    // form stays open, carrying the errors
    assert!(matches!(panel.form(), FormState::Open { editing: None, .. }));
}

#[tokio::test]
async fn editing_a_course_does_not_collide_with_itself() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = panel(api.clone());
    panel.load().await.unwrap();

    assert!(panel.open_edit(1));
    let mut update = draft("cs101");
    update.name = "Intro to CS (revised)".to_string();
    let outcome = panel.submit(update).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(api.calls().update_course, 1);

    // reloaded snapshot reflects the edit
    let renamed = panel
        .courses()
        .into_iter()
        .find(|c| c.id == 1)
        .expect("course 1 present");
    assert_eq!(renamed.name, "Intro to CS (revised)");
}

#[tokio::test]
async fn add_then_delete_reload_the_snapshot() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = panel(api.clone());
    panel.load().await.unwrap();

    panel.open_add();
    let outcome = panel.submit(draft("CS301")).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(*panel.form(), FormState::Closed);

    let added = panel
        .courses()
        .into_iter()
        .find(|c| c.code == "CS301")
        .expect("freshly added course visible after reload");

    let prompt = panel.delete_prompt(added.id).expect("prompt for known id");
    assert!(prompt.contains("Operating Systems"));
    assert!(prompt.contains("CS301"));

    panel.delete(added.id).await.unwrap();
    assert!(panel.courses().iter().all(|c| c.code != "CS301"));
    assert!(panel.delete_prompt(added.id).is_none());
}

#[tokio::test]
async fn submit_without_an_open_form_is_blocked() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = panel(api.clone());
    panel.load().await.unwrap();

    let outcome = panel.submit(draft("CS301")).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Blocked);
    assert_eq!(api.calls().add_course, 0);
}

#[tokio::test]
async fn noncritical_collection_failure_degrades() {
    let api = Arc::new(MockApi::seeded());
    api.set_faults(FaultFlags {
        prerequisites: true,
        settings: true,
        ..FaultFlags::default()
    });

    let mut panel = panel(api.clone());
    panel.load().await.unwrap();

    // courses still present, the failed collections fell back to defaults
    assert_eq!(panel.summary().total_courses, 4);
    assert!(panel.snapshot().prerequisites.is_empty());
    assert_eq!(panel.snapshot().unit_config, UnitConfig::default());
}

#[tokio::test]
async fn courses_failure_is_a_hard_error() {
    let api = Arc::new(MockApi::seeded());
    api.set_faults(FaultFlags {
        courses: true,
        ..FaultFlags::default()
    });

    let mut panel = panel(api);
    assert!(panel.load().await.is_err());
}

#[tokio::test]
async fn stale_snapshot_commit_is_a_no_op() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = panel(api.clone());
    panel.load().await.unwrap();

    let stale = panel.begin_load();
    let _newer = panel.begin_load();

    // a late response carrying the stale token must not clobber state
    let late = load_admin(api.as_ref(), LoadPlan::courses_only()).await.unwrap();
    assert!(!panel.commit(stale, late));
    assert_eq!(panel.snapshot().prerequisites.len(), 2);

    // teardown invalidates even the newest token
    let token = panel.begin_load();
    panel.teardown();
    let late = load_admin(api.as_ref(), LoadPlan::full()).await.unwrap();
    assert!(!panel.commit(token, late));
}

#[tokio::test]
async fn active_tab_round_trips_through_the_session() {
    let api = Arc::new(MockApi::seeded());
    let panel = panel(api);

    assert_eq!(panel.active_tab(), "course-management");
    panel.set_active_tab("prerequisites");
    assert_eq!(panel.active_tab(), "prerequisites");
}

#[tokio::test]
async fn prerequisite_rows_resolve_course_names() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = PrerequisitePanel::new(api.clone());
    panel.load().await.unwrap();

    let rows = panel.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].target, "Advanced Programming");
    assert_eq!(rows[0].prerequisite, "Intro to Computer Science");

    // a dangling foreign key renders as the raw id instead of failing
    api.add_prerequisite(&PrerequisiteDraft {
        target_course_id: 1,
        prerequisite_course_id: 99,
    })
    .await
    .unwrap();
    panel.load().await.unwrap();
    let rows = panel.rows();
    assert_eq!(rows[2].prerequisite, "ID 99");
}

#[tokio::test]
async fn bad_prerequisite_edges_never_reach_the_api() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = PrerequisitePanel::new(api.clone());
    panel.load().await.unwrap();

    let outcome = panel
        .add(PrerequisiteDraft {
            target_course_id: 3,
            prerequisite_course_id: 3,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Rejected(_)), "got {outcome:?}");
    assert_eq!(api.calls().add_prerequisite, 0);

    // edge (2, 1) is already seeded
    let outcome = panel
        .add(PrerequisiteDraft {
            target_course_id: 2,
            prerequisite_course_id: 1,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Rejected(_)), "got {outcome:?}");
    assert_eq!(api.calls().add_prerequisite, 0);

    // the reversed pair is a different edge and goes through
    let outcome = panel
        .add(PrerequisiteDraft {
            target_course_id: 1,
            prerequisite_course_id: 2,
        })
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(api.calls().add_prerequisite, 1);
    assert_eq!(panel.rows().len(), 3);
}

#[tokio::test]
async fn prerequisite_delete_prompts_and_reloads() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = PrerequisitePanel::new(api);
    panel.load().await.unwrap();

    let prompt = panel.delete_prompt(1).expect("prompt for known edge");
    assert!(prompt.contains("Intro to Computer Science"));
    assert!(prompt.contains("Advanced Programming"));

    panel.delete(1).await.unwrap();
    assert_eq!(panel.rows().len(), 1);
    assert!(panel.delete_prompt(1).is_none());
}

#[tokio::test]
async fn settings_panel_validates_and_saves() {
    let api = Arc::new(MockApi::seeded());
    let mut panel = SettingsPanel::new(api.clone());
    panel.load().await.unwrap();
    assert_eq!(panel.config(), UnitConfig::default());

    let outcome = panel
        .save(UnitConfig {
            min_units: 20,
            max_units: 12,
        })
        .await
        .unwrap();
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected field errors, got {outcome:?}");
    };
    assert!(errors.iter().any(|e| e.field == "max-units"));
    // invalid input never reached the store
    assert_eq!(panel.config(), UnitConfig::default());

    let outcome = panel
        .save(UnitConfig {
            min_units: 14,
            max_units: 22,
        })
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(
        panel.config(),
        UnitConfig {
            min_units: 14,
            max_units: 22
        }
    );

    // a fresh load sees the saved policy
    let mut other = SettingsPanel::new(api);
    other.load().await.unwrap();
    assert_eq!(other.config().max_units, 22);
}

#[tokio::test]
async fn mock_course_crud_matches_backend_semantics() {
    let api = MockApi::seeded();

    let created = api.add_course(&draft("CS301")).await.unwrap();
    assert_eq!(created.id, 5);
    assert_eq!(created.enrolled, 0);

    let err = api.update_course(999, &draft("CS999")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let err = api.delete_course(999).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
