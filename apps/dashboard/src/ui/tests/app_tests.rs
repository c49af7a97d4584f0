use super::*;
use crate::test_support::InMemoryStudentApi;
use async_trait::async_trait;
use client_core::{ClientResult, RawResponse};
use shared::domain::{Student, StudentDraft, StudentId, StudentPatch};
use std::{sync::Arc, time::Duration};

type TestApp = DashboardApp<Arc<InMemoryStudentApi>>;

/// Delegates to the in-memory api but holds every delete for `delay`.
struct SlowDeletes {
    inner: Arc<InMemoryStudentApi>,
    delay: Duration,
}

#[async_trait]
impl StudentApi for SlowDeletes {
    async fn list(&self) -> ClientResult<Vec<Student>> {
        self.inner.list().await
    }

    async fn get_by_id(&self, id: StudentId) -> ClientResult<Student> {
        self.inner.get_by_id(id).await
    }

    async fn create(&self, draft: &StudentDraft) -> ClientResult<RawResponse> {
        self.inner.create(draft).await
    }

    async fn update(&self, id: StudentId, patch: &StudentPatch) -> ClientResult<RawResponse> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: StudentId) -> ClientResult<RawResponse> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete(id).await
    }
}

async fn run_slow(
    students: Vec<Student>,
    delay: Duration,
    input: &[u8],
) -> (Arc<InMemoryStudentApi>, Vec<String>) {
    let api = InMemoryStudentApi::seeded(students);
    let app = DashboardApp::new(SlowDeletes {
        inner: api.clone(),
        delay,
    });
    let mut output = Vec::new();

    app.run(input, &mut output).await.expect("run");

    let screen = String::from_utf8(output).expect("utf8");
    let frames = screen.split(PROMPT).map(str::to_string).collect();
    (api, frames)
}

fn student(id: i64, name: &str) -> Student {
    Student {
        id: StudentId(id),
        name: name.to_string(),
        nic: "123456789V".to_string(),
        course: "Software Engineering".to_string(),
        contact: "0712345678".to_string(),
        created_at: None,
        updated_at: None,
    }
}

async fn app_with(students: Vec<Student>) -> (Arc<InMemoryStudentApi>, TestApp) {
    let api = InMemoryStudentApi::seeded(students);
    let mut app = DashboardApp::new(api.clone());
    app.dispatch(UiCommand::List).await;
    (api, app)
}

async fn type_lines(app: &mut TestApp, lines: &[&str]) {
    for line in lines {
        let (flow, _) = app.handle_line(line).await;
        assert_eq!(flow, Flow::Continue, "unexpected quit on `{line}`");
    }
}

#[tokio::test]
async fn add_flow_creates_student_and_refreshes() {
    let (api, mut app) = app_with(vec![student(1, "Amaya")]).await;

    type_lines(
        &mut app,
        &[
            "add",
            "set name Kasun Silva",
            "set nic 200012345678",
            "set course Data Science",
            "set contact 0771234567",
            "save",
        ],
    )
    .await;

    assert_eq!(api.snapshot().len(), 2);
    assert_eq!(app.state().students.len(), 2);
    assert_eq!(app.state().modal, ModalState::Closed);
    assert_eq!(
        app.state().alert.visible().map(|a| a.message.as_str()),
        Some("Student Added")
    );
}

#[tokio::test]
async fn invalid_draft_is_not_submitted() {
    let (api, mut app) = app_with(Vec::new()).await;

    type_lines(
        &mut app,
        &["add", "set name Kasun", "set nic 12345678V", "set course CS", "save"],
    )
    .await;

    assert_eq!(api.calls_to("create"), 0);
    assert_eq!(app.state().modal, ModalState::AddOpen);
    assert_eq!(app.state().draft.nic, "12345678V");
    let alert = app.state().alert.visible().expect("alert");
    assert_eq!(alert.kind, AlertKind::Error);
    assert_eq!(alert.message, "Error");
    let detail = alert.sub_message.as_deref().unwrap_or_default();
    assert!(detail.contains("valid NIC"), "{detail}");
    assert!(detail.contains("Contact is required"), "{detail}");
}

#[tokio::test]
async fn edit_flow_sends_full_draft() {
    let (api, mut app) = app_with(vec![student(1, "Amaya"), student(2, "Nimal")]).await;

    type_lines(&mut app, &["edit 2", "set course Physics", "save"]).await;

    let patches = api.patches.lock().unwrap().clone();
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].0, StudentId(2));
    assert_eq!(patches[0].1.name.as_deref(), Some("Nimal"));
    assert_eq!(patches[0].1.course.as_deref(), Some("Physics"));
    assert_eq!(
        app.state().student(StudentId(2)).map(|s| s.course.as_str()),
        Some("Physics")
    );
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let (api, mut app) = app_with(vec![student(1, "Amaya"), student(2, "Nimal")]).await;

    type_lines(&mut app, &["delete 1", "cancel"]).await;
    assert_eq!(api.calls_to("delete"), 0);

    type_lines(&mut app, &["delete 1", "confirm"]).await;
    assert_eq!(api.calls_to("delete"), 1);
    assert!(app.state().student(StudentId(1)).is_none());
}

#[tokio::test]
async fn unknown_rows_and_closed_forms_raise_info_alerts() {
    let (_api, mut app) = app_with(vec![student(1, "Amaya")]).await;

    type_lines(&mut app, &["edit 5"]).await;
    assert_eq!(
        app.state().alert.visible().map(|a| (a.kind, a.message.clone())),
        Some((AlertKind::Info, "Student #5 is not in the list.".to_string()))
    );

    type_lines(&mut app, &["set name Nobody"]).await;
    assert!(app.state().draft.is_empty());

    type_lines(&mut app, &["save"]).await;
    assert_eq!(
        app.state().alert.visible().map(|a| a.message.as_str()),
        Some("There is no open form to save.")
    );
}

#[tokio::test(start_paused = true)]
async fn requests_in_flight_show_loading_and_refuse_new_requests() {
    let (api, frames) = run_slow(
        vec![student(1, "Amaya"), student(2, "Nimal")],
        Duration::from_millis(300),
        b"delete 1\nconfirm\ndelete 2\nlist\n",
    )
    .await;

    assert!(
        frames
            .iter()
            .any(|f| f.contains("(loading...)") && f.contains("Delete Student #1")),
        "no frame showed the delete in flight"
    );
    assert_eq!(frames.iter().filter(|f| f.contains(BUSY)).count(), 2);
    assert_eq!(api.calls_to("delete"), 1);
    assert_eq!(api.calls_to("list"), 2, "initial load plus reload after delete");

    let last = frames.iter().rev().find(|f| !f.is_empty()).expect("final frame");
    assert!(!last.contains("(loading...)"), "{last}");
    assert!(last.contains("Student Deleted"), "{last}");
    let remaining: Vec<_> = api.snapshot().into_iter().map(|s| s.id).collect();
    assert_eq!(remaining, vec![StudentId(2)]);
}

#[tokio::test(start_paused = true)]
async fn alerts_expire_while_a_request_is_in_flight() {
    let (_api, frames) = run_slow(
        vec![student(1, "Amaya")],
        Duration::from_secs(5),
        b"edit 9\ndelete 1\nconfirm\n",
    )
    .await;

    assert!(frames
        .iter()
        .any(|f| f.contains("(loading...)") && f.contains("[info]")));
    assert!(
        frames
            .iter()
            .any(|f| f.contains("(loading...)") && !f.contains("[info]")),
        "info alert was not hidden before the delete finished"
    );
}

#[tokio::test]
async fn show_renders_server_copy() {
    let (_api, mut app) = app_with(vec![student(3, "Amaya")]).await;

    let (_, detail) = app.handle_line("show 3").await;
    assert!(detail.expect("detail").contains("Student #3"));
}

#[tokio::test]
async fn run_loop_renders_until_quit() {
    let api = InMemoryStudentApi::seeded(vec![student(1, "Amaya")]);
    let app = DashboardApp::new(api.clone());
    let input: &[u8] = b"add\nset name Kasun Silva\nset nic 200012345678\nset course Data Science\nset contact 0771234567\nsave\nquit\nlist\n";
    let mut output = Vec::new();

    app.run(input, &mut output).await.expect("run");

    let screen = String::from_utf8(output).expect("utf8");
    assert!(screen.contains("Student Directory"));
    assert!(screen.contains("Student Added"));
    assert!(screen.contains("Kasun Silva"));
    assert_eq!(api.calls_to("list"), 2, "commands after quit are not read");
}
