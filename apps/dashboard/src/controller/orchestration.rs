//! Sequencing of data access calls, cache refresh, and user feedback.

use client_core::{ClientError, ClientResult, RawResponse, StudentApi};
use shared::domain::{Student, StudentDraft, StudentField, StudentId, StudentPatch};
use tracing::{debug, error, info, warn};

use crate::controller::{
    alerts::AlertScheduler,
    events::{AlertKind, UiEvent},
    state::{DashboardState, DeleteConfirmation, ModalState},
};

const ERROR_TITLE: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Refresh,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Refresh => "refresh",
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn success_alert(self) -> Option<(&'static str, &'static str)> {
        match self {
            Operation::Create => Some((
                "Student Added",
                "New student has been successfully added.",
            )),
            Operation::Update => Some((
                "Student Updated",
                "Student details have been successfully updated.",
            )),
            Operation::Delete => Some((
                "Student Deleted",
                "Student has been successfully removed.",
            )),
            Operation::Refresh | Operation::Fetch => None,
        }
    }

    /// Refresh failures are logged only.
    fn failure_message(self) -> Option<&'static str> {
        match self {
            Operation::Fetch => Some("Failed to load student."),
            Operation::Create => Some("Failed to add student."),
            Operation::Update => Some("Failed to update student."),
            Operation::Delete => Some("Failed to delete student."),
            Operation::Refresh => None,
        }
    }
}

/// Network work an intent needs, built from state by the `begin_*` methods.
#[derive(Debug, Clone)]
pub enum Request {
    Refresh,
    Fetch(StudentId),
    Create(StudentDraft),
    Update(StudentId, StudentPatch),
    Delete(StudentId),
}

/// Outcome of a [`Request`]. Mutations carry the re-list that follows a success.
#[derive(Debug)]
pub enum Completion {
    Refreshed(ClientResult<Vec<Student>>),
    Fetched(StudentId, ClientResult<Student>),
    Created {
        outcome: ClientResult<RawResponse>,
        reloaded: Option<ClientResult<Vec<Student>>>,
    },
    Updated {
        id: StudentId,
        outcome: ClientResult<RawResponse>,
        reloaded: Option<ClientResult<Vec<Student>>>,
    },
    Deleted {
        id: StudentId,
        outcome: ClientResult<RawResponse>,
        reloaded: Option<ClientResult<Vec<Student>>>,
    },
}

pub struct Orchestrator<A> {
    api: A,
    alerts: AlertScheduler,
}

/// Awaited forms of each operation, for callers that run one request at a time.
#[allow(dead_code)]
impl<A: StudentApi> Orchestrator<A> {
    /// Re-lists students. Failures keep the previous cache and raise no alert.
    pub async fn refresh(&self, state: &mut DashboardState) {
        let request = self.begin_refresh(state);
        self.settle(state, request).await;
    }

    pub async fn submit_create(&self, state: &mut DashboardState) {
        let request = self.begin_create(state);
        self.settle(state, request).await;
    }

    /// Sends the full draft for the student being edited. Without an edit target this is a
    /// no-op.
    pub async fn submit_update(&self, state: &mut DashboardState) {
        if let Some(request) = self.begin_update(state) {
            self.settle(state, request).await;
        }
    }

    /// Deletes the pending target. The confirmation closes whatever the outcome.
    pub async fn confirm_delete(&self, state: &mut DashboardState) {
        if let Some(request) = self.begin_delete(state) {
            self.settle(state, request).await;
        }
    }

    /// Loads the server copy of a single student. Does not touch the cache.
    pub async fn fetch_student(
        &self,
        state: &mut DashboardState,
        id: StudentId,
    ) -> Option<Student> {
        let request = self.begin_fetch(state, id);
        self.settle(state, request).await
    }

    /// Runs a request to completion on the calling flow.
    pub async fn settle(&self, state: &mut DashboardState, request: Request) -> Option<Student> {
        let completion = self.perform(request).await;
        self.complete(state, completion)
    }
}

impl<A: StudentApi> Orchestrator<A> {
    pub fn new(api: A, alerts: AlertScheduler) -> Self {
        Self { api, alerts }
    }

    pub fn begin_refresh(&self, state: &mut DashboardState) -> Request {
        state.loading = true;
        Request::Refresh
    }

    pub fn begin_fetch(&self, state: &mut DashboardState, id: StudentId) -> Request {
        state.loading = true;
        Request::Fetch(id)
    }

    /// Submits the current draft as is.
    pub fn begin_create(&self, state: &mut DashboardState) -> Request {
        state.loading = true;
        Request::Create(state.draft.clone())
    }

    pub fn begin_update(&self, state: &mut DashboardState) -> Option<Request> {
        let Some(id) = state.modal.edit_target() else {
            debug!("update submitted without a selected student; ignoring");
            return None;
        };
        state.loading = true;
        Some(Request::Update(id, StudentPatch::from(state.draft.clone())))
    }

    pub fn begin_delete(&self, state: &mut DashboardState) -> Option<Request> {
        let Some(id) = state.delete_confirmation.target() else {
            debug!("delete confirmed without a pending target; ignoring");
            return None;
        };
        state.loading = true;
        Some(Request::Delete(id))
    }

    /// Runs the api calls for a request. Reads no dashboard state.
    pub async fn perform(&self, request: Request) -> Completion {
        match request {
            Request::Refresh => Completion::Refreshed(self.api.list().await),
            Request::Fetch(id) => Completion::Fetched(id, self.api.get_by_id(id).await),
            Request::Create(draft) => {
                let outcome = self.api.create(&draft).await;
                let reloaded = self.reload_after(&outcome).await;
                Completion::Created { outcome, reloaded }
            }
            Request::Update(id, patch) => {
                let outcome = self.api.update(id, &patch).await;
                let reloaded = self.reload_after(&outcome).await;
                Completion::Updated {
                    id,
                    outcome,
                    reloaded,
                }
            }
            Request::Delete(id) => {
                let outcome = self.api.delete(id).await;
                let reloaded = self.reload_after(&outcome).await;
                Completion::Deleted {
                    id,
                    outcome,
                    reloaded,
                }
            }
        }
    }

    /// Applies a finished request and clears the loading flag. Returns the student for a
    /// successful fetch.
    pub fn complete(&self, state: &mut DashboardState, completion: Completion) -> Option<Student> {
        state.loading = false;
        match completion {
            Completion::Refreshed(result) => {
                replace_cache(state, Some(result));
                None
            }
            Completion::Fetched(id, result) => match result {
                Ok(student) => Some(student),
                Err(err) => {
                    log_failure(Operation::Fetch, Some(id), &err);
                    self.notify_failure(state, Operation::Fetch);
                    None
                }
            },
            Completion::Created { outcome, reloaded } => {
                match outcome {
                    Ok(response) => {
                        info!(status = response.status.as_u16(), "student created");
                        self.close_modal(state);
                        replace_cache(state, reloaded);
                        self.notify_success(state, Operation::Create);
                    }
                    Err(err) => {
                        log_failure(Operation::Create, None, &err);
                        self.notify_failure(state, Operation::Create);
                    }
                }
                None
            }
            Completion::Updated {
                id,
                outcome,
                reloaded,
            } => {
                match outcome {
                    Ok(response) => {
                        info!(
                            student_id = id.0,
                            status = response.status.as_u16(),
                            "student updated"
                        );
                        self.close_modal(state);
                        replace_cache(state, reloaded);
                        self.notify_success(state, Operation::Update);
                    }
                    Err(err) => {
                        log_failure(Operation::Update, Some(id), &err);
                        self.notify_failure(state, Operation::Update);
                    }
                }
                None
            }
            Completion::Deleted {
                id,
                outcome,
                reloaded,
            } => {
                state.delete_confirmation = DeleteConfirmation::Hidden;
                match outcome {
                    Ok(response) => {
                        info!(
                            student_id = id.0,
                            status = response.status.as_u16(),
                            "student deleted"
                        );
                        replace_cache(state, reloaded);
                        self.notify_success(state, Operation::Delete);
                    }
                    Err(err) => {
                        log_failure(Operation::Delete, Some(id), &err);
                        self.notify_failure(state, Operation::Delete);
                    }
                }
                None
            }
        }
    }

    async fn reload_after<T>(
        &self,
        outcome: &ClientResult<T>,
    ) -> Option<ClientResult<Vec<Student>>> {
        match outcome {
            Ok(_) => Some(self.api.list().await),
            Err(_) => None,
        }
    }

    pub fn open_add(&self, state: &mut DashboardState) -> bool {
        if state.modal.is_open() {
            warn!(modal = ?state.modal, "add requested while a modal is open; close it first");
            return false;
        }
        state.modal = ModalState::AddOpen;
        true
    }

    /// Opens the edit modal on the cached row, which may be stale.
    pub fn begin_edit(&self, state: &mut DashboardState, student: &Student) -> bool {
        if state.modal.is_open() {
            warn!(modal = ?state.modal, "edit requested while a modal is open; close it first");
            return false;
        }
        state.draft = student.draft();
        state.modal = ModalState::EditOpen { target: student.id };
        true
    }

    /// Cancel path for both modals. Discards the draft.
    pub fn close_modal(&self, state: &mut DashboardState) {
        state.modal = ModalState::Closed;
        state.draft = StudentDraft::default();
    }

    pub fn set_field(&self, state: &mut DashboardState, field: StudentField, value: &str) {
        state.draft.set(field, value);
    }

    pub fn request_delete(&self, state: &mut DashboardState, id: StudentId) {
        state.delete_confirmation = DeleteConfirmation::Pending(id);
    }

    pub fn cancel_delete(&self, state: &mut DashboardState) {
        state.delete_confirmation = DeleteConfirmation::Hidden;
    }

    pub fn show_alert(
        &self,
        state: &mut DashboardState,
        kind: AlertKind,
        message: impl Into<String>,
        sub_message: Option<String>,
    ) {
        let id = state.alert.show(&self.alerts, kind, message, sub_message);
        debug!(alert_id = id.0, %kind, "alert shown");
    }

    pub fn dismiss_alert(&self, state: &mut DashboardState) {
        state.alert.dismiss();
    }

    pub fn handle_event(&self, state: &mut DashboardState, event: UiEvent) {
        match event {
            UiEvent::AlertExpired(id) => {
                if !state.alert.expire(id) {
                    debug!(alert_id = id.0, "ignoring stale alert expiry");
                }
            }
        }
    }

    fn notify_success(&self, state: &mut DashboardState, operation: Operation) {
        if let Some((message, sub_message)) = operation.success_alert() {
            self.show_alert(
                state,
                AlertKind::Success,
                message,
                Some(sub_message.to_string()),
            );
        }
    }

    fn notify_failure(&self, state: &mut DashboardState, operation: Operation) {
        if let Some(detail) = operation.failure_message() {
            self.notify_error(state, detail);
        }
    }

    /// Shows the generic error alert with `detail` underneath.
    pub fn notify_error(&self, state: &mut DashboardState, detail: impl Into<String>) {
        self.show_alert(state, AlertKind::Error, ERROR_TITLE, Some(detail.into()));
    }
}

fn replace_cache(state: &mut DashboardState, reloaded: Option<ClientResult<Vec<Student>>>) {
    match reloaded {
        Some(Ok(students)) => {
            debug!(count = students.len(), "student cache replaced");
            state.students = students;
        }
        Some(Err(err)) => log_failure(Operation::Refresh, None, &err),
        None => {}
    }
}

fn log_failure(operation: Operation, id: Option<StudentId>, err: &ClientError) {
    let student_id = id.map(|id| id.0);
    let category = err.category().as_str();
    match operation {
        Operation::Refresh => warn!(
            operation = operation.as_str(),
            category,
            error = %err,
            "error loading students; keeping previous list"
        ),
        _ => error!(
            operation = operation.as_str(),
            student_id,
            category,
            error = %err,
            "student api call failed"
        ),
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
