//! Interactive dashboard: reads intents line by line and re-renders after each one.

use std::{future::Future, pin::Pin};

use client_core::StudentApi;
use shared::validation::validate_draft;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};
use tracing::debug;

use crate::{
    controller::{
        alerts::AlertScheduler,
        events::{AlertKind, UiEvent},
        orchestration::{Completion, Orchestrator, Request},
        state::{DashboardState, ModalState},
    },
    ui::{
        commands::{parse_command, UiCommand, HELP},
        render::{render_dashboard, render_student},
    },
};

const PROMPT: &str = "students> ";
const BUSY: &str = "A request is still in progress; try again shortly.";

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What remains of a command once its local part has been applied.
enum Step {
    Done(Option<String>),
    Request(Request),
    Quit,
}

type InFlight<'a> = Pin<Box<dyn Future<Output = Completion> + 'a>>;

pub struct DashboardApp<A> {
    orchestrator: Orchestrator<A>,
    state: DashboardState,
    events: mpsc::UnboundedReceiver<UiEvent>,
}

impl<A: StudentApi> DashboardApp<A> {
    pub fn new(api: A) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        Self {
            orchestrator: Orchestrator::new(api, AlertScheduler::new(tx)),
            state: DashboardState::default(),
            events,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Drives the dashboard until `quit` or end of input. At most one request is in flight;
    /// input and alert expiry keep being handled while it runs.
    pub async fn run<R, W>(self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let Self {
            orchestrator,
            mut state,
            mut events,
        } = self;

        let request = orchestrator.begin_refresh(&mut state);
        let mut in_flight = Some(start(&orchestrator, request));
        write_screen(&mut output, &render_dashboard(&state)).await?;

        let mut lines = input.lines();
        let mut input_open = true;
        loop {
            tokio::select! {
                biased;

                completion = next_completion(&mut in_flight) => {
                    in_flight = None;
                    let detail = orchestrator.complete(&mut state, completion);
                    let extra = detail.as_ref().map(render_student);
                    write_screen(&mut output, &screen_with(&state, extra)).await?;
                    if !input_open {
                        break;
                    }
                }
                Some(event) = events.recv() => {
                    let was_visible = state.alert.is_visible();
                    orchestrator.handle_event(&mut state, event);
                    if was_visible && !state.alert.is_visible() {
                        write_screen(&mut output, &render_dashboard(&state)).await?;
                    }
                }
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        if in_flight.is_none() {
                            break;
                        }
                        continue;
                    };
                    match step_line(&orchestrator, &mut state, &line) {
                        Step::Quit => break,
                        Step::Done(extra) => {
                            write_screen(&mut output, &screen_with(&state, extra)).await?;
                        }
                        Step::Request(request) => {
                            in_flight = Some(start(&orchestrator, request));
                            write_screen(&mut output, &render_dashboard(&state)).await?;
                        }
                    }
                }
            }
        }
        output.flush().await?;
        Ok(())
    }

    /// Applies one line and waits for any request it starts.
    #[cfg(test)]
    pub async fn handle_line(&mut self, line: &str) -> (Flow, Option<String>) {
        let step = step_line(&self.orchestrator, &mut self.state, line);
        self.finish(step).await
    }

    #[cfg(test)]
    pub async fn dispatch(&mut self, command: UiCommand) -> (Flow, Option<String>) {
        let step = apply(&self.orchestrator, &mut self.state, command);
        self.finish(step).await
    }

    #[cfg(test)]
    async fn finish(&mut self, step: Step) -> (Flow, Option<String>) {
        match step {
            Step::Done(extra) => (Flow::Continue, extra),
            Step::Quit => (Flow::Quit, None),
            Step::Request(request) => {
                let detail = self.orchestrator.settle(&mut self.state, request).await;
                (Flow::Continue, detail.as_ref().map(render_student))
            }
        }
    }
}

fn start<'a, A: StudentApi + 'a>(
    orchestrator: &'a Orchestrator<A>,
    request: Request,
) -> InFlight<'a> {
    debug!(?request, "request started");
    Box::pin(orchestrator.perform(request))
}

async fn next_completion(in_flight: &mut Option<InFlight<'_>>) -> Completion {
    match in_flight {
        Some(request) => request.as_mut().await,
        None => std::future::pending().await,
    }
}

fn step_line<A: StudentApi>(
    orchestrator: &Orchestrator<A>,
    state: &mut DashboardState,
    line: &str,
) -> Step {
    match parse_command(line) {
        Ok(Some(command)) => apply(orchestrator, state, command),
        Ok(None) => Step::Done(None),
        Err(message) => Step::Done(Some(message)),
    }
}

fn apply<A: StudentApi>(
    orchestrator: &Orchestrator<A>,
    state: &mut DashboardState,
    command: UiCommand,
) -> Step {
    debug!(command = command.name(), "dispatching ui command");
    if command.waits_for_idle() && state.loading {
        return Step::Done(Some(BUSY.to_string()));
    }

    match command {
        UiCommand::List => return Step::Request(orchestrator.begin_refresh(state)),
        UiCommand::Show(id) => return Step::Request(orchestrator.begin_fetch(state, id)),
        UiCommand::Add => {
            if !orchestrator.open_add(state) {
                info(orchestrator, state, "Close the open form first.");
            }
        }
        UiCommand::Edit(id) => match state.student(id).cloned() {
            Some(student) => {
                if !orchestrator.begin_edit(state, &student) {
                    info(orchestrator, state, "Close the open form first.");
                }
            }
            None => info(orchestrator, state, format!("Student #{id} is not in the list.")),
        },
        UiCommand::Set { field, value } => {
            if state.modal.is_open() {
                orchestrator.set_field(state, field, &value);
            } else {
                info(
                    orchestrator,
                    state,
                    "Open a form with `add` or `edit <id>` first.",
                );
            }
        }
        UiCommand::Save => return save(orchestrator, state),
        UiCommand::Cancel => {
            if state.delete_confirmation.target().is_some() {
                orchestrator.cancel_delete(state);
            } else {
                orchestrator.close_modal(state);
            }
        }
        UiCommand::Delete(id) => {
            if state.student(id).is_some() {
                orchestrator.request_delete(state, id);
            } else {
                info(orchestrator, state, format!("Student #{id} is not in the list."));
            }
        }
        UiCommand::Confirm => {
            if let Some(request) = orchestrator.begin_delete(state) {
                return Step::Request(request);
            }
        }
        UiCommand::Dismiss => orchestrator.dismiss_alert(state),
        UiCommand::Help => return Step::Done(Some(HELP.to_string())),
        UiCommand::Quit => return Step::Quit,
    }
    Step::Done(None)
}

/// Applies the form rules before submitting whichever form is open.
fn save<A: StudentApi>(orchestrator: &Orchestrator<A>, state: &mut DashboardState) -> Step {
    let modal = state.modal;
    if modal == ModalState::Closed {
        info(orchestrator, state, "There is no open form to save.");
        return Step::Done(None);
    }

    if let Err(err) = validate_draft(&state.draft) {
        debug!(fields = ?err.fields().collect::<Vec<_>>(), "draft rejected by form rules");
        orchestrator.notify_error(state, err.summary());
        return Step::Done(None);
    }

    let request = match modal {
        ModalState::AddOpen => Some(orchestrator.begin_create(state)),
        ModalState::EditOpen { .. } => orchestrator.begin_update(state),
        ModalState::Closed => None,
    };
    match request {
        Some(request) => Step::Request(request),
        None => Step::Done(None),
    }
}

fn info<A: StudentApi>(
    orchestrator: &Orchestrator<A>,
    state: &mut DashboardState,
    message: impl Into<String>,
) {
    orchestrator.show_alert(state, AlertKind::Info, message, None);
}

fn screen_with(state: &DashboardState, extra: Option<String>) -> String {
    let screen = render_dashboard(state);
    match extra {
        Some(extra) => format!("{extra}\n{screen}"),
        None => screen,
    }
}

async fn write_screen<W: AsyncWrite + Unpin>(output: &mut W, screen: &str) -> std::io::Result<()> {
    output.write_all(screen.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
