//! Owned dashboard state mutated by the orchestration layer.

use shared::domain::{Student, StudentDraft, StudentId};

use crate::controller::alerts::AlertSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    AddOpen,
    EditOpen {
        target: StudentId,
    },
}

impl ModalState {
    pub fn is_open(self) -> bool {
        self != ModalState::Closed
    }

    pub fn edit_target(self) -> Option<StudentId> {
        match self {
            ModalState::EditOpen { target } => Some(target),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteConfirmation {
    #[default]
    Hidden,
    Pending(StudentId),
}

impl DeleteConfirmation {
    pub fn target(self) -> Option<StudentId> {
        match self {
            DeleteConfirmation::Pending(id) => Some(id),
            DeleteConfirmation::Hidden => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    /// Last successful listing; replaced wholesale on refresh.
    pub students: Vec<Student>,
    pub loading: bool,
    pub modal: ModalState,
    pub draft: StudentDraft,
    pub alert: AlertSlot,
    pub delete_confirmation: DeleteConfirmation,
}

impl DashboardState {
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }
}
