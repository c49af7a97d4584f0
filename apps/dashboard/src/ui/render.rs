//! Plain-text rendering of dashboard state.

use std::fmt::Write as _;

use shared::domain::{Student, StudentField};

use crate::controller::{
    events::{Alert, AlertKind},
    state::{DashboardState, DeleteConfirmation, ModalState},
};

const HEADERS: [&str; 5] = ["ID", "Name", "NIC", "Course", "Contact"];

pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();
    if let Some(alert) = state.alert.visible() {
        out.push_str(&render_alert(alert));
        out.push('\n');
    }

    out.push_str("Student Directory");
    if state.loading {
        out.push_str(" (loading...)");
    }
    out.push('\n');
    out.push_str(&render_table(&state.students));

    match state.modal {
        ModalState::Closed => {}
        ModalState::AddOpen => out.push_str(&render_form("Add New Student", state)),
        ModalState::EditOpen { target } => {
            out.push_str(&render_form(&format!("Edit Student #{target}"), state))
        }
    }

    if let DeleteConfirmation::Pending(id) = state.delete_confirmation {
        let _ = writeln!(
            out,
            "\nDelete Student #{id}: Are you sure you want to delete this student? \
             This action cannot be undone. [confirm/cancel]"
        );
    }
    out
}

pub fn render_alert(alert: &Alert) -> String {
    let marker = match alert.kind {
        AlertKind::Success => "[ok]",
        AlertKind::Error => "[error]",
        AlertKind::Info => "[info]",
    };
    match &alert.sub_message {
        Some(sub) => format!("{marker} {}: {sub}", alert.message),
        None => format!("{marker} {}", alert.message),
    }
}

pub fn render_table(students: &[Student]) -> String {
    if students.is_empty() {
        return "  No students found\n  Get started by adding your first student (`add`)\n"
            .to_string();
    }

    let rows: Vec<[String; 5]> = students
        .iter()
        .map(|s| {
            [
                format!("#{}", s.id),
                s.name.clone(),
                s.nic.clone(),
                s.course.clone(),
                s.contact.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "  {}", rule.join("  "));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "  {}", line.join("  ").trim_end());
}

fn render_form(title: &str, state: &DashboardState) -> String {
    let mut out = format!("\n{title}\n");
    for field in StudentField::ALL {
        let value = state.draft.get(field);
        let shown = if value.is_empty() { "<empty>" } else { value };
        let _ = writeln!(out, "  {:<8} {shown}", field.label());
    }
    out.push_str("  (set <field> <value>, save, cancel)\n");
    out
}

pub fn render_student(student: &Student) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Student #{}", student.id);
    for field in StudentField::ALL {
        let value = match field {
            StudentField::Name => &student.name,
            StudentField::Nic => &student.nic,
            StudentField::Course => &student.course,
            StudentField::Contact => &student.contact,
        };
        let _ = writeln!(out, "  {:<8} {value}", field.label());
    }
    if let Some(created) = &student.created_at {
        let _ = writeln!(out, "  {:<8} {created}", "Created");
    }
    if let Some(updated) = &student.updated_at {
        let _ = writeln!(out, "  {:<8} {updated}", "Updated");
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
