//! In-memory `StudentApi` double with per-operation failure injection.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use client_core::{ClientError, ClientResult, RawResponse, StatusCode, StudentApi};
use shared::domain::{Student, StudentDraft, StudentId, StudentPatch};

#[derive(Default)]
pub struct InMemoryStudentApi {
    pub students: Mutex<Vec<Student>>,
    next_id: Mutex<i64>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
    pub patches: Mutex<Vec<(StudentId, StudentPatch)>>,
}

impl InMemoryStudentApi {
    pub fn seeded(students: Vec<Student>) -> Arc<Self> {
        let next_id = students.iter().map(|s| s.id.0).max().unwrap_or(0);
        let api = Self::default();
        *api.students.lock().unwrap() = students;
        *api.next_id.lock().unwrap() = next_id;
        Arc::new(api)
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    fn check(&self, operation: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        if self.failing.lock().unwrap().contains(operation) {
            let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
            return Err(ClientError::Decode {
                endpoint: format!("/{operation}"),
                source,
            });
        }
        Ok(())
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    pub fn snapshot(&self) -> Vec<Student> {
        self.students.lock().unwrap().clone()
    }
}

fn ok_response(status: u16) -> RawResponse {
    RawResponse {
        status: StatusCode::from_u16(status).unwrap(),
        body: "{}".to_string(),
    }
}

#[async_trait]
impl StudentApi for InMemoryStudentApi {
    async fn list(&self) -> ClientResult<Vec<Student>> {
        self.check("list")?;
        Ok(self.snapshot())
    }

    async fn get_by_id(&self, id: StudentId) -> ClientResult<Student> {
        self.check("get_by_id")?;
        self.students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ClientError::NotFound(id))
    }

    async fn create(&self, draft: &StudentDraft) -> ClientResult<RawResponse> {
        self.check("create")?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        self.students.lock().unwrap().push(Student {
            id: StudentId(*next_id),
            name: draft.name.clone(),
            nic: draft.nic.clone(),
            course: draft.course.clone(),
            contact: draft.contact.clone(),
            created_at: Some("2024-06-01T00:00:00Z".to_string()),
            updated_at: Some("2024-06-01T00:00:00Z".to_string()),
        });
        Ok(ok_response(201))
    }

    async fn update(&self, id: StudentId, patch: &StudentPatch) -> ClientResult<RawResponse> {
        self.check("update")?;
        self.patches.lock().unwrap().push((id, patch.clone()));
        let mut students = self.students.lock().unwrap();
        let student = students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ClientError::NotFound(id))?;
        if let Some(name) = &patch.name {
            student.name = name.clone();
        }
        if let Some(nic) = &patch.nic {
            student.nic = nic.clone();
        }
        if let Some(course) = &patch.course {
            student.course = course.clone();
        }
        if let Some(contact) = &patch.contact {
            student.contact = contact.clone();
        }
        Ok(ok_response(200))
    }

    async fn delete(&self, id: StudentId) -> ClientResult<RawResponse> {
        self.check("delete")?;
        let mut students = self.students.lock().unwrap();
        let before = students.len();
        students.retain(|s| s.id != id);
        if students.len() == before {
            return Err(ClientError::NotFound(id));
        }
        Ok(ok_response(204))
    }
}
