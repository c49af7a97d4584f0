use serde::{Deserialize, Serialize};

use crate::domain::Student;

/// Response body of the read endpoints: a `[status, students]` pair.
///
/// Decoding is strict. Anything other than a two-element array whose second element is a
/// student sequence is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Vec<Student>)", into = "(String, Vec<Student>)")]
pub struct StudentEnvelope {
    pub status: String,
    pub students: Vec<Student>,
}

impl From<(String, Vec<Student>)> for StudentEnvelope {
    fn from((status, students): (String, Vec<Student>)) -> Self {
        Self { status, students }
    }
}

impl From<StudentEnvelope> for (String, Vec<Student>) {
    fn from(value: StudentEnvelope) -> Self {
        (value.status, value.students)
    }
}

impl StudentEnvelope {
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn into_first(self) -> Option<Student> {
        self.students.into_iter().next()
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
