use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().trim_start_matches('#').parse::<i64>().map(Self)
            }
        }
    };
}

id_newtype!(StudentId);

/// A student record as held by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub nic: String,
    pub course: String,
    pub contact: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Student {
    /// Projection onto the editable fields.
    pub fn draft(&self) -> StudentDraft {
        StudentDraft {
            name: self.name.clone(),
            nic: self.nic.clone(),
            course: self.course.clone(),
            contact: self.contact.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentField {
    Name,
    Nic,
    Course,
    Contact,
}

impl StudentField {
    pub const ALL: [StudentField; 4] = [
        StudentField::Name,
        StudentField::Nic,
        StudentField::Course,
        StudentField::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StudentField::Name => "Name",
            StudentField::Nic => "NIC",
            StudentField::Course => "Course",
            StudentField::Contact => "Contact",
        }
    }
}

impl fmt::Display for StudentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StudentField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(StudentField::Name),
            "nic" => Ok(StudentField::Nic),
            "course" => Ok(StudentField::Course),
            "contact" => Ok(StudentField::Contact),
            other => Err(format!("unknown field `{other}`")),
        }
    }
}

/// Client-only form state for a student that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub nic: String,
    pub course: String,
    pub contact: String,
}

impl StudentDraft {
    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::Name => &self.name,
            StudentField::Nic => &self.nic,
            StudentField::Course => &self.course,
            StudentField::Contact => &self.contact,
        }
    }

    pub fn set(&mut self, field: StudentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            StudentField::Name => self.name = value,
            StudentField::Nic => self.nic = value,
            StudentField::Course => self.course = value,
            StudentField::Contact => self.contact = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Subset of editable fields sent by a partial update. Absent fields are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }

    /// Provided fields with their values, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (StudentField, &str)> {
        [
            (StudentField::Name, self.name.as_deref()),
            (StudentField::Nic, self.nic.as_deref()),
            (StudentField::Course, self.course.as_deref()),
            (StudentField::Contact, self.contact.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
    }
}

impl From<StudentDraft> for StudentPatch {
    fn from(draft: StudentDraft) -> Self {
        Self {
            name: Some(draft.name),
            nic: Some(draft.nic),
            course: Some(draft.course),
            contact: Some(draft.contact),
        }
    }
}
