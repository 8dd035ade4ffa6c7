// src/models/student.rs
use serde::{Deserialize, Serialize};

/// Student record as returned by `GET /api/students/{id}/details/`.
/// Read-only from the view's perspective; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub user: Person,
    pub course: Course,
    pub section: Section,
}

// Name block shared by students and mentors (the backend nests a `user` object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub mentor: Mentor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub user: Person,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Student {
    pub fn full_name(&self) -> String {
        self.user.full_name()
    }

    pub fn mentor_name(&self) -> String {
        self.section.mentor.user.full_name()
    }
}
