use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four answer slots every question carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::A => "a",
            Letter::B => "b",
            Letter::C => "c",
            Letter::D => "d",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Coach,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Coach => "coach",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Role::Student),
            "coach" => Some(Role::Coach),
            _ => None,
        }
    }
}

/// Which question collection a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    #[default]
    Classic,
    Trait,
}

impl Pool {
    pub fn table(self) -> &'static str {
        match self {
            Pool::Classic => "questions",
            Pool::Trait => "questions_set2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
}

impl Options {
    pub fn get(&self, letter: Letter) -> &str {
        match letter {
            Letter::A => &self.a,
            Letter::B => &self.b,
            Letter::C => &self.c,
            Letter::D => &self.d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub options: Options,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub options: Options,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub birthdate: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub birthdate: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestStatus {
    pub classic_done: bool,
    pub trait_done: bool,
}

/// Percentages per letter, as stored in `test_results_classic`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicResult {
    pub a_pct: i64,
    pub b_pct: i64,
    pub c_pct: i64,
    pub d_pct: i64,
}

impl ClassicResult {
    pub fn get(&self, letter: Letter) -> i64 {
        match letter {
            Letter::A => self.a_pct,
            Letter::B => self.b_pct,
            Letter::C => self.c_pct,
            Letter::D => self.d_pct,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitResult {
    pub strong: Vec<String>,
    pub weak: Vec<String>,
}

/// The user as carried between pages in `userId` / `fullName` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: i64,
    pub full_name: String,
}
