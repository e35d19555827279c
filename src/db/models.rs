// Row shapes as stored, converted into domain types at this boundary.

use color_eyre::eyre::{eyre, Report};

use crate::{
    models::{ClassicResult, Options, Question, Role, TestStatus, TraitResult, User},
    summary,
};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub full_name: String,
    pub birthdate: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = Report;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| eyre!("user {} has unknown role {:?}", row.id, row.role))?;

        Ok(User {
            id: row.id,
            full_name: row.full_name,
            birthdate: row.birthdate,
            role,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub created_at: String,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            question: row.question,
            options: Options {
                a: row.option_a,
                b: row.option_b,
                c: row.option_c,
                d: row.option_d,
            },
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct StatusRow {
    pub classic_done: bool,
    pub trait_done: bool,
}

impl From<StatusRow> for TestStatus {
    fn from(row: StatusRow) -> Self {
        TestStatus {
            classic_done: row.classic_done,
            trait_done: row.trait_done,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct ClassicRow {
    pub a_pct: i64,
    pub b_pct: i64,
    pub c_pct: i64,
    pub d_pct: i64,
}

impl From<ClassicRow> for ClassicResult {
    fn from(row: ClassicRow) -> Self {
        ClassicResult {
            a_pct: row.a_pct,
            b_pct: row.b_pct,
            c_pct: row.c_pct,
            d_pct: row.d_pct,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct TraitRow {
    pub strong: String,
    pub weak: String,
}

impl From<TraitRow> for TraitResult {
    fn from(row: TraitRow) -> Self {
        TraitResult {
            strong: summary::decode_trait_column(&row.strong),
            weak: summary::decode_trait_column(&row.weak),
        }
    }
}
