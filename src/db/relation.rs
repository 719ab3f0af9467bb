//! Hiring relation repository for tutorlink.
//!
//! A relation is the pair `(student_id, tutor_id)`. Accounts are referenced
//! by id only; rows whose endpoint has been deleted are left in place and
//! skipped by the join-based reads.

use super::account::{Account, AccountRef, Variant};
use super::repository::{select_columns, AccountRow};
use super::DbPool;
use crate::Result;

/// The fact that a student has hired a tutor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HiringRelation {
    /// Hiring student.
    pub student_id: i64,
    /// Hired tutor.
    pub tutor_id: i64,
}

impl HiringRelation {
    /// Create a relation value for the given pair.
    pub fn new(student_id: i64, tutor_id: i64) -> Self {
        Self {
            student_id,
            tutor_id,
        }
    }

    /// Build the relation joining two accounts, if they are of different
    /// variants.
    pub fn between(a: AccountRef, b: AccountRef) -> Option<Self> {
        if b.variant != a.variant.counterpart() {
            return None;
        }
        match a.variant {
            Variant::Student => Some(Self::new(a.id, b.id)),
            Variant::Tutor => Some(Self::new(b.id, a.id)),
        }
    }

    /// The student endpoint.
    pub fn student(&self) -> AccountRef {
        AccountRef::student(self.student_id)
    }

    /// The tutor endpoint.
    pub fn tutor(&self) -> AccountRef {
        AccountRef::tutor(self.tutor_id)
    }

    /// Whether `account` is one of the two parties.
    pub fn involves(&self, account: AccountRef) -> bool {
        account == self.student() || account == self.tutor()
    }
}

/// Repository for hiring relation rows.
pub struct RelationRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> RelationRepository<'a> {
    /// Create a new RelationRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a relation unless it already exists.
    ///
    /// Returns true if a row was written. Nothing is written when either
    /// account is missing; the endpoint checks, the duplicate check and
    /// the insert are one statement.
    pub async fn insert(&self, relation: HiringRelation) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO hiring_relations (student_id, tutor_id)
             SELECT ?, ?
             WHERE EXISTS(SELECT 1 FROM students WHERE id = ?)
               AND EXISTS(SELECT 1 FROM tutors WHERE id = ?)
             ON CONFLICT(student_id, tutor_id) DO NOTHING",
        )
        .bind(relation.student_id)
        .bind(relation.tutor_id)
        .bind(relation.student_id)
        .bind(relation.tutor_id)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Delete a relation.
    ///
    /// Returns true if a row was deleted, false if not found.
    pub async fn delete(&self, relation: HiringRelation) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM hiring_relations WHERE student_id = ? AND tutor_id = ?")
                .bind(relation.student_id)
                .bind(relation.tutor_id)
                .execute(self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a relation row exists and both endpoints resolve.
    pub async fn is_live(&self, relation: HiringRelation) -> Result<bool> {
        let live: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM hiring_relations r
                WHERE r.student_id = ? AND r.tutor_id = ?
                  AND EXISTS(SELECT 1 FROM students s WHERE s.id = r.student_id)
                  AND EXISTS(SELECT 1 FROM tutors t WHERE t.id = r.tutor_id)
            )",
        )
        .bind(relation.student_id)
        .bind(relation.tutor_id)
        .fetch_one(self.pool)
        .await?;
        Ok(live)
    }

    /// Tutors hired by a student, ordered by tutor id.
    ///
    /// Empty when the student no longer exists.
    pub async fn tutors_for_student(&self, student_id: i64) -> Result<Vec<Account>> {
        let sql = format!(
            "SELECT {} FROM tutors
             WHERE id IN (SELECT tutor_id FROM hiring_relations WHERE student_id = ?)
               AND EXISTS(SELECT 1 FROM students WHERE id = ?)
             ORDER BY id",
            select_columns(Variant::Tutor)
        );
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(student_id)
            .bind(student_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| r.into_account(Variant::Tutor))
            .collect())
    }

    /// Students who hired a tutor, ordered by student id.
    ///
    /// Empty when the tutor no longer exists.
    pub async fn students_for_tutor(&self, tutor_id: i64) -> Result<Vec<Account>> {
        let sql = format!(
            "SELECT {} FROM students
             WHERE id IN (SELECT student_id FROM hiring_relations WHERE tutor_id = ?)
               AND EXISTS(SELECT 1 FROM tutors WHERE id = ?)
             ORDER BY id",
            select_columns(Variant::Student)
        );
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(tutor_id)
            .bind(tutor_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| r.into_account(Variant::Student))
            .collect())
    }

    /// Count relation rows, dangling ones included.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hiring_relations")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Delete rows whose student or tutor no longer exists.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_dangling(&self) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM hiring_relations
             WHERE student_id NOT IN (SELECT id FROM students)
                OR tutor_id NOT IN (SELECT id FROM tutors)",
        )
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
