//! Hiring relation manager for tutorlink.
//!
//! All mutations act on behalf of the identity in a [`RequestContext`].
//! Students hire tutors; either party may end the relation.

use tracing::{debug, info};

use crate::auth::RequestContext;
use crate::db::{
    Account, AccountRef, AccountRepository, Database, HiringRelation, RelationRepository, Variant,
};
use crate::{Result, TutorlinkError};

/// Service for hiring relation operations with permission checking.
pub struct HiringRelationManager<'a> {
    db: &'a Database,
}

impl<'a> HiringRelationManager<'a> {
    /// Create a new HiringRelationManager with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn relations(&self) -> RelationRepository<'_> {
        RelationRepository::new(self.db.pool())
    }

    fn accounts(&self) -> AccountRepository<'_> {
        AccountRepository::new(self.db.pool())
    }

    /// Hire a tutor as the requesting student.
    ///
    /// Hiring an already hired tutor succeeds without writing a second row.
    pub async fn hire(&self, ctx: &RequestContext, tutor_id: i64) -> Result<()> {
        let requester = ctx.require_identity()?;
        if requester.variant() != Variant::Student {
            return Err(TutorlinkError::Forbidden(
                "only students can hire tutors".to_string(),
            ));
        }

        let relation = HiringRelation::new(requester.id(), tutor_id);
        let relations = self.relations();
        if relations.insert(relation).await? {
            info!(
                student_id = relation.student_id,
                tutor_id = relation.tutor_id,
                "Tutor hired"
            );
            return Ok(());
        }
        if relations.is_live(relation).await? {
            debug!(
                student_id = relation.student_id,
                tutor_id = relation.tutor_id,
                "Tutor already hired"
            );
            return Ok(());
        }

        // Nothing written: one of the accounts is gone.
        if !self.accounts().exists(Variant::Tutor, tutor_id).await? {
            return Err(TutorlinkError::NotFound(relation.tutor().to_string()));
        }
        Err(TutorlinkError::NotFound(relation.student().to_string()))
    }

    /// Remove the relation between the requester and `other`.
    pub async fn remove(&self, ctx: &RequestContext, other: AccountRef) -> Result<()> {
        let requester = ctx.require_identity()?;
        let relation = HiringRelation::between(requester.account(), other).ok_or_else(|| {
            TutorlinkError::Forbidden(format!(
                "a {} cannot be related to another {}",
                requester.variant(),
                other.variant
            ))
        })?;
        self.remove_relation(ctx, relation).await
    }

    /// Remove a relation the requester is a party to.
    ///
    /// Non-parties get `Forbidden` regardless of whether the relation
    /// exists.
    pub async fn remove_relation(
        &self,
        ctx: &RequestContext,
        relation: HiringRelation,
    ) -> Result<()> {
        let requester = ctx.require_identity()?;
        if !relation.involves(requester.account()) {
            return Err(TutorlinkError::Forbidden(
                "only the student or the tutor of a relation can remove it".to_string(),
            ));
        }

        let accounts = self.accounts();
        if !accounts.exists(Variant::Student, relation.student_id).await? {
            return Err(TutorlinkError::NotFound(relation.student().to_string()));
        }
        if !accounts.exists(Variant::Tutor, relation.tutor_id).await? {
            return Err(TutorlinkError::NotFound(relation.tutor().to_string()));
        }

        if !self.relations().delete(relation).await? {
            return Err(TutorlinkError::NotFound("hiring relation".to_string()));
        }

        info!(
            student_id = relation.student_id,
            tutor_id = relation.tutor_id,
            removed_by = %requester.account(),
            "Hiring relation removed"
        );
        Ok(())
    }

    /// Tutors hired by a student, ordered by id.
    pub async fn list_tutors_for_student(&self, student_id: i64) -> Result<Vec<Account>> {
        self.relations().tutors_for_student(student_id).await
    }

    /// Students who hired a tutor, ordered by id.
    pub async fn list_students_for_tutor(&self, tutor_id: i64) -> Result<Vec<Account>> {
        self.relations().students_for_tutor(tutor_id).await
    }

    /// Whether the student currently has the tutor hired.
    pub async fn is_hired(&self, student_id: i64, tutor_id: i64) -> Result<bool> {
        self.relations()
            .is_live(HiringRelation::new(student_id, tutor_id))
            .await
    }

    /// Delete relations whose student or tutor no longer exists.
    pub async fn prune_dangling(&self) -> Result<u64> {
        let removed = self.relations().delete_dangling().await?;
        if removed > 0 {
            info!(removed, "Pruned dangling hiring relations");
        }
        Ok(removed)
    }
}
