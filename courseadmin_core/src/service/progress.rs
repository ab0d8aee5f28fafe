use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    entity::prelude::*,
    error::RepoResult,
    ids::{BadgeId, ModuleId, QuizId},
};

/// Read side of the per-user tables. Rows are written by the learner app.
#[derive(Clone)]
pub struct ProgressService {
    db: DatabaseConnection,
}

impl ProgressService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn profile(&self, user_id: &str) -> RepoResult<Option<ProfileModel>> {
        let profile = Profile::find()
            .filter(ProfileColumn::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(profile)
    }

    /// Top `limit` profiles by points.
    pub async fn leaderboard(&self, limit: u64) -> RepoResult<Vec<ProfileModel>> {
        let profiles = Profile::find()
            .order_by_desc(ProfileColumn::Points)
            .order_by_asc(ProfileColumn::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(profiles)
    }

    pub async fn module_progress(
        &self,
        user_id: &str,
    ) -> RepoResult<Vec<UserModuleProgressModel>> {
        let rows = UserModuleProgress::find()
            .filter(UserModuleProgressColumn::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn module_progress_for(
        &self,
        user_id: &str,
        module_id: ModuleId,
    ) -> RepoResult<Option<UserModuleProgressModel>> {
        let row = UserModuleProgress::find()
            .filter(UserModuleProgressColumn::UserId.eq(user_id))
            .filter(UserModuleProgressColumn::ModuleId.eq(module_id))
            .one(&self.db)
            .await?;

        Ok(row)
    }

    pub async fn earned_badges(&self, user_id: &str) -> RepoResult<Vec<UserBadgeModel>> {
        let rows = UserBadge::find()
            .filter(UserBadgeColumn::UserId.eq(user_id))
            .order_by_asc(UserBadgeColumn::EarnedAt)
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn earned_badge(
        &self,
        user_id: &str,
        badge_id: BadgeId,
    ) -> RepoResult<Option<UserBadgeModel>> {
        let row = UserBadge::find()
            .filter(UserBadgeColumn::UserId.eq(user_id))
            .filter(UserBadgeColumn::BadgeId.eq(badge_id))
            .one(&self.db)
            .await?;

        Ok(row)
    }

    pub async fn question_progress(
        &self,
        user_id: &str,
        module_id: ModuleId,
    ) -> RepoResult<Vec<UserQuestionProgressModel>> {
        let rows = UserQuestionProgress::find()
            .filter(UserQuestionProgressColumn::UserId.eq(user_id))
            .filter(UserQuestionProgressColumn::ModuleId.eq(module_id))
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Every user's progress on one flashcard or multiple choice question.
    pub async fn question_progress_by_question(
        &self,
        question_id: impl Into<Uuid>,
    ) -> RepoResult<Vec<UserQuestionProgressModel>> {
        let question_id: Uuid = question_id.into();
        let rows = UserQuestionProgress::find()
            .filter(UserQuestionProgressColumn::QuestionId.eq(question_id))
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Attempts oldest first.
    pub async fn quiz_attempts(
        &self,
        user_id: &str,
        quiz_id: QuizId,
    ) -> RepoResult<Vec<UserQuizAttemptModel>> {
        let rows = UserQuizAttempt::find()
            .filter(UserQuizAttemptColumn::UserId.eq(user_id))
            .filter(UserQuizAttemptColumn::QuizId.eq(quiz_id))
            .order_by_asc(UserQuizAttemptColumn::CompletedAt)
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    /// Newest first.
    pub async fn recent_activity(
        &self,
        user_id: &str,
        limit: u64,
    ) -> RepoResult<Vec<RecentActivityModel>> {
        let rows = RecentActivity::find()
            .filter(RecentActivityColumn::UserId.eq(user_id))
            .order_by_desc(RecentActivityColumn::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
