use zel_core::prelude::*;

use crate::{
    entity::prelude::*,
    ids::{BadgeId, FlashcardId, ModuleId, MultipleChoiceId, QuizId, QuizQuestionId, ResourceId},
};

use super::{
    badges::{BadgePatch, NewBadge},
    flashcards::{FlashcardPatch, NewFlashcard},
    modules::{ModulePatch, NewModule},
    multiple_choice::{MultipleChoicePatch, NewMultipleChoice},
    quiz_questions::{NewQuizQuestion, QuizQuestionPatch},
    quizzes::{NewQuiz, QuizPatch},
    resources::{NewResource, ResourcePatch},
    Services,
};

/// RPC front for the admin UI. Each method forwards to one repository call.
#[derive(Clone)]
pub struct AdminService {
    services: Services,
}

impl AdminService {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[zel_service(name = "admin")]
trait Admin {
    // Modules
    #[doc = "List all modules by display order"]
    #[method(name = "getModules")]
    async fn get_modules(&self) -> Result<Vec<ModuleModel>, ResourceError>;

    #[doc = "Get a module by ID"]
    #[method(name = "getModule")]
    async fn get_module(&self, id: ModuleId) -> Result<Option<ModuleModel>, ResourceError>;

    #[doc = "Create a module"]
    #[method(name = "createModule")]
    async fn create_module(&self, module: NewModule) -> Result<ModuleId, ResourceError>;

    #[doc = "Update the given fields of a module"]
    #[method(name = "updateModule")]
    async fn update_module(
        &self,
        id: ModuleId,
        patch: ModulePatch,
    ) -> Result<ModuleId, ResourceError>;

    #[doc = "Delete a module (its content is kept)"]
    #[method(name = "deleteModule")]
    async fn delete_module(&self, id: ModuleId) -> Result<(), ResourceError>;

    // Resources
    #[doc = "List all resources by display order"]
    #[method(name = "getResources")]
    async fn get_resources(&self) -> Result<Vec<ResourceModel>, ResourceError>;

    #[doc = "Get a resource by ID"]
    #[method(name = "getResource")]
    async fn get_resource(&self, id: ResourceId) -> Result<Option<ResourceModel>, ResourceError>;

    #[doc = "Create a resource"]
    #[method(name = "createResource")]
    async fn create_resource(&self, resource: NewResource) -> Result<ResourceId, ResourceError>;

    #[doc = "Update the given fields of a resource"]
    #[method(name = "updateResource")]
    async fn update_resource(
        &self,
        id: ResourceId,
        patch: ResourcePatch,
    ) -> Result<ResourceId, ResourceError>;

    #[doc = "Delete a resource"]
    #[method(name = "deleteResource")]
    async fn delete_resource(&self, id: ResourceId) -> Result<(), ResourceError>;

    // Flashcards
    #[doc = "List a module's flashcards by display order"]
    #[method(name = "getFlashcardsByModule")]
    async fn get_flashcards_by_module(
        &self,
        module_id: ModuleId,
    ) -> Result<Vec<FlashcardModel>, ResourceError>;

    #[doc = "Get a flashcard by ID"]
    #[method(name = "getFlashcard")]
    async fn get_flashcard(&self, id: FlashcardId)
        -> Result<Option<FlashcardModel>, ResourceError>;

    #[doc = "Create a flashcard under an existing module"]
    #[method(name = "createFlashcard")]
    async fn create_flashcard(&self, card: NewFlashcard) -> Result<FlashcardId, ResourceError>;

    #[doc = "Update the given fields of a flashcard"]
    #[method(name = "updateFlashcard")]
    async fn update_flashcard(
        &self,
        id: FlashcardId,
        patch: FlashcardPatch,
    ) -> Result<FlashcardId, ResourceError>;

    #[doc = "Delete a flashcard"]
    #[method(name = "deleteFlashcard")]
    async fn delete_flashcard(&self, id: FlashcardId) -> Result<(), ResourceError>;

    // Multiple choice
    #[doc = "List a module's multiple choice questions by display order"]
    #[method(name = "getMultipleChoiceByModule")]
    async fn get_multiple_choice_by_module(
        &self,
        module_id: ModuleId,
    ) -> Result<Vec<MultipleChoiceModel>, ResourceError>;

    #[doc = "Get a multiple choice question by ID"]
    #[method(name = "getMultipleChoice")]
    async fn get_multiple_choice(
        &self,
        id: MultipleChoiceId,
    ) -> Result<Option<MultipleChoiceModel>, ResourceError>;

    #[doc = "Create a multiple choice question under an existing module"]
    #[method(name = "createMultipleChoice")]
    async fn create_multiple_choice(
        &self,
        question: NewMultipleChoice,
    ) -> Result<MultipleChoiceId, ResourceError>;

    #[doc = "Update the given fields of a multiple choice question"]
    #[method(name = "updateMultipleChoice")]
    async fn update_multiple_choice(
        &self,
        id: MultipleChoiceId,
        patch: MultipleChoicePatch,
    ) -> Result<MultipleChoiceId, ResourceError>;

    #[doc = "Delete a multiple choice question"]
    #[method(name = "deleteMultipleChoice")]
    async fn delete_multiple_choice(&self, id: MultipleChoiceId) -> Result<(), ResourceError>;

    // Quizzes
    #[doc = "List a module's quizzes in creation order"]
    #[method(name = "getQuizzesByModule")]
    async fn get_quizzes_by_module(
        &self,
        module_id: ModuleId,
    ) -> Result<Vec<QuizModel>, ResourceError>;

    #[doc = "Get a quiz by ID"]
    #[method(name = "getQuiz")]
    async fn get_quiz(&self, id: QuizId) -> Result<Option<QuizModel>, ResourceError>;

    #[doc = "Create a quiz under an existing module"]
    #[method(name = "createQuiz")]
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<QuizId, ResourceError>;

    #[doc = "Update the given fields of a quiz"]
    #[method(name = "updateQuiz")]
    async fn update_quiz(&self, id: QuizId, patch: QuizPatch) -> Result<QuizId, ResourceError>;

    #[doc = "Delete a quiz (its questions are kept)"]
    #[method(name = "deleteQuiz")]
    async fn delete_quiz(&self, id: QuizId) -> Result<(), ResourceError>;

    // Quiz questions
    #[doc = "List a quiz's questions by display order"]
    #[method(name = "getQuizQuestions")]
    async fn get_quiz_questions(
        &self,
        quiz_id: QuizId,
    ) -> Result<Vec<QuizQuestionModel>, ResourceError>;

    #[doc = "Get a quiz question by ID"]
    #[method(name = "getQuizQuestion")]
    async fn get_quiz_question(
        &self,
        id: QuizQuestionId,
    ) -> Result<Option<QuizQuestionModel>, ResourceError>;

    #[doc = "Create a question under an existing quiz"]
    #[method(name = "createQuizQuestion")]
    async fn create_quiz_question(
        &self,
        question: NewQuizQuestion,
    ) -> Result<QuizQuestionId, ResourceError>;

    #[doc = "Update the given fields of a quiz question"]
    #[method(name = "updateQuizQuestion")]
    async fn update_quiz_question(
        &self,
        id: QuizQuestionId,
        patch: QuizQuestionPatch,
    ) -> Result<QuizQuestionId, ResourceError>;

    #[doc = "Delete a quiz question"]
    #[method(name = "deleteQuizQuestion")]
    async fn delete_quiz_question(&self, id: QuizQuestionId) -> Result<(), ResourceError>;

    // Badges
    #[doc = "List all badges in creation order"]
    #[method(name = "getBadges")]
    async fn get_badges(&self) -> Result<Vec<BadgeModel>, ResourceError>;

    #[doc = "Get a badge by ID"]
    #[method(name = "getBadge")]
    async fn get_badge(&self, id: BadgeId) -> Result<Option<BadgeModel>, ResourceError>;

    #[doc = "Create a badge"]
    #[method(name = "createBadge")]
    async fn create_badge(&self, badge: NewBadge) -> Result<BadgeId, ResourceError>;

    #[doc = "Update the given fields of a badge"]
    #[method(name = "updateBadge")]
    async fn update_badge(&self, id: BadgeId, patch: BadgePatch)
        -> Result<BadgeId, ResourceError>;

    #[doc = "Delete a badge (earned rows are kept)"]
    #[method(name = "deleteBadge")]
    async fn delete_badge(&self, id: BadgeId) -> Result<(), ResourceError>;
}

#[async_trait]
impl AdminServer for AdminService {
    async fn get_modules(&self, _ctx: RequestContext) -> Result<Vec<ModuleModel>, ResourceError> {
        Ok(self.services.modules.list().await?)
    }

    async fn get_module(
        &self,
        _ctx: RequestContext,
        id: ModuleId,
    ) -> Result<Option<ModuleModel>, ResourceError> {
        Ok(self.services.modules.get(id).await?)
    }

    async fn create_module(
        &self,
        _ctx: RequestContext,
        module: NewModule,
    ) -> Result<ModuleId, ResourceError> {
        Ok(self.services.modules.create(module).await?)
    }

    async fn update_module(
        &self,
        _ctx: RequestContext,
        id: ModuleId,
        patch: ModulePatch,
    ) -> Result<ModuleId, ResourceError> {
        Ok(self.services.modules.update(id, patch).await?)
    }

    async fn delete_module(&self, _ctx: RequestContext, id: ModuleId) -> Result<(), ResourceError> {
        Ok(self.services.modules.delete(id).await?)
    }

    async fn get_resources(
        &self,
        _ctx: RequestContext,
    ) -> Result<Vec<ResourceModel>, ResourceError> {
        Ok(self.services.resources.list().await?)
    }

    async fn get_resource(
        &self,
        _ctx: RequestContext,
        id: ResourceId,
    ) -> Result<Option<ResourceModel>, ResourceError> {
        Ok(self.services.resources.get(id).await?)
    }

    async fn create_resource(
        &self,
        _ctx: RequestContext,
        resource: NewResource,
    ) -> Result<ResourceId, ResourceError> {
        Ok(self.services.resources.create(resource).await?)
    }

    async fn update_resource(
        &self,
        _ctx: RequestContext,
        id: ResourceId,
        patch: ResourcePatch,
    ) -> Result<ResourceId, ResourceError> {
        Ok(self.services.resources.update(id, patch).await?)
    }

    async fn delete_resource(
        &self,
        _ctx: RequestContext,
        id: ResourceId,
    ) -> Result<(), ResourceError> {
        Ok(self.services.resources.delete(id).await?)
    }

    async fn get_flashcards_by_module(
        &self,
        _ctx: RequestContext,
        module_id: ModuleId,
    ) -> Result<Vec<FlashcardModel>, ResourceError> {
        Ok(self.services.flashcards.list(module_id).await?)
    }

    async fn get_flashcard(
        &self,
        _ctx: RequestContext,
        id: FlashcardId,
    ) -> Result<Option<FlashcardModel>, ResourceError> {
        Ok(self.services.flashcards.get(id).await?)
    }

    async fn create_flashcard(
        &self,
        _ctx: RequestContext,
        card: NewFlashcard,
    ) -> Result<FlashcardId, ResourceError> {
        Ok(self.services.flashcards.create(card).await?)
    }

    async fn update_flashcard(
        &self,
        _ctx: RequestContext,
        id: FlashcardId,
        patch: FlashcardPatch,
    ) -> Result<FlashcardId, ResourceError> {
        Ok(self.services.flashcards.update(id, patch).await?)
    }

    async fn delete_flashcard(
        &self,
        _ctx: RequestContext,
        id: FlashcardId,
    ) -> Result<(), ResourceError> {
        Ok(self.services.flashcards.delete(id).await?)
    }

    async fn get_multiple_choice_by_module(
        &self,
        _ctx: RequestContext,
        module_id: ModuleId,
    ) -> Result<Vec<MultipleChoiceModel>, ResourceError> {
        Ok(self.services.multiple_choice.list(module_id).await?)
    }

    async fn get_multiple_choice(
        &self,
        _ctx: RequestContext,
        id: MultipleChoiceId,
    ) -> Result<Option<MultipleChoiceModel>, ResourceError> {
        Ok(self.services.multiple_choice.get(id).await?)
    }

    async fn create_multiple_choice(
        &self,
        _ctx: RequestContext,
        question: NewMultipleChoice,
    ) -> Result<MultipleChoiceId, ResourceError> {
        Ok(self.services.multiple_choice.create(question).await?)
    }

    async fn update_multiple_choice(
        &self,
        _ctx: RequestContext,
        id: MultipleChoiceId,
        patch: MultipleChoicePatch,
    ) -> Result<MultipleChoiceId, ResourceError> {
        Ok(self.services.multiple_choice.update(id, patch).await?)
    }

    async fn delete_multiple_choice(
        &self,
        _ctx: RequestContext,
        id: MultipleChoiceId,
    ) -> Result<(), ResourceError> {
        Ok(self.services.multiple_choice.delete(id).await?)
    }

    async fn get_quizzes_by_module(
        &self,
        _ctx: RequestContext,
        module_id: ModuleId,
    ) -> Result<Vec<QuizModel>, ResourceError> {
        Ok(self.services.quizzes.list(module_id).await?)
    }

    async fn get_quiz(
        &self,
        _ctx: RequestContext,
        id: QuizId,
    ) -> Result<Option<QuizModel>, ResourceError> {
        Ok(self.services.quizzes.get(id).await?)
    }

    async fn create_quiz(&self, _ctx: RequestContext, quiz: NewQuiz) -> Result<QuizId, ResourceError> {
        Ok(self.services.quizzes.create(quiz).await?)
    }

    async fn update_quiz(
        &self,
        _ctx: RequestContext,
        id: QuizId,
        patch: QuizPatch,
    ) -> Result<QuizId, ResourceError> {
        Ok(self.services.quizzes.update(id, patch).await?)
    }

    async fn delete_quiz(&self, _ctx: RequestContext, id: QuizId) -> Result<(), ResourceError> {
        Ok(self.services.quizzes.delete(id).await?)
    }

    async fn get_quiz_questions(
        &self,
        _ctx: RequestContext,
        quiz_id: QuizId,
    ) -> Result<Vec<QuizQuestionModel>, ResourceError> {
        Ok(self.services.quiz_questions.list(quiz_id).await?)
    }

    async fn get_quiz_question(
        &self,
        _ctx: RequestContext,
        id: QuizQuestionId,
    ) -> Result<Option<QuizQuestionModel>, ResourceError> {
        Ok(self.services.quiz_questions.get(id).await?)
    }

    async fn create_quiz_question(
        &self,
        _ctx: RequestContext,
        question: NewQuizQuestion,
    ) -> Result<QuizQuestionId, ResourceError> {
        Ok(self.services.quiz_questions.create(question).await?)
    }

    async fn update_quiz_question(
        &self,
        _ctx: RequestContext,
        id: QuizQuestionId,
        patch: QuizQuestionPatch,
    ) -> Result<QuizQuestionId, ResourceError> {
        Ok(self.services.quiz_questions.update(id, patch).await?)
    }

    async fn delete_quiz_question(
        &self,
        _ctx: RequestContext,
        id: QuizQuestionId,
    ) -> Result<(), ResourceError> {
        Ok(self.services.quiz_questions.delete(id).await?)
    }

    async fn get_badges(&self, _ctx: RequestContext) -> Result<Vec<BadgeModel>, ResourceError> {
        Ok(self.services.badges.list().await?)
    }

    async fn get_badge(
        &self,
        _ctx: RequestContext,
        id: BadgeId,
    ) -> Result<Option<BadgeModel>, ResourceError> {
        Ok(self.services.badges.get(id).await?)
    }

    async fn create_badge(
        &self,
        _ctx: RequestContext,
        badge: NewBadge,
    ) -> Result<BadgeId, ResourceError> {
        Ok(self.services.badges.create(badge).await?)
    }

    async fn update_badge(
        &self,
        _ctx: RequestContext,
        id: BadgeId,
        patch: BadgePatch,
    ) -> Result<BadgeId, ResourceError> {
        Ok(self.services.badges.update(id, patch).await?)
    }

    async fn delete_badge(&self, _ctx: RequestContext, id: BadgeId) -> Result<(), ResourceError> {
        Ok(self.services.badges.delete(id).await?)
    }
}
