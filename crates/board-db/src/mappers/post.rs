//! Post entity <-> model mapper

use board_core::entities::Post;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            title: model.title,
            body: model.body,
            score: model.score,
            creator_id: model.creator_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
