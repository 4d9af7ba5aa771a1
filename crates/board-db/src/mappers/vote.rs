//! Vote entity <-> model mapper

use board_core::entities::Vote;
use board_core::value_objects::VoteValue;

use crate::models::VoteModel;

impl From<VoteModel> for Vote {
    fn from(model: VoteModel) -> Self {
        Vote {
            user_id: model.user_id,
            post_id: model.post_id,
            value: VoteValue::from_stored(model.value),
            created_at: model.created_at,
        }
    }
}
