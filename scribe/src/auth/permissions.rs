//! Ownership rules for blog posts.
//!
//! Any authenticated user may read every post and create posts of their own,
//! so neither needs a check. Only a post's author may update or delete it. There
//! are no roles, so the guard is a pure function of the acting identity and the
//! target's owner.

use crate::{
    api::models::users::CurrentUser,
    errors::{Error, Result},
    types::{Operation, Resource, UserId},
};

/// Whether `user` may perform `operation` on a resource owned by `owner_id`.
pub fn has_permission(user: &CurrentUser, operation: Operation, owner_id: UserId) -> bool {
    match operation {
        Operation::UpdateOwn | Operation::DeleteOwn => owner_id == user.id,
    }
}

/// Reject with [`Error::Unauthorized`] unless `user` owns the post.
pub fn require_post_owner(user: &CurrentUser, author_id: UserId, operation: Operation) -> Result<()> {
    if has_permission(user, operation, author_id) {
        Ok(())
    } else {
        tracing::debug!(user_id = user.id, author_id, %operation, "ownership check failed");
        Err(Error::Unauthorized {
            action: operation,
            resource: Resource::Posts,
        })
    }
}
