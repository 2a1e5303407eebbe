//! Validated input shapes accepted by the user service.
//!
//! These are deserialized straight from request bodies and handed to
//! [`crate::application::services::UserService`] unchanged.

mod dto_create;
mod dto_update_patch;
mod dto_update_put;

pub use dto_create::CreateUserDto;
pub use dto_update_patch::UpdatePatchUserDto;
pub use dto_update_put::UpdatePutUserDto;

