pub mod book;
pub mod user;

pub use book::{Book, BookDraft, BookPatch, Comment, CommentDraft, CommentView, ValidationError};
pub use user::UserPublic;
