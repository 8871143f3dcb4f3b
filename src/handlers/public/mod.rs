pub mod books;
pub mod comments;
