use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserPublic;

/// A catalogued book document. Comments are embedded in the document and
/// persisted as part of it; they never exist independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_year: i32,
    pub genre: String,
    pub summary: String,
    pub contents: String,
    /// Insertion-ordered; append-only except for admin deletes.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// One user remark embedded in a book's comment sequence. The `user`
/// field is a weak reference into the user directory, expanded on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub user: Uuid,
}

/// Comment with its user reference expanded for output. `user` is None
/// when the referenced identity no longer exists in the directory.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub text: String,
    pub user: Option<UserPublic>,
}

/// Validation failure listing every violated field, not just the first.
#[derive(Debug, Clone, thiserror::Error)]
#[error("missing required fields: {}", missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Candidate book payload as submitted by a client. All scalar fields are
/// required; validation reports the full set of absent ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub genre: Option<String>,
    pub summary: Option<String>,
    pub contents: Option<String>,
}

impl BookDraft {
    /// Validate the draft and assign a fresh identity. Collects every
    /// missing field before failing so clients see the complete list.
    pub fn into_book(self) -> Result<Book, ValidationError> {
        let mut missing = Vec::new();

        if self.title.is_none() {
            missing.push("title");
        }
        if self.author.is_none() {
            missing.push("author");
        }
        if self.publisher.is_none() {
            missing.push("publisher");
        }
        if self.publication_year.is_none() {
            missing.push("publication_year");
        }
        if self.genre.is_none() {
            missing.push("genre");
        }
        if self.summary.is_none() {
            missing.push("summary");
        }
        if self.contents.is_none() {
            missing.push("contents");
        }

        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        Ok(Book {
            id: Uuid::new_v4(),
            title: self.title.unwrap(),
            author: self.author.unwrap(),
            publisher: self.publisher.unwrap(),
            publication_year: self.publication_year.unwrap(),
            genre: self.genre.unwrap(),
            summary: self.summary.unwrap(),
            contents: self.contents.unwrap(),
            comments: Vec::new(),
        })
    }
}

/// Partial field set merged into an existing book. Last write wins per
/// field; there is no optimistic concurrency check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub genre: Option<String>,
    pub summary: Option<String>,
    pub contents: Option<String>,
}

impl BookPatch {
    pub fn apply(self, book: &mut Book) {
        if let Some(v) = self.title {
            book.title = v;
        }
        if let Some(v) = self.author {
            book.author = v;
        }
        if let Some(v) = self.publisher {
            book.publisher = v;
        }
        if let Some(v) = self.publication_year {
            book.publication_year = v;
        }
        if let Some(v) = self.genre {
            book.genre = v;
        }
        if let Some(v) = self.summary {
            book.summary = v;
        }
        if let Some(v) = self.contents {
            book.contents = v;
        }
    }
}

/// Incoming comment body. A caller-supplied `user` field is ignored; the
/// handler always stamps the authenticated requester's identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentDraft {
    pub text: String,
}

impl Book {
    /// Locate a comment by id within the ordered sequence, returning its
    /// index so callers can replace or remove in place.
    pub fn comment_position(&self, comment_id: Uuid) -> Option<usize> {
        self.comments.iter().position(|c| c.id == comment_id)
    }

    pub fn comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comment_position(comment_id).map(|i| &self.comments[i])
    }

    /// Append a new comment authored by `user`, preserving insertion order.
    /// Returns the assigned comment id.
    pub fn append_comment(&mut self, text: String, user: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.comments.push(Comment { id, text, user });
        id
    }

    /// Remove a comment by id, keeping the order of the remaining ones.
    /// Returns the removed comment, or None if the id is absent.
    pub fn remove_comment(&mut self, comment_id: Uuid) -> Option<Comment> {
        let idx = self.comment_position(comment_id)?;
        Some(self.comments.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BookDraft {
        BookDraft {
            title: Some("X".into()),
            author: Some("Y".into()),
            publisher: Some("Z".into()),
            publication_year: Some(2020),
            genre: Some("Fiction".into()),
            summary: Some("S".into()),
            contents: Some("C".into()),
        }
    }

    #[test]
    fn test_complete_draft_becomes_book() {
        let book = draft().into_book().unwrap();
        assert_eq!(book.title, "X");
        assert_eq!(book.publication_year, 2020);
        assert!(book.comments.is_empty());
    }

    #[test]
    fn test_validation_collects_all_missing_fields() {
        let err = BookDraft {
            title: None,
            summary: None,
            ..draft()
        }
        .into_book()
        .unwrap_err();
        assert_eq!(err.missing, vec!["title", "summary"]);
    }

    #[test]
    fn test_empty_draft_reports_seven_fields() {
        let err = BookDraft::default().into_book().unwrap_err();
        assert_eq!(err.missing.len(), 7);
    }

    #[test]
    fn test_patch_overwrites_only_supplied_fields() {
        let mut book = draft().into_book().unwrap();
        BookPatch {
            genre: Some("History".into()),
            ..Default::default()
        }
        .apply(&mut book);
        assert_eq!(book.genre, "History");
        assert_eq!(book.title, "X");
    }

    #[test]
    fn test_comment_append_and_remove_preserve_order() {
        let mut book = draft().into_book().unwrap();
        let user = Uuid::new_v4();
        let a = book.append_comment("first".into(), user);
        let b = book.append_comment("second".into(), user);
        let c = book.append_comment("third".into(), user);

        assert_eq!(book.comment_position(b), Some(1));

        let removed = book.remove_comment(b).unwrap();
        assert_eq!(removed.text, "second");
        assert_eq!(
            book.comments.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![a, c]
        );
    }

    #[test]
    fn test_unknown_comment_id_is_none() {
        let mut book = draft().into_book().unwrap();
        assert!(book.comment_position(Uuid::new_v4()).is_none());
        assert!(book.remove_comment(Uuid::new_v4()).is_none());
    }
}
