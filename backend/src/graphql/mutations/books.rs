use super::prelude::*;

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    /// Add a book; the server assigns its ID
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published_year: Option<i32>,
    ) -> Result<Book> {
        let db = ctx.data_unchecked::<Database>();
        let input = CreateBook {
            title: required_text("title", title).map_err(validation_error)?,
            author: required_text("author", author).map_err(validation_error)?,
            published_year,
        };

        let record = db
            .books()
            .create(input)
            .await
            .map_err(|e| storage_error("addBook", e))?;

        tracing::info!(book_id = record.id, title = %record.title, "Book added");
        Ok(record.into())
    }

    /// Update the supplied fields of a book.
    ///
    /// Omitted arguments, unsent variables and a `null` title or author keep
    /// the stored value; `publishedYear: null` clears the year. Returns null
    /// when the book does not exist.
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: MaybeUndefined<String>,
        author: MaybeUndefined<String>,
        published_year: MaybeUndefined<i32>,
    ) -> Result<Option<Book>> {
        let db = ctx.data_unchecked::<Database>();
        let book_id = parse_book_id(&id).map_err(validation_error)?;
        let input = UpdateBook {
            title: text_change("title", omit_unsent(ctx, "title", title))
                .map_err(validation_error)?,
            author: text_change("author", omit_unsent(ctx, "author", author))
                .map_err(validation_error)?,
            published_year: nullable_change(omit_unsent(ctx, "publishedYear", published_year)),
        };

        let result = db
            .books()
            .update(book_id, input)
            .await
            .map_err(|e| storage_error("updateBook", e))?;

        match result {
            Some(record) => {
                tracing::info!(book_id = record.id, "Book updated");
                Ok(Some(record.into()))
            }
            None => {
                tracing::debug!(book_id = book_id, "Book not found, nothing updated");
                Ok(None)
            }
        }
    }

    /// Delete a book. Returns false when no book had this ID.
    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        let book_id = parse_book_id(&id).map_err(validation_error)?;

        let deleted = db
            .books()
            .delete_by_id(book_id)
            .await
            .map_err(|e| storage_error("deleteBook", e))?;

        tracing::info!(book_id = book_id, deleted = deleted > 0, "Delete book");
        Ok(deleted > 0)
    }
}
