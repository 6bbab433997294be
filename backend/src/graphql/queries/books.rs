use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Every book in the catalogue, oldest first
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        let db = ctx.data_unchecked::<Database>();

        let records = db
            .books()
            .list_all()
            .await
            .map_err(|e| storage_error("books", e))?;

        tracing::debug!(count = records.len(), "Listed books");
        Ok(records.into_iter().map(Book::from).collect())
    }

    /// Get a book by ID, or null when it does not exist
    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        let db = ctx.data_unchecked::<Database>();
        let book_id = parse_book_id(&id).map_err(validation_error)?;

        let record = db
            .books()
            .get_by_id(book_id)
            .await
            .map_err(|e| storage_error("book", e))?;

        if record.is_none() {
            tracing::debug!(book_id = book_id, "Book not found");
        }
        Ok(record.map(Book::from))
    }
}
