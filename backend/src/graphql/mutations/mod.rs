pub mod books;

pub use books::BookMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ID, MaybeUndefined, Object, Result};

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
