/// Database access layer
///
/// All persistent state lives in a hosted Postgres exposed over PostgREST.
/// `postgrest` implements the query-builder gateway used by every handler.
pub mod postgrest;

pub use postgrest::{Database, DbError, Query};
