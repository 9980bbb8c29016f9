/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL generation for table creation and indexing.
/// All methods return `&'static str` to avoid runtime allocations and enable
/// compile-time string construction via `const_format::concatcp!`.
///
/// This trait contains no I/O operations; it purely describes table structure.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
    /// Returns PostgreSQL column types for the table.
    fn columns() -> &'static [tokio_postgres::types::Type];
}
