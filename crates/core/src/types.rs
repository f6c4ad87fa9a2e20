/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Release dates carry no time zone; they are stored as `TIMESTAMP`.
pub type ReleaseDate = chrono::NaiveDateTime;
