use crate::domain::errors::SlugError;

pub fn map_sqlx(err: sqlx::Error) -> SlugError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return SlugError::persistence(format!(
                    "database constraint violation: {constraint}"
                ));
            }

            match db_err.code() {
                Some(code) => SlugError::persistence(format!("{} ({code})", db_err.message())),
                None => SlugError::persistence(db_err.message()),
            }
        }
        sqlx::Error::RowNotFound => SlugError::persistence("row not found"),
        _ => SlugError::persistence(err.to_string()),
    }
}
