use crate::error::ApiError;

pub fn parse_positive_usize(
    raw: Option<&String>,
    fallback: usize,
    field: &str,
) -> Result<usize, ApiError> {
    let Some(value) = raw else {
        return Ok(fallback);
    };
    match value.parse::<usize>() {
        Ok(0) => Err(ApiError::bad_request(format!("{field} must be at least 1"))),
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(ApiError::bad_request(format!(
            "{field} must be a positive integer"
        ))),
    }
}
