use super::ApiError;
use crate::domain::PostId;

pub fn validate_post_id(id: i32) -> Result<PostId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid post ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(PostId::new(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_post_id() {
        assert_eq!(validate_post_id(1).unwrap(), PostId::new(1));
        assert!(validate_post_id(12345).is_ok());
        assert!(validate_post_id(0).is_err());
        assert!(validate_post_id(-1).is_err());
    }
}
