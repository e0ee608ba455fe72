use crate::{
    auth::claims::{Claims, UserRole},
    errors::{AppError, AppResult},
};

/// Lifecycle endpoints are student-only; staff and managers read attempt
/// data through the grading surface, not through these routes.
pub fn require_student(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Student {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
