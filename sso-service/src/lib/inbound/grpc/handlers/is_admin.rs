use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::validation::RequestValidator;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: &S,
    validator: &RequestValidator,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, Status> {
    let user_id = UserId(request.user_id);

    validator
        .validate_is_admin(user_id)
        .map_err(AuthError::from)?;

    let is_admin = service.is_admin(user_id).await?;

    Ok(IsAdminResponse { is_admin })
}
