use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::validation::RequestValidator;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    validator: &RequestValidator,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let app_id = AppId(request.app_id);

    validator
        .validate_login(&request.email, &request.password, app_id)
        .map_err(AuthError::from)?;

    let token = service
        .login(&request.email, &request.password, app_id)
        .await?;

    Ok(LoginResponse { token })
}
