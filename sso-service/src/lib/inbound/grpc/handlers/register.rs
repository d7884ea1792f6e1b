use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::validation::RequestValidator;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    validator: &RequestValidator,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    validator
        .validate_register(&request.email, &request.password)
        .map_err(AuthError::from)?;

    let user_id = service.register(&request.email, &request.password).await?;

    Ok(RegisterResponse {
        user_id: user_id.as_i64(),
    })
}
