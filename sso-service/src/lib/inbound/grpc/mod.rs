pub mod grpc_auth_server;
pub mod handlers;

pub use grpc_auth_server::AuthGrpcService;
pub use handlers::ErrorCode;
