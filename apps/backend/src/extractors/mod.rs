pub mod authenticated;
pub mod bearer;
pub mod validated_json;

pub use authenticated::AuthenticatedUser;
pub use bearer::BearerToken;
pub use validated_json::ValidatedJson;
