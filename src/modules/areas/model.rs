use ridepool_core::Role;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaResponse {
    pub success: bool,
    #[schema(example = "bookings")]
    pub area: String,
    pub account_id: Uuid,
    pub role: Role,
}
