use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct Info {
    pub name: String,
    pub version: String,
}
