//! OpenAPI/Utoipa configuration.

use crate::api::{campaigns::CAMPAIGNS_TAG, health::MISC_TAG};
use utoipa::OpenApi;

/// OpenAPI documentation configuration.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "InfluenceFlow Outreach API",
        version = "1.0.0",
        description = "Campaign invitation producer and outreach delivery status for the InfluenceFlow platform."
    ),
    tags(
        (name = MISC_TAG, description = "Miscellaneous endpoints"),
        (name = CAMPAIGNS_TAG, description = "Campaign invitation and outreach endpoints")
    )
)]
pub struct ApiDoc;
