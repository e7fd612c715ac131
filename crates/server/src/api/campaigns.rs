//! Campaign invitation producer and outreach status endpoints.
//!
//! `POST /campaigns/{campaign_id}/invite` is the producer side of the
//! outreach pipeline: it validates the campaign/creator pair, then commits
//! the campaign-creator link, the outreach record, and the queue signal in a
//! single transaction so a record is always visible before its signal can be
//! consumed.

use crate::email_templates::InvitationEmail;
use crate::entity::campaign_creator::CampaignCreatorStatus;
use crate::entity::outreach_log::{OutreachStatus, OutreachType};
use crate::entity::{campaign, campaign_creator, creator, outreach_log};
use crate::queue::{OutreachSignal, enqueue_on};
use crate::AppResources;
use axum::{Extension, Json, extract::Path, response::IntoResponse};
use hyper::StatusCode;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Tag for OpenAPI documentation.
pub const CAMPAIGNS_TAG: &str = "Campaigns API";

#[derive(Deserialize, ToSchema)]
pub struct InviteCreator {
    creator_id: i32,
    offered_rate: f64,
    deliverables_total: i32,
    /// Notification channel for the invitation; defaults to EMAIL.
    #[serde(default)]
    outreach_type: Option<OutreachType>,
}

/// Creates the campaigns API router.
#[tracing::instrument(skip_all)]
pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(invite_creator))
        .routes(routes!(get_outreach))
}

#[tracing::instrument(skip(resources, payload), fields(campaign_id, creator_id = payload.creator_id))]
#[utoipa::path(
    post,
    path = "/campaigns/{campaign_id}/invite",
    operation_id = "Invite Creator",
    tag = CAMPAIGNS_TAG,
    summary = "Invite a creator to a campaign",
    description = "Records the invitation, writes an outreach log row with the rendered \
                   invitation message, and enqueues a dispatch signal on the channel \
                   matching the outreach type. The invitation succeeds independently of \
                   downstream delivery; delivery status is written back onto the outreach \
                   record by the consumers.",
    params(
        ("campaign_id" = i32, Path, description = "Campaign to invite the creator to")
    ),
    request_body(content = InviteCreator, description = "Invitation details"),
    responses(
        (status = 200, description = "Invitation recorded", body = campaign_creator::Model, content_type = "application/json"),
        (status = 400, description = "Duplicate invitation or unusable channel", content_type = "application/json"),
        (status = 404, description = "Campaign or creator not found", content_type = "application/json"),
        (status = 500, description = "Internal server error", content_type = "application/json")
    )
)]
async fn invite_creator(
    Path(campaign_id): Path<i32>,
    Extension(resources): Extension<AppResources>,
    Json(payload): Json<InviteCreator>,
) -> impl IntoResponse {
    let db = resources.db.as_ref();

    let campaign = match campaign::Entity::find_by_id(campaign_id).one(db).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Campaign not found" })),
            );
        }
        Err(e) => return db_error("api.invite_creator.campaign_query_failed", e),
    };

    let creator = match creator::Entity::find_by_id(payload.creator_id).one(db).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Creator not found" })),
            );
        }
        Err(e) => return db_error("api.invite_creator.creator_query_failed", e),
    };

    let existing = campaign_creator::Entity::find()
        .filter(campaign_creator::Column::CampaignId.eq(campaign_id))
        .filter(campaign_creator::Column::CreatorId.eq(payload.creator_id))
        .one(db)
        .await;
    match existing {
        Ok(Some(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Creator already invited to this campaign" })),
            );
        }
        Ok(None) => {}
        Err(e) => return db_error("api.invite_creator.duplicate_check_failed", e),
    }

    let outreach_type = payload.outreach_type.unwrap_or(OutreachType::Email);

    // Pick the recipient address and queue channel for the chosen channel.
    let (recipient, channel_name) = match outreach_type {
        OutreachType::Email => (
            creator.email.clone(),
            resources.config.queue.email_channel.clone(),
        ),
        OutreachType::Whatsapp => match &creator.phone {
            Some(phone) => (
                phone.clone(),
                resources.config.queue.whatsapp_channel.clone(),
            ),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Creator has no phone number for WhatsApp outreach" })),
                );
            }
        },
        OutreachType::InstagramDm => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No dispatch channel configured for INSTAGRAM_DM" })),
            );
        }
    };

    let invitation = InvitationEmail {
        creator_name: &creator.full_name,
        brand_name: &campaign.brand_name,
        campaign_title: &campaign.title,
        offered_rate: payload.offered_rate,
        campaign_description: campaign.description.as_deref(),
    };
    let subject = invitation.render_subject();
    let message = invitation.render_text();

    // Invitation, outreach record and queue signal commit together.
    let now = OffsetDateTime::now_utc();
    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => return db_error("api.invite_creator.txn_begin_failed", e),
    };

    let link = campaign_creator::ActiveModel {
        campaign_id: Set(campaign_id),
        creator_id: Set(payload.creator_id),
        offered_rate: Set(payload.offered_rate),
        status: Set(CampaignCreatorStatus::Invited),
        invited_at: Set(now),
        deliverables_completed: Set(0),
        deliverables_total: Set(payload.deliverables_total),
        ..Default::default()
    };
    let link = match link.insert(&txn).await {
        Ok(link) => link,
        Err(e) => return db_error("api.invite_creator.link_insert_failed", e),
    };

    let outreach = outreach_log::ActiveModel {
        campaign_creator_id: Set(link.id),
        outreach_type: Set(outreach_type),
        recipient_contact: Set(recipient),
        subject: Set(Some(subject)),
        message: Set(message),
        status: Set(OutreachStatus::Initiated),
        ..Default::default()
    };
    let outreach = match outreach.insert(&txn).await {
        Ok(outreach) => outreach,
        Err(e) => return db_error("api.invite_creator.outreach_insert_failed", e),
    };

    let signal = OutreachSignal {
        outreach_id: outreach.id,
        status: OutreachStatus::Initiated.as_str().to_string(),
    };
    if let Err(e) = enqueue_on(&txn, &channel_name, &signal).await {
        return db_error("api.invite_creator.enqueue_failed", e);
    }

    if let Err(e) = txn.commit().await {
        return db_error("api.invite_creator.txn_commit_failed", e);
    }

    tracing::info!(
        campaign_id,
        creator_id = link.creator_id,
        outreach_id = outreach.id,
        channel = %channel_name,
        "Creator invited, outreach enqueued"
    );

    match serde_json::to_value(&link) {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Serialization error: {e}") })),
        ),
    }
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/outreach/{id}",
    operation_id = "Get Outreach",
    tag = CAMPAIGNS_TAG,
    summary = "Fetch an outreach record with its delivery status",
    params(
        ("id" = i32, Path, description = "Outreach log id")
    ),
    responses(
        (status = 200, description = "Outreach record", body = outreach_log::Model, content_type = "application/json"),
        (status = 404, description = "Outreach record not found", content_type = "application/json"),
        (status = 500, description = "Internal server error", content_type = "application/json")
    )
)]
async fn get_outreach(
    Path(id): Path<i32>,
    Extension(resources): Extension<AppResources>,
) -> impl IntoResponse {
    match outreach_log::Entity::find_by_id(id)
        .one(resources.db.as_ref())
        .await
    {
        Ok(Some(record)) => match serde_json::to_value(&record) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Serialization error: {e}") })),
            ),
        },
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Outreach record not found" })),
        ),
        Err(e) => db_error("api.get_outreach.query_failed", e),
    }
}

fn db_error(event: &'static str, e: sea_orm::DbErr) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!(
        name = event,
        target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
        error = ?e,
        message = "Database operation failed"
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("DB error: {e}") })),
    )
}
