//! Tests for the WhatsApp dispatch consumer, with the external messaging API
//! stubbed by wiremock.

mod common;

use std::sync::Arc;

use influenceflow_server::config::WhatsAppConfig;
use influenceflow_server::entity::campaign_creator::CampaignCreatorStatus;
use influenceflow_server::entity::outreach_log::{self, OutreachStatus, OutreachType};
use influenceflow_server::entity::campaign_creator;
use influenceflow_server::outreach::{DispatchOutcome, Dispatcher, WhatsAppDispatcher};
use influenceflow_server::whatsapp::WhatsAppClient;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use serde_json::{Value, json};
use time::OffsetDateTime;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Arc<WhatsAppClient> {
    Arc::new(
        WhatsAppClient::from_config(&WhatsAppConfig {
            api_url: server.uri(),
            api_token: "test-token".into(),
            timeout_secs: 5,
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn sends_connect_influencer_template_with_four_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "messaging_product": "whatsapp",
            "to": "+15550001111",
            "type": "template",
            "template": {
                "name": "connect_influencer",
                "language": { "code": "en" }
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let db = common::setup_db().await;
    let campaign = common::seed_campaign(&db, Some("Three reels over two weeks.")).await;
    let creator = common::seed_creator(&db, Some("+15550001111")).await;
    let link = common::seed_link(&db, campaign.id, creator.id).await;
    let record = common::seed_outreach(&db, link.id, OutreachType::Whatsapp, "+15550001111").await;

    let dispatcher = WhatsAppDispatcher::new(db.clone(), client_for(&server));
    let outcome = dispatcher.dispatch(record.id).await.unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::Delivered {
            outreach_id: record.id
        }
    );

    // Body parameters are positional: name, brand, description, description.
    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let params = body["template"]["components"][0]["parameters"]
        .as_array()
        .unwrap();
    let texts: Vec<&str> = params.iter().map(|p| p["text"].as_str().unwrap()).collect();
    assert_eq!(
        texts,
        vec![
            "Jamie Rivers",
            "Acme",
            "Three reels over two weeks.",
            "Three reels over two weeks.",
        ]
    );

    let updated = outreach_log::Entity::find_by_id(record.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, OutreachStatus::Sent);
}

#[tokio::test]
async fn missing_campaign_creator_aborts_before_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let db = common::setup_db().await;
    // Outreach row pointing at a campaign_creator that does not exist.
    let record = common::seed_outreach(&db, 9999, OutreachType::Whatsapp, "+15550001111").await;

    let dispatcher = WhatsAppDispatcher::new(db, client_for(&server));
    let outcome = dispatcher.dispatch(record.id).await.unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::LinkMissing {
            outreach_id: record.id,
            what: "campaign_creator",
        }
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_campaign_or_creator_aborts_before_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let db = common::setup_db().await;
    let campaign = common::seed_campaign(&db, None).await;

    // Link rows pointing at rows that do not exist.
    let orphan_campaign_link = campaign_creator::ActiveModel {
        campaign_id: Set(777_777),
        creator_id: Set(888_888),
        offered_rate: Set(500.0),
        status: Set(CampaignCreatorStatus::Invited),
        invited_at: Set(OffsetDateTime::now_utc()),
        deliverables_completed: Set(0),
        deliverables_total: Set(3),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .unwrap();
    let record_a =
        common::seed_outreach(&db, orphan_campaign_link.id, OutreachType::Whatsapp, "+1").await;

    let orphan_creator_link = campaign_creator::ActiveModel {
        campaign_id: Set(campaign.id),
        creator_id: Set(888_888),
        offered_rate: Set(500.0),
        status: Set(CampaignCreatorStatus::Invited),
        invited_at: Set(OffsetDateTime::now_utc()),
        deliverables_completed: Set(0),
        deliverables_total: Set(3),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .unwrap();
    let record_b =
        common::seed_outreach(&db, orphan_creator_link.id, OutreachType::Whatsapp, "+1").await;

    let dispatcher = WhatsAppDispatcher::new(db, client_for(&server));

    let outcome = dispatcher.dispatch(record_a.id).await.unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::LinkMissing {
            outreach_id: record_a.id,
            what: "campaign",
        }
    );

    let outcome = dispatcher.dispatch(record_b.id).await.unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::LinkMissing {
            outreach_id: record_b.id,
            what: "creator",
        }
    );

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn email_record_is_skipped_without_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let db = common::setup_db().await;
    let campaign = common::seed_campaign(&db, None).await;
    let creator = common::seed_creator(&db, None).await;
    let link = common::seed_link(&db, campaign.id, creator.id).await;
    let record = common::seed_outreach(&db, link.id, OutreachType::Email, &creator.email).await;

    let dispatcher = WhatsAppDispatcher::new(db.clone(), client_for(&server));
    let outcome = dispatcher.dispatch(record.id).await.unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::ChannelMismatch {
            outreach_id: record.id,
            expected: OutreachType::Whatsapp,
            actual: OutreachType::Email,
        }
    );
    assert!(server.received_requests().await.unwrap().is_empty());

    let untouched = outreach_log::Entity::find_by_id(record.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.status, OutreachStatus::Initiated);
}

#[tokio::test]
async fn non_2xx_response_marks_record_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .expect(1)
        .mount(&server)
        .await;

    let db = common::setup_db().await;
    let campaign = common::seed_campaign(&db, Some("Desc")).await;
    let creator = common::seed_creator(&db, Some("+15550001111")).await;
    let link = common::seed_link(&db, campaign.id, creator.id).await;
    let record = common::seed_outreach(&db, link.id, OutreachType::Whatsapp, "+15550001111").await;

    let dispatcher = WhatsAppDispatcher::new(db.clone(), client_for(&server));
    let outcome = dispatcher.dispatch(record.id).await.unwrap();
    match outcome {
        DispatchOutcome::Failed { outreach_id, reason } => {
            assert_eq!(outreach_id, record.id);
            assert!(reason.contains("500"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    let updated = outreach_log::Entity::find_by_id(record.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, OutreachStatus::Failed);
}
