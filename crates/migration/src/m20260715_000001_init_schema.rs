use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Initial schema: campaigns, creators, the campaign-creator link, and the
/// outreach log that records every notification attempt.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaign::Table)
                    .if_not_exists()
                    .col(pk_auto(Campaign::Id))
                    .col(string(Campaign::Title))
                    .col(text_null(Campaign::Description))
                    .col(string(Campaign::BrandName))
                    .col(double(Campaign::Budget))
                    .col(timestamp_with_time_zone(Campaign::StartDate))
                    .col(timestamp_with_time_zone(Campaign::EndDate))
                    .col(
                        ColumnDef::new(Campaign::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        timestamp_with_time_zone(Campaign::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Creator::Table)
                    .if_not_exists()
                    .col(pk_auto(Creator::Id))
                    .col(string_uniq(Creator::Email))
                    .col(string_uniq(Creator::Username))
                    .col(string(Creator::FullName))
                    .col(string_null(Creator::Phone))
                    .col(string(Creator::Category))
                    .col(string_null(Creator::InstagramHandle))
                    .col(double_null(Creator::BaseRate))
                    .col(boolean(Creator::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Creator::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CampaignCreator::Table)
                    .if_not_exists()
                    .col(pk_auto(CampaignCreator::Id))
                    .col(integer(CampaignCreator::CampaignId))
                    .col(integer(CampaignCreator::CreatorId))
                    .col(double(CampaignCreator::OfferedRate))
                    .col(double_null(CampaignCreator::NegotiatedRate))
                    .col(double_null(CampaignCreator::FinalRate))
                    .col(
                        ColumnDef::new(CampaignCreator::Status)
                            .string()
                            .not_null()
                            .default("invited"),
                    )
                    .col(
                        timestamp_with_time_zone(CampaignCreator::InvitedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(CampaignCreator::AcceptedAt))
                    .col(timestamp_with_time_zone_null(CampaignCreator::CompletedAt))
                    .col(integer(CampaignCreator::DeliverablesCompleted).default(0))
                    .col(integer(CampaignCreator::DeliverablesTotal))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq_campaign_creator")
                    .table(CampaignCreator::Table)
                    .col(CampaignCreator::CampaignId)
                    .col(CampaignCreator::CreatorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OutreachLog::Table)
                    .if_not_exists()
                    .col(pk_auto(OutreachLog::Id))
                    .col(integer(OutreachLog::CampaignCreatorId))
                    .col(
                        ColumnDef::new(OutreachLog::OutreachType)
                            .string()
                            .not_null()
                            .comment("Channel: 'EMAIL', 'WHATSAPP' or 'INSTAGRAM_DM'"),
                    )
                    .col(string(OutreachLog::RecipientContact))
                    .col(string_null(OutreachLog::Subject))
                    .col(text(OutreachLog::Message))
                    .col(
                        ColumnDef::new(OutreachLog::Status)
                            .string()
                            .not_null()
                            .default("initiated"),
                    )
                    .col(timestamp_with_time_zone_null(OutreachLog::SentAt))
                    .col(timestamp_with_time_zone_null(OutreachLog::DeliveredAt))
                    .col(timestamp_with_time_zone_null(OutreachLog::ReadAt))
                    .col(timestamp_with_time_zone_null(OutreachLog::RepliedAt))
                    .col(text_null(OutreachLog::ResponseMessage))
                    .col(boolean_null(OutreachLog::IsPositiveResponse))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_outreach_log_campaign_creator_id")
                    .table(OutreachLog::Table)
                    .col(OutreachLog::CampaignCreatorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OutreachLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CampaignCreator::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Creator::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campaign::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Campaign {
    Table,
    Id,
    Title,
    Description,
    BrandName,
    Budget,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
}

#[derive(Iden)]
pub enum Creator {
    Table,
    Id,
    Email,
    Username,
    FullName,
    Phone,
    Category,
    InstagramHandle,
    BaseRate,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
pub enum CampaignCreator {
    Table,
    Id,
    CampaignId,
    CreatorId,
    OfferedRate,
    NegotiatedRate,
    FinalRate,
    Status,
    InvitedAt,
    AcceptedAt,
    CompletedAt,
    DeliverablesCompleted,
    DeliverablesTotal,
}

#[derive(Iden)]
pub enum OutreachLog {
    Table,
    Id,
    CampaignCreatorId,
    OutreachType,
    RecipientContact,
    Subject,
    Message,
    Status,
    SentAt,
    DeliveredAt,
    ReadAt,
    RepliedAt,
    ResponseMessage,
    IsPositiveResponse,
}
