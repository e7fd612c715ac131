use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Add the queue_message table backing the named outreach channels.
///
/// Each row is one pending signal on one channel; dequeue deletes the row,
/// so the table only ever holds messages that have not been consumed.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QueueMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(QueueMessage::Id))
                    .col(string(QueueMessage::Channel))
                    .col(
                        ColumnDef::new(QueueMessage::Payload)
                            .text()
                            .not_null()
                            .comment("JSON: {\"outreach_id\": <int>, \"status\": <string>}"),
                    )
                    .col(
                        timestamp_with_time_zone(QueueMessage::EnqueuedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_queue_message_channel")
                    .table(QueueMessage::Table)
                    .col(QueueMessage::Channel)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QueueMessage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum QueueMessage {
    Table,
    Id,
    Channel,
    Payload,
    EnqueuedAt,
}
