//! SeaORM entities, one module per table.

pub mod campaign;
pub mod campaign_creator;
pub mod creator;
pub mod outreach_log;
pub mod queue_message;
