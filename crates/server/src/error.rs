use hyper::StatusCode;
use thiserror::Error;

/// Errors raised while dispatching a single outreach record.
///
/// These never escape a consumer's poll loop; the loop logs them and keeps
/// polling so one bad message cannot take the consumer down.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error("Invalid mailbox address: {0}")]
    Address(String),
    #[error("SMTP error: {0}")]
    Smtp(String),
    #[error("HTTP {status} from messaging API: {context}")]
    Http { status: StatusCode, context: String },
    #[error("Network error: {0}")]
    Network(String),
}
