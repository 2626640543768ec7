use api_types::{
    DEFAULT_ERROR,
    command::{Command, CommandRequest},
    envelope::Envelope,
    query::ReadAction,
    stats::Stats,
    transaction::{Transaction, TransactionDraft},
};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    session::Credential,
};

/// Every way a request can fail, reduced to something an alert can show.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered `ok: false`; the message is shown verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("response carried no data")]
    MissingData,
    #[error("server answered {0}")]
    Status(StatusCode),
    /// The server answered, but not with an envelope of the expected shape.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server not reachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(api_url: &str) -> Result<Self> {
        let endpoint = Url::parse(api_url).map_err(|err| AppError::InvalidUrl(err.to_string()))?;
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `GET ?action=<action>`, returning the envelope's `data`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        action: ReadAction,
    ) -> std::result::Result<T, ApiError> {
        tracing::debug!(action = action.as_str(), "query");
        let res = self
            .http
            .get(self.endpoint.clone())
            .query(&[("action", action.as_str())])
            .send()
            .await?;

        let envelope = read_envelope::<T>(res).await?;
        match envelope.into_result() {
            Ok(Some(data)) => Ok(data),
            Ok(None) => Err(ApiError::MissingData),
            Err(message) => {
                tracing::warn!(action = action.as_str(), "query rejected: {message}");
                Err(ApiError::Rejected(message))
            }
        }
    }

    /// `POST` of a mutating command with the session password attached.
    pub async fn command(
        &self,
        command: Command,
        credential: &Credential,
    ) -> std::result::Result<Envelope<serde_json::Value>, ApiError> {
        let action = command.name();
        tracing::debug!(action, "command");
        let body = CommandRequest {
            command,
            password: credential.expose().to_string(),
        };

        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let envelope = read_envelope::<serde_json::Value>(res).await?;
        if envelope.ok {
            return Ok(envelope);
        }
        let message = envelope
            .into_result()
            .err()
            .unwrap_or_else(|| DEFAULT_ERROR.to_string());
        tracing::warn!(action, "command rejected: {message}");
        Err(ApiError::Rejected(message))
    }

    pub async fn list(&self) -> std::result::Result<Vec<Transaction>, ApiError> {
        self.query(ReadAction::List).await
    }

    pub async fn stats(&self) -> std::result::Result<Stats, ApiError> {
        self.query(ReadAction::Stats).await
    }

    /// Creates or updates, depending on whether the draft already has an id.
    pub async fn save(
        &self,
        draft: TransactionDraft,
        credential: &Credential,
    ) -> std::result::Result<(), ApiError> {
        self.command(draft.into_command(), credential).await?;
        Ok(())
    }

    pub async fn delete(
        &self,
        id: &str,
        credential: &Credential,
    ) -> std::result::Result<(), ApiError> {
        self.command(Command::Delete { id: id.to_string() }, credential)
            .await?;
        Ok(())
    }
}

async fn read_envelope<T: DeserializeOwned>(
    res: reqwest::Response,
) -> std::result::Result<Envelope<T>, ApiError> {
    let status = res.status();
    let body = res.text().await?;
    match serde_json::from_str::<Envelope<T>>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(ApiError::Status(status)),
        Err(err) => Err(ApiError::Decode(err)),
    }
}
