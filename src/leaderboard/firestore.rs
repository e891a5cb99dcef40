use super::{LeaderboardError, RemoteStore};
use crate::config::LeaderboardConfig;
use crate::consts;
use crate::highscores::ScoreEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use ureq::Agent;

/// A leaderboard kept in a Cloud Firestore collection, accessed via the REST
/// API.  Each document has the fields `name` (string), `score` (integer), and
/// `date` (timestamp).
#[derive(Clone, Debug)]
pub(crate) struct Firestore {
    /// HTTP client shared by all requests, with a timeout on each one
    agent: Agent,

    /// URL of the database's document root
    documents_url: String,
    collection: String,
    api_key: String,
}

impl Firestore {
    pub(crate) fn new(config: &LeaderboardConfig) -> Firestore {
        let endpoint = config.endpoint.trim_end_matches('/');
        let agent = Agent::config_builder()
            .timeout_global(Some(consts::LEADERBOARD_TIMEOUT))
            .build()
            .into();
        Firestore {
            agent,
            documents_url: format!(
                "{endpoint}/projects/{}/databases/(default)/documents",
                config.project_id
            ),
            collection: config.collection.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn query_url(&self) -> String {
        format!("{}:runQuery?key={}", self.documents_url, self.api_key)
    }

    fn create_url(&self) -> String {
        format!(
            "{}/{}?key={}",
            self.documents_url, self.collection, self.api_key
        )
    }

    fn top_scores_query(&self, limit: usize) -> serde_json::Value {
        json!({
            "structuredQuery": {
                "from": [{"collectionId": self.collection}],
                "orderBy": [{
                    "field": {"fieldPath": "score"},
                    "direction": "DESCENDING",
                }],
                "limit": limit,
            }
        })
    }
}

impl RemoteStore for Firestore {
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let rows = self
            .agent
            .post(self.query_url())
            .send_json(self.top_scores_query(limit))?
            .body_mut()
            .read_json::<Vec<QueryRow>>()?;
        Ok(decode_rows(rows)?)
    }

    fn submit(&self, entry: &ScoreEntry) -> Result<(), LeaderboardError> {
        let _ = self
            .agent
            .post(self.create_url())
            .send_json(Document::from(entry))?;
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

fn decode_rows(rows: Vec<QueryRow>) -> Result<Vec<ScoreEntry>, DecodeError> {
    rows.into_iter()
        .filter_map(|row| row.document)
        .map(|doc| ScoreEntry::try_from(doc.fields))
        .collect()
}

/// One element of the array returned by a `runQuery` request.  Rows without
/// a document only carry bookkeeping (e.g., the read time of an empty
/// result).
#[derive(Clone, Debug, Deserialize, PartialEq)]
struct QueryRow {
    document: Option<Document>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
struct Document {
    fields: Fields,
}

impl From<&ScoreEntry> for Document {
    fn from(entry: &ScoreEntry) -> Document {
        Document {
            fields: Fields {
                name: Value::StringValue(entry.name.clone()),
                score: Value::IntegerValue(entry.score.to_string()),
                date: Some(Value::TimestampValue(entry.date)),
            },
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
struct Fields {
    name: Value,
    score: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<Value>,
}

/// A typed Firestore value.  Only the types this game stores are supported.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
enum Value {
    StringValue(String),
    // Firestore encodes 64-bit integers as JSON strings
    IntegerValue(String),
    TimestampValue(DateTime<Utc>),
    NullValue(()),
}

impl TryFrom<Fields> for ScoreEntry {
    type Error = DecodeError;

    fn try_from(fields: Fields) -> Result<ScoreEntry, DecodeError> {
        let Value::StringValue(name) = fields.name else {
            return Err(DecodeError::FieldType("name"));
        };
        let Value::IntegerValue(score) = fields.score else {
            return Err(DecodeError::FieldType("score"));
        };
        let score = score
            .parse::<u32>()
            .map_err(|_| DecodeError::Score(score))?;
        let date = match fields.date {
            Some(Value::TimestampValue(date)) => date,
            Some(Value::NullValue(())) | None => DateTime::<Utc>::UNIX_EPOCH,
            Some(_) => return Err(DecodeError::FieldType("date")),
        };
        Ok(ScoreEntry { name, score, date })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum DecodeError {
    #[error("field {0:?} has the wrong type")]
    FieldType(&'static str),
    #[error("score {0:?} is not a valid non-negative integer")]
    Score(String),
}
