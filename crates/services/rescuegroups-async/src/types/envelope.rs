//! Request and response envelopes exchanged with the search endpoint

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lenient;
use crate::error::FieldErrors;

/// Resource an envelope targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectType {
    /// Adoptable animals
    #[serde(rename = "animals")]
    Animal,
    /// Rescue organizations
    #[serde(rename = "orgs")]
    Organization,
}

/// Action requested of the upstream; only search is used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectAction {
    /// Search action
    #[default]
    Search,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending (default)
    #[default]
    Asc,
    /// Descending
    Desc,
}

/// Comparison applied by a [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperation {
    /// Field equals criteria
    Equals,
    /// Field differs from criteria
    NotEquals,
    /// Field is less than criteria
    LessThan,
    /// Field is less than or equal to criteria
    LessThanOrEqual,
    /// Field is greater than criteria
    GreaterThan,
    /// Field is greater than or equal to criteria
    GreaterThanOrEqual,
    /// Field contains criteria
    Contains,
    /// Field does not contain criteria
    #[serde(rename = "notcontain")]
    NotContains,
    /// Field is empty
    Blank,
    /// Field is not empty
    NotBlank,
}

/// Value a filter compares against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Criteria {
    /// Text criteria
    Text(String),
    /// Numeric criteria
    Number(i64),
    /// Boolean criteria
    Bool(bool),
}

impl From<&str> for Criteria {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Criteria {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for Criteria {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<bool> for Criteria {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One field/operation/criteria predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Upstream field name
    pub field_name: String,
    /// Comparison
    pub operation: FilterOperation,
    /// Value compared against
    pub criteria: Criteria,
}

impl Filter {
    /// Creates a filter
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        operation: FilterOperation,
        criteria: impl Into<Criteria>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            operation,
            criteria: criteria.into(),
        }
    }

    /// Shorthand for an `equals` filter
    #[must_use]
    pub fn equals(field_name: impl Into<String>, criteria: impl Into<Criteria>) -> Self {
        Self::new(field_name, FilterOperation::Equals, criteria)
    }
}

/// AND of every filter by 1-based position: `"1 2 3"`. `None` for fewer
/// than two filters.
#[must_use]
pub fn conjunction(filter_count: usize) -> Option<String> {
    (filter_count > 1).then(|| {
        (1..=filter_count)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// The `search` block of a request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBlock {
    /// Offset of the first result
    pub result_start: u32,
    /// Page size, already clamped
    pub result_limit: u32,
    /// Field results are sorted by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_sort: Option<String>,
    /// Sort direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_order: Option<SortOrder>,
    /// Whether the upstream should count all matching rows
    #[serde(serialize_with = "yes_no", deserialize_with = "from_yes_no")]
    pub calc_found_rows: bool,
    /// Predicates, numbered positionally by the upstream
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Combination expression over filter positions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_processing: Option<String>,
    /// Fields to return per record
    pub fields: Vec<String>,
}

/// A request envelope before the credential is attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Target resource
    pub object_type: ObjectType,
    /// Requested action
    pub object_action: ObjectAction,
    /// Search parameters
    pub search: SearchBlock,
}

impl RequestEnvelope {
    /// Creates a search envelope for the given resource
    #[must_use]
    pub fn search(object_type: ObjectType, search: SearchBlock) -> Self {
        Self {
            object_type,
            object_action: ObjectAction::Search,
            search,
        }
    }
}

/// Wire form of an envelope with the credential injected
#[derive(Serialize)]
pub(crate) struct AuthenticatedEnvelope<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apikey: Option<&'a str>,
    #[serde(flatten)]
    pub envelope: &'a RequestEnvelope,
}

/// Outcome tag of a response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// Success
    Ok,
    /// Success with non-fatal messages
    Warning,
    /// Failure
    Error,
}

/// One upstream message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Upstream message identifier
    #[serde(rename = "messageID", default)]
    pub id: Option<String>,
    /// Severity as reported upstream
    #[serde(rename = "messageCriticality", default)]
    pub criticality: Option<String>,
    /// Message text
    #[serde(rename = "messageText", default, deserialize_with = "lenient::null_as_default")]
    pub text: String,
}

/// The `messages` block of a response envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeMessages {
    /// Messages about the request as a whole
    #[serde(default, deserialize_with = "lenient::list")]
    pub general_messages: Vec<Message>,
    /// Messages about individual records
    #[serde(default, deserialize_with = "lenient::list")]
    pub record_messages: Vec<Message>,
    /// Validation errors keyed by field, in upstream order
    #[serde(
        default,
        deserialize_with = "lenient_field_errors",
        skip_serializing_if = "Option::is_none"
    )]
    pub errors: Option<FieldErrors>,
}

/// A response envelope as received
///
/// Records stay raw JSON until the response parser decodes them, so an
/// error envelope is classified before any record is looked at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Outcome tag
    pub status: EnvelopeStatus,
    /// Upstream messages
    #[serde(default, deserialize_with = "lenient_messages")]
    pub messages: Option<EnvelopeMessages>,
    /// Total matching rows, when requested
    #[serde(default, deserialize_with = "lenient_count")]
    pub found_rows: Option<u64>,
    /// Records keyed by id, in upstream order
    #[serde(default, deserialize_with = "records")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ResponseEnvelope {
    /// Text of the general messages, in order
    #[must_use]
    pub fn general_message_texts(&self) -> Vec<String> {
        self.messages
            .iter()
            .flat_map(|m| m.general_messages.iter().map(|msg| msg.text.clone()))
            .collect()
    }
}

fn yes_no<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(if *value { "Yes" } else { "No" })
}

fn from_yes_no<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(d)?;
    Ok(raw.eq_ignore_ascii_case("yes"))
}

fn lenient_messages<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<EnvelopeMessages>, D::Error> {
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(d)? {
        None => Ok(None),
        Some(value) if lenient::is_empty_collection(&value) => Ok(None),
        Some(value) => EnvelopeMessages::deserialize(value)
            .map(Some)
            .map_err(D::Error::custom),
    }
}

fn lenient_field_errors<'de, D: Deserializer<'de>>(d: D) -> Result<Option<FieldErrors>, D::Error> {
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(d)? {
        None => Ok(None),
        Some(value) if lenient::is_empty_collection(&value) => Ok(None),
        Some(serde_json::Value::Object(map)) => Ok(Some(
            map.into_iter()
                .map(|(field, errs)| (field, lenient::texts(errs)))
                .collect(),
        )),
        Some(other) => Err(D::Error::custom(format!(
            "expected field error map, got {other}"
        ))),
    }
}

// The upstream sends counts as numbers or numeric strings.
fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(d)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid row count: {n}"))),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid row count: {s}"))),
        Some(other) => Err(D::Error::custom(format!("invalid row count: {other}"))),
    }
}

// An empty result set arrives as `[]` rather than `{}`.
fn records<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<serde_json::Map<String, serde_json::Value>>, D::Error> {
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(d)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) => Ok(Some(map)),
        Some(serde_json::Value::Array(items)) if items.is_empty() => {
            Ok(Some(serde_json::Map::new()))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected record map, got {other}"
        ))),
    }
}
