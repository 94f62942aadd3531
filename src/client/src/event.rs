use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const TYPE_KEY: &str = "type";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("event must be a JSON object")]
    NotAnObject,

    #[error("event is missing a non-empty string `type`")]
    MissingType,

    #[error("`{0}` is reserved for the event type")]
    ReservedField(String),
}

/// A single event: a required `type` plus any other JSON fields
///
/// Fields keep their insertion order so equal events always serialize to the
/// same bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Event {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Result<Self, EventError> {
        let kind = kind.into();
        if kind.is_empty() {
            return Err(EventError::MissingType);
        }

        Ok(Event {
            kind,
            fields: Map::new(),
        })
    }

    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, EventError> {
        let key = key.into();
        if key == TYPE_KEY {
            return Err(EventError::ReservedField(key));
        }

        self.fields.insert(key, value.into());
        Ok(self)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Fields other than `type`
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Value> for Event {
    type Error = EventError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(EventError::NotAnObject);
        };

        // shift_remove keeps the remaining fields in their original order
        let kind = match fields.shift_remove(TYPE_KEY) {
            Some(Value::String(kind)) if !kind.is_empty() => kind,
            _ => return Err(EventError::MissingType),
        };

        Ok(Event { kind, fields })
    }
}

impl From<Event> for Value {
    fn from(event: Event) -> Self {
        let mut object = Map::with_capacity(event.fields.len() + 1);
        object.insert(TYPE_KEY.to_string(), Value::String(event.kind));
        object.extend(event.fields);
        Value::Object(object)
    }
}

/// Input of [`EventClient::send`](crate::EventClient::send): one event or many
///
/// Both shapes go over the wire as a JSON array.
#[derive(Clone, Copy, Debug)]
pub enum Events<'a> {
    One(&'a Event),
    Many(&'a [Event]),
}

impl<'a> Events<'a> {
    /// The events as the sequence that is sent, wrapping a single event
    pub fn as_slice(&self) -> &'a [Event] {
        match *self {
            Events::One(event) => std::slice::from_ref(event),
            Events::Many(events) => events,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<'a> From<&'a Event> for Events<'a> {
    fn from(event: &'a Event) -> Self {
        Events::One(event)
    }
}

impl<'a> From<&'a [Event]> for Events<'a> {
    fn from(events: &'a [Event]) -> Self {
        Events::Many(events)
    }
}

impl<'a> From<&'a Vec<Event>> for Events<'a> {
    fn from(events: &'a Vec<Event>) -> Self {
        Events::Many(events.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [Event; N]> for Events<'a> {
    fn from(events: &'a [Event; N]) -> Self {
        Events::Many(events.as_slice())
    }
}

impl Serialize for Events<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}
