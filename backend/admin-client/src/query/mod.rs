//! Query-string serialization for the collection endpoints.
//!
//! Each filter type declares an ordered table of `QueryField`s. Serializing
//! walks the table in order and emits `name=value` only for fields that are
//! present and non-empty, form-URL-encoding the value (`:` becomes `%3A`,
//! space becomes `+`). The output never depends on struct layout.

pub mod filters;

pub use filters::{DateRange, IpStatisticsFilter, LogFilter, TimelineFilter};

use url::form_urlencoded;

/// One recognized query parameter of a filter type.
///
/// `value` is both the presence predicate and the string conversion:
/// `None` means the caller did not supply the field.
pub struct QueryField<F> {
    pub name: &'static str,
    pub value: fn(&F) -> Option<String>,
}

/// A set of optional filter/pagination fields for one endpoint.
pub trait QueryFilter: Sized + 'static {
    /// Recognized fields, in serialization order.
    const FIELDS: &'static [QueryField<Self>];

    fn to_query_string(&self) -> String {
        serialize_query(self, Self::FIELDS)
    }
}

pub fn serialize_query<F>(filter: &F, fields: &[QueryField<F>]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for field in fields {
        match (field.value)(filter) {
            Some(value) if !value.is_empty() => {
                serializer.append_pair(field.name, &value);
            }
            _ => {}
        }
    }

    serializer.finish()
}

pub(crate) fn text(value: &Option<String>) -> Option<String> {
    value.clone()
}

pub(crate) fn number(value: Option<u32>) -> Option<String> {
    value.map(|n| n.to_string())
}

pub(crate) fn flag(value: Option<bool>) -> Option<String> {
    value.map(|b| if b { "true" } else { "false" }.to_string())
}
