//! Decoding broker envelopes into resources.

use rhc_client::{BrokerSession, ResponseEnvelope, Result};
use serde::de::DeserializeOwned;

/// A resource that is built from a server record plus the session that
/// fetched it.
pub(crate) trait Resource: Sized {
    /// Wire shape of one resource.
    type Record: DeserializeOwned;
    /// Envelope `type` for a single resource.
    const KIND: &'static str;
    /// Envelope `type` for a list of resources.
    const LIST_KIND: &'static str;

    fn from_record(session: &BrokerSession, record: Self::Record) -> Self;
}

pub(crate) fn decode_one<T: Resource>(
    session: &BrokerSession,
    envelope: ResponseEnvelope,
) -> Result<T> {
    let record: T::Record = envelope.into_data(T::KIND)?;
    Ok(T::from_record(session, record))
}

pub(crate) fn decode_list<T: Resource>(
    session: &BrokerSession,
    envelope: ResponseEnvelope,
) -> Result<Vec<T>> {
    // Some brokers answer an empty listing with `data: null`.
    if envelope.data.is_null() {
        envelope.expect_kind(T::LIST_KIND)?;
        return Ok(Vec::new());
    }
    let records: Vec<T::Record> = envelope.into_data(T::LIST_KIND)?;
    Ok(records
        .into_iter()
        .map(|record| T::from_record(session, record))
        .collect())
}
