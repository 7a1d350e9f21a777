//! Field mapping between character records, stored documents and
//! resource/data-source state.
//!
//! All functions here are pure and total.

use crate::model::{
    Character, CharacterDataSourceModel, CharacterDocument, CharacterResourceModel,
    CharacterSource,
};
use buildonaws_opensearch::Hit;

/// Record to document.
pub fn to_document(record: &Character) -> CharacterDocument {
    CharacterDocument {
        id: record.id.clone(),
        source: CharacterSource {
            fullname: record.full_name.clone(),
            identity: record.identity.clone(),
            knownas: record.known_as.clone(),
            kind: record.kind.clone(),
        },
    }
}

/// Document to record.
pub fn from_document(document: &CharacterDocument) -> Character {
    Character {
        id: document.id.clone(),
        full_name: document.source.fullname.clone(),
        identity: document.source.identity.clone(),
        known_as: document.source.knownas.clone(),
        kind: document.source.kind.clone(),
    }
}

/// Attach the store identifier to a fetched `_source`.
pub fn document_from_source(id: &str, source: CharacterSource) -> CharacterDocument {
    CharacterDocument {
        id: id.to_string(),
        source,
    }
}

/// Document from a search hit; the identifier comes from the hit's `_id`.
pub fn document_from_hit(hit: &Hit<CharacterSource>) -> CharacterDocument {
    document_from_source(&hit.meta.id, hit.doc.clone())
}

/// Record carried by a resource plan or state.
pub fn record_from_resource(model: &CharacterResourceModel) -> Character {
    Character {
        id: model.id.clone().unwrap_or_default(),
        full_name: model.fullname.clone(),
        identity: model.identity.clone(),
        known_as: model.knownas.clone(),
        kind: model.kind.clone(),
    }
}

/// Overwrite every mutable field of the resource state from a record.
///
/// The identifier and `last_updated` are left untouched.
pub fn refresh_resource(model: &mut CharacterResourceModel, record: &Character) {
    model.fullname = record.full_name.clone();
    model.identity = record.identity.clone();
    model.knownas = record.known_as.clone();
    model.kind = record.kind.clone();
}

/// Project a record into data-source state.
pub fn data_source_from_record(record: &Character) -> CharacterDataSourceModel {
    CharacterDataSourceModel {
        id: record.id.clone(),
        fullname: record.full_name.clone(),
        identity: record.identity.clone(),
        knownas: record.known_as.clone(),
        kind: record.kind.clone(),
    }
}
