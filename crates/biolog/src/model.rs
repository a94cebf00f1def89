//! Entities stored by the backend.
//!
//! Writable entities keep every column optional: the same struct is decoded from a request
//! payload, drives one INSERT or partial UPDATE, and is read back from `RETURNING *`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FromRow, Record};

/// An application user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Record)]
#[orm(table = "biolog_user")]
pub struct User {
    #[orm(id)]
    pub id: Option<i32>,
    pub public_observations: Option<bool>,
    pub display_name: Option<String>,
}

/// Identity details received from an external authentication provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Record)]
#[orm(table = "external_user")]
pub struct ExternalUser {
    #[orm(id)]
    pub id: Option<i32>,
    pub external_id: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub external_auth_provider: Option<i32>,
    #[orm(column = "biolog_user")]
    pub user: Option<i32>,
}

/// An external authentication provider (e.g. Google).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AuthProvider {
    pub id: i32,
    pub name: String,
}

/// A species that has been observed and recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Record)]
#[orm(table = "species")]
pub struct Species {
    #[orm(id)]
    pub id: Option<i32>,
    pub species: Option<String>,
    pub kingdom: Option<String>,
    #[orm(column = "species_family")]
    pub family: Option<String>,
    #[orm(column = "species_class")]
    pub class: Option<String>,
    pub phylum: Option<String>,
    #[orm(column = "species_order")]
    pub order: Option<String>,
    pub genus: Option<String>,
    pub scientific_name: Option<String>,
    pub canonical_name: Option<String>,
    pub conservation_status: Option<i32>,
    pub gbif_key: Option<i32>,
}

/// A sighting of a species at a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Record)]
#[orm(table = "observation")]
pub struct Observation {
    #[orm(id)]
    pub id: Option<i32>,
    pub sighting_time: Option<DateTime<Utc>>,
    /// Stored as opaque text.
    pub sighting_location: Option<String>,
    pub quantity: Option<i32>,
    pub public_visibility: Option<bool>,
    #[orm(column = "biolog_user")]
    pub user: Option<i32>,
    pub species: Option<i32>,
}

/// IUCN-style conservation status acronym with localized names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ConservationStatus {
    pub id: i32,
    pub acronym: String,
    pub name_en: String,
    pub name_si: String,
}
