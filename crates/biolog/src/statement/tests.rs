use super::*;
use crate::model::{Observation, Species, User};
use chrono::{TimeZone, Utc};

fn david() -> User {
    User {
        id: None,
        public_observations: None,
        display_name: Some("David Rubin".to_string()),
    }
}

#[test]
fn builds_placeholders_in_order() {
    let mut q = Statement::new("SELECT * FROM species WHERE genus = ");
    q.push_bind("Ursus").push(" AND id = ").push_bind(3);

    assert_eq!(q.to_sql(), "SELECT * FROM species WHERE genus = $1 AND id = $2");
    assert_eq!(q.args(), &[Value::from("Ursus"), Value::Int4(3)]);
}

#[test]
fn push_ident_rejects_unsafe() {
    let mut q = Statement::empty();
    assert!(q.push_ident("species").is_ok());
    assert!(q.push_ident("species; drop table species; --").is_err());
    assert_eq!(q.to_sql(), "species");
}

#[test]
fn insert_skips_absent_fields() {
    let q = build_insert("users", &david()).unwrap();
    assert_eq!(
        q.to_sql(),
        "INSERT INTO users (display_name) VALUES ($1) RETURNING *"
    );
    assert_eq!(q.args(), &[Value::Text("David Rubin".into())]);
}

#[test]
fn update_binds_id_last() {
    let q = build_update("users", &david(), 42).unwrap();
    assert_eq!(
        q.to_sql(),
        "UPDATE users SET display_name = $1 WHERE id = $2"
    );
    assert_eq!(
        q.args(),
        &[Value::Text("David Rubin".into()), Value::Int4(42)]
    );
}

#[test]
fn update_ignores_identifier_carried_by_record() {
    let mut user = david();
    user.id = Some(7);
    let q = build_update("biolog_user", &user, 42).unwrap();
    assert_eq!(
        q.to_sql(),
        "UPDATE biolog_user SET display_name = $1 WHERE id = $2"
    );
    assert_eq!(q.args().last(), Some(&Value::Int4(42)));
    assert!(!q.args().contains(&Value::Int4(7)));
}

#[test]
fn insert_never_lists_identifier() {
    let mut user = david();
    user.id = Some(7);
    let q = build_insert("biolog_user", &user).unwrap();
    assert!(!q.to_sql().contains("(id"));
    assert_eq!(q.args().len(), 1);
}

#[test]
fn zero_values_are_still_present() {
    let user = User {
        id: None,
        public_observations: Some(false),
        display_name: Some(String::new()),
    };
    let q = build_insert("biolog_user", &user).unwrap();
    assert_eq!(
        q.to_sql(),
        "INSERT INTO biolog_user (public_observations, display_name) VALUES ($1, $2) RETURNING *"
    );
    assert_eq!(
        q.args(),
        &[Value::Bool(false), Value::Text(String::new())]
    );
}

#[test]
fn empty_record_is_rejected_by_both_builders() {
    let empty = User::default();

    let err = build_insert("biolog_user", &empty).unwrap_err();
    assert!(matches!(err, StoreError::EmptyRecord { ref table } if table == "biolog_user"));

    let err = build_update("biolog_user", &empty, 1).unwrap_err();
    assert!(matches!(err, StoreError::EmptyRecord { .. }));
}

#[test]
fn identifier_only_record_counts_as_empty() {
    let only_id = User {
        id: Some(5),
        ..Default::default()
    };
    assert!(matches!(
        build_update("biolog_user", &only_id, 5),
        Err(StoreError::EmptyRecord { .. })
    ));
}

#[test]
fn invalid_table_is_rejected() {
    assert!(matches!(
        build_insert("users; --", &david()),
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        build_update("", &david(), 1),
        Err(StoreError::Validation(_))
    ));
}

#[test]
fn unbindable_id_is_malformed() {
    let err = build_update("biolog_user", &david(), u64::MAX).unwrap_err();
    assert!(matches!(err, StoreError::MalformedRecord { ref field, .. } if field == "id"));
}

#[test]
fn column_order_follows_declaration_order() {
    let sp = Species {
        genus: Some("Lynx".into()),
        kingdom: Some("Animalia".into()),
        order: Some("Carnivora".into()),
        gbif_key: Some(2_435_240),
        ..Default::default()
    };
    let q = build_insert("species", &sp).unwrap();
    assert_eq!(
        q.to_sql(),
        "INSERT INTO species (kingdom, species_order, genus, gbif_key) VALUES ($1, $2, $3, $4) RETURNING *"
    );
    assert_eq!(
        q.args(),
        &[
            Value::from("Animalia"),
            Value::from("Carnivora"),
            Value::from("Lynx"),
            Value::Int4(2_435_240),
        ]
    );
}

#[test]
fn placeholders_match_args() {
    let seen = Utc.with_ymd_and_hms(2018, 5, 12, 9, 30, 0).unwrap();
    let ob = Observation {
        sighting_time: Some(seen),
        sighting_location: Some("46.05,14.51".into()),
        quantity: Some(2),
        public_visibility: Some(true),
        user: Some(1),
        species: Some(3),
        ..Default::default()
    };

    let insert = build_insert("observation", &ob).unwrap();
    assert_eq!(insert.placeholder_count(), insert.args().len());
    assert_eq!(insert.args().len(), 6);
    assert_eq!(insert.args()[0], Value::Timestamptz(seen));
    assert!(insert.to_sql().contains("biolog_user"));
    assert!(insert.to_sql().contains("$6) RETURNING *"));

    let update = build_update("observation", &ob, 10).unwrap();
    assert_eq!(update.placeholder_count(), 7);
    assert!(update.to_sql().ends_with("WHERE id = $7"));
    assert_eq!(update.args()[6], Value::Int4(10));
}

#[test]
fn building_twice_is_identical() {
    let ob = Observation {
        quantity: Some(4),
        species: Some(11),
        ..Default::default()
    };
    let a = build_update("observation", &ob, 3).unwrap();
    let b = build_update("observation", &ob, 3).unwrap();
    assert_eq!(a.to_sql(), b.to_sql());
    assert_eq!(a, b);
}

#[test]
fn into_parts_splits_text_and_args() {
    let (sql, args) = build_insert("biolog_user", &david()).unwrap().into_parts();
    assert_eq!(
        sql,
        "INSERT INTO biolog_user (display_name) VALUES ($1) RETURNING *"
    );
    assert_eq!(args, vec![Value::from("David Rubin")]);
}

#[allow(dead_code)]
#[derive(crate::Record)]
#[orm(table = "observation")]
struct ObservationPatch {
    id: Option<i32>,
    quantity: Option<i32>,
    sighting_location: Option<Option<String>>,
}

#[test]
fn explicit_null_is_present() {
    let patch = ObservationPatch {
        id: None,
        quantity: None,
        sighting_location: Some(None),
    };
    let q = build_update("observation", &patch, 9).unwrap();
    assert_eq!(
        q.to_sql(),
        "UPDATE observation SET sighting_location = $1 WHERE id = $2"
    );
    assert_eq!(q.args(), &[Value::Null, Value::Int4(9)]);

    let cleared = ObservationPatch {
        sighting_location: None,
        ..patch
    };
    assert!(build_update("observation", &cleared, 9).is_err());
}

#[test]
fn payload_decoded_record_builds_update() {
    let body = r#"{"quantity": 3, "public_visibility": false}"#;
    let ob: Observation = serde_json::from_str(body).unwrap();
    let q = build_update("observation", &ob, 12).unwrap();
    assert_eq!(
        q.to_sql(),
        "UPDATE observation SET quantity = $1, public_visibility = $2 WHERE id = $3"
    );
    assert_eq!(
        q.args(),
        &[Value::Int4(3), Value::Bool(false), Value::Int4(12)]
    );
}
