//! Content type reconciliation against the in-memory management API.

use cfsync_api::{ApiResponse, HttpMethod};
use cfsync_core::constants::MANAGED_DESCRIPTION_MARKER;
use cfsync_core::errors::CfsyncError;
use cfsync_core::{Field, Items, ReconcileStatus};
use cfsync_reconcile::normalize::validation_equivalent;
use cfsync_reconcile::{ContentTypeReconciler, ContentTypeState};
use test_fixtures::{content_type_path, fake_client, load_fixture_value, FakeContentful};

const SPACE: &str = "space1";
const ENV: &str = "master";

fn blog_post() -> ContentTypeState {
    ContentTypeState::new(SPACE, ENV, "blogPost", "Blog Post")
        .with_description("Articles on the public blog")
        .with_display_field("title")
        .with_field(
            Field::new("title", "Title", "Symbol")
                .required()
                .with_validation(r#"{"unique":true}"#),
        )
        .with_field(Field::new("body", "Body", "Text"))
        .with_field(
            Field::new("tags", "Tags", "Array").with_items(Items::new("Symbol")),
        )
}

/// Create `state` on `fake` and forget the requests it took.
fn created(fake: &std::sync::Arc<FakeContentful>, state: &mut ContentTypeState) {
    let client = fake_client(fake);
    ContentTypeReconciler::new(&client).create(state).unwrap();
    fake.clear_requests();
}

#[test]
fn create_puts_at_version_one_then_activates() {
    let fake = FakeContentful::new();
    let client = fake_client(&fake);
    let mut state = blog_post();

    ContentTypeReconciler::new(&client).create(&mut state).unwrap();

    let requests = fake.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(requests[0].path, content_type_path(SPACE, ENV, "blogPost"));
    assert_eq!(requests[0].version, Some(1));
    assert!(requests[1].is_publish());
    assert_eq!(requests[1].version, Some(1));

    let body = requests[0].body.as_ref().unwrap();
    assert_eq!(
        body["description"],
        format!("{MANAGED_DESCRIPTION_MARKER}Articles on the public blog")
    );
    assert_eq!(body["displayField"], "title");
    assert_eq!(body["fields"][0]["validations"][0]["unique"], true);
    assert_eq!(body["fields"][2]["items"]["type"], "Symbol");
    assert!(body.get("protected").is_none());

    assert_eq!(state.id.as_deref(), Some("space1/master/blogPost"));
    assert_eq!(state.version, 2);
    assert_eq!(state.status, ReconcileStatus::Active);
}

#[test]
fn create_without_description_sends_marker_only() {
    let fake = FakeContentful::new();
    let client = fake_client(&fake);
    let mut state = ContentTypeState::new(SPACE, ENV, "page", "Page");

    ContentTypeReconciler::new(&client).create(&mut state).unwrap();

    let body = fake.requests()[0].body.clone().unwrap();
    assert_eq!(body["description"], MANAGED_DESCRIPTION_MARKER);
    assert!(body.get("displayField").is_none());
}

#[test]
fn create_with_empty_env_uses_default_environment() {
    let fake = FakeContentful::new();
    let client = fake_client(&fake);
    let mut state = ContentTypeState::new(SPACE, "", "page", "Page");

    ContentTypeReconciler::new(&client).create(&mut state).unwrap();

    assert_eq!(fake.requests()[0].path, content_type_path(SPACE, "master", "page"));
    assert_eq!(state.id.as_deref(), Some("space1//page"));
}

#[test]
fn malformed_field_fails_before_any_request() {
    let fake = FakeContentful::new();
    let client = fake_client(&fake);
    let mut state = blog_post().with_field(
        Field::new("views", "Views", "Integer").with_default_value("{\"en-US\":"),
    );

    let err = ContentTypeReconciler::new(&client).create(&mut state).unwrap_err();

    assert!(matches!(err, CfsyncError::Shape(_)));
    assert!(err.to_string().contains("views"));
    assert_eq!(fake.request_count(), 0);
    assert_eq!(state.status, ReconcileStatus::Absent);
}

#[test]
fn read_populates_observed_state_from_remote() {
    let fake = FakeContentful::new();
    fake.insert(
        &content_type_path(SPACE, ENV, "blogPost"),
        load_fixture_value("api/content_type.json"),
    );
    let client = fake_client(&fake);
    let mut state = ContentTypeState {
        id: Some("space1/master/blogPost".into()),
        ..Default::default()
    };

    ContentTypeReconciler::new(&client).read(&mut state).unwrap();

    assert_eq!(state.version, 6);
    assert_eq!(state.name, "Blog Post");
    assert_eq!(state.description.as_deref(), Some("Articles on the public blog"));
    assert_eq!(state.display_field, "title");
    assert_eq!(state.space_id, SPACE);
    assert_eq!(state.env_id, ENV);
    assert_eq!(state.content_type_id, "blogPost");
    assert_eq!(state.status, ReconcileStatus::Active);

    let ids: Vec<&str> = state.fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["title", "views", "author", "tags", "notes"]);

    let title = &state.fields[0];
    assert!(title.required && title.localized);
    let title_rules = title.validations.as_ref().unwrap();
    assert_eq!(title_rules.len(), 1);
    assert!(validation_equivalent(
        &title_rules[0],
        r#"{"size":{"min":3,"max":120}}"#
    ));
    assert_eq!(state.fields[1].default_value.as_deref(), Some(r#"{"en-US":0}"#));
    assert_eq!(state.fields[2].link_type.as_deref(), Some("Entry"));

    let items = state.fields[3].items.as_ref().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_type, "Symbol");
    assert_eq!(
        items[0].validations.as_deref(),
        Some(&[r#"{"in":["news","howto","release"]}"#.to_string()][..])
    );

    let notes = &state.fields[4];
    assert_eq!(notes.default_value, None);
    assert!(notes.disabled);
    assert_eq!(notes.validations.as_deref(), Some(&[][..]));
}

#[test]
fn read_of_missing_content_type_marks_absent() {
    let fake = FakeContentful::new();
    let client = fake_client(&fake);
    let mut state = ContentTypeState {
        id: Some("space1/master/gone".into()),
        status: ReconcileStatus::Active,
        ..Default::default()
    };

    ContentTypeReconciler::new(&client).read(&mut state).unwrap();

    assert_eq!(state.id, None);
    assert_eq!(state.status, ReconcileStatus::Absent);
    assert_eq!(fake.request_count(), 1);
}

#[test]
fn read_surfaces_other_errors() {
    let fake = FakeContentful::new();
    fake.queue_response(ApiResponse::new(500, "upstream exploded"));
    let client = fake_client(&fake);
    let mut state = ContentTypeState {
        id: Some("space1/master/blogPost".into()),
        ..Default::default()
    };

    let err = ContentTypeReconciler::new(&client).read(&mut state).unwrap_err();

    assert!(err.to_string().contains("status code 500 when reading content_type"));
    assert!(err.to_string().ends_with("upstream exploded"));
    assert_eq!(state.id.as_deref(), Some("space1/master/blogPost"));
}

#[test]
fn invalid_identifier_is_rejected_without_requests() {
    let fake = FakeContentful::new();
    let client = fake_client(&fake);
    let reconciler = ContentTypeReconciler::new(&client);

    for bad in ["space1/master", "space1/master/post/extra"] {
        let mut state = ContentTypeState {
            id: Some(bad.into()),
            ..Default::default()
        };
        let err = reconciler.read(&mut state).unwrap_err();
        assert_eq!(err.to_string(), format!("Got invalid id: {bad}"));
        assert!(reconciler.update(&mut state, &[]).is_err());
    }
    assert_eq!(fake.request_count(), 0);
}

#[test]
fn update_without_deletions_is_one_put_and_activate() {
    let fake = FakeContentful::new();
    let mut state = blog_post();
    created(&fake, &mut state);
    let previous = state.fields.clone();
    state.fields.push(Field::new("summary", "Summary", "Text"));

    let client = fake_client(&fake);
    ContentTypeReconciler::new(&client)
        .update(&mut state, &previous)
        .unwrap();

    let requests = fake.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].version, Some(2));
    assert_eq!(requests[0].field_ids(), ["title", "body", "tags", "summary"]);
    assert!(requests[1].is_publish());
    assert_eq!(requests[1].version, Some(3));
    assert_eq!(state.version, 4);
    assert_eq!(state.status, ReconcileStatus::Active);
}

#[test]
fn update_with_deletions_omits_first_then_removes() {
    let fake = FakeContentful::new();
    let mut state = blog_post();
    created(&fake, &mut state);
    let previous = state.fields.clone();
    state.fields.retain(|f| f.id != "body");

    let client = fake_client(&fake);
    ContentTypeReconciler::new(&client)
        .update(&mut state, &previous)
        .unwrap();

    let requests = fake.requests();
    assert_eq!(requests.len(), 4);

    // Phase 1: old list, removed field omitted.
    assert!(!requests[0].is_publish());
    assert_eq!(requests[0].field_ids(), ["title", "body", "tags"]);
    assert_eq!(requests[0].omitted_ids(), ["body"]);
    assert!(requests[1].is_publish());

    // Phase 2: new list.
    assert!(!requests[2].is_publish());
    assert_eq!(requests[2].field_ids(), ["title", "tags"]);
    assert!(requests[2].omitted_ids().is_empty());
    assert!(requests[3].is_publish());

    let versions: Vec<u64> = requests.iter().map(|r| r.version.unwrap()).collect();
    assert_eq!(versions, [2, 3, 4, 5]);
    assert_eq!(state.version, 6);
    assert_eq!(state.status, ReconcileStatus::Active);
}

#[test]
fn protected_content_type_refuses_field_removal() {
    let fake = FakeContentful::new();
    let mut state = blog_post().protected();
    created(&fake, &mut state);
    let previous = state.fields.clone();
    state.fields.retain(|f| f.id == "title");

    let client = fake_client(&fake);
    let err = ContentTypeReconciler::new(&client)
        .update(&mut state, &previous)
        .unwrap_err();

    match &err {
        CfsyncError::ProtectedFieldRemoval { field_ids } => {
            assert_eq!(field_ids, &["body", "tags"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "Protected is set to true and these field(s) will be removed: body, tags"
    );
    assert_eq!(fake.request_count(), 0);
    assert_eq!(state.fields, previous);
    assert_eq!(state.version, 2);
    assert_eq!(state.status, ReconcileStatus::Active);
}

#[test]
fn protected_content_type_still_accepts_additions() {
    let fake = FakeContentful::new();
    let mut state = blog_post().protected();
    created(&fake, &mut state);
    let previous = state.fields.clone();
    state.fields.push(Field::new("summary", "Summary", "Text"));

    let client = fake_client(&fake);
    ContentTypeReconciler::new(&client)
        .update(&mut state, &previous)
        .unwrap();
    assert_eq!(fake.request_count(), 2);
}

#[test]
fn stale_version_marks_conflict() {
    let fake = FakeContentful::new();
    let mut state = blog_post();
    created(&fake, &mut state);
    state.version = 1;
    let previous = state.fields.clone();

    let client = fake_client(&fake);
    let err = ContentTypeReconciler::new(&client)
        .update(&mut state, &previous)
        .unwrap_err();

    assert!(err.is_version_conflict());
    assert_eq!(state.status, ReconcileStatus::Conflict);
    assert_eq!(fake.request_count(), 1);
}

#[test]
fn failure_mid_update_leaves_status_pending() {
    let fake = FakeContentful::new();
    let mut state = blog_post();
    created(&fake, &mut state);
    let previous = state.fields.clone();
    fake.queue_response(ApiResponse::new(500, "oops"));

    let client = fake_client(&fake);
    assert!(ContentTypeReconciler::new(&client)
        .update(&mut state, &previous)
        .is_err());
    assert_eq!(state.status, ReconcileStatus::PendingUpdate);
}

#[test]
fn rate_limited_requests_are_retried() {
    let fake = FakeContentful::new();
    fake.insert(
        &content_type_path(SPACE, ENV, "blogPost"),
        load_fixture_value("api/content_type.json"),
    );
    fake.queue_response(ApiResponse::new(429, "slow down"));
    fake.queue_response(ApiResponse::new(429, "slow down"));
    let client = fake_client(&fake);
    let mut state = ContentTypeState {
        id: Some("space1/master/blogPost".into()),
        ..Default::default()
    };

    ContentTypeReconciler::new(&client).read(&mut state).unwrap();

    assert_eq!(fake.request_count(), 3);
    assert_eq!(state.version, 6);
}

#[test]
fn delete_is_not_implemented() {
    let fake = FakeContentful::new();
    let client = fake_client(&fake);
    let mut state = blog_post();

    let err = ContentTypeReconciler::new(&client)
        .delete(&mut state)
        .unwrap_err();

    assert!(matches!(err, CfsyncError::NotImplemented { .. }));
    assert!(err.to_string().ends_with("not implemented"));
    assert_eq!(fake.request_count(), 0);
}

#[test]
fn import_reads_existing_content_type() {
    let fake = FakeContentful::new();
    fake.insert(
        &content_type_path(SPACE, ENV, "blogPost"),
        load_fixture_value("api/content_type.json"),
    );
    let client = fake_client(&fake);
    let reconciler = ContentTypeReconciler::new(&client);

    let state = reconciler.import("space1/master/blogPost").unwrap();
    assert_eq!(state.id.as_deref(), Some("space1/master/blogPost"));
    assert_eq!(state.fields.len(), 5);
    assert!(!state.protected);

    let missing = reconciler.import("space1/master/nothing").unwrap();
    assert_eq!(missing.status, ReconcileStatus::Absent);
    assert!(reconciler.import("not-an-id").is_err());
}
