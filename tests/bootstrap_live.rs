//! End-to-end bootstrap test against a live MongoDB.
//!
//! Requires a running server reachable with administrative privileges,
//! e.g. `docker run --rm -p 27017:27017 mongo:7`. Point MONGODB_URI
//! elsewhere to override. Run with `cargo test -- --ignored`.

use mongodb::bson::doc;

use ion_init::{
    db::{schemas::PatientDoc, MongoClient},
    fixtures,
    provision::{collection, user, Outcome, RoleGrant, UserSpec},
    BootstrapError,
};

fn test_uri() -> String {
    std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}

fn dev_spec(db_name: &str) -> UserSpec {
    UserSpec {
        username: "dev_user".to_string(),
        password: "dev_pass".to_string(),
        roles: vec![RoleGrant {
            role: "readWrite".to_string(),
            db: db_name.to_string(),
        }],
    }
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_bootstrap_fresh_then_rerun() {
    // Unique database per run so a dirty server does not poison the test
    let db_name = format!("ion_test_{}", uuid::Uuid::new_v4().simple());
    let mongo = MongoClient::new(&test_uri(), &db_name)
        .await
        .expect("connect");
    let db = mongo.database();
    let spec = dev_spec(&db_name);

    // Fresh database: both entities get created
    let user_outcome = user::provision(&db, &spec, false).await.unwrap();
    assert_eq!(user_outcome, Outcome::Created);

    let coll_outcome = collection::provision::<PatientDoc>(&db, "patients", false)
        .await
        .unwrap();
    assert_eq!(coll_outcome, Outcome::Created);

    // The user exists with exactly the configured grant
    let users = db.run_command(doc! { "usersInfo": "dev_user" }).await.unwrap();
    let users = users.get_array("users").unwrap();
    assert_eq!(users.len(), 1);
    let roles = users[0].as_document().unwrap().get_array("roles").unwrap();
    assert!(roles.iter().any(|r| {
        let grant = r.as_document().expect("role grant document");
        grant.get_str("role").map(|v| v == "readWrite").unwrap_or(false)
            && grant.get_str("db").map(|v| v == db_name).unwrap_or(false)
    }));

    // The collection exists, is empty, and is not capped
    let listing = db
        .run_command(doc! { "listCollections": 1, "filter": { "name": "patients" } })
        .await
        .unwrap();
    let batch = listing
        .get_document("cursor")
        .unwrap()
        .get_array("firstBatch")
        .unwrap();
    assert_eq!(batch.len(), 1);
    let options = batch[0].as_document().unwrap().get_document("options").unwrap();
    assert!(!options.get_bool("capped").unwrap_or(false));

    let count = db
        .collection::<PatientDoc>("patients")
        .estimated_document_count()
        .await
        .unwrap();
    assert_eq!(count, 0);

    // Rerun is a no-op in default mode
    assert_eq!(
        user::provision(&db, &spec, false).await.unwrap(),
        Outcome::AlreadyExists
    );
    assert_eq!(
        collection::provision::<PatientDoc>(&db, "patients", false)
            .await
            .unwrap(),
        Outcome::AlreadyExists
    );

    // Strict mode surfaces the duplicate instead
    let err = user::provision(&db, &spec, true).await.unwrap_err();
    assert!(matches!(err, BootstrapError::Duplicate(_)));

    db.drop().await.ok();
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_fixture_seeding_runs_once() {
    let db_name = format!("ion_test_{}", uuid::Uuid::new_v4().simple());
    let mongo = MongoClient::new(&test_uri(), &db_name)
        .await
        .expect("connect");
    let db = mongo.database();

    collection::provision::<PatientDoc>(&db, "patients", false)
        .await
        .unwrap();

    assert_eq!(fixtures::populate(&db, "patients").await.unwrap(), 3);

    // Second pass sees a populated collection and inserts nothing
    assert_eq!(fixtures::populate(&db, "patients").await.unwrap(), 0);
    let count = db
        .collection::<PatientDoc>("patients")
        .estimated_document_count()
        .await
        .unwrap();
    assert_eq!(count, 3);

    db.drop().await.ok();
}
