use chrono::{TimeZone, Utc};

use nestling_api::error::ApiError;
use nestling_api::usecase::children::{CreateChildInput, CreateChildUseCase};
use nestling_domain::id::{self, EntityKind};

use crate::helpers::{MockChildRepo, MockStorage, MockTxHandler};

fn child_input(parent_uuid: &str) -> CreateChildInput {
    CreateChildInput {
        parent_uuid: parent_uuid.to_owned(),
        name: "Jamie".to_owned(),
        birth: Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 0).unwrap(),
        sex: "female".to_owned(),
        profile: None,
    }
}

#[tokio::test]
async fn should_create_child_under_existing_parent() {
    let children = MockChildRepo::with_parents(vec!["p0123456789".to_owned()]);
    let rows = children.rows_handle();
    let tx = MockTxHandler::new();
    let (commits, _) = tx.counters();

    let usecase = CreateChildUseCase {
        tx,
        children,
        storage: MockStorage::new(),
        profile_bucket: "children-profiles".to_owned(),
    };
    let out = usecase.execute(child_input("p0123456789")).await.unwrap();

    assert!(id::is_valid(EntityKind::Child, &out.child_uuid));
    let rows = rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].parent_uuid, "p0123456789");
    assert_eq!(*commits.lock().unwrap(), 1);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_parent() {
    let children = MockChildRepo::with_parents(vec![]);
    let rows = children.rows_handle();
    let tx = MockTxHandler::new();
    let (_, rollbacks) = tx.counters();

    let usecase = CreateChildUseCase {
        tx,
        children,
        storage: MockStorage::new(),
        profile_bucket: "children-profiles".to_owned(),
    };
    let result = usecase.execute(child_input("p0123456789")).await;

    assert!(matches!(result, Err(ApiError::NotFound)));
    assert!(rows.lock().unwrap().is_empty());
    assert_eq!(*rollbacks.lock().unwrap(), 1);
}

#[tokio::test]
async fn should_upload_child_profile_under_deterministic_key() {
    let children = MockChildRepo::with_parents(vec!["p0123456789".to_owned()]);
    let storage = MockStorage::new();
    let uploads = storage.uploads_handle();

    let usecase = CreateChildUseCase {
        tx: MockTxHandler::new(),
        children,
        storage,
        profile_bucket: "children-profiles".to_owned(),
    };
    let mut input = child_input("p0123456789");
    input.profile = Some(b"image-bytes".to_vec());
    let out = usecase.execute(input).await.unwrap();

    let uploads = uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "children-profiles");
    assert_eq!(uploads[0].1, format!("children/{}/profile", out.child_uuid));
}

#[tokio::test]
async fn should_roll_back_child_when_upload_fails() {
    let children = MockChildRepo::with_parents(vec!["p0123456789".to_owned()]);
    let tx = MockTxHandler::new();
    let (commits, rollbacks) = tx.counters();

    let usecase = CreateChildUseCase {
        tx,
        children,
        storage: MockStorage::failing(),
        profile_bucket: "children-profiles".to_owned(),
    };
    let mut input = child_input("p0123456789");
    input.profile = Some(b"image-bytes".to_vec());
    let result = usecase.execute(input).await;

    assert!(matches!(result, Err(ApiError::Internal(_))));
    assert_eq!(*commits.lock().unwrap(), 0);
    assert_eq!(*rollbacks.lock().unwrap(), 1);
}
