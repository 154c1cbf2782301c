use std::time::Duration;

use nestling_api::error::ApiError;
use nestling_api::usecase::parent::{
    LoginParentInput, LoginParentUseCase, SignUpParentInput, SignUpParentUseCase,
    UpdateParentInput, UpdateParentUseCase,
};
use nestling_api::usecase::token::{ACCESS_TOKEN_TYPE, validate_uuid_token};
use nestling_domain::conflict::ConflictCode;
use nestling_domain::id::{self, EntityKind};

use crate::helpers::{
    MockCertifyRepo, MockHasher, MockParentRepo, MockStorage, MockTxHandler, TEST_JWT_SECRET,
    TEST_PHONE, bound_row, certified_row, test_account, uncertified_row,
};

fn sign_up_input(login_id: &str, phone_number: &str) -> SignUpParentInput {
    SignUpParentInput {
        login_id: login_id.to_owned(),
        password: "hunter2".to_owned(),
        name: "Alice".to_owned(),
        phone_number: phone_number.to_owned(),
        profile: None,
    }
}

// ── SignUpParent ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_up_with_certified_phone_and_bind_it() {
    let parents = MockParentRepo::empty();
    let accounts = parents.rows_handle();
    let certifies = MockCertifyRepo::new(vec![certified_row(TEST_PHONE)]);
    let phones = certifies.rows_handle();
    let tx = MockTxHandler::new();
    let (commits, _) = tx.counters();

    let usecase = SignUpParentUseCase {
        tx,
        parents,
        certifies,
        hasher: MockHasher,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let out = usecase
        .execute(sign_up_input("alice123", TEST_PHONE))
        .await
        .unwrap();

    assert!(id::is_valid(EntityKind::Parent, &out.parent_uuid));

    let accounts = accounts.lock().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].uuid, out.parent_uuid);
    // Stored credential must be the hash, never the plaintext.
    assert_eq!(accounts[0].password_hash, "hashed:hunter2");

    let phones = phones.lock().unwrap();
    assert_eq!(phones[0].parent_uuid.as_deref(), Some(out.parent_uuid.as_str()));
    assert_eq!(*commits.lock().unwrap(), 1);
}

#[tokio::test]
async fn should_reject_sign_up_with_uncertified_phone() {
    let parents = MockParentRepo::empty();
    let accounts = parents.rows_handle();
    let certifies = MockCertifyRepo::new(vec![uncertified_row(TEST_PHONE)]);
    let tx = MockTxHandler::new();

    let usecase = SignUpParentUseCase {
        tx,
        parents,
        certifies,
        hasher: MockHasher,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let result = usecase.execute(sign_up_input("alice123", TEST_PHONE)).await;

    assert!(matches!(
        result,
        Err(ApiError::Conflict(ConflictCode::UncertifiedPhone))
    ));
    assert!(accounts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_sign_up_with_unknown_phone() {
    let usecase = SignUpParentUseCase {
        tx: MockTxHandler::new(),
        parents: MockParentRepo::empty(),
        certifies: MockCertifyRepo::empty(),
        hasher: MockHasher,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let result = usecase.execute(sign_up_input("alice123", TEST_PHONE)).await;

    assert!(matches!(
        result,
        Err(ApiError::Conflict(ConflictCode::UncertifiedPhone))
    ));
}

#[tokio::test]
async fn should_reject_second_sign_up_for_bound_phone() {
    let certifies = MockCertifyRepo::new(vec![bound_row(TEST_PHONE, "p0123456789")]);
    let usecase = SignUpParentUseCase {
        tx: MockTxHandler::new(),
        parents: MockParentRepo::new(vec![test_account("p0123456789", "alice123")]),
        certifies,
        hasher: MockHasher,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let result = usecase.execute(sign_up_input("bob456", TEST_PHONE)).await;

    assert!(matches!(
        result,
        Err(ApiError::Conflict(ConflictCode::PhoneAlreadyInUse))
    ));
}

#[tokio::test]
async fn should_reject_taken_login_id_and_leave_first_account_unmodified() {
    let existing = test_account("p0123456789", "alice123");
    let parents = MockParentRepo::new(vec![existing.clone()]);
    let accounts = parents.rows_handle();
    let certifies = MockCertifyRepo::new(vec![certified_row(TEST_PHONE)]);
    let phones = certifies.rows_handle();
    let tx = MockTxHandler::new();
    let (commits, rollbacks) = tx.counters();

    let usecase = SignUpParentUseCase {
        tx,
        parents,
        certifies,
        hasher: MockHasher,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let result = usecase.execute(sign_up_input("alice123", TEST_PHONE)).await;

    assert!(matches!(
        result,
        Err(ApiError::Conflict(ConflictCode::ParentIdAlreadyInUse))
    ));
    let accounts = accounts.lock().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0], existing);
    assert!(phones.lock().unwrap()[0].parent_uuid.is_none());
    assert_eq!(*commits.lock().unwrap(), 0);
    assert_eq!(*rollbacks.lock().unwrap(), 1);
}

#[tokio::test]
async fn should_assign_distinct_uuids_across_sign_ups() {
    let parents = MockParentRepo::empty();
    let accounts = parents.rows_handle();
    let certifies = MockCertifyRepo::new(vec![
        certified_row("01012345678"),
        certified_row("01087654321"),
    ]);

    let usecase = SignUpParentUseCase {
        tx: MockTxHandler::new(),
        parents,
        certifies,
        hasher: MockHasher,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let first = usecase
        .execute(sign_up_input("alice123", "01012345678"))
        .await
        .unwrap();
    let second = usecase
        .execute(sign_up_input("bob456", "01087654321"))
        .await
        .unwrap();

    assert_ne!(first.parent_uuid, second.parent_uuid);
    let accounts = accounts.lock().unwrap();
    assert_ne!(accounts[0].login_id, accounts[1].login_id);
}

#[tokio::test]
async fn should_upload_profile_under_deterministic_key() {
    let storage = MockStorage::new();
    let uploads = storage.uploads_handle();
    let certifies = MockCertifyRepo::new(vec![certified_row(TEST_PHONE)]);

    let usecase = SignUpParentUseCase {
        tx: MockTxHandler::new(),
        parents: MockParentRepo::empty(),
        certifies,
        hasher: MockHasher,
        storage,
        profile_bucket: "parent-profiles".to_owned(),
    };
    let mut input = sign_up_input("alice123", TEST_PHONE);
    input.profile = Some(b"image-bytes".to_vec());
    let out = usecase.execute(input).await.unwrap();

    let uploads = uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "parent-profiles");
    assert_eq!(uploads[0].1, format!("parents/{}/profile", out.parent_uuid));
    assert_eq!(uploads[0].2, b"image-bytes");
}

#[tokio::test]
async fn should_roll_back_sign_up_when_profile_upload_fails() {
    let certifies = MockCertifyRepo::new(vec![certified_row(TEST_PHONE)]);
    let tx = MockTxHandler::new();
    let (commits, rollbacks) = tx.counters();

    let usecase = SignUpParentUseCase {
        tx,
        parents: MockParentRepo::empty(),
        certifies,
        hasher: MockHasher,
        storage: MockStorage::failing(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let mut input = sign_up_input("alice123", TEST_PHONE);
    input.profile = Some(b"image-bytes".to_vec());
    let result = usecase.execute(input).await;

    assert!(matches!(result, Err(ApiError::Internal(_))));
    // The account and binding writes ran inside the transaction that was
    // rolled back, so nothing is committed.
    assert_eq!(*commits.lock().unwrap(), 0);
    assert_eq!(*rollbacks.lock().unwrap(), 1);
}

// ── End-to-end certify → sign-up scenario ────────────────────────────────────

#[tokio::test]
async fn should_walk_phone_from_code_sent_to_bound() {
    use nestling_api::usecase::certify::{
        CertifyPhoneInput, CertifyPhoneUseCase, SendCertifyCodeInput, SendCertifyCodeUseCase,
    };
    use crate::helpers::MockSms;

    let phones = {
        let certifies = MockCertifyRepo::empty();
        let rows = certifies.rows_handle();
        let send = SendCertifyCodeUseCase {
            tx: MockTxHandler::new(),
            certifies,
            sms: MockSms::new(),
        };
        send.execute(SendCertifyCodeInput {
            phone_number: TEST_PHONE.to_owned(),
        })
        .await
        .unwrap();
        rows
    };
    let issued_code = phones.lock().unwrap()[0].certify_code.clone();

    // Wrong code first: conflict -112, still uncertified.
    let certify = CertifyPhoneUseCase {
        tx: MockTxHandler::new(),
        certifies: MockCertifyRepo {
            rows: std::sync::Arc::clone(&phones),
        },
    };
    let wrong = if issued_code == "000000" { "999999" } else { "000000" };
    let result = certify
        .execute(CertifyPhoneInput {
            phone_number: TEST_PHONE.to_owned(),
            certify_code: wrong.to_owned(),
        })
        .await;
    assert!(matches!(
        result,
        Err(ApiError::Conflict(ConflictCode::IncorrectCertifyCode))
    ));

    // Correct code certifies.
    certify
        .execute(CertifyPhoneInput {
            phone_number: TEST_PHONE.to_owned(),
            certify_code: issued_code,
        })
        .await
        .unwrap();
    assert!(phones.lock().unwrap()[0].certified);

    // Sign-up binds the phone to the new account.
    let sign_up = SignUpParentUseCase {
        tx: MockTxHandler::new(),
        parents: MockParentRepo::empty(),
        certifies: MockCertifyRepo {
            rows: std::sync::Arc::clone(&phones),
        },
        hasher: MockHasher,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let out = sign_up
        .execute(sign_up_input("alice123", TEST_PHONE))
        .await
        .unwrap();
    assert!(id::is_valid(EntityKind::Parent, &out.parent_uuid));
    assert_eq!(
        phones.lock().unwrap()[0].parent_uuid.as_deref(),
        Some(out.parent_uuid.as_str())
    );

    // A second sign-up for the same phone conflicts with -101.
    let again = SignUpParentUseCase {
        tx: MockTxHandler::new(),
        parents: MockParentRepo::empty(),
        certifies: MockCertifyRepo {
            rows: std::sync::Arc::clone(&phones),
        },
        hasher: MockHasher,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let result = again.execute(sign_up_input("bob456", TEST_PHONE)).await;
    assert!(matches!(
        result,
        Err(ApiError::Conflict(ConflictCode::PhoneAlreadyInUse))
    ));
}

// ── LoginParent ──────────────────────────────────────────────────────────────

fn login_usecase(
    parents: MockParentRepo,
) -> LoginParentUseCase<MockTxHandler, MockParentRepo, MockHasher> {
    LoginParentUseCase {
        tx: MockTxHandler::new(),
        parents,
        hasher: MockHasher,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        access_token_duration: Duration::from_secs(3600),
    }
}

#[tokio::test]
async fn should_login_and_issue_access_token_bound_to_uuid() {
    let usecase = login_usecase(MockParentRepo::new(vec![test_account(
        "p0123456789",
        "alice123",
    )]));
    let out = usecase
        .execute(LoginParentInput {
            login_id: "alice123".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.parent_uuid, "p0123456789");
    let claims = validate_uuid_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.uuid, "p0123456789");
    assert_eq!(claims.token_type, ACCESS_TOKEN_TYPE);
}

#[tokio::test]
async fn should_reject_unknown_login_id() {
    let usecase = login_usecase(MockParentRepo::empty());
    let result = usecase
        .execute(LoginParentInput {
            login_id: "ghost".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await;
    assert!(matches!(
        result,
        Err(ApiError::Conflict(ConflictCode::NotExistParentId))
    ));
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let usecase = login_usecase(MockParentRepo::new(vec![test_account(
        "p0123456789",
        "alice123",
    )]));
    let result = usecase
        .execute(LoginParentInput {
            login_id: "alice123".to_owned(),
            password: "wrong".to_owned(),
        })
        .await;
    assert!(matches!(
        result,
        Err(ApiError::Conflict(ConflictCode::IncorrectParentPw))
    ));
}

// ── UpdateParentInform ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_patch_only_provided_fields() {
    let parents = MockParentRepo::new(vec![test_account("p0123456789", "alice123")]);
    let accounts = parents.rows_handle();

    let usecase = UpdateParentUseCase {
        tx: MockTxHandler::new(),
        parents,
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    usecase
        .execute(
            "p0123456789",
            UpdateParentInput {
                name: Some("Alicia".to_owned()),
                profile: None,
            },
        )
        .await
        .unwrap();

    let accounts = accounts.lock().unwrap();
    assert_eq!(accounts[0].name, "Alicia");
    assert_eq!(accounts[0].login_id, "alice123");
    assert!(accounts[0].profile_uri.is_none());
}

#[tokio::test]
async fn should_set_profile_uri_and_upload_on_update() {
    let parents = MockParentRepo::new(vec![test_account("p0123456789", "alice123")]);
    let accounts = parents.rows_handle();
    let storage = MockStorage::new();
    let uploads = storage.uploads_handle();

    let usecase = UpdateParentUseCase {
        tx: MockTxHandler::new(),
        parents,
        storage,
        profile_bucket: "parent-profiles".to_owned(),
    };
    usecase
        .execute(
            "p0123456789",
            UpdateParentInput {
                name: None,
                profile: Some(b"new-image".to_vec()),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        accounts.lock().unwrap()[0].profile_uri.as_deref(),
        Some("parents/p0123456789/profile")
    );
    assert_eq!(uploads.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_return_not_found_updating_unknown_parent() {
    let usecase = UpdateParentUseCase {
        tx: MockTxHandler::new(),
        parents: MockParentRepo::empty(),
        storage: MockStorage::new(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let result = usecase
        .execute(
            "p0123456789",
            UpdateParentInput {
                name: Some("Alicia".to_owned()),
                profile: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn should_roll_back_update_when_upload_fails() {
    let parents = MockParentRepo::new(vec![test_account("p0123456789", "alice123")]);
    let tx = MockTxHandler::new();
    let (commits, rollbacks) = tx.counters();

    let usecase = UpdateParentUseCase {
        tx,
        parents,
        storage: MockStorage::failing(),
        profile_bucket: "parent-profiles".to_owned(),
    };
    let result = usecase
        .execute(
            "p0123456789",
            UpdateParentInput {
                name: Some("Alicia".to_owned()),
                profile: Some(b"new-image".to_vec()),
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Internal(_))));
    assert_eq!(*commits.lock().unwrap(), 0);
    assert_eq!(*rollbacks.lock().unwrap(), 1);
}
