mod helpers;

use docvault_core::{DocumentOwner, OwnerKind, VaultError};
use docvault_services::UploadRequest;
use docvault_storage::keys;
use helpers::{pdf_request, property_owner, setup_test_app};
use uuid::Uuid;

#[tokio::test]
async fn test_upload_stores_file_and_record() {
    let app = setup_test_app().await;
    let owner = property_owner(1);
    let request = pdf_request(None);
    let payload = request.data.clone();

    let document = app.store.upload(&owner, request).await.unwrap();

    assert_eq!(document.documentable_type, OwnerKind::Property);
    assert_eq!(document.documentable_id, 1);
    assert_eq!(document.folder_id, None);
    assert_eq!(document.name, "contratto firmato.pdf");
    assert_eq!(document.extension, "pdf");
    assert_eq!(document.mime_type, "application/pdf");
    assert_eq!(document.size, payload.len() as i64);
    assert!(document.is_pdf);
    assert!(!document.is_image);

    // Stored name is a fresh UUID with the validated extension, and the
    // root-level path is just the stored name.
    let stem = document.stored_name.strip_suffix(".pdf").unwrap();
    assert!(Uuid::parse_str(stem).is_ok(), "stored name should be a UUID");
    assert_ne!(document.stored_name, document.name);
    assert_eq!(document.path, document.stored_name);

    let key = keys::document_key(&owner, &document.path);
    assert!(key.starts_with("property_documents/"));
    assert!(app.disk.exists(&key).await.unwrap(), "file should be on disk");
}

#[tokio::test]
async fn test_upload_same_file_twice_gets_distinct_names() {
    let app = setup_test_app().await;
    let owner = property_owner(1);

    let first = app.store.upload(&owner, pdf_request(None)).await.unwrap();
    let second = app.store.upload(&owner, pdf_request(None)).await.unwrap();

    assert_ne!(first.stored_name, second.stored_name);
    assert!(app
        .disk
        .exists(&keys::document_key(&owner, &first.path))
        .await
        .unwrap());
    assert!(app
        .disk
        .exists(&keys::document_key(&owner, &second.path))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_upload_into_nested_folder_builds_path() {
    let app = setup_test_app().await;
    let owner = property_owner(7);

    let contratti = app
        .folders
        .create_folder(owner.owner_ref(), "Contratti", None)
        .await
        .unwrap();
    let year = app
        .folders
        .create_folder(owner.owner_ref(), "2024", Some(contratti.id))
        .await
        .unwrap();

    let document = app
        .store
        .upload(&owner, pdf_request(Some(year.id)))
        .await
        .unwrap();

    assert_eq!(document.folder_id, Some(year.id));
    assert_eq!(
        document.path,
        format!("Contratti/2024/{}", document.stored_name)
    );

    let key = keys::document_key(&owner, &document.path);
    assert_eq!(
        key,
        format!(
            "property_documents/{}/Contratti/2024/{}",
            owner.uuid, document.stored_name
        )
    );
    assert!(app.disk.exists(&key).await.unwrap());
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let app = setup_test_app().await;
    let owner = property_owner(1);

    let mut request = pdf_request(None);
    request.data.clear();

    let err = app.store.upload(&owner, request).await.unwrap_err();
    assert!(matches!(err, VaultError::EmptyFile));
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let app = setup_test_app().await;
    let owner = property_owner(1);

    let mut request = pdf_request(None);
    request.data = vec![0u8; 2 * 1024 * 1024]; // test config caps at 1 MB

    let err = app.store.upload(&owner, request).await.unwrap_err();
    assert!(matches!(err, VaultError::FileTooLarge { .. }));

    // A rejected upload leaves nothing behind, on disk or in the database.
    assert!(app.disk.list("").await.unwrap().is_empty());
    assert!(app
        .store
        .list_documents(owner.owner_ref(), None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_upload_rejects_disallowed_extension() {
    let app = setup_test_app().await;
    let owner = property_owner(1);

    let request = UploadRequest {
        data: b"MZ".to_vec(),
        original_filename: "setup.exe".to_string(),
        extension: "exe".to_string(),
        content_type: "application/pdf".to_string(),
        folder_id: None,
    };

    let err = app.store.upload(&owner, request).await.unwrap_err();
    assert!(matches!(err, VaultError::UnsupportedFileType(_)));
    assert!(app.disk.list("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_rejects_mismatched_mime_type() {
    let app = setup_test_app().await;
    let owner = property_owner(1);

    // Extension and MIME type are each allowed, but they disagree.
    let request = UploadRequest {
        data: b"not really a jpeg".to_vec(),
        original_filename: "photo.jpg".to_string(),
        extension: "jpg".to_string(),
        content_type: "application/pdf".to_string(),
        folder_id: None,
    };

    let err = app.store.upload(&owner, request).await.unwrap_err();
    assert!(matches!(err, VaultError::UnsupportedFileType(_)));
}

#[tokio::test]
async fn test_upload_into_foreign_folder_denied() {
    let app = setup_test_app().await;
    let owner_a = property_owner(1);
    let owner_b = property_owner(2);

    let folder = app
        .folders
        .create_folder(owner_a.owner_ref(), "Contratti", None)
        .await
        .unwrap();

    let err = app
        .store
        .upload(&owner_b, pdf_request(Some(folder.id)))
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::AccessDenied));

    // An ID that matches no folder at all is missing, not denied.
    let err = app
        .store
        .upload(&owner_b, pdf_request(Some(9999)))
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound(_)));
}

#[tokio::test]
async fn test_fetch_is_owner_scoped() {
    let app = setup_test_app().await;
    let owner_a = property_owner(1);
    let owner_b = property_owner(2);

    let document = app.store.upload(&owner_a, pdf_request(None)).await.unwrap();

    let fetched = app
        .store
        .fetch(owner_a.owner_ref(), document.id)
        .await
        .unwrap();
    assert_eq!(fetched.id, document.id);

    // Same numeric ID from another owner: denied, not missing.
    let err = app
        .store
        .fetch(owner_b.owner_ref(), document.id)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::AccessDenied));

    // A different kind with the same numeric owner ID is also denied.
    let contract_owner = DocumentOwner::with_new_uuid(OwnerKind::Contract, 1);
    let err = app
        .store
        .fetch(contract_owner.owner_ref(), document.id)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::AccessDenied));

    let err = app.store.fetch(owner_a.owner_ref(), 9999).await.unwrap_err();
    assert!(matches!(err, VaultError::NotFound(_)));
}

#[tokio::test]
async fn test_read_contents_round_trip() {
    let app = setup_test_app().await;
    let owner = property_owner(1);
    let request = pdf_request(None);
    let payload = request.data.clone();

    let document = app.store.upload(&owner, request).await.unwrap();
    let contents = app.store.read_contents(&owner, document.id).await.unwrap();

    assert_eq!(contents.data, payload);
    assert_eq!(contents.mime_type, "application/pdf");
    assert_eq!(contents.original_filename, "contratto firmato.pdf");
}

#[tokio::test]
async fn test_read_contents_reports_missing_file() {
    let app = setup_test_app().await;
    let owner = property_owner(1);

    let document = app.store.upload(&owner, pdf_request(None)).await.unwrap();

    // Remove the file behind the record's back.
    let key = keys::document_key(&owner, &document.path);
    app.disk.delete(&key).await.unwrap();

    let err = app
        .store
        .read_contents(&owner, document.id)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::FileMissingOnDisk(_)));

    // The record itself is still there.
    assert!(app.store.fetch(owner.owner_ref(), document.id).await.is_ok());
}

#[tokio::test]
async fn test_delete_removes_record_and_file() {
    let app = setup_test_app().await;
    let owner = property_owner(1);

    let document = app.store.upload(&owner, pdf_request(None)).await.unwrap();
    let key = keys::document_key(&owner, &document.path);
    assert!(app.disk.exists(&key).await.unwrap());

    app.store.delete(&owner, document.id).await.unwrap();

    let err = app
        .store
        .fetch(owner.owner_ref(), document.id)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::NotFound(_)));
    assert!(!app.disk.exists(&key).await.unwrap(), "file should be gone");
}

#[tokio::test]
async fn test_delete_is_owner_scoped() {
    let app = setup_test_app().await;
    let owner_a = property_owner(1);
    let owner_b = property_owner(2);

    let document = app.store.upload(&owner_a, pdf_request(None)).await.unwrap();

    let err = app.store.delete(&owner_b, document.id).await.unwrap_err();
    assert!(matches!(err, VaultError::AccessDenied));

    // Still fully intact for its real owner.
    let contents = app
        .store
        .read_contents(&owner_a, document.id)
        .await
        .unwrap();
    assert_eq!(contents.original_filename, "contratto firmato.pdf");
}

#[tokio::test]
async fn test_list_documents_scoped_by_owner_and_folder() {
    let app = setup_test_app().await;
    let owner_a = property_owner(1);
    let owner_b = property_owner(2);

    let folder = app
        .folders
        .create_folder(owner_a.owner_ref(), "Contratti", None)
        .await
        .unwrap();

    let root_1 = app.store.upload(&owner_a, pdf_request(None)).await.unwrap();
    let root_2 = app.store.upload(&owner_a, pdf_request(None)).await.unwrap();
    let in_folder = app
        .store
        .upload(&owner_a, pdf_request(Some(folder.id)))
        .await
        .unwrap();
    app.store.upload(&owner_b, pdf_request(None)).await.unwrap();

    let root_docs = app
        .store
        .list_documents(owner_a.owner_ref(), None)
        .await
        .unwrap();
    let root_ids: Vec<i64> = root_docs.iter().map(|d| d.id).collect();
    assert_eq!(root_docs.len(), 2);
    assert!(root_ids.contains(&root_1.id));
    assert!(root_ids.contains(&root_2.id));

    let folder_docs = app
        .store
        .list_documents(owner_a.owner_ref(), Some(folder.id))
        .await
        .unwrap();
    assert_eq!(folder_docs.len(), 1);
    assert_eq!(folder_docs[0].id, in_folder.id);
}
