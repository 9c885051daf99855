use std::sync::Arc;

use user_service::errors::{DomainError, NotFoundKind};
use uuid::Uuid;

use crate::support::{test_service, MemoryUserStore};

fn is_user_not_found(err: &DomainError) -> bool {
    matches!(err, DomainError::NotFound(NotFoundKind::User, _))
}

#[tokio::test]
async fn test_get_list_update_delete() {
    let service = test_service(Arc::new(MemoryUserStore::new()));
    let a = service.register("a@example.com", "a", "secret1").await.unwrap();
    let b = service.register("b@example.com", "b", "secret2").await.unwrap();

    let all = service.list_users().await.unwrap();
    let mut ids: Vec<Uuid> = all.iter().map(|u| u.id).collect();
    ids.sort();
    let mut expected = vec![a.id, b.id];
    expected.sort();
    assert_eq!(ids, expected);

    service.update_user(&a.id.to_string(), "renamed").await.unwrap();
    let fetched = service.get_user(&a.id.to_string()).await.unwrap();
    assert_eq!(fetched.username, "renamed");
    assert_eq!(fetched.email, "a@example.com");

    service.delete_user(&b.id.to_string()).await.unwrap();
    let err = service.get_user(&b.id.to_string()).await.unwrap_err();
    assert!(is_user_not_found(&err));
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let service = test_service(Arc::new(MemoryUserStore::new()));
    let missing = Uuid::new_v4().to_string();

    assert!(is_user_not_found(&service.get_user(&missing).await.unwrap_err()));
    assert!(is_user_not_found(
        &service.update_user(&missing, "x").await.unwrap_err()
    ));
    assert!(is_user_not_found(&service.delete_user(&missing).await.unwrap_err()));
}

#[tokio::test]
async fn test_non_uuid_id_is_not_found() {
    let service = test_service(Arc::new(MemoryUserStore::new()));

    assert!(is_user_not_found(&service.get_user("42").await.unwrap_err()));
    assert!(is_user_not_found(&service.delete_user("abc").await.unwrap_err()));
}

#[tokio::test]
async fn test_update_rejects_empty_username() {
    let service = test_service(Arc::new(MemoryUserStore::new()));
    let user = service.register("c@example.com", "c", "secret3").await.unwrap();

    let err = service.update_user(&user.id.to_string(), "  ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
