use std::sync::Arc;

use user_service::errors::DomainError;
use user_service::AppError;

use crate::support::{test_service, MemoryUserStore, TEST_SECRET};

#[tokio::test]
async fn test_login_token_decodes_to_user() {
    let service = test_service(Arc::new(MemoryUserStore::new()));
    let registered = service
        .register("lin@example.com", "lin", "pa55word")
        .await
        .unwrap();

    let (token, user) = service.login("lin@example.com", "pa55word").await.unwrap();
    assert_eq!(user.id, registered.id);

    let security = auth_token::SecurityConfig::new(TEST_SECRET);
    let claims = auth_token::decode_now(&token, &security).unwrap();
    assert_eq!(claims.subject_id, registered.id.to_string());
    assert_eq!(claims.email, "lin@example.com");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_identical() {
    let service = test_service(Arc::new(MemoryUserStore::new()));
    service
        .register("known@example.com", "known", "right-password")
        .await
        .unwrap();

    let wrong_password = service
        .login("known@example.com", "wrong-password")
        .await
        .unwrap_err();
    let unknown_email = service
        .login("nobody@example.com", "right-password")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, DomainError::InvalidCredentials));
    assert!(matches!(unknown_email, DomainError::InvalidCredentials));

    let wrong_password = AppError::from(wrong_password);
    let unknown_email = AppError::from(unknown_email);
    assert_eq!(wrong_password.code(), unknown_email.code());
    assert_eq!(wrong_password.public_message(), unknown_email.public_message());
}

#[tokio::test]
async fn test_login_requires_password() {
    let service = test_service(Arc::new(MemoryUserStore::new()));
    let err = service.login("a@example.com", "").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
