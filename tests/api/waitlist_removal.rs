use crate::helpers::{founder, spawn_app};
use serde_json::{json, Value};

#[tokio::test]
async fn removing_with_the_admin_key_deletes_the_entry() {
    // Arrange
    let app = spawn_app().await;
    app.post_waitlist(&founder("jo@acme.io"))
        .await
        .error_for_status()
        .unwrap();

    // Act
    let response = app
        .delete_waitlist(&[("email", "JO@acme.io"), ("adminKey", app.admin_key.as_str())])
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(app.get_stats().await["total"], 0);
}

#[tokio::test]
async fn a_wrong_or_missing_admin_key_is_a_401_and_changes_nothing() {
    // Arrange
    let app = spawn_app().await;
    app.post_waitlist(&founder("jo@acme.io"))
        .await
        .error_for_status()
        .unwrap();
    let test_cases = vec![
        (vec![("email", "jo@acme.io"), ("adminKey", "wrong-key")], "a wrong key"),
        (vec![("email", "jo@acme.io")], "no key"),
        (vec![("adminKey", "wrong-key")], "a wrong key and no email"),
    ];

    for (query, description) in test_cases {
        // Act
        let response = app.delete_waitlist(&query).await;

        // Assert
        assert_eq!(
            401,
            response.status().as_u16(),
            "The API did not return a 401 Unauthorized when the request had {}.",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Unauthorized"}));
    }
    assert_eq!(app.get_stats().await["total"], 1);
}

#[tokio::test]
async fn removing_without_an_email_is_a_400() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.delete_waitlist(&[("adminKey", app.admin_key.as_str())]).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Email parameter required"}));
}

#[tokio::test]
async fn removing_an_unknown_email_is_a_404() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .delete_waitlist(&[("email", "nobody@nowhere.com"), ("adminKey", app.admin_key.as_str())])
        .await;

    // Assert
    assert_eq!(404, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Email not found"}));
}

#[tokio::test]
async fn a_removed_email_can_join_again() {
    // Arrange
    let app = spawn_app().await;
    app.post_waitlist(&founder("jo@acme.io"))
        .await
        .error_for_status()
        .unwrap();
    app.delete_waitlist(&[("email", "jo@acme.io"), ("adminKey", app.admin_key.as_str())])
        .await
        .error_for_status()
        .unwrap();

    // Act
    let response = app.post_waitlist(&founder("jo@acme.io")).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["stats"]["position"], 1);
}
