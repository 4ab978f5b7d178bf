use crate::helpers::{founder, lawyer, spawn_app};
use serde_json::Value;

#[tokio::test]
async fn stats_of_an_empty_waitlist_are_zero() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_waitlist().await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["stats"]["total"], 0);
    assert_eq!(body["stats"]["founders"], 0);
    assert_eq!(body["stats"]["lawyers"], 0);
    assert!(body["stats"]["lastUpdated"].is_string());
}

#[tokio::test]
async fn stats_count_each_role() {
    // Arrange
    let app = spawn_app().await;
    for email in ["a@acme.io", "b@acme.io", "c@acme.io"] {
        app.post_waitlist(&founder(email))
            .await
            .error_for_status()
            .unwrap();
    }
    app.post_waitlist(&lawyer("d@firm.com"))
        .await
        .error_for_status()
        .unwrap();

    // Act
    let stats = app.get_stats().await;

    // Assert
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["founders"], 3);
    assert_eq!(stats["lawyers"], 1);
}

#[tokio::test]
async fn stats_never_expose_personal_data() {
    // Arrange
    let app = spawn_app().await;
    app.post_waitlist(&founder("jo@acme.io"))
        .await
        .error_for_status()
        .unwrap();

    // Act
    let body = app.get_waitlist().await.text().await.unwrap();

    // Assert
    let parsed: Value = serde_json::from_str(&body).unwrap();
    let mut keys: Vec<_> = parsed["stats"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    keys.sort();
    assert_eq!(keys, vec!["founders", "lastUpdated", "lawyers", "total"]);
    assert_eq!(parsed.as_object().unwrap().len(), 1);
    for personal in ["jo@acme.io", "Jo Lin", "Acme"] {
        assert!(!body.contains(personal), "The stats leaked {}", personal);
    }
}
