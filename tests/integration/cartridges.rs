//! Embedded cartridges on a running application.

use super::common::MockBroker;

#[tokio::test]
async fn test_embedded_cartridge_round_trip() {
    let broker = MockBroker::start().await;
    let client = broker.connect().await;

    let domain = client.add_domain("d1").await.unwrap();
    let app = domain
        .add_application("appthree", "php-5.3", false)
        .await
        .unwrap();

    let mysql = app.add_cartridge("mysql-5.1").await.unwrap();
    assert_eq!(mysql.name(), "mysql-5.1");
    assert_eq!(mysql.cartridge_type(), "embedded");

    let before = app.cartridges().await.unwrap();
    assert!(before.iter().any(|c| c.name() == "mysql-5.1"));

    mysql.restart().await.unwrap();
    mysql.reload().await.unwrap();
    let events = broker.state.lock().unwrap().events("d1", "appthree");
    assert_eq!(events, vec!["mysql-5.1:restart", "mysql-5.1:reload"]);

    mysql.delete().await.unwrap();
    let after = app.cartridges().await.unwrap();
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|c| c.name() != "mysql-5.1"));
}

#[tokio::test]
async fn test_framework_cartridge_without_links_fails_locally() {
    let broker = MockBroker::start().await;
    let client = broker.connect().await;

    let domain = client.add_domain("d1").await.unwrap();
    let app = domain
        .add_application("appone", "php-5.3", false)
        .await
        .unwrap();
    let carts = app.cartridges().await.unwrap();
    let php = carts
        .iter()
        .find(|c| c.name() == "php-5.3")
        .expect("framework cartridge listed");

    let sent = broker.request_count().await;
    let err = php.delete().await.unwrap_err();
    assert!(err.is_link_not_found());
    assert!(php.restart().await.unwrap_err().is_link_not_found());
    assert_eq!(broker.request_count().await, sent);
}

#[tokio::test]
async fn test_catalogue_entries_cannot_act() {
    let broker = MockBroker::start().await;
    let client = broker.connect().await;

    let catalogue = client.cartridges().await.unwrap();
    assert_eq!(catalogue.len(), 3);

    let sent = broker.request_count().await;
    for cart in &catalogue {
        assert!(cart.links().is_empty());
        assert!(cart.start().await.unwrap_err().is_link_not_found());
    }
    assert_eq!(broker.request_count().await, sent);
}

#[tokio::test]
async fn test_unknown_cartridge_is_rejected() {
    let broker = MockBroker::start().await;
    let client = broker.connect().await;

    let domain = client.add_domain("d1").await.unwrap();
    let app = domain
        .add_application("appone", "php-5.3", false)
        .await
        .unwrap();

    let err = app.add_cartridge("cobol-1.0").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Invalid cartridge cobol-1.0"));
}
