mod common;

use futures_util::poll;
use mockito::Matcher;
use replydesk_client::api::{CategoriesApi, EmailsApi, LogQuery, LogsApi, MailboxApi, RulesApi};
use replydesk_client::state::MailboxContainer;
use replydesk_client::{CancelToken, Collection, ResourceKind, Workspace, NETWORK_ERROR_MESSAGE};
use serde_json::json;
use shared_types::{AutoReplyRulePatch, LogType, MailboxPatch, NewCategory, ReplyRequest, Tone};

use common::*;

#[tokio::test]
async fn test_load_replaces_collection() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/categories")
        .with_status(200)
        .with_body(ok(json!([category("c1", "Billing"), category("c2", "Shipping")])))
        .create_async()
        .await;

    let categories = Collection::new(CategoriesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));

    assert!(categories.load().await);
    let names: Vec<String> = categories.items().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Billing", "Shipping"]);
    assert!(!categories.is_loading());
    assert!(categories.error().is_none());
}

#[tokio::test]
async fn test_failed_load_keeps_previous_items() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/categories")
        .with_status(200)
        .with_body(ok(json!([category("c1", "Billing")])))
        .create_async()
        .await;

    let categories = Collection::new(CategoriesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(categories.load().await);

    first.remove_async().await;
    server
        .mock("GET", "/categories")
        .with_status(500)
        .with_body(failure("DB_ERROR", "Database unavailable"))
        .create_async()
        .await;

    assert!(!categories.load().await);
    assert_eq!(categories.items().len(), 1);
    assert_eq!(categories.items()[0].id, "c1");
    assert_eq!(categories.error().as_deref(), Some("Database unavailable"));
    assert!(!categories.is_loading());
}

#[tokio::test]
async fn test_network_failure_is_recorded_not_raised() {
    let rules = Collection::new(RulesApi::new(transport(
        "http://127.0.0.1:1",
        signed_in_store("token-1", None),
    )));

    assert!(!rules.load().await);
    assert!(rules.items().is_empty());
    assert_eq!(rules.error().as_deref(), Some(NETWORK_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_create_returns_server_entity() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/categories")
        .match_body(Matcher::PartialJson(json!({
            "name": "VIP",
            "tone": "friendly",
            "color": "bg-green-500"
        })))
        .with_status(201)
        .with_body(ok(json!({
            "id": "cat-42",
            "name": "VIP",
            "description": "",
            "tone": "friendly",
            "template": "Thanks for being a valued customer!",
            "color": "bg-green-500"
        })))
        .expect(1)
        .create_async()
        .await;

    let categories = Collection::new(CategoriesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));

    let created = categories
        .create(&NewCategory {
            name: "VIP".to_string(),
            description: String::new(),
            tone: Tone::Friendly,
            template: "Thanks for being a valued customer!".to_string(),
            custom_instructions: None,
            color: "bg-green-500".to_string(),
        })
        .await;

    create.assert_async().await;
    assert!(created);
    let vip = categories.get("cat-42").expect("created category is listed");
    assert_eq!(vip.name, "VIP");
    assert_eq!(vip.tone, Tone::Friendly);
    assert_eq!(vip.template, "Thanks for being a valued customer!");
    assert_eq!(vip.color, "bg-green-500");
}

#[tokio::test]
async fn test_reload_after_create_mirrors_server() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/categories")
        .with_status(201)
        .with_body(ok(category("c2", "Shipping")))
        .create_async()
        .await;
    server
        .mock("GET", "/categories")
        .with_status(200)
        .with_body(ok(json!([category("c1", "Billing")])))
        .create_async()
        .await;

    let categories = Collection::new(CategoriesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(categories.load().await);

    let input = NewCategory {
        name: "Shipping".to_string(),
        description: String::new(),
        tone: Tone::Professional,
        template: "Hello,".to_string(),
        custom_instructions: None,
        color: "bg-blue-500".to_string(),
    };
    assert!(categories.create(&input).await);
    assert_eq!(categories.items().len(), 2);

    // The stale list from the server wins; nothing is merged in
    assert!(categories.load().await);
    let ids: Vec<String> = categories.items().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["c1"]);
}

#[tokio::test]
async fn test_create_during_cancelled_reload_is_kept() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/categories")
        .with_status(200)
        .with_body(ok(json!([category("c1", "Billing")])))
        .create_async()
        .await;
    server
        .mock("POST", "/categories")
        .with_status(201)
        .with_body(ok(category("c2", "Shipping")))
        .create_async()
        .await;

    let categories = Collection::new(CategoriesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(categories.load().await);

    let token = CancelToken::new();
    let mut reload = Box::pin(categories.load_cancellable(token.clone()));
    assert!(poll!(&mut reload).is_pending());
    assert!(categories.is_loading());

    let input = NewCategory {
        name: "Shipping".to_string(),
        description: String::new(),
        tone: Tone::Professional,
        template: "Hello,".to_string(),
        custom_instructions: None,
        color: "bg-blue-500".to_string(),
    };
    assert!(categories.create(&input).await);
    assert!(categories.is_loading());

    token.cancel();
    assert!(!reload.await);

    let ids: Vec<String> = categories.items().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["c1", "c2"]);
    assert!(!categories.is_loading());
    assert!(categories.error().is_none());
}

#[tokio::test]
async fn test_failed_create_keeps_items_and_records_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/categories")
        .with_status(200)
        .with_body(ok(json!([category("c1", "Billing")])))
        .create_async()
        .await;
    server
        .mock("POST", "/categories")
        .with_status(200)
        .with_body(failure("DUPLICATE", "Category already exists"))
        .create_async()
        .await;

    let categories = Collection::new(CategoriesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(categories.load().await);

    let input = NewCategory {
        name: "Billing".to_string(),
        description: String::new(),
        tone: Tone::Formal,
        template: "Dear customer,".to_string(),
        custom_instructions: None,
        color: "bg-red-500".to_string(),
    };
    assert!(!categories.create(&input).await);
    assert_eq!(categories.items().len(), 1);
    assert_eq!(categories.error().as_deref(), Some("Category already exists"));
}

#[tokio::test]
async fn test_toggle_rule_and_reload_reflects_server() {
    let mut server = mockito::Server::new_async().await;
    let initial = server
        .mock("GET", "/auto-reply/rules")
        .with_status(200)
        .with_body(ok(json!([rule("r1", false)])))
        .create_async()
        .await;
    server
        .mock("PUT", "/auto-reply/rules/r1")
        .match_body(Matcher::Json(json!({"enabled": true})))
        .with_status(200)
        .with_body(ok(rule("r1", true)))
        .expect(1)
        .create_async()
        .await;

    let rules = Collection::new(RulesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(rules.load().await);
    assert!(!rules.items()[0].enabled);

    let patch = AutoReplyRulePatch {
        enabled: Some(true),
        ..Default::default()
    };
    assert!(rules.update("r1", &patch).await);
    assert!(rules.items()[0].enabled);

    initial.remove_async().await;
    server
        .mock("GET", "/auto-reply/rules")
        .with_status(200)
        .with_body(ok(json!([rule("r1", true)])))
        .create_async()
        .await;

    assert!(rules.load().await);
    assert!(rules.items()[0].enabled);
}

#[tokio::test]
async fn test_delete_filters_locally() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/auto-reply/rules")
        .with_status(200)
        .with_body(ok(json!([rule("r1", true), rule("r2", false)])))
        .create_async()
        .await;
    server
        .mock("DELETE", "/auto-reply/rules/r1")
        .with_status(200)
        .with_body(ok(json!(null)))
        .create_async()
        .await;

    let rules = Collection::new(RulesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(rules.load().await);
    assert!(rules.remove("r1").await);

    let ids: Vec<String> = rules.items().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["r2"]);
}

#[tokio::test]
async fn test_resources_fail_independently() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/categories")
        .with_status(503)
        .create_async()
        .await;
    server
        .mock("GET", "/auto-reply/rules")
        .with_status(200)
        .with_body(ok(json!([rule("r1", true)])))
        .create_async()
        .await;

    let workspace = Workspace::new(transport(&server.url(), signed_in_store("token-1", None)));
    let (categories, rules) = tokio::join!(
        workspace.load(ResourceKind::Categories, None),
        workspace.load(ResourceKind::Rules, None),
    );

    assert!(!categories);
    assert!(rules);
    assert_eq!(
        workspace.error(ResourceKind::Categories).as_deref(),
        Some(NETWORK_ERROR_MESSAGE)
    );
    assert!(workspace.error(ResourceKind::Rules).is_none());
    assert_eq!(workspace.rules.items().len(), 1);
    assert!(!workspace.is_loading(ResourceKind::Categories));
}

#[tokio::test]
async fn test_inbox_actions_patch_local_copy() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/emails/inbox")
        .with_status(200)
        .with_body(ok(json!([email("e1", false), email("e2", false)])))
        .create_async()
        .await;
    let read = server
        .mock("PATCH", "/emails/e1/read-status")
        .match_body(Matcher::Json(json!({"read": true})))
        .with_status(200)
        .with_body(ok(json!(null)))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("PATCH", "/emails/e1/star-status")
        .match_body(Matcher::Json(json!({"starred": true})))
        .with_status(200)
        .with_body(ok(json!(null)))
        .create_async()
        .await;
    server
        .mock("POST", "/emails/e1/reply")
        .match_body(Matcher::PartialJson(json!({"body": "On its way!"})))
        .with_status(200)
        .with_body(ok(json!(null)))
        .create_async()
        .await;
    server
        .mock("POST", "/emails/e2/archive")
        .with_status(200)
        .with_body(ok(json!(null)))
        .create_async()
        .await;

    let inbox = Collection::new(EmailsApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(inbox.load().await);

    assert!(inbox.mark_read("e1").await);
    assert!(inbox.toggle_star("e1").await);
    let reply = ReplyRequest {
        body: "On its way!".to_string(),
        html_body: None,
    };
    assert!(inbox.reply("e1", &reply).await);
    assert!(inbox.archive("e2").await);

    read.assert_async().await;
    let items = inbox.items();
    assert_eq!(items.len(), 1);
    assert!(items[0].read);
    assert!(items[0].starred);
    assert!(items[0].replied);
}

#[tokio::test]
async fn test_unconfigured_mailbox_loads_as_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/mailbox/configuration")
        .with_status(200)
        .with_body(ok(json!(null)))
        .create_async()
        .await;

    let mailbox = MailboxContainer::new(MailboxApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(mailbox.load().await);
    assert!(mailbox.config().is_none());
    assert!(mailbox.error().is_none());

    // Nothing to start without a configured mailbox
    assert!(!mailbox.set_monitoring(true).await);
    assert_eq!(mailbox.error().as_deref(), Some("No mailbox configured"));
}

#[tokio::test]
async fn test_mailbox_save_and_monitoring() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/mailbox/configuration")
        .with_status(200)
        .with_body(ok(mailbox(7, false)))
        .create_async()
        .await;
    server
        .mock("PUT", "/mailbox/configuration")
        .match_body(Matcher::Json(json!({"confidenceThreshold": 0.9})))
        .with_status(200)
        .with_body(ok(json!({
            "id": 7,
            "email": "support@acme.com",
            "confidenceThreshold": 0.9,
            "enabled": true
        })))
        .create_async()
        .await;
    let start = server
        .mock("POST", "/monitor/start/7")
        .with_status(200)
        .with_body(ok(json!(null)))
        .expect(1)
        .create_async()
        .await;

    let container = MailboxContainer::new(MailboxApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(container.load().await);

    let patch = MailboxPatch {
        confidence_threshold: Some(0.9),
        ..Default::default()
    };
    assert!(container.save(&patch).await);
    assert_eq!(
        container.config().map(|c| c.confidence_threshold),
        Some(0.9)
    );

    assert!(container.set_monitoring(true).await);
    start.assert_async().await;
    assert!(container.config().map(|c| c.monitoring).unwrap_or(false));
}

#[tokio::test]
async fn test_enable_mailbox_and_reload_reflects_server() {
    let mut disabled = mailbox(7, false);
    disabled["enabled"] = json!(false);
    let enabled = mailbox(7, false);

    let mut server = mockito::Server::new_async().await;
    let initial = server
        .mock("GET", "/mailbox/configuration")
        .with_status(200)
        .with_body(ok(disabled))
        .create_async()
        .await;
    let save = server
        .mock("PUT", "/mailbox/configuration")
        .match_body(Matcher::Json(json!({"enabled": true})))
        .with_status(200)
        .with_body(ok(enabled.clone()))
        .expect(1)
        .create_async()
        .await;

    let container = MailboxContainer::new(MailboxApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(container.load().await);
    assert_eq!(container.config().map(|c| c.enabled), Some(false));

    let patch = MailboxPatch {
        enabled: Some(true),
        ..Default::default()
    };
    assert!(container.save(&patch).await);
    save.assert_async().await;

    initial.remove_async().await;
    server
        .mock("GET", "/mailbox/configuration")
        .with_status(200)
        .with_body(ok(enabled))
        .create_async()
        .await;

    assert!(container.load().await);
    assert_eq!(container.config().map(|c| c.enabled), Some(true));
    assert!(container.error().is_none());
}

#[tokio::test]
async fn test_log_query_filters_collection() {
    let mut server = mockito::Server::new_async().await;
    let filtered = server
        .mock("GET", "/logs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "failed".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(ok(json!([log_entry("l1")])))
        .expect(1)
        .create_async()
        .await;

    let query = LogQuery {
        kind: Some(LogType::Failed),
        limit: Some(5),
    };
    let logs = Collection::new(
        LogsApi::new(transport(&server.url(), signed_in_store("token-1", None))).with_query(query),
    );

    assert!(logs.load().await);
    filtered.assert_async().await;
    assert_eq!(logs.items().len(), 1);
}

#[tokio::test]
async fn test_retry_reruns_failed_load() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("GET", "/analytics/dashboard")
        .with_status(502)
        .create_async()
        .await;

    let workspace = Workspace::new(transport(&server.url(), signed_in_store("token-1", None)));
    assert!(!workspace.analytics.load().await);
    assert!(workspace.analytics.stats().is_none());

    failing.remove_async().await;
    server
        .mock("GET", "/analytics/dashboard")
        .with_status(200)
        .with_body(ok(stats()))
        .create_async()
        .await;

    assert!(workspace.analytics.resource().retry().await);
    assert_eq!(
        workspace.analytics.stats().map(|s| s.emails_processed),
        Some(120)
    );
    assert!(workspace.analytics.resource().error().is_none());
}

#[tokio::test]
async fn test_toggle_rule_uses_server_state() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/auto-reply/rules")
        .with_status(200)
        .with_body(ok(json!([rule("r1", true)])))
        .create_async()
        .await;
    server
        .mock("PATCH", "/auto-reply/rules/r1/toggle")
        .with_status(200)
        .with_body(ok(rule("r1", false)))
        .expect(1)
        .create_async()
        .await;

    let rules = Collection::new(RulesApi::new(transport(
        &server.url(),
        signed_in_store("token-1", None),
    )));
    assert!(rules.load().await);
    assert!(rules.toggle("r1").await);
    assert!(!rules.items()[0].enabled);
}
