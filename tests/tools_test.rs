//! End-to-end tool tests: registry → ApiClient → wiremock upstream

mod common;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jiminny_mcp::format::TRUNCATION_SUFFIX;

use common::{registry_for, tokenless_registry};

async fn mount_json(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_conversations_formats_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/page/on-demand"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "ad0a10bc-90ce-44f3-baa4-2c7ce6d7104c",
                "title": "Renewal call",
                "actualStartTime": "2024-06-12T09:30:00.000000Z",
                "organizer": {"name": "Sam"},
                "hasTranscription": true,
                "isSummarized": true
            }],
            "pagination": {"total": 120, "current": 3, "next": 4}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("jiminny_list_conversations", json!({"page": 3}))
        .await
        .unwrap();
    assert!(result.success);
    assert!(result
        .output
        .starts_with("# Jiminny Conversations (page 3, 120 total)"));
    assert!(result.output.contains("## Renewal call"));
    assert!(result
        .output
        .contains("- **ID**: `ad0a10bc-90ce-44f3-baa4-2c7ce6d7104c`"));
    assert!(result.output.contains("- **Date**: 2024-06-12"));
    assert!(result.output.contains("- **Host**: Sam"));
    assert!(result
        .output
        .contains("- **Transcript**: Yes | **Summary**: Yes"));
    assert!(result
        .output
        .ends_with("_More results available, request page 4._"));
}

#[tokio::test]
async fn test_list_conversations_defaults_to_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/page/on-demand"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("jiminny_list_conversations", json!({}))
        .await
        .unwrap();
    assert!(result.output.ends_with("No conversations found."));
}

#[tokio::test]
async fn test_status_errors_become_messages() {
    for (status, expected) in [
        (401u16, "Authentication failed"),
        (403, "Permission denied"),
        (404, "Not found"),
        (429, "Rate limit"),
        (502, "Jiminny API returned status 502."),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let result = registry_for(&server)
            .call("jiminny_list_conversations", json!({"page": 1}))
            .await
            .unwrap();
        assert!(!result.success, "status {}", status);
        assert!(
            result.output.contains(expected),
            "status {} gave {}",
            status,
            result.output
        );
    }
}

#[tokio::test]
async fn test_missing_token_message_for_every_tool() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let registry = tokenless_registry(&server);
    for (tool, args) in [
        ("jiminny_list_conversations", json!({})),
        ("jiminny_get_transcript", json!({"conversation_id": "abc"})),
        ("jiminny_get_summary", json!({"conversation_id": "abc"})),
    ] {
        let result = registry.call(tool, args).await.unwrap();
        assert!(!result.success);
        assert!(
            result
                .output
                .starts_with("JIMINNY_TOKEN environment variable is not set."),
            "{} gave {}",
            tool,
            result.output
        );
    }
}

#[tokio::test]
async fn test_transcript_with_participant_names() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/api/v1/activity/abc/transcription",
        200,
        json!({"segments": [
            {"participantId": "p1", "transcript": "Hi, thanks for joining.", "startsAt": 3},
            {"participantId": "p1", "transcript": "Shall we start?", "startsAt": 6},
            {"participantId": "p2", "transcript": "Sure.", "startsAt": 75}
        ]}),
    )
    .await;
    mount_json(
        &server,
        "/api/v1/activity/abc/participants",
        200,
        json!([
            {"id": "p1", "name": "Alice"},
            {"id": "p2", "name": "Bob"}
        ]),
    )
    .await;

    let result = registry_for(&server)
        .call("jiminny_get_transcript", json!({"conversation_id": " abc "}))
        .await
        .unwrap();
    assert!(result.success);
    let expected = [
        "# Transcript",
        "",
        "_Participants: Alice, Bob_\n",
        "\n**Alice** [0:03]:\nHi, thanks for joining.",
        "Shall we start?",
        "\n**Bob** [1:15]:\nSure.",
    ]
    .join("\n");
    assert_eq!(result.output, expected);
}

#[tokio::test]
async fn test_transcript_auto_labels_when_participants_fail() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/api/v1/activity/abc/transcription",
        200,
        json!([
            {"participantId": "A", "text": "one"},
            {"participantId": "A", "text": "two"},
            {"participantId": "B", "text": "three"},
            {"participantId": "A", "text": "four"}
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/activity/abc/participants"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("jiminny_get_transcript", json!({"conversation_id": "abc"}))
        .await
        .unwrap();
    assert!(result.success);
    assert!(result
        .output
        .contains("_Note: 2 speakers detected (names could not be resolved)_"));
    assert!(result.output.contains("**Speaker 1** []:\none\ntwo"));
    assert!(result.output.contains("**Speaker 2** []:\nthree"));
    assert!(result.output.ends_with("**Speaker 1** []:\nfour"));
}

#[tokio::test]
async fn test_transcript_text_payload_skips_participant_lookup() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/api/v1/activity/abc/transcription",
        200,
        json!({"transcription": "Plain transcript"}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/activity/abc/participants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("jiminny_get_transcript", json!({"conversation_id": "abc"}))
        .await
        .unwrap();
    assert_eq!(result.output, "# Transcript\n\nPlain transcript");
}

#[tokio::test]
async fn test_transcript_truncated() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/api/v1/activity/abc/transcription",
        200,
        json!({"text": "x".repeat(30_000)}),
    )
    .await;

    let result = registry_for(&server)
        .call("jiminny_get_transcript", json!({"conversation_id": "abc"}))
        .await
        .unwrap();
    assert!(result.output.ends_with(TRUNCATION_SUFFIX));
    assert_eq!(
        result.output.chars().count(),
        25_000 + TRUNCATION_SUFFIX.chars().count()
    );
}

#[tokio::test]
async fn test_transcript_blank_id_rejected() {
    let server = MockServer::start().await;

    let result = registry_for(&server)
        .call("jiminny_get_transcript", json!({"conversation_id": "   "}))
        .await
        .unwrap();
    assert!(!result.success);
    assert!(result.output.starts_with("Error: Invalid input:"));
}

#[tokio::test]
async fn test_summary_action_items_failure_degrades_one_section() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/api/v1/activity/abc/transcription-summary",
        200,
        json!({"data": {"summary": "Customer wants a pilot."}}),
    )
    .await;
    // Malformed JSON on a 200 makes the whole lookup fail.
    Mock::given(method("GET"))
        .and(path("/api/v1/activity/abc/action-items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    mount_json(&server, "/api/v1/activity/abc/key-points", 404, json!({})).await;
    mount_json(
        &server,
        "/api/v1/conference/abc/key-points",
        200,
        json!({"keyPoints": {"content": ["Budget approved", "Q3 start"]}}),
    )
    .await;

    let result = registry_for(&server)
        .call("jiminny_get_summary", json!({"conversation_id": "abc"}))
        .await
        .unwrap();
    assert!(result.success);
    let expected = [
        "# Conversation Summary",
        "",
        "## Summary",
        "Customer wants a pilot.",
        "",
        "## Action Items",
        "_Action items not available._",
        "",
        "## Key Points",
        "- Budget approved",
        "- Q3 start",
    ]
    .join("\n");
    assert_eq!(result.output, expected);
}

#[tokio::test]
async fn test_summary_all_sections_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(6)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .call("jiminny_get_summary", json!({"conversation_id": "abc"}))
        .await
        .unwrap();
    assert!(result.success);
    assert!(result.output.contains(
        "_Summary not available via API. Use jiminny_get_transcript and ask for a summary in chat._"
    ));
    assert!(result.output.contains("_Action items not available._"));
    assert!(result.output.ends_with(
        "_Key points not available via API. Use jiminny_get_transcript and ask for key points in chat._"
    ));
}
