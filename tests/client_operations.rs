//! Typed client operations against a scripted transport.
//!
//! The transport records every request and answers from a queue, so these
//! tests check both the wire requests the client builds and how it decodes
//! the responses.

use futures::TryStreamExt;
use notionkit::{
    ApiRequest, BlockContent, BlockId, BlockList, ClientError, DatabaseId, DatabaseQuery, Method,
    NotionClient, NotionErrorCode, PageId, Pagination, PropertyFilter, PropertySort,
    PropertyValueList, Transport, UserId,
};
use notionkit::query::TextPredicate;
use notionkit::HttpError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

const DATABASE_ID: &str = "a1b2c3d4-e5f6-7890-abcd-ef1234567890";
const PAGE_ID: &str = "216cd412-8533-8087-a989-cf37889137c3";
const TOGGLE_ID: &str = "c02fc1d3-db8b-45c5-a222-27595b15aea7";
const CHILD_PAGE_ID: &str = "3f1e2d4c-5b6a-4798-8a9b-0c1d2e3f4a5b";

#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, ClientError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn answering(responses: Vec<Result<Value, ClientError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::MalformedResponse("no scripted response".into())))
    }
}

fn page_json(id: &str, title: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": "2023-01-01T00:00:00.000Z",
        "last_edited_time": "2023-01-02T00:00:00.000Z",
        "parent": {"type": "database_id", "database_id": DATABASE_ID},
        "archived": false,
        "url": "https://www.notion.so/Test-Page",
        "properties": {
            "Name": {
                "id": "title",
                "type": "title",
                "title": [{
                    "type": "text",
                    "text": {"content": title, "link": null},
                    "plain_text": title,
                    "href": null,
                    "annotations": {"bold": false, "italic": false, "strikethrough": false, "underline": false, "code": false, "color": "default"}
                }]
            },
            "Legs": {"id": "a%3Cb", "type": "number", "number": 4},
            "Updated": {"id": "upd", "type": "last_edited_time", "last_edited_time": "2023-01-02T00:00:00.000Z"}
        }
    })
}

fn list_json(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "has_more": next_cursor.is_some(),
        "next_cursor": next_cursor,
    })
}

fn paragraph_json(id: &str, text: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "paragraph",
        "has_children": false,
        "paragraph": {"rich_text": [{"type": "text", "text": {"content": text}, "plain_text": text}]}
    })
}

#[tokio::test]
async fn get_page_requests_dashed_path_and_decodes() {
    let transport = ScriptedTransport::answering(vec![Ok(page_json(PAGE_ID, "Row 1"))]);
    let client = NotionClient::new(transport);

    let id = PageId::parse("216cd41285338087a989cf37889137c3").unwrap();
    let page = client.get_page(&id).await.unwrap();

    assert_eq!(page.id, id);
    assert_eq!(page.title(), "Row 1");
    assert_eq!(
        client.transport().requests(),
        vec![ApiRequest::get(format!("pages/{}", PAGE_ID))]
    );
}

#[tokio::test]
async fn query_database_posts_encoded_query() {
    let transport =
        ScriptedTransport::answering(vec![Ok(list_json(vec![page_json(PAGE_ID, "Row 1")], None))]);
    let client = NotionClient::new(transport);

    let database = DatabaseId::parse(DATABASE_ID).unwrap();
    let query = DatabaseQuery::new()
        .filter(PropertyFilter::title("Name", TextPredicate::StartsWith("Row".into())))
        .sort(PropertySort::new().descending("Legs"));
    let page = client.query_database(&database, &query).await.unwrap();

    assert_eq!(page.results.len(), 1);
    assert!(page.is_last());

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, format!("databases/{}/query", DATABASE_ID));
    assert_eq!(
        requests[0].body,
        Some(json!({
            "filter": {"property": "Name", "title": {"starts_with": "Row"}},
            "sorts": [{"property": "Legs", "direction": "descending"}]
        }))
    );
}

#[tokio::test]
async fn query_stream_follows_cursor_until_last_page() {
    let transport = ScriptedTransport::answering(vec![
        Ok(list_json(vec![page_json(PAGE_ID, "Row 1")], Some("cursor-2"))),
        Ok(list_json(vec![page_json(CHILD_PAGE_ID, "Row 2")], None)),
    ]);
    let client = NotionClient::new(transport);

    let database = DatabaseId::parse(DATABASE_ID).unwrap();
    let query = DatabaseQuery::new().pagination(Pagination::new().with_page_size(1).unwrap());
    let pages: Vec<_> = client
        .query_database_stream(&database, &query)
        .try_collect()
        .await
        .unwrap();

    let titles: Vec<String> = pages.iter().map(|page| page.title()).collect();
    assert_eq!(titles, vec!["Row 1", "Row 2"]);

    let bodies: Vec<Option<Value>> = client
        .transport()
        .requests()
        .into_iter()
        .map(|request| request.body)
        .collect();
    assert_eq!(
        bodies,
        vec![
            Some(json!({"page_size": 1})),
            Some(json!({"start_cursor": "cursor-2", "page_size": 1})),
        ]
    );
}

#[tokio::test]
async fn update_page_sends_only_writable_properties() {
    let transport = ScriptedTransport::answering(vec![Ok(page_json(PAGE_ID, "Renamed"))]);
    let client = NotionClient::new(transport);

    let id = PageId::parse(PAGE_ID).unwrap();
    let properties = PropertyValueList::new()
        .title("Name", "Renamed")
        .clear_number("Legs");
    let page = client.update_page(&id, &properties).await.unwrap();
    assert_eq!(page.title(), "Renamed");

    // A decoded page carries read-only values; they must not be written back.
    assert!(page.properties.get("Updated").is_some());
    assert_eq!(page.properties.writable().count(), 2);

    let request = &client.transport().requests()[0];
    assert_eq!(request.method, Method::Patch);
    assert_eq!(
        request.body,
        Some(json!({"properties": {
            "Name": {"title": [{"type": "text", "text": {"content": "Renamed"}}]},
            "Legs": {"number": null}
        }}))
    );
}

#[tokio::test]
async fn archive_page_patches_archived_flag() {
    let mut archived = page_json(PAGE_ID, "Row 1");
    archived["archived"] = json!(true);
    let client = NotionClient::new(ScriptedTransport::answering(vec![Ok(archived)]));

    let page = client
        .archive_page(&PageId::parse(PAGE_ID).unwrap())
        .await
        .unwrap();
    assert!(page.archived);
    assert_eq!(
        client.transport().requests()[0].body,
        Some(json!({"archived": true}))
    );
}

#[tokio::test]
async fn list_users_puts_pagination_in_query_string() {
    let users = list_json(
        vec![
            json!({"object": "user", "id": "6d6e4e1f-2a9b-4c3c-9d6e-000000000001", "type": "person", "name": "Ada", "person": {"email": "ada@example.com"}}),
            json!({"object": "user", "id": "6d6e4e1f-2a9b-4c3c-9d6e-000000000002", "type": "bot", "name": "Sync", "bot": {}}),
        ],
        Some("next"),
    );
    let client = NotionClient::new(ScriptedTransport::answering(vec![Ok(users)]));

    let pagination = Pagination::new().starting_at("abc").with_page_size(2).unwrap();
    let page = client.list_users(&pagination).await.unwrap();

    assert_eq!(page.results[0].email(), Some("ada@example.com"));
    assert!(page.results[1].is_bot());
    assert_eq!(
        page.next_pagination(&pagination),
        Some(Pagination::new().starting_at("next").with_page_size(2).unwrap())
    );

    let request = &client.transport().requests()[0];
    assert_eq!(request.path, "users");
    assert_eq!(
        request.query,
        vec![
            ("start_cursor".to_string(), "abc".to_string()),
            ("page_size".to_string(), "2".to_string()),
        ]
    );
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn get_user_uses_user_path() {
    let user = json!({"object": "user", "id": "6d6e4e1f-2a9b-4c3c-9d6e-000000000001"});
    let client = NotionClient::new(ScriptedTransport::answering(vec![Ok(user)]));

    let id = UserId::parse("6d6e4e1f-2a9b-4c3c-9d6e-000000000001").unwrap();
    let user = client.get_user(&id).await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.kind, None);
    assert_eq!(
        client.transport().requests()[0].path,
        "users/6d6e4e1f-2a9b-4c3c-9d6e-000000000001"
    );
}

#[tokio::test]
async fn all_block_children_are_fetched_recursively() {
    let toggle = json!({
        "object": "block",
        "id": TOGGLE_ID,
        "type": "toggle",
        "has_children": true,
        "toggle": {"rich_text": [{"type": "text", "text": {"content": "More"}, "plain_text": "More"}]}
    });
    let child_page = json!({
        "object": "block",
        "id": CHILD_PAGE_ID,
        "type": "child_page",
        "has_children": true,
        "child_page": {"title": "Sub page"}
    });
    let transport = ScriptedTransport::answering(vec![
        Ok(list_json(
            vec![paragraph_json("11111111-1111-4111-8111-111111111111", "Intro"), toggle],
            Some("more-top"),
        )),
        Ok(list_json(vec![child_page], None)),
        Ok(list_json(
            vec![paragraph_json("22222222-2222-4222-8222-222222222222", "Hidden")],
            None,
        )),
    ]);
    let client = NotionClient::new(transport);

    let root = BlockId::parse(PAGE_ID).unwrap();
    let blocks = client.get_all_block_children(&root).await.unwrap();

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].plain_text(), "Intro");
    assert_eq!(blocks[1].children.len(), 1);
    assert_eq!(blocks[1].children[0].plain_text(), "Hidden");
    assert!(matches!(blocks[2].content, BlockContent::ChildPage { .. }));
    assert!(blocks[2].children.is_empty());

    let paths: Vec<String> = client
        .transport()
        .requests()
        .into_iter()
        .map(|request| request.path)
        .collect();
    assert_eq!(
        paths,
        vec![
            format!("blocks/{}/children", PAGE_ID),
            format!("blocks/{}/children", PAGE_ID),
            format!("blocks/{}/children", TOGGLE_ID),
        ]
    );
}

#[tokio::test]
async fn append_block_children_patches_children_body() {
    let client = NotionClient::new(ScriptedTransport::answering(vec![Ok(list_json(
        vec![paragraph_json("11111111-1111-4111-8111-111111111111", "Hello")],
        None,
    ))]));

    let parent = BlockId::parse(PAGE_ID).unwrap();
    let appended = client
        .append_block_children(&parent, &BlockList::new().paragraph("Hello"))
        .await
        .unwrap();
    assert_eq!(appended.results[0].plain_text(), "Hello");

    let request = &client.transport().requests()[0];
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.path, format!("blocks/{}/children", PAGE_ID));
    assert_eq!(
        request.body,
        Some(json!({"children": [{
            "object": "block",
            "type": "paragraph",
            "paragraph": {"rich_text": [{"type": "text", "text": {"content": "Hello"}}]}
        }]}))
    );
}

#[tokio::test]
async fn http_errors_pass_through_unchanged() {
    let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find page"}"#;
    let client = NotionClient::new(ScriptedTransport::answering(vec![Err(
        HttpError::from_response(404, body).into(),
    )]));

    let err = client
        .get_page(&PageId::parse(PAGE_ID).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        ClientError::Http(http) => {
            assert_eq!(http.code, NotionErrorCode::ObjectNotFound);
            assert_eq!(http.message, "Could not find page");
            assert_eq!(http.body, body);
        }
        other => panic!("expected an HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_response_is_a_decode_error() {
    let client = NotionClient::new(ScriptedTransport::answering(vec![Ok(json!({
        "object": "page",
        "parent": {"type": "workspace", "workspace": true}
    }))]));

    let err = client
        .get_page(&PageId::parse(PAGE_ID).unwrap())
        .await
        .unwrap_err();
    match err {
        ClientError::Decode(decode) => {
            assert_eq!(decode.kind, "page");
            assert_eq!(decode.field, "id");
        }
        other => panic!("expected a decode error, got {:?}", other),
    }
}
