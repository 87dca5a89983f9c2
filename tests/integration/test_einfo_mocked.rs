//! EInfo integration tests against a mocked NCBI endpoint

use entrez_client::{ClientConfig, EntrezClient, EntrezError, RetMode, RetryConfig};
use tracing_test::traced_test;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DBLIST_RESPONSE: &str = r#"{
    "header": {"type": "einfo", "version": "2.0"},
    "einforesult": {"dblist": ["pubmed", "protein", "nuccore", "nucleotide", "pmc"]}
}"#;

const PUBMED_INFO_RESPONSE: &str = r#"{
    "header": {"type": "einfo", "version": "2.0"},
    "einforesult": {
        "dbinfo": [{
            "dbname": "pubmed",
            "menuname": "PubMed",
            "description": "PubMed bibliographic record",
            "dbbuild": "Build-2024.01.01",
            "count": "36000000",
            "lastupdate": "2024/01/01 00:00",
            "fieldlist": [
                {"name": "ALL", "fullname": "All Fields", "description": "All terms", "isdate": "N", "isnumerical": "N"},
                {"name": "TITL", "fullname": "Title", "description": "Words in title", "isdate": "N", "isnumerical": "N"},
                {"name": "PDAT", "fullname": "Date - Publication", "description": "Date of publication", "isdate": "Y", "isnumerical": "N"}
            ]
        }]
    }
}"#;

fn mock_client(server: &MockServer) -> EntrezClient {
    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_rate_limit(1000.0)
        .with_retry_config(RetryConfig::none());
    EntrezClient::with_config(config)
}

async fn mount_einfo_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"/einfo\.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(DBLIST_RESPONSE)
                .insert_header("content-type", "application/json"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
#[traced_test]
async fn test_database_list_from_catalog() {
    let server = MockServer::start().await;
    mount_einfo_catalog(&server).await;
    let client = mock_client(&server);

    let databases = client.database_list().await.expect("dblist should parse");
    assert_eq!(databases.len(), 5);
    assert!(databases.contains(&"pubmed".to_string()));
    assert!(databases.contains(&"nuccore".to_string()));
}

#[tokio::test]
async fn test_validation_catalog_membership() {
    let server = MockServer::start().await;
    mount_einfo_catalog(&server).await;
    let client = mock_client(&server);

    let catalog = client.validation_catalog().await.unwrap();
    assert!(catalog.ensure_database("pubmed").is_ok());
    assert!(catalog.ensure_database("bogus").is_err());
}

#[tokio::test]
async fn test_database_info_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/einfo\.fcgi"))
        .and(query_param("db", "pubmed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PUBMED_INFO_RESPONSE))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let info = client.database_info("pubmed").await.unwrap();
    assert_eq!(info.name, "pubmed");
    assert_eq!(info.record_count, Some(36_000_000));
    assert_eq!(info.fields.len(), 3);
    assert!(info.has_field("pdat"));
    assert!(info.fields.iter().any(|f| f.name == "PDAT" && f.is_date));
}

#[tokio::test]
async fn test_api_params_appended_to_requests() {
    let server = MockServer::start().await;
    mount_einfo_catalog(&server).await;

    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_rate_limit(1000.0)
        .with_retry_config(RetryConfig::none())
        .with_api_key("secret_key")
        .with_email("user@example.com")
        .with_tool("test-suite");
    let client = EntrezClient::with_config(config);

    client.database_list().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(query.contains(&("api_key".to_string(), "secret_key".to_string())));
    assert!(query.contains(&("email".to_string(), "user@example.com".to_string())));
    assert!(query.contains(&("tool".to_string(), "test-suite".to_string())));
}

#[tokio::test]
async fn test_save_info_pretty_prints_json() {
    let server = MockServer::start().await;
    mount_einfo_catalog(&server).await;
    let client = mock_client(&server);

    let dir = tempfile::tempdir().unwrap();
    let path = client
        .save_info(None, RetMode::Json, dir.path())
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("info.json"));
    let contents = std::fs::read_to_string(&path).unwrap();
    // Pretty-printed output is multi-line and re-parseable
    assert!(contents.lines().count() > 1);
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(value["einforesult"]["dblist"].is_array());
}

#[tokio::test]
async fn test_save_info_writes_xml_verbatim() {
    let server = MockServer::start().await;
    let xml_body = "<eInfoResult><DbList><DbName>pubmed</DbName></DbList></eInfoResult>";
    Mock::given(method("GET"))
        .and(path_regex(r"/einfo\.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_body))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let dir = tempfile::tempdir().unwrap();
    let path = client
        .save_info(Some("pubmed"), RetMode::Xml, dir.path())
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("info.xml"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), xml_body);
}

#[tokio::test]
async fn test_save_info_missing_directory_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let result = client
        .save_info(None, RetMode::Json, std::path::Path::new("/no/such/dir"))
        .await;
    assert!(matches!(
        result,
        Err(EntrezError::InvalidOutputDirectory { .. })
    ));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "directory check must precede the request");
}

#[tokio::test]
async fn test_non_success_status_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/einfo\.fcgi"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let err = client.database_list().await.unwrap_err();
    match err {
        EntrezError::ApiError { status, .. } => assert_eq!(status, 404),
        other => panic!("expected ApiError, got {other:?}"),
    }
}
