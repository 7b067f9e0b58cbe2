//! End-to-end reconciliation tests against a mock cluster API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use syndic_apply::cluster::AdminClient;
use syndic_apply::driver::Driver;
use syndic_apply::stage::StageOutcome;
use syndic_core::manifest::{Grant, KvPair, Manifest, NodeDecl, ServiceDecl, TokenDecl};

fn base_manifest(server: &MockServer) -> Manifest {
    let cluster = server
        .uri()
        .strip_prefix("http://")
        .expect("mock server uri")
        .to_string();
    Manifest {
        cluster,
        admin_token: "cred".into(),
        datacenter: "dc1".into(),
        apply_acls: false,
        apply_nodes: false,
        apply_keys: false,
        tokens: vec![],
        nodes: vec![],
        keys: vec![],
    }
}

fn token(id: &str, remove: bool) -> TokenDecl {
    TokenDecl {
        department: "dept".into(),
        team: "team".into(),
        id: id.into(),
        name: format!("token {id}"),
        token_type: "client".into(),
        remove,
        keys: vec![Grant {
            name: "a/b".into(),
            value: "write".into(),
        }],
        services: vec![],
    }
}

fn node(name: &str) -> NodeDecl {
    NodeDecl {
        node: name.into(),
        address: "10.0.0.9".into(),
        datacenter: "declared-dc".into(),
        service: ServiceDecl {
            id: format!("{name}-svc"),
            service: "web".into(),
            address: "10.0.0.9".into(),
            port: 8080,
            tags: vec![],
        },
    }
}

fn driver(manifest: &Manifest) -> Driver {
    let client = AdminClient::new(&manifest.cluster, &manifest.admin_token).expect("client");
    Driver::new(client)
}

#[tokio::test]
async fn removal_issues_only_a_destroy() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/acl/destroy/T1"))
        .and(query_param("token", "cred"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/acl/create"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut manifest = base_manifest(&server);
    manifest.apply_acls = true;
    // Grant lists populated on purpose; remove must win.
    manifest.tokens = vec![token("T1", true)];

    let report = driver(&manifest).run(&manifest).await;
    assert!(matches!(report.acl, StageOutcome::Completed));
}

#[tokio::test]
async fn create_follows_destroy_with_compiled_rules() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/acl/destroy/T1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/acl/create"))
        .and(query_param("token", "cred"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut manifest = base_manifest(&server);
    manifest.apply_acls = true;
    manifest.tokens = vec![token("T1", false)];

    let report = driver(&manifest).run(&manifest).await;
    assert!(matches!(report.acl, StageOutcome::Completed));

    let requests = server.received_requests().await.expect("recording on");
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/v1/acl/destroy/T1", "/v1/acl/create"]);

    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["ID"], "T1");
    assert_eq!(body["Type"], "client");
    let rules: serde_json::Value = serde_json::from_str(body["Rules"].as_str().unwrap()).unwrap();
    assert_eq!(
        rules,
        serde_json::json!({"key": {"a/b": {"policy": "write"}}, "service": {}})
    );
}

#[tokio::test]
async fn create_still_attempted_when_destroy_fails() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/acl/destroy/T1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/acl/create"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut manifest = base_manifest(&server);
    manifest.apply_acls = true;
    manifest.tokens = vec![token("T1", false)];

    let report = driver(&manifest).run(&manifest).await;
    assert!(matches!(report.acl, StageOutcome::Completed));
}

#[tokio::test]
async fn acl_abort_skips_later_tokens_but_not_later_stages() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/acl/destroy/T1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    // First create fails; the stage must stop before T2's destroy.
    Mock::given(method("PUT"))
        .and(path("/v1/acl/create"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/acl/destroy/T2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/catalog/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/feature/flags"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut manifest = base_manifest(&server);
    manifest.apply_acls = true;
    manifest.apply_nodes = true;
    manifest.apply_keys = true;
    manifest.tokens = vec![token("T1", false), token("T2", false)];
    manifest.nodes = vec![node("edge-1")];
    manifest.keys = vec![KvPair {
        name: "feature/flags".into(),
        value: "on".into(),
    }];

    let report = driver(&manifest).run(&manifest).await;
    assert!(matches!(report.acl, StageOutcome::Aborted { item: 0, .. }));
    assert!(matches!(report.nodes, StageOutcome::Completed));
    assert!(matches!(report.keys, StageOutcome::Completed));
    assert!(!report.all_clean());
}

#[tokio::test]
async fn node_stage_aborts_on_first_failure() {
    let server = MockServer::start().await;

    // Both nodes hit the same endpoint; expect(1) proves the second was
    // never attempted.
    Mock::given(method("PUT"))
        .and(path("/v1/catalog/register"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut manifest = base_manifest(&server);
    manifest.apply_nodes = true;
    manifest.nodes = vec![node("edge-1"), node("edge-2")];

    let report = driver(&manifest).run(&manifest).await;
    assert!(matches!(report.nodes, StageOutcome::Aborted { item: 0, .. }));
}

#[tokio::test]
async fn kv_stage_aborts_on_first_failure() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/kv/a"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut manifest = base_manifest(&server);
    manifest.apply_keys = true;
    manifest.keys = vec![
        KvPair {
            name: "a".into(),
            value: "1".into(),
        },
        KvPair {
            name: "b".into(),
            value: "2".into(),
        },
    ];

    let report = driver(&manifest).run(&manifest).await;
    assert!(matches!(report.keys, StageOutcome::Aborted { item: 0, .. }));
}

#[tokio::test]
async fn kv_value_sent_verbatim_and_node_gets_global_datacenter() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/catalog/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/app/motd"))
        .and(query_param("token", "cred"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut manifest = base_manifest(&server);
    manifest.apply_nodes = true;
    manifest.apply_keys = true;
    manifest.nodes = vec![node("edge-1")];
    manifest.keys = vec![KvPair {
        name: "app/motd".into(),
        value: "hello operators".into(),
    }];

    let report = driver(&manifest).run(&manifest).await;
    assert!(report.all_clean());

    let requests = server.received_requests().await.expect("recording on");
    let register = requests
        .iter()
        .find(|r| r.url.path() == "/v1/catalog/register")
        .expect("register request");
    let body: serde_json::Value = serde_json::from_slice(&register.body).unwrap();
    assert_eq!(body["Datacenter"], "dc1"); // declaration said "declared-dc"
    assert_eq!(body["Node"], "edge-1");

    let kv = requests
        .iter()
        .find(|r| r.url.path() == "/v1/kv/app/motd")
        .expect("kv request");
    assert_eq!(kv.body, b"hello operators");
}

#[tokio::test]
async fn disabled_stages_issue_no_requests() {
    let server = MockServer::start().await;

    let mut manifest = base_manifest(&server);
    manifest.tokens = vec![token("T1", false)];
    manifest.nodes = vec![node("edge-1")];
    manifest.keys = vec![KvPair {
        name: "a".into(),
        value: "1".into(),
    }];

    let report = driver(&manifest).run(&manifest).await;
    assert!(matches!(report.acl, StageOutcome::Skipped));
    assert!(matches!(report.nodes, StageOutcome::Skipped));
    assert!(matches!(report.keys, StageOutcome::Skipped));
    assert!(report.all_clean());

    let requests = server.received_requests().await.expect("recording on");
    assert!(requests.is_empty());
}
