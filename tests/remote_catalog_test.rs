//! Integration tests for catalogs hosted on GitHub, against a mock API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use graft::apply::{Applier, CollisionPolicy};
use graft::catalog::{FeatureSource, GithubSource};
use graft::config::RemoteSettings;
use graft::selection::parse_selection;
use graft::GraftError;
use httpmock::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn settings(server: &MockServer) -> RemoteSettings {
    RemoteSettings {
        api_url: server.base_url(),
        ..RemoteSettings::for_repo("acme/starter")
    }
}

/// Mock a repository with `features/{base,docker}` and their files.
fn mock_repository(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/starter/contents/features")
            .query_param("ref", "main");
        then.status(200).json_body(json!([
            {"name": "base", "path": "features/base", "type": "dir", "download_url": null},
            {"name": "docker", "path": "features/docker", "type": "dir", "download_url": null},
            {"name": "README.md", "path": "features/README.md", "type": "file",
             "download_url": server.url("/raw/features/README.md")}
        ]));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/starter/contents/features/base")
            .query_param("ref", "main");
        then.status(200).json_body(json!([
            {"name": "README.md", "path": "features/base/README.md", "type": "file",
             "download_url": server.url("/raw/base/README.md")},
            {"name": "config", "path": "features/base/config", "type": "dir", "download_url": null}
        ]));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/starter/contents/features/base/config")
            .query_param("ref", "main");
        then.status(200).json_body(json!([
            {"name": "app.toml", "path": "features/base/config/app.toml", "type": "file",
             "download_url": server.url("/raw/base/config/app.toml")}
        ]));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/starter/contents/features/docker")
            .query_param("ref", "main");
        then.status(200).json_body(json!([
            {"name": "Dockerfile", "path": "features/docker/Dockerfile", "type": "file",
             "download_url": server.url("/raw/docker/Dockerfile")}
        ]));
    });

    for (path, body) in [
        ("/raw/base/README.md", "# Starter\n"),
        ("/raw/base/config/app.toml", "name = \"starter\"\n"),
        ("/raw/docker/Dockerfile", "FROM rust:1\n"),
    ] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(body);
        });
    }
}

#[test]
fn lists_directories_as_features() {
    let server = MockServer::start();
    mock_repository(&server);

    let source = GithubSource::new(settings(&server), None).unwrap();
    let catalog = source.list_features().unwrap();

    let names: Vec<_> = catalog.features().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["docker"]);
    assert_eq!(catalog.base().map(|b| b.name.as_str()), Some("base"));
}

#[test]
fn lists_nested_files() {
    let server = MockServer::start();
    mock_repository(&server);

    let source = GithubSource::new(settings(&server), None).unwrap();
    let catalog = source.list_features().unwrap();
    let files = source.files(catalog.base().unwrap()).unwrap();

    let paths: Vec<_> = files
        .iter()
        .map(|f| f.relative_path.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(paths, vec!["README.md", "config/app.toml"]);
}

#[test]
fn applies_remote_features() {
    let server = MockServer::start();
    mock_repository(&server);
    let temp = TempDir::new().unwrap();

    let source = GithubSource::new(settings(&server), None).unwrap();
    let catalog = source.list_features().unwrap();
    let selection = parse_selection("docker", &catalog).unwrap();

    let report = Applier::new(&source, CollisionPolicy::Overwrite)
        .apply(temp.path(), &catalog, &selection)
        .unwrap();

    assert_eq!(report.files.len(), 3);
    assert_eq!(
        fs::read_to_string(temp.path().join("config").join("app.toml")).unwrap(),
        "name = \"starter\"\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("Dockerfile")).unwrap(),
        "FROM rust:1\n"
    );
}

#[test]
fn manifest_sets_order_and_descriptions() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/starter/contents/features");
        then.status(200).json_body(json!([
            {"name": "ci", "path": "features/ci", "type": "dir", "download_url": null},
            {"name": "docker", "path": "features/docker", "type": "dir", "download_url": null},
            {"name": "catalog.yml", "path": "features/catalog.yml", "type": "file",
             "download_url": server.url("/raw/catalog.yml")}
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/raw/catalog.yml");
        then.status(200).body(
            "features:\n  - name: docker\n    description: Container setup\n  - name: ci\n",
        );
    });

    let source = GithubSource::new(settings(&server), None).unwrap();
    let catalog = source.list_features().unwrap();

    let names: Vec<_> = catalog.features().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["docker", "ci"]);
    assert_eq!(catalog.features()[0].description, "Container setup");
    assert!(catalog.base().is_none());
}

#[test]
fn sends_token_when_configured() {
    let server = MockServer::start();

    let listing = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/starter/contents/features")
            .header("Authorization", "token secret-token");
        then.status(200).json_body(json!([]));
    });

    let source = GithubSource::new(settings(&server), Some("secret-token".into())).unwrap();
    let catalog = source.list_features().unwrap();

    listing.assert();
    assert!(catalog.is_empty());
}

#[test]
fn missing_repository_is_catalog_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/starter/contents/features");
        then.status(404).json_body(json!({"message": "Not Found"}));
    });

    let source = GithubSource::new(settings(&server), None).unwrap();
    let err = source.list_features().unwrap_err();

    assert!(matches!(err, GraftError::CatalogError { .. }));
    assert!(err.to_string().contains("404"));
}

#[test]
fn cli_applies_from_repository() {
    let server = MockServer::start();
    mock_repository(&server);
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".graft.yml"),
        format!(
            "catalog:\n  remote:\n    repo: acme/starter\n    api_url: {}\n",
            server.base_url()
        ),
    )
    .unwrap();

    Command::new(cargo_bin("graft"))
        .current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".xdg"))
        .env_remove("GITHUB_API_TOKEN")
        .args(["apply", "out", "--all"])
        .assert()
        .success();

    assert!(temp.path().join("out").join("Dockerfile").is_file());
    assert!(temp.path().join("out").join("README.md").is_file());
}
