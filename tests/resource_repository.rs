mod common;

use resource_hub::entity::resource::ResourceType;
use resource_hub::model::{ListQuery, NewResource, PageRequest, ResourcePatch};
use resource_hub::repository::ResourceRepository;
use sea_orm::{ConnectionTrait, DbBackend, Statement};

fn new_resource(title: &str, kind: ResourceType) -> NewResource {
    NewResource {
        title: title.to_string(),
        description: None,
        kind,
        url: format!("http://example.test/{}", title.to_lowercase()),
        tags: vec![],
    }
}

fn page(page: u64, size: u64, order_by: &str, order_dir: &str) -> PageRequest {
    let raw = format!(
        r#"{{"page":{},"size":{},"order_by":"{}","order_dir":"{}"}}"#,
        page, size, order_by, order_dir
    );
    serde_json::from_str::<ListQuery>(&raw).unwrap().validate().unwrap()
}

#[actix_rt::test]
async fn create_then_get_returns_same_fields() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);

    let mut data = new_resource("Intro", ResourceType::Video);
    data.description = Some("first steps".to_string());
    data.tags = vec!["intro".to_string(), "basics".to_string()];
    let created = repo.create(data.clone()).await.unwrap();

    assert!(created.id > 0);
    let loaded = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.title, "Intro");
    assert_eq!(loaded.description.as_deref(), Some("first steps"));
    assert_eq!(loaded.kind, ResourceType::Video);
    assert_eq!(loaded.tags.0, data.tags);
}

#[actix_rt::test]
async fn get_missing_is_none() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    assert!(repo.get_by_id(404).await.unwrap().is_none());
}

#[actix_rt::test]
async fn list_pages_and_counts_everything() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    for i in 0..7 {
        repo.create(new_resource(&format!("R{}", i), ResourceType::Link))
            .await
            .unwrap();
    }

    let (first, total) = repo.list(&page(1, 3, "created_at", "desc")).await.unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(total, 7);

    let (last, total) = repo.list(&page(3, 3, "created_at", "desc")).await.unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(total, 7);

    let (beyond, total) = repo.list(&page(10, 3, "created_at", "desc")).await.unwrap();
    assert!(beyond.is_empty());
    assert_eq!(total, 7);
}

#[actix_rt::test]
async fn list_sorts_by_title_and_type() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    repo.create(new_resource("Beta", ResourceType::Video)).await.unwrap();
    repo.create(new_resource("Alpha", ResourceType::Pdf)).await.unwrap();
    repo.create(new_resource("Gamma", ResourceType::Link)).await.unwrap();

    let (items, _) = repo.list(&page(1, 10, "title", "asc")).await.unwrap();
    let titles: Vec<_> = items.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);

    let (items, _) = repo.list(&page(1, 10, "title", "desc")).await.unwrap();
    let titles: Vec<_> = items.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Gamma", "Beta", "Alpha"]);

    let (items, _) = repo.list(&page(1, 10, "type", "asc")).await.unwrap();
    let kinds: Vec<_> = items.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![ResourceType::Link, ResourceType::Pdf, ResourceType::Video]);
}

#[actix_rt::test]
async fn unknown_sort_field_matches_created_at() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    for title in ["c", "a", "b"] {
        repo.create(new_resource(title, ResourceType::Link)).await.unwrap();
    }

    let (fallback, _) = repo.list(&page(1, 10, "url", "asc")).await.unwrap();
    let (explicit, _) = repo.list(&page(1, 10, "created_at", "asc")).await.unwrap();
    assert_eq!(fallback, explicit);
    let ids: Vec<_> = explicit.iter().map(|r| r.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[actix_rt::test]
async fn partial_update_keeps_omitted_fields() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    let mut data = new_resource("A", ResourceType::Pdf);
    data.url = "u".to_string();
    data.description = Some("keep me".to_string());
    let created = repo.create(data).await.unwrap();

    let patch = ResourcePatch {
        url: Some("v".to_string()),
        ..Default::default()
    };
    let updated = repo.update(created.clone(), patch).await.unwrap();
    assert_eq!(updated.title, "A");
    assert_eq!(updated.url, "v");
    assert_eq!(updated.description.as_deref(), Some("keep me"));
    assert_eq!(updated.created_at, created.created_at);

    let reloaded = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded, updated);
}

#[actix_rt::test]
async fn empty_patch_is_a_no_op() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    let created = repo.create(new_resource("Same", ResourceType::Link)).await.unwrap();
    let updated = repo.update(created.clone(), ResourcePatch::default()).await.unwrap();
    assert_eq!(updated, created);
}

#[actix_rt::test]
async fn delete_removes_row() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    let created = repo.create(new_resource("Gone", ResourceType::Video)).await.unwrap();
    repo.delete(created.clone()).await.unwrap();
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    let (_, total) = repo.list(&page(1, 10, "created_at", "desc")).await.unwrap();
    assert_eq!(total, 0);
}

#[actix_rt::test]
async fn huge_page_is_empty_with_total() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    for title in ["a", "b", "c"] {
        repo.create(new_resource(title, ResourceType::Link)).await.unwrap();
    }

    let (items, total) = repo
        .list(&page(4_611_686_018_427_387_905, 4, "created_at", "desc"))
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(total, 3);
}

#[actix_rt::test]
async fn malformed_stored_tags_fail_loudly() {
    let db = common::test_db().await;
    let repo = ResourceRepository::new(&db);
    let mut data = new_resource("Tagged", ResourceType::Pdf);
    data.tags = vec!["keep".to_string()];
    let created = repo.create(data).await.unwrap();

    db.execute(Statement::from_sql_and_values(
        DbBackend::Sqlite,
        "UPDATE resources SET tags = ? WHERE id = ?",
        ["not json".into(), created.id.into()],
    ))
    .await
    .unwrap();

    assert!(repo.get_by_id(created.id).await.is_err());
}
