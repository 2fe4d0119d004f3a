use chrono::NaiveDate;
use pushkind_showcase::domain::article::{Article, NewArticle};
use pushkind_showcase::domain::event::{Event, NewEvent};
use pushkind_showcase::domain::outlet::Outlet;
use pushkind_showcase::domain::product::{NewProduct, Product};
use pushkind_showcase::domain::staff::NewStaffUser;
use pushkind_showcase::domain::types::{
    ArticleBody, ArticleTitle, EventName, Price, ProductId, ProductName, StaffEmail, StaffName,
};
use pushkind_showcase::repository::errors::RepositoryError;
use pushkind_showcase::repository::{
    AdminCredential, DieselRepository, StaffAdmin, StaffReader, StaffWriter, TableQuery,
    TableReader, TableWriter,
};

mod common;

fn product(name: &str, price: f64) -> NewProduct {
    NewProduct {
        name: ProductName::new(name).unwrap(),
        description: None,
        category: Some("Jewellery".to_string()),
        price: Price::new(price).unwrap(),
        image_url: None,
    }
}

fn seed_products(repo: &DieselRepository, count: usize) {
    for i in 1..=count {
        TableWriter::<Product>::insert_row(repo, &product(&format!("Product {i:02}"), i as f64))
            .unwrap();
    }
}

#[test]
fn test_product_crud() {
    let test_db = common::TestDb::new("test_product_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let ring: Product = repo.insert_row(&product("Silver ring", 120.0)).unwrap();
    assert_eq!(ring.name.as_str(), "Silver ring");
    assert_eq!(ring.price.get(), 120.0);

    let fetched: Option<Product> = repo.get_row(ring.id).unwrap();
    assert_eq!(fetched.unwrap().name.as_str(), "Silver ring");

    let mut changes = product("Gold ring", 300.0);
    changes.description = Some("18k".to_string());
    let updated: Product = repo.update_row(ring.id, &changes).unwrap();
    assert_eq!(updated.name.as_str(), "Gold ring");
    assert_eq!(updated.description.as_deref(), Some("18k"));

    TableWriter::<Product>::delete_row(&repo, ring.id).unwrap();
    let missing: Option<Product> = repo.get_row(ring.id).unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_missing_rows_report_not_found() {
    let test_db = common::TestDb::new("test_missing_rows.db");
    let repo = DieselRepository::new(test_db.pool());
    let id = ProductId::new(42).unwrap();

    assert!(matches!(
        TableWriter::<Product>::delete_row(&repo, id),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        TableWriter::<Product>::update_row(&repo, id, &product("Ghost", 1.0)),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_select_pages_newest_first() {
    let test_db = common::TestDb::new("test_select_pages.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_products(&repo, 12);

    let (total, first): (usize, Vec<Product>) = repo
        .select_rows(&TableQuery::new().paginate(1, 10))
        .unwrap();
    assert_eq!(total, 12);
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].name.as_str(), "Product 12");

    let (total, second): (usize, Vec<Product>) = repo
        .select_rows(&TableQuery::new().paginate(2, 10))
        .unwrap();
    assert_eq!(total, 12);
    assert_eq!(second.len(), 2);
    assert_eq!(second[1].name.as_str(), "Product 01");

    let (total, beyond): (usize, Vec<Product>) = repo
        .select_rows(&TableQuery::new().paginate(5, 10))
        .unwrap();
    assert_eq!(total, 12);
    assert!(beyond.is_empty());

    let (total, overflow): (usize, Vec<Product>) = repo
        .select_rows(&TableQuery::new().paginate(usize::MAX, 10))
        .unwrap();
    assert_eq!(total, 12);
    assert!(overflow.is_empty());
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let test_db = common::TestDb::new("test_search.db");
    let repo = DieselRepository::new(test_db.pool());
    TableWriter::<Product>::insert_row(&repo, &product("Amber Necklace", 50.0)).unwrap();
    TableWriter::<Product>::insert_row(&repo, &product("amber earrings", 40.0)).unwrap();
    TableWriter::<Product>::insert_row(&repo, &product("Pearl brooch", 30.0)).unwrap();

    let (total, rows): (usize, Vec<Product>) = repo
        .select_rows(&TableQuery::new().search("name", "AMBER").paginate(1, 10))
        .unwrap();
    assert_eq!(total, 2);
    assert!(rows.iter().all(|p| p.name.to_lowercase().contains("amber")));

    let (total, rows): (usize, Vec<Product>) = repo
        .select_rows(&TableQuery::new().search("name", "xyz-no-match"))
        .unwrap();
    assert_eq!(total, 0);
    assert!(rows.is_empty());
}

#[test]
fn test_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_search_wildcards.db");
    let repo = DieselRepository::new(test_db.pool());
    TableWriter::<Product>::insert_row(&repo, &product("50% off bundle", 10.0)).unwrap();
    TableWriter::<Product>::insert_row(&repo, &product("500 beads", 10.0)).unwrap();

    let (total, rows): (usize, Vec<Product>) = repo
        .select_rows(&TableQuery::new().search("name", "50%"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].name.as_str(), "50% off bundle");
}

#[test]
fn test_unknown_search_column_is_rejected() {
    let test_db = common::TestDb::new("test_unknown_column.db");
    let repo = DieselRepository::new(test_db.pool());

    let result: Result<(usize, Vec<Outlet>), _> =
        repo.select_rows(&TableQuery::new().search("password", "x"));
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}

#[test]
fn test_event_and_article_round_trip() {
    let test_db = common::TestDb::new("test_event_article.db");
    let repo = DieselRepository::new(test_db.pool());
    let starts_at = NaiveDate::from_ymd_opt(2026, 5, 1)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap();

    let event: Event = repo
        .insert_row(&NewEvent {
            name: EventName::new("Spring fair").unwrap(),
            description: None,
            location: Some("Main hall".to_string()),
            starts_at,
            ends_at: None,
            image_url: None,
        })
        .unwrap();
    assert_eq!(event.starts_at, starts_at);

    let (total, found): (usize, Vec<Event>) = repo
        .select_rows(&TableQuery::new().search("location", "main"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].id, event.id);

    let article: Article = repo
        .insert_row(&NewArticle {
            title: ArticleTitle::new("Caring for silver").unwrap(),
            excerpt: Some("Keep it shiny".to_string()),
            body: ArticleBody::new("<p>Polish gently.</p>").unwrap(),
            image_url: None,
        })
        .unwrap();
    assert_eq!(article.body.as_str(), "<p>Polish gently.</p>");
}

#[test]
fn test_staff_sign_in_bookkeeping() {
    let test_db = common::TestDb::new("test_staff.db");
    let repo = DieselRepository::new(test_db.pool());
    let email = StaffEmail::new("editor@example.com").unwrap();

    let user = repo
        .create_staff(&NewStaffUser {
            email: email.clone(),
            name: StaffName::new("Editor").unwrap(),
            password_hash: "hash".to_string(),
            roles: vec!["showcase".to_string(), "showcase_admin".to_string()],
        })
        .unwrap();
    assert!(user.last_sign_in_at.is_none());

    repo.record_sign_in(user.id).unwrap();

    let stored = repo.get_staff_by_email(&email).unwrap().unwrap();
    assert_eq!(stored.roles, vec!["showcase", "showcase_admin"]);
    assert!(stored.last_sign_in_at.is_some());

    let duplicate = repo.create_staff(&NewStaffUser {
        email,
        name: StaffName::new("Again").unwrap(),
        password_hash: "hash".to_string(),
        roles: Vec::new(),
    });
    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}

#[test]
fn test_staff_admin_requires_matching_credential() {
    let test_db = common::TestDb::new("test_staff_admin.db");
    let key = AdminCredential::new("admin-key");
    let repo = DieselRepository::new(test_db.pool()).with_admin_credential(key.clone());
    let user = repo
        .create_staff(&NewStaffUser {
            email: StaffEmail::new("temp@example.com").unwrap(),
            name: StaffName::new("Temp").unwrap(),
            password_hash: "hash".to_string(),
            roles: vec!["showcase".to_string()],
        })
        .unwrap();

    assert!(matches!(
        repo.list_staff(&AdminCredential::new("wrong")),
        Err(RepositoryError::AccessDenied(_))
    ));
    assert_eq!(repo.list_staff(&key).unwrap().len(), 1);

    repo.delete_staff(&key, user.id).unwrap();
    assert!(repo.list_staff(&key).unwrap().is_empty());
    assert!(matches!(
        repo.delete_staff(&key, user.id),
        Err(RepositoryError::NotFound)
    ));

    let unconfigured = DieselRepository::new(test_db.pool());
    assert!(matches!(
        unconfigured.list_staff(&key),
        Err(RepositoryError::AccessDenied(_))
    ));
}
