//! Listing, form and delete flows shared by every catalog resource.

use std::future::ready;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::event::Event;
use crate::domain::messaging::{deep_link, product_inquiry};
use crate::domain::product::Product;
use crate::domain::row::Row;
use crate::domain::types::{PhoneNumber, ProductId};
use crate::dto::catalog::{
    AdminListingPage, ApiPage, DeleteTarget, DeletedRow, FormPage, HomePage, ListingPage,
    TableQueryParams,
};
use crate::repository::{TableReader, TableWriter};
use crate::resources::Resource;
use crate::services::{ServiceError, ServiceResult};
use crate::table::controller::DataTable;
use crate::table::delete::{ConfirmError, DeleteDialog};
use crate::table::view::TableAction;

fn ensure_staff(user: &AuthenticatedUser) -> ServiceResult<()> {
    if check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Non-positive ids cannot name a row.
fn parse_id<T: Row>(id: i32) -> ServiceResult<T::Id> {
    T::Id::try_from(id).map_err(|_| ServiceError::NotFound)
}

fn table_for<'a, T, R>(
    repo: &'a R,
    params: &TableQueryParams,
    page_size: usize,
) -> DataTable<'a, T, R>
where
    T: Resource,
    R: TableReader<T> + ?Sized,
{
    DataTable::new(repo)
        .page_size(page_size)
        .search_column(T::SEARCH_COLUMN)
        .starting_page(params.page())
        .starting_search(params.search())
}

/// Public listing of a resource.
pub fn load_listing<T, R>(
    repo: &R,
    params: &TableQueryParams,
    page_size: usize,
) -> ServiceResult<ListingPage>
where
    T: Resource,
    R: TableReader<T> + ?Sized,
{
    let table = table_for::<T, R>(repo, params, page_size).mount();

    Ok(ListingPage {
        title: T::TITLE,
        singular: T::SINGULAR,
        slug: T::TABLE,
        base_path: format!("/{}", T::TABLE),
        table: table.view(&T::public_columns(), None),
    })
}

/// Back-office listing, optionally with a row staged for deletion.
pub fn load_admin_listing<T, R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &TableQueryParams,
    page_size: usize,
) -> ServiceResult<AdminListingPage>
where
    T: Resource,
    R: TableReader<T> + ?Sized,
{
    ensure_staff(user)?;

    let table = table_for::<T, R>(repo, params, page_size).mount();
    let base_path = T::admin_path();
    let action = TableAction::new(
        format!("Add {}", T::SINGULAR),
        format!("{base_path}/new"),
    );

    let query = params.to_query_string();
    let delete_target = match params.delete {
        Some(id) => {
            let target = repo
                .get_row(parse_id::<T>(id)?)?
                .ok_or(ServiceError::NotFound)?;
            Some(DeleteTarget {
                id,
                label: target.label(),
                action: format!("{base_path}/{id}/delete{query}"),
                cancel_href: format!("{base_path}{query}"),
            })
        }
        None => None,
    };

    Ok(AdminListingPage {
        listing: ListingPage {
            title: T::TITLE,
            singular: T::SINGULAR,
            slug: T::TABLE,
            base_path,
            table: table
                .view(&T::columns(), Some(action))
                .with_row_actions(|id| T::row_actions(id, &query)),
        },
        delete_target,
    })
}

/// Empty create form, or the edit form of row `id`.
pub fn load_form<T, R>(repo: &R, user: &AuthenticatedUser, id: Option<i32>) -> ServiceResult<FormPage>
where
    T: Resource,
    R: TableReader<T> + ?Sized,
{
    ensure_staff(user)?;
    let base_path = T::admin_path();

    let page = match id {
        None => FormPage {
            title: format!("New {}", T::SINGULAR),
            slug: T::TABLE,
            action: format!("{base_path}/create"),
            cancel_href: base_path,
            fields: T::form_fields(None),
        },
        Some(id) => {
            let row = repo
                .get_row(parse_id::<T>(id)?)?
                .ok_or(ServiceError::NotFound)?;
            FormPage {
                title: format!("Edit {}", T::SINGULAR),
                slug: T::TABLE,
                action: format!("{base_path}/{id}/update"),
                cancel_href: base_path,
                fields: T::form_fields(Some(&row)),
            }
        }
    };
    Ok(page)
}

/// Validates the submitted form and inserts a new row.
pub fn create_row<T, R>(repo: &R, user: &AuthenticatedUser, form: T::Form) -> ServiceResult<T>
where
    T: Resource,
    R: TableWriter<T> + ?Sized,
{
    ensure_staff(user)?;

    let new_row = T::new_from_form(form).map_err(|err| {
        log::error!("Failed to validate {} form: {err}", T::SINGULAR);
        ServiceError::from(err)
    })?;

    repo.insert_row(&new_row).map_err(|err| {
        log::error!("Failed to insert into {}: {err}", T::TABLE);
        ServiceError::from(err)
    })
}

/// Validates the submitted form and replaces the editable fields of row `id`.
pub fn update_row<T, R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: T::Form,
) -> ServiceResult<T>
where
    T: Resource,
    R: TableWriter<T> + ?Sized,
{
    ensure_staff(user)?;
    let id = parse_id::<T>(id)?;

    let updates = T::update_from_form(form).map_err(|err| {
        log::error!("Failed to validate {} form: {err}", T::SINGULAR);
        ServiceError::from(err)
    })?;

    repo.update_row(id, &updates).map_err(|err| {
        log::error!("Failed to update {}: {err}", T::TABLE);
        ServiceError::from(err)
    })
}

/// Confirms the deletion of row `id` and returns the refreshed listing.
///
/// The listing is only fetched after a successful delete; a failed delete
/// leaves it untouched and returns the error.
pub async fn delete_row<T, R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    params: &TableQueryParams,
    page_size: usize,
) -> ServiceResult<DeletedRow<T>>
where
    T: Resource,
    R: TableReader<T> + TableWriter<T> + ?Sized,
{
    ensure_staff(user)?;

    let target = repo
        .get_row(parse_id::<T>(id)?)?
        .ok_or(ServiceError::NotFound)?;
    let label = target.label();

    let mut table = table_for::<T, R>(repo, params, page_size);
    let mut dialog = DeleteDialog::new();
    dialog.open(target)?;

    dialog
        .confirm(
            |row| ready(repo.delete_row(row.id())),
            || table.refresh(),
        )
        .await
        .map_err(|err| match err {
            ConfirmError::Action(err) => {
                log::error!("Failed to delete from {}: {err}", T::TABLE);
                ServiceError::from(err)
            }
            ConfirmError::Dialog(err) => ServiceError::from(err),
        })?;

    Ok(DeletedRow {
        label,
        page: ApiPage::from_table(&table),
    })
}

/// JSON listing of a resource.
pub fn api_listing<T, R>(
    repo: &R,
    params: &TableQueryParams,
    page_size: usize,
) -> ServiceResult<ApiPage<T>>
where
    T: Resource,
    R: TableReader<T> + ?Sized,
{
    let table = table_for::<T, R>(repo, params, page_size).mount();
    Ok(ApiPage::from_table(&table))
}

/// Newest products and events for the landing page.
pub fn load_home<R>(repo: &R, count: usize) -> ServiceResult<HomePage>
where
    R: TableReader<Product> + TableReader<Event> + ?Sized,
{
    let products = DataTable::<Product, R>::new(repo)
        .page_size(count)
        .mount()
        .into_rows();
    let events = DataTable::<Event, R>::new(repo)
        .page_size(count)
        .mount()
        .into_rows();

    Ok(HomePage { products, events })
}

/// Messaging deep link asking about product `product_id`.
pub fn inquiry_link<R>(repo: &R, product_id: i32, scheme: &str, number: &str) -> ServiceResult<String>
where
    R: TableReader<Product> + ?Sized,
{
    let id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;
    let product = repo.get_row(id)?.ok_or(ServiceError::NotFound)?;
    let phone = PhoneNumber::new(number).map_err(|err| {
        log::error!("Configured messaging number is invalid: {err}");
        ServiceError::from(err)
    })?;

    Ok(deep_link(scheme, &phone, &product_inquiry(&product.name)))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{Price, ProductName};
    use crate::forms::product::ProductForm;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn staff() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "editor@example.com".to_string(),
            name: "Editor".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn visitor() -> AuthenticatedUser {
        AuthenticatedUser {
            roles: Vec::new(),
            ..staff()
        }
    }

    fn product(id: i32) -> Product {
        let now = Utc::now().naive_utc();
        Product {
            id: ProductId::new(id).unwrap(),
            name: ProductName::new(format!("Coin {id}")).unwrap(),
            description: None,
            category: Some("Coins".to_string()),
            price: Price::new(99.0).unwrap(),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn admin_listing_requires_staff_role() {
        let repo = MockRepository::new();
        let result = load_admin_listing::<Product, _>(
            &repo,
            &visitor(),
            &TableQueryParams::default(),
            10,
        );
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn admin_listing_queries_current_page_and_search() {
        let mut repo = MockRepository::new();
        repo.expect_select_rows()
            .withf(|query| {
                query.pagination.as_ref().map(|p| (p.page, p.per_page)) == Some((2, 10))
                    && query
                        .search
                        .as_ref()
                        .is_some_and(|s| s.column == "name" && s.term == "coin")
            })
            .times(1)
            .returning(|_| Ok((12, vec![product(2), product(1)])));
        repo.expect_get_row()
            .returning(|id| Ok(Some(product(id.get()))));

        let params = TableQueryParams {
            page: Some(2),
            q: Some(" coin ".to_string()),
            delete: Some(2),
        };
        let page = load_admin_listing::<Product, _>(&repo, &staff(), &params, 10).unwrap();

        assert_eq!(page.listing.table.rows.len(), 2);
        assert_eq!(page.listing.table.pagination.label, "11 to 12 of 12 results");
        let target = page.delete_target.unwrap();
        assert_eq!(target.label, "Coin 2");
        assert_eq!(target.action, "/admin/products/2/delete?page=2&q=coin");
        assert_eq!(target.cancel_href, "/admin/products?page=2&q=coin");

        let row = &page.listing.table.rows[0];
        assert!(page.listing.table.row_actions);
        assert_eq!(row.actions[0].href, "/admin/products/2/edit");
        assert_eq!(row.actions[1].href, "/admin/products?page=2&q=coin&delete=2");
    }

    #[test]
    fn invalid_form_is_not_inserted() {
        let mut repo = MockRepository::new();
        repo.expect_insert_row().times(0);

        let form = ProductForm {
            name: "Coin".to_string(),
            description: None,
            category: None,
            price: "free".to_string(),
            image_url: None,
        };
        let result = create_row::<Product, _>(&repo, &staff(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn confirmed_delete_refreshes_once() {
        let mut repo = MockRepository::new();
        repo.expect_get_row()
            .returning(|id| Ok(Some(product(id.get()))));
        repo.expect_delete_row()
            .withf(|id| id.get() == 3)
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_select_rows()
            .times(1)
            .returning(|_| Ok((2, vec![product(2), product(1)])));

        let deleted =
            delete_row::<Product, _>(&repo, &staff(), 3, &TableQueryParams::default(), 10)
                .await
                .unwrap();

        assert_eq!(deleted.label, "Coin 3");
        assert_eq!(deleted.page.total, 2);
        assert_eq!(deleted.page.rows.len(), 2);
    }

    #[actix_web::test]
    async fn failed_delete_skips_refresh() {
        let mut repo = MockRepository::new();
        repo.expect_get_row()
            .returning(|id| Ok(Some(product(id.get()))));
        repo.expect_delete_row()
            .times(1)
            .returning(|_| Err(RepositoryError::DatabaseError("database is locked".into())));
        repo.expect_select_rows().times(0);

        let result =
            delete_row::<Product, _>(&repo, &staff(), 3, &TableQueryParams::default(), 10).await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[actix_web::test]
    async fn deleting_missing_row_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_row().returning(|_| Ok(None));
        repo.expect_delete_row().times(0);

        let result =
            delete_row::<Product, _>(&repo, &staff(), 3, &TableQueryParams::default(), 10).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn inquiry_link_targets_configured_number() {
        let mut repo = MockRepository::new();
        repo.expect_get_row()
            .returning(|id| Ok(Some(product(id.get()))));

        let link = inquiry_link(&repo, 5, "whatsapp", "+1 415 555 2671").unwrap();

        assert!(link.starts_with("whatsapp://send?to=14155552671&text="));
        assert!(link.contains("Coin%205"));
    }
}
