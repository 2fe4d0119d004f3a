//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::staff::{NewStaffUser, StaffUser};
use crate::domain::types::{ProductId, StaffEmail, StaffUserId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AdminCredential, StaffAdmin, StaffReader, StaffWriter, TableQuery, TableReader, TableWriter,
};

mock! {
    pub Repository {}

    impl TableReader<Product> for Repository {
        fn select_rows(&self, query: &TableQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn get_row(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    }

    impl TableWriter<Product> for Repository {
        fn insert_row(&self, new_row: &NewProduct) -> RepositoryResult<Product>;
        fn update_row(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_row(&self, id: ProductId) -> RepositoryResult<()>;
    }

    impl StaffReader for Repository {
        fn get_staff_by_email(&self, email: &StaffEmail) -> RepositoryResult<Option<StaffUser>>;
    }

    impl StaffWriter for Repository {
        fn create_staff(&self, new_user: &NewStaffUser) -> RepositoryResult<StaffUser>;
        fn record_sign_in(&self, id: StaffUserId) -> RepositoryResult<()>;
    }

    impl StaffAdmin for Repository {
        fn list_staff(&self, credential: &AdminCredential) -> RepositoryResult<Vec<StaffUser>>;
        fn delete_staff(
            &self,
            credential: &AdminCredential,
            id: StaffUserId,
        ) -> RepositoryResult<()>;
    }
}
