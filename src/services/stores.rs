use crate::domain::category::{DEFAULT_CATALOG, NewCategory};
use crate::domain::settings::DEFAULT_SETTINGS;
use crate::domain::store::Store;
use crate::forms::stores::{RegisterStoreForm, StoreStatusForm};
use crate::repository::{CategoryWriter, SettingsWriter, StoreReader, StoreWriter};
use crate::services::{ServiceError, ServiceResult};

/// Registers a store and seeds it with the default settings and service
/// catalog so it can bill from the first request. Stores start active.
pub fn register_store<R>(repo: &R, form: RegisterStoreForm) -> ServiceResult<Store>
where
    R: StoreWriter + SettingsWriter + CategoryWriter + ?Sized,
{
    let new_store = form
        .into_new_store()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let store = repo.create_store(&new_store)?;

    let defaults: Vec<(String, String)> = DEFAULT_SETTINGS
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    repo.upsert_settings(&store.id, &defaults)?;

    for (name, price_cents, icon) in DEFAULT_CATALOG {
        let category = NewCategory::new(&store.id, *name, *price_cents).with_icon(*icon);
        repo.create_category(&category)?;
    }

    Ok(store)
}

/// Loads one store.
pub fn get_store<R>(repo: &R, store_id: &str) -> ServiceResult<Store>
where
    R: StoreReader + ?Sized,
{
    repo.get_store_by_id(store_id)?
        .ok_or(ServiceError::NotFound)
}

/// Toggles a store's active flag. Data is kept either way; a deactivated
/// store just stops operating.
pub fn set_store_status<R>(repo: &R, store_id: &str, form: StoreStatusForm) -> ServiceResult<Store>
where
    R: StoreReader + StoreWriter + ?Sized,
{
    repo.get_store_by_id(store_id)?
        .ok_or(ServiceError::NotFound)?;

    let update = form
        .into_update()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.set_store_status(store_id, &update)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{Category, UpdateCategory};
    use crate::domain::store::{NewStore, UpdateStoreStatus};
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockCategoryWriter, MockSettingsWriter, MockStoreWriter};

    struct MockRegistrationRepo {
        stores: MockStoreWriter,
        settings: MockSettingsWriter,
        categories: MockCategoryWriter,
    }

    impl MockRegistrationRepo {
        fn new() -> Self {
            Self {
                stores: MockStoreWriter::new(),
                settings: MockSettingsWriter::new(),
                categories: MockCategoryWriter::new(),
            }
        }
    }

    impl StoreWriter for MockRegistrationRepo {
        fn create_store(&self, new_store: &NewStore) -> RepositoryResult<Store> {
            self.stores.create_store(new_store)
        }

        fn set_store_status(
            &self,
            store_id: &str,
            update: &UpdateStoreStatus,
        ) -> RepositoryResult<Store> {
            self.stores.set_store_status(store_id, update)
        }
    }

    impl SettingsWriter for MockRegistrationRepo {
        fn upsert_settings(
            &self,
            store_id: &str,
            pairs: &[(String, String)],
        ) -> RepositoryResult<()> {
            self.settings.upsert_settings(store_id, pairs)
        }
    }

    impl CategoryWriter for MockRegistrationRepo {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category> {
            self.categories.create_category(new_category)
        }

        fn update_category(
            &self,
            category_id: &str,
            store_id: &str,
            updates: &UpdateCategory,
        ) -> RepositoryResult<Category> {
            self.categories.update_category(category_id, store_id, updates)
        }

        fn delete_category(&self, category_id: &str, store_id: &str) -> RepositoryResult<()> {
            self.categories.delete_category(category_id, store_id)
        }
    }

    fn created_store() -> Store {
        Store {
            id: "store-1".to_string(),
            name: "Iron Press".to_string(),
            phone: None,
            address: None,
            is_active: true,
            deactivation_reason: None,
            created_at: chrono::Local::now().naive_local(),
            updated_at: chrono::Local::now().naive_local(),
        }
    }

    fn echo_category(value: &NewCategory) -> Category {
        Category {
            id: "cat-1".to_string(),
            store_id: value.store_id.clone(),
            name: value.name.clone(),
            price_cents: value.price_cents,
            icon: value.icon.clone(),
            is_active: true,
            created_at: chrono::Local::now().naive_local(),
            updated_at: chrono::Local::now().naive_local(),
        }
    }

    #[test]
    fn registration_seeds_settings_and_catalog() {
        let mut repo = MockRegistrationRepo::new();
        repo.stores
            .expect_create_store()
            .times(1)
            .returning(|_| Ok(created_store()));
        repo.settings
            .expect_upsert_settings()
            .withf(|store_id, pairs| store_id == "store-1" && pairs.len() == DEFAULT_SETTINGS.len())
            .times(1)
            .returning(|_, _| Ok(()));
        repo.categories
            .expect_create_category()
            .withf(|category| category.store_id == "store-1" && category.icon.is_some())
            .times(DEFAULT_CATALOG.len())
            .returning(|category| Ok(echo_category(category)));

        let form = RegisterStoreForm {
            name: "Iron Press".to_string(),
            phone: None,
            address: None,
        };
        let store = register_store(&repo, form).expect("registration succeeds");

        assert!(store.is_active);
    }

    #[test]
    fn status_toggle_on_an_unknown_store_is_not_found() {
        struct EmptyRepo;

        impl StoreReader for EmptyRepo {
            fn get_store_by_id(&self, _id: &str) -> RepositoryResult<Option<Store>> {
                Ok(None)
            }
        }

        impl StoreWriter for EmptyRepo {
            fn create_store(&self, _new_store: &NewStore) -> RepositoryResult<Store> {
                unimplemented!("not used")
            }

            fn set_store_status(
                &self,
                _store_id: &str,
                _update: &UpdateStoreStatus,
            ) -> RepositoryResult<Store> {
                unimplemented!("not used")
            }
        }

        let form = StoreStatusForm {
            is_active: false,
            reason: Some("closed down".to_string()),
        };
        let result = set_store_status(&EmptyRepo, "nope", form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
