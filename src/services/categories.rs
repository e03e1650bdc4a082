use crate::domain::category::{Category, CategoryListQuery};
use crate::forms::categories::{CreateCategoryForm, UpdateCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Creates a category for a store. Duplicate names within the store surface
/// as `Conflict`.
pub fn create_category<R>(
    repo: &R,
    store_id: &str,
    form: CreateCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category(store_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Applies a partial update to a category. Re-pricing only affects bills
/// created afterwards; existing lines keep their snapshot.
pub fn modify_category<R>(
    repo: &R,
    store_id: &str,
    category_id: &str,
    form: UpdateCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category(category_id, store_id, &update)
        .map_err(ServiceError::from)
}

/// Hard-deletes a category. Blocked with `Conflict` while any bill line
/// still references it; deactivate instead in that case.
pub fn remove_category<R>(repo: &R, store_id: &str, category_id: &str) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    repo.delete_category(category_id, store_id)
        .map_err(ServiceError::from)
}

/// Lists a store's categories; inactive ones only when asked for.
pub fn list_categories<R>(
    repo: &R,
    query: CategoryListQuery,
) -> ServiceResult<(usize, Vec<Category>)>
where
    R: CategoryReader + ?Sized,
{
    repo.list_categories(query).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockCategoryWriter;

    #[test]
    fn duplicate_names_surface_as_conflict() {
        let mut writer = MockCategoryWriter::new();
        writer
            .expect_create_category()
            .returning(|_| Err(RepositoryError::Conflict));

        let form = CreateCategoryForm {
            name: "Shirt".to_string(),
            price_cents: 1500,
            icon: None,
        };
        let result = create_category(&writer, "store-1", form);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn referenced_categories_cannot_be_deleted() {
        let mut writer = MockCategoryWriter::new();
        writer
            .expect_delete_category()
            .returning(|_, _| Err(RepositoryError::Conflict));

        let result = remove_category(&writer, "store-1", "cat-1");

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn invalid_forms_never_reach_the_repository() {
        let writer = MockCategoryWriter::new();

        let form = CreateCategoryForm {
            name: "   ".to_string(),
            price_cents: 1500,
            icon: None,
        };
        let result = create_category(&writer, "store-1", form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
