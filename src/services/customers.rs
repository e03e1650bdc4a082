use crate::domain::customer::{Customer, CustomerListQuery};
use crate::forms::customers::CreateCustomerForm;
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Creates a customer directly, outside the lazy bill-creation path.
/// Duplicate phone numbers within the store surface as `Conflict`.
pub fn create_customer<R>(
    repo: &R,
    store_id: &str,
    form: CreateCustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let new_customer = form
        .into_new_customer(store_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_customer(&new_customer)
        .map_err(ServiceError::from)
}

/// Loads one customer scoped to the store.
pub fn get_customer<R>(repo: &R, store_id: &str, customer_id: &str) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    repo.get_customer_by_id(customer_id, store_id)?
        .ok_or(ServiceError::NotFound)
}

/// Lists a store's customers, newest first.
pub fn list_customers<R>(
    repo: &R,
    query: CustomerListQuery,
) -> ServiceResult<(usize, Vec<Customer>)>
where
    R: CustomerReader + ?Sized,
{
    repo.list_customers(query).map_err(ServiceError::from)
}
