use crate::domain::settings::StoreSettings;
use crate::forms::settings::UpdateSettingsForm;
use crate::repository::{SettingsReader, SettingsWriter, StoreReader};
use crate::services::{ServiceError, ServiceResult};

/// Typed view over a store's settings bag. Legacy camelCase keys are
/// honoured by the parser, so tenants written before the rename keep their
/// configuration.
pub fn store_settings<R>(repo: &R, store_id: &str) -> ServiceResult<StoreSettings>
where
    R: StoreReader + SettingsReader + ?Sized,
{
    repo.get_store_by_id(store_id)?
        .ok_or(ServiceError::NotFound)?;

    let map = repo.get_settings(store_id)?;
    Ok(StoreSettings::from_map(&map))
}

/// Upserts a batch of settings atomically and returns the refreshed typed
/// view.
pub fn update_settings<R>(
    repo: &R,
    store_id: &str,
    form: UpdateSettingsForm,
) -> ServiceResult<StoreSettings>
where
    R: StoreReader + SettingsReader + SettingsWriter + ?Sized,
{
    repo.get_store_by_id(store_id)?
        .ok_or(ServiceError::NotFound)?;

    let pairs = form
        .into_pairs()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.upsert_settings(store_id, &pairs)?;

    let map = repo.get_settings(store_id)?;
    Ok(StoreSettings::from_map(&map))
}
