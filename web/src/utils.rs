use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Local storage key of a persisted record.
pub(crate) trait StorageKey {
    const KEY: &'static str;

    /// Stored records failing this check are treated as missing.
    fn is_valid(&self) -> bool {
        true
    }
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + DeserializeOwned + Default,
{
    fn local_or_default() -> Self {
        match LocalStorage::get::<T>(T::KEY) {
            Ok(value) if value.is_valid() => value,
            Ok(_) => {
                log::warn!("discarding inconsistent record {}", T::KEY);
                T::default()
            }
            Err(StorageError::KeyNotFound(_)) => T::default(),
            Err(err) => {
                log::warn!("discarding unreadable record {}: {:?}", T::KEY, err);
                T::default()
            }
        }
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T> LocalSave for T
where
    T: StorageKey + Serialize,
{
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("Could not save {} to local storage: {:?}", T::KEY, err);
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}
