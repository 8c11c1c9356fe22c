use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::resource::MetaData;
use crate::resource::error::ResourceError;
use crate::resource::repository::MetaDataRepository;

/// Metadata of one file, loaded from the repository on first access.
///
/// Data added before the first read counts as loaded, so the repository is
/// not queried for it.
pub struct MetaDataAspect {
    file_uid: i64,
    repository: Arc<dyn MetaDataRepository>,
    data: MetaData,
    loaded: bool,
}

impl MetaDataAspect {
    pub fn new(file_uid: i64, repository: Arc<dyn MetaDataRepository>) -> Self {
        Self {
            file_uid,
            repository,
            data: MetaData::new(),
            loaded: false,
        }
    }

    pub fn file_uid(&self) -> i64 {
        self.file_uid
    }

    /// Merges `meta_data` into the current data. Existing keys are overwritten
    /// in place and new keys are appended.
    pub fn add(&mut self, meta_data: MetaData) -> &mut Self {
        self.loaded = true;
        self.data.extend(meta_data);
        self
    }

    pub fn get(&mut self) -> Result<&MetaData, ResourceError> {
        self.load()?;
        Ok(&self.data)
    }

    pub fn has(&mut self, key: &str) -> Result<bool, ResourceError> {
        self.load()?;
        Ok(self.data.contains_key(key))
    }

    pub fn value(&mut self, key: &str) -> Result<Option<&Value>, ResourceError> {
        self.load()?;
        Ok(self.data.get(key))
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), ResourceError> {
        self.load()?;
        self.data.insert(key.into(), value);
        Ok(())
    }

    /// Sets `key` to `null` so the next save clears the column.
    pub fn unset(&mut self, key: &str) -> Result<(), ResourceError> {
        self.set(key, Value::Null)
    }

    pub fn len(&mut self) -> Result<usize, ResourceError> {
        self.load()?;
        Ok(self.data.len())
    }

    pub fn is_empty(&mut self) -> Result<bool, ResourceError> {
        Ok(self.len()? == 0)
    }

    /// Writes the current data to the repository.
    ///
    /// Without a stored row a new record is created and replaces the current
    /// data; otherwise the row is updated.
    pub fn save(&mut self) -> Result<&mut Self, ResourceError> {
        let stored = self.repository.find_by_file_uid(self.file_uid)?;
        if stored.is_empty() {
            debug!("Creating metadata for file {}", self.file_uid);
            self.data = self
                .repository
                .create_meta_data_record(self.file_uid, &self.data)?;
        } else {
            debug!("Updating metadata of file {}", self.file_uid);
            self.repository.update(self.file_uid, &self.data)?;
        }
        Ok(self)
    }

    /// Deletes the stored row and clears the data.
    pub fn remove(&mut self) -> Result<(), ResourceError> {
        self.repository.remove_by_file_uid(self.file_uid)?;
        self.data.clear();
        self.loaded = true;
        Ok(())
    }

    fn load(&mut self) -> Result<(), ResourceError> {
        if !self.loaded {
            self.data = self.repository.find_by_file_uid(self.file_uid)?;
            self.loaded = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use serde_json::json;

    use super::*;
    use crate::dispatcher::NoopEventDispatcher;
    use crate::resource::error::INVALID_UID_CODE;
    use crate::resource::repository::InMemoryMetaDataRepository;
    use crate::resource::repository::MockMetaDataRepository;

    fn meta(value: Value) -> MetaData {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected a JSON object"),
        }
    }

    #[test]
    fn test_added_meta_data_is_not_loaded_again() {
        let mut repository = MockMetaDataRepository::new();
        repository.expect_find_by_file_uid().never();
        let mut aspect = MetaDataAspect::new(12, Arc::new(repository));

        aspect.add(meta(json!({"width": 4711, "title": "Lorem ipsum meta sit amet"})));

        assert_eq!(
            aspect.get().unwrap(),
            &meta(json!({"width": 4711, "title": "Lorem ipsum meta sit amet"}))
        );
    }

    #[test]
    fn test_manually_added_meta_data_is_merged() {
        let mut aspect = MetaDataAspect::new(12, Arc::new(MockMetaDataRepository::new()));

        aspect
            .add(meta(json!({"width": 4711, "title": "Lorem ipsum meta sit amet"})))
            .add(meta(json!({"height": 900, "description": "Presented with care"})))
            .add(meta(json!({"width": 1024})));

        let data = aspect.get().unwrap();
        assert_eq!(
            data.keys().collect::<Vec<_>>(),
            ["width", "title", "height", "description"]
        );
        assert_eq!(data["width"], json!(1024));
    }

    #[test]
    fn test_meta_data_gets_removed() {
        let mut repository = MockMetaDataRepository::new();
        repository
            .expect_remove_by_file_uid()
            .withf(|uid| *uid == 12)
            .times(1)
            .returning(|_| Ok(()));
        repository.expect_find_by_file_uid().never();
        let mut aspect = MetaDataAspect::new(12, Arc::new(repository));

        aspect.add(meta(json!({"foo": "bar"})));
        aspect.remove().unwrap();

        assert!(aspect.get().unwrap().is_empty());
    }

    #[test]
    fn test_positive_uid_is_expected_to_load_meta_data() {
        let repository = InMemoryMetaDataRepository::new(["title"], Arc::new(NoopEventDispatcher));
        let mut aspect = MetaDataAspect::new(-3, Arc::new(repository));

        let err = aspect.get().unwrap_err();
        assert_eq!(err.code(), Some(INVALID_UID_CODE));
        assert_eq!(
            err.to_string(),
            "Metadata can only be retrieved for indexed files. UID: \"-3\""
        );
    }

    #[test]
    fn test_meta_data_is_loaded_once() {
        let mut repository = MockMetaDataRepository::new();
        repository
            .expect_find_by_file_uid()
            .times(1)
            .returning(|_| Ok(meta(json!({"uid": 5, "title": "Stored"}))));
        let mut aspect = MetaDataAspect::new(12, Arc::new(repository));

        assert_eq!(aspect.value("title").unwrap(), Some(&json!("Stored")));
        assert_eq!(aspect.len().unwrap(), 2);
        assert!(aspect.has("uid").unwrap());
    }

    #[test]
    fn test_new_meta_data_is_created() {
        let repository = InMemoryMetaDataRepository::new(["title"], Arc::new(NoopEventDispatcher))
            .with_clock(|| 1534530781);
        let mut aspect = MetaDataAspect::new(12, Arc::new(repository));

        aspect
            .add(meta(json!({"title": "Hooray", "description": "Yipp yipp yipp"})))
            .save()
            .unwrap();

        let expected = meta(json!({
            "file": 12,
            "pid": 0,
            "crdate": 1534530781,
            "tstamp": 1534530781,
            "l10n_diffsource": "",
            "title": "Hooray",
            "uid": 1,
        }));
        let data = aspect.get().unwrap();
        assert_eq!(data, &expected);
        assert_eq!(
            data.keys().collect::<Vec<_>>(),
            expected.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_existing_meta_data_gets_updated() {
        let mut seq = Sequence::new();
        let mut stored = MetaData::new();
        let mut repository = MockMetaDataRepository::new();
        repository
            .expect_find_by_file_uid()
            .times(2)
            .returning(move |_| {
                let row = stored.clone();
                stored = meta(json!({"foo": "bar"}));
                Ok(row)
            });
        repository
            .expect_create_meta_data_record()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(meta(json!({"foo": "bar"}))));
        repository
            .expect_update()
            .withf(|uid, data| *uid == 12 && data.get("testproperty") == Some(&json!("testvalue")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        let mut aspect = MetaDataAspect::new(12, Arc::new(repository));

        aspect.add(meta(json!({"foo": "bar"}))).save().unwrap();
        aspect
            .add(meta(json!({"testproperty": "testvalue"})))
            .save()
            .unwrap();

        assert_eq!(
            aspect.get().unwrap(),
            &meta(json!({"foo": "bar", "testproperty": "testvalue"}))
        );
    }

    #[test]
    fn test_property_is_fetched_properly() {
        let cases = [
            (json!({"width": 4711, "title": "Lorem ipsum meta sit amet"}), "width", Some(json!(4711))),
            (json!({"foo": "bar"}), "husel", None),
        ];

        for (data, property, expected) in cases {
            let mut aspect = MetaDataAspect::new(12, Arc::new(MockMetaDataRepository::new()));
            aspect.add(meta(data));

            assert_eq!(aspect.has(property).unwrap(), expected.is_some());
            assert_eq!(aspect.value(property).unwrap(), expected.as_ref());
        }
    }

    #[test]
    fn test_unset_keeps_key_as_null() {
        let mut aspect = MetaDataAspect::new(12, Arc::new(MockMetaDataRepository::new()));
        aspect.add(meta(json!({"title": "Lorem"})));

        aspect.unset("title").unwrap();
        aspect.set("alternative", json!("Ipsum")).unwrap();

        assert_eq!(aspect.value("title").unwrap(), Some(&Value::Null));
        assert_eq!(aspect.len().unwrap(), 2);
    }
}
