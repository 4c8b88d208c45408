use strata_db_types::traits::MetadataDatabase;

pub fn test_get_missing_metadata(db: &impl MetadataDatabase) {
    let value = db.get_metadata(b"missing").expect("test: get");
    assert_eq!(value, None);
}

pub fn test_put_get_metadata(db: &impl MetadataDatabase) {
    db.put_metadata(b"d", 42u64.to_le_bytes().to_vec())
        .expect("test: insert");

    let value = db.get_metadata(b"d").expect("test: get").unwrap();
    assert_eq!(value, 42u64.to_le_bytes().to_vec());
}

pub fn test_overwrite_metadata(db: &impl MetadataDatabase) {
    db.put_metadata(b"d", vec![1, 2, 3]).expect("test: insert");
    db.put_metadata(b"d", vec![4]).expect("test: overwrite");

    let value = db.get_metadata(b"d").expect("test: get").unwrap();
    assert_eq!(value, vec![4]);
}

pub fn test_metadata_keys_are_independent(db: &impl MetadataDatabase) {
    db.put_metadata(b"a", vec![1]).expect("test: insert a");
    db.put_metadata(b"ab", vec![2]).expect("test: insert ab");

    assert_eq!(db.get_metadata(b"a").expect("test: get a"), Some(vec![1]));
    assert_eq!(db.get_metadata(b"ab").expect("test: get ab"), Some(vec![2]));
    assert_eq!(db.get_metadata(b"b").expect("test: get b"), None);
}

pub fn test_empty_metadata_value(db: &impl MetadataDatabase) {
    db.put_metadata(b"empty", Vec::new()).expect("test: insert");

    let value = db.get_metadata(b"empty").expect("test: get");
    assert_eq!(value, Some(Vec::new()));
}

#[macro_export]
macro_rules! metadata_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_get_missing_metadata() {
            let db = $setup_expr;
            $crate::metadata_tests::test_get_missing_metadata(&db);
        }

        #[test]
        fn test_put_get_metadata() {
            let db = $setup_expr;
            $crate::metadata_tests::test_put_get_metadata(&db);
        }

        #[test]
        fn test_overwrite_metadata() {
            let db = $setup_expr;
            $crate::metadata_tests::test_overwrite_metadata(&db);
        }

        #[test]
        fn test_metadata_keys_are_independent() {
            let db = $setup_expr;
            $crate::metadata_tests::test_metadata_keys_are_independent(&db);
        }

        #[test]
        fn test_empty_metadata_value() {
            let db = $setup_expr;
            $crate::metadata_tests::test_empty_metadata_value(&db);
        }
    };
}
